//! Artisan profile record.

use serde::{Deserialize, Serialize};

use super::id::ArtisanId;

/// A seller on the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artisan {
    pub id: ArtisanId,
    pub name: String,
    /// Preferred language for generated content (e.g. `Hindi`).
    pub language: String,
    pub bio: String,
    pub profile_image: String,
    pub location: String,
    pub joined_at: String,
}
