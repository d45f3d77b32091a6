//! Kinds of AI-generated product content.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Error returned when a content kind name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid content type '{0}' (expected one of: title, description, story, social)")]
pub struct ParseContentKindError(pub String);

/// The closed set of content the generator can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// SEO-friendly product title.
    Title,
    /// Short and long product descriptions with features and care notes.
    Description,
    /// Artisan story behind the product.
    Story,
    /// Social media captions.
    Social,
}

impl ContentKind {
    /// All kinds, in display order.
    pub const ALL: [Self; 4] = [Self::Title, Self::Description, Self::Story, Self::Social];

    /// Canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Story => "story",
            Self::Social => "social",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = ParseContentKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "story" => Ok(Self::Story),
            "social" | "social-caption" | "social_caption" => Ok(Self::Social),
            _ => Err(ParseContentKindError(s.to_owned())),
        }
    }
}

impl<'de> Deserialize<'de> for ContentKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
