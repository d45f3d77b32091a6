//! Structured content extraction from free-text model replies.
//!
//! The model is asked for a JSON object but replies are free text, often
//! wrapped in prose or code fences. [`extract`] takes the substring from
//! the first `{` to the last `}`, deserializes it strictly into the target
//! schema and validates it. Anything short of a complete, non-empty object
//! yields the schema's static fallback, tagged so callers can tell the two
//! apart.

use std::sync::Arc;

use artisan_hub_core::ContentKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::audit::{self, AuditLog, AuditRecord};
use crate::genai::{GenAiError, TextGenerator};

// =============================================================================
// Generation
// =============================================================================

/// Outcome of extracting structured content from a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation<T> {
    /// The reply contained a valid object.
    Generated(T),
    /// The reply was unusable; the schema's static fallback is served.
    Fallback(T),
}

impl<T> Generation<T> {
    /// `"generated"` or `"fallback"`, as exposed to clients.
    #[must_use]
    pub const fn source(&self) -> &'static str {
        match self {
            Self::Generated(_) => "generated",
            Self::Fallback(_) => "fallback",
        }
    }

    /// Whether the fallback was served.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// The content, whichever way it was produced.
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Self::Generated(v) | Self::Fallback(v) => v,
        }
    }

    /// Transform the content, keeping the tag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Generation<U> {
        match self {
            Self::Generated(v) => Generation::Generated(f(v)),
            Self::Fallback(v) => Generation::Fallback(f(v)),
        }
    }
}

/// A JSON schema the model is asked to fill.
pub trait StructuredContent: DeserializeOwned + Serialize + Sized {
    /// Content served when the reply is unusable. Identical for every input.
    fn fallback() -> Self;

    /// Every required string and list is non-empty.
    fn is_valid(&self) -> bool;
}

/// Parse a model reply into `T`, or fall back.
#[must_use]
pub fn extract<T: StructuredContent>(reply: &str) -> Generation<T> {
    json_object_span(reply)
        .and_then(|json| serde_json::from_str::<T>(json).ok())
        .filter(T::is_valid)
        .map_or_else(|| Generation::Fallback(T::fallback()), Generation::Generated)
}

/// Substring from the first `{` to the last `}`, inclusive.
fn json_object_span(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if start >= end {
        return None;
    }
    reply.get(start..=end)
}

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

fn filled_list(items: &[String]) -> bool {
    !items.is_empty() && items.iter().all(|s| filled(s))
}

// =============================================================================
// Schemas
// =============================================================================

/// `{ title }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleContent {
    pub title: String,
}

/// `{ title, shortDescription, longDescription, features[], careInstructions, giftText }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionContent {
    pub title: String,
    pub short_description: String,
    pub long_description: String,
    pub features: Vec<String>,
    pub care_instructions: String,
    pub gift_text: String,
}

/// `{ title, story }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryContent {
    pub title: String,
    pub story: String,
}

/// `{ instagram, facebook, twitter, hashtags[] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialContent {
    pub instagram: String,
    pub facebook: String,
    pub twitter: String,
    pub hashtags: Vec<String>,
}

/// Complete marketing copy for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingPackage {
    pub seo_title: String,
    pub meta_description: String,
    pub instagram_caption: String,
    pub facebook_post: String,
    pub whatsapp_message: String,
    pub email_subject: String,
    pub product_story: String,
    pub call_to_actions: Vec<String>,
}

impl StructuredContent for TitleContent {
    fn fallback() -> Self {
        Self {
            title: "Handcrafted Artisan Masterpiece".to_string(),
        }
    }

    fn is_valid(&self) -> bool {
        filled(&self.title)
    }
}

impl StructuredContent for DescriptionContent {
    fn fallback() -> Self {
        Self {
            title: "Handcrafted Artisan Masterpiece".to_string(),
            short_description: "Authentic handcrafted item showcasing traditional Indian artistry and cultural heritage.".to_string(),
            long_description: "This exquisite handcrafted piece represents the finest in traditional Indian artistry. Each item is meticulously created by skilled artisans who have inherited their craft through generations, ensuring authenticity and unparalleled quality. The intricate details and cultural significance make this not just a purchase, but an investment in preserving traditional craftsmanship.".to_string(),
            features: vec![
                "100% handcrafted by traditional artisans".to_string(),
                "Authentic materials and techniques".to_string(),
                "Unique cultural significance".to_string(),
                "Supporting artisan communities".to_string(),
                "Premium quality craftsmanship".to_string(),
            ],
            care_instructions: "Handle with care. Clean gently with soft cloth. Store in dry place away from direct sunlight.".to_string(),
            gift_text: "Perfect gift for art lovers, cultural enthusiasts, and anyone who appreciates authentic handcrafted beauty.".to_string(),
        }
    }

    fn is_valid(&self) -> bool {
        filled(&self.title)
            && filled(&self.short_description)
            && filled(&self.long_description)
            && filled_list(&self.features)
            && filled(&self.care_instructions)
            && filled(&self.gift_text)
    }
}

impl StructuredContent for StoryContent {
    fn fallback() -> Self {
        Self {
            title: "A Craft Passed Down Through Generations".to_string(),
            story: "Behind every piece lies a story of dedication, inherited skill, and cultural pride. Working with techniques learned from elders, the artisan shapes each item by hand, giving it a character no machine can reproduce. Owning it keeps a living tradition alive.".to_string(),
        }
    }

    fn is_valid(&self) -> bool {
        filled(&self.title) && filled(&self.story)
    }
}

impl StructuredContent for SocialContent {
    fn fallback() -> Self {
        Self {
            instagram: "✨ Discover authentic handcrafted beauty! 🎨 Each piece tells a story of tradition, skill, and cultural heritage.".to_string(),
            facebook: "Support traditional artisans and bring home a piece of cultural heritage! Every purchase supports artisan communities and preserves ancient crafts.".to_string(),
            twitter: "🎨 Authentic artisan crafts that tell stories of heritage & skill ✨".to_string(),
            hashtags: vec![
                "#HandmadeInIndia".to_string(),
                "#TraditionalCrafts".to_string(),
                "#ArtisanMade".to_string(),
                "#CulturalHeritage".to_string(),
            ],
        }
    }

    fn is_valid(&self) -> bool {
        filled(&self.instagram)
            && filled(&self.facebook)
            && filled(&self.twitter)
            && filled_list(&self.hashtags)
    }
}

impl StructuredContent for MarketingPackage {
    fn fallback() -> Self {
        Self {
            seo_title: "Authentic Handcrafted Masterpiece - Traditional Indian Artistry".to_string(),
            meta_description: "Discover authentic handcrafted items made by traditional Indian artisans. Premium quality, cultural heritage, and unique artistry in every piece.".to_string(),
            instagram_caption: "✨ Discover the magic of traditional craftsmanship! Each piece tells a story of heritage and skill. 🎨 #HandmadeInIndia #TraditionalCrafts #ArtisanMade #CulturalHeritage #SustainableShopping #IndianArt".to_string(),
            facebook_post: "Support traditional artisans and bring home a piece of cultural heritage! Our handcrafted items are more than products - they're stories of skill, tradition, and artistry passed down through generations. Every purchase supports artisan communities and preserves ancient crafts.".to_string(),
            whatsapp_message: "🎨 Check out this amazing handcrafted piece! Made by traditional Indian artisans with incredible skill and attention to detail. Perfect for art lovers and anyone who appreciates authentic craftsmanship. What do you think?".to_string(),
            email_subject: "Exclusive Handcrafted Treasures - Limited Artisan Collection".to_string(),
            product_story: "Behind every piece lies a story of dedication, inherited skill, and cultural pride. Our artisans have mastered their craft through generations, creating not just products, but pieces of living heritage that connect us to India's rich artistic traditions.".to_string(),
            call_to_actions: vec![
                "Shop Now - Limited Pieces Available".to_string(),
                "Support Artisan Communities Today".to_string(),
                "Add to Cart - Free Shipping".to_string(),
                "Discover Your Cultural Connection".to_string(),
                "Gift Authentic Artistry".to_string(),
            ],
        }
    }

    fn is_valid(&self) -> bool {
        filled(&self.seo_title)
            && filled(&self.meta_description)
            && filled(&self.instagram_caption)
            && filled(&self.facebook_post)
            && filled(&self.whatsapp_message)
            && filled(&self.email_subject)
            && filled(&self.product_story)
            && filled_list(&self.call_to_actions)
    }
}

/// Content for any [`ContentKind`], serialized as the bare schema object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum KindContent {
    Title(TitleContent),
    Description(DescriptionContent),
    Story(StoryContent),
    Social(SocialContent),
}

/// Extract the schema belonging to `kind`.
#[must_use]
pub fn extract_kind(kind: ContentKind, reply: &str) -> Generation<KindContent> {
    match kind {
        ContentKind::Title => extract(reply).map(KindContent::Title),
        ContentKind::Description => extract(reply).map(KindContent::Description),
        ContentKind::Story => extract(reply).map(KindContent::Story),
        ContentKind::Social => extract(reply).map(KindContent::Social),
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Model and audit trail used for one generation.
#[derive(Clone, Copy)]
pub struct GenerationContext<'a> {
    pub generator: &'a dyn TextGenerator,
    pub audit: &'a Arc<dyn AuditLog>,
    pub language: &'a str,
}

impl GenerationContext<'_> {
    /// Record a model exchange on a detached task.
    pub fn audit(&self, label: &str, prompt: &str, reply: &str, used_fallback: bool) {
        audit::spawn_record(
            Arc::clone(self.audit),
            AuditRecord::new(
                label,
                prompt,
                reply,
                used_fallback,
                self.language,
                self.generator.model(),
            ),
        );
    }

    /// Generate, extract and audit content for a content kind.
    ///
    /// # Errors
    ///
    /// Returns `GenAiError` if the model call fails. Nothing is audited in
    /// that case.
    pub async fn generate_kind(
        &self,
        kind: ContentKind,
        prompt: &str,
    ) -> Result<Generation<KindContent>, GenAiError> {
        let reply = self.generator.generate(prompt).await?;
        let generation = extract_kind(kind, &reply);
        self.audit(kind.as_str(), prompt, &reply, generation.is_fallback());
        Ok(generation)
    }

    /// Generate, extract and audit content for any schema.
    ///
    /// # Errors
    ///
    /// Returns `GenAiError` if the model call fails.
    pub async fn generate<T: StructuredContent>(
        &self,
        label: &str,
        prompt: &str,
    ) -> Result<Generation<T>, GenAiError> {
        let reply = self.generator.generate(prompt).await?;
        let generation = extract::<T>(&reply);
        self.audit(label, prompt, &reply, generation.is_fallback());
        Ok(generation)
    }
}
