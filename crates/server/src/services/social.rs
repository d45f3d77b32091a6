//! Social post templates and placeholder share analytics.
//!
//! Posts are templated, not generated: each [`PostPlatform`] has fixed copy
//! with the product title worked in when the product is known. Share links
//! come from [`artisan_hub_core::SharePlatform::share_link`].

use std::collections::BTreeMap;

use artisan_hub_core::{PostPlatform, ShareInstructions, ShareLink};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

/// How long generated posts stay valid.
pub const POST_TTL_HOURS: i64 = 24;

/// Window covered by the analytics placeholder.
pub const ANALYTICS_WINDOW_DAYS: i64 = 7;

const INSTAGRAM_HASHTAGS: [&str; 6] = [
    "#HandmadeInIndia",
    "#TraditionalCrafts",
    "#ArtisanMade",
    "#CulturalHeritage",
    "#IndianArt",
    "#SustainableShopping",
];

const TWITTER_HASHTAGS: [&str; 4] = [
    "#HandmadeInIndia",
    "#ArtisanMade",
    "#CulturalHeritage",
    "#SustainableShopping",
];

/// A templated post ready to share.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub id: Uuid,
    pub platform: PostPlatform,
    pub content: PostContent,
    /// Deep link, absent for platforms that only support manual posting.
    pub share_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<ShareInstructions>,
}

/// Platform-specific post body.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PostContent {
    Instagram(InstagramContent),
    Facebook(FacebookContent),
    Whatsapp(WhatsappContent),
    Twitter(TwitterContent),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstagramContent {
    pub caption: String,
    pub hashtags: Vec<&'static str>,
    pub cta: &'static str,
    pub image_aspect_ratio: &'static str,
    pub story_version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookContent {
    pub text: String,
    pub cta: &'static str,
    pub link_description: &'static str,
    pub target_audience: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsappContent {
    pub message: String,
    pub media_type: &'static str,
    pub business_message: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwitterContent {
    pub tweet: String,
    pub hashtags: Vec<&'static str>,
    pub character_count: usize,
    pub media_attachment: bool,
}

/// Posts for several platforms about one product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBatch {
    pub posts: BTreeMap<PostPlatform, SocialPost>,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PostBatch {
    /// Build one post per platform. Duplicate platforms collapse.
    #[must_use]
    pub fn build(platforms: &[PostPlatform], title: Option<&str>, product_url: &str) -> Self {
        let generated_at = Utc::now();
        let posts = platforms
            .iter()
            .map(|&platform| (platform, build_post(platform, title, product_url)))
            .collect();

        Self {
            posts,
            generated_at,
            expires_at: generated_at + Duration::hours(POST_TTL_HOURS),
        }
    }
}

/// Build the templated post for one platform.
#[must_use]
pub fn build_post(platform: PostPlatform, title: Option<&str>, product_url: &str) -> SocialPost {
    let (content, share_message) = match platform {
        PostPlatform::Instagram => {
            let lead = title.map_or_else(
                || "✨ Discover authentic handcrafted beauty! 🎨".to_string(),
                |t| format!("✨ {t}: authentic handcrafted beauty! 🎨"),
            );
            let caption = format!(
                "{lead}\n\nEach piece tells a story of tradition, skill, and cultural heritage. Made by talented Indian artisans who pour their heart into every detail.\n\n{}",
                INSTAGRAM_HASHTAGS.join(" ")
            );
            (
                PostContent::Instagram(InstagramContent {
                    caption,
                    hashtags: INSTAGRAM_HASHTAGS.to_vec(),
                    cta: "Shop now ➡️ Link in bio",
                    image_aspect_ratio: "1:1",
                    story_version: "🎨 Authentic artisan crafts ✨ Swipe up to shop!",
                }),
                None,
            )
        }
        PostPlatform::Facebook => {
            let lead = title.map_or_else(
                || "🎨 Support Traditional Artisans & Discover Authentic Beauty!".to_string(),
                |t| format!("🎨 Meet the {t}: handcrafted by traditional artisans!"),
            );
            let text = format!(
                "{lead}\n\nEvery handcrafted piece in our collection tells a unique story of skill, tradition, and cultural pride. When you choose artisan-made products, you support talented craftspeople and help preserve centuries-old traditions.\n\n✨ What makes our products special:\n• 100% handcrafted by skilled artisans\n• Authentic traditional techniques\n• Premium quality materials\n• Supporting artisan communities\n\nBring home a piece of India's rich artistic heritage today!"
            );
            (
                PostContent::Facebook(FacebookContent {
                    text,
                    cta: "Shop Now",
                    link_description: "Explore our exclusive collection of handcrafted treasures",
                    target_audience: "Art enthusiasts, cultural collectors, conscious consumers",
                }),
                Some(title.map_or_else(
                    || "Check out this amazing handcrafted piece!".to_string(),
                    |t| format!("Check out the {t}!"),
                )),
            )
        }
        PostPlatform::Whatsapp => {
            let lead = title.map_or_else(
                || "🎨 *Check out this incredible handcrafted piece!*".to_string(),
                |t| format!("🎨 *Check out the {t}!*"),
            );
            let message = format!(
                "{lead}\n\nMade by talented Indian artisans using traditional techniques passed down through generations. ✨\n\n*Perfect for:*\n• Art lovers & collectors\n• Unique home decor\n• Meaningful gifts\n• Supporting artisan communities\n\n👆 Tap to see more details"
            );
            let share = title.map_or_else(
                || "🎨 Check out this amazing handcrafted piece! Made by traditional Indian artisans. Perfect for art lovers!".to_string(),
                |t| format!("🎨 Check out the {t}! Made by traditional Indian artisans."),
            );
            (
                PostContent::Whatsapp(WhatsappContent {
                    message,
                    media_type: "image",
                    business_message: true,
                }),
                Some(share),
            )
        }
        PostPlatform::Twitter => {
            let lead = title.map_or_else(
                || "🎨 Authentic artisan crafts that tell stories of heritage & skill ✨".to_string(),
                |t| format!("🎨 {t}: artisan craft with a story ✨"),
            );
            let tweet = format!(
                "{lead}\n\nSupport traditional Indian artisans & bring home unique handcrafted beauty\n\n{}\n\n🛒 Shop now:",
                TWITTER_HASHTAGS.join(" ")
            );
            (
                PostContent::Twitter(TwitterContent {
                    character_count: tweet.chars().count(),
                    tweet,
                    hashtags: TWITTER_HASHTAGS.to_vec(),
                    media_attachment: true,
                }),
                Some(lead),
            )
        }
    };

    let (share_url, instructions) = match platform
        .share_platform()
        .share_link(product_url, share_message.as_deref())
    {
        ShareLink::Url(url) => (Some(url), None),
        ShareLink::Manual(instructions) => (None, Some(instructions)),
    };

    SocialPost {
        id: Uuid::new_v4(),
        platform,
        content,
        share_url,
        instructions,
    }
}

// =============================================================================
// Analytics placeholder
// =============================================================================

/// Share and engagement counts. Values are random placeholders until a
/// platform analytics integration exists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareAnalytics {
    pub total_shares: u32,
    pub platforms: BTreeMap<PostPlatform, u32>,
    pub engagement: Engagement,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Engagement {
    pub likes: u32,
    pub comments: u32,
    pub views: u32,
}

impl ShareAnalytics {
    /// Placeholder figures for the last seven days.
    #[must_use]
    pub fn placeholder() -> Self {
        let mut rng = rand::rng();
        let now = Utc::now();

        let platforms = PostPlatform::ALL
            .into_iter()
            .map(|p| {
                let ceiling = match p {
                    PostPlatform::Instagram => 50,
                    PostPlatform::Facebook => 30,
                    PostPlatform::Whatsapp => 40,
                    PostPlatform::Twitter => 20,
                };
                (p, rng.random_range(0..ceiling))
            })
            .collect();

        Self {
            total_shares: rng.random_range(0..100),
            platforms,
            engagement: Engagement {
                likes: rng.random_range(0..200),
                comments: rng.random_range(0..50),
                views: rng.random_range(0..1000),
            },
            period_start: now - Duration::days(ANALYTICS_WINDOW_DAYS),
            period_end: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const URL: &str = "http://localhost:3001/products/blue-vase";

    #[test]
    fn test_batch_expires_after_a_day() {
        let batch = PostBatch::build(&[PostPlatform::Facebook], None, URL);
        assert_eq!(batch.expires_at - batch.generated_at, Duration::hours(24));
    }

    #[test]
    fn test_duplicate_platforms_collapse() {
        let batch = PostBatch::build(
            &[PostPlatform::Twitter, PostPlatform::Twitter, PostPlatform::Whatsapp],
            None,
            URL,
        );
        assert_eq!(batch.posts.len(), 2);
    }

    #[test]
    fn test_posts_have_distinct_ids() {
        let batch = PostBatch::build(&PostPlatform::ALL, None, URL);
        let ids: HashSet<_> = batch.posts.values().map(|p| p.id).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_title_is_injected() {
        let post = build_post(PostPlatform::Facebook, Some("Blue Pottery Vase"), URL);
        let PostContent::Facebook(content) = post.content else {
            panic!("facebook content expected");
        };
        assert!(content.text.contains("Blue Pottery Vase"));
    }

    #[test]
    fn test_share_url_points_at_product() {
        let post = build_post(PostPlatform::Whatsapp, None, URL);
        let url = post.share_url.expect("whatsapp link");
        assert!(url.starts_with("https://wa.me/?text="));
        assert!(url.contains(urlencoding::encode(URL).as_ref()));
    }

    #[test]
    fn test_instagram_post_has_instructions_not_url() {
        let post = build_post(PostPlatform::Instagram, None, URL);
        assert!(post.share_url.is_none());
        assert_eq!(post.instructions.map(|i| i.steps.len()), Some(6));
    }

    #[test]
    fn test_post_serialization_shape() {
        let batch = PostBatch::build(&[PostPlatform::Twitter], None, URL);
        let json = serde_json::to_value(&batch).expect("serialize");
        let post = &json["posts"]["twitter"];
        assert_eq!(post["platform"], "twitter");
        assert!(post["content"]["tweet"].is_string());
        assert!(post["shareUrl"].is_string());
        assert!(json["expiresAt"].is_string());
    }

    #[test]
    fn test_analytics_placeholder_bounds() {
        let analytics = ShareAnalytics::placeholder();
        assert!(analytics.total_shares < 100);
        assert!(analytics.platforms[&PostPlatform::Instagram] < 50);
        assert!(analytics.engagement.views < 1000);
        assert_eq!(
            analytics.period_end - analytics.period_start,
            Duration::days(7)
        );
    }
}
