//! Social platforms and share deep links.
//!
//! Two closed sets live here:
//!
//! - [`SharePlatform`] - platforms a product can be shared to. Each variant
//!   knows how to build its own deep link; Instagram has no web share
//!   endpoint and yields manual instructions instead.
//! - [`PostPlatform`] - platforms the post generator writes copy for.
//!
//! Parsing is the only place platform names are compared as strings.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Hashtags appended to Twitter share intents.
const TWITTER_HASHTAGS: &str = "HandmadeInIndia,ArtisanMade";

/// Caption suggested for manual Instagram posts.
pub const INSTAGRAM_CAPTION: &str = "✨ Discover authentic handcrafted beauty! 🎨 Each piece tells a story of tradition, skill, and cultural heritage. #HandmadeInIndia #TraditionalCrafts #ArtisanMade";

/// Steps for sharing to Instagram by hand.
pub const INSTAGRAM_STEPS: [&str; 6] = [
    "1. Save the product image to your device",
    "2. Open Instagram app",
    "3. Create a new post or story",
    "4. Upload the saved image",
    "5. Copy and paste the provided caption",
    "6. Add relevant hashtags and share!",
];

/// Error returned when a platform name is not in the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported platform '{name}'")]
pub struct ParsePlatformError {
    /// The name that failed to parse.
    pub name: String,
}

// =============================================================================
// Share platforms
// =============================================================================

/// A platform a product link can be shared to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    Facebook,
    Whatsapp,
    Twitter,
    Linkedin,
    Pinterest,
    Instagram,
}

/// Result of building a share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareLink {
    /// A deep link that opens a pre-filled share dialog.
    Url(String),
    /// The platform has no programmatic share endpoint.
    Manual(ShareInstructions),
}

impl ShareLink {
    /// The deep link, if the platform has one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Manual(_) => None,
        }
    }
}

/// Manual sharing instructions for platforms without deep links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareInstructions {
    pub method: &'static str,
    pub steps: Vec<&'static str>,
    pub caption: &'static str,
}

impl SharePlatform {
    /// Every supported share platform, in the order they are advertised.
    pub const ALL: [Self; 6] = [
        Self::Facebook,
        Self::Whatsapp,
        Self::Twitter,
        Self::Linkedin,
        Self::Pinterest,
        Self::Instagram,
    ];

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Whatsapp => "whatsapp",
            Self::Twitter => "twitter",
            Self::Linkedin => "linkedin",
            Self::Pinterest => "pinterest",
            Self::Instagram => "instagram",
        }
    }

    /// Names of all supported platforms.
    #[must_use]
    pub fn supported_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.as_str()).collect()
    }

    /// Message used when the caller does not supply one.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Facebook => "Check out this amazing handcrafted piece!",
            Self::Whatsapp => {
                "🎨 Check out this incredible handcrafted piece! Made by talented Indian artisans. Perfect for art lovers!"
            }
            Self::Twitter => "🎨 Authentic artisan crafts!",
            Self::Pinterest => "Beautiful handcrafted artisan piece",
            Self::Linkedin | Self::Instagram => "",
        }
    }

    /// Build the share link for `url`, using `message` or the platform default.
    #[must_use]
    pub fn share_link(self, url: &str, message: Option<&str>) -> ShareLink {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.default_message());
        let u = urlencoding::encode(url);
        let m = urlencoding::encode(message);

        match self {
            Self::Facebook => ShareLink::Url(format!(
                "https://www.facebook.com/sharer/sharer.php?u={u}&quote={m}"
            )),
            Self::Whatsapp => {
                let text = urlencoding::encode(&format!("{message} {url}")).into_owned();
                ShareLink::Url(format!("https://wa.me/?text={text}"))
            }
            Self::Twitter => ShareLink::Url(format!(
                "https://twitter.com/intent/tweet?text={m}&url={u}&hashtags={TWITTER_HASHTAGS}"
            )),
            Self::Linkedin => ShareLink::Url(format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={u}"
            )),
            Self::Pinterest => ShareLink::Url(format!(
                "https://pinterest.com/pin/create/button/?url={u}&description={m}"
            )),
            Self::Instagram => ShareLink::Manual(ShareInstructions {
                method: "manual",
                steps: INSTAGRAM_STEPS.to_vec(),
                caption: INSTAGRAM_CAPTION,
            }),
        }
    }
}

impl fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SharePlatform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePlatformError { name: s.to_owned() })
    }
}

// =============================================================================
// Post platforms
// =============================================================================

/// A platform the post generator writes copy for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostPlatform {
    Instagram,
    Facebook,
    Whatsapp,
    Twitter,
}

impl PostPlatform {
    /// Every platform posts can be generated for.
    pub const ALL: [Self; 4] = [Self::Instagram, Self::Facebook, Self::Whatsapp, Self::Twitter];

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::Whatsapp => "whatsapp",
            Self::Twitter => "twitter",
        }
    }

    /// Names of all supported platforms.
    #[must_use]
    pub fn supported_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.as_str()).collect()
    }

    /// Share platform used to build this post's share link.
    #[must_use]
    pub const fn share_platform(self) -> SharePlatform {
        match self {
            Self::Instagram => SharePlatform::Instagram,
            Self::Facebook => SharePlatform::Facebook,
            Self::Whatsapp => SharePlatform::Whatsapp,
            Self::Twitter => SharePlatform::Twitter,
        }
    }
}

impl fmt::Display for PostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostPlatform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePlatformError { name: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://shop.example/products/blue-vase";

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("WhatsApp".parse(), Ok(SharePlatform::Whatsapp));
        assert_eq!("LINKEDIN".parse(), Ok(SharePlatform::Linkedin));
        assert_eq!("Instagram".parse(), Ok(PostPlatform::Instagram));
    }

    #[test]
    fn test_parse_rejects_unknown_platform() {
        let err = "myspace".parse::<SharePlatform>().expect_err("unsupported");
        assert_eq!(err.name, "myspace");
        assert!("linkedin".parse::<PostPlatform>().is_err());
    }

    #[test]
    fn test_supported_names_lists_every_platform() {
        assert_eq!(
            SharePlatform::supported_names(),
            vec!["facebook", "whatsapp", "twitter", "linkedin", "pinterest", "instagram"]
        );
    }

    #[test]
    fn test_facebook_link_encodes_url_and_quote() {
        let link = SharePlatform::Facebook.share_link(URL, Some("Hello & welcome"));
        assert_eq!(
            link.url(),
            Some(
                "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fshop.example%2Fproducts%2Fblue-vase&quote=Hello%20%26%20welcome"
            )
        );
    }

    #[test]
    fn test_whatsapp_link_joins_message_and_url() {
        let link = SharePlatform::Whatsapp.share_link(URL, Some("Look"));
        assert_eq!(
            link.url(),
            Some("https://wa.me/?text=Look%20https%3A%2F%2Fshop.example%2Fproducts%2Fblue-vase")
        );
    }

    #[test]
    fn test_twitter_link_uses_default_message_and_hashtags() {
        let link = SharePlatform::Twitter.share_link(URL, None);
        let url = link.url().expect("twitter has a url");
        assert!(url.starts_with("https://twitter.com/intent/tweet?text="));
        assert!(url.contains(&*urlencoding::encode("🎨 Authentic artisan crafts!")));
        assert!(url.ends_with("&hashtags=HandmadeInIndia,ArtisanMade"));
    }

    #[test]
    fn test_blank_message_falls_back_to_default() {
        let link = SharePlatform::Pinterest.share_link(URL, Some("   "));
        let url = link.url().expect("pinterest has a url");
        assert!(url.ends_with("&description=Beautiful%20handcrafted%20artisan%20piece"));
    }

    #[test]
    fn test_linkedin_link_only_carries_url() {
        let link = SharePlatform::Linkedin.share_link(URL, Some("ignored"));
        assert_eq!(
            link.url(),
            Some(
                "https://www.linkedin.com/sharing/share-offsite/?url=https%3A%2F%2Fshop.example%2Fproducts%2Fblue-vase"
            )
        );
    }

    #[test]
    fn test_instagram_returns_manual_instructions() {
        let link = SharePlatform::Instagram.share_link(URL, None);
        assert!(link.url().is_none());
        match link {
            ShareLink::Manual(instructions) => {
                assert_eq!(instructions.method, "manual");
                assert_eq!(instructions.steps.len(), 6);
                assert!(instructions.caption.contains("#ArtisanMade"));
            }
            ShareLink::Url(url) => panic!("unexpected url {url}"),
        }
    }

    #[test]
    fn test_post_platform_maps_to_share_platform() {
        for post in PostPlatform::ALL {
            assert_eq!(post.share_platform().as_str(), post.as_str());
        }
    }
}
