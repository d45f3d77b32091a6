//! Prompt templates.
//!
//! Every structured prompt ends with an explicit JSON shape so replies can
//! be parsed by [`crate::services::content::extract`].

use artisan_hub_core::ContentKind;
use serde_json::Value;

use super::insights::ArtisanMetrics;

/// Prompt for a single content kind about `product`.
#[must_use]
pub fn content_prompt(kind: ContentKind, product: &Value, language: &str) -> String {
    let product = product.to_string();
    let (task, shape) = match kind {
        ContentKind::Title => (
            "Generate a compelling product title for this handcrafted item. Make it SEO-friendly and appealing to customers. Maximum 60 characters.",
            r#"{ "title": "..." }"#,
        ),
        ContentKind::Description => (
            "Write a detailed product description for this handcrafted item. Include materials, craftsmanship details, cultural significance, and benefits. Make it engaging and informative.",
            r#"{
  "title": "...",
  "shortDescription": "...",
  "longDescription": "...",
  "features": ["...", "...", "..."],
  "careInstructions": "...",
  "giftText": "..."
}"#,
        ),
        ContentKind::Story => (
            "Write a compelling artisan story about the creation of this product. Include cultural background, traditional techniques, and the artisan's passion. Make it authentic and emotional.",
            r#"{ "title": "...", "story": "..." }"#,
        ),
        ContentKind::Social => (
            "Create engaging social media captions for Instagram, Facebook, and Twitter for this product. Include relevant hashtags and a call-to-action.",
            r##"{ "instagram": "...", "facebook": "...", "twitter": "...", "hashtags": ["#...", "#..."] }"##,
        ),
    };

    format!(
        "{task}\n\nProduct: {product}\n\nWrite in language: {language}.\n\nRespond with only a JSON object of this structure:\n{shape}\n"
    )
}

/// Seller-supplied hints for a description generated from photos.
#[derive(Debug, Clone, Default)]
pub struct BasicInfo<'a> {
    pub category: Option<&'a str>,
    pub location: Option<&'a str>,
    pub price_range: Option<&'a str>,
}

/// Prompt for a full product description from uploaded photos and hints.
#[must_use]
pub fn description_prompt(info: &BasicInfo<'_>, image_count: usize) -> String {
    let category = info.category.unwrap_or("Handcrafted Item");
    let location = info.location.unwrap_or("India");
    let price_range = info.price_range.unwrap_or("Premium");

    format!(
        r#"Create a compelling product description for a handcrafted item based on the following information:

Product Category: {category}
Artisan Location: {location}
Price Range: {price_range}
Photos Provided: {image_count}
Target Audience: Art enthusiasts, cultural collectors, gift buyers

Please generate:
1. A catchy product title (max 60 characters)
2. A short description (max 150 characters for product cards)
3. A detailed description (2-3 paragraphs highlighting craftsmanship, cultural significance, and uniqueness)
4. Key features (3-5 bullet points)
5. Care instructions
6. Gift recommendation text

Make it authentic, emphasizing the artisan's skill and cultural heritage. Use warm, engaging language that connects with buyers emotionally.

Format the response as JSON with the following structure:
{{
  "title": "...",
  "shortDescription": "...",
  "longDescription": "...",
  "features": ["...", "...", "..."],
  "careInstructions": "...",
  "giftText": "..."
}}
"#
    )
}

/// Facts about the product a marketing package is written for.
#[derive(Debug, Clone)]
pub struct PackageSubject<'a> {
    pub product_id: &'a str,
    pub title: &'a str,
    pub category: &'a str,
    pub artisan: &'a str,
    pub location: &'a str,
}

/// Prompt for a complete marketing package.
#[must_use]
pub fn package_prompt(subject: &PackageSubject<'_>) -> String {
    let PackageSubject {
        product_id,
        title,
        category,
        artisan,
        location,
    } = subject;

    format!(
        r#"Create a complete marketing package for a handcrafted product:

Product ID: {product_id}
Product: {title}
Category: {category}
Artisan: {artisan}
Location: {location}

Generate:
1. SEO-optimized product title
2. Meta description for website
3. Instagram post caption (with hashtags)
4. Facebook post text
5. WhatsApp sharing message
6. Email marketing subject line
7. Product story (emotional connection)
8. Call-to-action texts

Make it culturally authentic and emotionally engaging.

Format as JSON with keys: seoTitle, metaDescription, instagramCaption, facebookPost, whatsappMessage, emailSubject, productStory, callToActions (array).
"#
    )
}

/// Prompt for free-text seller performance insights.
#[must_use]
pub fn insights_prompt(artisan_name: &str, period: &str, metrics: &ArtisanMetrics) -> String {
    let ArtisanMetrics {
        sales,
        orders,
        products,
        stock,
        ..
    } = metrics;
    let revenue = metrics.revenue_price().display();

    format!(
        r"Analyze this artisan's performance data and provide insights:
- Artisan: {artisan_name}
- Total Sales: {sales}
- Total Revenue: {revenue}
- Total Orders: {orders}
- Number of Products: {products}
- Units In Stock: {stock}
- Period: {period}

Provide:
1. Performance insights
2. Predicted next period sales (number)
3. Trend direction (up/down/stable)
4. Confidence level (0-100)
5. Recommendations for improvement
"
    )
}

#[cfg(test)]
mod tests {
    use artisan_hub_core::CurrencyCode;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_content_prompt_embeds_product_and_shape() {
        let product = serde_json::json!({ "title": "Blue Vase", "category": "Pottery" });
        let prompt = content_prompt(ContentKind::Description, &product, "hi");
        assert!(prompt.contains(r#""title":"Blue Vase""#));
        assert!(prompt.contains("\"careInstructions\""));
        assert!(prompt.contains("language: hi"));
    }

    #[test]
    fn test_every_kind_requests_json() {
        let product = serde_json::json!({});
        for kind in ContentKind::ALL {
            let prompt = content_prompt(kind, &product, "en");
            assert!(prompt.contains("JSON object"), "{kind:?}");
            assert!(prompt.contains('{'), "{kind:?}");
        }
    }

    #[test]
    fn test_social_prompt_shows_hashtag_list() {
        let prompt = content_prompt(ContentKind::Social, &serde_json::json!({}), "en");
        assert!(prompt.contains(r##""hashtags": ["#...", "#..."] }"##));
        assert!(prompt.contains("\"twitter\": \"...\""));
    }

    #[test]
    fn test_description_prompt_defaults() {
        let prompt = description_prompt(&BasicInfo::default(), 2);
        assert!(prompt.contains("Product Category: Handcrafted Item"));
        assert!(prompt.contains("Artisan Location: India"));
        assert!(prompt.contains("Price Range: Premium"));
        assert!(prompt.contains("Photos Provided: 2"));
        assert!(prompt.contains("\"giftText\": \"...\""));
    }

    #[test]
    fn test_package_prompt_lists_keys() {
        let prompt = package_prompt(&PackageSubject {
            product_id: "prod_1",
            title: "Blue Vase",
            category: "Pottery",
            artisan: "Meera Devi",
            location: "Jaipur",
        });
        assert!(prompt.contains("Product ID: prod_1"));
        assert!(prompt.contains("Artisan: Meera Devi"));
        assert!(prompt.contains("callToActions (array)"));
    }

    #[test]
    fn test_insights_prompt_includes_metrics() {
        let metrics = ArtisanMetrics {
            sales: 3,
            revenue: Decimal::new(4500, 0),
            currency: CurrencyCode::INR,
            orders: 5,
            products: 2,
            stock: 17,
        };
        let prompt = insights_prompt("Meera", "monthly", &metrics);
        assert!(prompt.contains("Total Sales: 3"));
        assert!(prompt.contains("Total Revenue: ₹4,500"));
        assert!(prompt.contains("Units In Stock: 17"));
        assert!(prompt.contains("Period: monthly"));
    }
}
