//! Cloud Vision v1 image annotation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use super::{GoogleCloudClient, GoogleError, ImageAnnotator};

const ANNOTATE_URL: &str = "https://vision.googleapis.com/v1/images:annotate";
const MAX_LABELS: u32 = 10;
const MAX_OBJECTS: u32 = 10;

/// Summary of a Vision annotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub labels: Vec<Label>,
    pub objects: Vec<DetectedObject>,
    /// Likelihood ratings passed through as returned by the API.
    pub safe_search: Option<Value>,
    /// Dominant colours passed through as returned by the API.
    pub image_properties: Option<Value>,
}

/// A detected label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub score: f64,
}

/// A localized object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Serialize)]
struct AnnotateRequest<'a> {
    requests: [AnnotateImageRequest<'a>; 1],
}

#[derive(Serialize)]
struct AnnotateImageRequest<'a> {
    image: ImageRef<'a>,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct ImageRef<'a> {
    source: ImageSource<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageSource<'a> {
    image_uri: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_results: Option<u32>,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Vec<Label>,
    #[serde(default)]
    localized_object_annotations: Vec<DetectedObject>,
    #[serde(default)]
    safe_search_annotation: Option<Value>,
    #[serde(default)]
    image_properties_annotation: Option<Value>,
    #[serde(default)]
    error: Option<StatusBody>,
}

#[derive(Deserialize)]
struct StatusBody {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

fn features() -> Vec<Feature> {
    vec![
        Feature {
            kind: "LABEL_DETECTION",
            max_results: Some(MAX_LABELS),
        },
        Feature {
            kind: "OBJECT_LOCALIZATION",
            max_results: Some(MAX_OBJECTS),
        },
        Feature {
            kind: "IMAGE_PROPERTIES",
            max_results: None,
        },
        Feature {
            kind: "SAFE_SEARCH_DETECTION",
            max_results: None,
        },
    ]
}

impl TryFrom<AnnotateResponse> for ImageAnalysis {
    type Error = GoogleError;

    fn try_from(response: AnnotateResponse) -> Result<Self, Self::Error> {
        let Some(first) = response.responses.into_iter().next() else {
            return Ok(Self::default());
        };

        // Per-image failures come back inside a 200 response
        if let Some(error) = first.error {
            return Err(GoogleError::Api {
                status: error.code.to_string(),
                message: error.message,
            });
        }

        Ok(Self {
            labels: first.label_annotations,
            objects: first.localized_object_annotations,
            safe_search: first.safe_search_annotation,
            image_properties: first.image_properties_annotation,
        })
    }
}

#[async_trait]
impl ImageAnnotator for GoogleCloudClient {
    #[instrument(skip(self))]
    async fn annotate(&self, image_url: &str) -> Result<ImageAnalysis, GoogleError> {
        let request = AnnotateRequest {
            requests: [AnnotateImageRequest {
                image: ImageRef {
                    source: ImageSource {
                        image_uri: image_url,
                    },
                },
                features: features(),
            }],
        };

        let response: AnnotateResponse = self
            .post_json("Cloud Vision", ANNOTATE_URL, &request)
            .await?;
        ImageAnalysis::try_from(response)
    }
}
