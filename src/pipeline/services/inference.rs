use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::common::ImagePayload;
use crate::error::InferenceError;
use crate::pipeline::types::{AllergenCheck, AllergenQuery, Classification, ExtractedText};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub allergen_profile: Vec<String>,
    pub cuisine_preference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedFood {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// The remote inference operations this crate depends on.
///
/// Transport, retries and authentication belong to the implementor.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn classify(&self, image: &ImagePayload) -> Result<Classification, InferenceError>;

    async fn extract_text(&self, image: &ImagePayload) -> Result<ExtractedText, InferenceError>;

    async fn check_allergens(&self, query: &AllergenQuery)
        -> Result<AllergenCheck, InferenceError>;

    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendedFood>, InferenceError>;
}
