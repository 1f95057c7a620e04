use async_trait::async_trait;

use crate::common::ImagePayload;
use crate::error::InferenceError;
use crate::pipeline::types::{AllergenCheck, AllergenQuery, Recognition};

/// Stage 1: turn the image into something an allergen check can read.
#[async_trait]
pub trait RecognitionStep: Send + Sync {
    async fn recognize(&self, image: &ImagePayload) -> Result<Recognition, InferenceError>;
    fn name(&self) -> &'static str;
}

/// Stage 2: score ingredient text against the user's allergens.
#[async_trait]
pub trait AllergenStep: Send + Sync {
    async fn check(&self, query: &AllergenQuery) -> Result<AllergenCheck, InferenceError>;
    fn name(&self) -> &'static str;
}
