use std::sync::Arc;

use async_trait::async_trait;

use crate::common::ImagePayload;
use crate::error::InferenceError;
use crate::pipeline::orchestration::processing_step::RecognitionStep;
use crate::pipeline::services::InferenceBackend;
use crate::pipeline::types::Recognition;

pub struct ClassificationStep {
    backend: Arc<dyn InferenceBackend>,
}

impl ClassificationStep {
    pub fn new(backend: Arc<dyn InferenceBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl RecognitionStep for ClassificationStep {
    async fn recognize(&self, image: &ImagePayload) -> Result<Recognition, InferenceError> {
        let classification = self.backend.classify(image).await?;
        tracing::debug!(
            label = %classification.label,
            is_food = classification.is_food,
            "Image classified"
        );
        Ok(Recognition::Classification(classification.normalized()))
    }

    fn name(&self) -> &'static str {
        "ClassificationStep"
    }
}
