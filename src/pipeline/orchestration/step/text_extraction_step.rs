use std::sync::Arc;

use async_trait::async_trait;

use crate::common::ImagePayload;
use crate::error::InferenceError;
use crate::pipeline::orchestration::processing_step::RecognitionStep;
use crate::pipeline::services::InferenceBackend;
use crate::pipeline::types::Recognition;

pub struct TextExtractionStep {
    backend: Arc<dyn InferenceBackend>,
}

impl TextExtractionStep {
    pub fn new(backend: Arc<dyn InferenceBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl RecognitionStep for TextExtractionStep {
    async fn recognize(&self, image: &ImagePayload) -> Result<Recognition, InferenceError> {
        let extracted = self.backend.extract_text(image).await?;
        tracing::debug!("Extracted {} characters of label text", extracted.text.len());
        Ok(Recognition::ExtractedText(extracted))
    }

    fn name(&self) -> &'static str {
        "TextExtractionStep"
    }
}
