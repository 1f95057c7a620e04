use std::sync::Arc;
use std::time::Duration;

use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder, ServiceExt};

use crate::common::ImagePayload;
use crate::pipeline::orchestration::processing_step::{AllergenStep, RecognitionStep};
use crate::pipeline::orchestration::service::{AllergenService, RecognitionService};
use crate::pipeline::orchestration::step::{
    AllergenCheckStep, ClassificationStep, TextExtractionStep,
};
use crate::pipeline::services::InferenceBackend;
use crate::pipeline::types::{AllergenCheck, AllergenQuery, PipelineKind, Recognition};

/// The two stages of one pipeline kind.
pub struct ProcessingPipeline {
    kind: PipelineKind,
    recognition: Arc<dyn RecognitionStep>,
    allergen_check: Arc<dyn AllergenStep>,
    stage_timeout: Option<Duration>,
}

impl ProcessingPipeline {
    pub fn builder(kind: PipelineKind, backend: Arc<dyn InferenceBackend>) -> ProcessingPipelineBuilder {
        let recognition: Arc<dyn RecognitionStep> = match kind {
            PipelineKind::AnalyzeFood => Arc::new(ClassificationStep::new(backend.clone())),
            PipelineKind::ScanLabel => Arc::new(TextExtractionStep::new(backend.clone())),
        };
        ProcessingPipelineBuilder {
            kind,
            recognition,
            allergen_check: Arc::new(AllergenCheckStep::new(backend)),
            stage_timeout: None,
        }
    }

    pub fn kind(&self) -> PipelineKind {
        self.kind
    }

    pub async fn recognize(&self, image: ImagePayload) -> Result<Recognition, BoxError> {
        ServiceBuilder::new()
            .option_layer(self.stage_timeout.map(TimeoutLayer::new))
            .service(RecognitionService::new(self.recognition.clone()))
            .oneshot(image)
            .await
    }

    pub async fn check_allergens(&self, query: AllergenQuery) -> Result<AllergenCheck, BoxError> {
        ServiceBuilder::new()
            .option_layer(self.stage_timeout.map(TimeoutLayer::new))
            .service(AllergenService::new(self.allergen_check.clone()))
            .oneshot(query)
            .await
    }
}

pub struct ProcessingPipelineBuilder {
    kind: PipelineKind,
    recognition: Arc<dyn RecognitionStep>,
    allergen_check: Arc<dyn AllergenStep>,
    stage_timeout: Option<Duration>,
}

impl ProcessingPipelineBuilder {
    // Bounds each remote stage; unbounded when unset.
    pub fn stage_timeout(mut self, stage_timeout: Option<Duration>) -> Self {
        self.stage_timeout = stage_timeout;
        self
    }

    pub fn build(self) -> ProcessingPipeline {
        ProcessingPipeline {
            kind: self.kind,
            recognition: self.recognition,
            allergen_check: self.allergen_check,
            stage_timeout: self.stage_timeout,
        }
    }
}
