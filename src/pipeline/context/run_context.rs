use std::time::{Duration, Instant};

use crate::common::{AllergenProfile, ImagePayload};
use crate::pipeline::context::metrics::RunMetrics;
use crate::pipeline::context::pipeline_run::RunId;
use crate::pipeline::context::state::{ProcessingState, Recognized, Submitted};
use crate::pipeline::types::{AllergenQuery, PipelineKind, Recognition, Stage};

// RunContext with compile-time stage tracking via the state parameter
pub struct RunContext<S> {
    run_id: RunId,
    kind: PipelineKind,
    image: ImagePayload,
    profile: AllergenProfile,
    metrics: RunMetrics,
    processing_start: Instant,
    state: S,
}

impl<S: ProcessingState> RunContext<S> {
    pub fn state_name(&self) -> &'static str {
        S::state_name()
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn kind(&self) -> PipelineKind {
        self.kind
    }

    pub fn image(&self) -> &ImagePayload {
        &self.image
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    pub fn elapsed(&self) -> Duration {
        self.processing_start.elapsed()
    }

    pub fn record_stage_duration(&mut self, stage: Stage, duration: Duration) {
        self.metrics.record_stage_duration(stage, duration);
    }
}

impl RunContext<Submitted> {
    pub fn new(
        run_id: RunId,
        kind: PipelineKind,
        image: ImagePayload,
        profile: AllergenProfile,
    ) -> Self {
        Self {
            run_id,
            kind,
            image,
            profile,
            metrics: RunMetrics::new(),
            processing_start: Instant::now(),
            state: Submitted,
        }
    }

    pub fn into_recognized(self, recognition: Recognition) -> RunContext<Recognized> {
        RunContext::<Recognized> {
            run_id: self.run_id,
            kind: self.kind,
            image: self.image,
            profile: self.profile,
            metrics: self.metrics,
            processing_start: self.processing_start,
            state: Recognized { recognition },
        }
    }
}

impl RunContext<Recognized> {
    pub fn recognition(&self) -> &Recognition {
        &self.state.recognition
    }

    /// Stage-2 request, or `None` when the recognition rules out a check.
    pub fn allergen_query(&self) -> Option<AllergenQuery> {
        self.state
            .recognition
            .allergen_query_text()
            .map(|ingredients_text| AllergenQuery {
                ingredients_text,
                allergens: self.profile.to_vec(),
            })
    }
}
