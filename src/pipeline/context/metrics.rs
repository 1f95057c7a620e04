use std::time::Duration;

use crate::pipeline::types::Stage;

/// Per-run stage timings, logged when a run settles.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    recognition_duration: Option<Duration>,
    allergen_check_duration: Option<Duration>,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_stage_duration(&mut self, stage: Stage, duration: Duration) {
        match stage {
            Stage::Recognition => self.recognition_duration = Some(duration),
            Stage::AllergenCheck => self.allergen_check_duration = Some(duration),
        }
    }

    pub fn stage_duration(&self, stage: Stage) -> Option<Duration> {
        match stage {
            Stage::Recognition => self.recognition_duration,
            Stage::AllergenCheck => self.allergen_check_duration,
        }
    }
}
