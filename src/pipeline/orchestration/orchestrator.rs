use std::sync::Arc;
use std::time::{Duration, Instant};

use tower::BoxError;
use tracing::{debug, error, info};

use crate::common::AllergenProfile;
use crate::error::PipelineError;
use crate::pipeline::context::RunId;
use crate::pipeline::orchestration::processing_pipeline::ProcessingPipeline;
use crate::pipeline::services::InferenceBackend;
use crate::pipeline::types::{PipelineKind, RiskLevel, Stage, derive_risk};
use crate::session::{ApplyOutcome, Connectivity, ConnectivityFlag, Notification, Notifier, SessionStore};

/// How a run ended from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The run's results are on screen.
    Completed {
        run_id: RunId,
        allergen_checked: bool,
        risk_level: RiskLevel,
    },
    /// A newer run, image or tab replaced this one; its results were dropped.
    Superseded { run_id: RunId },
}

/// Runs the two-stage sequence for the active pipeline kind.
///
/// Runs are not serialized: starting a new one while another is in flight is
/// allowed, and the session decides which results still apply.
pub struct PipelineOrchestrator {
    analyze_food: ProcessingPipeline,
    scan_label: ProcessingPipeline,
    connectivity: Arc<dyn Connectivity>,
    notifier: Notifier,
}

impl PipelineOrchestrator {
    pub fn builder(backend: Arc<dyn InferenceBackend>, notifier: Notifier) -> PipelineOrchestratorBuilder {
        PipelineOrchestratorBuilder {
            backend,
            notifier,
            connectivity: None,
            stage_timeout: None,
        }
    }

    fn pipeline(&self, kind: PipelineKind) -> &ProcessingPipeline {
        match kind {
            PipelineKind::AnalyzeFood => &self.analyze_food,
            PipelineKind::ScanLabel => &self.scan_label,
        }
    }

    /// Runs the active pipeline against the staged image.
    ///
    /// The profile is read once, when the run starts. Stage-1 results are
    /// published to the session before stage 2 is issued.
    pub async fn run(
        &self,
        session: &SessionStore,
        profile: &AllergenProfile,
    ) -> Result<RunOutcome, PipelineError> {
        if !self.connectivity.is_online() {
            return Err(self.reject(session, PipelineError::Offline));
        }
        let context = match session.begin_run(profile.clone()) {
            Ok(context) => context,
            Err(e) => return Err(self.reject(session, e)),
        };
        let run_id = context.run_id();
        let pipeline = self.pipeline(context.kind());
        info!(run = %run_id, kind = %context.kind(), "Starting pipeline run");

        let stage_start = Instant::now();
        let recognition = match pipeline.recognize(context.image().clone()).await {
            Ok(recognition) => recognition,
            Err(e) => return self.fail(session, run_id, Stage::Recognition, e),
        };
        let mut context = context.into_recognized(recognition);
        context.record_stage_duration(Stage::Recognition, stage_start.elapsed());

        debug!(run = %run_id, state = context.state_name(), "Stage 1 finished");

        let query = context.allergen_query();
        let outcome =
            session.record_recognition(run_id, context.recognition().clone(), query.is_some());
        if outcome == ApplyOutcome::Stale {
            return Ok(RunOutcome::Superseded { run_id });
        }

        let Some(query) = query else {
            info!(run = %run_id, "No allergen check warranted; run complete");
            return Ok(RunOutcome::Completed {
                run_id,
                allergen_checked: false,
                risk_level: derive_risk(None),
            });
        };

        let stage_start = Instant::now();
        let check = match pipeline.check_allergens(query).await {
            Ok(check) => check,
            Err(e) => return self.fail(session, run_id, Stage::AllergenCheck, e),
        };
        context.record_stage_duration(Stage::AllergenCheck, stage_start.elapsed());

        let risk_level = derive_risk(Some(&check));
        if session.record_allergen_check(run_id, check) == ApplyOutcome::Stale {
            return Ok(RunOutcome::Superseded { run_id });
        }

        let timing = |stage| context.metrics().stage_duration(stage).unwrap_or(Duration::ZERO);
        info!(
            run = %run_id,
            risk = risk_level.label(),
            "Pipeline run complete in {:?} (stage 1 {:?}, stage 2 {:?})",
            context.elapsed(),
            timing(Stage::Recognition),
            timing(Stage::AllergenCheck)
        );
        Ok(RunOutcome::Completed {
            run_id,
            allergen_checked: true,
            risk_level,
        })
    }

    // Precondition failures never start a run.
    fn reject(&self, session: &SessionStore, error: PipelineError) -> PipelineError {
        debug!("Pipeline not started: {}", error);
        session.set_error_banner(error.user_message());
        self.notifier
            .publish(Notification::error(error.title(), error.user_message()));
        error
    }

    fn fail(
        &self,
        session: &SessionStore,
        run_id: RunId,
        stage: Stage,
        cause: BoxError,
    ) -> Result<RunOutcome, PipelineError> {
        let error = PipelineError::AnalysisFailed {
            stage,
            message: cause.to_string(),
        };
        match session.record_failure(run_id, error.clone()) {
            ApplyOutcome::Applied => {
                error!(run = %run_id, "Pipeline run failed: {}", error);
                self.notifier
                    .publish(Notification::error(error.title(), error.user_message()));
                Err(error)
            }
            ApplyOutcome::Stale => Ok(RunOutcome::Superseded { run_id }),
        }
    }
}

pub struct PipelineOrchestratorBuilder {
    backend: Arc<dyn InferenceBackend>,
    notifier: Notifier,
    connectivity: Option<Arc<dyn Connectivity>>,
    stage_timeout: Option<Duration>,
}

impl PipelineOrchestratorBuilder {
    // Without a connectivity source the device is assumed online.
    pub fn connectivity(mut self, connectivity: Arc<dyn Connectivity>) -> Self {
        self.connectivity = Some(connectivity);
        self
    }

    pub fn stage_timeout(mut self, stage_timeout: Option<Duration>) -> Self {
        self.stage_timeout = stage_timeout;
        self
    }

    pub fn build(self) -> PipelineOrchestrator {
        let pipeline = |kind| {
            ProcessingPipeline::builder(kind, self.backend.clone())
                .stage_timeout(self.stage_timeout)
                .build()
        };
        PipelineOrchestrator {
            analyze_food: pipeline(PipelineKind::AnalyzeFood),
            scan_label: pipeline(PipelineKind::ScanLabel),
            connectivity: self
                .connectivity
                .unwrap_or_else(|| Arc::new(ConnectivityFlag::default())),
            notifier: self.notifier,
        }
    }
}
