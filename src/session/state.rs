use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::common::{AllergenProfile, ImagePayload};
use crate::error::PipelineError;
use crate::pipeline::context::{PipelineRun, RunContext, RunId, RunStatus, Submitted};
use crate::pipeline::types::{AllergenCheck, PipelineKind, Recognition, Stage};

/// What the screen is showing, derived from the session contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    ImageStaged,
    Running(Stage),
    Completed,
    Failed,
}

/// Result of applying a stage result to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The run was superseded; nothing changed.
    Stale,
}

#[derive(Debug)]
pub(crate) struct SessionState {
    pub(crate) active_kind: PipelineKind,
    pub(crate) image: Option<ImagePayload>,
    pub(crate) run: Option<PipelineRun>,
    pub(crate) error_banner: Option<String>,
    next_run_id: u64,
}

impl SessionState {
    pub(crate) fn phase(&self) -> SessionPhase {
        match (&self.image, &self.run) {
            (None, _) => SessionPhase::Idle,
            (Some(_), None) => SessionPhase::ImageStaged,
            (Some(_), Some(run)) => match run.status() {
                RunStatus::Running(stage) => SessionPhase::Running(stage),
                RunStatus::Completed => SessionPhase::Completed,
                RunStatus::Failed => SessionPhase::Failed,
            },
        }
    }

    fn current_run_mut(&mut self, run_id: RunId) -> Option<&mut PipelineRun> {
        self.run
            .as_mut()
            .filter(|run| run.id() == run_id && run.is_running())
    }
}

/// Single source of truth for the screen. Cheap to clone; clones share state.
///
/// Every stage result is tagged with the [`RunId`] it was started under and is
/// dropped unless that run is still the one on screen.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<SessionState>>,
}

impl SessionStore {
    pub fn new(active_kind: PipelineKind) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionState {
                active_kind,
                image: None,
                run: None,
                error_banner: None,
                next_run_id: 1,
            })),
        }
    }

    // A panic while holding the lock leaves plain data behind; keep using it.
    pub(crate) fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the staged image and drops any run tied to the previous one.
    pub fn stage_image(&self, image: ImagePayload) {
        let mut state = self.lock();
        if let Some(run) = state.run.take() {
            debug!("Discarding {} after new image was staged", run.id());
        }
        debug!("Staged image {} ({})", image.id(), image.mime_type());
        state.image = Some(image);
        state.error_banner = None;
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.image = None;
        state.run = None;
        state.error_banner = None;
        debug!("Session cleared");
    }

    /// Returns `false` when `kind` was already active; its run is left untouched.
    pub fn switch_kind(&self, kind: PipelineKind) -> bool {
        let mut state = self.lock();
        if state.active_kind == kind {
            return false;
        }
        debug!("Switching pipeline from {} to {}", state.active_kind, kind);
        state.active_kind = kind;
        state.run = None;
        state.error_banner = None;
        true
    }

    /// Starts a new run for the active kind, superseding any previous one.
    pub fn begin_run(
        &self,
        profile: AllergenProfile,
    ) -> Result<RunContext<Submitted>, PipelineError> {
        let mut state = self.lock();
        let image = state.image.clone().ok_or(PipelineError::NoImage)?;
        let run_id = RunId(state.next_run_id);
        state.next_run_id += 1;

        if let Some(previous) = state.run.as_ref().filter(|run| run.is_running()) {
            debug!("{} supersedes in-flight {}", run_id, previous.id());
        }
        state.run = Some(PipelineRun::start(run_id, state.active_kind));
        state.error_banner = None;

        Ok(RunContext::new(run_id, state.active_kind, image, profile))
    }

    /// Applied results clear any banner left by a rejected submission.
    pub fn record_recognition(
        &self,
        run_id: RunId,
        recognition: Recognition,
        needs_check: bool,
    ) -> ApplyOutcome {
        let mut state = self.lock();
        match state.current_run_mut(run_id) {
            Some(run) => {
                run.record_recognition(recognition, needs_check);
                state.error_banner = None;
                ApplyOutcome::Applied
            }
            None => stale(run_id, Stage::Recognition),
        }
    }

    pub fn record_allergen_check(&self, run_id: RunId, check: AllergenCheck) -> ApplyOutcome {
        let mut state = self.lock();
        match state.current_run_mut(run_id) {
            Some(run) => {
                run.record_allergen_check(check);
                state.error_banner = None;
                ApplyOutcome::Applied
            }
            None => stale(run_id, Stage::AllergenCheck),
        }
    }

    /// Marks the run failed and raises the inline banner.
    pub fn record_failure(&self, run_id: RunId, error: PipelineError) -> ApplyOutcome {
        let mut state = self.lock();
        let banner = error.user_message();
        match state.current_run_mut(run_id) {
            Some(run) => {
                run.record_failure(error);
                state.error_banner = Some(banner);
                ApplyOutcome::Applied
            }
            None => {
                warn!("Ignoring failure of superseded {}: {}", run_id, error);
                ApplyOutcome::Stale
            }
        }
    }

    pub fn set_error_banner(&self, message: impl Into<String>) {
        self.lock().error_banner = Some(message.into());
    }

    pub fn phase(&self) -> SessionPhase {
        self.lock().phase()
    }

    pub fn active_kind(&self) -> PipelineKind {
        self.lock().active_kind
    }

    pub fn has_image(&self) -> bool {
        self.lock().image.is_some()
    }

    pub fn run(&self) -> Option<PipelineRun> {
        self.lock().run.clone()
    }

    pub fn error_banner(&self) -> Option<String> {
        self.lock().error_banner.clone()
    }
}

fn stale(run_id: RunId, stage: Stage) -> ApplyOutcome {
    warn!("Discarding late {} result of superseded {}", stage, run_id);
    ApplyOutcome::Stale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ImageSource;
    use crate::pipeline::types::{ExtractedText, RiskLevel};

    fn image() -> ImagePayload {
        ImagePayload::from_bytes(&[7, 7, 7], "image/png", ImageSource::Upload)
    }

    fn high() -> AllergenCheck {
        AllergenCheck {
            risk_level: RiskLevel::High,
            allergen_detected: true,
            detected_allergens: vec!["soy".to_string()],
        }
    }

    #[test]
    fn walks_the_happy_path() {
        let store = SessionStore::new(PipelineKind::ScanLabel);
        assert_eq!(store.phase(), SessionPhase::Idle);

        store.stage_image(image());
        assert_eq!(store.phase(), SessionPhase::ImageStaged);

        let ctx = store.begin_run(AllergenProfile::new(["soy"])).unwrap();
        assert_eq!(store.phase(), SessionPhase::Running(Stage::Recognition));

        let outcome = store.record_recognition(
            ctx.run_id(),
            Recognition::ExtractedText(ExtractedText::new("soy lecithin")),
            true,
        );
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(store.phase(), SessionPhase::Running(Stage::AllergenCheck));

        store.record_allergen_check(ctx.run_id(), high());
        assert_eq!(store.phase(), SessionPhase::Completed);
    }

    #[test]
    fn begin_run_without_image_is_rejected() {
        let store = SessionStore::new(PipelineKind::AnalyzeFood);
        assert!(matches!(
            store.begin_run(AllergenProfile::default()),
            Err(PipelineError::NoImage)
        ));
        assert_eq!(store.phase(), SessionPhase::Idle);
    }

    #[test]
    fn restaging_drops_results_of_the_old_run() {
        let store = SessionStore::new(PipelineKind::ScanLabel);
        store.stage_image(image());
        let ctx = store.begin_run(AllergenProfile::default()).unwrap();

        store.stage_image(image());
        let outcome = store.record_recognition(
            ctx.run_id(),
            Recognition::ExtractedText(ExtractedText::new("late")),
            false,
        );

        assert_eq!(outcome, ApplyOutcome::Stale);
        assert!(store.run().is_none());
        assert_eq!(store.phase(), SessionPhase::ImageStaged);
    }

    #[test]
    fn newer_run_is_not_touched_by_older_results() {
        let store = SessionStore::new(PipelineKind::ScanLabel);
        store.stage_image(image());
        let first = store.begin_run(AllergenProfile::default()).unwrap();
        let second = store.begin_run(AllergenProfile::default()).unwrap();
        assert!(second.run_id() > first.run_id());

        assert_eq!(store.record_allergen_check(first.run_id(), high()), ApplyOutcome::Stale);
        let failure = PipelineError::AnalysisFailed {
            stage: Stage::Recognition,
            message: "late".to_string(),
        };
        assert_eq!(store.record_failure(first.run_id(), failure), ApplyOutcome::Stale);

        let run = store.run().unwrap();
        assert_eq!(run.id(), second.run_id());
        assert_eq!(run.status(), RunStatus::Running(Stage::Recognition));
        assert!(store.error_banner().is_none());
    }

    #[test]
    fn switching_to_the_same_kind_keeps_the_result() {
        let store = SessionStore::new(PipelineKind::ScanLabel);
        store.stage_image(image());
        let ctx = store.begin_run(AllergenProfile::default()).unwrap();
        store.record_recognition(
            ctx.run_id(),
            Recognition::ExtractedText(ExtractedText::new("")),
            false,
        );

        assert!(!store.switch_kind(PipelineKind::ScanLabel));
        assert_eq!(store.phase(), SessionPhase::Completed);

        assert!(store.switch_kind(PipelineKind::AnalyzeFood));
        assert!(store.run().is_none());
        assert_eq!(store.phase(), SessionPhase::ImageStaged);
    }

    #[test]
    fn applied_result_clears_an_earlier_banner() {
        let store = SessionStore::new(PipelineKind::ScanLabel);
        store.stage_image(image());
        let ctx = store.begin_run(AllergenProfile::default()).unwrap();
        store.set_error_banner("offline");

        store.record_recognition(
            ctx.run_id(),
            Recognition::ExtractedText(ExtractedText::new("soy")),
            true,
        );
        assert!(store.error_banner().is_none());

        store.set_error_banner("offline");
        store.record_allergen_check(ctx.run_id(), high());
        assert!(store.error_banner().is_none());
        assert_eq!(store.phase(), SessionPhase::Completed);
    }

    #[test]
    fn failure_sets_banner_and_clear_resets_everything() {
        let store = SessionStore::new(PipelineKind::AnalyzeFood);
        store.stage_image(image());
        let ctx = store.begin_run(AllergenProfile::default()).unwrap();
        store.record_failure(
            ctx.run_id(),
            PipelineError::AnalysisFailed {
                stage: Stage::Recognition,
                message: "500".to_string(),
            },
        );
        assert_eq!(store.phase(), SessionPhase::Failed);
        assert!(store.error_banner().is_some());

        store.clear();
        assert_eq!(store.phase(), SessionPhase::Idle);
        assert!(store.error_banner().is_none());
    }
}
