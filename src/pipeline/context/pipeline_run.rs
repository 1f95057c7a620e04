use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::PipelineError;
use crate::pipeline::types::{AllergenCheck, PipelineKind, Recognition, Stage};

/// Identifies one submission. Ids are never reused within a session, so a
/// result tagged with an older id can be recognized as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(pub(crate) u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running(Stage),
    Completed,
    Failed,
}

/// Display record of one pipeline invocation.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    id: RunId,
    kind: PipelineKind,
    status: RunStatus,
    recognition: Option<Recognition>,
    allergen_check: Option<AllergenCheck>,
    error: Option<PipelineError>,
    started_at: DateTime<Utc>,
}

impl PipelineRun {
    pub(crate) fn start(id: RunId, kind: PipelineKind) -> Self {
        Self {
            id,
            kind,
            status: RunStatus::Running(Stage::Recognition),
            recognition: None,
            allergen_check: None,
            error: None,
            started_at: Utc::now(),
        }
    }

    pub(crate) fn record_recognition(&mut self, recognition: Recognition, needs_check: bool) {
        self.recognition = Some(recognition);
        self.status = if needs_check {
            RunStatus::Running(Stage::AllergenCheck)
        } else {
            RunStatus::Completed
        };
    }

    pub(crate) fn record_allergen_check(&mut self, check: AllergenCheck) {
        self.allergen_check = Some(check);
        self.status = RunStatus::Completed;
    }

    // Earlier stage results are kept.
    pub(crate) fn record_failure(&mut self, error: PipelineError) {
        self.error = Some(error);
        self.status = RunStatus::Failed;
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn kind(&self) -> PipelineKind {
        self.kind
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        matches!(self.status, RunStatus::Running(_))
    }

    pub fn recognition(&self) -> Option<&Recognition> {
        self.recognition.as_ref()
    }

    pub fn allergen_check(&self) -> Option<&AllergenCheck> {
        self.allergen_check.as_ref()
    }

    pub fn error(&self) -> Option<&PipelineError> {
        self.error.as_ref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
