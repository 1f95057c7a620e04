use crate::camera::CameraStatus;
use crate::common::ImagePayload;
use crate::pipeline::context::PipelineRun;
use crate::pipeline::types::{
    AllergenCheck, Classification, ExtractedText, PipelineKind, RiskLevel, derive_risk,
};
use crate::session::state::{SessionPhase, SessionStore};

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub active_kind: PipelineKind,
    pub image: Option<ImagePayload>,
    pub run: Option<PipelineRun>,
    pub error_banner: Option<String>,
    pub camera: CameraStatus,
}

impl SessionView {
    pub(crate) fn capture(store: &SessionStore, camera: CameraStatus) -> Self {
        let state = store.lock();
        Self {
            phase: state.phase(),
            active_kind: state.active_kind,
            image: state.image.clone(),
            run: state.run.clone(),
            error_banner: state.error_banner.clone(),
            camera,
        }
    }

    pub fn classification(&self) -> Option<&Classification> {
        self.run
            .as_ref()
            .and_then(|run| run.recognition())
            .and_then(|recognition| recognition.as_classification())
    }

    pub fn extracted_text(&self) -> Option<&ExtractedText> {
        self.run
            .as_ref()
            .and_then(|run| run.recognition())
            .and_then(|recognition| recognition.as_extracted_text())
    }

    pub fn allergen_check(&self) -> Option<&AllergenCheck> {
        self.run.as_ref().and_then(|run| run.allergen_check())
    }

    /// Derived on every call from the displayed check.
    pub fn risk_level(&self) -> RiskLevel {
        derive_risk(self.allergen_check())
    }

    pub fn shows_allergen_badge(&self) -> bool {
        self.allergen_check().is_some()
    }
}
