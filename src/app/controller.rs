use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::camera::{CameraResourceManager, CaptureDevice};
use crate::common::AllergenProfile;
use crate::config::Settings;
use crate::error::{AppError, CameraError, IntakeError, PipelineError};
use crate::intake::ImageSourceNormalizer;
use crate::pipeline::orchestration::{PipelineOrchestrator, RunOutcome};
use crate::pipeline::services::InferenceBackend;
use crate::pipeline::types::PipelineKind;
use crate::session::{Connectivity, Notification, Notifier, SessionStore, SessionView};

/// Entry point for the acquisition and analysis UI.
///
/// Every user action maps to one method. Only the remote pipeline and the
/// camera permission prompt suspend; neither holds a lock while waiting, so a
/// shared controller keeps serving other actions in the meantime.
pub struct ScanController {
    session: SessionStore,
    camera: Mutex<CameraResourceManager>,
    normalizer: ImageSourceNormalizer,
    orchestrator: PipelineOrchestrator,
    notifier: Notifier,
}

impl ScanController {
    pub fn new(
        settings: &Settings,
        backend: Arc<dyn InferenceBackend>,
        device: Arc<dyn CaptureDevice>,
        connectivity: Arc<dyn Connectivity>,
        notifier: Notifier,
    ) -> Self {
        let orchestrator = PipelineOrchestrator::builder(backend, notifier.clone())
            .connectivity(connectivity)
            .stage_timeout(settings.pipeline.stage_timeout())
            .build();
        Self {
            session: SessionStore::new(PipelineKind::AnalyzeFood),
            camera: Mutex::new(CameraResourceManager::new(device, settings.capture.facing)),
            normalizer: ImageSourceNormalizer::new(&settings.capture),
            orchestrator,
            notifier,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn camera(&self) -> MutexGuard<'_, CameraResourceManager> {
        self.camera.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Requests the camera. A cancel, clear, upload or tab switch during the
    /// permission prompt wins: the late stream is stopped and
    /// `CameraError::Cancelled` is returned without a toast.
    pub async fn open_camera(&self) -> Result<(), CameraError> {
        let request = self.camera().begin_open();
        let result = request.request().await;
        let opened = self.camera().finish_open(request, result).map(|_| ());
        match opened {
            Ok(()) => Ok(()),
            Err(CameraError::Cancelled) => {
                debug!("Camera request cancelled while the prompt was open");
                Err(CameraError::Cancelled)
            }
            Err(e) => {
                self.surface(e.title(), e.user_message());
                Err(e)
            }
        }
    }

    /// Stages the current camera frame. The camera is released whether or not
    /// the capture succeeds.
    pub fn capture(&self) -> Result<(), AppError> {
        let frame = {
            let mut camera = self.camera();
            let frame = camera.capture_frame();
            camera.close();
            frame
        };
        let frame = frame.map_err(|e| {
            self.surface(e.title(), e.user_message());
            e
        })?;

        let payload = self.normalizer.from_capture(&frame).map_err(|e| {
            self.surface(e.title(), e.user_message());
            e
        })?;
        self.session.stage_image(payload);
        Ok(())
    }

    pub fn cancel_camera(&self) {
        self.camera().close();
    }

    /// Stages an uploaded file; an open camera is no longer needed afterwards.
    pub fn upload(&self, bytes: &[u8], mime_type: Option<&str>) -> Result<(), IntakeError> {
        let payload = match self.normalizer.from_upload(bytes, mime_type) {
            Ok(payload) => payload,
            Err(e) => {
                self.surface(e.title(), e.user_message());
                return Err(e);
            }
        };
        self.camera().close();
        self.session.stage_image(payload);
        Ok(())
    }

    pub fn clear(&self) {
        self.session.clear();
        self.camera().close();
    }

    /// Changing tabs tears down the acquisition UI, so the camera is released too.
    pub fn switch_kind(&self, kind: PipelineKind) {
        if self.session.switch_kind(kind) {
            self.camera().close();
        }
    }

    pub async fn submit(&self, profile: &AllergenProfile) -> Result<RunOutcome, PipelineError> {
        self.orchestrator.run(&self.session, profile).await
    }

    pub fn view(&self) -> SessionView {
        let camera = self.camera().status();
        SessionView::capture(&self.session, camera)
    }

    pub fn shutdown(&self) {
        debug!("Shutting down scan controller");
        self.camera().close();
    }

    fn surface(&self, title: &str, message: String) {
        warn!("{}: {}", title, message);
        self.session.set_error_banner(message.clone());
        self.notifier.publish(Notification::error(title, message));
    }
}
