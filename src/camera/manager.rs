use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::camera::device::{CaptureDevice, CaptureStream};
use crate::camera::session::CameraSession;
use crate::common::Frame;
use crate::config::Facing;
use crate::error::CameraError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Unknown,
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    NotAllowed,
    NotFound,
    Unsupported,
    Other,
}

impl DenialReason {
    fn from_error(error: &CameraError) -> Self {
        match error {
            CameraError::NotAllowed => DenialReason::NotAllowed,
            CameraError::NotFound => DenialReason::NotFound,
            CameraError::Unsupported => DenialReason::Unsupported,
            CameraError::Other(_) | CameraError::NotOpen | CameraError::Cancelled => {
                DenialReason::Other
            }
        }
    }
}

/// Camera state exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraStatus {
    pub open: bool,
    pub permission: PermissionStatus,
    pub denial: Option<DenialReason>,
}

/// A pending device request started by [`CameraResourceManager::begin_open`].
///
/// Awaiting it needs no access to the manager, so the permission prompt never
/// holds up other camera or session calls.
pub struct OpenRequest {
    generation: u64,
    device: Arc<dyn CaptureDevice>,
    facing: Facing,
}

impl OpenRequest {
    /// May suspend on a platform permission prompt.
    pub async fn request(&self) -> Result<Box<dyn CaptureStream>, CameraError> {
        self.device.request_stream(self.facing).await
    }
}

/// Owns the one live camera session for the acquisition UI.
pub struct CameraResourceManager {
    device: Arc<dyn CaptureDevice>,
    facing: Facing,
    session: Option<CameraSession>,
    permission: PermissionStatus,
    denial: Option<DenialReason>,
    // Bumped on every close; a request started under an older value is stale.
    generation: u64,
}

impl CameraResourceManager {
    pub fn new(device: Arc<dyn CaptureDevice>, facing: Facing) -> Self {
        Self {
            device,
            facing,
            session: None,
            permission: PermissionStatus::Unknown,
            denial: None,
            generation: 0,
        }
    }

    /// Opens a fresh session, releasing any current one before the request.
    ///
    /// Failures are returned as-is; there is no retry.
    pub async fn open(&mut self) -> Result<&CameraSession, CameraError> {
        let request = self.begin_open();
        let result = request.request().await;
        self.finish_open(request, result)
    }

    /// Releases any current session and starts a new device request.
    pub fn begin_open(&mut self) -> OpenRequest {
        self.close();
        debug!("Requesting {:?}-facing camera", self.facing);
        OpenRequest {
            generation: self.generation,
            device: self.device.clone(),
            facing: self.facing,
        }
    }

    /// Installs the outcome of `request`.
    ///
    /// If the camera was closed or re-requested in the meantime, a granted
    /// stream is stopped at once and `CameraError::Cancelled` is returned
    /// without touching the permission state.
    pub fn finish_open(
        &mut self,
        request: OpenRequest,
        result: Result<Box<dyn CaptureStream>, CameraError>,
    ) -> Result<&CameraSession, CameraError> {
        if request.generation != self.generation {
            if let Ok(mut stream) = result {
                stream.stop();
            }
            debug!("Discarding camera request superseded while pending");
            return Err(CameraError::Cancelled);
        }

        match result {
            Ok(stream) => {
                let session = CameraSession::new(stream);
                info!("Camera session {} opened", session.id());
                self.permission = PermissionStatus::Granted;
                self.denial = None;
                Ok(self.session.insert(session))
            }
            Err(e) => {
                warn!("Camera request failed: {}", e);
                self.permission = PermissionStatus::Denied;
                self.denial = Some(DenialReason::from_error(&e));
                Err(e)
            }
        }
    }

    /// Grabs the current frame of the open session.
    ///
    /// Requires a granted, open session; anything else is `CameraError::NotOpen`.
    pub fn capture_frame(&mut self) -> Result<Frame, CameraError> {
        if self.permission != PermissionStatus::Granted {
            return Err(CameraError::NotOpen);
        }
        let session = self.session.as_mut().ok_or(CameraError::NotOpen)?;
        session.capture_frame()
    }

    /// Releases the session if one is open. Safe to call repeatedly.
    pub fn close(&mut self) {
        self.generation += 1;
        if let Some(mut session) = self.session.take() {
            session.release();
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&CameraSession> {
        self.session.as_ref()
    }

    pub fn status(&self) -> CameraStatus {
        CameraStatus {
            open: self.session.is_some(),
            permission: self.permission,
            denial: self.denial,
        }
    }
}
