use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::camera::device::CaptureStream;
use crate::common::Frame;
use crate::error::CameraError;

/// An exclusive claim on the capture device.
///
/// Only a granted stream produces a session. Dropping it releases the hardware,
/// so every exit path gives the camera back.
pub struct CameraSession {
    id: Uuid,
    stream: Box<dyn CaptureStream>,
    opened_at: DateTime<Utc>,
}

impl CameraSession {
    pub(crate) fn new(stream: Box<dyn CaptureStream>) -> Self {
        Self {
            id: Uuid::new_v4(),
            stream,
            opened_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn is_live(&self) -> bool {
        self.stream.is_live()
    }

    pub fn capture_frame(&mut self) -> Result<Frame, CameraError> {
        let image = self.stream.grab_frame()?;
        Ok(Frame::new(self.id, image, Utc::now()))
    }

    pub(crate) fn release(&mut self) {
        if self.stream.is_live() {
            self.stream.stop();
            info!("Camera session {} released", self.id);
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.release();
    }
}
