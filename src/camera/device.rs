use async_trait::async_trait;
use image::DynamicImage;

use crate::config::Facing;
use crate::error::CameraError;

/// Platform camera access. Implementations map platform failures onto
/// [`CameraError`]: permission denial to `NotAllowed`, a missing device to
/// `NotFound`, a missing capture API to `Unsupported`.
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// May suspend on a platform permission prompt.
    async fn request_stream(&self, facing: Facing) -> Result<Box<dyn CaptureStream>, CameraError>;
}

/// A live stream holding hardware tracks until stopped.
pub trait CaptureStream: Send {
    /// Rasterizes the current video frame.
    fn grab_frame(&mut self) -> Result<DynamicImage, CameraError>;

    /// Releases every track. Calling it again has no effect.
    fn stop(&mut self);

    fn is_live(&self) -> bool;
}
