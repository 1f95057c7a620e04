pub mod device;
pub mod manager;
pub mod session;
pub mod still_device;

pub use device::{CaptureDevice, CaptureStream};
pub use manager::{
    CameraResourceManager, CameraStatus, DenialReason, OpenRequest, PermissionStatus,
};
pub use session::CameraSession;
pub use still_device::StillFrameDevice;
