use std::sync::Arc;

use async_trait::async_trait;
use image::DynamicImage;

use crate::camera::device::{CaptureDevice, CaptureStream};
use crate::config::Facing;
use crate::error::CameraError;

/// A capture device that always shows the same picture.
///
/// Stands in for camera hardware on hosts without one.
#[derive(Clone)]
pub struct StillFrameDevice {
    image: Arc<DynamicImage>,
}

impl StillFrameDevice {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }
}

#[async_trait]
impl CaptureDevice for StillFrameDevice {
    async fn request_stream(&self, _facing: Facing) -> Result<Box<dyn CaptureStream>, CameraError> {
        Ok(Box::new(StillFrameStream {
            image: Some(self.image.clone()),
        }))
    }
}

struct StillFrameStream {
    image: Option<Arc<DynamicImage>>,
}

impl CaptureStream for StillFrameStream {
    fn grab_frame(&mut self) -> Result<DynamicImage, CameraError> {
        self.image
            .as_ref()
            .map(|image| image.as_ref().clone())
            .ok_or_else(|| CameraError::Other("stream stopped".to_string()))
    }

    fn stop(&mut self) {
        self.image = None;
    }

    fn is_live(&self) -> bool {
        self.image.is_some()
    }
}
