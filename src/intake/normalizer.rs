use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::common::{Frame, ImagePayload, ImageSource};
use crate::config::{CaptureFormat, CaptureSettings};
use crate::error::IntakeError;

/// Turns uploads and camera frames into the single payload shape the pipelines consume.
#[derive(Debug, Clone)]
pub struct ImageSourceNormalizer {
    format: CaptureFormat,
    jpeg_quality: u8,
}

impl ImageSourceNormalizer {
    pub fn new(settings: &CaptureSettings) -> Self {
        Self {
            format: settings.format,
            jpeg_quality: settings.jpeg_quality.clamp(1, 100),
        }
    }

    /// Wraps uploaded bytes as-is. Without a MIME type the format is sniffed
    /// from the file's magic bytes.
    pub fn from_upload(
        &self,
        bytes: &[u8],
        mime_type: Option<&str>,
    ) -> Result<ImagePayload, IntakeError> {
        if bytes.is_empty() {
            return Err(IntakeError::EmptyFile);
        }

        let mime_type = match mime_type.map(str::trim).filter(|m| !m.is_empty()) {
            Some(mime) if mime.starts_with("image/") => mime.to_string(),
            Some(mime) => return Err(IntakeError::UnsupportedFormat(mime.to_string())),
            None => image::guess_format(bytes)
                .map(|format| format.to_mime_type().to_string())
                .map_err(|_| IntakeError::UnsupportedFormat("unknown".to_string()))?,
        };

        debug!("Normalized {} byte upload as {}", bytes.len(), mime_type);
        Ok(ImagePayload::from_bytes(bytes, &mime_type, ImageSource::Upload))
    }

    /// Encodes a captured frame with the configured still-image format.
    pub fn from_capture(&self, frame: &Frame) -> Result<ImagePayload, IntakeError> {
        let mut encoded = Vec::new();
        let format = match self.format {
            CaptureFormat::Jpeg => {
                // JPEG has no alpha channel.
                let rgb = DynamicImage::ImageRgb8(frame.image().to_rgb8());
                rgb.write_with_encoder(JpegEncoder::new_with_quality(
                    &mut encoded,
                    self.jpeg_quality,
                ))?;
                ImageFormat::Jpeg
            }
            CaptureFormat::Png => {
                frame
                    .image()
                    .write_with_encoder(PngEncoder::new(&mut encoded))?;
                ImageFormat::Png
            }
        };

        debug!(
            "Encoded frame {} as {} ({} bytes)",
            frame.frame_id(),
            format.to_mime_type(),
            encoded.len()
        );
        Ok(ImagePayload::from_bytes(
            &encoded,
            format.to_mime_type(),
            ImageSource::Capture,
        ))
    }
}
