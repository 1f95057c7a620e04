use thiserror::Error;

use crate::pipeline::types::Stage;

// Main application error type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),
    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),
    #[error("Recommendation error: {0}")]
    Recommendation(#[from] RecommendationError),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Failures acquiring or using the capture device.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("camera permission was denied")]
    NotAllowed,
    #[error("no camera device was found")]
    NotFound,
    #[error("camera capture is not supported on this platform")]
    Unsupported,
    #[error("camera failure: {0}")]
    Other(String),
    /// A frame was requested without a granted session.
    #[error("no camera session is open")]
    NotOpen,
    /// The camera was released or re-requested while the platform request was pending.
    #[error("camera request was cancelled")]
    Cancelled,
}

impl CameraError {
    pub fn title(&self) -> &'static str {
        match self {
            CameraError::NotAllowed => "Camera access denied",
            CameraError::NotFound => "No camera found",
            CameraError::Unsupported => "Camera not supported",
            CameraError::Other(_) => "Camera error",
            CameraError::NotOpen => "Camera not ready",
            CameraError::Cancelled => "Camera cancelled",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            CameraError::NotAllowed => {
                "Allow camera access in your device settings, then open the camera again."
                    .to_string()
            }
            CameraError::NotFound => {
                "No camera was detected on this device. Upload a photo instead.".to_string()
            }
            CameraError::Unsupported => {
                "This device cannot stream from a camera. Upload a photo instead.".to_string()
            }
            CameraError::Other(reason) => format!("Could not start the camera: {}", reason),
            CameraError::NotOpen => "Open the camera before taking a photo.".to_string(),
            CameraError::Cancelled => "The camera was closed before it started.".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("the selected file is empty")]
    EmptyFile,
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to encode captured frame: {0}")]
    Encode(#[from] image::ImageError),
}

impl IntakeError {
    pub fn title(&self) -> &'static str {
        match self {
            IntakeError::EmptyFile => "Empty file",
            IntakeError::UnsupportedFormat(_) => "Unsupported image",
            IntakeError::Encode(_) => "Capture failed",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            IntakeError::EmptyFile => "The selected file has no content. Pick another image.".to_string(),
            IntakeError::UnsupportedFormat(kind) => {
                format!("Files of type '{}' cannot be analyzed. Pick an image file.", kind)
            }
            IntakeError::Encode(_) => "The photo could not be processed. Try again.".to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("device is offline")]
    Offline,
    #[error("no image is staged")]
    NoImage,
    #[error("{stage} analysis failed: {message}")]
    AnalysisFailed { stage: Stage, message: String },
}

impl PipelineError {
    pub fn title(&self) -> &'static str {
        match self {
            PipelineError::Offline => "You are offline",
            PipelineError::NoImage => "No image selected",
            PipelineError::AnalysisFailed { .. } => "Analysis failed",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Offline => {
                "Connect to the internet to analyze this image.".to_string()
            }
            PipelineError::NoImage => "Upload or capture an image first.".to_string(),
            PipelineError::AnalysisFailed { .. } => {
                "We could not analyze this image. Please try again.".to_string()
            }
        }
    }
}

/// Transport-level failures of the remote inference collaborator.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("API error {0}: {1}")]
    Api(u16, String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("missing or invalid API credential")]
    MissingCredential,
}

#[derive(Error, Debug)]
pub enum RecommendationError {
    #[error("device is offline")]
    Offline,
    #[error("missing or invalid API credential")]
    MissingCredential,
    #[error("recommendation request failed: {0}")]
    Failed(String),
}

impl RecommendationError {
    pub fn title(&self) -> &'static str {
        match self {
            RecommendationError::Offline => "You are offline",
            RecommendationError::MissingCredential => "API key required",
            RecommendationError::Failed(_) => "Recommendations unavailable",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            RecommendationError::Offline => {
                "Connect to the internet to get recommendations.".to_string()
            }
            RecommendationError::MissingCredential => {
                "The recommendation service API key is missing or invalid. Check your configuration."
                    .to_string()
            }
            RecommendationError::Failed(_) => {
                "Could not fetch recommendations right now. Please try again.".to_string()
            }
        }
    }
}

impl From<InferenceError> for RecommendationError {
    fn from(error: InferenceError) -> Self {
        match error {
            InferenceError::MissingCredential => RecommendationError::MissingCredential,
            other => RecommendationError::Failed(other.to_string()),
        }
    }
}
