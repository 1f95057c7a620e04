use std::time::Duration;

use serde::Deserialize;
use tracing::Level;

use crate::error::AppError;

pub const DEFAULT_CONFIG_FILE: &str = "allergen-scan.toml";
const ENV_PREFIX: &str = "ALLERGEN_SCAN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub inference: InferenceSettings,
    pub pipeline: PipelineSettings,
    pub capture: CaptureSettings,
    pub notifications: NotificationSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers the optional TOML file and `ALLERGEN_SCAN__*` environment variables over the defaults.
    pub fn load(path: Option<&str>) -> Result<Self, AppError> {
        let file = path.unwrap_or(DEFAULT_CONFIG_FILE);
        let settings = config::Config::builder()
            .add_source(config::File::with_name(file).required(path.is_some()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InferenceSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            api_key: None,
            request_timeout_secs: None,
        }
    }
}

impl InferenceSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Remote stages run without a deadline unless `stage_timeout_ms` is set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub stage_timeout_ms: Option<u64>,
}

impl PipelineSettings {
    pub fn stage_timeout(&self) -> Option<Duration> {
        self.stage_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureFormat {
    Jpeg,
    Png,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Environment,
    User,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    pub format: CaptureFormat,
    pub jpeg_quality: u8,
    pub facing: Facing,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            format: CaptureFormat::Jpeg,
            jpeg_quality: 85,
            facing: Facing::Environment,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub buffer_size: usize,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { buffer_size: 32 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingSettings {
    // Unknown level names fall back to INFO.
    pub fn max_level(&self) -> Level {
        self.level.parse().unwrap_or(Level::INFO)
    }
}
