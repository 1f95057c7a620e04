pub mod context;
pub mod orchestration;
pub mod services;
pub mod types;

pub use orchestration::{PipelineOrchestrator, RunOutcome};
pub use services::{HttpInferenceClient, InferenceBackend, RecommendationService};
pub use types::{PipelineKind, RiskLevel, Stage};
