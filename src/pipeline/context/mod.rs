pub mod metrics;
pub mod pipeline_run;
pub mod run_context;
pub mod state;

pub use metrics::RunMetrics;
pub use pipeline_run::{PipelineRun, RunId, RunStatus};
pub use run_context::RunContext;
pub use state::{ProcessingState, Recognized, Submitted};
