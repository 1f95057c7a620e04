use crate::pipeline::types::Recognition;

// Markers tracking how far a run has progressed
pub struct Submitted;
pub struct Recognized {
    pub(super) recognition: Recognition,
}

pub trait ProcessingState: 'static {
    fn state_name() -> &'static str;
}

impl ProcessingState for Submitted {
    fn state_name() -> &'static str {
        "Submitted"
    }
}

impl ProcessingState for Recognized {
    fn state_name() -> &'static str {
        "Recognized"
    }
}
