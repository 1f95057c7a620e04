use serde::{Deserialize, Serialize};

/// Stage-1 output of the ScanLabel pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractedText {
    #[serde(default)]
    pub text: String,
}

impl ExtractedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// `None` for empty text; there is nothing to check.
    pub fn allergen_query_text(&self) -> Option<String> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text.clone())
        }
    }
}
