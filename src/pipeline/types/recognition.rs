use super::{Classification, ExtractedText, PipelineKind};

/// Stage-1 result, tagged by the pipeline that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Recognition {
    Classification(Classification),
    ExtractedText(ExtractedText),
}

impl Recognition {
    pub fn kind(&self) -> PipelineKind {
        match self {
            Recognition::Classification(_) => PipelineKind::AnalyzeFood,
            Recognition::ExtractedText(_) => PipelineKind::ScanLabel,
        }
    }

    /// Input for stage 2, or `None` when no allergen check is warranted.
    pub fn allergen_query_text(&self) -> Option<String> {
        match self {
            Recognition::Classification(classification) => classification.allergen_query_text(),
            Recognition::ExtractedText(extracted) => extracted.allergen_query_text(),
        }
    }

    pub fn as_classification(&self) -> Option<&Classification> {
        match self {
            Recognition::Classification(classification) => Some(classification),
            Recognition::ExtractedText(_) => None,
        }
    }

    pub fn as_extracted_text(&self) -> Option<&ExtractedText> {
        match self {
            Recognition::ExtractedText(extracted) => Some(extracted),
            Recognition::Classification(_) => None,
        }
    }
}
