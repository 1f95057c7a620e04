use std::fmt;

/// Which analysis mode the active tab drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineKind {
    /// Photo of a dish: classification, then allergen check on its ingredients.
    AnalyzeFood,
    /// Photo of an ingredient label: text extraction, then allergen check on the text.
    ScanLabel,
}

impl PipelineKind {
    pub fn name(&self) -> &'static str {
        match self {
            PipelineKind::AnalyzeFood => "AnalyzeFood",
            PipelineKind::ScanLabel => "ScanLabel",
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a remote call inside a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Classification or text extraction.
    Recognition,
    /// Allergen check.
    AllergenCheck,
}

impl Stage {
    pub fn number(&self) -> u8 {
        match self {
            Stage::Recognition => 1,
            Stage::AllergenCheck => 2,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage {}", self.number())
    }
}
