mod allergen_check;
mod classification;
mod extracted_text;
mod pipeline_kind;
mod recognition;

pub use allergen_check::{AllergenCheck, AllergenQuery, RiskLevel, derive_risk};
pub use classification::{Classification, FoodDetails};
pub use extracted_text::ExtractedText;
pub use pipeline_kind::{PipelineKind, Stage};
pub use recognition::Recognition;
