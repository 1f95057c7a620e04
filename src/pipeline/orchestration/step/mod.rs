pub mod allergen_check_step;
pub mod classification_step;
pub mod text_extraction_step;

pub use allergen_check_step::AllergenCheckStep;
pub use classification_step::ClassificationStep;
pub use text_extraction_step::TextExtractionStep;
