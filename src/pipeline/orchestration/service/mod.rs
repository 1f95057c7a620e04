pub mod allergen_service;
pub mod recognition_service;

pub use allergen_service::AllergenService;
pub use recognition_service::RecognitionService;
