pub mod allergen_profile;
pub mod frame;
pub mod image_payload;

pub use allergen_profile::AllergenProfile;
pub use frame::Frame;
pub use image_payload::{ImagePayload, ImageSource};
