pub mod http_client;
pub mod inference;
pub mod recommendation;

pub use http_client::HttpInferenceClient;
pub use inference::{InferenceBackend, RecommendationRequest, RecommendedFood};
pub use recommendation::RecommendationService;
