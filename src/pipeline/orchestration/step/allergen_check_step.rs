use std::sync::Arc;

use async_trait::async_trait;

use crate::error::InferenceError;
use crate::pipeline::orchestration::processing_step::AllergenStep;
use crate::pipeline::services::InferenceBackend;
use crate::pipeline::types::{AllergenCheck, AllergenQuery};

pub struct AllergenCheckStep {
    backend: Arc<dyn InferenceBackend>,
}

impl AllergenCheckStep {
    pub fn new(backend: Arc<dyn InferenceBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl AllergenStep for AllergenCheckStep {
    async fn check(&self, query: &AllergenQuery) -> Result<AllergenCheck, InferenceError> {
        let check = self.backend.check_allergens(query).await?;
        tracing::debug!(
            risk = check.risk_level.label(),
            detected = ?check.detected_allergens,
            "Allergen check returned"
        );
        Ok(check)
    }

    fn name(&self) -> &'static str {
        "AllergenCheckStep"
    }
}
