use std::sync::Arc;

use tracing::{error, info};

use crate::common::AllergenProfile;
use crate::error::RecommendationError;
use crate::pipeline::services::inference::{
    InferenceBackend, RecommendationRequest, RecommendedFood,
};
use crate::session::{Connectivity, Notification, Notifier};

/// Suggests dishes that avoid the user's allergens.
pub struct RecommendationService {
    backend: Arc<dyn InferenceBackend>,
    connectivity: Arc<dyn Connectivity>,
    notifier: Notifier,
}

impl RecommendationService {
    pub fn new(
        backend: Arc<dyn InferenceBackend>,
        connectivity: Arc<dyn Connectivity>,
        notifier: Notifier,
    ) -> Self {
        Self {
            backend,
            connectivity,
            notifier,
        }
    }

    pub async fn recommend(
        &self,
        profile: &AllergenProfile,
        cuisine_preference: &str,
    ) -> Result<Vec<RecommendedFood>, RecommendationError> {
        let result = self.fetch(profile, cuisine_preference).await;
        match &result {
            Ok(foods) => info!("Received {} recommendations", foods.len()),
            Err(e) => {
                error!("Recommendation request failed: {}", e);
                self.notifier
                    .publish(Notification::error(e.title(), e.user_message()));
            }
        }
        result
    }

    async fn fetch(
        &self,
        profile: &AllergenProfile,
        cuisine_preference: &str,
    ) -> Result<Vec<RecommendedFood>, RecommendationError> {
        if !self.connectivity.is_online() {
            return Err(RecommendationError::Offline);
        }
        let request = RecommendationRequest {
            allergen_profile: profile.to_vec(),
            cuisine_preference: cuisine_preference.trim().to_string(),
        };
        Ok(self.backend.recommend(&request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InferenceError;
    use crate::session::ConnectivityFlag;
    use crate::testing::FakeBackend;

    fn service(backend: Arc<FakeBackend>, online: bool) -> (RecommendationService, tokio::sync::mpsc::Receiver<Notification>) {
        let (notifier, rx) = Notifier::channel(8);
        let service = RecommendationService::new(
            backend,
            Arc::new(ConnectivityFlag::new(online)),
            notifier,
        );
        (service, rx)
    }

    #[tokio::test]
    async fn passes_profile_and_trimmed_cuisine() {
        let backend = Arc::new(FakeBackend::new());
        backend.push_recommendation(Ok(vec![RecommendedFood {
            name: "Pho".to_string(),
            description: "rice noodle soup".to_string(),
            image_url: None,
        }]));
        let (service, _rx) = service(backend.clone(), true);

        let foods = service
            .recommend(&AllergenProfile::new(["wheat"]), "  Vietnamese ")
            .await
            .unwrap();

        assert_eq!(foods[0].name, "Pho");
        let request = backend.last_recommendation_request().unwrap();
        assert_eq!(request.allergen_profile, vec!["wheat"]);
        assert_eq!(request.cuisine_preference, "Vietnamese");
    }

    #[tokio::test]
    async fn credential_failure_gets_its_own_toast() {
        let backend = Arc::new(FakeBackend::new());
        backend.push_recommendation(Err(InferenceError::MissingCredential));
        let (service, mut rx) = service(backend, true);

        let result = service.recommend(&AllergenProfile::default(), "any").await;

        assert!(matches!(result, Err(RecommendationError::MissingCredential)));
        let toast = rx.recv().await.unwrap();
        assert_eq!(toast.title, "API key required");
    }

    #[tokio::test]
    async fn offline_skips_the_backend() {
        let backend = Arc::new(FakeBackend::new());
        let (service, mut rx) = service(backend.clone(), false);

        let result = service.recommend(&AllergenProfile::default(), "any").await;

        assert!(matches!(result, Err(RecommendationError::Offline)));
        assert_eq!(backend.recommend_calls(), 0);
        assert_eq!(rx.recv().await.unwrap().title, "You are offline");
    }
}
