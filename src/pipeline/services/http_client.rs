//! JSON-over-HTTP implementation of [`InferenceBackend`].

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::common::ImagePayload;
use crate::config::InferenceSettings;
use crate::error::InferenceError;
use crate::pipeline::services::inference::{
    InferenceBackend, RecommendationRequest, RecommendedFood,
};
use crate::pipeline::types::{AllergenCheck, AllergenQuery, Classification, ExtractedText};

const USER_AGENT: &str = concat!("allergen-scan/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageRequest<'a> {
    image: &'a str,
    mime_type: &'a str,
}

impl<'a> From<&'a ImagePayload> for ImageRequest<'a> {
    fn from(payload: &'a ImagePayload) -> Self {
        Self {
            image: payload.base64(),
            mime_type: payload.mime_type(),
        }
    }
}

pub struct HttpInferenceClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpInferenceClient {
    pub fn new(settings: &InferenceSettings) -> Result<Self, InferenceError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
        })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, InferenceError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(InferenceError::MissingCredential)?;
        let url = format!("{}/{}", self.base_url, path);

        tracing::debug!(url = %url, "Calling inference endpoint");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(InferenceError::MissingCredential);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(InferenceError::Api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| InferenceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl InferenceBackend for HttpInferenceClient {
    async fn classify(&self, image: &ImagePayload) -> Result<Classification, InferenceError> {
        let classification: Classification =
            self.post("classify", &ImageRequest::from(image)).await?;
        Ok(classification.normalized())
    }

    async fn extract_text(&self, image: &ImagePayload) -> Result<ExtractedText, InferenceError> {
        self.post("extract-text", &ImageRequest::from(image)).await
    }

    async fn check_allergens(
        &self,
        query: &AllergenQuery,
    ) -> Result<AllergenCheck, InferenceError> {
        self.post("allergen-check", query).await
    }

    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendedFood>, InferenceError> {
        self.post("recommendations", request).await
    }
}
