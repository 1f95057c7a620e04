use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use tower::{BoxError, Service};

use crate::common::ImagePayload;
use crate::pipeline::orchestration::processing_step::RecognitionStep;
use crate::pipeline::types::Recognition;

#[derive(Clone)]
pub struct RecognitionService {
    inner: Arc<dyn RecognitionStep>,
}

impl RecognitionService {
    pub fn new(inner: Arc<dyn RecognitionStep>) -> Self {
        Self { inner }
    }
}

impl Service<ImagePayload> for RecognitionService {
    type Response = Recognition;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, image: ImagePayload) -> Self::Future {
        let inner = self.inner.clone();
        Box::pin(async move {
            tracing::debug!("Dispatching {}", inner.name());
            Ok(inner.recognize(&image).await?)
        })
    }
}
