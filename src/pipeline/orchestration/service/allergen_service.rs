use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use tower::{BoxError, Service};

use crate::pipeline::orchestration::processing_step::AllergenStep;
use crate::pipeline::types::{AllergenCheck, AllergenQuery};

#[derive(Clone)]
pub struct AllergenService {
    inner: Arc<dyn AllergenStep>,
}

impl AllergenService {
    pub fn new(inner: Arc<dyn AllergenStep>) -> Self {
        Self { inner }
    }
}

impl Service<AllergenQuery> for AllergenService {
    type Response = AllergenCheck;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, query: AllergenQuery) -> Self::Future {
        let inner = self.inner.clone();
        Box::pin(async move {
            tracing::debug!("Dispatching {}", inner.name());
            Ok(inner.check(&query).await?)
        })
    }
}
