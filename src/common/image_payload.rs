use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Where a staged image came from. Downstream stages never branch on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Upload,
    Capture,
}

/// An encoded still image ready for remote analysis.
///
/// Cloning is cheap; the encoded body is shared.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    id: Uuid,
    data: Arc<str>,
    mime_type: Arc<str>,
    source: ImageSource,
    created_at: DateTime<Utc>,
}

impl ImagePayload {
    pub(crate) fn from_bytes(bytes: &[u8], mime_type: &str, source: ImageSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            data: Arc::from(general_purpose::STANDARD.encode(bytes)),
            mime_type: Arc::from(mime_type),
            source,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Base64 body without any data-URL prefix.
    pub fn base64(&self) -> &str {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn source(&self) -> ImageSource {
        self.source
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_carries_mime_and_body() {
        let payload = ImagePayload::from_bytes(b"abc", "image/png", ImageSource::Upload);
        assert_eq!(payload.base64(), "YWJj");
        assert_eq!(payload.data_url(), "data:image/png;base64,YWJj");
    }

    #[test]
    fn clones_share_the_encoded_body() {
        let payload = ImagePayload::from_bytes(&[1, 2, 3], "image/jpeg", ImageSource::Capture);
        let copy = payload.clone();
        assert!(Arc::ptr_eq(&payload.data, &copy.data));
        assert_eq!(payload.id(), copy.id());
    }
}
