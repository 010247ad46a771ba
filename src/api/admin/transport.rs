use async_trait::async_trait;
use serde_json::Value;

use super::models::{ApiError, CollectionResponse, WriteMethod};

/// Seam between the console and the admin REST backend
///
/// [`super::AdminApiClient`] is the HTTP implementation; services only see this trait.
#[async_trait]
pub trait AdminTransport: Send + Sync {
    /// GET a list endpoint, keeping the `Link` header for cursor pagination
    async fn get_collection(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<CollectionResponse, ApiError>;

    /// GET a single JSON document
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;

    /// POST/PUT/DELETE with an optional JSON body. Empty answers come back as `Value::Null`.
    async fn send_json(
        &self,
        method: WriteMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError>;
}
