//! In-memory [`AdminTransport`] for service and command tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::models::{ApiError, CollectionResponse, WriteMethod};
use super::transport::AdminTransport;

#[derive(Default)]
pub struct FakeTransport {
    collections: Mutex<HashMap<String, Result<CollectionResponse, ApiError>>>,
    documents: Mutex<HashMap<String, Result<Value, ApiError>>>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    writes: Mutex<Vec<(WriteMethod, String, Option<Value>)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer GETs of `path` with a body and no `Link` header
    pub fn with_body(self, path: &str, body: Value) -> Self {
        self.set_collection(path, Ok(CollectionResponse { link: None, body }));
        self
    }

    pub fn with_collection(self, path: &str, result: Result<CollectionResponse, ApiError>) -> Self {
        self.set_collection(path, result);
        self
    }

    pub fn with_document(self, path: &str, result: Result<Value, ApiError>) -> Self {
        self.set_document(path, result);
        self
    }

    pub fn set_collection(&self, path: &str, result: Result<CollectionResponse, ApiError>) {
        self.collections
            .lock()
            .unwrap()
            .insert(path.to_string(), result);
    }

    pub fn set_document(&self, path: &str, result: Result<Value, ApiError>) {
        self.documents.lock().unwrap().insert(path.to_string(), result);
    }

    /// Every collection GET so far, with its query parameters
    pub fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<(WriteMethod, String, Option<Value>)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl AdminTransport for FakeTransport {
    async fn get_collection(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<CollectionResponse, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), params.to_vec()));
        self.collections
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::NotFound(path.to_string())))
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        self.documents
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::NotFound(path.to_string())))
    }

    async fn send_json(
        &self,
        method: WriteMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.writes
            .lock()
            .unwrap()
            .push((method, path.to_string(), body.cloned()));
        let key = format!("{} {}", method, path);
        self.documents
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Ok(json!({ "success": true })))
    }
}
