use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, LINK};
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::{debug, warn};

use super::models::{ApiError, CollectionResponse, WriteMethod};
use super::transport::AdminTransport;
use crate::utils::extract_backend_message;

/// Admin REST API client for the loyalty backend
pub struct AdminApiClient {
    http_client: HttpClient,
    api_token: Option<String>,
    base_url: String,
}

impl AdminApiClient {
    /// Create a new client against `base_url`, sending `api_token` as a bearer token
    pub fn new(
        base_url: String,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create default headers with authorization
    fn create_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.api_token {
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::Validation(format!("Failed to create auth header: {}", e)))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request_error(e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else {
            ApiError::Network(format!("Request failed: {}", e))
        }
    }

    /// Extract the pagination `Link` header, if any
    fn extract_link_header(response: &reqwest::Response) -> Option<String> {
        response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();
        let message = extract_backend_message(&body_text);

        match status_code {
            400 | 422 => ApiError::Validation(message),
            401 | 403 => ApiError::Unauthorized(message),
            404 => ApiError::NotFound(message),
            500..=599 => {
                warn!("Server error {}: {}", status_code, message);
                ApiError::Server(status_code, message)
            }
            _ => ApiError::Http(status_code, message),
        }
    }

    /// Read a JSON body; an empty body is `Value::Null`
    async fn read_json(response: reqwest::Response) -> Result<Value, ApiError> {
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| ApiError::Parse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl AdminTransport for AdminApiClient {
    /// GET /api/{resource}
    ///
    /// Keeps the `Link` header so cursor endpoints can be paginated.
    async fn get_collection(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<CollectionResponse, ApiError> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, params);

        let response = self
            .http_client
            .get(&url)
            .headers(self.create_headers()?)
            .query(params)
            .send()
            .await
            .map_err(Self::request_error)?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let link = Self::extract_link_header(&response);
        let body = Self::read_json(response).await?;

        Ok(CollectionResponse { link, body })
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .headers(self.create_headers()?)
            .send()
            .await
            .map_err(Self::request_error)?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        Self::read_json(response).await
    }

    async fn send_json(
        &self,
        method: WriteMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let request = match method {
            WriteMethod::Post => self.http_client.post(&url),
            WriteMethod::Put => self.http_client.put(&url),
            WriteMethod::Delete => self.http_client.delete(&url),
        };
        let request = request.headers(self.create_headers()?);
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };

        let response = request.send().await.map_err(Self::request_error)?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = AdminApiClient::new(
            "https://appadmin.moonadelivery.com/".to_string(),
            None,
            Duration::from_secs(5),
        )
        .expect("client");
        assert_eq!(client.base_url(), "https://appadmin.moonadelivery.com");
        assert_eq!(
            client.url("/api/orders"),
            "https://appadmin.moonadelivery.com/api/orders"
        );
    }

    #[test]
    fn test_headers_carry_token() {
        let client = AdminApiClient::new(
            "http://backend".to_string(),
            Some("abc123".to_string()),
            Duration::from_secs(5),
        )
        .expect("client");
        let headers = client.create_headers().expect("headers");
        assert_eq!(
            headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer abc123")
        );

        let anonymous =
            AdminApiClient::new("http://backend".to_string(), None, Duration::from_secs(5))
                .expect("client");
        assert!(anonymous.create_headers().expect("headers").get(AUTHORIZATION).is_none());
    }
}
