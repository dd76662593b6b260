use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::env;

use super::error::{RemoteError, RemoteResult};

/// HTTP client for the board REST API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// Priority for base URL:
    /// 1. Explicit `api_url` parameter
    /// 2. TASKBOARD_API_URL environment variable
    /// 3. Default: http://localhost:3000
    pub fn new(api_url: Option<String>) -> Self {
        let base_url = api_url
            .or_else(|| env::var("TASKBOARD_API_URL").ok())
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a GET request builder
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.get(&url)
    }

    /// Create a POST request builder
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.post(&url)
    }

    /// Create a PUT request builder
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.put(&url)
    }

    /// Create a DELETE request builder
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.delete(&url)
    }

    /// Deserialize the response body on success, or surface the error text
    /// on non-success status codes.
    pub async fn handle_response<T: DeserializeOwned>(response: Response) -> RemoteResult<T> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| RemoteError::InvalidResponse {
                    message: e.to_string(),
                })
        } else {
            Err(Self::status_error(response).await)
        }
    }

    /// Check the status without expecting a decodable body (PUT and DELETE
    /// may return a bare confirmation).
    pub async fn ensure_success(response: Response) -> RemoteResult<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::status_error(response).await)
        }
    }

    async fn status_error(response: Response) -> RemoteError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        RemoteError::Api { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Initialize crypto provider once for all tests
    fn init_crypto() {
        let _ = rustls::crypto::ring::default_provider().install_default();
    }

    #[test]
    fn test_new_with_explicit_url() {
        init_crypto();
        let client = ApiClient::new(Some("http://custom:8080".to_string()));
        assert_eq!(client.base_url(), "http://custom:8080");
    }

    #[test]
    fn test_new_with_default() {
        init_crypto();
        let client = ApiClient::new(None);
        // Actual value depends on TASKBOARD_API_URL if set
        assert!(!client.base_url().is_empty());
    }

    #[test]
    #[serial_test::serial]
    fn test_env_var_overrides_default() {
        init_crypto();
        // set_var is process-global; the serial guard keeps other env
        // readers out while it is set.
        unsafe { std::env::set_var("TASKBOARD_API_URL", "http://env-host:1234") };
        let client = ApiClient::new(None);
        unsafe { std::env::remove_var("TASKBOARD_API_URL") };
        assert_eq!(client.base_url(), "http://env-host:1234");
    }

    #[tokio::test]
    async fn test_builders_exist_for_all_verbs() {
        init_crypto();
        let client = ApiClient::new(None);
        let _ = client.get("/v1/board");
        let _ = client.post("/v1/board");
        let _ = client.put("/v1/board/b1");
        let _ = client.delete("/v1/board/b1");
    }
}
