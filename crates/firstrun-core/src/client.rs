//! HTTP client for the TheTVDB JSON API
//!
//! This module provides a thin authenticated client: it logs in once at
//! connection time and issues bearer-token GET requests that decode JSON
//! response bodies. Transport faults are not retried; they surface to the
//! caller.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{FirstrunError, Result};

/// Base URL for the TheTVDB JSON API
const TVDB_BASE_URL: &str = "https://api.thetvdb.com";

/// Anonymous API key used when no key is configured
const DEFAULT_API_KEY: &str = "0629B785CE550C8D";

/// User-Agent sent with every request
const DEFAULT_USER_AGENT: &str = "firstrun/0.1";

/// Configuration for the TheTVDB HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key presented at login
    pub api_key: String,
    /// Base URL of the API (default: the public TheTVDB endpoint)
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            base_url: TVDB_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Login response body carrying the session token
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Authenticated HTTP client for the TheTVDB JSON API
///
/// Connecting performs the login exchange; every subsequent request
/// carries the returned bearer token.
pub struct TvdbClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Base URL all request paths are appended to
    base_url: String,
    /// Session token obtained at login
    token: String,
}

impl TvdbClient {
    /// Connect with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created or the
    /// login exchange fails.
    pub async fn connect() -> Result<Self> {
        Self::connect_with_config(ClientConfig::default()).await
    }

    /// Connect with custom configuration.
    ///
    /// # Arguments
    /// * `config` - Client configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created or the
    /// login exchange fails.
    pub async fn connect_with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let token = login(&client, &config.base_url, &config.api_key).await?;
        debug!("authenticated with provider");

        Ok(Self {
            client,
            base_url: config.base_url,
            token,
        })
    }

    /// Issue a GET request and decode the JSON response body.
    ///
    /// # Arguments
    /// * `path` - Path relative to the base URL (e.g., "/search/series")
    /// * `query` - Query parameters to append
    ///
    /// # Errors
    /// - `FirstrunError::NotFound` - Server returned 404
    /// - `FirstrunError::Http` - Network failure or other error status
    /// - `FirstrunError::Decode` - Response body was not the expected shape
    pub(crate) async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .query(query)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FirstrunError::NotFound(path.to_string()));
        }

        let response = response.error_for_status()?;
        response
            .json::<T>()
            .await
            .map_err(|e| FirstrunError::Decode(format!("{}: {}", path, e)))
    }
}

/// Perform the login exchange and return the session token.
async fn login(client: &reqwest::Client, base_url: &str, api_key: &str) -> Result<String> {
    let response = client
        .post(format!("{}/login", base_url))
        .json(&serde_json::json!({ "apikey": api_key }))
        .send()
        .await?
        .error_for_status()?;

    let body: LoginResponse = response
        .json()
        .await
        .map_err(|e| FirstrunError::Decode(format!("/login: {}", e)))?;

    Ok(body.token)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> ClientConfig {
        ClientConfig {
            api_key: "test-key".to_string(),
            base_url: server.uri(),
            timeout_secs: 5,
        }
    }

    async fn mount_login(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(json!({ "apikey": "test-key" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "token": "test-token" })),
            )
            .mount(server)
            .await;
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.thetvdb.com");
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.api_key.is_empty());
    }

    #[tokio::test]
    async fn test_connect_performs_login() {
        let server = MockServer::start().await;
        mount_login(&server).await;

        let client = TvdbClient::connect_with_config(test_config(&server)).await;
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_connect_fails_on_rejected_login() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "Error": "API Key Required"
            })))
            .mount(&server)
            .await;

        let result = TvdbClient::connect_with_config(test_config(&server)).await;
        assert!(matches!(result, Err(FirstrunError::Http(_))));
    }

    #[tokio::test]
    async fn test_get_json_sends_bearer_token() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("GET"))
            .and(path("/search/series"))
            .and(header("Authorization", "Bearer test-token"))
            .and(query_param("name", "Suits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TvdbClient::connect_with_config(test_config(&server))
            .await
            .unwrap();
        let body: serde_json::Value = client
            .get_json("/search/series", &[("name", "Suits".to_string())])
            .await
            .unwrap();
        assert_eq!(body, json!({ "data": [] }));
    }

    #[tokio::test]
    async fn test_get_json_maps_404_to_not_found() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("GET"))
            .and(path("/search/series"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "Error": "Resource not found"
            })))
            .mount(&server)
            .await;

        let client = TvdbClient::connect_with_config(test_config(&server))
            .await
            .unwrap();
        let result: Result<serde_json::Value> = client
            .get_json("/search/series", &[("name", "Nope".to_string())])
            .await;

        match result {
            Err(FirstrunError::NotFound(path)) => assert_eq!(path, "/search/series"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_json_propagates_server_error() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("GET"))
            .and(path("/series/1/episodes"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = TvdbClient::connect_with_config(test_config(&server))
            .await
            .unwrap();
        let result: Result<serde_json::Value> = client.get_json("/series/1/episodes", &[]).await;
        assert!(matches!(result, Err(FirstrunError::Http(_))));
    }

    #[tokio::test]
    async fn test_get_json_reports_decode_failure() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("GET"))
            .and(path("/search/series"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        #[derive(Debug, Deserialize)]
        struct Empty {}

        let client = TvdbClient::connect_with_config(test_config(&server))
            .await
            .unwrap();
        let result: Result<Empty> = client.get_json("/search/series", &[]).await;

        match result {
            Err(FirstrunError::Decode(msg)) => assert!(msg.contains("/search/series")),
            other => panic!("expected Decode, got {:?}", other),
        }
    }
}
