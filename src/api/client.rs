use super::ApiTransport;
use crate::config::Config;
use crate::error::{api_error, config_error, AppResult, Error};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

/// HTTP client for the administration API
#[derive(Clone, Debug)]
pub struct ApiClient {
    base: Url,
    token: Option<String>,
    client: Client,
}

impl ApiClient {
    /// Create a client from the loaded configuration
    pub fn new(config: &Config) -> AppResult<Self> {
        Self::with_base(&config.api_url, config.api_token.clone())
    }

    /// Create a client for a base URL, optionally sending a bearer token
    pub fn with_base(base_url: &str, token: Option<String>) -> AppResult<Self> {
        // A trailing slash keeps the last path segment when joining
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base = Url::parse(&normalized)
            .map_err(|e| config_error(&format!("Failed to parse API URL: {}", e)))?;

        Ok(Self {
            base,
            token,
            client: Client::new(),
        })
    }

    /// Resolve a request path against the base URL
    pub fn url_for(&self, path: &str) -> AppResult<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| config_error(&format!("Invalid request path {}: {}", path, e)))
    }
}

#[async_trait]
impl ApiTransport for ApiClient {
    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> AppResult<Value> {
        let url = self.url_for(path)?;
        debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(Error::from)?;
        let status = response.status();
        debug!("{} {} -> {}", method, url, status);

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(path.to_string()));
        }

        if !status.is_success() {
            // Raw detail stays in the developer log
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            error!("{} {} failed: HTTP {} - {}", method, url, status, error_body);
            return Err(api_error(status.as_u16()));
        }

        let text = response.text().await.map_err(Error::from)?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_below_base_path() {
        let client = ApiClient::with_base("http://localhost:8080/api", None).unwrap();
        assert_eq!(
            client.url_for("/students?page=2").unwrap().as_str(),
            "http://localhost:8080/api/students?page=2"
        );
        assert_eq!(
            client.url_for("class-groups/7").unwrap().as_str(),
            "http://localhost:8080/api/class-groups/7"
        );
    }

    #[test]
    fn rejects_invalid_base() {
        assert!(matches!(
            ApiClient::with_base("::nope::", None),
            Err(Error::Config(_))
        ));
    }
}
