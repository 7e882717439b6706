mod client;
pub mod envelope;
pub mod query;

pub use client::ApiClient;
pub use envelope::{decode_list, Page};
pub use query::ListQuery;

use crate::error::AppResult;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

/// Uniform request function against the administration API.
///
/// `path` is relative to the configured base URL and may carry a query string.
/// Implementations return the decoded JSON body (`Value::Null` for empty bodies)
/// and fail on every non-2xx status.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> AppResult<Value>;
}
