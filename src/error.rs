use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("API responded with HTTP {status}")]
    #[diagnostic(code(madrassa::api))]
    Api { status: u16 },

    #[error("API unreachable: {0}")]
    #[diagnostic(code(madrassa::unavailable), help("check MADRASSA_API_URL and the network"))]
    Unavailable(String),

    #[error("Record not found: {0}")]
    #[diagnostic(code(madrassa::not_found))]
    NotFound(String),

    #[error("Missing required fields: {}", fields.join(", "))]
    #[diagnostic(code(madrassa::validation))]
    Validation { fields: Vec<String> },

    #[error("Unexpected response shape: {0}")]
    #[diagnostic(code(madrassa::decode))]
    Decode(String),

    #[error("Cache error: {0}")]
    #[diagnostic(code(madrassa::cache))]
    Cache(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(madrassa::config))]
    Config(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(madrassa::environment))]
    Environment(String),

    #[error(transparent)]
    #[diagnostic(code(madrassa::io))]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    #[diagnostic(code(madrassa::other))]
    Other(String),
}

impl Error {
    /// Whether the failure means the API could not be reached at all
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::Unavailable(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Error::Unavailable(err.to_string())
        } else if err.is_decode() {
            Error::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Error::Api {
                status: status.as_u16(),
            }
        } else {
            Error::Unavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Cache(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create API errors from a status code
pub fn api_error(status: u16) -> Error {
    Error::Api { status }
}

/// Helper to create cache errors
pub fn cache_error(message: &str) -> Error {
    Error::Cache(message.to_string())
}

/// Helper to create validation errors
pub fn validation_error<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Error {
    Error::Validation {
        fields: fields.into_iter().map(Into::into).collect(),
    }
}
