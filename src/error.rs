//! Error types for the verseop CLI

use thiserror::Error;

/// Result type alias for verseop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors.
///
/// Every non-success outcome of the request pipeline maps to exactly one of
/// these variants. No variant is retried automatically.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend envelope reported `success: false`. Carries the original
    /// message and the HTTP status the envelope arrived with.
    #[error("{message}")]
    Api { message: String, status: u16 },

    /// 401 on a non-auth endpoint. Local session state has already been
    /// cleared by the time this surfaces.
    #[error("Session expired. Please sign in again with `verseop login`.")]
    SessionExpired,

    /// 401 from a login/registration endpoint with a body we could not
    /// interpret as an envelope.
    #[error("Invalid credentials")]
    Unauthorized,

    /// Any other non-2xx status with a non-envelope body, passed through
    /// for caller-specific handling.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Server error, please try again later: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status associated with this error, when one exists.
    #[cfg(test)]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } | ApiError::Http { status, .. } => Some(*status),
            ApiError::SessionExpired | ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `verseop init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Not signed in. Run `verseop login` to authenticate.")]
    NotSignedIn,

    #[error("No agent specified. Pass an agent ID or run `verseop agent use <ID>`.")]
    MissingAgent,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
