//! Error types for the Radarr/Sonarr client.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure reported by the library.
#[derive(Error, Debug)]
pub enum Error {
    /// Generic client error, also the base for domain errors shared by both services.
    #[error("{0}")]
    Client(String),

    #[error("Error sending request {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Error from server {url}, status: {status}, msg: {body}")]
    Server {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Error parsing response {body} from {url}: {message}")]
    Decode {
        url: String,
        body: String,
        message: String,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} object has no attribute '{name}'")]
    Attribute { kind: &'static str, name: String },

    // Service specific errors
    #[error("{0}")]
    Radarr(String),

    #[error("{0}")]
    Sonarr(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a generic client error from a string.
    pub fn client<S: Into<String>>(msg: S) -> Self {
        Error::Client(msg.into())
    }

    /// HTTP status code carried by a server error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is a recognized API or domain error, as opposed to an
    /// unexpected failure of the tool itself.
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            Error::Client(_)
                | Error::Transport { .. }
                | Error::Server { .. }
                | Error::Decode { .. }
                | Error::Json(_)
                | Error::Radarr(_)
                | Error::Sonarr(_)
        )
    }
}
