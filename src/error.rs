//! Error types for Launchpad API operations.

use thiserror::Error;

/// Errors that can occur during Launchpad API operations.
#[derive(Debug, Error)]
pub enum LpError {
    /// The server answered with a status outside the accepted set.
    #[error("Server returned {status} and {}", describe_body(.body))]
    Http {
        /// HTTP status code (500, 403, ...).
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A redirect response arrived without a target.
    #[error("Got redirection status {status} without a Location")]
    MissingRedirectLocation { status: u16 },

    /// A redirect chain did not settle within the hop limit.
    #[error("Stopped after {0} redirects")]
    TooManyRedirects(usize),

    /// A successful response did not carry JSON.
    #[error("Non-JSON content-type: {0}")]
    ContentType(String),

    /// Collection iteration on a value without an `entries` array.
    #[error("No entries found in value")]
    NoEntries,

    /// A link field required by the caller is absent.
    #[error("Field {0:?} not found in value")]
    MissingLink(String),

    /// The signer refused or failed to authenticate a request.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A typed lookup resolved to the wrong kind of entity.
    #[error("{name} is {expected}")]
    UnexpectedKind {
        name: String,
        expected: &'static str,
    },

    /// Configuration is present but unusable.
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl LpError {
    /// The HTTP status carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            LpError::Http { status, .. } | LpError::MissingRedirectLocation { status } => {
                Some(*status)
            }
            LpError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn describe_body(body: &str) -> String {
    if body.is_empty() {
        "no body.".to_string()
    } else {
        format!("body: {body}")
    }
}

/// Result type alias for Launchpad operations.
pub type Result<T> = core::result::Result<T, LpError>;
