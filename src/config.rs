//! Session configuration.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{LpError, Result};

/// Production Launchpad API root.
pub const PRODUCTION: &str = "https://api.launchpad.net/1.0/";

/// Staging Launchpad API root.
pub const STAGING: &str = "https://api.staging.launchpad.net/1.0/";

const USER_AGENT: &str = concat!("lpapi/", env!("CARGO_PKG_VERSION"));

/// Settings used to build a [`Session`](crate::Session).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// API root every absolute path is resolved against.
    pub base_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Dump request and response headers under the `lpapi::wire` target.
    pub dump_http: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: PRODUCTION.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(300),
            dump_http: false,
        }
    }
}

impl SessionConfig {
    /// Configuration rooted at the given API URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// `LAUNCHPAD_API_URL` selects the API root (a full URL, or one of the
    /// aliases `production` and `staging`); it defaults to production.
    /// `LAUNCHPAD_DUMP_HTTP` set to `1` or `true` enables wire dumps.
    ///
    /// # Errors
    ///
    /// Returns an error if `LAUNCHPAD_API_URL` is not a valid URL.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("LAUNCHPAD_API_URL").ok();
        let dump_http = env::var("LAUNCHPAD_DUMP_HTTP").ok();
        Self::from_values(base_url.as_deref(), dump_http.as_deref())
    }

    fn from_values(base_url: Option<&str>, dump_http: Option<&str>) -> Result<Self> {
        let base_url = match base_url.map(str::trim) {
            None | Some("") | Some("production") => PRODUCTION.to_string(),
            Some("staging") => STAGING.to_string(),
            Some(url) => {
                Url::parse(url).map_err(|e| {
                    LpError::ConfigInvalid(format!("LAUNCHPAD_API_URL {url:?}: {e}"))
                })?;
                url.to_string()
            }
        };

        let dump_http = matches!(
            dump_http.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("1") | Some("true")
        );

        Ok(Self {
            base_url,
            dump_http,
            ..Default::default()
        })
    }
}
