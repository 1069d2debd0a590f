//! Sessions and request signing.
//!
//! A [`Session`] owns the shared HTTP connection pool and the optional
//! [`Auth`] capability that signs outgoing requests. Every [`Value`]
//! derived from a session carries a cheap clone of it.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{redirect, Client, Request};

use crate::config::SessionConfig;
use crate::error::{LpError, Result};
use crate::models::Root;
use crate::traits::Entity;
use crate::value::{Fields, Value};

/// Authenticates requests made against the API.
///
/// `login` runs once when a session starts and may perform whatever
/// out-of-band handshake establishes credentials. `sign` is called for
/// every request after it is fully built, so it sees the final method,
/// URL, headers and body.
#[async_trait]
pub trait Auth: Send + Sync {
    /// Establish credentials for the API rooted at `base_url`.
    async fn login(&self, _base_url: &str) -> Result<()> {
        Ok(())
    }

    /// Attach credentials to an outgoing request.
    fn sign(&self, request: &mut Request) -> Result<()>;
}

/// A session of communication with the API.
///
/// This struct is cheaply cloneable; clones share the same connection pool
/// and signer.
#[derive(Clone)]
pub struct Session {
    http: Client,
    auth: Option<Arc<dyn Auth>>,
    dump_http: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.auth.is_some())
            .field("dump_http", &self.dump_http)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session. Requests are signed by `auth` when present and
    /// sent anonymously otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &SessionConfig, auth: Option<Arc<dyn Auth>>) -> Result<Self> {
        // Redirects are followed by the request loop, which re-signs each hop.
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(redirect::Policy::none())
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .build()
            .map_err(LpError::Transport)?;

        Ok(Self {
            http,
            auth,
            dump_http: config.dump_http,
        })
    }

    /// Create an unauthenticated session with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn anonymous() -> Result<Self> {
        Self::new(&SessionConfig::default(), None)
    }

    /// Whether requests in this session are signed.
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Whether wire dumps are enabled for this session.
    pub fn dump_http(&self) -> bool {
        self.dump_http
    }

    /// Sign a request with the session's credentials, if any.
    ///
    /// # Errors
    ///
    /// Propagates the signer's failure.
    pub fn sign(&self, request: &mut Request) -> Result<()> {
        match &self.auth {
            Some(auth) => auth.sign(request),
            None => Ok(()),
        }
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// The root value for the API at `base_url`, not yet fetched.
    pub fn root(&self, base_url: &str) -> Root {
        Root::from_value(Value::new(self.clone(), base_url, base_url, Fields::new()))
    }
}

/// Log into the API described by `config` and return its root.
///
/// This is the primary way to start using the library:
///
/// ```no_run
/// use std::sync::Arc;
/// use lpapi::{Auth, SessionConfig};
///
/// # async fn example(auth: Arc<dyn Auth>) -> lpapi::Result<()> {
/// let root = lpapi::login(&SessionConfig::from_env()?, auth).await?;
/// let me = root.me().await?;
/// println!("{}", me.display_name());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if the login handshake fails or the HTTP client
/// cannot be built.
#[tracing::instrument(skip(config, auth), fields(base_url = %config.base_url))]
pub async fn login(config: &SessionConfig, auth: Arc<dyn Auth>) -> Result<Root> {
    auth.login(&config.base_url).await?;
    let session = Session::new(config, Some(auth))?;
    tracing::debug!("session established");
    Ok(session.root(&config.base_url))
}

/// Return the root of the API described by `config` for unsigned access.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn anonymous(config: &SessionConfig) -> Result<Root> {
    let session = Session::new(config, None)?;
    Ok(session.root(&config.base_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Refusing;

    impl Auth for Refusing {
        fn sign(&self, _request: &mut Request) -> Result<()> {
            Err(LpError::Auth("no credentials".to_string()))
        }
    }

    #[test]
    fn test_session_debug() {
        let session = Session::new(&SessionConfig::default(), Some(Arc::new(Refusing))).unwrap();
        let debug = format!("{:?}", session);
        assert!(debug.contains("Session"));
        assert!(debug.contains("authenticated: true"));
    }

    #[test]
    fn test_anonymous_sign_is_noop() {
        let session = Session::anonymous().unwrap();
        let mut request = Request::new(reqwest::Method::GET, "http://e.c/".parse().unwrap());
        session.sign(&mut request).unwrap();
        assert!(request.headers().is_empty());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_sign_failure_propagates() {
        let session = Session::new(&SessionConfig::default(), Some(Arc::new(Refusing))).unwrap();
        let mut request = Request::new(reqwest::Method::GET, "http://e.c/".parse().unwrap());
        let err = session.sign(&mut request).unwrap_err();
        assert!(matches!(err, LpError::Auth(_)));
    }

    #[test]
    fn test_root_locations() {
        let root = anonymous(&SessionConfig::new("http://e.c/base/")).unwrap();
        assert_eq!(root.value().base_loc(), "http://e.c/base/");
        assert_eq!(root.value().loc(), "http://e.c/base/");
        assert!(root.value().fields().is_empty());
    }
}
