//! HTTP actions on values.
//!
//! GET, POST and PATCH all go through [`Value::perform`], which builds the
//! request, signs it, sends it without transport-level redirect handling,
//! and funnels every response through the same status and JSON checks.

use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE, LOCATION};
use reqwest::{Method, Response, StatusCode};
use serde_json::Value as Json;
use url::Url;

use crate::error::{LpError, Result};
use crate::params::Params;
use crate::value::{Fields, Value};

/// Maximum redirect hops followed by a single GET.
pub const MAX_REDIRECTS: usize = 10;

/// Non-standard success status the API uses for responses carrying the
/// updated representation.
const CONTENT_RETURNED: u16 = 209;

const JSON_MIME: &str = "application/json";

/// What a single request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Get,
    Post,
    Patch,
}

impl Action {
    fn method(self) -> Method {
        match self {
            Action::Get => Method::GET,
            Action::Post => Method::POST,
            Action::Patch => Method::PATCH,
        }
    }
}

/// A response with its body fully read.
struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Reply {
    async fn read(response: Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    fn header(&self, name: reqwest::header::HeaderName) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
    }

    /// Accept 200 and 209, surfacing anything else with its body.
    fn ensure_ok(&self) -> Result<()> {
        match self.status.as_u16() {
            200 | CONTENT_RETURNED => Ok(()),
            status => Err(LpError::Http {
                status,
                body: String::from_utf8_lossy(&self.body).into_owned(),
            }),
        }
    }

    /// Decode the body as a field map, wrapping a top-level array as
    /// `{"value": [...]}`.
    fn fields(&self) -> Result<Fields> {
        let ctype = self.header(CONTENT_TYPE).unwrap_or_default();
        if ctype != JSON_MIME {
            return Err(LpError::ContentType(ctype.to_string()));
        }

        match serde_json::from_slice::<Json>(&self.body)? {
            Json::Object(map) => Ok(map),
            Json::Array(items) => {
                let mut map = Fields::new();
                map.insert("value".to_string(), Json::Array(items));
                Ok(map)
            }
            other => Err(<serde_json::Error as serde::de::Error>::custom(format!(
                "expected a JSON object or array, found {other}"
            ))
            .into()),
        }
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307)
}

/// Resolve a `Location` header against the URL that produced it.
fn redirect_target(from: &str, location: &str) -> Result<String> {
    match Url::parse(location) {
        Ok(url) => Ok(url.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Ok(Url::parse(from)?.join(location)?.to_string())
        }
        Err(err) => Err(err.into()),
    }
}

impl Value {
    /// Issue a GET for this value and replace its fields with the response.
    ///
    /// `params` are appended to any query string already present on the
    /// value's location. Redirects are followed, updating
    /// [`loc`](Value::loc) to the final target.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// status other than 200 or 209, a redirect lacks a `Location`, or the
    /// body is not JSON. Fields are left untouched on failure.
    pub async fn get(&mut self, params: &Params) -> Result<()> {
        self.perform(Action::Get, params).await.map(|_| ())
    }

    /// Consuming form of [`get`](Value::get), convenient for chains:
    ///
    /// ```no_run
    /// # async fn example(root: lpapi::Value) -> lpapi::Result<()> {
    /// let me = root.location("/people/+me").fetch(&Default::default()).await?;
    /// println!("{}", me.string_field("display_name"));
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`get`](Value::get).
    pub async fn fetch(mut self, params: &Params) -> Result<Value> {
        self.get(params).await?;
        Ok(self)
    }

    /// Issue a POST performing an action at this value's location.
    ///
    /// The result is always a new value; `self` is not modified. When the
    /// server answers `201 Created` with a `Location`, the new value is
    /// fetched from there. Otherwise it keeps this value's location and
    /// takes its fields from the response body.
    ///
    /// # Errors
    ///
    /// Same conditions as [`get`](Value::get), applied to the POST response
    /// or to the follow-up GET.
    pub async fn post(&self, params: &Params) -> Result<Value> {
        let mut result = self.derive(self.abs_loc().to_string(), Fields::new());
        match result.perform(Action::Post, params).await? {
            Some(created) => {
                result.loc = created;
                result.get(&Params::new()).await?;
                Ok(result)
            }
            None => Ok(result),
        }
    }

    /// Issue a PATCH sending the pending changes made with
    /// [`set_field`](Value::set_field).
    ///
    /// A `209` response replaces the fields with the returned
    /// representation; any other success leaves them as they are. Pending
    /// changes are cleared once the server accepts them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with a
    /// non-success status.
    pub async fn patch(&mut self) -> Result<()> {
        self.perform(Action::Patch, &Params::new()).await?;
        self.pending.clear();
        Ok(())
    }

    /// Run one action to completion.
    ///
    /// Returns the created location for a `201` POST, which the caller
    /// fetches separately.
    #[tracing::instrument(skip(self, params), fields(loc = %self.abs_loc()))]
    async fn perform(&mut self, action: Action, params: &Params) -> Result<Option<String>> {
        let mut target = self.abs_loc().to_string();

        for _ in 0..=MAX_REDIRECTS {
            let reply = self.send(action, &target, params).await?;
            let status = reply.status;

            match action {
                Action::Get if is_redirect(status) => {
                    let location =
                        reply
                            .header(LOCATION)
                            .ok_or(LpError::MissingRedirectLocation {
                                status: status.as_u16(),
                            })?;
                    target = redirect_target(&target, location)?;
                    tracing::debug!(status = status.as_u16(), to = %target, "following redirect");
                    self.loc = target.clone();
                    continue;
                }
                Action::Post if status == StatusCode::CREATED => {
                    if let Some(location) = reply.header(LOCATION) {
                        return Ok(Some(redirect_target(&target, location)?));
                    }
                }
                Action::Patch if status.is_success() && status.as_u16() != CONTENT_RETURNED => {
                    self.fetched = true;
                    return Ok(None);
                }
                _ => {}
            }

            reply.ensure_ok()?;
            self.fields = reply.fields()?;
            self.fetched = true;
            return Ok(None);
        }

        tracing::warn!(limit = MAX_REDIRECTS, "redirect limit reached");
        Err(LpError::TooManyRedirects(MAX_REDIRECTS))
    }

    /// Build, sign and send a single request.
    async fn send(&self, action: Action, target: &str, params: &Params) -> Result<Reply> {
        let http = self.session.http();
        let url = Url::parse(target)?;

        let mut builder = http
            .request(action.method(), url)
            .header(ACCEPT, JSON_MIME);

        builder = match action {
            Action::Get if !params.is_empty() => builder.query(params),
            Action::Get => builder,
            Action::Post => builder.form(params),
            Action::Patch => builder.json(&self.pending),
        };

        let mut request = builder.build()?;
        self.session.sign(&mut request)?;

        if self.session.dump_http() {
            tracing::debug!(
                target: "lpapi::wire",
                method = %request.method(),
                url = %request.url(),
                headers = ?request.headers(),
                "request"
            );
        }

        let response = http.execute(request).await?;
        let reply = Reply::read(response).await?;

        if self.session.dump_http() {
            tracing::debug!(
                target: "lpapi::wire",
                status = reply.status.as_u16(),
                headers = ?reply.headers,
                body_len = reply.body.len(),
                "response"
            );
        }
        tracing::debug!(
            method = %action.method(),
            url = target,
            status = reply.status.as_u16(),
            "request completed"
        );

        Ok(reply)
    }
}
