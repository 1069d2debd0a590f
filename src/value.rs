//! The dynamic value layer.
//!
//! A [`Value`] is the representation of one remote entity or one page of a
//! collection. Every typed model wraps one and projects its fields.

use serde_json::{Map, Number, Value as Json};

use crate::error::{LpError, Result};
use crate::location::resolve;
use crate::session::Session;

/// A JSON object as returned by the API.
pub type Fields = Map<String, Json>;

/// Field key holding an entity's canonical location.
pub(crate) const SELF_LINK: &str = "self_link";

/// The underlying dynamic representation of an API object.
///
/// A value owns the session used to sign its requests, the base location
/// absolute paths are rooted at, its own location, the fields from the last
/// successful fetch, and the local changes pending the next
/// [`patch`](Value::patch).
///
/// Constructing a value never performs I/O; only [`get`](Value::get),
/// [`post`](Value::post) and [`patch`](Value::patch) touch the network.
#[derive(Debug, Clone)]
pub struct Value {
    pub(crate) session: Session,
    pub(crate) base_loc: String,
    pub(crate) loc: String,
    pub(crate) fields: Fields,
    pub(crate) pending: Fields,
    pub(crate) fetched: bool,
}

impl Value {
    /// Create a value with the provided details.
    ///
    /// Creating values explicitly is rarely necessary; see
    /// [`location`](Value::location) and [`link`](Value::link).
    pub fn new(
        session: Session,
        base_loc: impl Into<String>,
        loc: impl Into<String>,
        fields: Fields,
    ) -> Self {
        Self {
            session,
            base_loc: base_loc.into(),
            loc: loc.into(),
            fields,
            pending: Fields::new(),
            fetched: false,
        }
    }

    /// A value derived from this one, sharing its session and base.
    pub(crate) fn derive(&self, loc: String, fields: Fields) -> Self {
        Self::new(self.session.clone(), self.base_loc.clone(), loc, fields)
    }

    /// The session used to sign requests for this value.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The API root that absolute paths are resolved against.
    pub fn base_loc(&self) -> &str {
        &self.base_loc
    }

    /// The location this value was reached through, updated in place when a
    /// GET follows a redirect.
    pub fn loc(&self) -> &str {
        &self.loc
    }

    /// The canonical location of this value: its `self_link` field when
    /// present, otherwise [`loc`](Value::loc).
    pub fn abs_loc(&self) -> &str {
        match self.fields.get(SELF_LINK) {
            Some(Json::String(link)) if !link.is_empty() => link,
            _ => &self.loc,
        }
    }

    /// Fields of the last fetched representation, plus local changes.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Mutable access to the fields. Changes made here are not recorded
    /// as pending; use [`set_field`](Value::set_field) for those.
    pub fn fields_mut(&mut self) -> &mut Fields {
        &mut self.fields
    }

    /// Local changes not yet sent with [`patch`](Value::patch).
    pub fn pending_changes(&self) -> &Fields {
        &self.pending
    }

    /// Whether a request against this value has completed successfully.
    pub fn is_fetched(&self) -> bool {
        self.fetched
    }

    /// The named field if it is a string, or `""` otherwise.
    pub fn string_field(&self, key: &str) -> &str {
        self.fields.get(key).and_then(Json::as_str).unwrap_or("")
    }

    /// The named field if it is a number, truncated to an integer, or `0`
    /// otherwise.
    pub fn int_field(&self, key: &str) -> i64 {
        match self.fields.get(key) {
            Some(Json::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// The named field if it is a number, or `0.0` otherwise.
    pub fn float_field(&self, key: &str) -> f64 {
        self.fields.get(key).and_then(Json::as_f64).unwrap_or(0.0)
    }

    /// The named field if it is a boolean, or `false` otherwise.
    pub fn bool_field(&self, key: &str) -> bool {
        self.fields.get(key).and_then(Json::as_bool).unwrap_or(false)
    }

    /// Change the named field.
    ///
    /// The new value is visible immediately through the field getters and
    /// is recorded for the next [`patch`](Value::patch). Only integers,
    /// strings and booleans are accepted; integers are stored as JSON
    /// floating-point numbers, matching what the API sends.
    pub fn set_field(&mut self, key: &str, value: impl FieldValue) {
        let json = value.into_json();
        self.pending.insert(key.to_string(), json.clone());
        self.fields.insert(key.to_string(), json);
    }

    /// A new, unfetched value for `loc`, which may be a full URL, a path
    /// rooted at [`base_loc`](Value::base_loc) when it starts with `/`, or a
    /// path relative to this value's own location.
    pub fn location(&self, loc: &str) -> Value {
        self.derive(resolve(&self.base_loc, &self.loc, loc), Fields::new())
    }

    /// Follow the location stored in the string field `key`.
    ///
    /// Returns `None` when the field is absent or not a string; many links
    /// are optional.
    pub fn link(&self, key: &str) -> Option<Value> {
        match self.fields.get(key) {
            Some(Json::String(loc)) => Some(self.location(loc)),
            _ => None,
        }
    }

    /// Like [`link`](Value::link), failing when the field is missing.
    ///
    /// # Errors
    ///
    /// Returns [`LpError::MissingLink`] when `key` holds no location.
    pub fn required_link(&self, key: &str) -> Result<Value> {
        self.link(key)
            .ok_or_else(|| LpError::MissingLink(key.to_string()))
    }

    /// Total number of entries in a collection.
    pub fn total_size(&self) -> i64 {
        self.int_field("total_size")
    }

    /// Offset of the first entry of this collection page.
    pub fn start_index(&self) -> i64 {
        self.int_field("start")
    }
}

/// Field kinds accepted by [`Value::set_field`].
pub trait FieldValue: sealed::Sealed {
    #[doc(hidden)]
    fn into_json(self) -> Json;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! int_field_value {
    ($($ty:ty),*) => {$(
        impl sealed::Sealed for $ty {}

        impl FieldValue for $ty {
            fn into_json(self) -> Json {
                Number::from_f64(self as f64).map_or(Json::Null, Json::Number)
            }
        }
    )*};
}

int_field_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl sealed::Sealed for bool {}

impl FieldValue for bool {
    fn into_json(self) -> Json {
        Json::Bool(self)
    }
}

impl sealed::Sealed for &str {}

impl FieldValue for &str {
    fn into_json(self) -> Json {
        Json::String(self.to_string())
    }
}

impl sealed::Sealed for String {}

impl FieldValue for String {
    fn into_json(self) -> Json {
        Json::String(self)
    }
}
