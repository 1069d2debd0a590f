//! Typed models over the value layer.
//!
//! Each model holds a [`Value`](crate::Value) and projects named fields
//! out of it. Setters only record changes; call
//! [`Update::update`](crate::Update::update) to commit them.

mod bug;
mod person;
mod project;
mod root;

pub use bug::*;
pub use person::*;
pub use project::*;
pub use root::*;

use chrono::{DateTime, Utc};

use crate::value::Value;

/// Parse an RFC 3339 timestamp field, as the API formats dates.
fn date_field(value: &Value, key: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.string_field(key))
        .ok()
        .map(|d| d.with_timezone(&Utc))
}
