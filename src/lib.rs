//! Launchpad API client library.
//!
//! A Rust library for the Launchpad REST API built on a small dynamic
//! layer: a [`Value`] represents one remote object or one collection page,
//! resolves locations, follows `*_link` fields, performs signed GET, POST
//! and PATCH requests, and pages through collections. Typed models such as
//! [`Person`] or [`Bug`] hold a value and project its fields.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use lpapi::{Auth, Entity, SessionConfig, Update};
//!
//! # async fn example(auth: Arc<dyn Auth>) -> lpapi::Result<()> {
//! let root = lpapi::login(&SessionConfig::from_env()?, auth).await?;
//!
//! // Typed access
//! let mut me = root.me().await?;
//! println!("Hello, {}", me.display_name());
//! me.set_display_name("Joe Doe");
//! me.update().await?;
//!
//! // Dynamic access to anything the models do not cover
//! let people = root
//!     .value()
//!     .location("/people")
//!     .fetch(&lpapi::Params::op("find").with("text", "joe"))
//!     .await?;
//! people
//!     .for_each(|entry| {
//!         println!("{}", entry.string_field("display_name"));
//!         Ok::<_, lpapi::LpError>(())
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`Session`] owns the HTTP connection pool and the optional [`Auth`]
//!   signer; every value carries a cheap clone of it.
//! - [`Value`] is the dynamic layer: fields, locations, links, requests,
//!   collection iteration.
//! - [`Entity`], [`Get`] and [`Update`] are the traits typed models
//!   implement on top of it.
//!
//! # Configuration
//!
//! [`SessionConfig::from_env`] reads:
//!
//! - `LAUNCHPAD_API_URL` (optional) - API root, or `production` / `staging`
//! - `LAUNCHPAD_DUMP_HTTP` (optional) - `1` to log request and response
//!   headers under the `lpapi::wire` tracing target

mod config;
mod error;
mod location;
mod models;
mod pagination;
mod params;
mod request;
mod session;
mod traits;
mod value;

// Re-export core types
pub use config::{SessionConfig, PRODUCTION, STAGING};
pub use error::{LpError, Result};
pub use location::{is_absolute_url, resolve};
pub use pagination::Collection;
pub use params::Params;
pub use request::MAX_REDIRECTS;
pub use session::{anonymous, login, Auth, Session};
pub use value::{FieldValue, Fields, Value};

// Re-export traits
pub use traits::{Entity, Get, Update};

// Re-export models
pub use models::{
    // Bug types
    Bug,
    BugStatus,
    BugStub,
    BugTask,
    Importance,
    // People types
    IrcNick,
    Member,
    Person,
    Team,
    // Project types
    Project,
    // Entry point
    Root,
};
