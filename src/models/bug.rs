//! Bugs and bug tasks.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{date_field, Person, Root};
use crate::pagination::Collection;
use crate::params::Params;
use crate::traits::{impl_entity, Entity, Get, Update};
use crate::value::Value;

/// Details necessary for creating a new bug with
/// [`Root::create_bug`].
#[derive(Debug, Clone, Default)]
pub struct BugStub {
    /// Required.
    pub title: String,
    /// Required.
    pub description: String,
    /// Location of the project, source package, or distribution.
    pub target: String,
    pub private: bool,
    pub security_related: bool,
    pub tags: Vec<String>,
}

/// A bug.
#[derive(Debug, Clone)]
pub struct Bug(Value);

impl_entity!(Bug);

impl Update for Bug {}

impl Bug {
    /// The bug number.
    pub fn id(&self) -> i64 {
        self.0.int_field("id")
    }

    /// The short bug summary.
    pub fn title(&self) -> &str {
        self.0.string_field("title")
    }

    pub fn description(&self) -> &str {
        self.0.string_field("description")
    }

    pub fn tags(&self) -> Vec<&str> {
        self.0.string_field("tags").split_whitespace().collect()
    }

    pub fn private(&self) -> bool {
        self.0.bool_field("private")
    }

    /// Whether the bug describes a security vulnerability.
    pub fn security_related(&self) -> bool {
        self.0.bool_field("security_related")
    }

    pub fn date_created(&self) -> Option<DateTime<Utc>> {
        date_field(&self.0, "date_created")
    }

    pub fn set_title(&mut self, title: &str) {
        self.0.set_field("title", title);
    }

    pub fn set_description(&mut self, description: &str) {
        self.0.set_field("description", description);
    }

    pub fn set_tags<S: AsRef<str>>(&mut self, tags: &[S]) {
        let joined = tags.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
        self.0.set_field("tags", joined);
    }

    pub fn set_private(&mut self, private: bool) {
        self.0.set_field("private", private);
    }

    pub fn set_security_related(&mut self, related: bool) {
        self.0.set_field("security_related", related);
    }

    /// The bug tasks associating this bug with its targets.
    ///
    /// # Errors
    ///
    /// Fails if the bug has no task collection link or the first page
    /// cannot be fetched.
    pub async fn tasks(&self) -> Result<Collection<BugTask>> {
        let list = self
            .0
            .required_link("bug_tasks_collection_link")?
            .fetch(&Params::new())
            .await?;
        Ok(Collection::from_value(list))
    }
}

#[async_trait]
impl Get for Bug {
    type Id = i64; // Bug number

    #[tracing::instrument(skip(root))]
    async fn get(root: &Root, id: i64) -> Result<Self> {
        let path = format!("/bugs/{id}");
        let value = root.value().location(&path).fetch(&Params::new()).await?;
        Ok(Self(value))
    }
}

/// Generates a string-backed enum with a fallback for values this crate
/// does not know about.
macro_rules! api_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            /// The wire representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),*
                }
            }

            /// Parse the wire representation, falling back to `Unknown`.
            pub fn from_api(text: &str) -> Self {
                match text {
                    $($text => $name::$variant,)*
                    _ => $name::Unknown,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

api_enum!(
    /// Status of a bug task.
    BugStatus {
        Unknown => "Unknown",
        New => "New",
        Incomplete => "Incomplete",
        Opinion => "Opinion",
        Invalid => "Invalid",
        WontFix => "Won't Fix",
        Expired => "Expired",
        Confirmed => "Confirmed",
        Triaged => "Triaged",
        InProgress => "In Progress",
        FixCommitted => "Fix Committed",
        FixReleased => "Fix Released",
    }
);

api_enum!(
    /// Importance of a bug task.
    Importance {
        Unknown => "Unknown",
        Critical => "Critical",
        High => "High",
        Medium => "Medium",
        Low => "Low",
        Wishlist => "Wishlist",
        Undecided => "Undecided",
    }
);

/// The association of a bug with a project or source package.
#[derive(Debug, Clone)]
pub struct BugTask(Value);

impl_entity!(BugTask);

impl Update for BugTask {}

impl BugTask {
    pub fn status(&self) -> BugStatus {
        BugStatus::from_api(self.0.string_field("status"))
    }

    pub fn importance(&self) -> Importance {
        Importance::from_api(self.0.string_field("importance"))
    }

    /// The person currently assigned to work on the task, if any.
    ///
    /// # Errors
    ///
    /// Fails if the assignee cannot be fetched.
    pub async fn assignee(&self) -> Result<Option<Person>> {
        match self.0.link("assignee_link") {
            Some(link) => Ok(Some(Person::from_value(link.fetch(&Params::new()).await?))),
            None => Ok(None),
        }
    }

    pub fn set_status(&mut self, status: BugStatus) {
        self.0.set_field("status", status.as_str());
    }

    pub fn set_importance(&mut self, importance: Importance) {
        self.0.set_field("importance", importance.as_str());
    }

    pub fn set_assignee(&mut self, person: &Person) {
        self.0.set_field("assignee_link", person.abs_loc());
    }
}
