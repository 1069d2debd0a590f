//! Project model.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Root;
use crate::params::Params;
use crate::traits::{impl_entity, Entity, Get, Update};
use crate::value::Value;

/// A project.
///
/// A project's title might be "The Foo Project" while its display name is
/// "Foo" and its name, used in URLs, is "foo".
#[derive(Debug, Clone)]
pub struct Project(Value);

impl_entity!(Project);

impl Update for Project {}

impl Project {
    /// The short name used in URLs: at least one lowercase letter or
    /// number, followed by letters, numbers, dots, hyphens or pluses.
    pub fn name(&self) -> &str {
        self.0.string_field("name")
    }

    /// The name as it would be displayed in a paragraph.
    pub fn display_name(&self) -> &str {
        self.0.string_field("display_name")
    }

    /// The title as it might be used in isolation.
    pub fn title(&self) -> &str {
        self.0.string_field("title")
    }

    /// A short paragraph introducing the project's work.
    pub fn summary(&self) -> &str {
        self.0.string_field("summary")
    }

    pub fn description(&self) -> &str {
        self.0.string_field("description")
    }

    /// URL of the project's page in a browser.
    pub fn web_page(&self) -> &str {
        self.0.string_field("web_link")
    }

    pub fn set_name(&mut self, name: &str) {
        self.0.set_field("name", name);
    }

    pub fn set_display_name(&mut self, name: &str) {
        self.0.set_field("display_name", name);
    }

    pub fn set_title(&mut self, title: &str) {
        self.0.set_field("title", title);
    }

    pub fn set_summary(&mut self, summary: &str) {
        self.0.set_field("summary", summary);
    }

    pub fn set_description(&mut self, description: &str) {
        self.0.set_field("description", description);
    }
}

#[async_trait]
impl Get for Project {
    type Id = String; // Project name

    #[tracing::instrument(skip(root))]
    async fn get(root: &Root, name: String) -> Result<Self> {
        let path = format!("/{}", urlencoding::encode(&name));
        let value = root.value().location(&path).fetch(&Params::new()).await?;
        Ok(Self(value))
    }
}
