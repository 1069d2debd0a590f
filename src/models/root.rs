//! The API root.

use crate::error::Result;
use crate::models::{Bug, BugStub, Member, Person, Project, Team};
use crate::pagination::Collection;
use crate::params::Params;
use crate::traits::{impl_entity, Entity, Get};
use crate::value::Value;

/// The entrance to the API, as returned by [`login`](crate::login).
#[derive(Debug, Clone)]
pub struct Root(Value);

impl_entity!(Root);

impl Root {
    /// The person authenticated in the current session.
    #[tracing::instrument(skip(self))]
    pub async fn me(&self) -> Result<Person> {
        let value = self.0.location("/people/+me").fetch(&Params::new()).await?;
        Ok(Person::from_value(value))
    }

    /// The person with the given username.
    ///
    /// # Errors
    ///
    /// Fails if the name belongs to a team.
    pub async fn person(&self, name: &str) -> Result<Person> {
        Person::get(self, name.to_string()).await
    }

    /// The team with the given name.
    ///
    /// # Errors
    ///
    /// Fails if the name belongs to a person.
    pub async fn team(&self, name: &str) -> Result<Team> {
        Team::get(self, name.to_string()).await
    }

    /// The person or team with the given name.
    #[tracing::instrument(skip(self))]
    pub async fn member(&self, name: &str) -> Result<Member> {
        let value = self.member_value(name).await?;
        Ok(Member::from_value(value))
    }

    /// People whose name, display name or email address match `text`.
    pub async fn find_people(&self, text: &str) -> Result<Collection<Person>> {
        self.find("findPerson", text).await
    }

    /// Teams whose name, display name or email address match `text`.
    pub async fn find_teams(&self, text: &str) -> Result<Collection<Team>> {
        self.find("findTeam", text).await
    }

    /// People and teams whose name, display name or email address match
    /// `text`.
    pub async fn find_members(&self, text: &str) -> Result<Collection<Member>> {
        self.find("find", text).await
    }

    /// The project with the given name.
    pub async fn project(&self, name: &str) -> Result<Project> {
        Project::get(self, name.to_string()).await
    }

    /// The bug with the given number.
    pub async fn bug(&self, id: i64) -> Result<Bug> {
        Bug::get(self, id).await
    }

    /// Create a new bug with an appropriate bug task and return it.
    #[tracing::instrument(skip(self, stub), fields(title = %stub.title))]
    pub async fn create_bug(&self, stub: &BugStub) -> Result<Bug> {
        let mut params = Params::op("createBug")
            .with("title", stub.title.as_str())
            .with("description", stub.description.as_str())
            .with("target", stub.target.as_str());
        if !stub.tags.is_empty() {
            params.insert("tags", stub.tags.join(" "));
        }
        if stub.private {
            params.insert("private", "true");
        }
        if stub.security_related {
            params.insert("security_related", "true");
        }

        let value = self.0.location("/bugs").post(&params).await?;
        Ok(Bug::from_value(value))
    }

    pub(crate) async fn member_value(&self, name: &str) -> Result<Value> {
        let path = format!("/~{}", urlencoding::encode(name));
        self.0.location(&path).fetch(&Params::new()).await
    }

    async fn find<T: Entity>(&self, op: &str, text: &str) -> Result<Collection<T>> {
        let params = Params::op(op).with("text", text);
        let value = self.0.location("/people").fetch(&params).await?;
        Ok(Collection::from_value(value))
    }
}
