//! People, teams and IRC nicknames.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{LpError, Result};
use crate::models::{date_field, Root};
use crate::pagination::Collection;
use crate::params::Params;
use crate::traits::{impl_entity, Entity, Get, Update};
use crate::value::Value;

/// A person.
#[derive(Debug, Clone)]
pub struct Person(Value);

impl_entity!(Person);

impl Update for Person {}

impl Person {
    /// The short unique name used in URLs.
    pub fn name(&self) -> &str {
        self.0.string_field("name")
    }

    /// The person's name as displayed throughout the site. Most people
    /// use their full name.
    pub fn display_name(&self) -> &str {
        self.0.string_field("display_name")
    }

    /// URL of the person's page in a browser.
    pub fn web_page(&self) -> &str {
        self.0.string_field("web_link")
    }

    pub fn date_created(&self) -> Option<DateTime<Utc>> {
        date_field(&self.0, "date_created")
    }

    pub fn set_display_name(&mut self, name: &str) {
        self.0.set_field("display_name", name);
    }

    /// All IRC nicknames registered by the person.
    ///
    /// # Errors
    ///
    /// Fails if the person has no nickname collection link or a page
    /// cannot be fetched.
    pub async fn irc_nicks(&self) -> Result<Vec<IrcNick>> {
        let list = self
            .0
            .required_link("irc_nicknames_collection_link")?
            .fetch(&Params::new())
            .await?;
        Collection::<IrcNick>::from_value(list).all().await
    }
}

#[async_trait]
impl Get for Person {
    type Id = String; // Username

    #[tracing::instrument(skip(root))]
    async fn get(root: &Root, name: String) -> Result<Self> {
        let value = root.member_value(&name).await?;
        if value.bool_field("is_team") {
            return Err(LpError::UnexpectedKind {
                name,
                expected: "a team, not a person",
            });
        }
        Ok(Self(value))
    }
}

/// A team.
#[derive(Debug, Clone)]
pub struct Team(Value);

impl_entity!(Team);

impl Update for Team {}

impl Team {
    /// The short unique name used in URLs.
    pub fn name(&self) -> &str {
        self.0.string_field("name")
    }

    pub fn display_name(&self) -> &str {
        self.0.string_field("display_name")
    }

    /// URL of the team's page in a browser.
    pub fn web_page(&self) -> &str {
        self.0.string_field("web_link")
    }

    pub fn set_name(&mut self, name: &str) {
        self.0.set_field("name", name);
    }

    pub fn set_display_name(&mut self, name: &str) {
        self.0.set_field("display_name", name);
    }

    /// Direct members of the team, people and teams alike.
    ///
    /// # Errors
    ///
    /// Fails if the team has no member collection link or the first page
    /// cannot be fetched.
    pub async fn members(&self) -> Result<Collection<Member>> {
        let list = self
            .0
            .required_link("members_collection_link")?
            .fetch(&Params::new())
            .await?;
        Ok(Collection::from_value(list))
    }
}

#[async_trait]
impl Get for Team {
    type Id = String; // Team name

    #[tracing::instrument(skip(root))]
    async fn get(root: &Root, name: String) -> Result<Self> {
        let value = root.member_value(&name).await?;
        if !value.bool_field("is_team") {
            return Err(LpError::UnexpectedKind {
                name,
                expected: "not a team",
            });
        }
        Ok(Self(value))
    }
}

/// Either a person or a team, decided by the `is_team` field.
#[derive(Debug, Clone)]
pub enum Member {
    Person(Person),
    Team(Team),
}

impl Member {
    pub fn is_team(&self) -> bool {
        matches!(self, Member::Team(_))
    }

    pub fn as_person(&self) -> Option<&Person> {
        match self {
            Member::Person(p) => Some(p),
            Member::Team(_) => None,
        }
    }

    pub fn as_team(&self) -> Option<&Team> {
        match self {
            Member::Team(t) => Some(t),
            Member::Person(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        self.value().string_field("name")
    }

    pub fn display_name(&self) -> &str {
        self.value().string_field("display_name")
    }
}

impl Entity for Member {
    fn from_value(value: Value) -> Self {
        if value.bool_field("is_team") {
            Member::Team(Team(value))
        } else {
            Member::Person(Person(value))
        }
    }

    fn value(&self) -> &Value {
        match self {
            Member::Person(p) => p.value(),
            Member::Team(t) => t.value(),
        }
    }

    fn value_mut(&mut self) -> &mut Value {
        match self {
            Member::Person(p) => p.value_mut(),
            Member::Team(t) => t.value_mut(),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Member::Person(p) => p.into_value(),
            Member::Team(t) => t.into_value(),
        }
    }
}

/// A nickname on an IRC network.
#[derive(Debug, Clone)]
pub struct IrcNick(Value);

impl_entity!(IrcNick);

impl Update for IrcNick {}

impl IrcNick {
    pub fn nick(&self) -> &str {
        self.0.string_field("nickname")
    }

    /// The IRC network this nick is associated to.
    pub fn network(&self) -> &str {
        self.0.string_field("network")
    }

    pub fn set_nick(&mut self, nick: &str) {
        self.0.set_field("nickname", nick);
    }

    pub fn set_network(&mut self, network: &str) {
        self.0.set_field("network", network);
    }
}
