//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Root;
use crate::params::Params;
use crate::traits::Entity;

/// Fetch a single entity by its identifier.
///
/// Implement this trait for entity types that can be looked up directly
/// from the API root.
///
/// # Example
///
/// ```ignore
/// use lpapi::{Get, Person};
///
/// let root = lpapi::login(&config, auth).await?;
/// let joe = Person::get(&root, "joe".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Entity {
    /// The identifier type for this entity (name, numeric id, ...).
    type Id: Send;

    /// Fetch the entity by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(root: &Root, id: Self::Id) -> Result<Self>;

    /// Re-fetch the entity in place, discarding the loaded fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn refresh(&mut self) -> Result<()> {
        self.value_mut().get(&Params::new()).await
    }
}
