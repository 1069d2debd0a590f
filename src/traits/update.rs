//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::Entity;

/// Commit local changes to an existing entity.
///
/// Setters on the models only record changes; `update` sends them all in
/// a single PATCH.
///
/// # Example
///
/// ```ignore
/// use lpapi::{Get, Bug, Update};
///
/// let mut bug = Bug::get(&root, 1).await?;
/// bug.set_title("Crash on startup");
/// bug.set_tags(&["crash", "startup"]);
/// bug.update().await?;
/// ```
#[async_trait]
pub trait Update: Entity {
    /// Send pending changes to the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// changes.
    async fn update(&mut self) -> Result<()> {
        self.value_mut().patch().await
    }

    /// Whether there are changes not yet sent.
    fn is_dirty(&self) -> bool {
        !self.value().pending_changes().is_empty()
    }
}
