//! Trait definitions shared by the typed models.
//!
//! Every model holds a [`Value`](crate::Value) and implements [`Entity`];
//! lookups and updates are added by the traits each model supports.

mod entity;
mod get;
mod update;

pub use entity::Entity;
pub(crate) use entity::impl_entity;
pub use get::Get;
pub use update::Update;
