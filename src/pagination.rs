//! Collection iteration.
//!
//! A collection page is a value whose fields hold `total_size`, `start`,
//! an `entries` array and, when more pages follow, a
//! `next_collection_link`. Iteration visits the loaded entries in order and
//! fetches the next page on demand.

use std::marker::PhantomData;

use serde_json::Value as Json;

use crate::error::{LpError, Result};
use crate::params::Params;
use crate::traits::Entity;
use crate::value::{Fields, Value, SELF_LINK};

const ENTRIES: &str = "entries";
const NEXT_COLLECTION_LINK: &str = "next_collection_link";

impl Value {
    /// Call `visit` for every entry of this collection, across all pages.
    ///
    /// Each entry becomes a value located at its `self_link` and holding the
    /// entry's fields, so no request is made per entry. When the loaded page
    /// is exhausted the `next_collection_link` page is fetched and iteration
    /// continues. Watch out for very large collections.
    ///
    /// The visitor may use its own error type, as long as it can absorb an
    /// [`LpError`]; returning an error stops the iteration immediately.
    ///
    /// # Errors
    ///
    /// Returns [`LpError::NoEntries`] when a page has no `entries` array,
    /// any error from fetching a following page, or the visitor's error.
    pub async fn for_each<F, E>(&self, mut visit: F) -> core::result::Result<(), E>
    where
        F: FnMut(Value) -> core::result::Result<(), E>,
        E: From<LpError>,
    {
        let mut fetched: Option<Value> = None;
        let mut pages = 1usize;

        loop {
            let page = fetched.as_ref().unwrap_or(self);
            let entries = page
                .fields
                .get(ENTRIES)
                .and_then(Json::as_array)
                .ok_or(LpError::NoEntries)?;

            for entry in entries {
                let Some(map) = entry.as_object() else {
                    tracing::warn!(loc = page.abs_loc(), "skipping non-object collection entry");
                    continue;
                };
                visit(page.entry(map))?;
            }

            let Some(next) = page.link(NEXT_COLLECTION_LINK) else {
                break;
            };
            pages += 1;
            tracing::debug!(page = pages, loc = next.loc(), "fetching next collection page");
            fetched = Some(next.fetch(&Params::new()).await?);
        }

        Ok(())
    }

    /// Collect every entry of this collection, across all pages.
    ///
    /// # Errors
    ///
    /// Same as [`for_each`](Value::for_each).
    pub async fn entries(&self) -> Result<Vec<Value>> {
        let mut all = Vec::new();
        self.for_each(|entry| {
            all.push(entry);
            Ok::<_, LpError>(())
        })
        .await?;
        Ok(all)
    }

    fn entry(&self, map: &Fields) -> Value {
        let loc = map
            .get(SELF_LINK)
            .and_then(Json::as_str)
            .unwrap_or_default()
            .to_string();
        let mut value = self.derive(loc, map.clone());
        value.fetched = true;
        value
    }
}

/// A collection whose entries are projected as `T`.
///
/// Heterogeneous collections work the same way: `T` decides per entry
/// which variant it becomes (see [`Member`](crate::Member)).
#[derive(Debug, Clone)]
pub struct Collection<T> {
    value: Value,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Collection<T> {
    /// Total number of entries across all pages.
    pub fn total_size(&self) -> i64 {
        self.value.total_size()
    }

    /// Offset of the first entry of the loaded page.
    pub fn start_index(&self) -> i64 {
        self.value.start_index()
    }

    /// Call `visit` for every entry, fetching further pages as needed.
    ///
    /// # Errors
    ///
    /// Same as [`Value::for_each`].
    pub async fn for_each<F, E>(&self, mut visit: F) -> core::result::Result<(), E>
    where
        F: FnMut(T) -> core::result::Result<(), E>,
        E: From<LpError>,
    {
        self.value
            .for_each(|entry| visit(T::from_value(entry)))
            .await
    }

    /// Collect every entry, fetching further pages as needed.
    ///
    /// # Errors
    ///
    /// Same as [`Value::for_each`].
    pub async fn all(&self) -> Result<Vec<T>> {
        let mut all = Vec::new();
        self.for_each(|entry| {
            all.push(entry);
            Ok::<_, LpError>(())
        })
        .await?;
        Ok(all)
    }
}

impl<T: Entity> Entity for Collection<T> {
    fn from_value(value: Value) -> Self {
        Self {
            value,
            _entity: PhantomData,
        }
    }

    fn value(&self) -> &Value {
        &self.value
    }

    fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    fn into_value(self) -> Value {
        self.value
    }
}
