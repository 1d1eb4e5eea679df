use std::collections::HashMap;

use serde::Serialize;

use crate::models::{EntityId, Identified};

/// Outcome of following a reference into a loaded collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolved<T> {
    Found(T),
    /// Referenced id absent from the collection
    Unresolved { id: EntityId },
}

impl<T> Resolved<T> {
    pub fn found(&self) -> Option<&T> {
        match self {
            Resolved::Found(value) => Some(value),
            Resolved::Unresolved { .. } => None,
        }
    }

    pub fn into_found(self) -> Option<T> {
        match self {
            Resolved::Found(value) => Some(value),
            Resolved::Unresolved { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolved::Found(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        match self {
            Resolved::Found(value) => Resolved::Found(f(value)),
            Resolved::Unresolved { id } => Resolved::Unresolved { id },
        }
    }
}

impl<T: Clone> Resolved<&T> {
    pub fn cloned(self) -> Resolved<T> {
        self.map(T::clone)
    }
}

impl<T> Resolved<&T> {
    /// Display text: `field` of the found record as is, or a placeholder naming the
    /// missing id.
    pub fn label(&self, field: impl FnOnce(&T) -> &str) -> String {
        match self {
            Resolved::Found(value) => field(*value).to_string(),
            Resolved::Unresolved { id } => format!("#{} (not loaded)", id),
        }
    }
}

/// Id index over a borrowed collection. Records without an id are not indexed.
pub struct Lookup<'a, T> {
    by_id: HashMap<EntityId, &'a T>,
}

impl<'a, T: Identified> Lookup<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        let mut by_id = HashMap::with_capacity(items.len());
        for item in items {
            if let Some(id) = item.id() {
                // First occurrence wins, like a linear find
                by_id.entry(id).or_insert(item);
            }
        }
        Self { by_id }
    }

    pub fn resolve(&self, id: EntityId) -> Resolved<&'a T> {
        match self.by_id.get(&id) {
            Some(item) => Resolved::Found(*item),
            None => Resolved::Unresolved { id },
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&'a T> {
        self.by_id.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
