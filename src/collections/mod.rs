//! Model collections
//!
//! This module provides an insertion-ordered collection for any model type
//! that implements `EntityModel`, and the case store built on top of it.
//! Insertion order is part of the contract: retrieval uses it to break ties.

pub mod case_store;

pub use case_store::CaseStore;

use crate::models::EntityModel;
use rustc_hash::FxHashMap;

/// Insertion-ordered model collection with an id index
///
/// Models are stored in a `Vec` in the order they were added, with an
/// `FxHashMap` from identifier to position for constant-time lookup.
#[derive(Debug, Clone)]
pub struct OrderedCollection<T: EntityModel> {
    /// Models in insertion order
    items: Vec<T>,
    /// Position of each model by ID
    index: FxHashMap<T::Id, usize>,
}

impl<T: EntityModel> OrderedCollection<T> {
    /// Create a new empty collection
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Create an empty collection with room for `capacity` models
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Add a model at the end of the collection.
    ///
    /// Returns the model back if its ID is already present.
    pub fn add(&mut self, model: T) -> Result<(), T> {
        if self.index.contains_key(model.id()) {
            return Err(model);
        }
        self.index.insert(model.id().clone(), self.items.len());
        self.items.push(model);
        Ok(())
    }

    /// Get a model by its identifier
    #[must_use]
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    /// All models in insertion order
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Count the total number of models in the collection
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: EntityModel> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}
