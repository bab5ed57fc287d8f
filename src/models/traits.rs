//! Trait definitions for domain models

use std::hash::Hash;

/// A trait that all stored domain models implement.
///
/// Provides identifier access so collections can index their members.
pub trait EntityModel: Clone + Send + Sync + std::fmt::Debug {
    /// The type of identifier used for this model
    type Id: Clone + Eq + Hash + Send + Sync + std::fmt::Debug;

    /// Get the unique identifier for this model
    fn id(&self) -> &Self::Id;
}
