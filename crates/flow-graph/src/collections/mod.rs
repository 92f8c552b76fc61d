//! Insertion-ordered collections.
//!
//! - [`OrderedMap`]: associative container that preserves first-insertion key order
//! - [`OrderedSet`]: set of unique elements that preserves insertion order
//! - [`SyncOrderedMap`], [`SyncOrderedSet`]: single-lock thread-safe wrappers

mod ordered_map;
mod ordered_set;
mod sync;

pub use ordered_map::OrderedMap;
pub use ordered_set::OrderedSet;
pub use sync::{SyncOrderedMap, SyncOrderedSet};
