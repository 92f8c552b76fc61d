//! Integration descriptors and the catalog nodes are validated against.
//!
//! - [`Integration`]: a third-party service with its triggers and actions
//! - [`Trigger`], [`Action`]: operations a node can bind to
//! - [`InputField`], [`OutputField`], [`FieldType`]: operation schemas
//! - [`IntegrationCatalog`]: lookup of integrations by key

mod catalog;
mod types;

pub use catalog::IntegrationCatalog;
pub use types::{Action, FieldType, InputField, Integration, OutputField, Trigger};
