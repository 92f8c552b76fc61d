#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod binding;
pub mod collections;
pub mod definition;
mod error;
pub mod graph;
pub mod integration;

#[doc(hidden)]
pub mod prelude;

pub use error::{ErrorKind, GraphError, GraphResult};

/// Tracing target for library-wide operations.
pub const TRACING_TARGET: &str = "flow_graph";
