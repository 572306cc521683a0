//! Foundation types for flowdiff.
//!
//! This crate provides the workflow graph model and the immutable version
//! records that every other flowdiff crate reads. Nothing here is mutated
//! after construction; diffs are computed from two of these snapshots.
//!
//! # Key Types
//!
//! - [`WorkflowDefinition`] -- A versioned graph: nodes, edges, settings, variables
//! - [`Node`] / [`Edge`] -- Graph entities identified by a stable id
//! - [`Position`] -- Canvas coordinates of a node
//! - [`VersionId`] -- UUID v7 identifier of a stored version
//! - [`WorkflowVersion`] -- Immutable `{id, version, createdAt, definition}` record

pub mod error;
pub mod version;
pub mod workflow;

pub use error::TypeError;
pub use version::{VersionId, WorkflowVersion};
pub use workflow::{Edge, Node, Position, WorkflowDefinition};
