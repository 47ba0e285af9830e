//! Render configuration: typed model, validation and immutable override merging.

/// Loading and merging configuration documents.
pub mod merge;
/// Typed configuration groups.
pub mod model;
