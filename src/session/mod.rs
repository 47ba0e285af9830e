//! Batch orchestration: configuration, directories, quotes, then one video per quote.

/// Batch generation session and the file-driven entry point.
pub mod generation;
