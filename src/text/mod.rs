//! Font resolution and measurement.
//!
//! A run resolves exactly one [`font::ResolvedFont`]: an outline face shaped with Parley and
//! rasterized with `vello_cpu`, or the built-in bitmap face when no font file can be loaded.

/// Built-in bitmap face.
pub mod builtin;
/// Font resolver and the [`font::TextMeasure`] seam used by layout.
pub mod font;
/// Outline faces loaded from font files.
pub mod outline;
