//! Greedy word wrap and block placement.
//!
//! Both passes measure through [`crate::text::font::TextMeasure`], so they work identically for
//! outline and built-in faces.

/// Line placement inside the frame.
pub mod place;
/// Greedy word wrap.
pub mod wrap;
