//! Frame composition.
//!
//! - [`frame::ComposedFrame`] is the RGB8 output of one quote.
//! - [`compositor::Compositor`] paints background and text with `vello_cpu`.

/// Background and text painting.
pub mod compositor;
/// Composed RGB frames.
pub mod frame;
