//! Encoding sinks.
//!
//! Sinks consume one composed frame repeated `duration * fps` times and are driven by
//! [`emit::emit_into`].

/// Repeated-frame video emission.
pub mod emit;
/// `ffmpeg`-based sinks (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
