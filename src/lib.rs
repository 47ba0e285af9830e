//! quotereel turns a list of short text quotes into fixed-duration MP4 clips.
//!
//! Each quote is wrapped and positioned over a solid color or a stretched background image,
//! composed once on the CPU, then written `duration * fps` times through the system `ffmpeg`.
//! The public API is session-oriented:
//!
//! - Load a [`RenderConfig`] and merge overrides into it
//! - Create a [`GenerationSession`] (resolves the font once)
//! - Render single frames or emit one video per [`QuoteRecord`] into a [`FrameSink`]
//!
//! [`run_generation`] performs the whole file-driven batch and reports through a [`LogSink`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Render configuration model and merging.
pub mod config;
/// Encoding sinks and video emission.
pub mod encode;
/// Quote input files.
pub mod input;
/// Word wrap and line placement.
pub mod layout;
/// Frame composition.
pub mod render;
/// Batch generation.
pub mod session;
/// Font resolution and measurement.
pub mod text;

pub use crate::foundation::core::{FrameIndex, FrameSize, Rgb8};
pub use crate::foundation::error::{QuoteError, QuoteResult};
pub use crate::foundation::log::{
    ChannelLog, LogLevel, LogRecord, LogSink, MemoryLog, NullLog, TracingLog,
};

pub use crate::config::merge::{ConfigOverrides, load_config_value, merge_config_values};
pub use crate::config::model::{
    Codec, PathsConfig, RenderConfig, TextAlign, TextConfig, VerticalPos, VideoConfig,
};
pub use crate::encode::emit::{emit, emit_into, video_path};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::input::quotes::{QuoteFormat, QuoteRecord, load_quotes};
pub use crate::layout::place::{BlockStyle, LayoutLine, layout};
pub use crate::layout::wrap::wrap;
pub use crate::render::compositor::{Compositor, compose};
pub use crate::render::frame::ComposedFrame;
pub use crate::session::generation::{
    FfmpegSinkFactory, GenerationReport, GenerationRequest, GenerationSession, RunOutcome,
    SinkFactory, run_generation, run_generation_with, setup_directories,
};
pub use crate::text::font::{
    FontOrigin, FontResolver, Platform, ResolvedFont, TextMeasure, resolve_font,
};
