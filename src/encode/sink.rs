use std::path::Path;

use crate::config::model::Codec;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{QuoteError, QuoteResult};
use crate::render::frame::ComposedFrame;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: u32,
    /// Output codec.
    pub codec: Codec,
}

/// Consumer of composed frames for one output video.
///
/// Ordering contract: `push_frame` is called with strictly increasing `FrameIndex` values
/// between one `begin` and one `end`.
pub trait FrameSink: Send {
    /// Open the stream. Called once before any frame.
    fn begin(&mut self, cfg: SinkConfig) -> QuoteResult<()>;
    /// Write one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &ComposedFrame) -> QuoteResult<()>;
    /// Close the stream. Called once after the last frame.
    fn end(&mut self) -> QuoteResult<()>;
    /// File the sink writes to, if it writes one.
    fn output_path(&self) -> Option<&Path> {
        None
    }
}

/// In-memory sink for tests and dry runs.
///
/// Keeps the first frame and counts how many later frames differ from it, so long runs of
/// identical frames cost one buffer.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    indices: Vec<FrameIndex>,
    first: Option<ComposedFrame>,
    differing: usize,
    ended: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Number of frames pushed since the last `begin`.
    pub fn frame_count(&self) -> usize {
        self.indices.len()
    }

    /// Indices of the pushed frames, in push order.
    pub fn indices(&self) -> &[FrameIndex] {
        &self.indices
    }

    /// First frame pushed since the last `begin`.
    pub fn first_frame(&self) -> Option<&ComposedFrame> {
        self.first.as_ref()
    }

    /// Whether every pushed frame equals the first one.
    pub fn all_identical(&self) -> bool {
        self.differing == 0
    }

    /// Whether `end` was called after the last `begin`.
    pub fn is_finished(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> QuoteResult<()> {
        *self = Self {
            cfg: Some(cfg),
            ..Self::default()
        };
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &ComposedFrame) -> QuoteResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| QuoteError::encode("in-memory sink not started"))?;
        if self.ended {
            return Err(QuoteError::encode("in-memory sink is already finalized"));
        }
        if frame.width() != cfg.width || frame.height() != cfg.height {
            return Err(QuoteError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }
        if let Some(last) = self.indices.last()
            && idx <= *last
        {
            return Err(QuoteError::encode("out-of-order frame index"));
        }

        match &self.first {
            None => self.first = Some(frame.clone()),
            Some(first) if first != frame => self.differing += 1,
            Some(_) => {}
        }
        self.indices.push(idx);
        Ok(())
    }

    fn end(&mut self) -> QuoteResult<()> {
        if self.cfg.is_none() {
            return Err(QuoteError::encode("in-memory sink not started"));
        }
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
