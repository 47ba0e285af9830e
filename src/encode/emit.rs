use std::path::{Path, PathBuf};

use crate::config::model::RenderConfig;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{QuoteError, QuoteResult};
use crate::foundation::log::LogSink;
use crate::render::frame::ComposedFrame;

/// File name of the `index`-th (1-based) video: `quote_001.mp4`, `quote_002.mp4`, ...
pub fn video_file_name(index: usize, config: &RenderConfig) -> String {
    format!("quote_{index:03}.{}", config.video.codec.extension())
}

/// `<output>/quote_<NNN>.mp4` for the `index`-th (1-based) quote.
pub fn video_path(index: usize, config: &RenderConfig) -> PathBuf {
    config.paths.output.join(video_file_name(index, config))
}

/// Sink configuration derived from the video settings.
pub fn sink_config(config: &RenderConfig) -> SinkConfig {
    SinkConfig {
        width: config.video.frame_width,
        height: config.video.frame_height,
        fps: config.video.fps,
        codec: config.video.codec,
    }
}

/// Write `frame` to `<output>/quote_{index:03}.mp4` through the system `ffmpeg`.
pub fn emit(
    frame: &ComposedFrame,
    config: &RenderConfig,
    index: usize,
    log: &dyn LogSink,
) -> QuoteResult<PathBuf> {
    let path = video_path(index, config);
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&path));
    emit_into(&mut sink, frame, config, log)?;
    Ok(path)
}

/// Stream `duration * fps` copies of `frame` into `sink`, then verify the written file.
pub fn emit_into(
    sink: &mut dyn FrameSink,
    frame: &ComposedFrame,
    config: &RenderConfig,
    log: &dyn LogSink,
) -> QuoteResult<()> {
    if let Some(path) = sink.output_path() {
        log.info(&format!(
            "Attempting to create video file at: {}",
            path.display()
        ));
    }

    if let Err(err) = sink.begin(sink_config(config)) {
        log.error(&format!("Could not open the video stream: {err}"));
        return Err(err);
    }

    let total = config.total_frames();
    log.info(&format!(
        "Video stream opened ({} {}x{} @ {} fps). Writing {total} frames...",
        config.video.codec,
        config.video.frame_width,
        config.video.frame_height,
        config.video.fps
    ));
    for i in 0..total {
        sink.push_frame(FrameIndex(i), frame)?;
    }
    sink.end()?;
    tracing::debug!(frames = total, "video stream closed");

    if let Some(path) = sink.output_path() {
        verify_output(path, log)?;
    }
    Ok(())
}

fn verify_output(path: &Path, log: &dyn LogSink) -> QuoteResult<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    if path.is_file() {
        log.info(&format!("Successfully created video: {name}"));
        Ok(())
    } else {
        log.error(&format!("FAILED to create video file on disk: {name}"));
        Err(QuoteError::encode(format!(
            "video file '{}' was not written",
            path.display()
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/emit.rs"]
mod tests;
