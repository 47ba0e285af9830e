use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::Value;

use crate::config::merge::load_config_value;
use crate::config::model::{PathsConfig, RenderConfig};
use crate::encode::emit::{emit_into, video_path};
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::FrameSink;
use crate::foundation::error::{QuoteError, QuoteResult};
use crate::foundation::log::LogSink;
use crate::input::quotes::{QuoteRecord, load_quotes};
use crate::render::compositor::Compositor;
use crate::render::frame::ComposedFrame;
use crate::text::font::{ResolvedFont, resolve_font};

const PREVIEW_CHARS: usize = 30;

/// Inputs of one file-driven batch run.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    /// JSON configuration document.
    pub config_path: PathBuf,
    /// `.txt` or `.csv` quote file.
    pub quotes_path: PathBuf,
    /// Override object merged over the loaded configuration; `null` means none.
    pub overrides: Value,
}

impl GenerationRequest {
    /// Request without overrides.
    pub fn new(config_path: impl Into<PathBuf>, quotes_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            quotes_path: quotes_path.into(),
            overrides: Value::Null,
        }
    }

    /// Replace the override object.
    pub fn with_overrides(mut self, overrides: Value) -> Self {
        self.overrides = overrides;
        self
    }
}

/// How a batch run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every quote was attempted.
    Completed,
    /// The quote file held no quotes.
    NoQuotes,
    /// Setup failed before any quote was attempted.
    Aborted(String),
}

/// Summary of a batch run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationReport {
    /// Quotes loaded.
    pub total: usize,
    /// Videos written, in quote order.
    pub produced: Vec<PathBuf>,
    /// `(1-based quote index, reason)` for each skipped quote.
    pub failed: Vec<(usize, String)>,
    /// How the run ended.
    pub outcome: RunOutcome,
}

impl GenerationReport {
    fn new(total: usize, outcome: RunOutcome) -> Self {
        Self {
            total,
            produced: Vec::new(),
            failed: Vec::new(),
            outcome,
        }
    }

    fn aborted(reason: impl Into<String>) -> Self {
        Self::new(0, RunOutcome::Aborted(reason.into()))
    }

    fn no_quotes(log: &dyn LogSink) -> Self {
        log.warn("No quotes found in the file. Nothing to generate.");
        Self::new(0, RunOutcome::NoQuotes)
    }

    /// Whether setup failed.
    pub fn is_aborted(&self) -> bool {
        matches!(self.outcome, RunOutcome::Aborted(_))
    }
}

/// Creates the sink each video is written through.
pub trait SinkFactory {
    /// Sink for the video at `path`.
    fn create(&mut self, path: &Path, config: &RenderConfig) -> Box<dyn FrameSink>;
}

/// Factory producing [`FfmpegSink`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfmpegSinkFactory;

impl SinkFactory for FfmpegSinkFactory {
    fn create(&mut self, path: &Path, _config: &RenderConfig) -> Box<dyn FrameSink> {
        Box::new(FfmpegSink::new(FfmpegSinkOpts::new(path)))
    }
}

impl<F> SinkFactory for F
where
    F: FnMut(&Path) -> Box<dyn FrameSink>,
{
    fn create(&mut self, path: &Path, _config: &RenderConfig) -> Box<dyn FrameSink> {
        self(path)
    }
}

/// Create `output`, `assets/fonts` and `assets/images`.
pub fn setup_directories(paths: &PathsConfig, log: &dyn LogSink) -> QuoteResult<()> {
    log.info("Setting up project directories...");
    for dir in [paths.output.clone(), paths.fonts_dir(), paths.images_dir()] {
        if let Err(err) = std::fs::create_dir_all(&dir)
            .with_context(|| format!("create directory '{}'", dir.display()))
        {
            log.error(&format!("Error creating directories: {err:#}"));
            return Err(QuoteError::setup(format!("{err:#}")));
        }
    }
    log.info("Directories are ready.");
    Ok(())
}

/// A validated configuration together with the font resolved for it.
#[derive(Debug)]
pub struct GenerationSession {
    compositor: Compositor,
    font: ResolvedFont,
}

impl GenerationSession {
    /// Validate `config` and resolve its font.
    pub fn new(config: &RenderConfig, log: &dyn LogSink) -> QuoteResult<Self> {
        config.validate()?;
        let font = resolve_font(config, log);
        Self::with_font(config, font)
    }

    /// Session using an already resolved font.
    pub fn with_font(config: &RenderConfig, font: ResolvedFont) -> QuoteResult<Self> {
        config.validate()?;
        Ok(Self {
            compositor: Compositor::new(config)?,
            font,
        })
    }

    /// Configuration of this session.
    pub fn config(&self) -> &RenderConfig {
        self.compositor.config()
    }

    /// Font shared by every quote of this session.
    pub fn font(&self) -> &ResolvedFont {
        &self.font
    }

    /// Compose the frame for `quote` without writing anything.
    pub fn render_quote(
        &mut self,
        quote: &QuoteRecord,
        log: &dyn LogSink,
    ) -> QuoteResult<ComposedFrame> {
        self.compositor.compose(quote, &mut self.font, log)
    }

    /// Compose and emit one video per quote, continuing past per-quote failures.
    #[tracing::instrument(skip_all, fields(quotes = quotes.len()))]
    pub fn generate(
        &mut self,
        quotes: &[QuoteRecord],
        sinks: &mut dyn SinkFactory,
        log: &dyn LogSink,
    ) -> GenerationReport {
        let total = quotes.len();
        if total == 0 {
            return GenerationReport::no_quotes(log);
        }
        let mut report = GenerationReport::new(total, RunOutcome::Completed);

        for (i, quote) in quotes.iter().enumerate() {
            let index = i + 1;
            log.info(&format!(
                "Processing video {index}/{total} for quote: \"{}\"",
                quote.preview(PREVIEW_CHARS)
            ));
            match self.produce(index, quote, sinks, log) {
                Ok(path) => report.produced.push(path),
                Err(err) => {
                    log.error(&format!(
                        "Failed to create video for quote {index} (\"{}\"): {err}",
                        quote.preview(PREVIEW_CHARS)
                    ));
                    report.failed.push((index, err.to_string()));
                }
            }
        }

        let output = self.config().paths.output.display().to_string();
        log.info(&"-".repeat(20));
        if report.failed.is_empty() {
            log.info(&format!(
                "SUCCESS: All {total} videos have been generated in the '{output}' folder."
            ));
        } else {
            log.warn(&format!(
                "Generated {} of {total} videos in the '{output}' folder; {} failed.",
                report.produced.len(),
                report.failed.len()
            ));
        }
        log.info(&"-".repeat(20));
        report
    }

    fn produce(
        &mut self,
        index: usize,
        quote: &QuoteRecord,
        sinks: &mut dyn SinkFactory,
        log: &dyn LogSink,
    ) -> QuoteResult<PathBuf> {
        let frame = self.render_quote(quote, log)?;
        let path = video_path(index, self.config());
        let mut sink = sinks.create(&path, self.config());
        emit_into(sink.as_mut(), &frame, self.config(), log)?;
        Ok(path)
    }
}

/// Run a full batch from files, encoding through the system `ffmpeg`.
pub fn run_generation(request: &GenerationRequest, log: &dyn LogSink) -> GenerationReport {
    run_generation_with(request, &mut FfmpegSinkFactory, log)
}

/// Run a full batch from files with a caller-provided sink factory.
///
/// Only setup-phase failures abort the run; they are logged and reported, never returned.
#[tracing::instrument(
    skip_all,
    fields(
        config = %request.config_path.display(),
        quotes = %request.quotes_path.display(),
    )
)]
pub fn run_generation_with(
    request: &GenerationRequest,
    sinks: &mut dyn SinkFactory,
    log: &dyn LogSink,
) -> GenerationReport {
    log.info("Starting video generation process...");

    let config = match load_config(request, log) {
        Ok(c) => c,
        Err(err) => {
            log.error(&err.to_string());
            log.error("Exiting due to configuration error.");
            return GenerationReport::aborted(err.to_string());
        }
    };

    if let Err(err) = setup_directories(&config.paths, log) {
        return GenerationReport::aborted(err.to_string());
    }

    let quotes = match load_quotes(&request.quotes_path, log) {
        Ok(q) => q,
        Err(err) => {
            log.error(&err.to_string());
            return GenerationReport::aborted(err.to_string());
        }
    };
    if quotes.is_empty() {
        return GenerationReport::no_quotes(log);
    }

    let mut session = match GenerationSession::new(&config, log) {
        Ok(s) => s,
        Err(err) => {
            log.error(&err.to_string());
            return GenerationReport::aborted(err.to_string());
        }
    };
    session.generate(&quotes, sinks, log)
}

fn load_config(request: &GenerationRequest, log: &dyn LogSink) -> QuoteResult<RenderConfig> {
    log.info(&format!(
        "Attempting to load config from: {}",
        request.config_path.display()
    ));
    let base = RenderConfig::from_value(load_config_value(&request.config_path)?)?;
    base.with_overrides(&request.overrides)
}

#[cfg(test)]
#[path = "../../tests/unit/session/generation.rs"]
mod tests;
