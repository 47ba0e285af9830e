use std::sync::{Arc, Mutex};

use serde_json::json;

use super::*;
use crate::encode::sink::{InMemorySink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::log::{LogLevel, MemoryLog};

/// Delegates to an [`InMemorySink`] the test can inspect after the run.
#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<InMemorySink>>);

impl FrameSink for SharedSink {
    fn begin(&mut self, cfg: SinkConfig) -> QuoteResult<()> {
        self.0.lock().unwrap().begin(cfg)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &ComposedFrame) -> QuoteResult<()> {
        self.0.lock().unwrap().push_frame(idx, frame)
    }

    fn end(&mut self) -> QuoteResult<()> {
        self.0.lock().unwrap().end()
    }
}

struct RefusingSink;

impl FrameSink for RefusingSink {
    fn begin(&mut self, _cfg: crate::encode::sink::SinkConfig) -> QuoteResult<()> {
        Err(QuoteError::encode("stream refused"))
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &ComposedFrame) -> QuoteResult<()> {
        Ok(())
    }

    fn end(&mut self) -> QuoteResult<()> {
        Ok(())
    }
}

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_session").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn session(config: &RenderConfig) -> GenerationSession {
    GenerationSession::with_font(config, ResolvedFont::builtin()).unwrap()
}

#[test]
fn two_quotes_with_defaults_yield_two_full_length_videos() {
    let mut config = RenderConfig::default();
    config.paths.output = PathBuf::from("out");
    let quotes = vec![
        QuoteRecord::from_text("First quote"),
        QuoteRecord::from_text("Second quote"),
    ];

    let mut created: Vec<(PathBuf, SharedSink)> = Vec::new();
    let report = {
        let mut factory = |path: &Path| -> Box<dyn FrameSink> {
            let sink = SharedSink::default();
            created.push((path.to_path_buf(), sink.clone()));
            Box::new(sink)
        };
        session(&config).generate(&quotes, &mut factory, &MemoryLog::new())
    };

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.total, 2);
    assert!(report.failed.is_empty());
    assert_eq!(
        report.produced,
        vec![
            PathBuf::from("out").join("quote_001.mp4"),
            PathBuf::from("out").join("quote_002.mp4"),
        ]
    );
    assert_eq!(created.len(), 2);
    for (_, sink) in &created {
        let sink = sink.0.lock().unwrap();
        assert_eq!(sink.frame_count(), 120);
        assert!(sink.all_identical());
        let cfg = sink.config().unwrap();
        assert_eq!((cfg.width, cfg.height, cfg.fps), (720, 1280, 24));
    }
}

#[test]
fn empty_quote_list_reports_no_quotes() {
    let log = MemoryLog::new();
    let mut factory = |_: &Path| -> Box<dyn FrameSink> { Box::new(InMemorySink::new()) };
    let report = session(&RenderConfig::default()).generate(&[], &mut factory, &log);
    assert_eq!(report.outcome, RunOutcome::NoQuotes);
    assert!(report.produced.is_empty());
    assert!(log.contains(LogLevel::Warn, "No quotes found"));
}

#[test]
fn per_quote_failure_does_not_stop_the_batch() {
    let mut config = RenderConfig::default();
    config.video.frame_width = 64;
    config.video.frame_height = 48;
    config.video.duration = 1;
    let quotes = vec![
        QuoteRecord::from_text("one"),
        QuoteRecord::from_text("two"),
        QuoteRecord::from_text("three"),
    ];

    let mut calls = 0;
    let mut factory = |_: &Path| -> Box<dyn FrameSink> {
        calls += 1;
        if calls == 2 {
            Box::new(RefusingSink)
        } else {
            Box::new(InMemorySink::new())
        }
    };
    let log = MemoryLog::new();
    let report = session(&config).generate(&quotes, &mut factory, &log);

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.produced.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, 2);
    assert!(report.failed[0].1.contains("stream refused"));
    assert!(log.contains(LogLevel::Error, "Failed to create video for quote 2"));
    assert!(log.contains(LogLevel::Warn, "Generated 2 of 3 videos"));
}

#[test]
fn render_quote_is_repeatable() {
    let mut config = RenderConfig::default();
    config.video.frame_width = 96;
    config.video.frame_height = 64;
    let mut s = session(&config);
    let quote = QuoteRecord::from_text("Pixel for pixel");
    let a = s.render_quote(&quote, &MemoryLog::new()).unwrap();
    let b = s.render_quote(&quote, &MemoryLog::new()).unwrap();
    assert_eq!(a, b);
    assert!(s.font().is_builtin());
}

#[test]
fn setup_directories_creates_output_and_asset_folders() {
    let dir = scratch("setup");
    let paths = PathsConfig {
        output: dir.join("out"),
        assets: dir.join("assets"),
    };
    let log = MemoryLog::new();
    setup_directories(&paths, &log).unwrap();
    assert!(paths.output.is_dir());
    assert!(paths.fonts_dir().is_dir());
    assert!(paths.images_dir().is_dir());
    assert!(log.contains(LogLevel::Info, "Directories are ready."));
}

#[test]
fn setup_directories_failure_is_a_setup_error() {
    let dir = scratch("setup_blocked");
    let blocker = dir.join("file");
    std::fs::write(&blocker, b"x").unwrap();
    let paths = PathsConfig {
        output: blocker.join("out"),
        assets: dir.join("assets"),
    };
    let log = MemoryLog::new();
    let err = setup_directories(&paths, &log).unwrap_err();
    assert!(matches!(err, QuoteError::Setup(_)));
    assert!(log.contains(LogLevel::Error, "Error creating directories"));
}

#[test]
fn missing_config_aborts_the_run() {
    let dir = scratch("missing_config");
    let request = GenerationRequest::new(dir.join("config.json"), dir.join("quotes.txt"));
    let log = MemoryLog::new();
    let mut factory = |_: &Path| -> Box<dyn FrameSink> { Box::new(InMemorySink::new()) };
    let report = run_generation_with(&request, &mut factory, &log);
    assert!(report.is_aborted());
    assert!(log.contains(LogLevel::Error, "configuration file not found"));
    assert!(log.contains(LogLevel::Error, "Exiting due to configuration error."));
}

#[test]
fn invalid_override_aborts_the_run() {
    let dir = scratch("bad_override");
    std::fs::write(dir.join("config.json"), "{}").unwrap();
    let request = GenerationRequest::new(dir.join("config.json"), dir.join("quotes.txt"))
        .with_overrides(json!({"video": {"fps": 0}}));
    let mut factory = |_: &Path| -> Box<dyn FrameSink> { Box::new(InMemorySink::new()) };
    let report = run_generation_with(&request, &mut factory, &MemoryLog::new());
    assert!(matches!(report.outcome, RunOutcome::Aborted(ref r) if r.contains("fps")));
}

#[test]
fn file_driven_run_merges_overrides_and_writes_every_quote() {
    let dir = scratch("file_driven");
    let out = dir.join("out");
    let assets = dir.join("assets");
    let config = json!({
        "video": {"frame_width": 64, "frame_height": 48, "fps": 10, "duration": 3},
        "paths": {
            "output": out.to_string_lossy(),
            "assets": assets.to_string_lossy(),
        }
    });
    std::fs::write(dir.join("config.json"), config.to_string()).unwrap();
    std::fs::write(
        dir.join("quotes.csv"),
        "text,author,background_image\nKeep going,Anon,missing.png\nStay calm,,\n",
    )
    .unwrap();

    let request = GenerationRequest::new(dir.join("config.json"), dir.join("quotes.csv"))
        .with_overrides(json!({"video": {"fps": 2, "duration": 1}}));

    let mut created: Vec<SharedSink> = Vec::new();
    let log = MemoryLog::new();
    let report = {
        let mut factory = |_: &Path| -> Box<dyn FrameSink> {
            let sink = SharedSink::default();
            created.push(sink.clone());
            Box::new(sink)
        };
        run_generation_with(&request, &mut factory, &log)
    };

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.produced, vec![out.join("quote_001.mp4"), out.join("quote_002.mp4")]);
    assert!(assets.join("images").is_dir());
    for sink in &created {
        let sink = sink.0.lock().unwrap();
        // duration * fps from the merged config, frame size from the base document.
        assert_eq!(sink.frame_count(), 2);
        assert_eq!(sink.config().map(|c| (c.width, c.height)), Some((64, 48)));
    }
    assert!(log.contains(LogLevel::Warn, "Background image not found"));
    assert!(log.contains(LogLevel::Info, "Processing video 2/2"));
}

#[test]
fn unreadable_quotes_abort_and_empty_quotes_complete_cleanly() {
    let dir = scratch("quotes_edge");
    let config = json!({"paths": {
        "output": dir.join("out").to_string_lossy(),
        "assets": dir.join("assets").to_string_lossy(),
    }});
    std::fs::write(dir.join("config.json"), config.to_string()).unwrap();
    std::fs::write(dir.join("empty.txt"), "\n\n").unwrap();
    let mut factory = |_: &Path| -> Box<dyn FrameSink> { Box::new(InMemorySink::new()) };

    let bad = GenerationRequest::new(dir.join("config.json"), dir.join("quotes.json"));
    assert!(run_generation_with(&bad, &mut factory, &MemoryLog::new()).is_aborted());

    let empty = GenerationRequest::new(dir.join("config.json"), dir.join("empty.txt"));
    let report = run_generation_with(&empty, &mut factory, &MemoryLog::new());
    assert_eq!(report.outcome, RunOutcome::NoQuotes);
}
