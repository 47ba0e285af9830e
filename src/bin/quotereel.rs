use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use quotereel::{
    Codec, ConfigOverrides, GenerationRequest, GenerationSession, LogSink, RenderConfig, Rgb8,
    RunOutcome, TextAlign, TracingLog, VerticalPos,
};

#[derive(Parser, Debug)]
#[command(name = "quotereel", version, about = "Render quotes into short MP4 clips")]
struct Cli {
    /// Log debug diagnostics.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one MP4 per quote (requires `ffmpeg` on PATH).
    Generate(GenerateArgs),
    /// Render a single quote's frame as a PNG.
    Frame(FrameArgs),
    /// Write the default configuration document.
    InitConfig(InitConfigArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Quote file (`.txt`, one quote per line, or `.csv` with `text,author,background_image`).
    #[arg(long)]
    quotes: PathBuf,

    /// Configuration document.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    #[command(flatten)]
    overrides: OverrideArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Quote file.
    #[arg(long)]
    quotes: PathBuf,

    /// Quote number (1-based).
    #[arg(long, default_value_t = 1)]
    index: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Configuration document.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    #[command(flatten)]
    overrides: OverrideArgs,
}

#[derive(Parser, Debug)]
struct InitConfigArgs {
    /// Destination path.
    #[arg(long, default_value = "config.json")]
    out: PathBuf,

    /// Replace an existing file.
    #[arg(long, default_value_t = false)]
    force: bool,
}

#[derive(Args, Debug, Default)]
struct OverrideArgs {
    /// Output directory.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Asset root holding `images/` and `fonts/`.
    #[arg(long)]
    assets: Option<PathBuf>,
    /// Clip length in seconds.
    #[arg(long)]
    duration: Option<u32>,
    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,
    /// Font size in pixels.
    #[arg(long)]
    font_size: Option<u32>,
    /// Font file.
    #[arg(long)]
    font_path: Option<PathBuf>,
    /// Horizontal alignment: left, center or right.
    #[arg(long)]
    align: Option<TextAlign>,
    /// Vertical position: top, middle or bottom.
    #[arg(long)]
    vertical_pos: Option<VerticalPos>,
    /// Text color as `#RRGGBB` or `r,g,b`.
    #[arg(long)]
    font_color: Option<Rgb8>,
    /// Background color as `#RRGGBB` or `r,g,b`.
    #[arg(long)]
    bg_color: Option<Rgb8>,
    /// Video codec: mp4v or avc1.
    #[arg(long)]
    codec: Option<Codec>,
    /// Draw `- <author>` below the quote.
    #[arg(long)]
    show_author: bool,
}

impl OverrideArgs {
    fn to_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            duration: self.duration,
            fps: self.fps,
            background_color: self.bg_color,
            codec: self.codec,
            font_path: self.font_path.clone(),
            font_size: self.font_size,
            font_color: self.font_color,
            text_align: self.align,
            vertical_pos: self.vertical_pos,
            show_author: self.show_author.then_some(true),
            output: self.output.clone(),
            assets: self.assets.clone(),
            ..ConfigOverrides::default()
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Frame(args) => cmd_frame(args).map(|()| ExitCode::SUCCESS),
        Command::InitConfig(args) => cmd_init_config(args).map(|()| ExitCode::SUCCESS),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<ExitCode> {
    let request = GenerationRequest::new(&args.config, &args.quotes)
        .with_overrides(args.overrides.to_overrides().to_value());
    let report = quotereel::run_generation(&request, &TracingLog);

    match &report.outcome {
        RunOutcome::Aborted(reason) => {
            eprintln!("aborted: {reason}");
            Ok(ExitCode::FAILURE)
        }
        RunOutcome::NoQuotes => {
            eprintln!("no quotes in {}", args.quotes.display());
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::Completed => {
            for path in &report.produced {
                eprintln!("wrote {}", path.display());
            }
            for (index, reason) in &report.failed {
                eprintln!("quote {index} failed: {reason}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let log = TracingLog;
    let config = RenderConfig::from_path(&args.config)?
        .with_overrides(&args.overrides.to_overrides().to_value())?;
    let quotes = quotereel::load_quotes(&args.quotes, &log)?;
    let quote = args
        .index
        .checked_sub(1)
        .and_then(|i| quotes.get(i))
        .with_context(|| {
            format!(
                "quote {} out of range ({} quote(s) in '{}')",
                args.index,
                quotes.len(),
                args.quotes.display()
            )
        })?;

    let mut session = GenerationSession::new(&config, &log)?;
    let frame = session.render_quote(quote, &log)?;
    frame
        .save_png(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    log.info(&format!("wrote {}", args.out.display()));
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_init_config(args: InitConfigArgs) -> anyhow::Result<()> {
    if args.out.exists() && !args.force {
        anyhow::bail!(
            "'{}' already exists (use --force to replace it)",
            args.out.display()
        );
    }
    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let doc = RenderConfig::default().to_json_pretty()?;
    std::fs::write(&args.out, doc + "\n")
        .with_context(|| format!("write config '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
