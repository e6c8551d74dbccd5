use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "babycam", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the effect pipeline over a frame source.
    Run(RunArgs),
    /// Print a built-in configuration as JSON.
    Preset(PresetArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Pipeline configuration JSON.
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Built-in configuration to use when no `--config` is given.
    #[arg(long, value_enum, default_value_t = PresetChoice::Baby)]
    preset: PresetChoice,

    /// Directory that sprite image and font paths are relative to.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Directory of still images used as camera frames. A synthetic test pattern is used if absent.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory to write processed frames to as PNG. Frames are discarded if absent.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<u64>,

    /// Time base for one-shot timers.
    #[arg(long, value_enum, default_value_t = ClockChoice::Wall)]
    clock: ClockChoice,

    /// Nominal frame rate (also the `frames` clock rate).
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Seed for the random stream, overriding the configuration.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct PresetArgs {
    #[arg(value_enum)]
    name: PresetChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetChoice {
    Baby,
    Party,
    Combined,
}

impl From<PresetChoice> for babycam::Preset {
    fn from(p: PresetChoice) -> Self {
        match p {
            PresetChoice::Baby => Self::Baby,
            PresetChoice::Party => Self::Party,
            PresetChoice::Combined => Self::Combined,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ClockChoice {
    /// Wall-clock seconds.
    Wall,
    /// Tick index divided by `--fps`.
    Frames,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Preset(args) => cmd_preset(args),
    }
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let cfg = babycam::PipelineConfig::preset(args.name.into());
    println!("{}", cfg.to_json_pretty()?);
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => babycam::PipelineConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => babycam::PipelineConfig::preset(args.preset.into()),
    };
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }

    let mut source: Box<dyn babycam::FrameSource> = match &args.input {
        Some(dir) => {
            let src = babycam::ImageSequenceSource::open(dir)
                .with_context(|| format!("open input '{}'", dir.display()))?;
            cfg.canvas = src.probe_canvas()?;
            Box::new(src)
        }
        None => Box::new(babycam::TestPatternSource::new(cfg.canvas)),
    };

    let mut assets = babycam::AssetStore::new(&args.assets);
    let mut pipeline =
        babycam::build_pipeline(&cfg, &mut assets, Box::new(babycam::LogCuePlayer))
            .context("build pipeline")?;

    let mut sink: Box<dyn babycam::FrameSink> = match &args.out {
        Some(dir) => Box::new(babycam::PngSequenceSink::new(dir)),
        None => Box::new(babycam::NullSink::default()),
    };
    let mut exit: Box<dyn babycam::ExitSignal> = match args.max_frames {
        Some(n) => Box::new(babycam::FrameBudget::new(n)),
        None => Box::new(babycam::Never),
    };
    let clock: Box<dyn babycam::Clock> = match args.clock {
        ClockChoice::Wall => Box::new(babycam::SystemClock::new()),
        ClockChoice::Frames => Box::new(babycam::FrameClock::new(args.fps)),
    };

    let summary = babycam::run_session(
        &mut pipeline,
        source.as_mut(),
        sink.as_mut(),
        exit.as_mut(),
        clock.as_ref(),
        args.fps,
    )?;

    eprintln!(
        "processed {} frames ({} bounds skips, {} cues)",
        summary.frames, summary.bounds_skips, summary.cues_emitted
    );
    Ok(())
}
