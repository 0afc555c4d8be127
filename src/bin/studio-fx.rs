use std::f64::consts::TAU;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use studio_fx::{
    CpuSurface, CpuSurfaceOpts, EffectConfig, FrameClock, FrameIndex, FrameSink, HostEvent,
    IntervalScheduler, LineEffect, ManualScheduler, Page, PngSequenceSink, Point,
    RecordingSurface, Rgba8, SampleOutcome, Stage, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "studio-fx", version)]
struct Cli {
    /// Raise log verbosity (`-v` debug, `-vv` trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the spring column as a PNG sequence.
    Column(LineArgs),
    /// Render the spring wave as a PNG sequence.
    Wave(LineArgs),
    /// Scroll a page and report the foreground picked on each frame.
    Contrast(ContrastArgs),
}

#[derive(Parser, Debug)]
struct LineArgs {
    /// Directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of frames to render, including the one drawn at mount.
    #[arg(long, default_value_t = 120, value_parser = clap::value_parser!(u64).range(1..))]
    frames: u64,

    /// Viewport width in px.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Viewport height in px.
    #[arg(long, default_value_t = 360)]
    height: u32,

    /// Effect config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pace frames at the display refresh rate instead of rendering flat out.
    #[arg(long, default_value_t = false)]
    realtime: bool,
}

#[derive(Parser, Debug)]
struct ContrastArgs {
    /// Page JSON.
    #[arg(long)]
    page: PathBuf,

    /// Scroll offsets to visit, one frame each.
    #[arg(long, num_args = 1.., allow_negative_numbers = true)]
    scroll: Vec<f64>,

    /// Effect config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Scroll events delivered per frame in the contrast report.
const SCROLL_BURST: u32 = 4;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Column(args) => cmd_line(args, |cfg| LineEffect::Column(cfg.column)),
        Command::Wave(args) => cmd_line(args, |cfg| LineEffect::Wave(cfg.wave)),
        Command::Contrast(args) => cmd_contrast(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EffectConfig> {
    match path {
        Some(p) => EffectConfig::from_path(p)
            .with_context(|| format!("load effect config '{}'", p.display())),
        None => Ok(EffectConfig::default()),
    }
}

fn cmd_line(args: LineArgs, pick: impl FnOnce(&EffectConfig) -> LineEffect) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let effect = pick(&cfg);
    let viewport = Viewport::new(args.width, args.height)?;
    let surface = CpuSurface::new(
        effect.surface_size(viewport),
        CpuSurfaceOpts::default().with_clear_rgba(Some(Rgba8::WHITE)),
    )
    .context("allocate drawing surface")?;

    let written = if args.realtime {
        let clock = IntervalScheduler::new(IntervalScheduler::DEFAULT_HZ)?;
        run_line(clock, effect, viewport, surface, args.frames, &args.out_dir)?
    } else {
        run_line(
            ManualScheduler::new(),
            effect,
            viewport,
            surface,
            args.frames,
            &args.out_dir,
        )?
    };

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

fn run_line<C: FrameClock>(
    clock: C,
    effect: LineEffect,
    viewport: Viewport,
    surface: CpuSurface,
    frames: u64,
    out_dir: &Path,
) -> anyhow::Result<usize> {
    let mut stage = Stage::new(clock, viewport);
    stage.mount_line(effect, Some(surface))?;

    let size = effect.surface_size(viewport);
    let mut sink = PngSequenceSink::new(out_dir);
    sink.begin(size.width, size.height)?;

    for i in 0..frames {
        if i > 0 {
            stage.dispatch(HostEvent::PointerMove(sweep_pointer(i, frames, viewport)))?;
            stage.step();
        }
        let frame = stage
            .line()
            .and_then(|line| line.surface())
            .map(CpuSurface::frame)
            .context("line animator lost its surface")?;
        sink.push_frame(FrameIndex(i), &frame)
            .with_context(|| format!("write frame {i}"))?;
    }

    sink.end()?;
    Ok(sink.written().len())
}

/// Pointer path for the demo: one full swing left and right of the rest axis.
fn sweep_pointer(i: u64, frames: u64, viewport: Viewport) -> Point {
    let t = i as f64 / frames as f64;
    let reach = f64::from(viewport.width) / 4.0;
    Point::new(
        viewport.center_x() + reach * (TAU * t).sin(),
        f64::from(viewport.height) / 2.0,
    )
}

fn cmd_contrast(args: ContrastArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let page = Page::from_path(&args.page)
        .with_context(|| format!("load page '{}'", args.page.display()))?;

    let mut stage: Stage<RecordingSurface, ManualScheduler> =
        Stage::new(ManualScheduler::new(), page.viewport);
    let fg = stage.mount_contrast(cfg.contrast, Box::new(page))?;
    println!("mount scroll=0 foreground={fg}");

    let mut prev = 0.0;
    for target in args.scroll {
        for k in 1..=SCROLL_BURST {
            let y = prev + (target - prev) * f64::from(k) / f64::from(SCROLL_BURST);
            stage.dispatch(HostEvent::Scroll(y))?;
        }
        prev = target;

        let report = stage.step();
        match report.sample {
            Some(sample) => println!("frame={} {}", report.frame.0, describe(target, &sample)),
            None => println!("frame={} scroll={target} no sample", report.frame.0),
        }
    }
    Ok(())
}

fn describe(scroll: f64, sample: &SampleOutcome) -> String {
    let fg = sample.foreground;
    match sample.background {
        Some(bg) => format!(
            "scroll={scroll} background={bg} foreground={fg} inverse={} complementary={}{}",
            bg.inverse(),
            bg.complementary(),
            if sample.changed { " changed" } else { "" }
        ),
        None => format!("scroll={scroll} background=none foreground={fg} (kept)"),
    }
}
