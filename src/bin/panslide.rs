use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "panslide", version)]
struct Cli {
    /// Log actions and navigation to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a scene and a script, wire the camera chain and print it.
    Check(SourceArgs),
    /// Start the presentation and feed it input signals.
    Play(PlayArgs),
    /// Render the camera view of one slide as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Scene document (`.svg` or `.json`).
    #[arg(long)]
    scene: PathBuf,

    /// Presentation script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Easing of element transitions (linear, out-cubic, in-out-cubic); overrides the script.
    #[arg(long)]
    ease: Option<panslide::Ease>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Whitespace-separated signals: left, right, up, down, space, enter, click or a key code.
    #[arg(long, default_value = "")]
    keys: String,

    /// Let every transition finish between signals.
    #[arg(long)]
    settle: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scene SVG.
    #[arg(long)]
    scene: PathBuf,

    /// Presentation script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Easing of element transitions; overrides the script.
    #[arg(long)]
    ease: Option<panslide::Ease>,

    /// Slide index (0-based).
    #[arg(long, default_value_t = 0)]
    slide: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output width in pixels; height follows the document aspect ratio.
    #[arg(long, default_value_t = 1280)]
    width: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Play(args) => cmd_play(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn load_deck(
    script: &Path,
    ease: Option<panslide::Ease>,
) -> anyhow::Result<panslide::Presentation> {
    let deck = panslide::Presentation::from_path(script)
        .with_context(|| format!("load script '{}'", script.display()))?;
    Ok(match ease {
        Some(ease) => {
            let opts = panslide::PlaybackOpts {
                ease,
                ..deck.opts().clone()
            };
            deck.with_opts(opts)
        }
        None => deck,
    })
}

fn load_presenter(
    source: &SourceArgs,
) -> anyhow::Result<panslide::Presenter<panslide::MemoryScene>> {
    let scene = panslide::load_scene(&source.scene)
        .with_context(|| format!("load scene '{}'", source.scene.display()))?;
    let deck = load_deck(&source.script, source.ease)?;
    Ok(panslide::Presenter::new(scene, deck))
}

fn print_failures(failures: &[panslide::ActionFailure]) {
    for f in failures {
        println!(
            "  failed: slide {} action {} ({}): {}",
            f.slide, f.action, f.kind, f.error
        );
    }
}

fn cmd_check(args: SourceArgs) -> anyhow::Result<()> {
    let mut presenter = load_presenter(&args)?;
    let report = presenter.wire()?;

    let actions: usize = presenter
        .presentation()
        .slides()
        .iter()
        .map(panslide::Slide::len)
        .sum();
    println!("slides: {}, actions: {actions}", presenter.len());
    println!("initial viewport: {}", presenter.state().viewport);
    for v in &report.views {
        println!(
            "slide {} action {} '{}': {} -> {}",
            v.slide, v.action, v.element, v.prior, v.target
        );
    }
    print_failures(&report.failures);
    if !report.failures.is_empty() {
        anyhow::bail!("{} viewport change(s) could not be wired", report.failures.len());
    }
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let signals = args
        .keys
        .split_whitespace()
        .map(str::parse::<panslide::Signal>)
        .collect::<Result<Vec<_>, _>>()?;

    let mut presenter = load_presenter(&args.source)?;
    let (wired, first) = presenter.start()?;
    print_failures(&wired.failures);
    println!(
        "start: slide {:?} viewport {}",
        first.index,
        presenter.state().viewport
    );
    print_failures(&first.failures);

    for signal in signals {
        if args.settle {
            presenter.scene_mut().settle();
        }
        let Some(command) = panslide::map_signal(signal) else {
            println!("{signal:?}: ignored");
            continue;
        };
        let report = presenter.dispatch(command)?;
        println!(
            "{command}: slide {:?} viewport {}",
            report.index,
            presenter.state().viewport
        );
        print_failures(&report.failures);
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.scene)
        .with_context(|| format!("read svg '{}'", args.scene.display()))?;
    let tree = panslide::parse_svg(&bytes)
        .with_context(|| format!("load svg '{}'", args.scene.display()))?;
    let scene = panslide::MemoryScene::from_svg_data(&bytes)?;
    let deck = load_deck(&args.script, args.ease)?;
    if args.slide >= deck.len() {
        anyhow::bail!(
            "slide {} out of range (presentation has {})",
            args.slide,
            deck.len()
        );
    }

    let mut presenter = panslide::Presenter::new(scene, deck);
    presenter.start()?;
    for _ in 0..args.slide {
        presenter.advance()?;
    }
    presenter.scene_mut().settle();
    let camera = presenter.scene().camera();

    let frame = panslide::render_camera_frame(&tree, camera, args.width)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} (camera {camera})", args.out.display());
    Ok(())
}
