use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "famtree", version, about = "Render genealogical trees from nested JSON")]
struct Cli {
    /// Log debug output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a tree to PNG (or SVG when the output ends in `.svg`).
    Render(RenderArgs),
    /// Print statistics and validation issues for a tree.
    Analyze(TreeArg),
    /// Dump the drawing plan as JSON.
    Plan(PlanArgs),
    /// Generate a background image into the assets directory.
    Background(BackgroundArgs),
}

#[derive(Parser, Debug)]
struct TreeArg {
    /// Family tree JSON file.
    tree: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Family tree JSON file.
    tree: PathBuf,

    /// Output path.
    #[arg(short, long, default_value = "family_tree.png")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = BackendChoice::Svg)]
    backend: BackendChoice,

    /// Backend to retry with if the primary one fails.
    #[arg(long, value_enum)]
    fallback: Option<BackendChoice>,

    #[arg(short, long, value_enum, default_value_t = StyleChoice::Classic)]
    style: StyleChoice,

    /// Background file name in `<assets>/backgrounds`, or a path to an image.
    #[arg(short, long)]
    background: Option<String>,

    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// JSON file with layout settings (`generation_spacing`, `min_spacing`, `width_budget`).
    #[arg(long)]
    layout_config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Family tree JSON file.
    tree: PathBuf,

    /// Write the plan here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    layout_config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BackgroundArgs {
    #[arg(value_enum)]
    kind: BackgroundChoice,

    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    #[arg(long, default_value_t = famtree::DEFAULT_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = famtree::DEFAULT_HEIGHT)]
    height: u32,

    /// Seed for the aging texture.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Svg,
    Cpu,
}

impl From<BackendChoice> for famtree::BackendKind {
    fn from(choice: BackendChoice) -> Self {
        match choice {
            BackendChoice::Svg => Self::Svg,
            BackendChoice::Cpu => Self::Cpu,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleChoice {
    Classic,
    Modern,
}

impl From<StyleChoice> for famtree::RenderStyle {
    fn from(choice: StyleChoice) -> Self {
        match choice {
            StyleChoice::Classic => Self::Classic,
            StyleChoice::Modern => Self::Modern,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackgroundChoice {
    VintageScroll,
    ClassicPaper,
}

impl From<BackgroundChoice> for famtree::BackgroundKind {
    fn from(choice: BackgroundChoice) -> Self {
        match choice {
            BackgroundChoice::VintageScroll => Self::VintageScroll,
            BackgroundChoice::ClassicPaper => Self::ClassicPaper,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Analyze(args) => cmd_analyze(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Background(args) => cmd_background(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_tree(path: &Path) -> anyhow::Result<famtree::FamilyTree> {
    let loaded = famtree::TreeLoader::load_path(path)?;
    for issue in &loaded.diagnostics {
        tracing::warn!("{issue}");
    }
    tracing::info!(
        people = loaded.tree.len(),
        root = %loaded.tree.root(),
        "loaded family tree"
    );
    Ok(loaded.tree)
}

fn read_layout_settings(path: Option<&Path>) -> anyhow::Result<famtree::LayoutSettings> {
    let Some(path) = path else {
        return Ok(famtree::LayoutSettings::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read layout config '{}'", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parse layout config '{}'", path.display()))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let tree = load_tree(&args.tree)?;
    let layout = read_layout_settings(args.layout_config.as_deref())?;
    let plan = famtree::plan_tree(&tree, &layout)?;

    let library = famtree::BackgroundLibrary::new(&args.assets);
    let background = match args.background.as_deref() {
        Some(name) => match library.resolve(name) {
            Some(path) => Some(path),
            None => {
                tracing::warn!(name, "background not found, rendering without one");
                None
            }
        },
        None => None,
    };

    let mut settings = famtree::RenderSettings::default()
        .with_style(args.style.into())
        .from_env_overrides();
    if background.is_some() {
        settings.clear_rgba = Some([0, 0, 0, 0]);
    }

    ensure_parent_dir(&args.output)?;
    let wants_svg = args
        .output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if wants_svg {
        if !matches!(args.backend, BackendChoice::Svg) {
            anyhow::bail!("svg output requires --backend svg");
        }
        if background.is_some() {
            tracing::warn!("backgrounds are not embedded in svg output");
        }
        let doc = famtree::SvgBackend::new(settings).document(&plan)?;
        std::fs::write(&args.output, doc)
            .with_context(|| format!("write svg '{}'", args.output.display()))?;
        tracing::info!(path = %args.output.display(), "wrote family tree");
        return Ok(());
    }

    let photos = famtree::PhotoStore::prepare(&plan);
    let mut primary = famtree::create_backend(args.backend.into(), &settings)?;
    let mut fallback = args
        .fallback
        .map(|choice| famtree::create_backend(choice.into(), &settings))
        .transpose()?;
    let mut frame = famtree::render_with_fallback(
        &plan,
        &photos,
        primary.as_mut(),
        fallback
            .as_mut()
            .map(|b| b.as_mut() as &mut dyn famtree::RenderBackend),
    )?;

    if let Some(path) = background {
        match famtree::load_background(&path) {
            Ok(bg) => frame = famtree::apply_background(&frame, &bg)?,
            Err(err) => tracing::warn!(path = %path.display(), %err, "could not apply background"),
        }
    }

    frame
        .to_rgba_image()?
        .save(&args.output)
        .with_context(|| format!("write png '{}'", args.output.display()))?;
    tracing::info!(
        path = %args.output.display(),
        width = frame.width,
        height = frame.height,
        "wrote family tree"
    );
    Ok(())
}

fn cmd_analyze(args: TreeArg) -> anyhow::Result<()> {
    let tree = load_tree(&args.tree)?;
    let generations = famtree::GenerationAssigner::assign(&tree)?;
    let stats = famtree::TreeStats::collect(&tree, &generations);

    println!("Family tree analysis:");
    println!("  Total people: {}", stats.total_people);
    println!("  Total generations: {}", stats.total_generations);
    println!("  People with photos: {}", stats.people_with_photos);
    println!("  People with birth years: {}", stats.people_with_birth_years);
    println!("  Max parents of one person: {}", stats.max_parents);
    println!("  People per generation:");
    for (level, count) in &stats.per_generation {
        println!("    Generation {level}: {count}");
    }
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let tree = load_tree(&args.tree)?;
    let layout = read_layout_settings(args.layout_config.as_deref())?;
    let plan = famtree::plan_tree(&tree, &layout)?;
    let json = serde_json::to_string_pretty(&plan).context("serialize drawing plan")?;
    match args.output {
        Some(path) => {
            ensure_parent_dir(&path)?;
            std::fs::write(&path, json)
                .with_context(|| format!("write plan '{}'", path.display()))?;
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_background(args: BackgroundArgs) -> anyhow::Result<()> {
    let library = famtree::BackgroundLibrary::new(&args.assets);
    let path = library.create(args.kind.into(), args.width, args.height, args.seed)?;
    println!("{}", path.display());
    Ok(())
}
