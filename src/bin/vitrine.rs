use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "vitrine", version)]
struct Cli {
    /// Log pipeline diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve the mosaic and fit the text, printing the poster plan as JSON.
    Layout(LayoutArgs),
    /// Render the poster to a JPEG (or a PNG preview).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input poster document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Poster metrics JSON overriding the defaults.
    #[arg(long)]
    metrics: Option<PathBuf>,

    /// Print the raw solver output instead of the full plan.
    #[arg(long)]
    solution_only: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input poster document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Poster metrics JSON overriding the defaults.
    #[arg(long)]
    metrics: Option<PathBuf>,

    /// Render a PNG preview this many pixels tall instead of the final export.
    #[arg(long)]
    preview_height: Option<u32>,

    /// JPEG quality (1-100); takes precedence over `VITRINE_JPEG_QUALITY`.
    #[arg(long)]
    quality: Option<u8>,

    /// Color theme, overriding the document.
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for vitrine::ThemeChoice {
    fn from(t: ThemeArg) -> Self {
        match t {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn read_metrics(path: Option<&Path>) -> anyhow::Result<vitrine::PosterMetrics> {
    let Some(path) = path else {
        return Ok(vitrine::PosterMetrics::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read metrics '{}'", path.display()))?;
    let metrics: vitrine::PosterMetrics =
        serde_json::from_str(&text).with_context(|| "parse metrics JSON")?;
    metrics.validate()?;
    Ok(metrics)
}

struct Loaded {
    doc: vitrine::PosterDocument,
    session: vitrine::PosterSession,
    fonts: Option<vitrine::FontBook>,
}

fn load(in_path: &Path, metrics: Option<&Path>) -> anyhow::Result<Loaded> {
    let doc = vitrine::PosterDocument::from_path(in_path)?;
    let base = in_path.parent().unwrap_or_else(|| Path::new("."));

    let mut session =
        vitrine::PosterSession::new(read_metrics(metrics)?, vitrine::ManipulationConfig::default())?;
    let sources = doc.photo_sources(base)?;
    session
        .load_photos(sources)
        .with_context(|| format!("load photos for '{}'", in_path.display()))?;
    session.apply_layouts(&doc.layouts);
    session.set_text(doc.text.clone());

    let fonts = doc
        .font_sources(base)?
        .map(vitrine::FontBook::new)
        .transpose()?;
    Ok(Loaded {
        doc,
        session,
        fonts,
    })
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let Loaded {
        mut session,
        mut fonts,
        ..
    } = load(&args.in_path, args.metrics.as_deref())?;

    let json = if args.solution_only {
        serde_json::to_string_pretty(&session.solve_layout())?
    } else {
        let plan = match fonts.as_mut() {
            Some(book) => session.plan(book),
            None => session.plan(&mut vitrine::FixedAdvance::default()),
        };
        serde_json::to_string_pretty(&plan)?
    };
    println!("{json}");
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let Loaded {
        doc,
        session,
        mut fonts,
    } = load(&args.in_path, args.metrics.as_deref())?;

    let palette = match args.theme {
        Some(theme) => vitrine::ThemeChoice::from(theme).palette(),
        None => doc.palette(),
    };
    if fonts.is_none() {
        eprintln!("note: no fonts in document; text is laid out but not drawn");
    }

    let poster = match args.preview_height {
        Some(height) => session.preview(&palette, fonts.as_mut(), f64::from(height))?,
        None => {
            let mut settings = vitrine::ExportSettings::default().with_env_overrides();
            if let Some(q) = args.quality {
                anyhow::ensure!((1..=100).contains(&q), "quality must be in 1..=100");
                settings.jpeg_quality = q;
            }
            session.export(&palette, fonts.as_mut(), &settings)?
        }
    };

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &poster.bytes)
        .with_context(|| format!("write poster '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{}, {:?})",
        args.out.display(),
        poster.width,
        poster.height,
        poster.format
    );
    Ok(())
}
