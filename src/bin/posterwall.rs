use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "posterwall", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a poster wall from images and export it as a PNG.
    Render(RenderArgs),
    /// Print a collection title/vibe for an image count.
    Theme(ThemeArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Source image files. Unreadable or undecodable files are skipped.
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Wall settings JSON (camelCase fields). Defaults apply when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Directory receiving the generated POSTER_XXXXX.png.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Palette to render with.
    #[arg(long, value_enum, default_value_t = ThemeChoice::Dark)]
    theme: ThemeChoice,

    /// Canvas width override.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height override.
    #[arg(long)]
    height: Option<u32>,

    /// Grid rows override.
    #[arg(long)]
    rows: Option<u32>,

    /// Grid columns override.
    #[arg(long)]
    cols: Option<u32>,

    /// Cell gap override, in local pixels.
    #[arg(long)]
    gap: Option<f64>,

    /// Rotation override, in degrees.
    #[arg(long)]
    angle: Option<f64>,

    /// Uniform zoom override.
    #[arg(long)]
    scale: Option<f64>,

    /// Vertical-only scale multiplier override.
    #[arg(long)]
    scale_y: Option<f64>,

    /// X-shear override.
    #[arg(long)]
    skew: Option<f64>,

    /// Pivot x offset override, in device pixels.
    #[arg(long)]
    offset_x: Option<f64>,

    /// Pivot y offset override, in device pixels.
    #[arg(long)]
    offset_y: Option<f64>,

    /// Overlay wash opacity override, 0..=1.
    #[arg(long)]
    overlay: Option<f32>,

    /// Fitting mode override.
    #[arg(long, value_enum)]
    fill: Option<FillChoice>,
}

#[derive(Parser, Debug)]
struct ThemeArgs {
    /// Number of posters in the collection.
    #[arg(long)]
    count: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeChoice {
    Dark,
    Light,
}

impl From<ThemeChoice> for posterwall::Theme {
    fn from(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Dark => Self::Dark,
            ThemeChoice::Light => Self::Light,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FillChoice {
    Cover,
    Stretch,
    Contain,
}

impl From<FillChoice> for posterwall::FillMode {
    fn from(choice: FillChoice) -> Self {
        match choice {
            FillChoice::Cover => Self::Cover,
            FillChoice::Stretch => Self::Stretch,
            FillChoice::Contain => Self::Contain,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Theme(args) => cmd_theme(args),
    }
}

fn read_settings_json(path: &Path) -> anyhow::Result<posterwall::WallSettings> {
    let f = File::open(path).with_context(|| format!("open settings '{}'", path.display()))?;
    let r = BufReader::new(f);
    let settings: posterwall::WallSettings =
        serde_json::from_reader(r).with_context(|| "parse settings JSON")?;
    Ok(settings)
}

fn resolve_settings(args: &RenderArgs) -> anyhow::Result<posterwall::WallSettings> {
    let mut settings = match &args.settings {
        Some(path) => read_settings_json(path)?,
        None => posterwall::WallSettings::default(),
    };

    if let Some(v) = args.width {
        settings.width = v;
    }
    if let Some(v) = args.height {
        settings.height = v;
    }
    if let Some(v) = args.rows {
        settings.rows = v;
    }
    if let Some(v) = args.cols {
        settings.cols = v;
    }
    if let Some(v) = args.gap {
        settings.gap = v;
    }
    if let Some(v) = args.angle {
        settings.angle = v;
    }
    if let Some(v) = args.scale {
        settings.scale = v;
    }
    if let Some(v) = args.scale_y {
        settings.scale_y = v;
    }
    if let Some(v) = args.skew {
        settings.skew = v;
    }
    if let Some(v) = args.offset_x {
        settings.offset_x = v;
    }
    if let Some(v) = args.offset_y {
        settings.offset_y = v;
    }
    if let Some(v) = args.overlay {
        settings.overlay_opacity = v;
    }
    if let Some(v) = args.fill {
        settings.fill_mode = v.into();
    }

    settings.validate()?;
    Ok(settings)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let settings = resolve_settings(&args)?;

    let images = posterwall::load_images(&args.images);
    if images.len() < args.images.len() {
        eprintln!(
            "skipped {} of {} images",
            args.images.len() - images.len(),
            args.images.len()
        );
    }

    let frame = posterwall::render_wall(&settings, args.theme.into(), &images)?;

    let mut rng = rand::rng();
    let name = posterwall::poster_filename(&mut rng);
    let out = args.out_dir.join(format!("{name}.png"));
    posterwall::export_png(&frame, &out)?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_theme(args: ThemeArgs) -> anyhow::Result<()> {
    let theme = posterwall::collection_theme(None, args.count);
    println!("{}", serde_json::to_string_pretty(&theme)?);
    Ok(())
}
