use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use bannergrid::{
    BandPlacement, BannerConfig, Color, FolderList, InfoBandConfig, ResampleFilter,
    WatermarkConfig, WatermarkPlacement,
};

#[derive(Parser, Debug)]
#[command(name = "bannergrid", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a banner from one or more image folders.
    Make(MakeArgs),
    /// Normalize a HEX / RGB / CMYK color and print every notation.
    Color(ColorArgs),
    /// Check input folders and output root without composing.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Banner config JSON. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input folder (repeatable, order is kept).
    #[arg(long = "folder")]
    folders: Vec<PathBuf>,

    /// Text file with one input folder per line.
    #[arg(long)]
    folder_list: Option<PathBuf>,

    /// Root under which the run folder is created.
    #[arg(long)]
    out_root: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct MakeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Banner name; becomes the capitalized prefix of the run folder.
    #[arg(long)]
    name: Option<String>,

    /// Canvas edge length in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Background color behind the grid.
    #[arg(long)]
    background: Option<Color>,

    /// Info band color (`#RRGGBB`, `r,g,b`, `rgb(..)`, `c,m,y,k` or `cmyk(..)`).
    #[arg(long)]
    band_color: Option<Color>,

    #[arg(long, value_enum)]
    band_placement: Option<PlacementArg>,

    /// Share of the canvas height used by the band, in (0, 1).
    #[arg(long)]
    band_height: Option<f64>,

    /// Drop the info band even if the config defines one.
    #[arg(long, default_value_t = false)]
    no_band: bool,

    /// Draw the band without its text label.
    #[arg(long, default_value_t = false)]
    no_label: bool,

    /// Font file for the band label.
    #[arg(long)]
    font: Option<PathBuf>,

    /// System font family for the band label.
    #[arg(long)]
    font_family: Option<String>,

    /// Watermark image.
    #[arg(long)]
    watermark: Option<PathBuf>,

    /// Watermark transparency, 0 (invisible) to 100 (opaque).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    transparency: Option<u8>,

    #[arg(long, value_enum)]
    watermark_placement: Option<WatermarkPlacementArg>,

    /// Fill unused grid cells by cycling through the images.
    #[arg(long, default_value_t = false)]
    fill_empty: bool,

    #[arg(long, value_enum)]
    filter: Option<FilterArg>,

    /// Remember the resolved input folders in this file.
    #[arg(long)]
    save_folder_list: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ColorArgs {
    /// Color text in any supported notation.
    value: String,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlacementArg {
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WatermarkPlacementArg {
    Stretch,
    Center,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterArg {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<PlacementArg> for BandPlacement {
    fn from(value: PlacementArg) -> Self {
        match value {
            PlacementArg::Top => BandPlacement::Top,
            PlacementArg::Bottom => BandPlacement::Bottom,
        }
    }
}

impl From<WatermarkPlacementArg> for WatermarkPlacement {
    fn from(value: WatermarkPlacementArg) -> Self {
        match value {
            WatermarkPlacementArg::Stretch => WatermarkPlacement::Stretch,
            WatermarkPlacementArg::Center => WatermarkPlacement::Center,
        }
    }
}

impl From<FilterArg> for ResampleFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::Nearest => ResampleFilter::Nearest,
            FilterArg::Triangle => ResampleFilter::Triangle,
            FilterArg::CatmullRom => ResampleFilter::CatmullRom,
            FilterArg::Gaussian => ResampleFilter::Gaussian,
            FilterArg::Lanczos3 => ResampleFilter::Lanczos3,
        }
    }
}

const DEFAULT_TRANSPARENCY: u8 = 50;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Make(args) => cmd_make(args),
        Command::Color(args) => cmd_color(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn base_config(input: &InputArgs) -> anyhow::Result<BannerConfig> {
    let mut cfg = match &input.config {
        Some(path) => BannerConfig::from_path(path)?,
        None => BannerConfig::default(),
    };
    if let Some(path) = &input.folder_list {
        cfg.input_folders = FolderList::load(path)?.folders;
    }
    if !input.folders.is_empty() {
        cfg.input_folders = input.folders.clone();
    }
    if let Some(root) = &input.out_root {
        cfg.output_root = root.clone();
    }
    Ok(cfg)
}

fn apply_make_flags(cfg: &mut BannerConfig, args: &MakeArgs) {
    if let Some(name) = &args.name {
        cfg.output_name = name.clone();
    }
    if let Some(size) = args.size {
        cfg.canvas_size = size;
    }
    if args.background.is_some() {
        cfg.background = args.background;
    }
    if args.fill_empty {
        cfg.fill_empty_cells = true;
    }
    if let Some(filter) = args.filter {
        cfg.filter = filter.into();
    }

    if let Some(color) = args.band_color {
        match cfg.info_band.as_mut() {
            Some(band) => band.color = color,
            None => cfg.info_band = Some(InfoBandConfig::new(color)),
        }
    }
    if let Some(band) = cfg.info_band.as_mut() {
        if let Some(placement) = args.band_placement {
            band.placement = placement.into();
        }
        if let Some(ratio) = args.band_height {
            band.height_ratio = ratio;
        }
        if args.no_label {
            band.label = false;
        }
        if args.font.is_some() {
            band.font = args.font.clone();
        }
        if args.font_family.is_some() {
            band.font_family = args.font_family.clone();
        }
    }
    if args.no_band {
        cfg.info_band = None;
    }

    if let Some(image) = &args.watermark {
        cfg.watermark = Some(WatermarkConfig {
            image: image.clone(),
            transparency: args.transparency.unwrap_or(DEFAULT_TRANSPARENCY),
            placement: args
                .watermark_placement
                .map(WatermarkPlacement::from)
                .unwrap_or_default(),
        });
    } else if let Some(wm) = cfg.watermark.as_mut() {
        if let Some(transparency) = args.transparency {
            wm.transparency = transparency;
        }
        if let Some(placement) = args.watermark_placement {
            wm.placement = placement.into();
        }
    }
}

fn cmd_make(args: MakeArgs) -> anyhow::Result<()> {
    let mut cfg = base_config(&args.input)?;
    apply_make_flags(&mut cfg, &args);
    cfg.validate()?;

    let report = bannergrid::preflight::check(&cfg).context("preflight failed")?;
    tracing::debug!(images = report.total_images(), "preflight ok");

    if let Some(path) = &args.save_folder_list {
        FolderList {
            folders: cfg.input_folders.clone(),
        }
        .save(path)?;
    }

    let fonts = bannergrid::font_provider_for(&cfg);
    let now = chrono::Local::now().naive_local();
    let out = bannergrid::run(&cfg, now, fonts.as_ref())?;

    println!("{}", out.display());
    Ok(())
}

fn cmd_color(args: ColorArgs) -> anyhow::Result<()> {
    let color = Color::parse(&args.value)?;
    let [r, g, b] = color.to_rgb();
    let [c, m, y, k] = color.to_cmyk();
    println!("hex  {}", color.to_hex());
    println!("rgb  {r},{g},{b}");
    println!("cmyk {c},{m},{y},{k}");
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let cfg = base_config(&args.input)?;
    if cfg.input_folders.is_empty() {
        anyhow::bail!("no input folders given");
    }
    let report = bannergrid::preflight::check(&cfg).context("preflight failed")?;
    for (folder, count) in &report.folders {
        println!("{count:>6}  {}", folder.display());
    }
    println!("{:>6}  total", report.total_images());
    Ok(())
}
