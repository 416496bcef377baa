use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use flexi_logger::{Logger, LoggerHandle};
use image::GrayImage;
use log::{info, warn};
use serde::Serialize;
use tx_core::{BorderMode, Image};
use tx_lbp::{
    LabelHistogram, LabelRaster, LbpConfig, RegionPolicy, SamplingMode, ThresholdRule,
    TransitionScan, compute_code_raster_3x3, compute_label_raster, compute_label_raster_par,
};

#[derive(Parser, Debug)]
#[command(name = "tx_gallery")]
#[command(about = "Compute uniform LBP labels and histograms for image files")]
struct Cli {
    /// Log specification, e.g. `info` or `tx_lbp=debug`
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Circular ring of interpolated samples
    #[command(name = "interpolated")]
    Interpolated(InterpolatedArgs),
    /// Fixed 3x3 neighborhood over the whole image
    #[command(name = "fixed3x3")]
    Fixed3x3(Fixed3x3Args),
    /// Plain 8-bit 3x3 codes over the image interior
    #[command(name = "raw3x3")]
    Raw3x3(Raw3x3Args),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out/lbp")]
    out: PathBuf,
    /// Split rows across threads
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

#[derive(Args, Debug, Clone)]
struct InterpolatedArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 8)]
    points: usize,
    #[arg(long, default_value_t = 1.0)]
    radius: f64,
    #[arg(long, value_enum, default_value_t = ThresholdArg::Ge)]
    threshold: ThresholdArg,
    #[arg(long, value_enum, default_value_t = ScanArg::Truncated)]
    scan: ScanArg,
    #[arg(long, value_enum, default_value_t = RegionArg::Centered)]
    region: RegionArg,
}

#[derive(Args, Debug, Clone)]
struct Fixed3x3Args {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, value_enum, default_value_t = ThresholdArg::Gt)]
    threshold: ThresholdArg,
    #[arg(long, value_enum, default_value_t = ScanArg::Open)]
    scan: ScanArg,
    #[arg(long, value_enum, default_value_t = BorderArg::Zero)]
    border: BorderArg,
}

#[derive(Args, Debug, Clone)]
struct Raw3x3Args {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out/lbp")]
    out: PathBuf,
    #[arg(long, value_enum, default_value_t = ThresholdArg::Gt)]
    threshold: ThresholdArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ThresholdArg {
    Ge,
    Gt,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ScanArg {
    Truncated,
    Open,
    Circular,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum RegionArg {
    Centered,
    Legacy,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum BorderArg {
    Zero,
    Clamp,
    Reflect101,
}

impl From<ThresholdArg> for ThresholdRule {
    fn from(arg: ThresholdArg) -> Self {
        match arg {
            ThresholdArg::Ge => ThresholdRule::GreaterOrEqual,
            ThresholdArg::Gt => ThresholdRule::Greater,
        }
    }
}

impl From<ScanArg> for TransitionScan {
    fn from(arg: ScanArg) -> Self {
        match arg {
            ScanArg::Truncated => TransitionScan::Truncated,
            ScanArg::Open => TransitionScan::Open,
            ScanArg::Circular => TransitionScan::Circular,
        }
    }
}

impl From<RegionArg> for RegionPolicy {
    fn from(arg: RegionArg) -> Self {
        match arg {
            RegionArg::Centered => RegionPolicy::Centered,
            RegionArg::Legacy => RegionPolicy::Legacy,
        }
    }
}

impl From<BorderArg> for BorderMode<u8> {
    fn from(arg: BorderArg) -> Self {
        match arg {
            BorderArg::Zero => BorderMode::Constant(0),
            BorderArg::Clamp => BorderMode::Clamp,
            BorderArg::Reflect101 => BorderMode::Reflect101,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct HistogramDto {
    bins: usize,
    processed_pixels: u64,
    counts: Vec<u64>,
    normalized: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaLbp {
    mode: &'static str,
    points: usize,
    radius: Option<f64>,
    threshold: &'static str,
    scan: &'static str,
    region: Option<&'static str>,
    border: Option<&'static str>,
    input_size: [usize; 2],
    raster_size: [usize; 2],
    processed: [usize; 4],
    parallel: bool,
}

#[derive(Debug, Clone, Serialize)]
struct MetaRaw {
    threshold: &'static str,
    input_size: [usize; 2],
    codes_size: [usize; 2],
    origin: [usize; 2],
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = setup_logging(&cli.log_level)?;

    match cli.cmd {
        Command::Interpolated(args) => run_interpolated(args),
        Command::Fixed3x3(args) => run_fixed3x3(args),
        Command::Raw3x3(args) => run_raw3x3(args),
    }
}

fn setup_logging(spec: &str) -> Result<LoggerHandle> {
    Logger::try_with_str(spec)
        .with_context(|| format!("parsing log specification '{spec}'"))?
        .log_to_stderr()
        .start()
        .context("starting logger")
}

fn run_interpolated(args: InterpolatedArgs) -> Result<()> {
    if args.points == 0 || args.points > tx_lbp::MAX_POINTS {
        bail!(
            "--points must be within 1..={}, got {}.",
            tx_lbp::MAX_POINTS,
            args.points
        );
    }

    let cfg = LbpConfig::interpolated(args.points, args.radius)
        .with_threshold(args.threshold.into())
        .with_scan(args.scan.into())
        .with_region(args.region.into());

    let meta = |img: &Image<u8>, raster: &LabelRaster| MetaLbp {
        mode: "interpolated",
        points: cfg.points,
        radius: Some(cfg.radius),
        threshold: threshold_name(cfg.threshold),
        scan: scan_name(cfg.scan),
        region: Some(region_name(cfg.region)),
        border: None,
        input_size: [img.width(), img.height()],
        raster_size: [raster.labels().width(), raster.labels().height()],
        processed: rect_array(raster),
        parallel: args.common.parallel,
    };

    run_case(&args.common, "interpolated", &cfg, meta)
}

fn run_fixed3x3(args: Fixed3x3Args) -> Result<()> {
    let cfg = LbpConfig {
        mode: SamplingMode::Fixed3x3 {
            border: args.border.into(),
        },
        ..LbpConfig::fixed3x3()
    }
    .with_threshold(args.threshold.into())
    .with_scan(args.scan.into());

    let meta = |img: &Image<u8>, raster: &LabelRaster| MetaLbp {
        mode: "fixed3x3",
        points: cfg.effective_points(),
        radius: None,
        threshold: threshold_name(cfg.threshold),
        scan: scan_name(cfg.scan),
        region: None,
        border: Some(border_name(args.border)),
        input_size: [img.width(), img.height()],
        raster_size: [raster.labels().width(), raster.labels().height()],
        processed: rect_array(raster),
        parallel: args.common.parallel,
    };

    run_case(&args.common, "fixed3x3", &cfg, meta)
}

fn run_case(
    common: &CommonArgs,
    case_name: &str,
    cfg: &LbpConfig,
    meta: impl Fn(&Image<u8>, &LabelRaster) -> MetaLbp,
) -> Result<()> {
    ensure_file_exists(&common.input, "input")?;
    let img = load_input_u8(&common.input)?;

    let (raster, hist) = if common.parallel {
        let raster = compute_label_raster_par(&img.as_view(), cfg)
            .with_context(|| format!("computing {case_name} labels"))?;
        let hist = LabelHistogram::from_raster_par(&raster);
        (raster, hist)
    } else {
        let raster = compute_label_raster(&img.as_view(), cfg)
            .with_context(|| format!("computing {case_name} labels"))?;
        let hist = raster.histogram();
        (raster, hist)
    };

    let case_dir = common.out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    write_json(
        case_dir.join("histogram.json"),
        &HistogramDto {
            bins: hist.num_bins(),
            processed_pixels: hist.total(),
            counts: hist.counts().to_vec(),
            normalized: hist.normalized(),
        },
    )?;
    write_json(case_dir.join("meta.json"), &meta(&img, &raster))?;
    save_labels_vis(case_dir.join("labels.png"), raster)?;

    info!(
        "{case_name}: {}x{} input, {} labelled pixels, {} bins -> {}",
        img.width(),
        img.height(),
        hist.total(),
        hist.num_bins(),
        case_dir.display()
    );

    Ok(())
}

fn load_input_u8(path: &Path) -> Result<Image<u8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma.into_raw();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing tx-core image from {}", path.display()))
}

fn run_raw3x3(args: Raw3x3Args) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;
    let img = load_input_u8(&args.input)?;
    let threshold = ThresholdRule::from(args.threshold);
    let codes = compute_code_raster_3x3(&img.as_view(), threshold);

    let case_dir = args.out.join("raw3x3");
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    write_json(
        case_dir.join("meta.json"),
        &MetaRaw {
            threshold: threshold_name(threshold),
            input_size: [img.width(), img.height()],
            codes_size: [codes.width(), codes.height()],
            origin: [1, 1],
        },
    )?;
    save_u8_image(case_dir.join("codes.png"), codes)?;

    info!(
        "raw3x3: {}x{} input -> {}",
        img.width(),
        img.height(),
        case_dir.display()
    );
    Ok(())
}

/// Stretches labels `0..=P+1` over `0..=255` so the raster is viewable.
fn save_labels_vis(path: PathBuf, raster: LabelRaster) -> Result<()> {
    let top = (raster.num_bins() - 1) as f32;
    let mut labels = raster.into_labels();
    for l in labels.data_mut() {
        *l = (*l as f32 * 255.0 / top).round() as u8;
    }
    save_u8_image(path, labels)
}

fn save_u8_image(path: PathBuf, img: Image<u8>) -> Result<()> {
    if img.is_empty() {
        warn!(
            "skipping {}: {}x{} image has nothing to show",
            path.display(),
            img.width(),
            img.height()
        );
        return Ok(());
    }

    let (w, h) = img.dimensions();
    let gray = GrayImage::from_raw(w as u32, h as u32, img.into_vec())
        .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn rect_array(raster: &LabelRaster) -> [usize; 4] {
    let r = raster.processed();
    [r.x, r.y, r.width, r.height]
}

fn threshold_name(rule: ThresholdRule) -> &'static str {
    match rule {
        ThresholdRule::GreaterOrEqual => ">=",
        ThresholdRule::Greater => ">",
    }
}

fn scan_name(scan: TransitionScan) -> &'static str {
    match scan {
        TransitionScan::Truncated => "Truncated",
        TransitionScan::Open => "Open",
        TransitionScan::Circular => "Circular",
    }
}

fn region_name(region: RegionPolicy) -> &'static str {
    match region {
        RegionPolicy::Centered => "Centered",
        RegionPolicy::Legacy => "Legacy",
    }
}

fn border_name(border: BorderArg) -> &'static str {
    match border {
        BorderArg::Zero => "Constant(0)",
        BorderArg::Clamp => "Clamp",
        BorderArg::Reflect101 => "Reflect101",
    }
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
