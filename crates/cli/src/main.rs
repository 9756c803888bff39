//! morpho CLI - image processing from the command line

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use morpho_algorithms::filters::{apply_rank, edge_magnitude, gaussian_filter, GaussianParams, RankOp};
use morpho_algorithms::label::{label, Connectivity};
use morpho_algorithms::measure::{measure, measure_with_intensity, RegionRecord};
use morpho_algorithms::morphology::{
    closing, dilate, erode, opening, remove_small_holes, remove_small_objects, skeletonize,
    StructuringElement,
};
use morpho_algorithms::neighborhood::{gaussian_radius, Kernel};
use morpho_algorithms::threshold::{
    threshold_adaptive_with, threshold_auto, threshold_global, AdaptiveMethod, AdaptiveParams,
    GlobalMethod,
};
use morpho_core::color::{invert, to_grayscale};
use morpho_core::io::{load, save};
use morpho_core::{AnyGrid, BoundaryPolicy, CastPolicy, DType, Grid, GridElement};
use morpho_parallel::{num_threads, set_num_threads, ProcessingMode, TiledProcessor};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "morpho")]
#[command(author, version, about = "Image filtering, thresholding, morphology and labeling", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Worker threads (1 runs sequentially; default uses every core)
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,

    /// Process neighborhood operations in slabs of this many rows
    #[arg(long, global = true)]
    tile_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show shape, type and statistics of an image
    Info {
        /// Input TIFF
        input: PathBuf,
    },
    /// Rank, Gaussian and edge filters
    Filter {
        #[command(subcommand)]
        algorithm: FilterCommands,
    },
    /// Grayscale to binary
    Threshold {
        #[command(subcommand)]
        algorithm: ThresholdCommands,
    },
    /// Binary morphology
    Morph {
        #[command(subcommand)]
        algorithm: MorphCommands,
    },
    /// Label connected components and measure them
    Label {
        /// Binary input (non-zero is foreground)
        input: PathBuf,
        /// Output label image (u32)
        output: PathBuf,
        /// Adjacency: face (4/6) or full (8/26)
        #[arg(short, long, default_value = "full")]
        connectivity: String,
        /// Image to measure intensity statistics on
        #[arg(long)]
        intensity: Option<PathBuf>,
        /// Print region measurements as JSON
        #[arg(long)]
        json: bool,
    },
    /// Grayscale and polarity conversion
    Convert {
        #[command(subcommand)]
        algorithm: ConvertCommands,
    },
}

// ─── Filter subcommands ─────────────────────────────────────────────────

#[derive(Subcommand)]
enum FilterCommands {
    /// Minimum, maximum or median over a structuring element
    Rank {
        input: PathBuf,
        output: PathBuf,
        /// Statistic: min, max, median
        #[arg(long, default_value = "median")]
        op: String,
        #[command(flatten)]
        element: ElementArgs,
        /// Boundary: edge, reflect, or a constant value
        #[arg(short, long, default_value = "edge")]
        boundary: String,
    },
    /// Separable Gaussian smoothing
    Gaussian {
        input: PathBuf,
        output: PathBuf,
        /// Standard deviation in pixels
        #[arg(short, long, default_value = "1.0")]
        sigma: f64,
        /// Kernel half-width in standard deviations
        #[arg(long, default_value = "4.0")]
        truncate: f64,
        /// Boundary: edge, reflect, or a constant value
        #[arg(short, long, default_value = "edge")]
        boundary: String,
    },
    /// Gradient magnitude of a 2D image
    Edge {
        input: PathBuf,
        output: PathBuf,
        /// Operator: sobel, prewitt
        #[arg(long, default_value = "sobel")]
        operator: String,
    },
}

// ─── Threshold subcommands ──────────────────────────────────────────────

#[derive(Subcommand)]
enum ThresholdCommands {
    /// Fixed cutoff (the image mean when omitted)
    Global {
        input: PathBuf,
        output: PathBuf,
        #[arg(short, long, allow_hyphen_values = true)]
        cutoff: Option<f64>,
    },
    /// Otsu's between-class variance cutoff
    Otsu { input: PathBuf, output: PathBuf },
    /// Per-pixel cutoff from a local window statistic
    Adaptive {
        input: PathBuf,
        output: PathBuf,
        /// Odd window extent on every axis
        #[arg(short, long, default_value = "35")]
        window: usize,
        /// Subtracted from the local statistic
        #[arg(short, long, default_value = "0.0", allow_hyphen_values = true)]
        offset: f64,
        /// Statistic: mean, median, gaussian
        #[arg(short, long, default_value = "mean")]
        method: String,
    },
}

// ─── Morphology subcommands ─────────────────────────────────────────────

#[derive(Args)]
struct ElementArgs {
    /// Structuring element shape: square, cross, disk
    #[arg(long, default_value = "square")]
    shape: String,
    /// Structuring element radius in pixels
    #[arg(short, long, default_value = "1")]
    radius: usize,
}

#[derive(Args)]
struct MorphArgs {
    /// Binary input (non-zero is foreground)
    input: PathBuf,
    output: PathBuf,
    #[command(flatten)]
    element: ElementArgs,
}

#[derive(Subcommand)]
enum MorphCommands {
    /// Erosion: keep pixels where the element fits
    Erode(MorphArgs),
    /// Dilation: grow foreground by the element
    Dilate(MorphArgs),
    /// Opening: removes foreground smaller than the element
    Open(MorphArgs),
    /// Closing: fills background gaps smaller than the element
    Close(MorphArgs),
    /// Thin 2D foreground to one-pixel-wide lines
    Skeleton { input: PathBuf, output: PathBuf },
    /// Remove small objects and fill small holes
    Clean {
        input: PathBuf,
        output: PathBuf,
        /// Objects with fewer pixels are removed
        #[arg(long, default_value = "0")]
        min_size: usize,
        /// Enclosed holes with fewer pixels are filled
        #[arg(long, default_value = "0")]
        max_hole: usize,
        /// Adjacency: face (4/6) or full (8/26)
        #[arg(short, long, default_value = "full")]
        connectivity: String,
    },
}

// ─── Convert subcommands ────────────────────────────────────────────────

#[derive(Subcommand)]
enum ConvertCommands {
    /// RGB to float grayscale in [0, 1]
    Gray { input: PathBuf, output: PathBuf },
    /// Swap dark and bright (foreground and background for masks)
    Invert { input: PathBuf, output: PathBuf },
}

// ─── Execution ──────────────────────────────────────────────────────────

/// Whether and how neighborhood operations are tiled
#[derive(Debug, Clone, Copy)]
struct Exec {
    tile_size: Option<usize>,
    mode: ProcessingMode,
}

impl Exec {
    fn new(threads: Option<usize>, tile_size: Option<usize>) -> Self {
        let mode = thread_mode(threads, set_num_threads);
        debug!(threads = num_threads(), ?mode, ?tile_size, "execution");
        Self { tile_size, mode }
    }

    /// Run `op` on the whole grid or tile by tile. `halo` is how far the
    /// operation reads from an output pixel along axis 0.
    fn run<T, U, F>(&self, grid: &Grid<T>, halo: usize, op: F) -> Result<Grid<U>>
    where
        T: GridElement,
        U: GridElement,
        F: Fn(&Grid<T>) -> morpho_core::Result<Grid<U>> + Sync + Send,
    {
        let Some(tile_size) = self.tile_size else {
            return Ok(op(grid)?);
        };
        let tiled = TiledProcessor::new(tile_size, halo)?.with_mode(self.mode);
        Ok(tiled.process(grid, op)?)
    }

    fn whole_grid_only(&self, name: &str) {
        if self.tile_size.is_some() {
            warn!("{} needs the whole grid; --tile-size ignored", name);
        }
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

/// Size the pool with `size_pool` whenever `--threads` is given; one thread
/// also skips the parallel dispatch.
fn thread_mode(threads: Option<usize>, size_pool: impl FnOnce(usize) -> bool) -> ProcessingMode {
    let Some(n) = threads else {
        return ProcessingMode::Parallel;
    };
    if !size_pool(n) {
        warn!(n, "thread pool already initialized");
    }
    if n == 1 {
        ProcessingMode::Sequential
    } else {
        ProcessingMode::Parallel
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to install logger")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn read_grid(path: &Path) -> Result<AnyGrid> {
    let pb = spinner("Reading image...");
    let grid = load(path).with_context(|| format!("Failed to read {}", path.display()))?;
    pb.finish_and_clear();
    info!("Input: {:?} {}", grid.shape(), grid.dtype());
    Ok(grid)
}

/// Float grayscale: RGB is converted, anything else rescaled to [0, 1]
fn read_gray(path: &Path) -> Result<Grid<f64>> {
    let grid = read_grid(path)?;
    if is_rgb(grid.shape()) {
        return grayscale(&grid).context("Failed to convert to grayscale");
    }
    Ok(grid.cast(DType::F64, CastPolicy::Rescale).into_f64()?)
}

fn read_binary(path: &Path) -> Result<Grid<bool>> {
    let grid = read_grid(path)?;
    Ok(grid.cast(DType::Bool, CastPolicy::Clip).into_bool()?)
}

fn write_grid(grid: impl Into<AnyGrid>, path: &Path) -> Result<()> {
    let pb = spinner("Writing output...");
    save(&grid.into(), path).with_context(|| format!("Failed to write {}", path.display()))?;
    pb.finish_and_clear();
    Ok(())
}

fn done(name: &str, path: &Path, elapsed: Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

fn is_rgb(shape: &[usize]) -> bool {
    shape.len() == 3 && shape[2] == 3
}

fn grayscale(grid: &AnyGrid) -> morpho_core::Result<Grid<f64>> {
    match grid {
        AnyGrid::U8(g) => to_grayscale(g),
        AnyGrid::U16(g) => to_grayscale(g),
        AnyGrid::U32(g) => to_grayscale(g),
        AnyGrid::F64(g) => to_grayscale(g),
        AnyGrid::Bool(g) => to_grayscale(g),
    }
}

fn inverted(grid: &AnyGrid) -> AnyGrid {
    match grid {
        AnyGrid::U8(g) => invert(g).into(),
        AnyGrid::U16(g) => invert(g).into(),
        AnyGrid::U32(g) => invert(g).into(),
        AnyGrid::F64(g) => invert(g).into(),
        AnyGrid::Bool(g) => invert(g).into(),
    }
}

fn parse_element(args: &ElementArgs, ndim: usize) -> Result<StructuringElement> {
    let element = match args.shape.to_lowercase().as_str() {
        "square" | "sq" | "box" => StructuringElement::square(ndim, args.radius),
        "cross" | "cr" => StructuringElement::cross(ndim, args.radius),
        "disk" | "circle" | "ball" => StructuringElement::disk(ndim, args.radius),
        _ => anyhow::bail!(
            "Unknown shape: {}. Use square, cross, or disk.",
            args.shape
        ),
    };
    element.context("Invalid structuring element")
}

fn parse_boundary(s: &str) -> Result<BoundaryPolicy<f64>> {
    match s.to_lowercase().as_str() {
        "edge" | "extend" | "nearest" => Ok(BoundaryPolicy::EdgeExtend),
        "reflect" | "mirror" => Ok(BoundaryPolicy::Reflect),
        other => other
            .parse::<f64>()
            .map(BoundaryPolicy::Constant)
            .with_context(|| format!("Unknown boundary: {}. Use edge, reflect, or a number.", s)),
    }
}

fn parse_rank_op(s: &str) -> Result<RankOp> {
    match s.to_lowercase().as_str() {
        "min" | "minimum" => Ok(RankOp::Min),
        "max" | "maximum" => Ok(RankOp::Max),
        "median" | "med" => Ok(RankOp::Median),
        _ => anyhow::bail!("Unknown rank operation: {}. Use min, max, or median.", s),
    }
}

fn parse_connectivity(s: &str) -> Result<Connectivity> {
    match s.to_lowercase().as_str() {
        "face" | "4" | "6" => Ok(Connectivity::Face),
        "full" | "8" | "26" => Ok(Connectivity::Full),
        _ => anyhow::bail!("Unknown connectivity: {}. Use face or full.", s),
    }
}

fn parse_adaptive_method(s: &str) -> Result<AdaptiveMethod> {
    match s.to_lowercase().as_str() {
        "mean" => Ok(AdaptiveMethod::LocalMeanOffset),
        "median" => Ok(AdaptiveMethod::LocalMedianOffset),
        "gaussian" | "gauss" => Ok(AdaptiveMethod::LocalGaussianOffset),
        _ => anyhow::bail!("Unknown method: {}. Use mean, median, or gaussian.", s),
    }
}

/// Horizontal and vertical kernels of a 3x3 edge operator
fn edge_kernels(s: &str) -> Result<(Kernel, Kernel)> {
    match s.to_lowercase().as_str() {
        "sobel" => Ok((Kernel::sobel_horizontal(), Kernel::sobel_vertical())),
        "prewitt" => Ok((Kernel::prewitt_horizontal(), Kernel::prewitt_vertical())),
        _ => anyhow::bail!("Unknown operator: {}. Use sobel or prewitt.", s),
    }
}

fn reach(element: &StructuringElement) -> usize {
    element.half_extents().into_iter().max().unwrap_or(0)
}

/// Rows read on each side by an adaptive threshold with this window
fn adaptive_reach(window: usize, method: AdaptiveMethod) -> usize {
    match method {
        AdaptiveMethod::LocalGaussianOffset => {
            let sigma = (window.saturating_sub(1)) as f64 / 6.0;
            ((4.0 * sigma).ceil() as usize).max(window / 2)
        }
        _ => window / 2,
    }
}

fn print_regions(records: &[RegionRecord]) {
    println!("{:>6} {:>8}  {:<24} bbox", "label", "area", "centroid");
    for r in records {
        let centroid: Vec<String> = r.centroid.iter().map(|c| format!("{:.2}", c)).collect();
        let bbox: Vec<String> = r.bbox.iter().map(|(lo, hi)| format!("{}..{}", lo, hi)).collect();
        print!(
            "{:>6} {:>8}  {:<24} {}",
            r.label,
            r.area,
            format!("({})", centroid.join(", ")),
            bbox.join(" x ")
        );
        if let Some(stats) = r.intensity {
            print!("  mean {:.4} [{:.4}, {:.4}]", stats.mean, stats.min, stats.max);
        }
        println!();
    }
}

fn morph(
    exec: &Exec,
    args: &MorphArgs,
    name: &str,
    passes: usize,
    op: fn(&Grid<bool>, &StructuringElement) -> morpho_core::Result<Grid<bool>>,
) -> Result<()> {
    let binary = read_binary(&args.input)?;
    let element = parse_element(&args.element, binary.ndim())?;
    let start = Instant::now();
    let result = exec
        .run(&binary, passes * reach(&element), |g| op(g, &element))
        .with_context(|| format!("{} failed", name))?;
    let elapsed = start.elapsed();
    info!("Foreground: {} -> {}", binary.count_true(), result.count_true());
    write_grid(result, &args.output)?;
    done(name, &args.output, elapsed);
    Ok(())
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;
    let exec = Exec::new(cli.threads, cli.tile_size);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let grid = read_grid(&input)?;
            let stats = grid.statistics();

            println!("File: {}", input.display());
            println!("Shape: {:?} ({} samples)", grid.shape(), grid.len());
            println!("Type: {}", grid.dtype());
            println!("\nStatistics:");
            if stats.count > 0 {
                println!("  Min: {:.4}", stats.min);
                println!("  Max: {:.4}", stats.max);
                println!("  Mean: {:.4}", stats.mean);
            }
            println!(
                "  Valid samples: {} ({:.1}%)",
                stats.count,
                100.0 * stats.count as f64 / grid.len() as f64
            );
            if let AnyGrid::Bool(mask) = &grid {
                let fg = mask.count_true();
                println!(
                    "  Foreground: {} ({:.1}%)",
                    fg,
                    100.0 * fg as f64 / mask.len() as f64
                );
            }
        }

        // ── Filters ──────────────────────────────────────────────────
        Commands::Filter { algorithm } => match algorithm {
            FilterCommands::Rank {
                input,
                output,
                op,
                element,
                boundary,
            } => {
                let op = parse_rank_op(&op)?;
                let boundary = parse_boundary(&boundary)?;
                let gray = read_gray(&input)?;
                let element = parse_element(&element, gray.ndim())?;
                let start = Instant::now();
                let result = exec
                    .run(&gray, reach(&element), |g| apply_rank(g, &element, op, boundary))
                    .context("Rank filter failed")?;
                let elapsed = start.elapsed();
                write_grid(result, &output)?;
                done("Rank filter", &output, elapsed);
            }

            FilterCommands::Gaussian {
                input,
                output,
                sigma,
                truncate,
                boundary,
            } => {
                let params = GaussianParams {
                    sigma,
                    truncate,
                    boundary: parse_boundary(&boundary)?,
                    channel_axis: None,
                };
                let halo =
                    gaussian_radius(sigma, truncate).context("invalid Gaussian parameters")?;
                let gray = read_gray(&input)?;
                let start = Instant::now();
                let result = exec
                    .run(&gray, halo, |g| gaussian_filter(g, &params))
                    .context("Gaussian filter failed")?;
                let elapsed = start.elapsed();
                write_grid(result, &output)?;
                done("Gaussian", &output, elapsed);
            }

            FilterCommands::Edge {
                input,
                output,
                operator,
            } => {
                let (horizontal, vertical) = edge_kernels(&operator)?;
                let gray = read_gray(&input)?;
                let start = Instant::now();
                let result = exec
                    .run(&gray, 1, |g| {
                        edge_magnitude(g, &horizontal, &vertical, BoundaryPolicy::EdgeExtend)
                    })
                    .context("Edge filter failed")?;
                let elapsed = start.elapsed();
                write_grid(result, &output)?;
                done("Edge magnitude", &output, elapsed);
            }
        },

        // ── Thresholds ───────────────────────────────────────────────
        Commands::Threshold { algorithm } => match algorithm {
            ThresholdCommands::Global {
                input,
                output,
                cutoff,
            } => {
                let gray = read_gray(&input)?;
                let start = Instant::now();
                let (cutoff, binary) = match cutoff {
                    Some(c) => (c, threshold_global(&gray, c)),
                    None => threshold_auto(&gray, GlobalMethod::Mean)
                        .context("Failed to compute mean cutoff")?,
                };
                let elapsed = start.elapsed();
                info!("Cutoff: {:.6}, foreground: {}", cutoff, binary.count_true());
                write_grid(binary, &output)?;
                done("Threshold", &output, elapsed);
            }

            ThresholdCommands::Otsu { input, output } => {
                let gray = read_gray(&input)?;
                let start = Instant::now();
                let (cutoff, binary) =
                    threshold_auto(&gray, GlobalMethod::Otsu).context("Otsu threshold failed")?;
                let elapsed = start.elapsed();
                info!("Otsu cutoff: {:.6}, foreground: {}", cutoff, binary.count_true());
                write_grid(binary, &output)?;
                done("Otsu threshold", &output, elapsed);
            }

            ThresholdCommands::Adaptive {
                input,
                output,
                window,
                offset,
                method,
            } => {
                let method = parse_adaptive_method(&method)?;
                let gray = read_gray(&input)?;
                let params = AdaptiveParams {
                    window: vec![window; gray.ndim()],
                    offset,
                    method,
                    ..Default::default()
                };
                let start = Instant::now();
                let binary = exec
                    .run(&gray, adaptive_reach(window, method), |g| {
                        threshold_adaptive_with(g, &params)
                    })
                    .context("Adaptive threshold failed")?;
                let elapsed = start.elapsed();
                info!("Foreground: {}", binary.count_true());
                write_grid(binary, &output)?;
                done("Adaptive threshold", &output, elapsed);
            }
        },

        // ── Morphology ───────────────────────────────────────────────
        Commands::Morph { algorithm } => match algorithm {
            MorphCommands::Erode(args) => morph(&exec, &args, "Erosion", 1, erode)?,
            MorphCommands::Dilate(args) => morph(&exec, &args, "Dilation", 1, dilate)?,
            MorphCommands::Open(args) => morph(&exec, &args, "Opening", 2, opening)?,
            MorphCommands::Close(args) => morph(&exec, &args, "Closing", 2, closing)?,

            MorphCommands::Skeleton { input, output } => {
                exec.whole_grid_only("skeletonize");
                let binary = read_binary(&input)?;
                let start = Instant::now();
                let result = skeletonize(&binary).context("Skeletonize failed")?;
                let elapsed = start.elapsed();
                info!("Skeleton pixels: {}", result.count_true());
                write_grid(result, &output)?;
                done("Skeleton", &output, elapsed);
            }

            MorphCommands::Clean {
                input,
                output,
                min_size,
                max_hole,
                connectivity,
            } => {
                exec.whole_grid_only("cleanup");
                let connectivity = parse_connectivity(&connectivity)?;
                let mut binary = read_binary(&input)?;
                let start = Instant::now();
                if min_size > 0 {
                    binary = remove_small_objects(&binary, min_size, connectivity)
                        .context("Failed to remove small objects")?;
                }
                if max_hole > 0 {
                    binary = remove_small_holes(&binary, max_hole, connectivity)
                        .context("Failed to fill small holes")?;
                }
                let elapsed = start.elapsed();
                write_grid(binary, &output)?;
                done("Cleaned mask", &output, elapsed);
            }
        },

        // ── Labeling ─────────────────────────────────────────────────
        Commands::Label {
            input,
            output,
            connectivity,
            intensity,
            json,
        } => {
            exec.whole_grid_only("labeling");
            let connectivity = parse_connectivity(&connectivity)?;
            let binary = read_binary(&input)?;
            let values = intensity.as_deref().map(read_gray).transpose()?;

            let start = Instant::now();
            let labeled = label(&binary, connectivity).context("Labeling failed")?;
            let records = match &values {
                Some(v) => measure_with_intensity(labeled.labels(), v)
                    .context("Intensity image does not match the mask")?,
                None => measure(labeled.labels()),
            };
            let elapsed = start.elapsed();
            info!("Components: {}", labeled.num_labels());

            write_grid(labeled.into_labels(), &output)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print_regions(&records);
                done("Labels", &output, elapsed);
            }
        }

        // ── Conversion ───────────────────────────────────────────────
        Commands::Convert { algorithm } => match algorithm {
            ConvertCommands::Gray { input, output } => {
                let grid = read_grid(&input)?;
                let start = Instant::now();
                let gray = grayscale(&grid).context("Grayscale conversion failed")?;
                let elapsed = start.elapsed();
                write_grid(gray, &output)?;
                done("Grayscale", &output, elapsed);
            }

            ConvertCommands::Invert { input, output } => {
                let grid = read_grid(&input)?;
                let start = Instant::now();
                let result = inverted(&grid);
                let elapsed = start.elapsed();
                write_grid(result, &output)?;
                done("Inverted", &output, elapsed);
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_thread_mode_sizes_pool() {
        let mut sized = Vec::new();
        let mode = thread_mode(Some(1), |n| {
            sized.push(n);
            true
        });
        assert_eq!(mode, ProcessingMode::Sequential);
        let mode = thread_mode(Some(4), |n| {
            sized.push(n);
            false
        });
        assert_eq!(mode, ProcessingMode::Parallel);
        assert_eq!(sized, vec![1, 4]);

        let mode = thread_mode(None, |_| panic!("pool sized without --threads"));
        assert_eq!(mode, ProcessingMode::Parallel);
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "morpho", "--tile-size", "64", "morph", "open", "in.tif", "out.tif", "--shape", "disk",
            "-r", "2",
        ])
        .unwrap();
        assert_eq!(cli.tile_size, Some(64));
        let Commands::Morph {
            algorithm: MorphCommands::Open(args),
        } = cli.command
        else {
            panic!("expected morph open");
        };
        assert_eq!(args.element.shape, "disk");
        assert_eq!(args.element.radius, 2);
    }

    #[test]
    fn test_parse_boundary() {
        assert_eq!(parse_boundary("edge").unwrap(), BoundaryPolicy::EdgeExtend);
        assert_eq!(parse_boundary("Reflect").unwrap(), BoundaryPolicy::Reflect);
        assert_eq!(parse_boundary("0.5").unwrap(), BoundaryPolicy::Constant(0.5));
        assert!(parse_boundary("wrap").is_err());
    }

    #[test]
    fn test_parse_element() {
        let args = ElementArgs {
            shape: "cross".to_string(),
            radius: 1,
        };
        let element = parse_element(&args, 3).unwrap();
        assert_eq!(element.shape(), &[3, 3, 3]);
        assert_eq!(reach(&element), 1);

        let bad = ElementArgs {
            shape: "star".to_string(),
            radius: 1,
        };
        assert!(parse_element(&bad, 2).is_err());
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!(parse_rank_op("MAX").unwrap(), RankOp::Max);
        assert_eq!(parse_connectivity("4").unwrap(), Connectivity::Face);
        assert_eq!(parse_connectivity("26").unwrap(), Connectivity::Full);
        assert!(parse_connectivity("5").is_err());
        assert_eq!(
            parse_adaptive_method("gaussian").unwrap(),
            AdaptiveMethod::LocalGaussianOffset
        );
        assert!(edge_kernels("canny").is_err());
    }

    #[test]
    fn test_adaptive_reach() {
        assert_eq!(adaptive_reach(7, AdaptiveMethod::LocalMeanOffset), 3);
        // sigma = 34 / 6, radius = ceil(4 * sigma) = 23
        assert_eq!(adaptive_reach(35, AdaptiveMethod::LocalGaussianOffset), 23);
    }

    #[test]
    fn test_invert_dispatch() {
        let grid = AnyGrid::from(Grid::filled(&[2, 2], 10u8).unwrap());
        match inverted(&grid) {
            AnyGrid::U8(g) => assert!(g.iter().all(|&v| v == 245)),
            other => panic!("unexpected {:?}", other.dtype()),
        }
    }
}
