//! Depth-slice extraction service.
//!
//! Reads a solver setup descriptor, rebuilds the processor-box geometry and
//! cuts the requested component at a fixed depth. The result is logged and
//! optionally written as JSON for a map renderer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use field_parser::ReaderConfig;
use sem_common::{FieldType, Setup};
use slice_processor::{DepthSlice, DepthSliceExtractor, ExtractorConfig, SliceRequest};

#[derive(Parser, Debug)]
#[command(name = "slicer")]
#[command(about = "Extract horizontal depth slices from spectral-element snapshots")]
struct Args {
    /// Setup descriptor written by the solver
    #[arg(long, default_value = "../INPUT/setup")]
    setup: PathBuf,

    /// Directory holding the per-box field records
    #[arg(short, long)]
    dir: PathBuf,

    /// Kind of field stored in the directory (earth-model, velocity-snapshot)
    #[arg(long, default_value = "earth-model")]
    field_type: FieldType,

    /// Component to slice (e.g. vsv, rho, vx)
    #[arg(short, long)]
    component: String,

    /// Depth below the reference radius in km
    #[arg(long)]
    depth: f64,

    /// Snapshot iteration (velocity snapshots only)
    #[arg(short, long, default_value_t = 0)]
    iteration: usize,

    /// Lower colour-scale bound
    #[arg(long, allow_negative_numbers = true)]
    valmin: Option<f32>,

    /// Upper colour-scale bound
    #[arg(long, allow_negative_numbers = true)]
    valmax: Option<f32>,

    /// Read processor boxes in parallel
    #[arg(long)]
    parallel: bool,

    /// Record unreadable boxes and continue with the rest
    #[arg(long)]
    skip_failed_boxes: bool,

    /// Accept records whose length markers disagree with the payload
    #[arg(long)]
    no_verify_markers: bool,

    /// Write the slice as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level, args.json_logs)?;

    info!("Starting depth slicer");

    let setup = Setup::from_path(&args.setup)
        .with_context(|| format!("Failed to load setup {}", args.setup.display()))?;
    info!(
        setup = %args.setup.display(),
        boxes = setup.discretization.n_procs(),
        lpd = setup.discretization.lpd,
        "Loaded setup"
    );

    let mut reader_config = ReaderConfig::from_env();
    reader_config.directory = args.dir.clone();
    reader_config.field_type = args.field_type;
    if args.no_verify_markers {
        reader_config.verify_markers = false;
    }

    let mut config = ExtractorConfig::from_env();
    config.parallel |= args.parallel;
    config.skip_failed_boxes |= args.skip_failed_boxes;

    let extractor = DepthSliceExtractor::from_setup(&setup, reader_config, config)?;

    let extent = extractor.geometry().map_extent();
    info!(
        lat_min = extent.lat_min,
        lat_max = extent.lat_max,
        lon_min = extent.lon_min,
        lon_max = extent.lon_max,
        "Map extent"
    );

    let mut request = SliceRequest::new(&args.component, args.depth).at_iteration(args.iteration);
    match (args.valmin, args.valmax) {
        (Some(min), Some(max)) => request = request.with_display_bounds(min, max),
        (None, None) => {}
        _ => bail!("--valmin and --valmax must be given together"),
    }

    let slice = extractor.extract(&request)?;
    log_summary(&slice);

    if let Some(path) = &args.output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_slice(file, &slice)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Wrote slice");
    }

    Ok(())
}

/// Serialize `slice` as JSON and flush it, surfacing the final write error.
fn write_slice<W: Write>(writer: W, slice: &DepthSlice) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer(&mut writer, slice)?;
    writer.flush()?;
    Ok(())
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}

fn log_summary(slice: &DepthSlice) {
    let (lo, hi) = slice.color_range();
    info!(
        title = %slice.title(),
        unit = slice.unit.as_deref().unwrap_or("-"),
        radius_km = slice.label_radius_km,
        min = slice.min,
        max = slice.max,
        color_min = lo,
        color_max = hi,
        "Slice summary"
    );

    for b in &slice.boxes {
        info!(
            box_index = b.box_index,
            layer = b.layer_index,
            radius_m = b.radius_m,
            range = ?b.range,
            "Box"
        );
    }

    for failure in &slice.failures {
        warn!(box_index = failure.box_index, error = %failure.message, "Box skipped");
    }
}
