use std::{error::Error, path::PathBuf, process};

use clap::Parser;
use env_logger::Env;
use log::{error, info};
use phantom_series::{
    IndexFallback, LoadOptions, SeriesLoader,
    options::DEFAULT_FILE_PATTERN,
};

#[derive(Debug, Parser)]
#[command(
    name = "phantom-series",
    about = "Load a phantom DICOM series and report its acquisition metadata"
)]
struct Args {
    /// Directory containing one DICOM file per slice
    series_dir: PathBuf,

    /// Substring selecting slice files in the directory
    #[arg(long, default_value = DEFAULT_FILE_PATTERN)]
    pattern: String,

    /// Fail on slices without InStackPositionNumber instead of parsing file names
    #[arg(long)]
    strict_index: bool,

    /// Decode slices one at a time
    #[arg(long)]
    sequential: bool,

    /// Write a PNG of one slice
    #[arg(long, value_name = "PNG")]
    preview: Option<PathBuf>,

    /// Slice rendered by --preview (defaults to the center slice)
    #[arg(long, requires = "preview")]
    slice: Option<usize>,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        error!("{err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let fallback = if args.strict_index {
        IndexFallback::Strict
    } else {
        IndexFallback::FilenameSegment
    };
    let options = LoadOptions::default()
        .with_file_pattern(args.pattern.as_str())
        .with_index_fallback(fallback)
        .with_parallel(!args.sequential);

    let volume = SeriesLoader::load_from_directory_with_options::<f64>(&args.series_dir, &options)?;
    let meta = volume.metadata();

    info!("Series:          {}", meta.series_name);
    info!("Date:            {}", meta.date_yyyymmdd);
    info!("Scanner:         {} ({} T)", meta.scanner, meta.static_field_strength_t);
    info!("Sequence:        {} ({:?})", meta.pulse_sequence_name, meta.dimensionality);
    info!("Duration:        {} s", meta.duration_s);
    info!("Matrix:          {:?}", meta.acq_matrix_shape);
    info!("Resolution:      {:?} mm", meta.resolution_mm);
    info!(
        "TE / TR / ETL:   {} ms / {} ms / {}",
        meta.echo_time_ms, meta.repetition_time_ms, meta.echo_train_length
    );
    info!("Flip angle:      {} deg", meta.refocus_flip_angle_deg);
    info!("Frequency:       {} Hz", meta.center_frequency_hz);
    info!("Bandwidth:       {} Hz/px", meta.pixel_bandwidth_hz);
    info!("Readout:         {:?}", meta.readout_direction);
    info!("Contains metal:  {}", meta.contains_metal);
    info!("Volume shape:    {:?}", volume.dim());

    if let Some(preview) = &args.preview {
        let index = args.slice.unwrap_or(volume.num_slices() / 2);
        let image = volume
            .slice_image(index)
            .ok_or_else(|| format!("cannot render slice {index} of volume {:?}", volume.dim()))?;
        image.save(preview)?;
        info!("Wrote slice {index} to {}", preview.display());
    }

    Ok(())
}
