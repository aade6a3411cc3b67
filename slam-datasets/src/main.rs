//! slam-datasets - command line tools for offline SLAM datasets
//!
//! # Usage
//!
//! ```bash
//! # Validate a CARMEN log (plain or .gz)
//! slam-datasets validate mit-csail-3rd-floor-2005-12-17-run4.log
//!
//! # With a config file and overrides
//! slam-datasets validate run.clf.gz --config slam-datasets.toml --fov-deg 270
//! ```
//!
//! `validate` exits with status 1 when the log cannot be opened, fails
//! mid-stream, or contains no valid scans.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use slam_datasets::{DatasetsConfig, ReaderOptions, validate_carmen_log};

#[derive(Parser)]
#[command(name = "slam-datasets")]
#[command(about = "Inspect and validate offline SLAM datasets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a CARMEN log end to end and report its integrity
    Validate(ValidateArgs),
}

#[derive(Args)]
struct ValidateArgs {
    /// CARMEN log file (.log, .clf, optionally .gz)
    path: PathBuf,

    /// Configuration file (default: slam-datasets.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frame label for emitted scans
    #[arg(long)]
    frame_id: Option<String>,

    /// Field of view to assume for FLASER/RLASER scans (degrees)
    #[arg(long)]
    fov_deg: Option<f64>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Validate(args) => run_validate(args),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Resolve reader options: config file first, then command line overrides.
fn reader_options(args: &ValidateArgs) -> slam_datasets::Result<ReaderOptions> {
    let config = match &args.config {
        Some(path) => {
            let config = DatasetsConfig::load(path)?;
            log::info!("Loaded config from {}", path.display());
            config
        }
        None => DatasetsConfig::load_default()?,
    };

    let mut options = config.reader;
    if let Some(frame_id) = &args.frame_id {
        options.scan_frame_id = frame_id.clone();
    }
    if let Some(fov_deg) = args.fov_deg {
        options.assume_fov_deg = fov_deg;
    }
    Ok(options)
}

/// Returns `Ok(false)` when the log parsed but yielded no scans.
fn run_validate(args: &ValidateArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let options = reader_options(args)?;

    log::info!("Validating {}", args.path.display());
    log::info!("  Frame: {}", options.scan_frame_id);
    log::info!("  Assumed FOV: {:.1}°", options.assume_fov_deg);

    let summary = validate_carmen_log(&args.path, options)?;
    println!("{}", summary);

    if !summary.is_usable() {
        log::error!("No valid scans in {}", args.path.display());
        return Ok(false);
    }
    if summary.malformed_lines > 0 {
        log::warn!(
            "{} malformed laser lines were skipped",
            summary.malformed_lines
        );
    }
    Ok(true)
}
