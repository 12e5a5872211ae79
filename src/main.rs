//! lasercut CLI
//!
//! Lists the available drivers and renders vector jobs to G-code.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lasercut::{
    export_job, init_logging, write_job, DriverKind, DriverProfile, LaserJob,
    MotionCommandEmitter,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lasercut")]
#[command(about = "G-code drivers for laser cutters and pen plotters", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List driver models and their settings
    Drivers,
    /// Render a job file to G-code
    Render {
        /// Driver profile (.json) or driver model name, e.g. "DexArm Driver"
        driver: String,
        /// Job file (.json)
        job: PathBuf,
        /// Output file; G-code goes to stdout when omitted
        output: Option<PathBuf>,
        /// Convert the driver to another model, keeping its shared settings
        #[arg(short, long)]
        model: Option<String>,
    },
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Drivers => list_drivers()?,
        Commands::Render {
            driver,
            job,
            output,
            model,
        } => render(&driver, &job, output.as_deref(), model.as_deref())?,
    }

    Ok(())
}

fn list_drivers() -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for kind in DriverKind::ALL {
        let driver = kind.create();
        writeln!(out, "{}", kind.model_name())?;
        for key in driver.property_keys() {
            let value_kind = driver
                .property_kind(key)
                .map(|k| k.to_string())
                .unwrap_or_default();
            let value = driver
                .get_property(key)
                .map(|v| v.to_string())
                .unwrap_or_default();
            writeln!(out, "    {key} ({value_kind}) = {value}")?;
        }
    }
    Ok(())
}

fn load_driver(name_or_path: &str) -> Result<Box<dyn MotionCommandEmitter>> {
    let path = Path::new(name_or_path);
    if path.is_file() {
        let profile = DriverProfile::load_from_file(path)
            .with_context(|| format!("Failed to load profile {}", path.display()))?;
        tracing::info!("Using profile '{}' ({})", profile.name, profile.driver);
        return Ok(profile.instantiate()?);
    }

    match DriverKind::from_model_name(name_or_path) {
        Some(kind) => Ok(kind.create()),
        None => anyhow::bail!("Unknown driver or profile: {}", name_or_path),
    }
}

fn render(driver: &str, job: &Path, output: Option<&Path>, model: Option<&str>) -> Result<()> {
    let mut driver = load_driver(driver)?;
    if let Some(name) = model {
        let kind = DriverKind::from_model_name(name)
            .with_context(|| format!("Unknown driver model: {}", name))?;
        driver = kind.convert(driver.as_ref())?;
    }
    let job = LaserJob::load_from_file(job)
        .with_context(|| format!("Failed to load job {}", job.display()))?;

    let summary = match output {
        Some(path) => export_job(driver.as_ref(), &job, path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_job(driver.as_ref(), &job, &mut out)?
        }
    };

    tracing::info!(
        "{} moves, {} lines, {} G-code lines",
        summary.moves,
        summary.lines,
        summary.lines_written
    );
    Ok(())
}
