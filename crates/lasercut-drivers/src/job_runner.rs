//! Job runner
//!
//! Streams a whole [`LaserJob`] through a driver: pre-job commands, every
//! part's commands in order, post-job commands. The runner owns the
//! [`MotionState`] so each job starts with nothing emitted.

use crate::emitter::MotionCommandEmitter;
use crate::error::DriverResult;
use crate::motion::MotionState;
use crate::writer::GcodeWriter;
use lasercut_core::{LaserJob, VectorCommand};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Counts gathered while writing a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobSummary {
    /// Lines put on the wire, template commands included
    pub lines_written: usize,
    pub moves: usize,
    pub lines: usize,
    pub property_changes: usize,
}

/// Write `job` as G-code to `out` using `driver`.
///
/// The job is validated first, so an invalid job writes nothing. I/O
/// errors abort the job and are returned as is.
pub fn write_job(
    driver: &dyn MotionCommandEmitter,
    job: &LaserJob,
    out: &mut dyn Write,
) -> DriverResult<JobSummary> {
    job.validate()?;

    tracing::info!(
        "Writing job '{}' ({} parts, {} commands) with {}",
        job.name,
        job.parts.len(),
        job.command_count(),
        driver.model_name()
    );

    let mut writer = GcodeWriter::new(out, driver.settings().line_end);
    let mut state = MotionState::new();
    let mut summary = JobSummary::default();

    for command in driver.pre_job_commands() {
        writer.send_command(&command)?;
    }

    let supported = driver.settings().resolutions();
    for part in &job.parts {
        if !supported.contains(&part.resolution) {
            tracing::warn!(
                "{} DPI is not among the resolutions {} supports",
                part.resolution,
                driver.model_name()
            );
        }
        for command in &part.commands {
            match command {
                VectorCommand::SetProperty(property) => {
                    driver.set_current_property(&mut state, property);
                    summary.property_changes += 1;
                }
                VectorCommand::MoveTo { x, y } => {
                    driver.move_to(&mut writer, &mut state, *x, *y, part.resolution)?;
                    summary.moves += 1;
                }
                VectorCommand::LineTo { x, y } => {
                    driver.line_to(&mut writer, &mut state, *x, *y, part.resolution)?;
                    summary.lines += 1;
                }
            }
        }
    }

    for command in driver.post_job_commands() {
        writer.send_command(&command)?;
    }
    writer.flush()?;

    summary.lines_written = writer.lines_written();
    tracing::info!(
        "Finished job '{}': {} G-code lines",
        job.name,
        summary.lines_written
    );
    Ok(summary)
}

/// Write `job` to a G-code file at `path`, creating or truncating it.
pub fn export_job(
    driver: &dyn MotionCommandEmitter,
    job: &LaserJob,
    path: &Path,
) -> DriverResult<JobSummary> {
    let mut out = BufWriter::new(File::create(path)?);
    let summary = write_job(driver, job, &mut out)?;
    out.flush()?;
    tracing::debug!("Exported job '{}' to {}", job.name, path.display());
    Ok(summary)
}
