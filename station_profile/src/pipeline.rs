//! One-shot batch run from input files to drawing.
//!
//! Both inputs are parsed and the drawing is fully built in memory before
//! anything is written, so schema problems never leave output files behind.

use std::path::{Path, PathBuf};

use crate::config::{Config, MarkConfig, ProfileInput, SegmentInput};
use crate::drawing::{emit, OutputFormat};
use crate::error::Result;
use crate::io::{read_table, write_profile_csv};
use crate::marks::{build_marks, MarkGeometry};
use crate::profile::{normalize, Profile};
use crate::stations::{build_stations, read_segments, total_length, Station};

/// Input and output locations of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPaths {
    pub profile: PathBuf,
    pub segments: PathBuf,
    /// Cleaned profile table; skipped when `None`.
    pub profile_csv: Option<PathBuf>,
    pub drawing: PathBuf,
    /// Drawing format; taken from the drawing extension when `None`, DXF otherwise.
    pub format: Option<OutputFormat>,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub samples: usize,
    pub stations: usize,
    pub line_length: f64,
    pub profile_csv: Option<PathBuf>,
    pub drawing: PathBuf,
    pub format: OutputFormat,
}

/// Reads and normalizes the profile file.
pub fn load_profile(path: &Path, input: &ProfileInput) -> Result<Profile> {
    let table = read_table(path, input.delimiter)?;
    normalize(&table, &input.scale)
}

/// Reads the segment file and accumulates stations.
pub fn load_stations(path: &Path, input: &SegmentInput) -> Result<Vec<Station>> {
    let table = read_table(path, input.delimiter)?;
    let segments = read_segments(&table, &input.columns, input.length_policy)?;
    let stations = build_stations(&segments);
    log::info!(
        "{} stations, line length {:.3} m",
        stations.len(),
        total_length(&stations)
    );
    Ok(stations)
}

/// Resolves every station on the profile and builds its mark.
pub fn plan_marks(profile: &Profile, stations: &[Station], config: &MarkConfig) -> Vec<MarkGeometry> {
    let beyond = stations
        .iter()
        .filter(|s| s.position < 0.0 || s.position > profile.total_length())
        .count();
    if beyond > 0 {
        log::warn!(
            "{beyond} stations lie outside the profile (0 to {:.3} m) and snap to its ends",
            profile.total_length()
        );
    }
    let index = config.resolver.build(profile);
    build_marks(index.as_ref(), stations, &config.style)
}

/// Runs the whole pipeline.
pub fn run(config: &Config, paths: &RunPaths) -> Result<RunSummary> {
    config.validate()?;
    let profile = load_profile(&paths.profile, &config.profile)?;
    let stations = load_stations(&paths.segments, &config.segments)?;
    let marks = plan_marks(&profile, &stations, &config.marks);

    let format = paths
        .format
        .or_else(|| OutputFormat::from_path(&paths.drawing))
        .unwrap_or(OutputFormat::Dxf);
    let mut sink = format.new_sink(&config.drawing);
    emit(&profile, &marks, &config.drawing, sink.as_mut())?;

    if let Some(csv) = &paths.profile_csv {
        write_profile_csv(csv, &profile)?;
        log::info!("wrote profile table {}", csv.display());
    }
    sink.save(&paths.drawing)?;
    log::info!("wrote {:?} drawing {}", format, paths.drawing.display());

    Ok(RunSummary {
        samples: profile.len(),
        stations: stations.len(),
        line_length: total_length(&stations),
        profile_csv: paths.profile_csv.clone(),
        drawing: paths.drawing.clone(),
        format,
    })
}
