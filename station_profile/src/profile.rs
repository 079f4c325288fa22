//! Longitudinal profile samples and their normalization from raw tables.

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};
use crate::geometry::{Point, Polyline};
use crate::io::{parse_number, Table};

/// Distance multiplier applied to raw profile rows (kilometers to meters).
pub const DEFAULT_DISTANCE_FACTOR: f64 = 1000.0;
/// Elevation multiplier applied to raw profile rows (display scale).
pub const DEFAULT_ELEVATION_FACTOR: f64 = 10.0;

/// Header token identifying the distance column.
pub const DISTANCE_TOKEN: &str = "distance";
/// Header token identifying the altitude column.
pub const ALTITUDE_TOKEN: &str = "altitude";

/// Scale factors applied while normalizing raw profile rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileScale {
    pub distance_factor: f64,
    pub elevation_factor: f64,
}

impl Default for ProfileScale {
    fn default() -> Self {
        Self {
            distance_factor: DEFAULT_DISTANCE_FACTOR,
            elevation_factor: DEFAULT_ELEVATION_FACTOR,
        }
    }
}

/// Single distance/elevation sample in output units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileSample {
    pub distance: f64,
    pub elevation: f64,
}

impl ProfileSample {
    pub fn new(distance: f64, elevation: f64) -> Self {
        Self {
            distance,
            elevation,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.distance, self.elevation)
    }
}

/// Non-empty series of samples sorted ascending by distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    samples: Vec<ProfileSample>,
}

impl Profile {
    /// Builds a profile from samples in any order.
    ///
    /// Samples are sorted by distance; equal distances keep their input order.
    /// A distance of `-0.0` counts as `0.0`.
    pub fn from_samples(mut samples: Vec<ProfileSample>) -> Result<Self> {
        if samples.is_empty() {
            return Err(ProfileError::EmptyProfile);
        }
        // -0.0 equals 0.0 but sorts before it under total_cmp.
        for s in &mut samples {
            if s.distance == 0.0 {
                s.distance = 0.0;
            }
        }
        samples.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[ProfileSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Distance of the last sample.
    pub fn total_length(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.distance)
    }

    /// Lowest and highest elevation of the profile.
    pub fn elevation_range(&self) -> (f64, f64) {
        self.samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                (lo.min(s.elevation), hi.max(s.elevation))
            })
    }

    /// Profile as a drawable polyline in distance order.
    pub fn to_polyline(&self) -> Polyline {
        Polyline::new(self.samples.iter().map(ProfileSample::point).collect())
    }
}

/// Cleans raw profile rows into a [`Profile`].
///
/// The first column whose header contains `distance` and the first containing
/// `altitude` (both case-insensitive) are used. Rows where either cell is not a
/// finite number are dropped. Distances and elevations are multiplied by the
/// factors in `scale`.
pub fn normalize(table: &Table, scale: &ProfileScale) -> Result<Profile> {
    let dist_col = table.find_column(DISTANCE_TOKEN).ok_or_else(|| {
        ProfileError::Schema(format!("no header contains {DISTANCE_TOKEN:?}"))
    })?;
    let alt_col = table.find_column(ALTITUDE_TOKEN).ok_or_else(|| {
        ProfileError::Schema(format!("no header contains {ALTITUDE_TOKEN:?}"))
    })?;

    let mut samples = Vec::with_capacity(table.rows().len());
    let mut dropped = 0usize;
    for row in 0..table.rows().len() {
        let dist = table.cell(row, dist_col).and_then(parse_number);
        let alt = table.cell(row, alt_col).and_then(parse_number);
        match (dist, alt) {
            (Some(d), Some(a)) if d.is_finite() && a.is_finite() => samples.push(
                ProfileSample::new(d * scale.distance_factor, a * scale.elevation_factor),
            ),
            _ => {
                dropped += 1;
                log::debug!("dropping profile row {}: missing distance or altitude", row + 1);
            }
        }
    }
    if dropped > 0 {
        log::info!("dropped {dropped} incomplete profile rows");
    }
    let profile = Profile::from_samples(samples)?;
    let (low, high) = profile.elevation_range();
    log::info!(
        "profile: {} samples over {:.3} m, elevation {low:.1} to {high:.1}",
        profile.len(),
        profile.total_length()
    );
    Ok(profile)
}
