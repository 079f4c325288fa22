//! Nearest-sample altitude lookup on a profile.
//!
//! Both backends return the elevation of the sample whose distance is closest
//! to the queried position. When two samples are equally close the one that
//! comes first in profile order (the lower distance) wins. Values are never
//! interpolated.

use serde::{Deserialize, Serialize};

use crate::profile::{Profile, ProfileSample};

/// Nearest-neighbour elevation lookup.
pub trait AltitudeIndex {
    /// Elevation of the sample closest to `position`.
    fn nearest(&self, position: f64) -> f64;
}

/// Available [`AltitudeIndex`] backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverKind {
    /// Linear scan over all samples, O(n) per query.
    #[default]
    Linear,
    /// Binary search over the sorted distances, O(log n) per query.
    Sorted,
}

impl ResolverKind {
    /// Builds the selected index over `profile`.
    pub fn build<'a>(self, profile: &'a Profile) -> Box<dyn AltitudeIndex + 'a> {
        match self {
            ResolverKind::Linear => Box::new(LinearScan::new(profile)),
            ResolverKind::Sorted => Box::new(SortedIndex::new(profile)),
        }
    }
}

/// Scans every sample and keeps the first strict minimum.
#[derive(Debug, Clone, Copy)]
pub struct LinearScan<'a> {
    samples: &'a [ProfileSample],
}

impl<'a> LinearScan<'a> {
    pub fn new(profile: &'a Profile) -> Self {
        Self {
            samples: profile.samples(),
        }
    }
}

impl AltitudeIndex for LinearScan<'_> {
    fn nearest(&self, position: f64) -> f64 {
        // Positions beyond either end, infinities included, resolve like the end itself.
        let first = self.samples[0].distance;
        let last = self.samples[self.samples.len() - 1].distance;
        let position = if position > last {
            last
        } else if position < first {
            first
        } else {
            position
        };
        let mut best = &self.samples[0];
        let mut best_diff = (best.distance - position).abs();
        for s in &self.samples[1..] {
            let diff = (s.distance - position).abs();
            if diff < best_diff {
                best = s;
                best_diff = diff;
            }
        }
        best.elevation
    }
}

/// Binary search over the sorted sample distances.
#[derive(Debug, Clone, Copy)]
pub struct SortedIndex<'a> {
    samples: &'a [ProfileSample],
}

impl<'a> SortedIndex<'a> {
    pub fn new(profile: &'a Profile) -> Self {
        Self {
            samples: profile.samples(),
        }
    }
}

impl AltitudeIndex for SortedIndex<'_> {
    fn nearest(&self, position: f64) -> f64 {
        let samples = self.samples;
        if position.is_nan() {
            return samples[0].elevation;
        }
        // First sample at or beyond the position.
        let hi = samples.partition_point(|s| s.distance < position);
        if hi == samples.len() {
            // Every sample lies below; the first of the trailing run of equal
            // distances is the earliest in profile order.
            let last = samples[hi - 1].distance;
            let first = samples.partition_point(|s| s.distance < last);
            return samples[first].elevation;
        }
        if hi == 0 {
            return samples[0].elevation;
        }
        let below = samples[hi - 1].distance;
        let above = &samples[hi];
        if (above.distance - position).abs() < (below - position).abs() {
            above.elevation
        } else {
            let first = samples.partition_point(|s| s.distance < below);
            samples[first].elevation
        }
    }
}

/// Elevation of the profile sample closest to `position`.
pub fn resolve_altitude(profile: &Profile, position: f64) -> f64 {
    LinearScan::new(profile).nearest(position)
}
