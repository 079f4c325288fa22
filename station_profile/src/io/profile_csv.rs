//! Cleaned profile table output.

use std::path::Path;

use crate::error::Result;
use crate::profile::{normalize, Profile, ProfileScale};

use super::{read_table, write_atomic, Delimiter};

pub const DISTANCE_HEADER: &str = "distance_m";
pub const ELEVATION_HEADER: &str = "altitude_x10";

/// Writes the cleaned profile as `distance_m,altitude_x10` rows.
///
/// Values use the shortest representation that parses back to the same
/// `f64`, so [`read_profile_csv`] reproduces the profile exactly.
pub fn write_profile_csv(path: &Path, profile: &Profile) -> Result<()> {
    write_atomic(path, |w| {
        let mut writer = csv::Writer::from_writer(w);
        writer.write_record([DISTANCE_HEADER, ELEVATION_HEADER])?;
        for s in profile.samples() {
            writer.write_record([s.distance.to_string(), s.elevation.to_string()])?;
        }
        writer.flush()
    })
}

/// Reads a file written by [`write_profile_csv`] without rescaling.
pub fn read_profile_csv(path: &Path) -> Result<Profile> {
    let table = read_table(path, Delimiter::Comma)?;
    let unit = ProfileScale {
        distance_factor: 1.0,
        elevation_factor: 1.0,
    };
    normalize(&table, &unit)
}
