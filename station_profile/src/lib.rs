//! Core library for annotated longitudinal profile drawings.
//!
//! A profile (distance/altitude samples) is normalized, segment lengths are
//! accumulated into stations, every station is resolved to the nearest profile
//! sample and a tick with a label is drawn there.

pub mod config;
pub mod drawing;
pub mod error;
pub mod geometry;
pub mod io;
pub mod layers;
pub mod marks;
pub mod pipeline;
pub mod profile;
pub mod resolver;
pub mod stations;
pub mod styles;

pub use config::Config;
pub use error::{ProfileError, Result};
pub use marks::MarkGeometry;
pub use profile::{Profile, ProfileSample};
pub use stations::{SegmentSpec, Station};
