//! Vector drawing output.
//!
//! [`emit`] renders a profile and its station marks into any
//! [`VectorDrawingSink`]. Backends write DXF ([`DxfSink`]), SVG
//! ([`SvgSink`]) or keep the primitives in memory ([`RecordingSink`]).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::Point;
use crate::layers::Layer;
use crate::marks::MarkGeometry;
use crate::profile::Profile;
use crate::styles::{LayerStyle, TextStyle};

pub mod dxf_sink;
pub mod recording;
pub mod svg;

pub use dxf_sink::DxfSink;
pub use recording::{Primitive, RecordingSink};
pub use svg::SvgSink;

/// Default label text height in drawing units.
pub const DEFAULT_TEXT_HEIGHT: f64 = 20.0;

/// Destination for drawing primitives grouped on named layers.
pub trait VectorDrawingSink {
    /// Creates the layer if it does not exist yet. Existing layers are kept as is.
    fn ensure_layer(&mut self, name: &str, style: &LayerStyle) -> Result<()>;

    /// Adds a connected polyline through `points`.
    fn add_polyline(&mut self, points: &[Point], layer: &str) -> Result<()>;

    /// Adds a straight segment.
    fn add_line(&mut self, start: Point, end: Point, layer: &str) -> Result<()>;

    /// Adds single-line text with its baseline starting at `anchor`.
    fn add_text(&mut self, content: &str, anchor: Point, height: f64, layer: &str) -> Result<()>;

    /// Writes the drawing to `path`, all-or-nothing.
    fn save(&self, path: &Path) -> Result<()>;
}

/// Layers and text settings used by [`emit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingStyle {
    pub profile_layer: Layer,
    pub marks_layer: Layer,
    pub labels_layer: Layer,
    pub text: TextStyle,
    /// Do not emit text for stations without a name.
    pub skip_empty_labels: bool,
}

impl Default for DrawingStyle {
    fn default() -> Self {
        Self {
            profile_layer: Layer::with_color("profile_polyline", 7),
            marks_layer: Layer::with_color("profile_marks", 1),
            labels_layer: Layer::with_color("profile_mark_labels", 3),
            text: TextStyle::new("Arial", DEFAULT_TEXT_HEIGHT),
            skip_empty_labels: false,
        }
    }
}

/// Drawing file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Dxf,
    Svg,
    /// Primitive list as JSON, mostly useful for inspection.
    Json,
}

impl OutputFormat {
    /// Parses a format name. Case insensitive.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dxf" => Some(Self::Dxf),
            "svg" => Some(Self::Svg),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Format implied by the file extension of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_name)
    }

    /// Creates an empty sink for this format.
    pub fn new_sink(self, style: &DrawingStyle) -> Box<dyn VectorDrawingSink> {
        match self {
            OutputFormat::Dxf => Box::new(DxfSink::new()),
            OutputFormat::Svg => Box::new(SvgSink::new(&style.text.font)),
            OutputFormat::Json => Box::new(RecordingSink::new()),
        }
    }
}

/// Draws the profile polyline, one tick per mark and one label per mark.
///
/// The three layers of `style` are created first; layers already present in
/// the sink are left untouched.
pub fn emit(
    profile: &Profile,
    marks: &[MarkGeometry],
    style: &DrawingStyle,
    sink: &mut dyn VectorDrawingSink,
) -> Result<()> {
    for layer in [&style.profile_layer, &style.marks_layer, &style.labels_layer] {
        sink.ensure_layer(&layer.name, &layer.style)?;
    }

    let outline = profile.to_polyline();
    sink.add_polyline(&outline.vertices, &style.profile_layer.name)?;

    for m in marks {
        sink.add_line(m.tick.start, m.tick.end, &style.marks_layer.name)?;
    }

    let mut labels = 0usize;
    for m in marks {
        if style.skip_empty_labels && m.station.name.is_empty() {
            continue;
        }
        sink.add_text(
            &m.station.name,
            m.label_anchor,
            style.text.height,
            &style.labels_layer.name,
        )?;
        labels += 1;
    }
    log::info!(
        "emitted profile of {} vertices, {} ticks, {} labels",
        outline.vertices.len(),
        marks.len(),
        labels
    );
    Ok(())
}
