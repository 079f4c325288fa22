//! Tick and label geometry for stations placed on a profile.

use serde::{Deserialize, Serialize};

use crate::geometry::{Line, Point};
use crate::resolver::AltitudeIndex;
use crate::stations::Station;

/// Default tick height in drawing units.
pub const DEFAULT_TICK_HEIGHT: f64 = 500.0;

/// Vertical placement of a tick relative to the resolved altitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickPlacement {
    /// Tick spans `altitude ± height / 2`.
    #[default]
    Centered,
    /// Tick spans `altitude ..= altitude + height`.
    Above,
}

impl TickPlacement {
    /// Parses a placement name. Case insensitive.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "centered" | "centre" | "center" => Some(Self::Centered),
            "above" => Some(Self::Above),
            _ => None,
        }
    }
}

/// Label offset from the tick base, as fractions of the tick height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelOffset {
    pub dx: f64,
    pub dy: f64,
}

impl LabelOffset {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Directly above the station.
    pub fn above() -> Self {
        Self::new(0.0, 0.7)
    }

    /// To the right of the station at tick-base height.
    pub fn side() -> Self {
        Self::new(0.1, 0.0)
    }

    /// Above and to the right.
    pub fn above_side() -> Self {
        Self::new(0.1, 0.7)
    }
}

impl Default for LabelOffset {
    fn default() -> Self {
        Self::above()
    }
}

/// Settings controlling tick and label geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkStyle {
    pub tick_height: f64,
    pub placement: TickPlacement,
    pub label_offset: LabelOffset,
}

impl Default for MarkStyle {
    fn default() -> Self {
        Self {
            tick_height: DEFAULT_TICK_HEIGHT,
            placement: TickPlacement::default(),
            label_offset: LabelOffset::default(),
        }
    }
}

/// Tick segment and label anchor for one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkGeometry {
    pub station: Station,
    pub altitude: f64,
    pub tick: Line,
    pub label_anchor: Point,
}

/// Geometry for a single station at a known altitude.
pub fn mark_at(station: &Station, altitude: f64, style: &MarkStyle) -> MarkGeometry {
    let x = station.position;
    let h = style.tick_height;
    let tick = match style.placement {
        TickPlacement::Centered => Line::vertical(x, altitude - h / 2.0, altitude + h / 2.0),
        TickPlacement::Above => Line::vertical(x, altitude, altitude + h),
    };
    let label_anchor =
        Point::new(x, altitude).offset(style.label_offset.dx * h, style.label_offset.dy * h);
    MarkGeometry {
        station: station.clone(),
        altitude,
        tick,
        label_anchor,
    }
}

/// Builds one [`MarkGeometry`] per station, in station order.
pub fn build_marks(
    index: &dyn AltitudeIndex,
    stations: &[Station],
    style: &MarkStyle,
) -> Vec<MarkGeometry> {
    stations
        .iter()
        .map(|st| mark_at(st, index.nearest(st.position), style))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Profile, ProfileSample};
    use crate::resolver::LinearScan;

    fn profile() -> Profile {
        Profile::from_samples(vec![
            ProfileSample::new(0.0, 1000.0),
            ProfileSample::new(1000.0, 1500.0),
        ])
        .unwrap()
    }

    #[test]
    fn centered_tick_on_tied_station() {
        let p = profile();
        let marks = build_marks(
            &LinearScan::new(&p),
            &[Station::new(500.0, "T1")],
            &MarkStyle::default(),
        );
        assert_eq!(marks.len(), 1);
        let m = &marks[0];
        assert_eq!(m.altitude, 1000.0);
        assert_eq!(m.tick, Line::vertical(500.0, 750.0, 1250.0));
        assert_eq!(m.label_anchor.x, 500.0);
        assert!((m.label_anchor.y - 1350.0).abs() < 1e-9);
        assert_eq!(m.station.name, "T1");
    }

    #[test]
    fn above_placement() {
        let style = MarkStyle {
            tick_height: 10.0,
            placement: TickPlacement::Above,
            label_offset: LabelOffset::side(),
        };
        let m = mark_at(&Station::new(3.0, ""), 20.0, &style);
        assert_eq!(m.tick, Line::vertical(3.0, 20.0, 30.0));
        assert!((m.label_anchor.x - 4.0).abs() < 1e-9);
        assert_eq!(m.label_anchor.y, 20.0);
    }

    #[test]
    fn label_offset_both_axes() {
        let style = MarkStyle {
            tick_height: 100.0,
            label_offset: LabelOffset::above_side(),
            ..MarkStyle::default()
        };
        let m = mark_at(&Station::new(0.0, "x"), 0.0, &style);
        assert!((m.label_anchor.x - 10.0).abs() < 1e-9);
        assert!((m.label_anchor.y - 70.0).abs() < 1e-9);
    }

    #[test]
    fn order_preserved() {
        let p = profile();
        let stations = vec![
            Station::new(900.0, "b"),
            Station::new(100.0, "a"),
            Station::new(900.0, "c"),
        ];
        let marks = build_marks(&LinearScan::new(&p), &stations, &MarkStyle::default());
        let names: Vec<&str> = marks.iter().map(|m| m.station.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(marks[0].altitude, 1500.0);
        assert_eq!(marks[1].altitude, 1000.0);
    }

    #[test]
    fn placement_names() {
        assert_eq!(TickPlacement::from_name("ABOVE"), Some(TickPlacement::Above));
        assert_eq!(TickPlacement::from_name("center"), Some(TickPlacement::Centered));
        assert_eq!(TickPlacement::from_name("below"), None);
    }
}
