//! Basic styling structures for drawing entities.

use serde::{Deserialize, Serialize};

/// Represents the weight of a line in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineWeight(pub f32);

impl Default for LineWeight {
    fn default() -> Self {
        Self(0.25)
    }
}

/// Style hint passed along when a layer is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerStyle {
    /// AutoCAD colour index (1 red, 3 green, 7 white/black, ...).
    pub color: u8,
    pub line_weight: LineWeight,
}

impl LayerStyle {
    pub fn new(color: u8) -> Self {
        Self {
            color,
            line_weight: LineWeight::default(),
        }
    }
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self::new(7)
    }
}

/// Text style definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font: String,
    pub height: f64,
}

impl TextStyle {
    /// Creates a new text style.
    pub fn new(font: &str, height: f64) -> Self {
        Self {
            font: font.to_string(),
            height,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new("Arial", crate::drawing::DEFAULT_TEXT_HEIGHT)
    }
}

/// RGB approximation of the first AutoCAD colour indices.
///
/// Index 7 maps to black since exported sheets use a white background.
pub fn aci_to_rgb(index: u8) -> [u8; 3] {
    match index {
        1 => [255, 0, 0],
        2 => [255, 255, 0],
        3 => [0, 255, 0],
        4 => [0, 255, 255],
        5 => [0, 0, 255],
        6 => [255, 0, 255],
        8 => [128, 128, 128],
        9 => [192, 192, 192],
        _ => [0, 0, 0],
    }
}
