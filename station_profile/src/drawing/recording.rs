//! In-memory sink that records every primitive it receives.

use std::path::Path;

use serde::Serialize;

use crate::error::{ProfileError, Result};
use crate::geometry::Point;
use crate::io::write_atomic;
use crate::layers::{Layer, LayerManager};
use crate::styles::LayerStyle;

use super::VectorDrawingSink;

/// Single drawing primitive tagged with its layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Polyline {
        points: Vec<Point>,
        layer: String,
    },
    Line {
        start: Point,
        end: Point,
        layer: String,
    },
    Text {
        content: String,
        anchor: Point,
        height: f64,
        layer: String,
    },
}

impl Primitive {
    pub fn layer(&self) -> &str {
        match self {
            Primitive::Polyline { layer, .. }
            | Primitive::Line { layer, .. }
            | Primitive::Text { layer, .. } => layer,
        }
    }
}

#[derive(Serialize)]
struct Document<'a> {
    layers: Vec<&'a Layer>,
    primitives: &'a [Primitive],
}

/// Ordered list of primitives plus the layers they live on.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    layers: LayerManager,
    primitives: Vec<Primitive>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Primitives drawn on `layer`, in drawing order.
    pub fn on_layer<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = &'a Primitive> + 'a {
        self.primitives.iter().filter(move |p| p.layer() == layer)
    }

    fn check_layer(&self, layer: &str) -> Result<()> {
        if self.layers.contains(layer) {
            Ok(())
        } else {
            Err(ProfileError::Drawing(format!("layer {layer:?} does not exist")))
        }
    }

    /// Primitives as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let doc = Document {
            layers: self.layers.iter().collect(),
            primitives: &self.primitives,
        };
        serde_json::to_string_pretty(&doc)
    }
}

impl VectorDrawingSink for RecordingSink {
    fn ensure_layer(&mut self, name: &str, style: &LayerStyle) -> Result<()> {
        let added = self.layers.ensure_layer(Layer {
            name: name.to_string(),
            style: *style,
        });
        if added {
            log::debug!("created layer {name}");
        }
        Ok(())
    }

    fn add_polyline(&mut self, points: &[Point], layer: &str) -> Result<()> {
        self.check_layer(layer)?;
        self.primitives.push(Primitive::Polyline {
            points: points.to_vec(),
            layer: layer.to_string(),
        });
        Ok(())
    }

    fn add_line(&mut self, start: Point, end: Point, layer: &str) -> Result<()> {
        self.check_layer(layer)?;
        self.primitives.push(Primitive::Line {
            start,
            end,
            layer: layer.to_string(),
        });
        Ok(())
    }

    fn add_text(&mut self, content: &str, anchor: Point, height: f64, layer: &str) -> Result<()> {
        self.check_layer(layer)?;
        self.primitives.push(Primitive::Text {
            content: content.to_string(),
            anchor,
            height,
            layer: layer.to_string(),
        });
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<()> {
        let json = self
            .to_json()
            .map_err(|e| ProfileError::Drawing(e.to_string()))?;
        write_atomic(path, |w| w.write_all(json.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_layer_is_rejected() {
        let mut sink = RecordingSink::new();
        let err = sink
            .add_line(Point::new(0.0, 0.0), Point::new(0.0, 1.0), "nope")
            .unwrap_err();
        assert!(matches!(err, ProfileError::Drawing(_)));
        assert!(sink.primitives().is_empty());
    }

    #[test]
    fn json_lists_layers_and_primitives() {
        let mut sink = RecordingSink::new();
        sink.ensure_layer("labels", &LayerStyle::new(3)).unwrap();
        sink.add_text("Α1", Point::new(1.0, 2.0), 20.0, "labels").unwrap();
        let json: serde_json::Value = serde_json::from_str(&sink.to_json().unwrap()).unwrap();
        assert_eq!(json["layers"][0]["name"], "labels");
        assert_eq!(json["primitives"][0]["kind"], "text");
        assert_eq!(json["primitives"][0]["content"], "Α1");
    }
}
