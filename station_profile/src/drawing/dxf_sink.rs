//! DXF output through the `dxf` crate.

use std::io;
use std::path::Path;

use dxf::entities::{Entity, EntityType, Line as DxfLine, LwPolyline, Text};
use dxf::enums::AcadVersion;
use dxf::tables::Layer as DxfLayer;
use dxf::{Color, Drawing, LwPolylineVertex};

use crate::error::{ProfileError, Result};
use crate::geometry::Point;
use crate::io::write_atomic;
use crate::styles::LayerStyle;

use super::VectorDrawingSink;

fn to_dxf_point(p: Point) -> dxf::Point {
    dxf::Point::new(p.x, p.y, 0.0)
}

/// AutoCAD R2010 drawing built entity by entity.
pub struct DxfSink {
    drawing: Drawing,
}

impl DxfSink {
    pub fn new() -> Self {
        let mut drawing = Drawing::new();
        drawing.header.version = AcadVersion::R2010;
        Self { drawing }
    }

    /// Underlying drawing, e.g. for inspection in tests.
    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    fn has_layer(&self, name: &str) -> bool {
        self.drawing.layers().any(|l| l.name == name)
    }

    fn check_layer(&self, layer: &str) -> Result<()> {
        if self.has_layer(layer) {
            Ok(())
        } else {
            Err(ProfileError::Drawing(format!("layer {layer:?} does not exist")))
        }
    }

    fn add_on_layer(&mut self, specific: EntityType, layer: &str) {
        let mut entity = Entity::new(specific);
        entity.common.layer = layer.to_string();
        self.drawing.add_entity(entity);
    }
}

impl Default for DxfSink {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorDrawingSink for DxfSink {
    fn ensure_layer(&mut self, name: &str, style: &LayerStyle) -> Result<()> {
        if self.has_layer(name) {
            return Ok(());
        }
        let mut layer = DxfLayer::default();
        layer.name = name.to_string();
        layer.color = Color::from_index(style.color);
        self.drawing.add_layer(layer);
        log::debug!("created DXF layer {name}");
        Ok(())
    }

    fn add_polyline(&mut self, points: &[Point], layer: &str) -> Result<()> {
        self.check_layer(layer)?;
        let mut polyline = LwPolyline::default();
        polyline.vertices = points
            .iter()
            .map(|p| {
                let mut v = LwPolylineVertex::default();
                v.x = p.x;
                v.y = p.y;
                v
            })
            .collect();
        self.add_on_layer(EntityType::LwPolyline(polyline), layer);
        Ok(())
    }

    fn add_line(&mut self, start: Point, end: Point, layer: &str) -> Result<()> {
        self.check_layer(layer)?;
        let line = DxfLine::new(to_dxf_point(start), to_dxf_point(end));
        self.add_on_layer(EntityType::Line(line), layer);
        Ok(())
    }

    fn add_text(&mut self, content: &str, anchor: Point, height: f64, layer: &str) -> Result<()> {
        self.check_layer(layer)?;
        let mut text = Text::default();
        text.location = to_dxf_point(anchor);
        text.text_height = height;
        text.value = content.to_string();
        self.add_on_layer(EntityType::Text(text), layer);
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, |w| {
            let mut w = w;
            self.drawing
                .save(&mut w)
                .map_err(|e| io::Error::other(e.to_string()))
        })
    }
}
