//! Plain SVG profile sheets.
//!
//! Primitives are collected in memory and written on [`SvgSink::save`]. The
//! drawing is translated so its bounding box starts at the sheet margin and
//! the y axis is flipped so elevations grow upwards. No scaling is applied.

use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::geometry::{bbox, Point};
use crate::io::write_atomic;
use crate::layers::Layer;
use crate::styles::{aci_to_rgb, LayerStyle};

use super::{Primitive, RecordingSink, VectorDrawingSink};

const MARGIN: f64 = 20.0;

/// SVG backend.
#[derive(Debug, Clone)]
pub struct SvgSink {
    font: String,
    inner: RecordingSink,
}

impl SvgSink {
    pub fn new(font: &str) -> Self {
        Self {
            font: font.to_string(),
            inner: RecordingSink::new(),
        }
    }

    fn extent(&self) -> (f64, f64, f64, f64) {
        let mut pts = Vec::new();
        for p in self.inner.primitives() {
            match p {
                Primitive::Polyline { points, .. } => pts.extend_from_slice(points),
                Primitive::Line { start, end, .. } => pts.extend([*start, *end]),
                Primitive::Text { anchor, height, .. } => {
                    pts.extend([*anchor, anchor.offset(0.0, *height)])
                }
            }
        }
        bbox(&pts).unwrap_or((0.0, 0.0, 0.0, 0.0))
    }

    fn write_svg(&self, w: &mut dyn Write) -> io::Result<()> {
        let (min_x, min_y, max_x, max_y) = self.extent();
        let width = max_x - min_x + 2.0 * MARGIN;
        let height = max_y - min_y + 2.0 * MARGIN;
        let map = |p: &Point| Point::new(p.x - min_x + MARGIN, max_y - p.y + MARGIN);

        writeln!(
            w,
            "<svg xmlns='http://www.w3.org/2000/svg' width='{width:.2}' height='{height:.2}' viewBox='0 0 {width:.2} {height:.2}'>"
        )?;
        for layer in self.inner.layers().iter() {
            write_layer(w, layer, &self.font, self.inner.on_layer(&layer.name), &map)?;
        }
        writeln!(w, "</svg>")
    }
}

fn write_layer<'a>(
    w: &mut dyn Write,
    layer: &Layer,
    font: &str,
    primitives: impl Iterator<Item = &'a Primitive>,
    map: &dyn Fn(&Point) -> Point,
) -> io::Result<()> {
    let [r, g, b] = aci_to_rgb(layer.style.color);
    writeln!(
        w,
        "<g id='{}' stroke='rgb({r},{g},{b})' fill='none' stroke-width='{}'>",
        escape(&layer.name),
        layer.style.line_weight.0
    )?;
    for p in primitives {
        match p {
            Primitive::Polyline { points, .. } => {
                write!(w, "<polyline points='")?;
                for pt in points.iter().map(map) {
                    write!(w, "{:.2},{:.2} ", pt.x, pt.y)?;
                }
                writeln!(w, "' />")?;
            }
            Primitive::Line { start, end, .. } => {
                let (a, b) = (map(start), map(end));
                writeln!(
                    w,
                    "<line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' />",
                    a.x, a.y, b.x, b.y
                )?;
            }
            Primitive::Text {
                content,
                anchor,
                height,
                ..
            } => {
                let a = map(anchor);
                writeln!(
                    w,
                    "<text x='{:.2}' y='{:.2}' font-family='{}' font-size='{height}' stroke='none' fill='rgb({r},{g},{b})'>{}</text>",
                    a.x,
                    a.y,
                    escape(font),
                    escape(content)
                )?;
            }
        }
    }
    writeln!(w, "</g>")
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

impl VectorDrawingSink for SvgSink {
    fn ensure_layer(&mut self, name: &str, style: &LayerStyle) -> Result<()> {
        self.inner.ensure_layer(name, style)
    }

    fn add_polyline(&mut self, points: &[Point], layer: &str) -> Result<()> {
        self.inner.add_polyline(points, layer)
    }

    fn add_line(&mut self, start: Point, end: Point, layer: &str) -> Result<()> {
        self.inner.add_line(start, end, layer)
    }

    fn add_text(&mut self, content: &str, anchor: Point, height: f64, layer: &str) -> Result<()> {
        self.inner.add_text(content, anchor, height, layer)
    }

    fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, |w| self.write_svg(w))
    }
}
