use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::coords::{Point, Transform, Vector};
use crate::curves::linear_path::LinearPath;
use crate::error::Result;

/// Collects SVG elements for a preview of paths in normalized coordinates.
///
/// Coordinates passed in are normalized and mapped to the viewport when the
/// element is added.
pub struct SvgPlot {
    lines: Vec<String>,
    width: u32,
    height: u32,
    transform: Transform,
    point_radius: f64,
    color: String,
    line_width: f64,
}

impl SvgPlot {
    pub fn new(width: u32, height: u32) -> SvgPlot {
        SvgPlot {
            lines: Vec::new(),
            width,
            height,
            transform: Transform::normalized_to_viewport(width as f64, height as f64),
            point_radius: 3.0,
            color: "black".to_string(),
            line_width: 1.5,
        }
    }

    pub fn set_point_radius(&mut self, radius: f64) {
        self.point_radius = radius;
    }

    pub fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn add_point(&mut self, p: Point) {
        let p = self.transform * p;
        self.lines.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}" style="fill:{}"/>"#,
            p.x, p.y, self.point_radius, self.color
        ));
    }

    pub fn add_line(&mut self, p1: Point, p2: Point) {
        let (p1, p2) = (self.transform * p1, self.transform * p2);
        self.lines.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" style="stroke:{};fill:none;stroke-width:{}"/>"#,
            p1.x, p1.y, p2.x, p2.y, self.color, self.line_width
        ));
    }

    pub fn add_polyline(&mut self, points: &[Point]) {
        if points.is_empty() {
            return;
        }
        let coords: Vec<String> = points
            .iter()
            .map(|&p| {
                let p = self.transform * p;
                format!("{},{}", p.x, p.y)
            })
            .collect();
        self.lines.push(format!(
            r#"<polyline points="{}" style="stroke:{};fill:none;stroke-width:{}"/>"#,
            coords.join(" "),
            self.color,
            self.line_width
        ));
    }

    /// Draws the path with a dot on every point
    pub fn add_path(&mut self, path: &LinearPath) {
        self.add_polyline(path.points());
        for &p in path.points() {
            self.add_point(p);
        }
    }

    /// Draws an arrow `length` long from `p` in direction `dir`.
    /// `dir` must be a unit vector.
    pub fn add_vector(&mut self, p: Point, dir: Vector, length: f64) {
        let start = self.transform * p;
        let end = self.transform * (p + dir * length);
        let delta = end - start;
        let l = delta.magnitude();
        if l == 0.0 {
            return;
        }
        self.lines.push("<g>".to_string());
        self.lines.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" style="stroke:{};stroke-width:{}"/>"#,
            start.x, start.y, end.x, end.y, self.color, self.line_width
        ));
        // Arrow head drawn along +x, then rotated onto the arrow
        let ul = l / 5.0;
        let u = delta / l;
        let tm = Transform::new(&[u.x, u.y, -u.y, u.x, end.x, end.y]);
        let a0 = tm * Point::new(-ul, -ul);
        let a1 = tm * Point::new(0.0, 0.0);
        let a2 = tm * Point::new(-ul, ul);
        self.lines.push(format!(
            r#"<path d="M{},{} L{},{} L{},{}" style="stroke:{};fill:none;stroke-width:{}"/>"#,
            a0.x, a0.y, a1.x, a1.y, a2.x, a2.y, self.color, self.line_width
        ));
        self.lines.push("</g>".to_string());
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(
            out,
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        )?;
        for l in &self.lines {
            writeln!(out, "  {}", l)?;
        }
        writeln!(out, "</svg>")?;
        Ok(())
    }

    pub fn write<P: AsRef<Path>>(&self, file_name: P) -> Result<()> {
        let mut file = BufWriter::new(File::create(file_name)?);
        self.write_to(&mut file)?;
        file.flush()?;
        Ok(())
    }
}

#[test]
fn test_plot_document() {
    let mut plot = SvgPlot::new(200, 100);
    plot.add_point(Point::new(0.0, 0.0));
    plot.add_line(Point::new(-1.0, 1.0), Point::new(1.0, -1.0));
    let mut out = Vec::new();
    plot.write_to(&mut out).unwrap();
    let doc = String::from_utf8(out).unwrap();
    assert!(doc.contains(r#"viewBox="0 0 200 100""#));
    assert!(doc.contains(r#"<circle cx="100" cy="50""#));
    assert!(doc.contains(r#"x1="0" y1="0" x2="200" y2="100""#));
    assert!(doc.trim_end().ends_with("</svg>"));
}

#[test]
fn test_zero_arrow_skipped() {
    let mut plot = SvgPlot::new(200, 100);
    plot.add_vector(Point::new(0.0, 0.0), Vector::new(1.0, 0.0), 0.0);
    assert!(plot.is_empty());
    plot.add_vector(Point::new(0.0, 0.0), Vector::new(1.0, 0.0), 0.5);
    assert_eq!(plot.len(), 4);
}
