//! SVG export of a [`PlaneSketch`].

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context;

use crate::core::plane::{PlaneRenderer, PlaneSketch, Point, Segment};
use crate::debug_log;
use crate::io::atomic::atomic_write;

const SIZE: f64 = 480.0;
const MARGIN: f64 = 56.0;

/// World → SVG pixel mapping (y axis flipped, equal aspect).
struct Viewport {
    limit: f64,
}

impl Viewport {
    fn scale(&self) -> f64 {
        (SIZE - 2.0 * MARGIN) / (2.0 * self.limit)
    }

    fn map(&self, (x, y): Point) -> Point {
        (
            MARGIN + (x + self.limit) * self.scale(),
            MARGIN + (self.limit - y) * self.scale(),
        )
    }
}

fn line(out: &mut String, vp: &Viewport, seg: &Segment, style: &str) {
    let (x1, y1) = vp.map(seg.from);
    let (x2, y2) = vp.map(seg.to);
    let _ = writeln!(
        out,
        r#"  <line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" {style}/>"#
    );
}

fn text(out: &mut String, (x, y): Point, anchor: &str, body: &str) {
    let _ = writeln!(
        out,
        r#"  <text x="{x:.2}" y="{y:.2}" text-anchor="{anchor}" font-family="sans-serif" font-size="13">{}</text>"#,
        escape(body)
    );
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Render the full figure as an SVG document.
pub fn to_svg(sketch: &PlaneSketch) -> String {
    let vp = Viewport { limit: sketch.limit };
    let lim = sketch.limit;
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{SIZE}" height="{SIZE}" viewBox="0 0 {SIZE} {SIZE}">"#
    );
    out.push_str(concat!(
        "  <defs>\n",
        "    <marker id=\"head\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"8\" markerHeight=\"8\" orient=\"auto\">\n",
        "      <path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"blue\"/>\n",
        "    </marker>\n",
        "  </defs>\n",
    ));
    out.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");

    // grid
    for t in sketch.ticks() {
        line(&mut out, &vp, &Segment::new((t, -lim), (t, lim)), r##"stroke="#d0d0d0" stroke-width="1""##);
        line(&mut out, &vp, &Segment::new((-lim, t), (lim, t)), r##"stroke="#d0d0d0" stroke-width="1""##);
        let (tx, _) = vp.map((t, -lim));
        let (_, ty) = vp.map((-lim, t));
        text(&mut out, (tx, SIZE - MARGIN + 16.0), "middle", &format!("{t}"));
        text(&mut out, (MARGIN - 6.0, ty + 4.0), "end", &format!("{t}"));
    }

    // axes
    line(&mut out, &vp, &Segment::new((-lim, 0.0), (lim, 0.0)), r#"stroke="black" stroke-width="1.5""#);
    line(&mut out, &vp, &Segment::new((0.0, -lim), (0.0, lim)), r#"stroke="black" stroke-width="1.5""#);

    // projections
    let dashed = r#"stroke="black" stroke-width="1" stroke-dasharray="6 4""#;
    line(&mut out, &vp, &sketch.vertical_projection, dashed);
    line(&mut out, &vp, &sketch.horizontal_projection, dashed);

    // arrow
    if sketch.arrow.length() > 0.0 {
        line(&mut out, &vp, &sketch.arrow, r#"stroke="blue" stroke-width="2" marker-end="url(#head)""#);
    }

    // arc
    if !sketch.arc.is_empty() {
        let (sx, sy) = vp.map(sketch.arc.point_at(sketch.arc.theta1));
        let (ex, ey) = vp.map(sketch.arc.point_at(sketch.arc.theta2));
        let r = sketch.arc.radius * vp.scale();
        let large = if sketch.arc.sweep() > 180.0 { 1 } else { 0 };
        let _ = writeln!(
            out,
            r#"  <path d="M {sx:.2} {sy:.2} A {r:.2} {r:.2} 0 {large} 0 {ex:.2} {ey:.2}" fill="none" stroke="purple" stroke-width="1.5"/>"#
        );
    }

    // point
    let (px, py) = vp.map(sketch.point);
    let _ = writeln!(
        out,
        r#"  <text x="{px:.2}" y="{:.2}" text-anchor="middle" font-size="18" fill="green">★</text>"#,
        py + 6.0
    );

    // annotations
    text(&mut out, vp.map(sketch.magnitude_note.at), "start", &sketch.magnitude_note.text);
    text(&mut out, vp.map(sketch.phase_note.at), "start", &sketch.phase_note.text);

    // legend, labels, title
    let _ = writeln!(
        out,
        r##"  <rect x="{:.2}" y="{:.2}" width="150" height="22" fill="white" stroke="#999"/>"##,
        MARGIN + 6.0,
        MARGIN + 6.0
    );
    text(&mut out, (MARGIN + 14.0, MARGIN + 22.0), "start", &format!("★ {}", sketch.legend));
    text(&mut out, (SIZE / 2.0, SIZE - 12.0), "middle", sketch.x_label);
    let _ = writeln!(
        out,
        r#"  <text x="16" y="{mid:.2}" text-anchor="middle" font-family="sans-serif" font-size="13" transform="rotate(-90 16 {mid:.2})">{}</text>"#,
        sketch.y_label,
        mid = SIZE / 2.0
    );
    text(&mut out, (SIZE / 2.0, 28.0), "middle", sketch.title);

    out.push_str("</svg>\n");
    out
}

/// Writes each rendered sketch to `path`.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    pub path: PathBuf,
}

impl SvgRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SvgRenderer { path: path.into() }
    }
}

impl PlaneRenderer for SvgRenderer {
    fn render(&mut self, sketch: &PlaneSketch) -> anyhow::Result<()> {
        let doc = to_svg(sketch);
        debug_log!("svg: {} bytes -> {}", doc.len(), self.path.display());
        atomic_write(&self.path, doc)
            .with_context(|| format!("writing SVG to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::complex_number::ComplexNumber;
    use crate::core::plane::DEFAULT_LIMIT;

    fn close(a: Point, b: Point) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn viewport_maps_corners_and_origin() {
        let vp = Viewport { limit: 10.0 };
        assert!(close(vp.map((-10.0, 10.0)), (MARGIN, MARGIN)));
        assert!(close(vp.map((0.0, 0.0)), (SIZE / 2.0, SIZE / 2.0)));
        assert!(close(vp.map((10.0, -10.0)), (SIZE - MARGIN, SIZE - MARGIN)));
    }

    #[test]
    fn document_contains_every_element() {
        let sketch = PlaneSketch::from_number(ComplexNumber::new(3.0, 4.0), DEFAULT_LIMIT);
        let svg = to_svg(&sketch);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("z=3.0x+4.0*i"));
        assert!(svg.contains("r=5.0"));
        assert!(svg.contains("φ=53.13 deg."));
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("stroke=\"purple\""));
        assert!(svg.contains("marker-end"));
        assert!(svg.contains("Complex Plane"));
        assert_eq!(svg.matches("stroke-dasharray").count(), 2);
    }

    #[test]
    fn origin_skips_arrow_and_arc() {
        let svg = to_svg(&PlaneSketch::from_number(ComplexNumber::default(), DEFAULT_LIMIT));
        assert!(!svg.contains("marker-end"));
        assert!(!svg.contains("stroke=\"purple\""));
    }

    #[test]
    fn renderer_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("z.svg");
        let mut r = SvgRenderer::new(&path);
        r.render(&PlaneSketch::from_number(ComplexNumber::new(-2.0, 1.5), 5.0))
            .expect("render ok");
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("z=-2.0x+1.5*i"));
    }
}
