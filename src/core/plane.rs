//! Geometry of a complex-plane figure, independent of any drawing backend.
//!
//! [`PlaneSketch`] reads only `real`, `imag`, `magnitude()` and `phase()` from a
//! [`ComplexNumber`]; a [`PlaneRenderer`] turns the sketch into pixels, cells or
//! markup. Swapping renderers never touches the arithmetic core.

use crate::core::complex_number::{round2, ComplexNumber};

pub const DEFAULT_LIMIT: f64 = 10.0;

pub type Point = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Segment { from, to }
    }

    pub fn length(&self) -> f64 {
        ((self.to.0 - self.from.0).powi(2) + (self.to.1 - self.from.1).powi(2)).sqrt()
    }

    /// Split into `count` dashes with equal gaps between them.
    pub fn dashes(&self, count: usize) -> Vec<Segment> {
        if count == 0 {
            return Vec::new();
        }
        let pieces = (count * 2 - 1) as f64;
        let (dx, dy) = (
            (self.to.0 - self.from.0) / pieces,
            (self.to.1 - self.from.1) / pieces,
        );
        (0..count)
            .map(|k| {
                let start = (2 * k) as f64;
                Segment::new(
                    (self.from.0 + dx * start, self.from.1 + dy * start),
                    (self.from.0 + dx * (start + 1.0), self.from.1 + dy * (start + 1.0)),
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub at: Point,
    pub text: String,
}

/// Counter-clockwise arc from `theta1` to `theta2` (degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    pub center: Point,
    pub radius: f64,
    pub theta1: f64,
    pub theta2: f64,
}

impl ArcSpan {
    pub fn sweep(&self) -> f64 {
        self.theta2 - self.theta1
    }

    pub fn is_empty(&self) -> bool {
        self.sweep() == 0.0
    }

    pub fn point_at(&self, deg: f64) -> Point {
        let t = deg.to_radians();
        (
            self.center.0 + self.radius * t.cos(),
            self.center.1 + self.radius * t.sin(),
        )
    }

    /// `steps + 1` points along the arc, endpoints included.
    pub fn points(&self, steps: usize) -> Vec<Point> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|k| self.point_at(self.theta1 + self.sweep() * k as f64 / steps as f64))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaneSketch {
    pub value: ComplexNumber,
    pub limit: f64,
    pub point: Point,
    pub arrow: Segment,
    pub vertical_projection: Segment,
    pub horizontal_projection: Segment,
    pub magnitude_note: Annotation,
    pub phase_note: Annotation,
    pub arc: ArcSpan,
    pub legend: String,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

impl PlaneSketch {
    pub fn from_number(z: ComplexNumber, limit: f64) -> Self {
        let limit = if limit.is_finite() && limit > 0.0 { limit } else { DEFAULT_LIMIT };
        let (x, y) = (z.real, z.imag);
        let r = z.magnitude();
        let phi = z.phase();

        let (theta1, theta2) = if phi < 0.0 { (phi, 0.0) } else { (0.0, phi) };

        PlaneSketch {
            value: z,
            limit,
            point: (x, y),
            arrow: Segment::new((0.0, 0.0), (x, y)),
            vertical_projection: Segment::new((x, 0.0), (x, y)),
            horizontal_projection: Segment::new((0.0, y), (x, y)),
            magnitude_note: Annotation {
                at: (0.5 * limit, 0.75 * limit),
                text: format!("r={:?}", round2(r)),
            },
            phase_note: Annotation {
                at: (0.5 * limit, 0.65 * limit),
                text: format!("φ={:?} deg.", round2(phi)),
            },
            arc: ArcSpan {
                center: (0.0, 0.0),
                radius: 1.0,
                theta1,
                theta2,
            },
            legend: z.legend_label(),
            title: "Complex Plane",
            x_label: "Real Part",
            y_label: "Imaginary Part",
        }
    }

    /// Grid positions shared by both axes: `-limit..=limit` in eight steps.
    pub fn ticks(&self) -> Vec<f64> {
        let step = self.limit / 4.0;
        (-4..=4).map(|k| k as f64 * step).collect()
    }

    /// Whether the point falls inside the visible square.
    pub fn point_in_view(&self) -> bool {
        self.point.0.abs() <= self.limit && self.point.1.abs() <= self.limit
    }
}

/// A backend able to display a [`PlaneSketch`].
pub trait PlaneRenderer {
    fn render(&mut self, sketch: &PlaneSketch) -> anyhow::Result<()>;
}
