//! Geometric path model: a path is an ordered list of absolute segments.

use lyon_geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment};

/// A point in document coordinates.
pub type Point = lyon_geom::Point<f64>;

/// Radii of an elliptical arc.
pub type Vector = lyon_geom::Vector<f64>;

/// An elliptical arc in both endpoint and centre parameterisation.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct ArcSegment {
    pub from: Point,
    pub to: Point,
    /// Radii after out-of-range correction.
    pub radii: Vector,
    /// Rotation of the ellipse x axis, in degrees.
    pub x_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub center: Point,
    /// Start angle of the arc on the unrotated ellipse, in degrees.
    pub theta: f64,
}

impl ArcSegment {
    /// Whether the arc is elliptical rather than circular.
    pub fn is_elliptical(&self) -> bool {
        #[allow(clippy::float_cmp)]
        let circular = self.radii.x == self.radii.y;
        !circular
    }
}

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Segment {
    Line(LineSegment<f64>),
    Quadratic(QuadraticBezierSegment<f64>),
    Cubic(CubicBezierSegment<f64>),
    Arc(ArcSegment),
}

impl Segment {
    pub fn start(&self) -> Point {
        match self {
            Segment::Line(s) => s.from,
            Segment::Quadratic(s) => s.from,
            Segment::Cubic(s) => s.from,
            Segment::Arc(s) => s.from,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Segment::Line(s) => s.to,
            Segment::Quadratic(s) => s.to,
            Segment::Cubic(s) => s.to,
            Segment::Arc(s) => s.to,
        }
    }
}

/// An ordered sequence of segments. Consecutive segments need not be
/// connected; gaps are subpath boundaries.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Path {
    pub segments: Vec<Segment>,
}

impl Path {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&self) -> Option<Point> {
        self.segments.first().map(Segment::start)
    }

    pub fn end(&self) -> Option<Point> {
        self.segments.last().map(Segment::end)
    }

    /// A path is closed if the first segment starts exactly where the last
    /// one ends. No tolerance is applied.
    pub fn is_closed(&self) -> bool {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => start == end,
            _ => false,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyon_geom::point;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::Line(LineSegment {
            from: point(x0, y0),
            to: point(x1, y1),
        })
    }

    #[test]
    fn test_closed() {
        let path = Path::new(vec![
            line(0.0, 0.0, 10.0, 0.0),
            line(10.0, 0.0, 10.0, 10.0),
            line(10.0, 10.0, 0.0, 0.0),
        ]);
        assert!(path.is_closed());
    }

    #[test]
    fn test_open() {
        let path = Path::new(vec![line(0.0, 0.0, 10.0, 0.0), line(10.0, 0.0, 10.0, 10.0)]);
        assert!(!path.is_closed());
    }

    #[test]
    fn test_closed_is_exact() {
        let path = Path::new(vec![
            line(0.0, 0.0, 10.0, 0.0),
            line(10.0, 0.0, 0.0, 0.000_000_1),
        ]);
        assert!(!path.is_closed());
    }

    #[test]
    fn test_empty_path_is_not_closed() {
        let path = Path::default();
        assert!(path.is_empty());
        assert_eq!(path.start(), None);
        assert!(!path.is_closed());
    }

    #[test]
    fn test_segment_endpoints() {
        let cubic = Segment::Cubic(CubicBezierSegment {
            from: point(1.0, 2.0),
            ctrl1: point(3.0, 4.0),
            ctrl2: point(5.0, 6.0),
            to: point(7.0, 8.0),
        });
        assert_eq!(cubic.start(), point(1.0, 2.0));
        assert_eq!(cubic.end(), point(7.0, 8.0));
    }
}
