use lyon_geom::euclid::Angle;
use lyon_geom::{ArcFlags, CubicBezierSegment, LineSegment, QuadraticBezierSegment, SvgArc};
use log::trace;

use crate::geometry::{ArcSegment, Path, Point, Segment, Vector};

/// Control point of the previous curve, used by the smooth curve commands.
#[derive(Debug, PartialEq, Copy, Clone)]
enum LastCurve {
    None,
    Cubic(Point),
    Quadratic(Point),
}

/// Accumulates absolute segments while keeping track of the current point
/// the way SVG path commands expect.
#[derive(Debug, PartialEq)]
pub struct PathBuilder {
    segments: Vec<Segment>,

    /// End point of the previous command. Starts at the origin so that a
    /// leading relative move behaves like an absolute one.
    current: Point,

    /// Start of the current subpath, target of `close`.
    subpath_start: Point,

    last_curve: LastCurve,
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathBuilder {
    pub fn new() -> Self {
        let origin = Point::new(0.0, 0.0);
        Self {
            segments: Vec::new(),
            current: origin,
            subpath_start: origin,
            last_curve: LastCurve::None,
        }
    }

    /// Return the current point.
    pub fn current(&self) -> Point {
        self.current
    }

    /// Resolve a coordinate pair against the current point unless `abs`.
    pub fn resolve(&self, abs: bool, x: f64, y: f64) -> Point {
        if abs {
            Point::new(x, y)
        } else {
            Point::new(self.current.x + x, self.current.y + y)
        }
    }

    /// Start a new subpath.
    pub fn move_to(&mut self, to: Point) {
        self.current = to;
        self.subpath_start = to;
        self.last_curve = LastCurve::None;
    }

    pub fn line_to(&mut self, to: Point) {
        self.segments.push(Segment::Line(LineSegment {
            from: self.current,
            to,
        }));
        self.current = to;
        self.last_curve = LastCurve::None;
    }

    pub fn quadratic_to(&mut self, ctrl: Point, to: Point) {
        self.segments.push(Segment::Quadratic(QuadraticBezierSegment {
            from: self.current,
            ctrl,
            to,
        }));
        self.current = to;
        self.last_curve = LastCurve::Quadratic(ctrl);
    }

    /// Quadratic curve whose control point mirrors the previous quadratic's
    /// control point about the current point.
    pub fn smooth_quadratic_to(&mut self, to: Point) {
        let ctrl = match self.last_curve {
            LastCurve::Quadratic(prev) => self.reflect(prev),
            _ => self.current,
        };
        self.quadratic_to(ctrl, to);
    }

    pub fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.segments.push(Segment::Cubic(CubicBezierSegment {
            from: self.current,
            ctrl1,
            ctrl2,
            to,
        }));
        self.current = to;
        self.last_curve = LastCurve::Cubic(ctrl2);
    }

    /// Cubic curve whose first control point mirrors the previous cubic's
    /// second control point about the current point.
    pub fn smooth_cubic_to(&mut self, ctrl2: Point, to: Point) {
        let ctrl1 = match self.last_curve {
            LastCurve::Cubic(prev) => self.reflect(prev),
            _ => self.current,
        };
        self.cubic_to(ctrl1, ctrl2, to);
    }

    /// Elliptical arc in SVG endpoint notation.
    ///
    /// An arc ending where it starts is omitted, an arc with a zero radius
    /// degrades to a line.
    pub fn arc_to(
        &mut self,
        radii: Vector,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    ) {
        let from = self.current;
        if from == to {
            trace!("arc_to: Skipping zero length arc");
            self.last_curve = LastCurve::None;
            return;
        }
        let svg_arc = SvgArc {
            from,
            to,
            radii,
            x_rotation: Angle::degrees(x_rotation),
            flags: ArcFlags { large_arc, sweep },
        };
        if svg_arc.is_straight_line() {
            trace!("arc_to: Zero radius, treating as line");
            self.line_to(to);
            return;
        }
        let arc = svg_arc.to_arc();
        self.segments.push(Segment::Arc(ArcSegment {
            from,
            to,
            radii: arc.radii,
            x_rotation,
            large_arc,
            sweep,
            center: arc.center,
            theta: start_angle(from, arc.center, arc.radii, x_rotation),
        }));
        self.current = to;
        self.last_curve = LastCurve::None;
    }

    /// Close the current subpath with a line back to its start, if needed.
    pub fn close(&mut self) {
        if self.current != self.subpath_start {
            self.line_to(self.subpath_start);
        }
        self.current = self.subpath_start;
        self.last_curve = LastCurve::None;
    }

    pub fn build(self) -> Path {
        Path::new(self.segments)
    }

    fn reflect(&self, ctrl: Point) -> Point {
        Point::new(2.0 * self.current.x - ctrl.x, 2.0 * self.current.y - ctrl.y)
    }
}

/// Angle of `from` on the unrotated unit ellipse around `center`, in degrees.
///
/// `lyon_geom` only offers an approximated atan2 for this, which is off by
/// up to a few thousandths of a degree.
fn start_angle(from: Point, center: Point, radii: Vector, x_rotation: f64) -> f64 {
    let (sin, cos) = x_rotation.to_radians().sin_cos();
    let dx = from.x - center.x;
    let dy = from.y - center.y;
    let x = (cos * dx + sin * dy) / radii.x;
    let y = (cos * dy - sin * dx) / radii.y;
    y.atan2(x).to_degrees()
}
