//! Translation of paths into drawing calls.
//!
//! Coordinates stay in document space here. Placing them at the caller's
//! origin and scale is left to the [`Target`], which emits it as part of the
//! generated code.

use std::f64::consts::FRAC_PI_2;
use std::str::FromStr;

use log::{debug, trace, warn};

use crate::error::Error;
use crate::geometry::{ArcSegment, Path, Point, Segment};
use crate::nanovg::Target;
use crate::parse::{Attributes, Document};

/// Stroke width used when a path has no `stroke-width` attribute.
pub const DEFAULT_STROKE_WIDTH: &str = "1";

/// One call of the immediate mode drawing API.
#[derive(Debug, PartialEq, Clone)]
pub enum DrawCall {
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    QuadTo {
        ctrl: Point,
        to: Point,
    },
    BezierTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    /// Arc through `ctrl` towards `to`. The radius is not scaled.
    ArcTo {
        ctrl: Point,
        to: Point,
        radius: f64,
    },
    ClosePath,
    /// Colour value copied verbatim from the document.
    SetColour(String),
    Fill,
    /// Stroke with the given width literal.
    Stroke(String),
}

/// Approximate an arc by a single point on its circle, a quarter turn before
/// the start angle. Only the x radius is used.
pub fn arc_control_point(arc: &ArcSegment) -> Point {
    let radius = arc.radii.x;
    let angle = arc.theta.to_radians() - FRAC_PI_2;
    Point::new(
        arc.center.x + radius * angle.cos(),
        arc.center.y + radius * angle.sin(),
    )
}

/// Map a segment to the single call drawing it from the pen position.
fn segment_call(index: usize, segment: &Segment) -> DrawCall {
    match segment {
        Segment::Line(line) => DrawCall::LineTo(line.to),
        Segment::Quadratic(quad) => DrawCall::QuadTo {
            ctrl: quad.ctrl,
            to: quad.to,
        },
        Segment::Cubic(cubic) => DrawCall::BezierTo {
            ctrl1: cubic.ctrl1,
            ctrl2: cubic.ctrl2,
            to: cubic.to,
        },
        Segment::Arc(arc) => {
            if arc.is_elliptical() {
                warn!(
                    "Path {}: elliptical arc with radii {}x{}, only the x radius is used",
                    index, arc.radii.x, arc.radii.y
                );
            }
            DrawCall::ArcTo {
                ctrl: arc_control_point(arc),
                to: arc.to,
                radius: arc.radii.x,
            }
        }
    }
}

/// Read the stroke width as a number, falling back to the raw text.
fn stroke_width(index: usize, attributes: &Attributes) -> String {
    let raw = match attributes.get("stroke-width") {
        Some(raw) => raw,
        None => return DEFAULT_STROKE_WIDTH.to_string(),
    };
    match svgtypes::Length::from_str(raw) {
        Ok(length) => length.number.to_string(),
        Err(e) => {
            warn!("Path {}: could not parse stroke-width {:?}: {}", index, raw, e);
            raw.clone()
        }
    }
}

/// Non-empty value of a presentation attribute.
fn presentation<'a>(attributes: &'a Attributes, name: &str) -> Option<&'a str> {
    attributes
        .get(name)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// Produce the calls drawing one path and applying its fill and stroke.
pub fn path_calls(index: usize, path: &Path, attributes: &Attributes) -> Vec<DrawCall> {
    trace!("path_calls: Path {} with {} segments", index, path.segments.len());
    let mut calls = vec![DrawCall::BeginPath];

    let mut pen: Option<Point> = None;
    for segment in path {
        let start = segment.start();
        if pen != Some(start) {
            calls.push(DrawCall::MoveTo(start));
        }
        calls.push(segment_call(index, segment));
        pen = Some(segment.end());
    }

    if path.is_closed() {
        calls.push(DrawCall::ClosePath);
    }
    if let Some(fill) = presentation(attributes, "fill") {
        calls.push(DrawCall::SetColour(fill.to_string()));
        calls.push(DrawCall::Fill);
    }
    if let Some(stroke) = presentation(attributes, "stroke") {
        calls.push(DrawCall::SetColour(stroke.to_string()));
        calls.push(DrawCall::Stroke(stroke_width(index, attributes)));
    }
    calls
}

/// Render a whole document as one drawing function named after `name`.
///
/// Nothing is produced if the document's paths and attribute sets are not
/// index aligned.
pub fn translate<T: Target>(
    document: &Document,
    name: &str,
    target: &T,
) -> Result<Vec<String>, Error> {
    trace!("translate");
    if document.paths.len() != document.attributes.len() {
        return Err(Error::LengthMismatch {
            paths: document.paths.len(),
            attributes: document.attributes.len(),
        });
    }

    let mut lines = Vec::new();
    if let Some(viewbox) = document.viewbox() {
        lines.push(target.comment(&format!("viewBox = {}", viewbox)));
    }
    lines.push(target.function_start(name));
    lines.push(target.formatting(false));
    for (index, (path, attributes)) in document
        .paths
        .iter()
        .zip(&document.attributes)
        .enumerate()
    {
        lines.extend(
            path_calls(index, path, attributes)
                .iter()
                .map(|call| target.call(call)),
        );
    }
    lines.push(target.formatting(true));
    lines.push(target.function_end());

    debug!("translate: Emitted {} lines", lines.len());
    Ok(lines)
}
