//! Conversion of the SVG basic shapes into paths.
//!
//! Each shape becomes one [`Path`] so that it stays index aligned with its
//! attribute set. Shapes that would not render (zero or negative size) become
//! empty paths.

use std::str::FromStr;

use log::trace;
use lyon_geom::vector;

use crate::builder::PathBuilder;
use crate::error::Error;
use crate::geometry::{Path, Point};
use crate::parse::Attributes;

/// Read a numeric attribute. Units are dropped.
fn number(element: &str, attrs: &Attributes, name: &str) -> Result<Option<f64>, Error> {
    match attrs.get(name) {
        None => Ok(None),
        Some(value) => svgtypes::Length::from_str(value)
            .map(|length| Some(length.number))
            .map_err(|_| Error::Attribute {
                element: element.to_string(),
                name: name.to_string(),
                value: value.clone(),
            }),
    }
}

fn number_or_zero(element: &str, attrs: &Attributes, name: &str) -> Result<f64, Error> {
    Ok(number(element, attrs, name)?.unwrap_or(0.0))
}

fn line(attrs: &Attributes) -> Result<Path, Error> {
    let x1 = number_or_zero("line", attrs, "x1")?;
    let y1 = number_or_zero("line", attrs, "y1")?;
    let x2 = number_or_zero("line", attrs, "x2")?;
    let y2 = number_or_zero("line", attrs, "y2")?;
    let mut builder = PathBuilder::new();
    builder.move_to(Point::new(x1, y1));
    builder.line_to(Point::new(x2, y2));
    Ok(builder.build())
}

fn poly(attrs: &Attributes, closed: bool) -> Path {
    let points = attrs.get("points").map(String::as_str).unwrap_or("");
    let mut builder = PathBuilder::new();
    for (idx, (x, y)) in svgtypes::PointsParser::from(points).enumerate() {
        if idx == 0 {
            builder.move_to(Point::new(x, y));
        } else {
            builder.line_to(Point::new(x, y));
        }
    }
    if closed {
        builder.close();
    }
    builder.build()
}

#[allow(clippy::many_single_char_names)]
fn rect(attrs: &Attributes) -> Result<Path, Error> {
    let x = number_or_zero("rect", attrs, "x")?;
    let y = number_or_zero("rect", attrs, "y")?;
    let w = number_or_zero("rect", attrs, "width")?;
    let h = number_or_zero("rect", attrs, "height")?;
    if w <= 0.0 || h <= 0.0 {
        trace!("rect: Degenerate size {}x{}", w, h);
        return Ok(Path::default());
    }

    // A missing corner radius takes the value of the other one.
    let (rx, ry) = match (number("rect", attrs, "rx")?, number("rect", attrs, "ry")?) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(r), None) | (None, Some(r)) => (r, r),
        (None, None) => (0.0, 0.0),
    };
    let rx = rx.max(0.0).min(w / 2.0);
    let ry = ry.max(0.0).min(h / 2.0);

    let mut builder = PathBuilder::new();
    if rx > 0.0 && ry > 0.0 {
        let radii = vector(rx, ry);
        builder.move_to(Point::new(x + rx, y));
        line_if_moved(&mut builder, Point::new(x + w - rx, y));
        builder.arc_to(radii, 0.0, false, true, Point::new(x + w, y + ry));
        line_if_moved(&mut builder, Point::new(x + w, y + h - ry));
        builder.arc_to(radii, 0.0, false, true, Point::new(x + w - rx, y + h));
        line_if_moved(&mut builder, Point::new(x + rx, y + h));
        builder.arc_to(radii, 0.0, false, true, Point::new(x, y + h - ry));
        line_if_moved(&mut builder, Point::new(x, y + ry));
        builder.arc_to(radii, 0.0, false, true, Point::new(x + rx, y));
    } else {
        builder.move_to(Point::new(x, y));
        builder.line_to(Point::new(x + w, y));
        builder.line_to(Point::new(x + w, y + h));
        builder.line_to(Point::new(x, y + h));
    }
    builder.close();
    Ok(builder.build())
}

/// Rounded corners touching each other leave no straight edge in between.
fn line_if_moved(builder: &mut PathBuilder, to: Point) {
    if builder.current() != to {
        builder.line_to(to);
    }
}

fn ellipse(element: &str, attrs: &Attributes, rx: f64, ry: f64) -> Result<Path, Error> {
    let cx = number_or_zero(element, attrs, "cx")?;
    let cy = number_or_zero(element, attrs, "cy")?;
    if rx <= 0.0 || ry <= 0.0 {
        trace!("{}: Degenerate radii {}x{}", element, rx, ry);
        return Ok(Path::default());
    }
    let radii = vector(rx, ry);
    let mut builder = PathBuilder::new();
    builder.move_to(Point::new(cx - rx, cy));
    builder.arc_to(radii, 0.0, true, false, Point::new(cx + rx, cy));
    builder.arc_to(radii, 0.0, true, false, Point::new(cx - rx, cy));
    builder.close();
    Ok(builder.build())
}

/// Convert a basic shape element into a path.
///
/// Returns `Ok(None)` if `element` is not a basic shape.
pub fn shape_to_path(element: &str, attrs: &Attributes) -> Result<Option<Path>, Error> {
    trace!("shape_to_path: {}", element);
    let path = match element {
        "line" => line(attrs)?,
        "polyline" => poly(attrs, false),
        "polygon" => poly(attrs, true),
        "rect" => rect(attrs)?,
        "circle" => {
            let r = number_or_zero(element, attrs, "r")?;
            ellipse(element, attrs, r, r)?
        }
        "ellipse" => {
            let rx = number_or_zero(element, attrs, "rx")?;
            let ry = number_or_zero(element, attrs, "ry")?;
            ellipse(element, attrs, rx, ry)?
        }
        _ => return Ok(None),
    };
    Ok(Some(path))
}
