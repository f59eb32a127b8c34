//! Reading an SVG document into paths and their presentation attributes.

use std::collections::BTreeMap;

use log::{debug, trace};
use quick_xml::events::{BytesStart, Event};
use svgtypes::{PathParser, PathSegment};

use crate::builder::PathBuilder;
use crate::error::Error;
use crate::geometry::{Path, Vector};
use crate::shapes::shape_to_path;

/// Attributes of a single element, by attribute name.
pub type Attributes = BTreeMap<String, String>;

/// A parsed SVG document.
///
/// `paths` and `attributes` are index aligned: `attributes[i]` holds the
/// attributes of the element `paths[i]` was read from.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Document {
    pub paths: Vec<Path>,
    pub attributes: Vec<Attributes>,

    /// Attributes of the root `<svg>` element.
    pub metadata: Attributes,
}

impl Document {
    /// The raw `viewBox` of the root element, if set and non-empty.
    pub fn viewbox(&self) -> Option<&str> {
        self.metadata
            .get("viewBox")
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    fn push(&mut self, path: Path, attributes: Attributes) {
        self.paths.push(path);
        self.attributes.push(attributes);
    }
}

fn element_attributes(e: &BytesStart<'_>) -> Result<Attributes, Error> {
    let mut attributes = Attributes::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Xml(format!("Invalid attribute: {}", e)))?;
        let value = attr
            .unescaped_value()
            .map_err(|e| Error::Xml(format!("Invalid attribute value: {}", e)))?;
        let key = String::from_utf8_lossy(attr.key).into_owned();
        attributes.insert(key, String::from_utf8_lossy(&value).into_owned());
    }
    Ok(attributes)
}

/// Parse an SVG string, return the drawable elements as paths.
fn parse_xml(svg: &str) -> Result<Document, Error> {
    trace!("parse_xml");

    let mut reader = quick_xml::Reader::from_str(svg);
    reader.trim_text(true);

    let mut document = Document::default();
    let mut seen_root = false;
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = String::from_utf8_lossy(e.local_name()).into_owned();
                trace!("parse_xml: Matched start of {:?}", name);
                match name.as_str() {
                    "svg" if !seen_root => {
                        document.metadata = element_attributes(e)?;
                        seen_root = true;
                    }
                    "path" => {
                        let attributes = element_attributes(e)?;
                        let expr = attributes.get("d").map(String::as_str).unwrap_or("");
                        let path = parse_path(expr)?;
                        document.push(path, attributes);
                    }
                    "line" | "polyline" | "polygon" | "rect" | "circle" | "ellipse" => {
                        let attributes = element_attributes(e)?;
                        if let Some(path) = shape_to_path(&name, &attributes)? {
                            document.push(path, attributes);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => {
                trace!("parse_xml: EOF");
                break;
            }
            Ok(_) => {}
            Err(e) => return Err(Error::Xml(format!("Error when parsing XML: {}", e))),
        }

        buf.clear();
    }
    trace!("parse_xml: Return {} paths", document.paths.len());
    Ok(document)
}

/// Parse a path expression (the `d` attribute) into absolute segments.
pub fn parse_path(expr: &str) -> Result<Path, Error> {
    trace!("parse_path");
    let mut builder = PathBuilder::new();
    for segment in PathParser::from(expr) {
        let segment = segment.map_err(|e| Error::PathParse(e.to_string()))?;
        parse_path_segment(&segment, &mut builder);
    }
    Ok(builder.build())
}

#[allow(clippy::many_single_char_names)]
fn parse_path_segment(segment: &PathSegment, builder: &mut PathBuilder) {
    match *segment {
        PathSegment::MoveTo { abs, x, y } => {
            trace!("parse_path_segment: MoveTo");
            let to = builder.resolve(abs, x, y);
            builder.move_to(to);
        }
        PathSegment::LineTo { abs, x, y } => {
            trace!("parse_path_segment: LineTo");
            let to = builder.resolve(abs, x, y);
            builder.line_to(to);
        }
        PathSegment::HorizontalLineTo { abs, x } => {
            trace!("parse_path_segment: HorizontalLineTo");
            let current = builder.current();
            let to = if abs {
                lyon_geom::point(x, current.y)
            } else {
                lyon_geom::point(current.x + x, current.y)
            };
            builder.line_to(to);
        }
        PathSegment::VerticalLineTo { abs, y } => {
            trace!("parse_path_segment: VerticalLineTo");
            let current = builder.current();
            let to = if abs {
                lyon_geom::point(current.x, y)
            } else {
                lyon_geom::point(current.x, current.y + y)
            };
            builder.line_to(to);
        }
        PathSegment::CurveTo {
            abs,
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        } => {
            trace!("parse_path_segment: CurveTo");
            let ctrl1 = builder.resolve(abs, x1, y1);
            let ctrl2 = builder.resolve(abs, x2, y2);
            let to = builder.resolve(abs, x, y);
            builder.cubic_to(ctrl1, ctrl2, to);
        }
        PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
            trace!("parse_path_segment: SmoothCurveTo");
            let ctrl2 = builder.resolve(abs, x2, y2);
            let to = builder.resolve(abs, x, y);
            builder.smooth_cubic_to(ctrl2, to);
        }
        PathSegment::Quadratic { abs, x1, y1, x, y } => {
            trace!("parse_path_segment: Quadratic");
            let ctrl = builder.resolve(abs, x1, y1);
            let to = builder.resolve(abs, x, y);
            builder.quadratic_to(ctrl, to);
        }
        PathSegment::SmoothQuadratic { abs, x, y } => {
            trace!("parse_path_segment: SmoothQuadratic");
            let to = builder.resolve(abs, x, y);
            builder.smooth_quadratic_to(to);
        }
        PathSegment::EllipticalArc {
            abs,
            rx,
            ry,
            x_axis_rotation,
            large_arc,
            sweep,
            x,
            y,
        } => {
            trace!("parse_path_segment: EllipticalArc");
            let to = builder.resolve(abs, x, y);
            builder.arc_to(Vector::new(rx, ry), x_axis_rotation, large_arc, sweep, to);
        }
        PathSegment::ClosePath { .. } => {
            trace!("parse_path_segment: ClosePath");
            builder.close();
        }
    }
}

/// Parse an SVG string into paths, their attributes and the root element's
/// attributes.
pub fn parse(svg: &str) -> Result<Document, Error> {
    trace!("parse");
    let document = parse_xml(svg)?;
    debug!(
        "parse: Found {} paths, viewBox {:?}",
        document.paths.len(),
        document.viewbox()
    );
    Ok(document)
}

#[cfg(test)]
#[allow(clippy::unreadable_literal, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Segment};
    use lyon_geom::point;

    fn endpoints(path: &Path) -> Vec<(Point, Point)> {
        path.iter().map(|s| (s.start(), s.end())).collect()
    }

    #[test]
    fn test_parse_simple_absolute_nonclosed() {
        let _ = env_logger::try_init();
        let path = parse_path("M 113,35 H 40 L -39,49 H 40").unwrap();
        assert_eq!(
            endpoints(&path),
            vec![
                (point(113., 35.), point(40., 35.)),
                (point(40., 35.), point(-39., 49.)),
                (point(-39., 49.), point(40., 49.)),
            ]
        );
        assert!(!path.is_closed());
    }

    #[test]
    fn test_parse_simple_absolute_closed() {
        let _ = env_logger::try_init();
        let path = parse_path("M 10,10 20,15 10,20 Z").unwrap();
        assert_eq!(path.segments.len(), 3);
        assert_eq!(path.end(), Some(point(10., 10.)));
        assert!(path.is_closed());
    }

    #[test]
    fn test_relative_after_close() {
        let _ = env_logger::try_init();
        let path = parse_path("M 10,10 20,15 10,20 Z m 0,40 H 0").unwrap();
        assert_eq!(path.segments.len(), 4);
        assert_eq!(
            endpoints(&path)[3],
            (point(10., 50.), point(0., 50.))
        );
        // The last subpath is open, so the whole path is not closed.
        assert!(!path.is_closed());
    }

    #[test]
    fn test_relative_moves() {
        let _ = env_logger::try_init();
        let path = parse_path("M 10,100 40,70 h 10 m -20,40 10,-20").unwrap();
        assert_eq!(
            endpoints(&path),
            vec![
                (point(10., 100.), point(40., 70.)),
                (point(40., 70.), point(50., 70.)),
                (point(30., 110.), point(40., 90.)),
            ]
        );
    }

    #[test]
    fn test_smooth() {
        let _ = env_logger::try_init();
        let a = parse_path("M 10 20 C 10 20 11 17 12 15 S 2 7 10 20 z").unwrap();
        let b = parse_path("M 10 20 C 10 20 11 17 12 15 s -10 -8 -2 5 z").unwrap();
        let c = parse_path("M 10 20 c 0 0 1 -3 2 -5 S 2 7 10 20 z").unwrap();
        let d = parse_path("M 10 20 c 0 0 1 -3 2 -5 s -10 -8 -2 5 z").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a, d);
        match a.segments[1] {
            Segment::Cubic(cubic) => assert_eq!(cubic.ctrl1, point(13., 13.)),
            other => panic!("Unexpected segment: {:?}", other),
        }
    }

    #[test]
    fn test_quadratic_and_arc() {
        let _ = env_logger::try_init();
        let path = parse_path("M 0 0 Q 5 5 10 0 T 20 0 A 5 5 0 0 1 30 0").unwrap();
        assert_eq!(path.segments.len(), 3);
        assert!(matches!(path.segments[0], Segment::Quadratic(_)));
        match path.segments[1] {
            Segment::Quadratic(q) => assert_eq!(q.ctrl, point(15., -5.)),
            other => panic!("Unexpected segment: {:?}", other),
        }
        match path.segments[2] {
            Segment::Arc(arc) => {
                assert_eq!(arc.from, point(20., 0.));
                assert_eq!(arc.to, point(30., 0.));
                assert!((arc.center.x - 25.).abs() < 1e-9);
            }
            other => panic!("Unexpected segment: {:?}", other),
        }
    }

    #[test]
    fn test_parse_path_invalid() {
        let result = parse_path("M 10 20 L foo");
        assert!(matches!(result, Err(Error::PathParse(_))));
    }

    #[test]
    fn test_parse_document() {
        let _ = env_logger::try_init();
        let input = r##"
            <?xml version="1.0" encoding="UTF-8" standalone="no"?>
            <svg xmlns="http://www.w3.org/2000/svg" version="1.1" viewBox="0 0 24 24">
                <path d="M 0,0 L 10,0" stroke="#000000" />
                <g>
                    <rect width="4" height="4" fill="#ff0000"/>
                </g>
                <text>ignored</text>
                <path d="M 20,30" />
            </svg>
        "##;
        let document = parse(input).unwrap();
        assert_eq!(document.viewbox(), Some("0 0 24 24"));
        assert_eq!(document.paths.len(), 3);
        assert_eq!(document.attributes.len(), 3);
        assert_eq!(document.attributes[0].get("stroke").unwrap(), "#000000");
        assert_eq!(document.attributes[0].get("d").unwrap(), "M 0,0 L 10,0");
        assert_eq!(document.attributes[1].get("fill").unwrap(), "#ff0000");
        assert_eq!(document.paths[1].segments.len(), 4);
        assert!(document.paths[2].is_empty());
    }

    #[test]
    fn test_parse_document_without_viewbox() {
        let input = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M 1 1 L 2 2"/></svg>"#;
        let document = parse(input).unwrap();
        assert_eq!(document.viewbox(), None);
        assert_eq!(document.paths.len(), 1);
    }

    #[test]
    fn test_parse_document_empty_viewbox() {
        let input = r#"<svg viewBox=""><path d="M 1 1 L 2 2"/></svg>"#;
        let document = parse(input).unwrap();
        assert_eq!(document.viewbox(), None);
    }

    #[test]
    fn test_parse_escaped_attribute() {
        let input = r#"<svg><path d="M 1 1 L 2 2" id="a&amp;b"/></svg>"#;
        let document = parse(input).unwrap();
        assert_eq!(document.attributes[0].get("id").unwrap(), "a&b");
    }

    #[test]
    fn test_parse_xml_malformed() {
        let _ = env_logger::try_init();
        let input = r#"
            <svg xmlns="http://www.w3.org/2000/svg" version="1.1">
                <path d="M 20,30"/>
            </baa>
        "#;
        let result = parse(input);
        assert!(matches!(result, Err(Error::Xml(_))));
    }
}
