//! Convert the paths of an SVG file into a C function drawing them with
//! [NanoVG](https://github.com/memononen/nanovg) calls.
//!
//! Every `path` element and basic shape becomes one `nvgBeginPath` block.
//! Lines and Bézier curves map directly onto the matching NanoVG calls.
//! Elliptical arcs are approximated with a single `nvgArcTo` call that only
//! honours the x radius.
//!
//! Only direct presentation attributes (`fill`, `stroke`, `stroke-width`) are
//! taken into account. Transforms, groups and CSS styling are ignored.
//!
//! ```no_run
//! let lines = svg2nvg::generate_file("icon.svg".as_ref(), None).unwrap();
//! for line in lines {
//!     println!("{}", line);
//! }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod error;
pub mod geometry;
pub mod nanovg;
pub mod parse;
pub mod shapes;
pub mod translate;

use std::fs;

use log::trace;

pub use crate::error::Error;
pub use crate::geometry::{ArcSegment, Path, Point, Segment};
pub use crate::nanovg::{NanoVg, Target};
pub use crate::parse::{parse, Attributes, Document};
pub use crate::translate::{translate, DrawCall};

/// Derive the function name from the input file name: dots become
/// underscores and spaces are dropped (`my icon.svg` -> `myicon_svg`).
pub fn function_name(input: &std::path::Path) -> String {
    let file_name = input
        .file_name()
        .map_or_else(|| input.to_string_lossy(), |name| name.to_string_lossy());
    file_name.replace('.', "_").replace(' ', "")
}

/// Generate the NanoVG drawing function for an SVG string.
///
/// `name` is used as is, see [`function_name`] to derive it from a file.
pub fn generate(svg: &str, name: &str) -> Result<Vec<String>, Error> {
    trace!("generate: {}", name);
    let document = parse(svg)?;
    translate(&document, name, &NanoVg)
}

/// Read an SVG file and generate its NanoVG drawing function.
///
/// The function is named after the file unless `name` is given.
pub fn generate_file(input: &std::path::Path, name: Option<&str>) -> Result<Vec<String>, Error> {
    let svg = fs::read_to_string(input)?;
    let name = name.map_or_else(|| function_name(input), str::to_string);
    generate(&svg, &name)
}
