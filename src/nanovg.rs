//! Text syntax of the generated drawing function.

use crate::geometry::Point;
use crate::translate::DrawCall;

/// Source syntax for the generated function.
///
/// Every method returns exactly one line without a trailing newline.
pub trait Target {
    fn comment(&self, text: &str) -> String;

    /// Opening line of the function. `name` is already sanitized.
    fn function_start(&self, name: &str) -> String;

    fn function_end(&self) -> String;

    /// Marker toggling automatic reformatting of the lines that follow.
    fn formatting(&self, enabled: bool) -> String;

    fn call(&self, call: &DrawCall) -> String;
}

/// C code against the NanoVG API.
///
/// Coordinates are written as `x + scale * <value>f` so that the generated
/// function places the drawing at run time.
#[derive(Debug, Default, Copy, Clone)]
pub struct NanoVg;

impl NanoVg {
    fn point(p: Point) -> String {
        format!("x + scale * {:.6}f, y + scale * {:.6}f", p.x, p.y)
    }
}

impl Target for NanoVg {
    fn comment(&self, text: &str) -> String {
        format!("// {}", text)
    }

    fn function_start(&self, name: &str) -> String {
        format!(
            "void draw_{}(NVGcontext* nvg, const float scale, float x, float y) {{",
            name
        )
    }

    fn function_end(&self) -> String {
        "}".to_string()
    }

    fn formatting(&self, enabled: bool) -> String {
        if enabled {
            "// clang-format on".to_string()
        } else {
            "// clang-format off".to_string()
        }
    }

    fn call(&self, call: &DrawCall) -> String {
        match call {
            DrawCall::BeginPath => "nvgBeginPath(nvg);".to_string(),
            DrawCall::MoveTo(p) => format!("nvgMoveTo(nvg, {});", Self::point(*p)),
            DrawCall::LineTo(p) => format!("nvgLineTo(nvg, {});", Self::point(*p)),
            DrawCall::QuadTo { ctrl, to } => format!(
                "nvgQuadTo(nvg, {}, {});",
                Self::point(*ctrl),
                Self::point(*to)
            ),
            DrawCall::BezierTo { ctrl1, ctrl2, to } => format!(
                "nvgBezierTo(nvg, {}, {}, {});",
                Self::point(*ctrl1),
                Self::point(*ctrl2),
                Self::point(*to)
            ),
            DrawCall::ArcTo { ctrl, to, radius } => format!(
                "nvgArcTo(nvg, {}, {}, {:?});",
                Self::point(*ctrl),
                Self::point(*to),
                radius
            ),
            DrawCall::ClosePath => "nvgClosePath(nvg);".to_string(),
            DrawCall::SetColour(colour) => format!("nvgSetColour(nvg, {});", colour),
            DrawCall::Fill => "nvgFill(nvg);".to_string(),
            DrawCall::Stroke(width) => format!("nvgStroke(nvg, {});", width),
        }
    }
}
