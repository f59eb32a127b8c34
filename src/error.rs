#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("SVG parse error: {0}")]
    Xml(String),
    #[error("SVG path parse error: {0}")]
    PathParse(String),
    #[error("Invalid attribute {name}=\"{value}\" on <{element}>")]
    Attribute {
        element: String,
        name: String,
        value: String,
    },
    #[error("Path count ({paths}) does not match attribute count ({attributes})")]
    LengthMismatch { paths: usize, attributes: usize },
}
