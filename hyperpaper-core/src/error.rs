use snafu::prelude::*;

/// Coarse classification of a [`HyperpaperError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or unexpected structure in one of the inputs.
    Format,
    /// The XML tokenizer produced something outside its token contract.
    InternalConsistency,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum HyperpaperError {
    #[snafu(display("OCR table has no header row"))]
    MissingHeader,
    #[snafu(display("OCR table has no page size row after the header"))]
    MissingPageRow,
    #[snafu(display("Expected {} on line {}, but got `{}`", expected, line, found))]
    PageSentinel {
        line: u64,
        expected: &'static str,
        found: String,
    },
    #[snafu(display("Expected conf is -1 on line {}, but got `{}`", line, found))]
    PageConfidence { line: u64, found: String },
    #[snafu(display("Line {} has no `{}` column (index {})", line, column, index))]
    MissingColumn {
        line: u64,
        column: &'static str,
        index: usize,
    },
    #[snafu(display("Parse `{}` column on line {} error, value `{}`", column, line, value))]
    ParseField {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[snafu(display("Read OCR table error: {}", source))]
    Csv { source: csv::Error },
    #[snafu(display("Page size of {} must be positive, got {}x{}", origin, width, height))]
    InvalidPageSize {
        origin: String,
        width: f64,
        height: f64,
    },
    #[snafu(display("{} element has no {} attribute", element, attribute))]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[snafu(display(
        "{} element attribute {} is not an integer: `{}`",
        element,
        attribute,
        value
    ))]
    ParseAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
    #[snafu(display("Malformed attribute on {} element: {}", element, source))]
    Attr {
        source: quick_xml::events::attributes::AttrError,
        element: &'static str,
    },
    #[snafu(display("Read layout XML error at byte {}: {}", position, source))]
    Xml {
        source: quick_xml::Error,
        position: u64,
    },
    #[snafu(display("Layout XML ends with {} unclosed element(s)", depth))]
    UnclosedElement { depth: usize },
    #[snafu(display("Unknown XML token `{}`", token))]
    UnexpectedToken { token: String },
}

impl HyperpaperError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HyperpaperError::UnexpectedToken { .. } => ErrorKind::InternalConsistency,
            _ => ErrorKind::Format,
        }
    }

    pub fn is_format_error(&self) -> bool {
        self.kind() == ErrorKind::Format
    }
}
