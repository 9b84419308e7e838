/// A column of the `pdftotext -tsv` export.
///
/// `name` matches the header written by `pdftotext` and is only used in error
/// messages; columns are always addressed by `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub name: &'static str,
}

impl Column {
    const fn new(index: usize, name: &'static str) -> Self {
        Self { index, name }
    }
}

/// 1-based page number of the row.
pub const PAGE_NUM_COLUMN: Column = Column::new(1, "page_num");

/// Left edge in pixels.
pub const LEFT_COLUMN: Column = Column::new(6, "left");

/// Top edge in pixels.
pub const TOP_COLUMN: Column = Column::new(7, "top");

/// Box width in pixels. On the page size row this is the page width.
pub const WIDTH_COLUMN: Column = Column::new(8, "width");

/// Box height in pixels. On the page size row this is the page height.
pub const HEIGHT_COLUMN: Column = Column::new(9, "height");

/// OCR confidence. `-1` marks structural rows that carry no text.
pub const CONF_COLUMN: Column = Column::new(10, "conf");

/// Recognized text, or a `###...###` marker on structural rows.
pub const TEXT_COLUMN: Column = Column::new(11, "text");

/// Text of the row declaring the page size.
pub const PAGE_SENTINEL: &str = "###PAGE###";

/// Confidence value of structural rows.
pub const STRUCTURAL_CONFIDENCE: f64 = -1.0;

/// `TYPE` of a layout `LINE` that belongs to the main text flow.
pub const BODY_TEXT_TYPE: &str = "本文";

pub const PAGE_ELEMENT: &str = "PAGE";

pub const LINE_ELEMENT: &str = "LINE";
