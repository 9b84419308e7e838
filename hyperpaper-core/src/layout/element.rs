use serde::Serialize;

use crate::analysis::rect::Rect;

/// A word recognized by OCR, positioned on its page.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct BoundingBox {
    /// 1-based page number.
    pub page: u32,
    pub rect: Rect,
    pub text: String,
    /// OCR score of the word, `None` when the table left it blank or
    /// non-numeric.
    pub confidence: Option<f64>,
}

/// A body-text line of the layout document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutLine {
    pub rect: Rect,
    /// 1-based ordinal of the `PAGE` marker this line was read under.
    pub page_no: usize,
}
