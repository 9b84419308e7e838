use tracing::*;

use crate::{
    analysis::visibility::{find_visible_boxes, page_rects},
    consts::BODY_TEXT_TYPE,
    error::HyperpaperError,
    layout::element::{BoundingBox, LayoutLine},
};

pub mod layout;
pub mod ocr;

pub use layout::{extract_layout_lines, extract_visible_rects};
pub use ocr::{load_bounding_boxes, load_bounding_boxes_with};

/// Configuration for reconciling an OCR table with a layout document.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// `TYPE` of the layout lines that count as visible.
    pub body_text_type: String,
    /// OCR words below this confidence are dropped while loading.
    pub min_confidence: Option<f64>,
    /// Margin added around every layout line before testing overlap, in
    /// page fractions.
    pub tolerance: f64,
    /// Only match words against layout lines of the same page.
    pub strict_pages: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            body_text_type: BODY_TEXT_TYPE.to_string(),
            min_confidence: None,
            tolerance: 0.0,
            strict_pages: false,
        }
    }
}

/// Runs both parses of one page and matches their results.
pub struct PageReconciler {
    pub config: ReconcilerConfig,
}

impl PageReconciler {
    pub fn new(config: ReconcilerConfig) -> Self {
        Self { config }
    }

    /// Returns the OCR text of `page` that lies on a body-text line.
    pub fn visible_text(
        &self,
        ocr: &[u8],
        layout: &[u8],
        page: u32,
    ) -> Result<Vec<String>, HyperpaperError> {
        let boxes = self.visible_boxes(ocr, layout, page)?;
        Ok(boxes.into_iter().map(|bounding_box| bounding_box.text).collect())
    }

    /// Returns the OCR boxes of `page` that lie on a body-text line.
    ///
    /// The two inputs are parsed in parallel since neither depends on the
    /// other; matching starts once both are done.
    #[tracing::instrument(skip_all, fields(page = page))]
    pub fn visible_boxes(
        &self,
        ocr: &[u8],
        layout: &[u8],
        page: u32,
    ) -> Result<Vec<BoundingBox>, HyperpaperError> {
        let (boxes, lines) = rayon::join(
            || load_bounding_boxes_with(ocr, &self.config),
            || extract_layout_lines(layout, &self.config),
        );
        let (boxes, lines) = (boxes?, lines?);

        let lines = self.apply_tolerance(lines);
        let rects = if self.config.strict_pages {
            page_rects(&lines, page)
        } else {
            lines.iter().map(|line| line.rect).collect()
        };
        let visible = find_visible_boxes(&boxes, page, &rects)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();

        debug!(
            "Page {}: {} of {} OCR boxes visible against {} layout lines",
            page,
            visible.len(),
            boxes.len(),
            rects.len()
        );
        Ok(visible)
    }

    fn apply_tolerance(&self, lines: Vec<LayoutLine>) -> Vec<LayoutLine> {
        if self.config.tolerance <= 0.0 {
            return lines;
        }

        lines
            .into_iter()
            .map(|line| LayoutLine {
                rect: line.rect.expand(self.config.tolerance),
                ..line
            })
            .collect()
    }
}
