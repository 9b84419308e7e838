//! Loader for the word table written by `pdftotext -tsv`.

use std::{io::Read, num::NonZeroU32, str::FromStr};

use csv::StringRecord;
use glam::DVec2;
use snafu::prelude::*;
use tracing::*;

use crate::{
    analysis::rect::Rect,
    consts::*,
    error::{
        CsvSnafu, HyperpaperError, InvalidPageSizeSnafu, MissingColumnSnafu, MissingHeaderSnafu,
        MissingPageRowSnafu, PageConfidenceSnafu, PageSentinelSnafu, ParseFieldSnafu,
    },
    layout::{element::BoundingBox, page::PageDimensions},
};

use super::ReconcilerConfig;

/// Loads every OCR word of the table, normalized by the declared page size.
pub fn load_bounding_boxes<R: Read>(reader: R) -> Result<Vec<BoundingBox>, HyperpaperError> {
    load_bounding_boxes_with(reader, &ReconcilerConfig::default())
}

/// Same as [`load_bounding_boxes`], dropping words below
/// `config.min_confidence` when it is set. Words without a numeric
/// confidence are kept.
#[tracing::instrument(skip_all)]
pub fn load_bounding_boxes_with<R: Read>(
    reader: R,
    config: &ReconcilerConfig,
) -> Result<Vec<BoundingBox>, HyperpaperError> {
    // OCR text may contain quotes. Row lengths are checked per column.
    let mut records = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader)
        .into_records();

    records
        .next()
        .context(MissingHeaderSnafu)?
        .context(CsvSnafu)?;

    let page_row = records
        .next()
        .context(MissingPageRowSnafu)?
        .context(CsvSnafu)?;
    let page = Row::new(&page_row).page_dimensions()?;
    debug!("OCR page size {}x{}", page.width, page.height);

    let mut boxes = Vec::new();
    let mut skipped = 0usize;
    for record in records {
        let record = record.context(CsvSnafu)?;
        let row = Row::new(&record);

        if row.is_structural()? {
            continue;
        }

        let bounding_box = row.bounding_box(&page)?;
        if config
            .min_confidence
            .zip(bounding_box.confidence)
            .is_some_and(|(min, confidence)| confidence < min)
        {
            skipped += 1;
            continue;
        }
        boxes.push(bounding_box);
    }

    debug!(
        "Loaded {} OCR boxes, {} below confidence threshold",
        boxes.len(),
        skipped
    );
    Ok(boxes)
}

struct Row<'r> {
    record: &'r StringRecord,
    line: u64,
}

impl<'r> Row<'r> {
    fn new(record: &'r StringRecord) -> Self {
        let line = record.position().map_or(0, |position| position.line());
        Self { record, line }
    }

    fn field(&self, column: Column) -> Result<&'r str, HyperpaperError> {
        self.record.get(column.index).context(MissingColumnSnafu {
            line: self.line,
            column: column.name,
            index: column.index,
        })
    }

    fn parse<T: FromStr>(&self, column: Column) -> Result<T, HyperpaperError> {
        let value = self.field(column)?;
        value.trim().parse().ok().context(ParseFieldSnafu {
            line: self.line,
            column: column.name,
            value,
        })
    }

    /// Parses a pixel value, rejecting `NaN` and infinities which would make
    /// every overlap test meaningless.
    fn coordinate(&self, column: Column) -> Result<f64, HyperpaperError> {
        let value: f64 = self.parse(column)?;
        ensure!(
            value.is_finite(),
            ParseFieldSnafu {
                line: self.line,
                column: column.name,
                value: self.field(column)?,
            }
        );
        Ok(value)
    }

    /// Word rows are not required to carry a usable score.
    fn confidence(&self) -> Option<f64> {
        self.record
            .get(CONF_COLUMN.index)
            .and_then(|conf| conf.trim().parse::<f64>().ok())
            .filter(|conf| conf.is_finite())
    }

    fn is_structural(&self) -> Result<bool, HyperpaperError> {
        Ok(is_structural_confidence(self.field(CONF_COLUMN)?))
    }

    fn page_dimensions(&self) -> Result<PageDimensions, HyperpaperError> {
        let text = self.field(TEXT_COLUMN)?;
        ensure!(
            text == PAGE_SENTINEL,
            PageSentinelSnafu {
                line: self.line,
                expected: PAGE_SENTINEL,
                found: text,
            }
        );

        let conf = self.field(CONF_COLUMN)?;
        ensure!(
            is_structural_confidence(conf),
            PageConfidenceSnafu {
                line: self.line,
                found: conf,
            }
        );

        let page = PageDimensions::new(
            self.coordinate(WIDTH_COLUMN)?,
            self.coordinate(HEIGHT_COLUMN)?,
        );
        ensure!(
            page.is_valid(),
            InvalidPageSizeSnafu {
                origin: format!("OCR table line {}", self.line),
                width: page.width,
                height: page.height,
            }
        );

        Ok(page)
    }

    fn bounding_box(&self, page: &PageDimensions) -> Result<BoundingBox, HyperpaperError> {
        let page_num: NonZeroU32 = self.parse(PAGE_NUM_COLUMN)?;
        let origin = DVec2::new(self.coordinate(LEFT_COLUMN)?, self.coordinate(TOP_COLUMN)?);
        let size = DVec2::new(
            self.coordinate(WIDTH_COLUMN)?,
            self.coordinate(HEIGHT_COLUMN)?,
        );
        let confidence = self.confidence();
        let text = self.field(TEXT_COLUMN)?;

        Ok(BoundingBox {
            page: page_num.get(),
            rect: Rect::from_pixels(origin, size, page),
            text: text.to_string(),
            confidence,
        })
    }
}

fn is_structural_confidence(conf: &str) -> bool {
    conf.trim()
        .parse::<f64>()
        .is_ok_and(|conf| conf == STRUCTURAL_CONFIDENCE)
}
