//! Extraction of body-text lines from the layout XML.

use std::{
    collections::HashMap,
    io::{BufReader, Read},
};

use glam::DVec2;
use quick_xml::{Reader, events::BytesStart, events::Event};
use snafu::prelude::*;
use tracing::*;

use crate::{
    analysis::rect::Rect,
    consts::*,
    error::{
        AttrSnafu, HyperpaperError, InvalidPageSizeSnafu, MissingAttributeSnafu,
        ParseAttributeSnafu, UnclosedElementSnafu, UnexpectedTokenSnafu, XmlSnafu,
    },
    layout::{element::LayoutLine, page::PageDimensions},
};

use super::ReconcilerConfig;

/// Extracts the rectangles of every body-text `LINE`, in document order.
pub fn extract_visible_rects<R: Read>(reader: R) -> Result<Vec<Rect>, HyperpaperError> {
    let lines = extract_layout_lines(reader, &ReconcilerConfig::default())?;
    Ok(lines.into_iter().map(|line| line.rect).collect())
}

/// Extracts the body-text lines, tagged with the ordinal of the `PAGE` they
/// were read under.
///
/// Every `PAGE` marker replaces the current page size for all following
/// lines. Lines seen before the first `PAGE` have nothing to be normalized by
/// and are dropped.
#[tracing::instrument(skip_all)]
pub fn extract_layout_lines<R: Read>(
    reader: R,
    config: &ReconcilerConfig,
) -> Result<Vec<LayoutLine>, HyperpaperError> {
    let mut reader = Reader::from_reader(BufReader::new(reader));
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut lines = Vec::new();
    let mut page: Option<PageDimensions> = None;
    let mut page_no = 0usize;
    // quick-xml does not report elements still open at end of input
    let mut depth = 0usize;

    loop {
        let event = reader.read_event_into(&mut buf).context(XmlSnafu {
            position: reader.buffer_position() as u64,
        })?;
        if let Event::Start(_) = &event {
            depth += 1;
        }

        match event {
            Event::Start(element) | Event::Empty(element) => {
                let position = reader.buffer_position() as u64;
                let name = element.local_name();
                if name.as_ref() == PAGE_ELEMENT.as_bytes() {
                    let attrs = Attributes::collect(PAGE_ELEMENT, &element, position)?;
                    let dimensions = attrs.page_dimensions()?;
                    page_no += 1;
                    trace!(
                        "PAGE {} is {}x{}",
                        page_no, dimensions.width, dimensions.height
                    );
                    page = Some(dimensions);
                } else if name.as_ref() == LINE_ELEMENT.as_bytes() {
                    let attrs = Attributes::collect(LINE_ELEMENT, &element, position)?;
                    if let Some(rect) = attrs.body_text_rect(config, page.as_ref())? {
                        lines.push(LayoutLine { rect, page_no });
                    }
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(_)
            | Event::CData(_)
            | Event::Comment(_)
            | Event::Decl(_)
            | Event::PI(_)
            | Event::DocType(_) => {}
            Event::Eof => {
                ensure!(depth == 0, UnclosedElementSnafu { depth });
                break;
            }
            // Newer quick-xml releases add token kinds this loop does not know.
            #[allow(unreachable_patterns)]
            other => {
                return UnexpectedTokenSnafu {
                    token: format!("{other:?}"),
                }
                .fail();
            }
        }
        buf.clear();
    }

    debug!("Extracted {} body-text lines over {} pages", lines.len(), page_no);
    Ok(lines)
}

/// Attributes of one start tag, looked up by local name.
struct Attributes {
    element: &'static str,
    values: HashMap<String, String>,
}

impl Attributes {
    fn collect(
        element: &'static str,
        start: &BytesStart<'_>,
        position: u64,
    ) -> Result<Self, HyperpaperError> {
        let mut values = HashMap::new();
        for attr in start.attributes() {
            let attr = attr.context(AttrSnafu { element })?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .context(XmlSnafu { position })?
                .into_owned();
            values.insert(key, value);
        }
        Ok(Self { element, values })
    }

    fn get(&self, attribute: &'static str) -> Result<&str, HyperpaperError> {
        self.values
            .get(attribute)
            .map(String::as_str)
            .context(MissingAttributeSnafu {
                element: self.element,
                attribute,
            })
    }

    fn integer(&self, attribute: &'static str) -> Result<f64, HyperpaperError> {
        let value = self.get(attribute)?;
        let parsed: i64 = value.parse().ok().context(ParseAttributeSnafu {
            element: self.element,
            attribute,
            value,
        })?;
        Ok(parsed as f64)
    }

    /// Normalized rectangle of a `LINE`, or `None` when it is not body text
    /// or no page size is known yet.
    fn body_text_rect(
        &self,
        config: &ReconcilerConfig,
        page: Option<&PageDimensions>,
    ) -> Result<Option<Rect>, HyperpaperError> {
        if self.get("TYPE")? != config.body_text_type {
            return Ok(None);
        }

        let origin = DVec2::new(self.integer("X")?, self.integer("Y")?);
        let size = DVec2::new(self.integer("WIDTH")?, self.integer("HEIGHT")?);

        match page {
            Some(page) => Ok(Some(Rect::from_pixels(origin, size, page))),
            None => {
                warn!("Skip body-text LINE declared before any PAGE");
                Ok(None)
            }
        }
    }

    fn page_dimensions(&self) -> Result<PageDimensions, HyperpaperError> {
        let page = PageDimensions::new(self.integer("WIDTH")?, self.integer("HEIGHT")?);
        ensure!(
            page.is_valid(),
            InvalidPageSizeSnafu {
                origin: format!("{} element", self.element),
                width: page.width,
                height: page.height,
            }
        );
        Ok(page)
    }
}
