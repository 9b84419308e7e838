use crate::{
    analysis::rect::Rect,
    layout::element::{BoundingBox, LayoutLine},
};

/// Collects the text of every box on `page` that overlaps at least one of
/// `layout_rects`.
///
/// Output follows the order of `boxes`, and each box contributes at most once
/// no matter how many rectangles it overlaps. The layout rectangles are not
/// tied to a page; see [`find_visible_lines`] for the page-aware variant.
///
/// # Example
/// ```
/// use hyperpaper_core::analysis::rect::Rect;
/// use hyperpaper_core::analysis::visibility::find_visible_text;
/// use hyperpaper_core::layout::element::BoundingBox;
///
/// let word = BoundingBox {
///     page: 1,
///     rect: Rect::new(0.1, 0.1, 0.05, 0.0125),
///     text: "吾輩".to_string(),
///     confidence: Some(96.0),
/// };
/// let layout = [Rect::new(0.1, 0.1, 0.05, 0.0125)];
///
/// assert_eq!(find_visible_text(&[word.clone()], 1, &layout), ["吾輩"]);
/// assert!(find_visible_text(&[word], 2, &layout).is_empty());
/// ```
pub fn find_visible_text(boxes: &[BoundingBox], page: u32, layout_rects: &[Rect]) -> Vec<String> {
    find_visible_boxes(boxes, page, layout_rects)
        .into_iter()
        .map(|bounding_box| bounding_box.text.clone())
        .collect()
}

/// The boxes behind [`find_visible_text`], borrowed from `boxes`.
pub fn find_visible_boxes<'b>(
    boxes: &'b [BoundingBox],
    page: u32,
    layout_rects: &[Rect],
) -> Vec<&'b BoundingBox> {
    boxes
        .iter()
        .filter(|bounding_box| bounding_box.page == page)
        .filter(|bounding_box| {
            layout_rects
                .iter()
                .any(|rect| rect.overlaps(&bounding_box.rect))
        })
        .collect()
}

/// Like [`find_visible_text`], but a box is only tested against the layout
/// lines read under the same page.
///
/// Layout pages are numbered by the order of their `PAGE` markers, starting
/// at 1, which matches the OCR page numbers when both inputs cover the same
/// pages in the same order.
pub fn find_visible_lines(boxes: &[BoundingBox], page: u32, lines: &[LayoutLine]) -> Vec<String> {
    find_visible_text(boxes, page, &page_rects(lines, page))
}

/// Rectangles of the layout lines read under `page`.
pub fn page_rects(lines: &[LayoutLine], page: u32) -> Vec<Rect> {
    lines
        .iter()
        .filter(|line| line.page_no == page as usize)
        .map(|line| line.rect)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(page: u32, rect: Rect, text: &str) -> BoundingBox {
        BoundingBox {
            page,
            rect,
            text: text.to_string(),
            confidence: Some(90.0),
        }
    }

    #[test]
    fn test_visible_same_page_only() {
        let rect = Rect::new(0.1, 0.1, 0.05, 0.0125);
        let boxes = [word(1, rect, "visible"), word(2, rect, "other page")];

        assert_eq!(find_visible_text(&boxes, 1, &[rect]), ["visible"]);
        assert_eq!(find_visible_text(&boxes, 2, &[rect]), ["other page"]);
        assert!(find_visible_text(&boxes, 3, &[rect]).is_empty());
    }

    #[test]
    fn test_visible_at_most_once() {
        let boxes = [
            word(1, Rect::new(0.1, 0.1, 0.2, 0.1), "both"),
            word(1, Rect::new(0.8, 0.8, 0.1, 0.1), "none"),
            word(1, Rect::new(0.1, 0.3, 0.1, 0.01), "second"),
        ];
        let layout = [
            Rect::new(0.0, 0.0, 0.15, 0.15),
            Rect::new(0.2, 0.0, 0.5, 0.5),
        ];

        assert_eq!(find_visible_text(&boxes, 1, &layout), ["both", "second"]);
    }

    #[test]
    fn test_visible_keeps_box_order() {
        let layout = [Rect::new(0.0, 0.0, 1.0, 1.0)];
        let boxes = [
            word(1, Rect::new(0.9, 0.9, 0.01, 0.01), "c"),
            word(1, Rect::new(0.1, 0.1, 0.01, 0.01), "a"),
            word(1, Rect::new(0.5, 0.5, 0.01, 0.01), "b"),
        ];

        assert_eq!(find_visible_text(&boxes, 1, &layout), ["c", "a", "b"]);
    }

    #[test]
    fn test_visible_empty_inputs() {
        let boxes = [word(1, Rect::new(0.1, 0.1, 0.1, 0.1), "word")];
        assert!(find_visible_text(&boxes, 1, &[]).is_empty());
        assert!(find_visible_text(&[], 1, &[Rect::new(0.0, 0.0, 1.0, 1.0)]).is_empty());
    }

    #[test]
    fn test_visible_lines_page_aware() {
        let rect = Rect::new(0.1, 0.1, 0.05, 0.0125);
        let boxes = [word(1, rect, "first"), word(2, rect, "second")];
        let lines = [LayoutLine { rect, page_no: 2 }];

        // Permissive matching ignores the layout page
        assert_eq!(
            find_visible_text(&boxes, 1, &[lines[0].rect]),
            ["first"]
        );

        assert!(find_visible_lines(&boxes, 1, &lines).is_empty());
        assert_eq!(find_visible_lines(&boxes, 2, &lines), ["second"]);
    }

    #[test]
    fn test_visible_boxes_borrow_matches() {
        let boxes = [
            word(1, Rect::new(0.1, 0.1, 0.1, 0.1), "kept"),
            word(1, Rect::new(0.8, 0.8, 0.1, 0.1), "dropped"),
        ];
        let visible = find_visible_boxes(&boxes, 1, &[Rect::new(0.0, 0.0, 0.5, 0.5)]);

        assert_eq!(visible.len(), 1);
        assert!(std::ptr::eq(visible[0], &boxes[0]));
        assert_eq!(visible[0].confidence, Some(90.0));
    }
}
