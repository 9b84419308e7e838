use glam::DVec2;
use serde::Serialize;

use crate::layout::page::PageDimensions;

/// An axis-aligned rectangle in normalized page coordinates.
///
/// All fields are fractions of the page width (`x`, `width`) or height
/// (`y`, `height`), so rectangles that come from differently scaled sources
/// can be compared as long as they describe the same physical page. Values
/// are not clamped to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from its top-left corner and its size.
    pub fn from_min_size(min: DVec2, size: DVec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    /// Normalizes a rectangle given in pixels by the size of its page.
    ///
    /// # Example
    /// ```
    /// use glam::DVec2;
    /// use hyperpaper_core::analysis::rect::Rect;
    /// use hyperpaper_core::layout::page::PageDimensions;
    ///
    /// let page = PageDimensions::new(1000.0, 2000.0);
    /// let rect = Rect::from_pixels(DVec2::new(500.0, 1000.0), DVec2::new(100.0, 50.0), &page);
    /// assert_eq!(rect, Rect::new(0.5, 0.5, 0.1, 0.025));
    /// ```
    pub fn from_pixels(origin: DVec2, size: DVec2, page: &PageDimensions) -> Self {
        let page_size = page.size();
        Self::from_min_size(origin / page_size, size / page_size)
    }

    /// Top-left corner.
    pub fn min(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Bottom-right corner.
    pub fn max(&self) -> DVec2 {
        self.min() + DVec2::new(self.width, self.height)
    }

    /// Checks whether two rectangles overlap.
    ///
    /// The rectangles are separated only when one lies strictly left of or
    /// strictly above the other, so rectangles sharing an edge or a corner
    /// overlap. No tolerance is applied; see [`Rect::expand`].
    ///
    /// # Example
    /// ```
    /// use hyperpaper_core::analysis::rect::Rect;
    ///
    /// let a = Rect::new(0.0, 0.0, 0.5, 0.5);
    /// let touching = Rect::new(0.5, 0.5, 0.5, 0.5);
    /// let apart = Rect::new(0.6, 0.0, 0.1, 0.1);
    ///
    /// assert!(a.overlaps(&touching));
    /// assert!(!a.overlaps(&apart));
    /// ```
    pub fn overlaps(&self, other: &Self) -> bool {
        let separated =
            self.max().cmplt(other.min()).any() || other.max().cmplt(self.min()).any();

        !separated
    }

    /// Grows the rectangle by `margin` on every side.
    ///
    /// Callers that want fuzzy matching expand one side of the comparison
    /// before calling [`Rect::overlaps`].
    ///
    /// # Example
    /// ```
    /// use hyperpaper_core::analysis::rect::Rect;
    ///
    /// let line = Rect::new(0.1, 0.1, 0.5, 0.025);
    /// let word = Rect::new(0.61, 0.1, 0.05, 0.025);
    ///
    /// assert!(!line.overlaps(&word));
    /// assert!(line.expand(0.02).overlaps(&word));
    /// ```
    pub fn expand(&self, margin: f64) -> Self {
        let margin = DVec2::splat(margin);
        Self::from_min_size(
            self.min() - margin,
            DVec2::new(self.width, self.height) + margin * 2.0,
        )
    }
}

/// Free-function form of [`Rect::overlaps`].
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}
