use glam::DVec2;

/// Pixel size of the page that coordinates are currently expressed in.
///
/// Only lives for the duration of one parse pass; every page marker replaces
/// the previous value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDimensions {
    pub width: f64,
    pub height: f64,
}

impl PageDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Both sides are finite and strictly positive, so normalizing by this
    /// page cannot produce infinities or NaNs.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
