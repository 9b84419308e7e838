pub mod analysis;
pub mod consts;
pub mod error;
pub mod layout;
pub mod parser;

// Re-export commonly used types
pub use analysis::{
    rect::{Rect, overlaps},
    visibility::{find_visible_boxes, find_visible_lines, find_visible_text},
};
pub use error::{ErrorKind, HyperpaperError};
pub use layout::{
    element::{BoundingBox, LayoutLine},
    page::PageDimensions,
};
pub use parser::{
    PageReconciler, ReconcilerConfig, extract_layout_lines, extract_visible_rects,
    load_bounding_boxes, load_bounding_boxes_with,
};
