pub mod rect;
pub mod visibility;
