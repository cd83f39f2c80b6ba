pub(crate) mod image;
pub(crate) mod line;
pub(crate) mod rect;
pub(crate) mod text;

pub use image::ImageCmd;
pub use line::LineCmd;
pub use rect::{RectCmd, StrokeRectCmd};
pub use text::{TextAlign, TextCmd};
