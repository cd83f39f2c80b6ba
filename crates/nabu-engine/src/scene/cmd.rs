use crate::scene::shapes::image::ImageCmd;
use crate::scene::shapes::line::LineCmd;
use crate::scene::shapes::rect::{RectCmd, StrokeRectCmd};
use crate::scene::shapes::text::TextCmd;

/// Backend-agnostic draw command stream.
///
/// Each variant lives in its own module under `scene::shapes` together with
/// the `DrawList` helpers that record it.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    StrokeRect(StrokeRectCmd),
    Line(LineCmd),
    Text(TextCmd),
    Image(ImageCmd),
}
