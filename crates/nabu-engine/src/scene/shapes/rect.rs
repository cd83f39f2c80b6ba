use crate::coords::Rect;
use crate::paint::{Color, Paint};
use crate::scene::{DrawCmd, DrawList, Layer};

/// Filled rectangle payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub paint: Paint,
}

/// Rectangle outline payload. The stroke sits inside `rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeRectCmd {
    pub rect: Rect,
    pub width: f32,
    pub color: Color,
}

impl DrawList {
    /// Records a filled rectangle.
    #[inline]
    pub fn push_rect(&mut self, layer: Layer, rect: Rect, paint: impl Into<Paint>) {
        self.push(layer, DrawCmd::Rect(RectCmd { rect, paint: paint.into() }));
    }

    #[inline]
    pub fn push_stroke_rect(&mut self, layer: Layer, rect: Rect, width: f32, color: Color) {
        self.push(layer, DrawCmd::StrokeRect(StrokeRectCmd { rect, width, color }));
    }
}
