use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, Layer};

/// Straight line segment payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    pub color: Color,
}

impl DrawList {
    #[inline]
    pub fn push_line(&mut self, layer: Layer, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.push(layer, DrawCmd::Line(LineCmd { from, to, width, color }));
    }
}
