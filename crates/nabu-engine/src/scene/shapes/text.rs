use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, Layer};

/// Horizontal placement of a text run inside its box. Text is always
/// vertically centred.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Single-line text payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Box the text is aligned within.
    pub rect: Rect,
    pub align: TextAlign,
}

impl DrawList {
    /// Records a single line of text aligned within `rect`.
    pub fn push_text(
        &mut self,
        layer: Layer,
        text: impl Into<String>,
        size: f32,
        color: Color,
        rect: Rect,
        align: TextAlign,
    ) {
        self.push(layer, DrawCmd::Text(TextCmd {
            text: text.into(),
            size,
            color,
            rect,
            align,
        }));
    }
}
