use nabu_engine::coords::{Rect, Vec2};

use crate::constraints::LayoutCtx;
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;

// ── Widget trait ──────────────────────────────────────────────────────────

/// The contract every toolkit widget implements.
///
/// `rect` is the area the host allocated to the widget, in surface
/// coordinates. Widgets hit-test events against it and paint inside it.
pub trait Widget {
    /// Natural size of the widget.
    fn measure(&self, ctx: &LayoutCtx) -> Vec2;

    fn paint(&self, painter: &mut Painter, rect: Rect);

    /// Route an input event. Return [`EventResult::Consumed`] to stop propagation.
    fn on_event(&mut self, _event: &UiEvent, _rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        EventResult::Ignored
    }
}

// ── Cursor ────────────────────────────────────────────────────────────────

/// Pointer shape a widget asks the host to show.
#[derive(Debug, Clone, Default)]
pub enum CursorShape {
    #[default]
    Default,
    /// Horizontal double arrow over a column separator.
    ColumnResize,
    /// Custom bitmap, hotspot at the top-left corner.
    Bitmap(std::rc::Rc<image::RgbaImage>),
}

impl PartialEq for CursorShape {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CursorShape::Default, CursorShape::Default) => true,
            (CursorShape::ColumnResize, CursorShape::ColumnResize) => true,
            (CursorShape::Bitmap(a), CursorShape::Bitmap(b)) => std::rc::Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
