use nabu_engine::coords::Vec2;
use nabu_engine::text::TextMeasure;
use nabu_engine::theme::Theme;

// ── Edges ─────────────────────────────────────────────────────────────────

/// Insets on all four sides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    #[inline]
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self { top: vertical, bottom: vertical, left: horizontal, right: horizontal }
    }

    /// Total inset on the horizontal axis.
    #[inline]
    pub fn h(self) -> f32 {
        self.left + self.right
    }

    /// Total inset on the vertical axis.
    #[inline]
    pub fn v(self) -> f32 {
        self.top + self.bottom
    }

    /// Outer size of content of size `inner`.
    #[inline]
    pub fn grow(self, inner: Vec2) -> Vec2 {
        Vec2::new(inner.x + self.h(), inner.y + self.v())
    }
}

// ── LayoutCtx ────────────────────────────────────────────────────────────

/// Resources available to `measure`, `on_event` and content-mutating calls
/// that need to size text (adding rows, opening popups).
#[derive(Clone, Copy)]
pub struct LayoutCtx<'a> {
    pub text: &'a dyn TextMeasure,
    pub theme: &'a Theme,
}

impl<'a> LayoutCtx<'a> {
    #[inline]
    pub fn new(text: &'a dyn TextMeasure, theme: &'a Theme) -> Self {
        Self { text, theme }
    }

    #[inline]
    pub fn measure_text(&self, text: &str, size: f32) -> Vec2 {
        self.text.measure(text, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_grow_adds_both_sides() {
        let e = Edges::symmetric(3.0, 6.0);
        assert_eq!(e.grow(Vec2::new(10.0, 10.0)), Vec2::new(22.0, 16.0));
    }

    #[test]
    fn asymmetric_edges_sum_per_axis() {
        let e = Edges { top: 4.0, bottom: 8.0, left: 6.0, right: 10.0 };
        assert_eq!((e.h(), e.v()), (16.0, 12.0));
        assert_eq!(e.grow(Vec2::zero()), Vec2::new(16.0, 12.0));
    }
}
