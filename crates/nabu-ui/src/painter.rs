use std::rc::Rc;

use image::RgbaImage;
use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::paint::{Color, Paint};
use nabu_engine::scene::{DrawList, Layer, TextAlign};
use nabu_engine::text::TextMeasure;
use nabu_engine::theme::Theme;

use crate::constraints::LayoutCtx;

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList` together with the text measurer and theme so
/// paint code can size labels and look up named colors in one place.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    text: &'a dyn TextMeasure,
    theme: &'a Theme,
    layer: Layer,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, text: &'a dyn TextMeasure, theme: &'a Theme) -> Self {
        Self { draw_list, text, theme, layer: Layer::CONTENT }
    }

    // ── resources ─────────────────────────────────────────────────────────

    #[inline]
    pub fn theme(&self) -> &'a Theme {
        self.theme
    }

    #[inline]
    pub fn text_measure(&self) -> &'a dyn TextMeasure {
        self.text
    }

    #[inline]
    pub fn measure_text(&self, text: &str, size: f32) -> Vec2 {
        self.text.measure(text, size)
    }

    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'a> {
        LayoutCtx::new(self.text, self.theme)
    }

    // ── layers ────────────────────────────────────────────────────────────

    #[inline]
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Runs `f` with draws going to `layer`, then restores the previous layer.
    pub fn with_layer<R>(&mut self, layer: Layer, f: impl FnOnce(&mut Painter<'a>) -> R) -> R {
        let prev = std::mem::replace(&mut self.layer, layer);
        let out = f(self);
        self.layer = prev;
        out
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, paint: impl Into<Paint>) {
        self.draw_list.push_rect(self.layer, rect, paint);
    }

    /// Fills `rect` with the theme gradient named `key`.
    pub fn fill_vlinear(&mut self, rect: Rect, key: &str) {
        let gradient = self.theme.gradient(key);
        self.draw_list.push_rect(self.layer, rect, gradient);
    }

    pub fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        self.draw_list.push_stroke_rect(self.layer, rect, width, color);
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.draw_list.push_line(self.layer, from, to, width, color);
    }

    /// Single line of text aligned within `rect`, vertically centred.
    pub fn text(&mut self, text: impl Into<String>, size: f32, color: Color, rect: Rect, align: TextAlign) {
        self.draw_list.push_text(self.layer, text, size, color, rect, align);
    }

    pub fn image(&mut self, image: Rc<RgbaImage>, origin: Vec2) {
        self.draw_list.push_image(self.layer, image, origin);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Begin a scissor region. Must be paired with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    /// Runs `f` clipped to `rect`.
    pub fn clipped<R>(&mut self, rect: Rect, f: impl FnOnce(&mut Painter<'a>) -> R) -> R {
        self.push_clip(rect);
        let out = f(self);
        self.pop_clip();
        out
    }
}
