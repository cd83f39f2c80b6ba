use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::input::MouseButton;
use nabu_engine::scene::TextAlign;

use crate::constraints::{Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

// ── ClickTracker ──────────────────────────────────────────────────────────

/// Visual state of a clickable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVisual {
    Normal,
    Hover,
    Press,
    Insensitive,
}

impl ButtonVisual {
    /// Theme gradient for this state.
    pub fn gradient_key(self) -> &'static str {
        match self {
            ButtonVisual::Normal => "button_normal",
            ButtonVisual::Hover => "button_hover",
            ButtonVisual::Press => "button_press",
            ButtonVisual::Insensitive => "button_insensitive",
        }
    }
}

/// Hover and press bookkeeping shared by every clickable widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickTracker {
    hovered: bool,
    pressed: bool,
}

impl ClickTracker {
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn visual(&self, sensitive: bool) -> ButtonVisual {
        match (sensitive, self.pressed && self.hovered, self.hovered) {
            (false, _, _) => ButtonVisual::Insensitive,
            (true, true, _) => ButtonVisual::Press,
            (true, false, true) => ButtonVisual::Hover,
            _ => ButtonVisual::Normal,
        }
    }

    /// Tracks `event` against `rect`. The flag is true when a left press and
    /// the following release both landed inside `rect`.
    pub fn update(&mut self, event: &UiEvent, rect: Rect) -> (EventResult, bool) {
        match event {
            UiEvent::Motion { pos, .. } => {
                self.hovered = rect.contains(*pos);
                (EventResult::Ignored, false)
            }
            UiEvent::Press { pos, button: MouseButton::Left, .. } if rect.contains(*pos) => {
                self.hovered = true;
                self.pressed = true;
                (EventResult::Consumed, false)
            }
            UiEvent::Release { pos, button: MouseButton::Left, .. } if self.pressed => {
                self.pressed = false;
                let inside = rect.contains(*pos);
                self.hovered = inside;
                (EventResult::Consumed, inside)
            }
            UiEvent::Leave => {
                self.hovered = false;
                (EventResult::Ignored, false)
            }
            UiEvent::FocusOut => {
                self.pressed = false;
                (EventResult::Ignored, false)
            }
            _ => (EventResult::Ignored, false),
        }
    }
}

// ── Button ────────────────────────────────────────────────────────────────

/// Text button painted from the theme's `button_*` gradients.
///
/// # Example
/// ```rust,ignore
/// Button::new("Apply")
///     .padding(Edges::symmetric(4.0, 12.0))
///     .on_click(|| log::info!("applied"))
/// ```
pub struct Button {
    label: String,
    font_size: f32,
    padding: Edges,
    min_width: f32,
    min_height: f32,
    sensitive: bool,
    tracker: ClickTracker,
    on_click: Option<Box<dyn FnMut()>>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            font_size: 9.0,
            padding: Edges::symmetric(4.0, 12.0),
            min_width: 69.0,
            min_height: 22.0,
            sensitive: true,
            tracker: ClickTracker::default(),
            on_click: None,
        }
    }

    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn min_size(mut self, width: f32, height: f32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    #[inline]
    pub fn is_sensitive(&self) -> bool {
        self.sensitive
    }

    /// Insensitive buttons paint greyed out and ignore input.
    pub fn set_sensitive(&mut self, sensitive: bool) {
        self.sensitive = sensitive;
        if !sensitive {
            self.tracker = ClickTracker::default();
        }
    }

    pub fn visual(&self) -> ButtonVisual {
        self.tracker.visual(self.sensitive)
    }
}

impl Widget for Button {
    fn measure(&self, ctx: &LayoutCtx) -> Vec2 {
        let text = ctx.text.measure(&self.label, self.font_size);
        let outer = self.padding.grow(text);
        Vec2::new(outer.x.max(self.min_width), outer.y.max(self.min_height))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let theme = painter.theme();
        let visual = self.visual();
        painter.fill_vlinear(rect.inset(1.0, 1.0), visual.gradient_key());
        painter.stroke_rect(rect, 1.0, theme.color("button_frame"));

        let text_color = match visual {
            ButtonVisual::Insensitive => theme.color("button_insensitive_text"),
            _ => theme.color("button_text"),
        };
        painter.text(self.label.clone(), self.font_size, text_color, rect, TextAlign::Center);
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        if !self.sensitive {
            return EventResult::Ignored;
        }
        let (result, clicked) = self.tracker.update(event, rect);
        if clicked {
            if let Some(f) = &mut self.on_click {
                f();
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use nabu_engine::input::Modifiers;
    use nabu_engine::paint::Paint;
    use nabu_engine::scene::{DrawCmd, DrawList};
    use nabu_engine::text::FixedMetrics;
    use nabu_engine::theme::Theme;

    use super::*;

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 80.0, 22.0)
    }

    fn press(pos: Vec2) -> UiEvent {
        UiEvent::Press { pos, root: pos, button: MouseButton::Left, modifiers: Modifiers::NONE, clicks: 1 }
    }

    fn release(pos: Vec2) -> UiEvent {
        UiEvent::Release { pos, root: pos, button: MouseButton::Left, modifiers: Modifiers::NONE }
    }

    fn motion(pos: Vec2) -> UiEvent {
        UiEvent::Motion { pos, root: pos, modifiers: Modifiers::NONE }
    }

    fn clicking_button(clicks: Rc<Cell<u32>>) -> Button {
        Button::new("OK").on_click(move || clicks.set(clicks.get() + 1))
    }

    // ── click ─────────────────────────────────────────────────────────────

    #[test]
    fn press_and_release_inside_clicks() {
        let (theme, text) = (Theme::builtin(), FixedMetrics::default());
        let ctx = LayoutCtx::new(&text, &theme);
        let clicks = Rc::new(Cell::new(0));
        let mut button = clicking_button(Rc::clone(&clicks));

        let inside = Vec2::new(10.0, 10.0);
        assert_eq!(button.on_event(&press(inside), rect(), &ctx), EventResult::Consumed);
        assert_eq!(button.visual(), ButtonVisual::Press);
        button.on_event(&release(inside), rect(), &ctx);
        assert_eq!(clicks.get(), 1);
        assert_eq!(button.visual(), ButtonVisual::Hover);
    }

    #[test]
    fn release_outside_does_not_click() {
        let (theme, text) = (Theme::builtin(), FixedMetrics::default());
        let ctx = LayoutCtx::new(&text, &theme);
        let clicks = Rc::new(Cell::new(0));
        let mut button = clicking_button(Rc::clone(&clicks));

        button.on_event(&press(Vec2::new(10.0, 10.0)), rect(), &ctx);
        button.on_event(&motion(Vec2::new(200.0, 10.0)), rect(), &ctx);
        assert_eq!(button.visual(), ButtonVisual::Normal);
        button.on_event(&release(Vec2::new(200.0, 10.0)), rect(), &ctx);
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn insensitive_button_ignores_input() {
        let (theme, text) = (Theme::builtin(), FixedMetrics::default());
        let ctx = LayoutCtx::new(&text, &theme);
        let clicks = Rc::new(Cell::new(0));
        let mut button = clicking_button(Rc::clone(&clicks));
        button.set_sensitive(false);

        let inside = Vec2::new(10.0, 10.0);
        assert_eq!(button.on_event(&press(inside), rect(), &ctx), EventResult::Ignored);
        button.on_event(&release(inside), rect(), &ctx);
        assert_eq!(clicks.get(), 0);
        assert_eq!(button.visual(), ButtonVisual::Insensitive);
    }

    // ── layout / paint ────────────────────────────────────────────────────

    #[test]
    fn measure_respects_minimum_size() {
        let (theme, text) = (Theme::builtin(), FixedMetrics::default());
        let ctx = LayoutCtx::new(&text, &theme);
        assert_eq!(Button::new("OK").measure(&ctx), Vec2::new(69.0, 22.0));
        // 30 chars * 4.5 + 24 padding.
        let wide = Button::new("x".repeat(30)).measure(&ctx);
        assert_eq!(wide.x, 159.0);
    }

    #[test]
    fn paint_uses_state_gradient() {
        let (theme, text) = (Theme::builtin(), FixedMetrics::default());
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &text, &theme);
        let mut button = Button::new("OK");
        button.set_sensitive(false);
        button.paint(&mut p, rect());

        assert_eq!(list.texts(), ["OK"]);
        let expected = Paint::from(theme.gradient("button_insensitive"));
        let filled = list.items().iter().any(|i| matches!(&i.cmd, DrawCmd::Rect(r) if r.paint == expected));
        assert!(filled);
    }
}
