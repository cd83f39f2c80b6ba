use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::paint::Color;

use crate::constraints::LayoutCtx;
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::signal::Signal;
use crate::widget::Widget;

use super::button::{ButtonVisual, ClickTracker};

/// Palette offered next to a color picker.
pub const DEFAULT_COLOR_LIST: [&str; 16] = [
    "#000000", "#808080", "#E20417", "#F29300", "#FFEC00", "#95BE0D", "#008F35", "#00968F",
    "#FFFFFF", "#C0C0C0", "#E2004E", "#E2007A", "#920A7E", "#162883", "#0069B2", "#009DE0",
];

/// `#RRGGBB`, case-insensitive.
pub fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#').is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

fn swatch_color(hex: &str) -> Color {
    Color::from_hex(hex).unwrap_or_else(|e| {
        log::debug!("color swatch: {e}");
        Color::black()
    })
}

// ── ColorButton ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorButtonEvent {
    /// The host should open a color chooser.
    Clicked,
    ColorSelected(String),
}

/// Button showing a color swatch.
pub struct ColorButton {
    color: String,
    sensitive: bool,
    tracker: ClickTracker,
    pub events: Signal<ColorButtonEvent>,
}

impl ColorButton {
    pub const WIDTH: f32 = 69.0;
    pub const HEIGHT: f32 = 22.0;
    pub const AREA_WIDTH: f32 = 39.0;
    pub const AREA_HEIGHT: f32 = 14.0;

    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            sensitive: true,
            tracker: ClickTracker::default(),
            events: Signal::new(),
        }
    }

    #[inline]
    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    /// Sets the color chosen by the host's chooser and emits
    /// [`ColorButtonEvent::ColorSelected`]. Malformed colors are refused.
    pub fn select_color(&mut self, color: &str) -> bool {
        if !is_hex_color(color) {
            log::warn!("color button: refusing malformed color {color:?}");
            return false;
        }
        self.color = color.to_string();
        self.events.emit(&ColorButtonEvent::ColorSelected(self.color.clone()));
        true
    }

    pub fn set_sensitive(&mut self, sensitive: bool) {
        self.sensitive = sensitive;
        if !sensitive {
            self.tracker = ClickTracker::default();
        }
    }

    /// Swatch rectangle centred in `rect`.
    pub fn color_area(rect: Rect) -> Rect {
        Rect::new(
            rect.x() + ((rect.width() - Self::AREA_WIDTH) / 2.0).floor(),
            rect.y() + ((rect.height() - Self::AREA_HEIGHT) / 2.0).floor(),
            Self::AREA_WIDTH,
            Self::AREA_HEIGHT,
        )
    }
}

impl Default for ColorButton {
    fn default() -> Self {
        Self::new("#FF0000")
    }
}

impl Widget for ColorButton {
    fn measure(&self, _ctx: &LayoutCtx) -> Vec2 {
        Vec2::new(Self::WIDTH, Self::HEIGHT)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let theme = painter.theme();
        let visual = self.tracker.visual(self.sensitive);
        painter.fill_vlinear(rect.inset(1.0, 1.0), visual.gradient_key());
        painter.stroke_rect(rect, 1.0, theme.color("button_frame"));

        let area = Self::color_area(rect);
        let mut swatch = swatch_color(&self.color);
        if visual == ButtonVisual::Insensitive {
            swatch = swatch.with_alpha_factor(0.4);
        }
        painter.fill_rect(area, swatch);
        painter.stroke_rect(area, 1.0, theme.color("color_button_frame"));
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        if !self.sensitive {
            return EventResult::Ignored;
        }
        let (result, clicked) = self.tracker.update(event, rect);
        if clicked {
            self.events.emit(&ColorButtonEvent::Clicked);
        }
        result
    }
}

// ── ColorItem ─────────────────────────────────────────────────────────────

/// One palette swatch.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorItem {
    color: String,
    hover: bool,
    highlight: bool,
}

impl ColorItem {
    pub const WIDTH: f32 = 20.0;
    pub const HEIGHT: f32 = 16.0;
    pub const PADDING: f32 = 4.0;

    pub fn new(color: impl Into<String>) -> Self {
        Self { color: color.into(), hover: false, highlight: false }
    }

    /// Items for [`DEFAULT_COLOR_LIST`].
    pub fn palette() -> Vec<ColorItem> {
        DEFAULT_COLOR_LIST.iter().map(|c| ColorItem::new(*c)).collect()
    }

    #[inline]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hover
    }

    pub fn set_hover(&mut self, hover: bool) {
        self.hover = hover;
    }

    #[inline]
    pub fn is_highlighted(&self) -> bool {
        self.highlight
    }

    pub fn set_highlight(&mut self, highlight: bool) {
        self.highlight = highlight;
    }
}

impl Widget for ColorItem {
    fn measure(&self, _ctx: &LayoutCtx) -> Vec2 {
        Vec2::new(Self::WIDTH + Self::PADDING * 2.0, Self::HEIGHT + Self::PADDING * 2.0)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let theme = painter.theme();
        let swatch = Rect::new(rect.x() + Self::PADDING, rect.y() + Self::PADDING, Self::WIDTH, Self::HEIGHT);
        painter.fill_rect(swatch, swatch_color(&self.color));
        if self.hover {
            painter.stroke_rect(swatch.inset(-1.0, -1.0), 1.0, theme.color("color_item_hover"));
        } else if self.highlight {
            painter.stroke_rect(swatch.inset(-1.0, -1.0), 1.0, theme.color("color_item_highlight"));
        }
        painter.stroke_rect(swatch, 1.0, theme.color("color_item_frame"));
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        match event {
            UiEvent::Motion { pos, .. } => self.hover = rect.contains(*pos),
            UiEvent::Leave => self.hover = false,
            _ => {}
        }
        EventResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use nabu_engine::input::{Modifiers, MouseButton};
    use nabu_engine::scene::{DrawCmd, DrawList};
    use nabu_engine::text::FixedMetrics;
    use nabu_engine::theme::Theme;

    use super::*;
    use crate::signal::collect_into;

    #[test]
    fn hex_color_validation() {
        assert!(is_hex_color("#00ff7A"));
        assert!(!is_hex_color("00ff7a"));
        assert!(!is_hex_color("#00ff7"));
        assert!(!is_hex_color("#00ff7g"));
        assert!(DEFAULT_COLOR_LIST.iter().all(|c| is_hex_color(c)));
    }

    #[test]
    fn color_button_click_and_selection() {
        let (theme, text) = (Theme::builtin(), FixedMetrics::default());
        let ctx = LayoutCtx::new(&text, &theme);
        let mut button = ColorButton::default();
        let events = collect_into(&button.events);
        let rect = Rect::new(0.0, 0.0, 69.0, 22.0);
        let pos = Vec2::new(30.0, 10.0);

        button.on_event(&UiEvent::Press { pos, root: pos, button: MouseButton::Left, modifiers: Modifiers::NONE, clicks: 1 }, rect, &ctx);
        button.on_event(&UiEvent::Release { pos, root: pos, button: MouseButton::Left, modifiers: Modifiers::NONE }, rect, &ctx);
        assert!(button.select_color("#0069B2"));
        assert!(!button.select_color("blue"));

        assert_eq!(button.color(), "#0069B2");
        assert_eq!(*events.borrow(), [ColorButtonEvent::Clicked, ColorButtonEvent::ColorSelected("#0069B2".into())]);
    }

    #[test]
    fn color_button_swatch_is_centred() {
        let area = ColorButton::color_area(Rect::new(10.0, 10.0, 69.0, 22.0));
        assert_eq!(area, Rect::new(25.0, 14.0, 39.0, 14.0));
    }

    #[test]
    fn color_item_size_and_hover_frame() {
        let (theme, text) = (Theme::builtin(), FixedMetrics::default());
        let ctx = LayoutCtx::new(&text, &theme);
        let mut item = ColorItem::new("#E20417");
        assert_eq!(item.measure(&ctx), Vec2::new(28.0, 24.0));

        let rect = Rect::new(0.0, 0.0, 28.0, 24.0);
        let pos = Vec2::new(10.0, 10.0);
        item.on_event(&UiEvent::Motion { pos, root: pos, modifiers: Modifiers::NONE }, rect, &ctx);
        assert!(item.is_hovered());

        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &text, &theme);
        item.paint(&mut p, rect);
        let hover = theme.color("color_item_hover");
        assert!(list.items().iter().any(|i| matches!(&i.cmd, DrawCmd::StrokeRect(s) if s.color == hover)));
        assert_eq!(ColorItem::palette().len(), 16);
    }
}
