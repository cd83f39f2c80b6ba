//! Rows of image buttons sharing one selection.

use std::rc::Rc;

use image::RgbaImage;
use nabu_engine::coords::{Rect, Vec2};

use crate::constraints::LayoutCtx;
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

use super::button::ClickTracker;

const DEFAULT_SPACING: f32 = 5.0;

/// Rectangles of `sizes` laid out left to right from `rect`'s origin.
fn item_rects(rect: Rect, sizes: impl Iterator<Item = Vec2>, spacing: f32) -> Vec<Rect> {
    let mut x = rect.x();
    sizes
        .map(|size| {
            let r = Rect { origin: Vec2::new(x, rect.y()), size };
            x += size.x + spacing;
            r
        })
        .collect()
}

fn row_size(sizes: impl Iterator<Item = Vec2>, spacing: f32) -> Vec2 {
    let (mut w, mut h, mut n) = (0.0f32, 0.0f32, 0usize);
    for s in sizes {
        w += s.x;
        h = h.max(s.y);
        n += 1;
    }
    Vec2::new(w + spacing * n.saturating_sub(1) as f32, h)
}

fn image_size(img: &RgbaImage) -> Vec2 {
    Vec2::new(img.width() as f32, img.height() as f32)
}

// ── ImageButtonGroup ──────────────────────────────────────────────────────

pub struct ImageButtonItem {
    pub normal: Rc<RgbaImage>,
    pub hover: Rc<RgbaImage>,
    pub press: Rc<RgbaImage>,
    on_click: Option<Box<dyn FnMut()>>,
    tracker: ClickTracker,
}

impl ImageButtonItem {
    pub fn new(normal: Rc<RgbaImage>, hover: Rc<RgbaImage>, press: Rc<RgbaImage>) -> Self {
        Self { normal, hover, press, on_click: None, tracker: ClickTracker::default() }
    }

    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }
}

/// Image buttons of which exactly one is selected. The selected button keeps
/// its pressed image.
pub struct ImageButtonGroup {
    items: Vec<ImageButtonItem>,
    index: usize,
    spacing: f32,
}

impl ImageButtonGroup {
    pub fn new(items: Vec<ImageButtonItem>) -> Self {
        Self { items, index: 0, spacing: DEFAULT_SPACING }
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set_index(&mut self, index: usize) {
        if index < self.items.len() {
            self.index = index;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn rects(&self, rect: Rect) -> Vec<Rect> {
        item_rects(rect, self.items.iter().map(|i| image_size(&i.normal)), self.spacing)
    }
}

impl Widget for ImageButtonGroup {
    fn measure(&self, _ctx: &LayoutCtx) -> Vec2 {
        row_size(self.items.iter().map(|i| image_size(&i.normal)), self.spacing)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        for (n, (item, r)) in self.items.iter().zip(self.rects(rect)).enumerate() {
            let image = if n == self.index || item.tracker.is_pressed() {
                &item.press
            } else if item.tracker.is_hovered() {
                &item.hover
            } else {
                &item.normal
            };
            painter.image(Rc::clone(image), r.origin);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        let rects = self.rects(rect);
        let mut result = EventResult::Ignored;
        let mut clicked = None;
        for (n, (item, r)) in self.items.iter_mut().zip(rects).enumerate() {
            let (res, click) = item.tracker.update(event, r);
            if res.is_consumed() {
                result = EventResult::Consumed;
            }
            if click {
                if let Some(f) = &mut item.on_click {
                    f();
                }
                clicked = Some(n);
            }
        }
        if let Some(n) = clicked {
            self.index = n;
        }
        result
    }
}

// ── ToggleButtonGroup ─────────────────────────────────────────────────────

pub struct ToggleButtonItem {
    pub inactive: Rc<RgbaImage>,
    pub active: Rc<RgbaImage>,
    pub inactive_hover: Option<Rc<RgbaImage>>,
    pub active_hover: Option<Rc<RgbaImage>>,
    on_toggle: Option<Box<dyn FnMut(bool)>>,
    tracker: ClickTracker,
}

impl ToggleButtonItem {
    pub fn new(inactive: Rc<RgbaImage>, active: Rc<RgbaImage>) -> Self {
        Self {
            inactive,
            active,
            inactive_hover: None,
            active_hover: None,
            on_toggle: None,
            tracker: ClickTracker::default(),
        }
    }

    pub fn hover_images(mut self, inactive: Option<Rc<RgbaImage>>, active: Option<Rc<RgbaImage>>) -> Self {
        self.inactive_hover = inactive;
        self.active_hover = active;
        self
    }

    /// Called with the item's new state after each click.
    pub fn on_toggle(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_toggle = Some(Box::new(f));
        self
    }

    /// A hovered item shows its own hover image for its state, or the only
    /// hover image supplied, or its plain image when it has none.
    fn image(&self, active: bool) -> &Rc<RgbaImage> {
        let plain = if active { &self.active } else { &self.inactive };
        if !self.tracker.is_hovered() {
            return plain;
        }
        match (&self.inactive_hover, &self.active_hover) {
            (Some(inactive), Some(active_hover)) => {
                if active {
                    active_hover
                } else {
                    inactive
                }
            }
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => plain,
        }
    }
}

/// Toggle buttons of which at most one is active. Clicking the active button
/// turns it off.
pub struct ToggleButtonGroup {
    items: Vec<ToggleButtonItem>,
    index: Option<usize>,
    spacing: f32,
}

impl ToggleButtonGroup {
    pub fn new(items: Vec<ToggleButtonItem>) -> Self {
        Self { items, index: None, spacing: DEFAULT_SPACING }
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn set_index(&mut self, index: Option<usize>) {
        self.index = index.filter(|i| *i < self.items.len());
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.index.is_some()
    }

    fn rects(&self, rect: Rect) -> Vec<Rect> {
        item_rects(rect, self.items.iter().map(|i| image_size(&i.inactive)), self.spacing)
    }
}

impl Widget for ToggleButtonGroup {
    fn measure(&self, _ctx: &LayoutCtx) -> Vec2 {
        row_size(self.items.iter().map(|i| image_size(&i.inactive)), self.spacing)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        for (n, (item, r)) in self.items.iter().zip(self.rects(rect)).enumerate() {
            let image = item.image(self.index == Some(n));
            painter.image(Rc::clone(image), r.origin);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        let rects = self.rects(rect);
        let mut result = EventResult::Ignored;
        let mut clicked = None;
        for (n, (item, r)) in self.items.iter_mut().zip(rects).enumerate() {
            let (res, click) = item.tracker.update(event, r);
            if res.is_consumed() {
                result = EventResult::Consumed;
            }
            if click {
                clicked = Some(n);
            }
        }
        if let Some(n) = clicked {
            let active = self.index != Some(n);
            self.index = active.then_some(n);
            log::trace!("toggle group: item {n} active={active}");
            if let Some(f) = self.items.get_mut(n).and_then(|i| i.on_toggle.as_mut()) {
                f(active);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use image::Rgba;
    use nabu_engine::input::{Modifiers, MouseButton};
    use nabu_engine::scene::{DrawCmd, DrawList};
    use nabu_engine::text::FixedMetrics;
    use nabu_engine::theme::Theme;

    use super::*;

    fn img(shade: u8) -> Rc<RgbaImage> {
        Rc::new(RgbaImage::from_pixel(20, 10, Rgba([shade, shade, shade, 255])))
    }

    fn click(widget: &mut dyn Widget, ctx: &LayoutCtx, pos: Vec2) {
        let rect = Rect::new(0.0, 0.0, 200.0, 10.0);
        let press = UiEvent::Press { pos, root: pos, button: MouseButton::Left, modifiers: Modifiers::NONE, clicks: 1 };
        let release = UiEvent::Release { pos, root: pos, button: MouseButton::Left, modifiers: Modifiers::NONE };
        widget.on_event(&press, rect, ctx);
        widget.on_event(&release, rect, ctx);
    }

    fn painted_images(widget: &dyn Widget, env: (&Theme, &FixedMetrics)) -> Vec<Rc<RgbaImage>> {
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, env.1, env.0);
        widget.paint(&mut p, Rect::new(0.0, 0.0, 200.0, 10.0));
        list.items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Image(cmd) => Some(Rc::clone(&cmd.image)),
                _ => None,
            })
            .collect()
    }

    // ── ImageButtonGroup ──────────────────────────────────────────────────

    #[test]
    fn image_group_measures_items_with_spacing() {
        let (theme, text) = (Theme::builtin(), FixedMetrics::default());
        let ctx = LayoutCtx::new(&text, &theme);
        let group = ImageButtonGroup::new((0..3).map(|_| ImageButtonItem::new(img(1), img(2), img(3))).collect());
        assert_eq!(group.measure(&ctx), Vec2::new(70.0, 10.0));
    }

    #[test]
    fn image_group_click_selects_and_calls_back() {
        let (theme, text) = (Theme::builtin(), FixedMetrics::default());
        let ctx = LayoutCtx::new(&text, &theme);
        let log = Rc::new(RefCell::new(Vec::new()));
        let items = (0..3)
            .map(|n| {
                let log = Rc::clone(&log);
                ImageButtonItem::new(img(1), img(2), img(3)).on_click(move || log.borrow_mut().push(n))
            })
            .collect();
        let mut group = ImageButtonGroup::new(items);
        assert_eq!(group.index(), 0);

        click(&mut group, &ctx, Vec2::new(55.0, 5.0));
        assert_eq!(group.index(), 2);
        assert_eq!(*log.borrow(), [2]);

        // Clicking the gap selects nothing.
        click(&mut group, &ctx, Vec2::new(22.0, 5.0));
        assert_eq!(group.index(), 2);
    }

    #[test]
    fn selected_image_button_paints_pressed() {
        let (theme, text) = (Theme::builtin(), FixedMetrics::default());
        let (normal, press) = (img(1), img(3));
        let items = (0..2).map(|_| ImageButtonItem::new(Rc::clone(&normal), img(2), Rc::clone(&press))).collect();
        let mut group = ImageButtonGroup::new(items);
        group.set_index(1);
        let painted = painted_images(&group, (&theme, &text));
        assert!(Rc::ptr_eq(&painted[0], &normal));
        assert!(Rc::ptr_eq(&painted[1], &press));
    }

    // ── ToggleButtonGroup ─────────────────────────────────────────────────

    #[test]
    fn toggle_group_starts_inactive_and_toggles() {
        let (theme, text) = (Theme::builtin(), FixedMetrics::default());
        let ctx = LayoutCtx::new(&text, &theme);
        let states = Rc::new(RefCell::new(Vec::new()));
        let items = (0..2)
            .map(|_| {
                let states = Rc::clone(&states);
                ToggleButtonItem::new(img(1), img(2)).on_toggle(move |on| states.borrow_mut().push(on))
            })
            .collect();
        let mut group = ToggleButtonGroup::new(items);
        assert!(!group.is_active());

        click(&mut group, &ctx, Vec2::new(5.0, 5.0));
        assert_eq!(group.index(), Some(0));
        click(&mut group, &ctx, Vec2::new(30.0, 5.0));
        assert_eq!(group.index(), Some(1));
        click(&mut group, &ctx, Vec2::new(30.0, 5.0));
        assert_eq!(group.index(), None);
        assert_eq!(*states.borrow(), [true, true, false]);
    }

    #[test]
    fn toggle_hover_falls_back_to_the_only_hover_image() {
        let (theme, text) = (Theme::builtin(), FixedMetrics::default());
        let ctx = LayoutCtx::new(&text, &theme);
        let hover = img(9);
        let item = ToggleButtonItem::new(img(1), img(2)).hover_images(None, Some(Rc::clone(&hover)));
        let mut group = ToggleButtonGroup::new(vec![item]);
        let pos = Vec2::new(5.0, 5.0);
        group.on_event(&UiEvent::Motion { pos, root: pos, modifiers: Modifiers::NONE }, Rect::new(0.0, 0.0, 200.0, 10.0), &ctx);
        let painted = painted_images(&group, (&theme, &text));
        assert!(Rc::ptr_eq(&painted[0], &hover));
    }
}
