//! Drop-down lists and the popup manager that routes grabbed input to them.
//!
//! A [`Droplist`] is a single popup: a column of labelled items and
//! separators with keyboard navigation and an optional scrolling area. Open
//! popups live in a [`PopupManager`], which holds the input grab, keeps the
//! chain of nested sub-lists and re-dispatches every captured event to the
//! popup it belongs to.

mod item;
mod manager;
mod position;
mod render;

pub use item::DroplistItem;
pub use manager::{Dispatch, InputGrab, NullGrab, PopupId, PopupManager};
pub use position::{place_popup, place_submenu, Align};

use std::cell::RefCell;
use std::rc::Rc;

use image::RgbaImage;
use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::input::{Key, MouseButton};
use nabu_engine::scroll::{ScrollArea, ScrollHandle};

use crate::constraints::LayoutCtx;
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::signal::Signal;
use crate::widget::Widget;

/// Border drawn around every popup.
const FRAME_WIDTH: f32 = 1.0;
const SCROLLBAR_WIDTH: f32 = 4.0;
const MIN_THUMB_HEIGHT: f32 = 12.0;

// ── Config ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DroplistConfig {
    /// Horizontal and vertical alignment against the anchor point.
    pub align: (Align, Align),
    pub font_size: f32,
    pub padding_x: f32,
    pub padding_y: f32,
    pub item_padding_left: f32,
    pub item_padding_right: f32,
    pub item_padding_y: f32,
    pub max_width: Option<f32>,
    /// Taller content scrolls.
    pub max_height: Option<f32>,
    pub opacity: f32,
    pub shadow: bool,
    pub shadow_radius: u32,
}

impl Default for DroplistConfig {
    fn default() -> Self {
        Self {
            align: (Align::Start, Align::Start),
            font_size: 9.0,
            padding_x: 0.0,
            padding_y: 0.0,
            item_padding_left: 6.0,
            item_padding_right: 32.0,
            item_padding_y: 3.0,
            max_width: None,
            max_height: None,
            opacity: 1.0,
            shadow: true,
            shadow_radius: 6,
        }
    }
}

impl DroplistConfig {
    pub fn align(mut self, x: Align, y: Align) -> Self {
        self.align = (x, y);
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn padding(mut self, x: f32, y: f32) -> Self {
        self.padding_x = x;
        self.padding_y = y;
        self
    }

    pub fn item_padding(mut self, left: f32, right: f32, y: f32) -> Self {
        self.item_padding_left = left;
        self.item_padding_right = right;
        self.item_padding_y = y;
        self
    }

    pub fn max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn max_height(mut self, height: f32) -> Self {
        self.max_height = Some(height);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }
}

// ── Events ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DroplistEvent<V> {
    /// An item was activated by click or Return. The popup chain closes
    /// right after.
    ItemSelected { label: String, value: V, index: usize },
    /// A key was released while `index` was highlighted.
    KeyReleased { label: String, value: V, index: usize },
    Closed,
}

/// What a popup asks of its manager after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Response {
    Ignored,
    Handled,
    /// The highlighted item was chosen.
    Activate,
    Close,
}

#[derive(Debug, Clone, Copy)]
struct ThumbDrag {
    start_y: f32,
    start_value: f32,
}

// ── Droplist ──────────────────────────────────────────────────────────────

pub struct Droplist<V> {
    items: Vec<DroplistItem<V>>,
    config: DroplistConfig,
    scroll: ScrollHandle,
    tops: Vec<f32>,
    heights: Vec<f32>,
    content_width: f32,
    size: Vec2,
    origin: Vec2,
    active: Option<usize>,
    /// Item whose sub-list is open; painted as active.
    submenu_item: Option<usize>,
    parent: Option<PopupId>,
    child: Option<PopupId>,
    thumb_drag: Option<ThumbDrag>,
    shadow: RefCell<Option<Rc<RgbaImage>>>,
    pub events: Signal<DroplistEvent<V>>,
}

impl<V: Clone> Droplist<V> {
    /// Lays out `items` and highlights the first selectable one.
    pub fn new(ctx: &LayoutCtx, items: Vec<DroplistItem<V>>, config: DroplistConfig) -> Self {
        let sizes: Vec<Vec2> = items.iter().map(|i| i.measure(ctx.text, &config)).collect();
        let heights: Vec<f32> = sizes.iter().map(|s| s.y).collect();
        let tops: Vec<f32> = heights
            .iter()
            .scan(0.0, |acc, h| {
                let top = *acc;
                *acc += h;
                Some(top)
            })
            .collect();
        let content_height: f32 = heights.iter().sum();

        let mut content_width = items
            .iter()
            .zip(&sizes)
            .filter(|(item, _)| item.is_selectable())
            .map(|(_, s)| s.x)
            .fold(config.item_padding_left + config.item_padding_right, f32::max);
        if let Some(max) = config.max_width {
            content_width = content_width.min(max);
        }

        let inset_x = FRAME_WIDTH + config.padding_x;
        let inset_y = FRAME_WIDTH + config.padding_y;
        let page_height = match config.max_height {
            Some(max) => content_height.min((max - inset_y * 2.0).max(0.0)),
            None => content_height,
        };

        let mut area = ScrollArea::new(content_width, page_height);
        area.vadjust.set_upper(content_height);
        let size = Vec2::new(content_width + inset_x * 2.0, page_height + inset_y * 2.0);

        let mut list = Self {
            items,
            config,
            scroll: area.into_handle(),
            tops,
            heights,
            content_width,
            size,
            origin: Vec2::zero(),
            active: None,
            submenu_item: None,
            parent: None,
            child: None,
            thumb_drag: None,
            shadow: RefCell::new(None),
            events: Signal::new(),
        };
        list.select_first();
        list
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &DroplistConfig {
        &self.config
    }

    #[inline]
    pub fn items(&self) -> &[DroplistItem<V>] {
        &self.items
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Screen position of the top-left corner while open.
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub(crate) fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Screen rectangle while open.
    pub fn rect(&self) -> Rect {
        Rect { origin: self.origin, size: self.size }
    }

    #[inline]
    pub fn scroll(&self) -> &ScrollHandle {
        &self.scroll
    }

    /// Highlighted item.
    #[inline]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Highlights `index` if it is selectable.
    pub fn set_active(&mut self, index: usize) {
        if self.items.get(index).is_some_and(DroplistItem::is_selectable) {
            self.active = Some(index);
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<PopupId> {
        self.parent
    }

    #[inline]
    pub fn child(&self) -> Option<PopupId> {
        self.child
    }

    pub(crate) fn set_parent(&mut self, parent: Option<PopupId>) {
        self.parent = parent;
    }

    pub(crate) fn set_child(&mut self, child: Option<PopupId>, item: Option<usize>) {
        self.child = child;
        self.submenu_item = item;
    }

    #[inline]
    pub fn submenu_item(&self) -> Option<usize> {
        self.submenu_item
    }

    // ── geometry ──────────────────────────────────────────────────────────

    fn inset(&self) -> Vec2 {
        Vec2::new(FRAME_WIDTH + self.config.padding_x, FRAME_WIDTH + self.config.padding_y)
    }

    fn scroll_state(&self) -> (f32, f32, f32) {
        let scroll = self.scroll.borrow();
        (scroll.vadjust.value(), scroll.vadjust.page_size(), scroll.vadjust.max_value())
    }

    fn content_height(&self) -> f32 {
        self.scroll.borrow().vadjust.upper()
    }

    /// Visible item area, popup-local.
    pub fn item_area(&self) -> Rect {
        let inset = self.inset();
        let (_, page, _) = self.scroll_state();
        Rect { origin: inset, size: Vec2::new(self.content_width, page) }
    }

    /// Rectangle of item `index`, popup-local, after scrolling.
    pub fn item_rect(&self, index: usize) -> Option<Rect> {
        let top = *self.tops.get(index)?;
        let inset = self.inset();
        let (v, _, _) = self.scroll_state();
        Some(Rect::new(inset.x, inset.y + top - v, self.content_width, self.heights[index]))
    }

    /// Item under the popup-local point `pos`, separators included.
    pub fn item_at(&self, pos: Vec2) -> Option<usize> {
        let area = self.item_area();
        if !area.contains(pos) {
            return None;
        }
        let (v, _, _) = self.scroll_state();
        let y = pos.y - area.y() + v;
        self.tops.iter().zip(&self.heights).position(|(top, h)| y >= *top && y < top + h)
    }

    fn contains_local(&self, pos: Vec2) -> bool {
        Rect { origin: Vec2::zero(), size: self.size }.contains(pos)
    }

    /// Scrollbar thumb, popup-local, when the items overflow.
    pub(crate) fn thumb_rect(&self) -> Option<Rect> {
        let (v, page, max) = self.scroll_state();
        if max <= 0.0 {
            return None;
        }
        let area = self.item_area();
        let thumb_h = (page * page / self.content_height()).max(MIN_THUMB_HEIGHT).min(page);
        let y = area.y() + v / max * (page - thumb_h);
        Some(Rect::new(area.right() - SCROLLBAR_WIDTH, y, SCROLLBAR_WIDTH, thumb_h))
    }

    fn set_scroll(&self, value: f32) {
        self.scroll.borrow_mut().vadjust.set_value(value);
    }

    /// Scrolls the least amount that shows item `index` completely.
    fn reveal(&self, index: usize) {
        let (v, page, _) = self.scroll_state();
        let (top, bottom) = (self.tops[index], self.tops[index] + self.heights[index]);
        if top < v {
            self.set_scroll(top);
        } else if bottom > v + page {
            self.set_scroll(bottom - page);
        }
    }

    /// Sub-list anchor for item `index`: the item's top in screen coordinates.
    pub fn item_screen_top(&self, index: usize) -> Option<f32> {
        self.item_rect(index).map(|r| self.origin.y + r.y())
    }

    // ── navigation ────────────────────────────────────────────────────────

    fn selectable(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.items.iter().enumerate().filter(|(_, i)| i.is_selectable()).map(|(n, _)| n)
    }

    pub fn select_first(&mut self) {
        let first = self.selectable().next();
        if let Some(first) = first {
            self.active = Some(first);
            let lower = self.scroll.borrow().vadjust.lower();
            self.set_scroll(lower);
        }
    }

    pub fn select_last(&mut self) {
        let last = self.selectable().next_back();
        if let Some(last) = last {
            self.active = Some(last);
            let (_, _, max) = self.scroll_state();
            self.set_scroll(max);
        }
    }

    /// Previous selectable item; stays put on the first one.
    pub fn select_prev(&mut self) {
        let Some(current) = self.active else {
            self.select_first();
            return;
        };
        let prev = self.selectable().rev().find(|i| *i < current);
        if let Some(prev) = prev {
            self.active = Some(prev);
            self.reveal(prev);
        }
    }

    /// Next selectable item; stays put on the last one.
    pub fn select_next(&mut self) {
        let Some(current) = self.active else {
            self.select_first();
            return;
        };
        let next = self.selectable().find(|i| *i > current);
        if let Some(next) = next {
            self.active = Some(next);
            self.reveal(next);
        }
    }

    /// Scrolls up a page and highlights the first selectable item starting
    /// inside the new view.
    pub fn page_up(&mut self) {
        let (v, page, _) = self.scroll_state();
        self.set_scroll(v - page);
        let (v, _, _) = self.scroll_state();
        let first_in_view = self.selectable().find(|i| self.tops[*i] >= v);
        if let Some(index) = first_in_view {
            self.active = Some(index);
        }
    }

    /// Scrolls down a page and highlights the last selectable item ending
    /// inside the new view.
    pub fn page_down(&mut self) {
        let (v, page, _) = self.scroll_state();
        self.set_scroll(v + page);
        let (v, page, _) = self.scroll_state();
        let last_in_view = self.selectable().rev().find(|i| self.tops[*i] + self.heights[*i] <= v + page);
        if let Some(index) = last_in_view {
            self.active = Some(index);
        }
    }

    fn active_entry(&self) -> Option<(usize, String, V)> {
        let index = self.active?;
        match self.items.get(index)? {
            DroplistItem::Selectable { label, value } => Some((index, label.clone(), value.clone())),
            DroplistItem::Separator => None,
        }
    }

    /// Emits [`DroplistEvent::ItemSelected`] for the highlighted item.
    /// Returns false when nothing is highlighted.
    pub fn activate(&self) -> bool {
        match self.active_entry() {
            Some((index, label, value)) => {
                log::debug!("droplist: item {index} ({label}) selected");
                self.events.emit(&DroplistEvent::ItemSelected { label, value, index });
                true
            }
            None => false,
        }
    }

    // ── input ─────────────────────────────────────────────────────────────

    pub(crate) fn key_press(&mut self, key: Key) -> Response {
        match key {
            Key::Home => self.select_first(),
            Key::End => self.select_last(),
            Key::PageUp => self.page_up(),
            Key::PageDown => self.page_down(),
            Key::ArrowUp => self.select_prev(),
            Key::ArrowDown => self.select_next(),
            Key::Enter if self.active.is_some() => return Response::Activate,
            Key::Enter => {}
            Key::Escape => return Response::Close,
            _ => return Response::Ignored,
        }
        Response::Handled
    }

    pub(crate) fn key_release(&self) {
        if let Some((index, label, value)) = self.active_entry() {
            self.events.emit(&DroplistEvent::KeyReleased { label, value, index });
        }
    }

    /// Press at popup-local `pos`.
    pub(crate) fn press(&mut self, pos: Vec2) -> Response {
        if self.thumb_rect().is_some_and(|t| t.contains(pos)) {
            let (v, _, _) = self.scroll_state();
            self.thumb_drag = Some(ThumbDrag { start_y: pos.y, start_value: v });
            return Response::Handled;
        }
        match self.item_at(pos) {
            Some(index) if self.items[index].is_selectable() => {
                self.active = Some(index);
                Response::Activate
            }
            _ if self.contains_local(pos) => Response::Handled,
            _ => Response::Ignored,
        }
    }

    /// Pointer motion at popup-local `pos`, which may lie outside the popup.
    pub(crate) fn motion(&mut self, pos: Vec2, button_held: bool) {
        if let Some(drag) = self.thumb_drag {
            let (_, page, max) = self.scroll_state();
            if let Some(thumb) = self.thumb_rect() {
                let travel = page - thumb.height();
                if travel > 0.0 {
                    self.set_scroll(drag.start_value + (pos.y - drag.start_y) * max / travel);
                }
            }
            return;
        }
        if button_held {
            return;
        }
        if let Some(index) = self.item_at(pos).filter(|i| self.items[*i].is_selectable()) {
            self.active = Some(index);
        }
    }

    pub(crate) fn release(&mut self) {
        self.thumb_drag = None;
    }

    pub(crate) fn scroll_by(&mut self, delta: f32) {
        let (v, _, _) = self.scroll_state();
        self.set_scroll(v + delta);
    }

    #[inline]
    pub fn is_dragging_thumb(&self) -> bool {
        self.thumb_drag.is_some()
    }
}

impl<V: Clone> Widget for Droplist<V> {
    fn measure(&self, _ctx: &LayoutCtx) -> Vec2 {
        self.size
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.paint_popup(painter, rect.origin);
    }

    /// Direct routing for a droplist embedded without a [`PopupManager`].
    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        let local = event.translated(rect.origin);
        let response = match local {
            UiEvent::Press { pos, button: MouseButton::Left, .. } => self.press(pos),
            UiEvent::Release { button: MouseButton::Left, .. } => {
                self.release();
                Response::Handled
            }
            UiEvent::Motion { pos, .. } => {
                self.motion(pos, false);
                Response::Handled
            }
            UiEvent::Scroll { pos, delta, .. } if self.contains_local(pos) => {
                self.scroll_by(delta);
                Response::Handled
            }
            UiEvent::KeyPress { key, .. } => self.key_press(key),
            UiEvent::KeyRelease { .. } => {
                self.key_release();
                Response::Handled
            }
            _ => Response::Ignored,
        };
        match response {
            Response::Ignored => EventResult::Ignored,
            Response::Handled => EventResult::Consumed,
            Response::Activate => {
                self.activate();
                EventResult::Consumed
            }
            Response::Close => {
                self.events.emit(&DroplistEvent::Closed);
                EventResult::Consumed
            }
        }
    }
}

#[cfg(test)]
mod tests;
