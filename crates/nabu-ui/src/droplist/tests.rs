use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::input::{Key, Modifiers, MouseButton};
use nabu_engine::scene::{DrawCmd, DrawList, Layer};
use nabu_engine::text::FixedMetrics;
use nabu_engine::theme::Theme;

use super::*;
use crate::signal::collect_into;

struct Env {
    theme: Theme,
    text: FixedMetrics,
}

impl Env {
    fn new() -> Self {
        Self { theme: Theme::builtin(), text: FixedMetrics::default() }
    }

    fn ctx(&self) -> LayoutCtx<'_> {
        LayoutCtx::new(&self.text, &self.theme)
    }

    fn list_with(&self, labels: &[&str], config: DroplistConfig) -> Droplist<usize> {
        let items = labels
            .iter()
            .enumerate()
            .map(|(n, l)| if *l == "-" { DroplistItem::Separator } else { DroplistItem::new(*l, n) })
            .collect();
        Droplist::new(&self.ctx(), items, config)
    }

    fn list(&self, labels: &[&str]) -> Droplist<usize> {
        self.list_with(labels, DroplistConfig::default())
    }

    /// Twenty 18 px items in a 90 px viewport.
    fn long_list(&self) -> Droplist<usize> {
        let labels: Vec<String> = (0..20).map(|i| format!("i{i:02}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        self.list_with(&refs, DroplistConfig::default().max_height(92.0))
    }
}

fn scroll_value<V: Clone>(list: &Droplist<V>) -> f32 {
    list.scroll().borrow().vadjust.value()
}

// ── layout ────────────────────────────────────────────────────────────────

#[test]
fn size_follows_widest_label_and_item_heights() {
    let env = Env::new();
    let list = env.list(&["Alpha", "-", "Be"]);
    // "Alpha": 23 + 6 + 32, plus the frame on both sides.
    assert_eq!(list.size(), Vec2::new(63.0, 18.0 + 7.0 + 18.0 + 2.0));
    assert_eq!(list.item_rect(1), Some(Rect::new(1.0, 19.0, 61.0, 7.0)));
}

#[test]
fn max_width_clamps_the_popup() {
    let env = Env::new();
    let list = env.list_with(&["A rather long label"], DroplistConfig::default().max_width(40.0));
    assert_eq!(list.size().x, 42.0);
}

#[test]
fn max_height_makes_items_scroll() {
    let env = Env::new();
    let list = env.long_list();
    assert_eq!(list.size().y, 92.0);
    assert!(list.thumb_rect().is_some());
    assert!(env.list(&["A"]).thumb_rect().is_none());
}

#[test]
fn item_at_maps_points_to_items() {
    let env = Env::new();
    let list = env.list(&["A", "-", "B"]);
    assert_eq!(list.item_at(Vec2::new(5.0, 5.0)), Some(0));
    assert_eq!(list.item_at(Vec2::new(5.0, 22.0)), Some(1));
    assert_eq!(list.item_at(Vec2::new(5.0, 30.0)), Some(2));
    assert_eq!(list.item_at(Vec2::new(5.0, 200.0)), None);
}

// ── navigation ────────────────────────────────────────────────────────────

#[test]
fn first_selectable_item_is_active_on_creation() {
    let env = Env::new();
    assert_eq!(env.list(&["-", "A"]).active(), Some(1));
    assert_eq!(env.list(&["-"]).active(), None);
}

#[test]
fn arrows_skip_separators_and_stop_at_the_ends() {
    let env = Env::new();
    let mut list = env.list(&["A", "-", "B", "-", "-", "C"]);
    list.select_next();
    assert_eq!(list.active(), Some(2));
    list.select_next();
    assert_eq!(list.active(), Some(5));
    list.select_next();
    assert_eq!(list.active(), Some(5));
    list.select_prev();
    assert_eq!(list.active(), Some(2));
    list.key_press(Key::Home);
    assert_eq!(list.active(), Some(0));
    list.select_prev();
    assert_eq!(list.active(), Some(0));
    list.key_press(Key::End);
    assert_eq!(list.active(), Some(5));
}

#[test]
fn set_active_ignores_separators() {
    let env = Env::new();
    let mut list = env.list(&["A", "-"]);
    list.set_active(1);
    assert_eq!(list.active(), Some(0));
}

#[test]
fn moving_down_scrolls_the_item_into_view() {
    let env = Env::new();
    let mut list = env.long_list();
    for _ in 0..5 {
        list.select_next();
    }
    assert_eq!(list.active(), Some(5));
    assert_eq!(scroll_value(&list), 18.0);
}

#[test]
fn end_and_home_scroll_to_the_bounds() {
    let env = Env::new();
    let mut list = env.long_list();
    list.select_last();
    assert_eq!(list.active(), Some(19));
    assert_eq!(scroll_value(&list), 270.0);
    list.select_first();
    assert_eq!(scroll_value(&list), 0.0);
}

#[test]
fn page_keys_move_a_viewport_and_pick_an_item_inside_it() {
    let env = Env::new();
    let mut list = env.long_list();

    list.page_down();
    assert_eq!(scroll_value(&list), 90.0);
    assert_eq!(list.active(), Some(9));

    list.page_down();
    assert_eq!(scroll_value(&list), 180.0);
    assert_eq!(list.active(), Some(14));

    list.page_up();
    assert_eq!(scroll_value(&list), 90.0);
    assert_eq!(list.active(), Some(5));
}

#[test]
fn return_without_active_item_does_nothing() {
    let env = Env::new();
    let mut list = env.list(&["-"]);
    let events = collect_into(&list.events);
    assert_eq!(list.key_press(Key::Enter), Response::Handled);
    assert!(!list.activate());
    assert!(events.borrow().is_empty());
}

// ── widget routing ────────────────────────────────────────────────────────

#[test]
fn embedded_click_emits_item_selected() {
    let env = Env::new();
    let mut list = env.list(&["Alpha", "Beta"]);
    let events = collect_into(&list.events);
    let rect = Rect { origin: Vec2::new(50.0, 50.0), size: list.size() };

    let pos = Vec2::new(60.0, 50.0 + 1.0 + 18.0 + 9.0);
    let ev = UiEvent::Press { pos, root: pos, button: MouseButton::Left, modifiers: Modifiers::NONE, clicks: 1 };
    assert_eq!(list.on_event(&ev, rect, &env.ctx()), EventResult::Consumed);
    assert_eq!(
        *events.borrow(),
        [DroplistEvent::ItemSelected { label: "Beta".into(), value: 1, index: 1 }]
    );
}

#[test]
fn embedded_escape_emits_closed() {
    let env = Env::new();
    let mut list = env.list(&["Alpha"]);
    let events = collect_into(&list.events);
    let rect = Rect { origin: Vec2::zero(), size: list.size() };
    let ev = UiEvent::KeyPress { key: Key::Escape, modifiers: Modifiers::NONE };
    list.on_event(&ev, rect, &env.ctx());
    assert_eq!(*events.borrow(), [DroplistEvent::Closed]);
}

#[test]
fn hover_highlights_only_selectable_items() {
    let env = Env::new();
    let mut list = env.list(&["A", "-", "B"]);
    list.motion(Vec2::new(5.0, 30.0), false);
    assert_eq!(list.active(), Some(2));
    list.motion(Vec2::new(5.0, 22.0), false);
    assert_eq!(list.active(), Some(2));
    list.motion(Vec2::new(5.0, 5.0), true);
    assert_eq!(list.active(), Some(2));
}

// ── paint ─────────────────────────────────────────────────────────────────

#[test]
fn paint_draws_labels_and_shadow_below() {
    let env = Env::new();
    let list = env.list(&["Alpha", "-", "Beta"]);
    let mut draw = DrawList::new();
    let mut p = Painter::new(&mut draw, &env.text, &env.theme);
    list.paint(&mut p, Rect { origin: Vec2::new(10.0, 10.0), size: list.size() });

    assert_eq!(draw.texts(), ["Alpha", "Beta"]);
    let shadow = draw.items().iter().find(|i| matches!(i.cmd, DrawCmd::Image(_)));
    assert_eq!(shadow.map(|i| i.key.layer), Some(Layer(-1)));
}

#[test]
fn no_shadow_when_disabled() {
    let env = Env::new();
    let list = env.list_with(&["Alpha"], DroplistConfig::default().shadow(false));
    let mut draw = DrawList::new();
    let mut p = Painter::new(&mut draw, &env.text, &env.theme);
    list.paint(&mut p, Rect { origin: Vec2::zero(), size: list.size() });
    assert!(!draw.items().iter().any(|i| matches!(i.cmd, DrawCmd::Image(_))));
}
