use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::scene::Layer;
use slotmap::{new_key_type, SlotMap};

use crate::event::UiEvent;
use crate::painter::Painter;

use super::position::{place_popup, place_submenu};
use super::{Droplist, DroplistEvent, Response};

new_key_type! {
    /// Handle of an open popup. Stale handles are harmless: lookups miss.
    pub struct PopupId;
}

// ── InputGrab ─────────────────────────────────────────────────────────────

/// Exclusive pointer and keyboard capture provided by the platform.
pub trait InputGrab {
    /// Returns false when the platform refused the grab.
    fn acquire(&mut self) -> bool;
    fn release(&mut self);
    fn is_held(&self) -> bool;
}

/// Grab that only remembers whether it is held. Used headless.
#[derive(Debug, Default)]
pub struct NullGrab {
    held: bool,
}

impl NullGrab {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputGrab for NullGrab {
    fn acquire(&mut self) -> bool {
        self.held = true;
        true
    }

    fn release(&mut self) {
        self.held = false;
    }

    fn is_held(&self) -> bool {
        self.held
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────

/// Outcome of [`PopupManager::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// No popup is open; deliver the event normally.
    Ignored,
    /// A popup consumed the event.
    Handled,
    /// The popup chain closed and the event is spent.
    Closed,
    /// The popup chain closed on an outside press; deliver the event to the
    /// window under the pointer.
    Forward,
}

// ── PopupManager ──────────────────────────────────────────────────────────

/// Owns every open popup, the chain linking them and the single input grab.
///
/// At most one chain is open. Its first entry is the root list and each
/// further entry is the sub-list of the one before it. Closing any popup
/// closes the whole chain.
pub struct PopupManager<V> {
    popups: SlotMap<PopupId, Droplist<V>>,
    chain: Vec<PopupId>,
    grab: Box<dyn InputGrab>,
    /// Screen rectangles of the surfaces that capture input while the grab
    /// is held, such as the hidden grab window.
    capture_surfaces: Vec<Rect>,
    screen: Vec2,
    button_held: bool,
}

impl<V: Clone> PopupManager<V> {
    pub fn new(grab: Box<dyn InputGrab>, screen: Vec2) -> Self {
        Self {
            popups: SlotMap::with_key(),
            chain: Vec::new(),
            grab,
            capture_surfaces: Vec::new(),
            screen,
            button_held: false,
        }
    }

    pub fn set_screen_size(&mut self, screen: Vec2) {
        self.screen = screen;
    }

    /// Registers a capture surface. A press that lands on one, outside every
    /// popup, closes the chain and is swallowed. Presses on any other window,
    /// the application's own widgets included, are forwarded.
    pub fn add_capture_surface(&mut self, rect: Rect) {
        self.capture_surfaces.push(rect);
    }

    pub fn clear_capture_surfaces(&mut self) {
        self.capture_surfaces.clear();
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn is_open(&self) -> bool {
        !self.chain.is_empty()
    }

    /// Number of open popups.
    #[inline]
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Open popups, root first.
    #[inline]
    pub fn chain(&self) -> &[PopupId] {
        &self.chain
    }

    pub fn get(&self, id: PopupId) -> Option<&Droplist<V>> {
        self.popups.get(id)
    }

    pub fn get_mut(&mut self, id: PopupId) -> Option<&mut Droplist<V>> {
        self.popups.get_mut(id)
    }

    /// Deepest open sub-list; receives keyboard input.
    pub fn innermost(&self) -> Option<PopupId> {
        self.chain.last().copied()
    }

    #[inline]
    pub fn is_grabbed(&self) -> bool {
        self.grab.is_held()
    }

    /// Topmost open popup containing the screen point `root`.
    pub fn popup_at(&self, root: Vec2) -> Option<PopupId> {
        self.chain
            .iter()
            .rev()
            .copied()
            .find(|id| self.popups.get(*id).is_some_and(|p| p.rect().contains_inclusive(root)))
    }

    // ── open / close ──────────────────────────────────────────────────────

    /// Opens `list` as a new root popup at `anchor`, closing any open chain
    /// first. `offset` shifts a popup that had to be pulled back on screen.
    pub fn open(&mut self, mut list: Droplist<V>, anchor: Vec2, offset: Vec2) -> PopupId {
        if self.is_open() {
            self.close_all();
        }
        let origin = place_popup(anchor, list.size(), list.config().align, self.screen, offset);
        list.set_origin(origin);
        list.set_parent(None);
        let id = self.popups.insert(list);
        self.chain.push(id);
        if !self.grab.is_held() && !self.grab.acquire() {
            log::warn!("popup: input grab refused");
        }
        log::debug!("popup: opened {id:?} at ({}, {})", origin.x, origin.y);
        id
    }

    /// Opens `list` as the sub-list of item `item` in `parent`.
    ///
    /// A sub-list already open under `parent` is replaced along with its
    /// descendants. Returns `None`, leaving the chain untouched, when
    /// `parent` is not open or has no item `item`.
    pub fn open_submenu(&mut self, parent: PopupId, item: usize, mut list: Droplist<V>) -> Option<PopupId> {
        let depth = self.chain.iter().position(|id| *id == parent)?;
        let host = self.popups.get(parent)?;
        let item_top = host.item_screen_top(item)?;
        let origin = place_submenu(host.origin().x, host.size().x, item_top, list.size(), self.screen);

        self.close_descendants(depth);
        list.set_origin(origin);
        list.set_parent(Some(parent));

        let id = self.popups.insert(list);
        if let Some(host) = self.popups.get_mut(parent) {
            host.set_child(Some(id), Some(item));
        }
        self.chain.push(id);
        log::debug!("popup: opened sub-list {id:?} under {parent:?} item {item}");
        Some(id)
    }

    /// Closes every popup below chain position `depth` and unlinks it from
    /// its host.
    fn close_descendants(&mut self, depth: usize) {
        if depth + 1 >= self.chain.len() {
            return;
        }
        for stale in self.chain.split_off(depth + 1) {
            if let Some(old) = self.popups.remove(stale) {
                old.events.emit(&DroplistEvent::Closed);
            }
        }
        if let Some(host) = self.chain.get(depth).and_then(|id| self.popups.get_mut(*id)) {
            host.set_child(None, None);
        }
    }

    /// Closes the chain containing `id`. Returns false when `id` is not open.
    pub fn close(&mut self, id: PopupId) -> bool {
        if !self.chain.contains(&id) {
            return false;
        }
        self.close_all();
        true
    }

    /// Closes every open popup and releases the grab.
    pub fn close_all(&mut self) {
        for id in self.chain.drain(..).rev() {
            if let Some(list) = self.popups.remove(id) {
                list.events.emit(&DroplistEvent::Closed);
            }
        }
        self.popups.clear();
        self.button_held = false;
        if self.grab.is_held() {
            self.grab.release();
        }
        log::debug!("popup: chain closed, grab released");
    }

    fn activate(&mut self, id: PopupId) -> Dispatch {
        if let Some(list) = self.popups.get(id) {
            list.activate();
        }
        self.close_all();
        Dispatch::Closed
    }

    // ── routing ───────────────────────────────────────────────────────────

    /// Routes one captured event.
    ///
    /// Pointer positions are read in screen coordinates: `root` for press,
    /// release and motion, and `pos` for scroll, since the capture surface
    /// covers the screen from its origin.
    pub fn dispatch(&mut self, event: &UiEvent) -> Dispatch {
        if self.chain.is_empty() {
            return Dispatch::Ignored;
        }
        match event {
            UiEvent::Press { root, .. } => {
                self.button_held = true;
                match self.popup_at(*root) {
                    Some(id) => {
                        let response = match self.popups.get_mut(id) {
                            Some(list) => {
                                let local = *root - list.origin();
                                list.press(local)
                            }
                            None => Response::Ignored,
                        };
                        match response {
                            Response::Activate => self.activate(id),
                            _ => Dispatch::Handled,
                        }
                    }
                    None if self.capture_surfaces.iter().any(|r| r.contains(*root)) => {
                        self.close_all();
                        Dispatch::Closed
                    }
                    None => {
                        self.close_all();
                        Dispatch::Forward
                    }
                }
            }
            UiEvent::Release { .. } => {
                self.button_held = false;
                for id in &self.chain {
                    if let Some(list) = self.popups.get_mut(*id) {
                        list.release();
                    }
                }
                Dispatch::Handled
            }
            UiEvent::Motion { root, .. } => {
                let over = self.popup_at(*root);
                for id in &self.chain {
                    let Some(list) = self.popups.get_mut(*id) else { continue };
                    // Outside every popup the motion goes to all of them so a
                    // thumb drag keeps tracking.
                    if over.is_none() || over == Some(*id) || list.is_dragging_thumb() {
                        let local = *root - list.origin();
                        list.motion(local, self.button_held);
                    }
                }
                Dispatch::Handled
            }
            UiEvent::Scroll { pos, delta, .. } => {
                if let Some(list) = self.popup_at(*pos).or(self.innermost()).and_then(|id| self.popups.get_mut(id)) {
                    list.scroll_by(*delta);
                }
                Dispatch::Handled
            }
            UiEvent::KeyPress { key, .. } => {
                let Some(id) = self.innermost() else {
                    return Dispatch::Ignored;
                };
                let response = match self.popups.get_mut(id) {
                    Some(list) => list.key_press(*key),
                    None => Response::Ignored,
                };
                match response {
                    Response::Activate => self.activate(id),
                    Response::Close => {
                        self.close_all();
                        Dispatch::Closed
                    }
                    _ => Dispatch::Handled,
                }
            }
            UiEvent::KeyRelease { .. } => {
                if let Some(list) = self.innermost().and_then(|id| self.popups.get(id)) {
                    list.key_release();
                }
                Dispatch::Handled
            }
            UiEvent::Leave | UiEvent::FocusOut => Dispatch::Handled,
        }
    }

    // ── painting ──────────────────────────────────────────────────────────

    /// Paints the open chain, each sub-list on a layer above its parent.
    pub fn paint(&self, p: &mut Painter) {
        for (depth, id) in self.chain.iter().enumerate() {
            if let Some(list) = self.popups.get(*id) {
                p.with_layer(Layer::popup(depth), |p| list.paint_popup(p, list.origin()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use nabu_engine::input::{Key, Modifiers, MouseButton};
    use nabu_engine::scene::DrawList;
    use nabu_engine::text::FixedMetrics;
    use nabu_engine::theme::Theme;

    use super::*;
    use crate::constraints::LayoutCtx;
    use crate::droplist::{DroplistConfig, DroplistItem};
    use crate::signal::collect_into;

    /// Grab that counts acquisitions through a shared cell.
    struct CountingGrab {
        held: bool,
        acquired: Rc<Cell<u32>>,
    }

    impl InputGrab for CountingGrab {
        fn acquire(&mut self) -> bool {
            self.held = true;
            self.acquired.set(self.acquired.get() + 1);
            true
        }
        fn release(&mut self) {
            self.held = false;
        }
        fn is_held(&self) -> bool {
            self.held
        }
    }

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

        fn list(&self, labels: &[&str]) -> Droplist<String> {
            let items = labels
                .iter()
                .map(|l| if *l == "-" { DroplistItem::Separator } else { DroplistItem::new(*l, l.to_lowercase()) })
                .collect();
            Droplist::new(&self.ctx(), items, DroplistConfig::default().shadow(false))
        }
    }

    fn manager() -> PopupManager<String> {
        PopupManager::new(Box::new(NullGrab::new()), Vec2::new(800.0, 600.0))
    }

    fn press(at: Vec2) -> UiEvent {
        UiEvent::Press { pos: at, root: at, button: MouseButton::Left, modifiers: Modifiers::NONE, clicks: 1 }
    }

    fn motion(at: Vec2) -> UiEvent {
        UiEvent::Motion { pos: at, root: at, modifiers: Modifiers::NONE }
    }

    fn key(key: Key) -> UiEvent {
        UiEvent::KeyPress { key, modifiers: Modifiers::NONE }
    }

    /// Screen centre of item `index` in popup `id`.
    fn item_center(m: &PopupManager<String>, id: PopupId, index: usize) -> Vec2 {
        let list = m.get(id).expect("open");
        let r = list.item_rect(index).expect("item");
        list.origin() + Vec2::new(r.x() + r.width() / 2.0, r.y() + r.height() / 2.0)
    }

    fn three_deep(env: &Env, m: &mut PopupManager<String>) -> [PopupId; 3] {
        let root = m.open(env.list(&["File", "Edit", "View"]), Vec2::new(100.0, 100.0), Vec2::zero());
        let sub = m.open_submenu(root, 1, env.list(&["Copy", "Paste"])).expect("sub");
        let leaf = m.open_submenu(sub, 0, env.list(&["Plain", "Rich"])).expect("leaf");
        [root, sub, leaf]
    }

    // ── open / close ──────────────────────────────────────────────────────

    #[test]
    fn open_places_and_grabs() {
        let env = Env::new();
        let mut m = manager();
        let id = m.open(env.list(&["One"]), Vec2::new(790.0, 10.0), Vec2::zero());
        let list = m.get(id).expect("open");
        assert_eq!(list.origin().x, 800.0 - list.size().x);
        assert_eq!(list.origin().y, 10.0);
        assert!(m.is_grabbed());
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn closing_any_popup_of_a_chain_closes_all() {
        let env = Env::new();
        let mut m = manager();
        let [_, sub, leaf] = three_deep(&env, &mut m);
        assert_eq!(m.len(), 3);
        assert_eq!(m.get(leaf).and_then(|l| l.parent()), Some(sub));

        assert!(m.close(sub));
        assert!(m.is_empty());
        assert!(!m.is_grabbed());
        assert!(m.get(leaf).is_none());
        assert!(!m.close(leaf));
    }

    #[test]
    fn opening_a_root_list_closes_the_previous_chain() {
        let env = Env::new();
        let acquired = Rc::new(Cell::new(0));
        let grab = CountingGrab { held: false, acquired: Rc::clone(&acquired) };
        let mut m = PopupManager::new(Box::new(grab), Vec2::new(800.0, 600.0));

        let first = env.list(&["A"]);
        let closed = collect_into(&first.events);
        m.open(first, Vec2::new(10.0, 10.0), Vec2::zero());
        m.open(env.list(&["B"]), Vec2::new(10.0, 10.0), Vec2::zero());

        assert_eq!(*closed.borrow(), [DroplistEvent::Closed]);
        assert_eq!(m.len(), 1);
        assert_eq!(acquired.get(), 2);
        assert!(m.is_grabbed());
    }

    #[test]
    fn submenu_replaces_previous_sibling() {
        let env = Env::new();
        let mut m = manager();
        let [root, sub, _] = three_deep(&env, &mut m);
        let other = m.open_submenu(root, 2, env.list(&["Zoom"])).expect("sub");
        assert_eq!(m.chain(), [root, other]);
        assert!(m.get(sub).is_none());
        assert_eq!(m.get(root).and_then(|r| r.submenu_item()), Some(2));
        assert_eq!(m.get(root).and_then(|r| r.child()), Some(other));
    }

    #[test]
    fn submenu_on_missing_item_keeps_the_chain() {
        let env = Env::new();
        let mut m = manager();
        let [root, sub, leaf] = three_deep(&env, &mut m);
        assert!(m.open_submenu(root, 99, env.list(&["Zoom"])).is_none());
        assert_eq!(m.chain(), [root, sub, leaf]);
        assert_eq!(m.get(root).and_then(|r| r.child()), Some(sub));
        assert_eq!(m.get(root).and_then(|r| r.submenu_item()), Some(1));
    }

    #[test]
    fn replacing_a_submenu_unlinks_the_dropped_descendants() {
        let env = Env::new();
        let mut m = manager();
        let [root, sub, leaf] = three_deep(&env, &mut m);
        let closed = collect_into(&m.get(leaf).expect("leaf").events);
        let other = m.open_submenu(sub, 1, env.list(&["Markdown"])).expect("replacement");

        assert_eq!(m.chain(), [root, sub, other]);
        assert_eq!(*closed.borrow(), [DroplistEvent::Closed]);
        assert_eq!(m.get(sub).and_then(|s| s.child()), Some(other));
        assert_eq!(m.get(sub).and_then(|s| s.submenu_item()), Some(1));
        assert!(m.chain().iter().all(|id| m.get(*id).is_some()));
    }

    #[test]
    fn submenu_sits_right_of_its_parent_item() {
        let env = Env::new();
        let mut m = manager();
        let root = m.open(env.list(&["File", "Edit"]), Vec2::new(100.0, 100.0), Vec2::zero());
        let sub = m.open_submenu(root, 1, env.list(&["Copy"])).expect("sub");
        let parent = m.get(root).expect("root");
        let child = m.get(sub).expect("sub");
        assert_eq!(child.origin().x, parent.rect().right());
        assert_eq!(Some(child.origin().y), parent.item_screen_top(1));
    }

    // ── routing ───────────────────────────────────────────────────────────

    #[test]
    fn nothing_open_ignores_events() {
        let mut m = manager();
        assert_eq!(m.dispatch(&press(Vec2::new(5.0, 5.0))), Dispatch::Ignored);
    }

    #[test]
    fn outside_press_closes_and_forwards() {
        let env = Env::new();
        let mut m = manager();
        three_deep(&env, &mut m);
        assert_eq!(m.dispatch(&press(Vec2::new(700.0, 550.0))), Dispatch::Forward);
        assert!(m.is_empty());
        assert!(!m.is_grabbed());
    }

    #[test]
    fn press_on_capture_surface_closes_without_forwarding() {
        let env = Env::new();
        let mut m = manager();
        m.add_capture_surface(Rect::new(600.0, 400.0, 200.0, 200.0));
        m.open(env.list(&["A"]), Vec2::new(10.0, 10.0), Vec2::zero());
        assert_eq!(m.dispatch(&press(Vec2::new(700.0, 550.0))), Dispatch::Closed);
        assert!(m.is_empty());
    }

    #[test]
    fn press_on_item_selects_and_closes_chain() {
        let env = Env::new();
        let mut m = manager();
        let [_, _, leaf] = three_deep(&env, &mut m);
        let events = collect_into(&m.get(leaf).expect("leaf").events);

        let at = item_center(&m, leaf, 1);
        assert_eq!(m.dispatch(&press(at)), Dispatch::Closed);
        assert_eq!(
            events.borrow()[0],
            DroplistEvent::ItemSelected { label: "Rich".into(), value: "rich".into(), index: 1 }
        );
        assert_eq!(events.borrow().last(), Some(&DroplistEvent::Closed));
        assert!(m.is_empty());
    }

    #[test]
    fn press_on_separator_keeps_chain_open() {
        let env = Env::new();
        let mut m = manager();
        let id = m.open(env.list(&["A", "-", "B"]), Vec2::new(10.0, 10.0), Vec2::zero());
        let at = item_center(&m, id, 1);
        assert_eq!(m.dispatch(&press(at)), Dispatch::Handled);
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn hover_follows_pointer_over_the_popup_under_it() {
        let env = Env::new();
        let mut m = manager();
        let [root, sub, _] = three_deep(&env, &mut m);
        let at = item_center(&m, root, 2);
        m.dispatch(&motion(at));
        assert_eq!(m.get(root).and_then(|l| l.active()), Some(2));
        assert_eq!(m.get(sub).and_then(|l| l.active()), Some(0));
    }

    #[test]
    fn keys_go_to_the_innermost_list() {
        let env = Env::new();
        let mut m = manager();
        let [root, _, leaf] = three_deep(&env, &mut m);
        let events = collect_into(&m.get(leaf).expect("leaf").events);

        m.dispatch(&key(Key::ArrowDown));
        assert_eq!(m.get(leaf).and_then(|l| l.active()), Some(1));
        assert_eq!(m.get(root).and_then(|l| l.active()), Some(0));

        m.dispatch(&UiEvent::KeyRelease { key: Key::ArrowDown, modifiers: Modifiers::NONE });
        assert_eq!(
            events.borrow()[0],
            DroplistEvent::KeyReleased { label: "Rich".into(), value: "rich".into(), index: 1 }
        );

        assert_eq!(m.dispatch(&key(Key::Enter)), Dispatch::Closed);
        assert!(matches!(events.borrow()[1], DroplistEvent::ItemSelected { index: 1, .. }));
        assert!(m.is_empty());
    }

    #[test]
    fn escape_closes_without_selecting() {
        let env = Env::new();
        let mut m = manager();
        let id = m.open(env.list(&["A", "B"]), Vec2::new(10.0, 10.0), Vec2::zero());
        let events = collect_into(&m.get(id).expect("open").events);
        assert_eq!(m.dispatch(&key(Key::Escape)), Dispatch::Closed);
        assert_eq!(*events.borrow(), [DroplistEvent::Closed]);
    }

    #[test]
    fn thumb_drag_keeps_tracking_outside_the_popup() {
        let env = Env::new();
        let mut m = manager();
        let labels: Vec<String> = (0..20).map(|i| format!("item {i}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let items = refs.iter().map(|l| DroplistItem::new(*l, l.to_string())).collect();
        let config = DroplistConfig::default().max_height(100.0).shadow(false);
        let id = m.open(Droplist::new(&env.ctx(), items, config), Vec2::new(10.0, 10.0), Vec2::zero());

        let (thumb, origin) = {
            let list = m.get(id).expect("open");
            (list.thumb_rect().expect("scrollable"), list.origin())
        };
        let grip = origin + Vec2::new(thumb.x() + 1.0, thumb.y() + 1.0);
        assert_eq!(m.dispatch(&press(grip)), Dispatch::Handled);

        // Far below the popup: the drag saturates at the bottom.
        m.dispatch(&motion(Vec2::new(grip.x + 300.0, grip.y + 400.0)));
        let scroll = m.get(id).expect("open").scroll().borrow().vadjust.clone();
        assert_eq!(scroll.value(), scroll.max_value());

        m.dispatch(&UiEvent::Release { pos: grip, root: grip, button: MouseButton::Left, modifiers: Modifiers::NONE });
        assert!(!m.get(id).expect("open").is_dragging_thumb());
    }

    #[test]
    fn wheel_scrolls_the_popup_under_the_pointer() {
        let env = Env::new();
        let mut m = manager();
        let labels: Vec<String> = (0..20).map(|i| format!("item {i}")).collect();
        let items = labels.iter().map(|l| DroplistItem::new(l.clone(), l.clone())).collect();
        let config = DroplistConfig::default().max_height(100.0).shadow(false);
        let id = m.open(Droplist::new(&env.ctx(), items, config), Vec2::new(10.0, 10.0), Vec2::zero());
        let at = item_center(&m, id, 0);
        m.dispatch(&UiEvent::Scroll { pos: at, delta: 20.0, modifiers: Modifiers::NONE });
        assert_eq!(m.get(id).expect("open").scroll().borrow().vadjust.value(), 20.0);
    }

    // ── paint ─────────────────────────────────────────────────────────────

    #[test]
    fn chain_paints_deeper_lists_on_higher_layers() {
        let env = Env::new();
        let mut m = manager();
        three_deep(&env, &mut m);
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &env.text, &env.theme);
        m.paint(&mut p);

        let layer_of = |label: &str| {
            list.items()
                .iter()
                .find(|i| matches!(&i.cmd, nabu_engine::scene::DrawCmd::Text(t) if t.text == label))
                .map(|i| i.key.layer)
        };
        assert_eq!(layer_of("File"), Some(Layer::popup(0)));
        assert_eq!(layer_of("Copy"), Some(Layer::popup(1)));
        assert_eq!(layer_of("Rich"), Some(Layer::popup(2)));
    }
}
