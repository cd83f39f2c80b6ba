use std::collections::BTreeSet;
use std::rc::Rc;

use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::input::{Key, Modifiers, MouseButton};
use nabu_engine::pixbuf::render_drag_badge;

use crate::constraints::LayoutCtx;
use crate::event::{EventResult, UiEvent};
use crate::widget::CursorShape;

use super::columns::HeaderHit;
use super::drag::{reorder, DragSession};
use super::item::ListItem;
use super::keymap::{action_for, ListAction};
use super::{DragState, ItemHit, ListView, ListViewEvent};

impl<T: ListItem> ListView<T> {
    pub(super) fn handle_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        self.viewport_width = rect.width();
        match event {
            UiEvent::Press { pos, root, button, modifiers, clicks } => {
                let local = *pos - rect.origin;
                if !self.press_hits(local, rect) {
                    return EventResult::Ignored;
                }
                self.on_press(local, *root, *button, *modifiers, *clicks, rect);
                EventResult::Consumed
            }
            UiEvent::Release { pos, button, .. } => {
                if *button != MouseButton::Left || !self.left_pressed {
                    return EventResult::Ignored;
                }
                self.on_release(*pos - rect.origin, rect);
                EventResult::Consumed
            }
            UiEvent::Motion { pos, modifiers, .. } => {
                self.on_motion(*pos - rect.origin, *modifiers, rect, ctx);
                EventResult::Consumed
            }
            UiEvent::Scroll { pos, delta, .. } => {
                if !rect.contains(*pos) {
                    return EventResult::Ignored;
                }
                let (_, offset, _) = self.scroll_state();
                self.set_vscroll(offset + delta);
                self.dirty = true;
                EventResult::Consumed
            }
            UiEvent::KeyPress { key, modifiers } => self.on_key(*key, *modifiers),
            UiEvent::KeyRelease { .. } => EventResult::Ignored,
            UiEvent::Leave => {
                self.header.hover = None;
                self.header.resizing = None;
                if !self.left_pressed {
                    self.cursor = CursorShape::Default;
                }
                self.hover_row = None;
                self.dirty = true;
                EventResult::Consumed
            }
            UiEvent::FocusOut => {
                self.cancel_drag();
                EventResult::Ignored
            }
        }
    }

    fn press_hits(&self, local: Vec2, rect: Rect) -> bool {
        local.x >= 0.0 && local.y >= 0.0 && local.x < rect.width() && local.y < rect.height()
    }

    /// Viewport-local to content coordinates.
    fn content_pos(&self, local: Vec2) -> Vec2 {
        let (h, v, _) = self.scroll_state();
        Vec2::new(local.x + h, local.y + v)
    }

    fn in_header(&self, local: Vec2) -> bool {
        !self.titles.is_empty() && local.y >= 0.0 && local.y <= self.title_height
    }

    fn header_hit(&self, content_x: f32, rect: Rect) -> Option<HeaderHit> {
        self.columns.header_hit(content_x, rect.width())
    }

    /// Reorder drags still count as inside within `drag_out_offset` of the
    /// viewport.
    fn in_visible_area(&self, local: Vec2, rect: Rect) -> bool {
        let slack = self.config.drag_out_offset;
        let (_, _, page) = self.scroll_state();
        (-slack..=rect.width() + slack).contains(&local.x) && (-slack..=page + slack).contains(&local.y)
    }

    fn hit_at(&self, content: Vec2) -> Option<ItemHit> {
        let geom = self.geometry();
        let index = geom.row_at(content.y)?;
        let row = self.rows.get(index)?;
        let offset_y = content.y - geom.row_top(index);
        let (column, offset_x) = match self.columns.column_at(content.x) {
            Some((c, x)) => (Some(c), x),
            None => (None, content.x),
        };
        Some(ItemHit { row: row.id, index, column, offset: Vec2::new(offset_x, offset_y) })
    }

    fn emit_hit(&self, content: Vec2, make: fn(ItemHit) -> ListViewEvent<T>) {
        if let Some(hit) = self.hit_at(content) {
            self.events.emit(&make(hit));
        }
    }

    // ── press ─────────────────────────────────────────────────────────────

    fn on_press(&mut self, local: Vec2, root: Vec2, button: MouseButton, mods: Modifiers, clicks: u8, rect: Rect) {
        let content = self.content_pos(local);
        match button {
            MouseButton::Left => {
                self.left_pressed = true;
                if self.in_header(local) {
                    match self.header_hit(content.x, rect) {
                        Some(HeaderHit::Title(c)) => self.header.pressed = Some(c),
                        Some(HeaderHit::Separator(c)) => self.header.resizing = Some(c),
                        None => {}
                    }
                } else if !self.rows.is_empty() {
                    self.click_item(content, mods, clicks);
                }
            }
            MouseButton::Right if !self.rows.is_empty() && !self.in_header(local) => {
                self.right_click_item(content, root);
            }
            _ => {}
        }
        self.dirty = true;
    }

    fn click_item(&mut self, content: Vec2, mods: Modifiers, clicks: u8) {
        let row = self.geometry().row_at(content.y);
        match row {
            None => self.selection.clear(),
            Some(r) if mods.shift => self.selection.extend_to(r),
            Some(r) if mods.ctrl => self.selection.toggle(r),
            Some(r) if self.config.drag_drop && self.selection.contains(r) => {
                let selected = self.selected_ids();
                let anchor = self.selection.anchor().and_then(|a| self.rows.get(a)).map(|x| x.id);
                let primary = self.rows[r].id;
                self.state = DragState::ReorderDragging(DragSession::new(&selected, primary, anchor));
                self.press_in_selection = Some(r);
            }
            Some(r) => {
                self.selection.select_only(r);
                self.emit_hit(content, ListViewEvent::Pressed);
                if self.config.multi_select {
                    self.state = DragState::RangeDragging { start: r };
                }
            }
        }

        if clicks >= 2 {
            self.double_click_row = row;
        } else {
            self.single_click_row = row;
        }
    }

    fn right_click_item(&mut self, content: Vec2, root: Vec2) {
        match self.geometry().row_at(content.y) {
            None => self.selection.clear(),
            Some(r) if !self.selection.contains(r) => self.selection.select_only(r),
            Some(_) => {}
        }
        let current = self.selection.anchor().and_then(|a| self.rows.get(a)).map(|r| r.id);
        let selected = self.selected_ids();
        self.events.emit(&ListViewEvent::RightPress { root, current, selected });
    }

    // ── motion ────────────────────────────────────────────────────────────

    fn on_motion(&mut self, local: Vec2, mods: Modifiers, rect: Rect, ctx: &LayoutCtx) {
        let content = self.content_pos(local);
        if let Some(column) = self.header.resizing {
            let start = self.columns.offset(column);
            let min = self.columns.min_width(column).unwrap_or(0.0);
            if self.columns.set_width(column, (content.x - start).max(min)) {
                self.update_adjustments();
            }
        } else if self.in_header(local) && !self.left_pressed {
            match self.header_hit(content.x, rect) {
                Some(HeaderHit::Title(c)) => {
                    self.header.hover = Some(c);
                    self.cursor = CursorShape::Default;
                }
                Some(HeaderHit::Separator(_)) => {
                    self.header.hover = None;
                    self.cursor = CursorShape::ColumnResize;
                }
                None => self.header.hover = None,
            }
        } else if !self.rows.is_empty() {
            self.hover_item(local, content, mods, rect, ctx);
        }

        // Any motion turns a press inside the selection into a drag.
        self.press_in_selection = None;
        self.dirty = true;
    }

    fn hover_item(&mut self, local: Vec2, content: Vec2, mods: Modifiers, rect: Rect, ctx: &LayoutCtx) {
        if !self.left_pressed {
            self.header.hover = None;
            self.cursor = CursorShape::Default;
            self.hover_row = self.geometry().row_at(content.y).and_then(|r| self.rows.get(r)).map(|r| r.id);
            self.emit_hit(content, ListViewEvent::Hovered);
            return;
        }

        let mut state = std::mem::take(&mut self.state);
        match &mut state {
            DragState::ReorderDragging(session) if self.config.drag_drop => {
                if session.badge.is_none() {
                    if let Some(icon) = ctx.theme.image("drag_icon") {
                        session.badge = Some(Rc::new(render_drag_badge(session.len(), &icon, ctx.text)));
                    }
                }
                if let Some(badge) = &session.badge {
                    self.cursor = CursorShape::Bitmap(Rc::clone(badge));
                }

                if self.in_visible_area(local, rect) {
                    self.auto_scroll(content.y);
                    session.reference_row = self.geometry().drop_slot(content.y);
                } else {
                    if !session.dragged_out {
                        session.dragged_out = true;
                        log::debug!("listview: {} rows dragged out", session.len());
                        self.events.emit(&ListViewEvent::DragOut { rows: session.rows() });
                    }
                    session.reference_row = None;
                }
            }
            DragState::RangeDragging { start } if self.config.multi_select && !mods.ctrl && !mods.shift => {
                if let Some(row) = self.geometry().row_at(content.y) {
                    self.selection.select_range(*start, row);
                    self.auto_scroll(content.y);
                }
            }
            _ => {}
        }
        self.state = state;
    }

    /// Scrolls one row when `y` comes within two rows of a viewport edge.
    fn auto_scroll(&mut self, y: f32) {
        let h = self.row_height;
        let (lower, upper, value, page) = {
            let area = self.scroll.borrow();
            let v = &area.vadjust;
            (v.lower(), v.upper(), v.value(), v.page_size())
        };
        if y > value + page - 2.0 * h {
            self.set_vscroll((value + h).min(upper - page));
        } else if y < value + 2.0 * h + self.header_height() {
            self.set_vscroll((value - h).max(lower));
        }
    }

    // ── release ───────────────────────────────────────────────────────────

    fn on_release(&mut self, local: Vec2, rect: Rect) {
        self.left_pressed = false;
        let content = self.content_pos(local);

        if self.in_header(local) {
            if let Some(HeaderHit::Title(c)) = self.header_hit(content.x, rect) {
                if self.header.pressed == Some(c) {
                    self.toggle_sort(c);
                }
            }
            self.state = DragState::Idle;
        } else if !self.rows.is_empty() {
            self.release_item(local, content, rect);
        }

        self.header.pressed = None;
        self.header.resizing = None;
        self.state = DragState::Idle;
        self.cursor = CursorShape::Default;
        self.dirty = true;
    }

    fn release_item(&mut self, local: Vec2, content: Vec2, rect: Rect) {
        let row = self.geometry().row_at(content.y);
        if row.is_some() {
            if self.double_click_row == row {
                self.emit_hit(content, ListViewEvent::DoubleClicked);
            } else if self.single_click_row == row {
                self.emit_hit(content, ListViewEvent::SingleClicked);
            }
        }

        if let DragState::ReorderDragging(session) = std::mem::take(&mut self.state) {
            if session.reference_row.is_some() && self.in_visible_area(local, rect) {
                let slot = self.geometry().slot_at(content.y);
                self.drop_rows(&session, slot);
            }
        }

        self.double_click_row = None;
        self.single_click_row = None;
        if let Some(r) = self.press_in_selection.take() {
            self.selection.select_only(r);
        }
    }

    fn drop_rows(&mut self, session: &DragSession, slot: usize) {
        let dragged: BTreeSet<usize> = session.rows().into_iter().filter_map(|id| self.index_of(id)).collect();
        if dragged.is_empty() {
            return;
        }
        let rows = std::mem::take(&mut self.rows);
        let (rows, moved) = reorder(rows, &dragged, slot);
        self.rows = rows;
        self.reindex();

        let anchor = session
            .anchor
            .and_then(|id| self.index_of(id))
            .filter(|a| moved.contains(a))
            .or_else(|| self.index_of(session.primary));
        log::debug!("listview: dropped {} rows at {slot}", moved.len());
        self.selection.restore(moved, anchor);
        self.hover_row = None;
    }

    fn cancel_drag(&mut self) {
        if !matches!(self.state, DragState::Idle) {
            log::trace!("listview: drag cancelled");
        }
        self.state = DragState::Idle;
        self.left_pressed = false;
        self.press_in_selection = None;
        self.header.pressed = None;
        self.header.resizing = None;
        self.cursor = CursorShape::Default;
        self.dirty = true;
    }

    // ── keyboard ──────────────────────────────────────────────────────────

    fn on_key(&mut self, key: Key, mods: Modifiers) -> EventResult {
        let action = action_for(key, mods);
        if let Some(action) = action {
            self.run_action(action);
        }
        if self.hover_row.is_some() && !mods.ctrl && !mods.shift {
            self.hover_row = None;
            self.dirty = true;
        }
        if action.is_some() { EventResult::Consumed } else { EventResult::Ignored }
    }

    /// Runs a keyboard command. Every command is a no-op on an empty list.
    pub fn run_action(&mut self, action: ListAction) {
        if self.rows.is_empty() {
            return;
        }
        match action {
            ListAction::First => self.select_first(),
            ListAction::Last => self.select_last(),
            ListAction::Prev => self.step(-1),
            ListAction::Next => self.step(1),
            ListAction::PageUp => self.page(-1),
            ListAction::PageDown => self.page(1),
            ListAction::ExtendPrev => self.extend_prev(),
            ListAction::ExtendNext => self.extend_next(),
            ListAction::ExtendFirst => self.extend_to_end(false),
            ListAction::ExtendLast => self.extend_to_end(true),
            ListAction::SelectAll => {
                self.selection.select_all(self.rows.len());
                self.dirty = true;
            }
            ListAction::Delete => self.delete_selected(),
            ListAction::Activate => {
                if let Some(r) = self.selection.single() {
                    let hit = ItemHit { row: self.rows[r].id, index: r, column: None, offset: Vec2::zero() };
                    self.events.emit(&ListViewEvent::DoubleClicked(hit));
                }
            }
        }
    }

    fn last_row(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    fn select_first(&mut self) {
        self.selection.select_only(0);
        let lower = self.scroll.borrow().vadjust.lower();
        self.set_vscroll(lower);
        self.dirty = true;
    }

    fn select_last(&mut self) {
        self.selection.select_only(self.last_row());
        let max = self.scroll.borrow().vadjust.max_value();
        self.set_vscroll(max);
        self.dirty = true;
    }

    /// Up/Down: moves the anchor by one row and collapses the selection.
    fn step(&mut self, dir: isize) {
        let Some(current) = self.selection.anchor().or_else(|| self.selection.first()) else {
            self.select_first();
            return;
        };
        let target = current.saturating_add_signed(dir).min(self.last_row());
        if target != current || self.selection.len() > 1 {
            self.selection.select_only(target);
            self.ensure_visible(target);
        }
    }

    fn extend_prev(&mut self) {
        let (Some(first), Some(last)) = (self.selection.first(), self.selection.last()) else {
            self.select_first();
            return;
        };
        let Some(anchor) = self.selection.anchor() else {
            log::warn!("extend selection: selection has no anchor");
            return;
        };
        if anchor == last {
            if first > 0 {
                self.selection.select_range(anchor, first - 1);
                self.ensure_visible(first - 1);
            }
        } else if anchor == first {
            self.selection.select_range(anchor, last - 1);
            self.ensure_visible(last - 1);
        }
    }

    fn extend_next(&mut self) {
        let (Some(first), Some(last)) = (self.selection.first(), self.selection.last()) else {
            self.select_first();
            return;
        };
        let Some(anchor) = self.selection.anchor() else {
            log::warn!("extend selection: selection has no anchor");
            return;
        };
        if anchor == first {
            if last < self.last_row() {
                self.selection.select_range(anchor, last + 1);
                self.ensure_visible(last + 1);
            }
        } else if anchor == last {
            self.selection.select_range(anchor, first + 1);
            self.ensure_visible(first + 1);
        }
    }

    fn extend_to_end(&mut self, to_last: bool) {
        if self.selection.is_empty() {
            self.select_first();
            return;
        }
        let Some(anchor) = self.selection.anchor() else {
            log::warn!("extend selection: selection has no anchor");
            return;
        };
        let area = {
            let a = self.scroll.borrow();
            (a.vadjust.lower(), a.vadjust.max_value())
        };
        if to_last {
            self.selection.select_range(anchor, self.last_row());
            self.set_vscroll(area.1);
        } else {
            self.selection.select_range(anchor, 0);
            self.set_vscroll(area.0);
        }
        self.dirty = true;
    }

    /// Page Up/Down: moves by one viewport of rows, keeping the selected
    /// row's on-screen position.
    fn page(&mut self, dir: isize) {
        let geom = self.geometry();
        let (_, offset, page) = self.scroll_state();

        if self.selection.is_empty() {
            let y = if dir < 0 {
                (offset - page).max(0.0) + geom.header_height
            } else {
                let upper = self.scroll.borrow().vadjust.upper();
                (offset + page).min(upper - geom.row_height)
            };
            let target = geom.slot_at(y).min(self.last_row());
            self.selection.select_only(target);
            self.ensure_visible(target);
            return;
        }

        let Some(anchor) = self.selection.anchor() else {
            log::warn!("page navigation: selection has no anchor");
            return;
        };
        let step = geom.rows_per_page(page) as isize * dir;
        let target = anchor.saturating_add_signed(step).min(self.last_row());
        let on_screen = geom.row_top(anchor) - offset;
        self.selection.select_only(target);
        self.set_vscroll(geom.row_top(target) - on_screen);
        self.ensure_visible(target);
    }

    /// Removes the selected rows and emits [`ListViewEvent::RowsDeleted`].
    pub fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let selected: BTreeSet<usize> = self.selection.rows().collect();
        self.selection.clear();

        let mut removed = Vec::with_capacity(selected.len());
        let mut kept = Vec::with_capacity(self.rows.len() - selected.len().min(self.rows.len()));
        for (i, row) in std::mem::take(&mut self.rows).into_iter().enumerate() {
            if selected.contains(&i) {
                removed.push(row.item);
            } else {
                kept.push(row);
            }
        }
        self.rows = kept;
        self.reindex();
        if self.highlight.is_some_and(|id| self.index_of(id).is_none()) {
            self.highlight = None;
        }
        self.hover_row = None;
        self.update_adjustments();
        self.dirty = true;

        log::debug!("listview: deleted {} rows", removed.len());
        self.events.emit(&ListViewEvent::RowsDeleted(removed));
    }
}
