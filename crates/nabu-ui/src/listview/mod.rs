//! Virtualized multi-column list with sortable headers.
//!
//! A [`ListView`] paints only the rows intersecting its viewport, keeps a
//! selection with an anchor row, reorders rows by dragging, resizes columns
//! from the header and batches per-row redraw requests into periodic ticks.
//!
//! Scroll position belongs to the enclosing container; the list holds a
//! [`ScrollHandle`] to it and only requests offsets.

mod columns;
mod drag;
mod input;
mod item;
mod keymap;
mod redraw;
mod render;
mod selection;
mod viewport;

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::ops::Range;
use std::time::{Duration, Instant};

use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::pixbuf::CachePixbuf;
use nabu_engine::scroll::ScrollHandle;
use nabu_engine::theme::Theme;

use crate::constraints::LayoutCtx;
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::signal::Signal;
use crate::widget::{CursorShape, Widget};

pub use columns::{HeaderHit, SortOrder};
pub use drag::{reorder, DragSession};
pub use item::{CellState, ListItem, Row, RowId, TextRow};
pub use keymap::{action_for, ListAction};
pub use redraw::RedrawQueue;
pub use selection::Selection;
pub use viewport::RowGeometry;

use columns::Columns;

/// Orders two rows for a column sort.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering>;

// ── configuration ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ListViewConfig {
    pub multi_select: bool,
    pub drag_drop: bool,
    /// How far outside the viewport a reorder drag still counts as inside.
    pub drag_out_offset: f32,
    pub redraw_interval: Duration,
    pub title_padding: f32,
    pub sort_padding: f32,
    pub separator_width: f32,
    pub title_font_size: f32,
    pub title_height: f32,
}

impl Default for ListViewConfig {
    fn default() -> Self {
        Self {
            multi_select: true,
            drag_drop: true,
            drag_out_offset: 50.0,
            redraw_interval: Duration::from_millis(100),
            title_padding: 5.0,
            sort_padding: 5.0,
            separator_width: 2.0,
            title_font_size: 9.0,
            title_height: 24.0,
        }
    }
}

impl ListViewConfig {
    pub fn multi_select(mut self, enabled: bool) -> Self {
        self.multi_select = enabled;
        self
    }

    pub fn drag_drop(mut self, enabled: bool) -> Self {
        self.drag_drop = enabled;
        self
    }

    pub fn drag_out_offset(mut self, offset: f32) -> Self {
        self.drag_out_offset = offset;
        self
    }

    pub fn redraw_interval(mut self, interval: Duration) -> Self {
        self.redraw_interval = interval;
        self
    }
}

// ── events ────────────────────────────────────────────────────────────────

/// Where a pointer event landed on a row.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ItemHit {
    pub row: RowId,
    pub index: usize,
    /// `None` for keyboard activation or a point right of the last column.
    pub column: Option<usize>,
    /// Offset inside the cell (or the row, when `column` is `None`).
    pub offset: Vec2,
}

/// Notifications emitted by a [`ListView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ListViewEvent<T> {
    Pressed(ItemHit),
    SingleClicked(ItemHit),
    /// Double click, or Return on a single selected row.
    DoubleClicked(ItemHit),
    /// Pointer moved over a row with no button held.
    Hovered(ItemHit),
    /// Context request: screen position, anchor row, selected rows.
    RightPress { root: Vec2, current: Option<RowId>, selected: Vec<RowId> },
    /// Rows removed with Delete, in their former order.
    RowsDeleted(Vec<T>),
    /// A reorder drag left the list; the host may start an external drag.
    DragOut { rows: Vec<RowId> },
}

// ── state ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
enum DragState {
    #[default]
    Idle,
    /// Left button held after a plain click; the range runs from `start`.
    RangeDragging { start: usize },
    ReorderDragging(DragSession),
}

#[derive(Debug, Default)]
struct HeaderState {
    hover: Option<usize>,
    pressed: Option<usize>,
    resizing: Option<usize>,
}

// ── ListView ──────────────────────────────────────────────────────────────

pub struct ListView<T> {
    config: ListViewConfig,
    scroll: ScrollHandle,
    rows: Vec<Row<T>>,
    titles: Vec<String>,
    columns: Columns,
    sorters: HashMap<usize, Comparator<T>>,
    row_height: f32,
    title_height: f32,
    selection: Selection,
    highlight: Option<RowId>,
    hover_row: Option<RowId>,
    header: HeaderState,
    left_pressed: bool,
    state: DragState,
    /// Row pressed inside the selection; collapses the selection to it if
    /// the button is released without motion.
    press_in_selection: Option<usize>,
    single_click_row: Option<usize>,
    double_click_row: Option<usize>,
    redraw: RedrawQueue,
    header_cache: RefCell<Vec<CachePixbuf>>,
    cursor: CursorShape,
    viewport_width: f32,
    dirty: bool,
    pub events: Signal<ListViewEvent<T>>,
}

impl<T: ListItem> ListView<T> {
    pub fn new(scroll: ScrollHandle, config: ListViewConfig) -> Self {
        let viewport_width = scroll.borrow().hadjust.page_size();
        Self {
            redraw: RedrawQueue::new(config.redraw_interval, Instant::now()),
            columns: Columns::new(config.separator_width),
            title_height: config.title_height,
            config,
            scroll,
            rows: Vec::new(),
            titles: Vec::new(),
            sorters: HashMap::new(),
            row_height: 1.0,
            selection: Selection::new(),
            highlight: None,
            hover_row: None,
            header: HeaderState::default(),
            left_pressed: false,
            state: DragState::Idle,
            press_in_selection: None,
            single_click_row: None,
            double_click_row: None,
            header_cache: RefCell::new(Vec::new()),
            cursor: CursorShape::Default,
            viewport_width,
            dirty: true,
            events: Signal::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &ListViewConfig {
        &self.config
    }

    #[inline]
    pub fn scroll(&self) -> &ScrollHandle {
        &self.scroll
    }

    // ── content ───────────────────────────────────────────────────────────

    /// Sets the header titles. Column minimums grow to fit them.
    pub fn add_titles<S: Into<String>>(
        &mut self,
        ctx: &LayoutCtx,
        titles: impl IntoIterator<Item = S>,
        title_height: f32,
    ) {
        self.titles = titles.into_iter().map(Into::into).collect();
        self.header = HeaderState::default();
        *self.header_cache.borrow_mut() = self.titles.iter().map(|_| CachePixbuf::new()).collect();
        self.set_title_height(title_height);

        let sizes = self.title_sizes(ctx);
        self.columns.grow_to(&sizes);
        self.update_adjustments();
        self.dirty = true;
    }

    pub fn set_title_height(&mut self, height: f32) {
        self.title_height = height.max(0.0);
        self.update_adjustments();
        self.dirty = true;
    }

    /// Header band height; zero without titles.
    #[inline]
    pub fn header_height(&self) -> f32 {
        if self.titles.is_empty() { 0.0 } else { self.title_height }
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Inserts `items` at `insert_pos` (appends when `None` or past the end)
    /// and returns their ids. With `sort`, the list is re-sorted by the
    /// active sort column afterwards.
    ///
    /// Selection and highlight follow their rows, not their positions.
    pub fn add_items(
        &mut self,
        ctx: &LayoutCtx,
        items: impl IntoIterator<Item = T>,
        insert_pos: Option<usize>,
        sort: bool,
    ) -> Vec<RowId> {
        let new_rows: Vec<Row<T>> =
            items.into_iter().map(|item| Row { id: RowId::next(), index: 0, item }).collect();
        if new_rows.is_empty() {
            return Vec::new();
        }
        let ids: Vec<RowId> = new_rows.iter().map(|r| r.id).collect();

        let sizes = self.cell_min_sizes(ctx, &new_rows);
        self.columns.grow_to(&sizes);
        self.row_height = self.row_height.max(self.columns.max_min_height());

        let saved = self.save_selection();
        let at = insert_pos.unwrap_or(self.rows.len()).min(self.rows.len());
        let tail = self.rows.split_off(at);
        self.rows.extend(new_rows);
        self.rows.extend(tail);
        self.reindex();
        self.restore_selection(saved);

        if sort {
            if let Some(column) = self.columns.sort_column() {
                self.sort_by_column(column);
            }
        }

        self.columns.allocate(self.viewport_width);
        self.update_adjustments();
        log::trace!("listview: added {} rows at {at}", ids.len());
        self.dirty = true;
        ids
    }

    /// Per-column minimum sizes for `rows`, including header text and the
    /// sort arrow allowance.
    fn cell_min_sizes(&self, ctx: &LayoutCtx, rows: &[Row<T>]) -> Vec<Vec2> {
        let sort_icon = sort_icon_size(ctx.theme, self.config.sort_padding);
        let titles = self.title_sizes(ctx);

        let mut sizes: Vec<Vec2> = Vec::new();
        for row in rows {
            for (column, cell) in row.item.column_sizes(ctx.text).into_iter().enumerate() {
                let mut size = Vec2::new(cell.x, cell.y.max(sort_icon.y));
                if let Some(title) = titles.get(column) {
                    size = size.max(Vec2::new(title.x + sort_icon.x * 2.0, title.y));
                }
                match sizes.get_mut(column) {
                    Some(s) => *s = s.max(size),
                    None => sizes.push(size),
                }
            }
        }
        sizes
    }

    fn title_sizes(&self, ctx: &LayoutCtx) -> Vec<Vec2> {
        self.titles
            .iter()
            .map(|t| {
                let s = ctx.measure_text(t, self.config.title_font_size);
                Vec2::new(s.x + self.config.title_padding * 2.0, s.y)
            })
            .collect()
    }

    /// Removes every row and resets selection, highlight and drag state.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.selection.clear();
        self.highlight = None;
        self.hover_row = None;
        self.state = DragState::Idle;
        self.press_in_selection = None;
        self.update_adjustments();
        self.dirty = true;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row<T>] {
        &self.rows
    }

    pub fn items(&self) -> impl Iterator<Item = &T> + '_ {
        self.rows.iter().map(|r| &r.item)
    }

    pub fn index_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    pub fn item(&self, id: RowId) -> Option<&T> {
        self.rows.iter().find(|r| r.id == id).map(|r| &r.item)
    }

    /// Mutates a row in place and schedules its redraw.
    pub fn update_item(&mut self, id: RowId, f: impl FnOnce(&mut T)) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        f(&mut row.item);
        self.request_redraw(id);
        true
    }

    /// Queues a redraw of one row for the next tick.
    pub fn request_redraw(&mut self, id: RowId) {
        self.redraw.push(id);
    }

    fn reindex(&mut self) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.index = i;
        }
    }

    fn save_selection(&self) -> (Vec<RowId>, Option<RowId>) {
        let ids = self.selection.rows().filter_map(|i| self.rows.get(i)).map(|r| r.id).collect();
        let anchor = self.selection.anchor().and_then(|i| self.rows.get(i)).map(|r| r.id);
        (ids, anchor)
    }

    fn restore_selection(&mut self, (ids, anchor): (Vec<RowId>, Option<RowId>)) {
        let positions: HashMap<RowId, usize> = self.rows.iter().map(|r| (r.id, r.index)).collect();
        let rows = ids.iter().filter_map(|id| positions.get(id).copied());
        let anchor = anchor.and_then(|id| positions.get(&id).copied());
        self.selection.restore(rows.collect::<Vec<_>>(), anchor);
    }

    // ── columns ───────────────────────────────────────────────────────────

    pub fn cell_widths(&self) -> Vec<f32> {
        self.columns.widths()
    }

    /// Accepted only at or above the column's minimum width.
    pub fn set_cell_width(&mut self, column: usize, width: f32) -> bool {
        let changed = self.columns.set_width(column, width);
        if changed {
            self.update_adjustments();
            self.dirty = true;
        }
        changed
    }

    pub fn set_expand_column(&mut self, column: Option<usize>) {
        self.columns.set_expand_column(column);
        self.columns.allocate(self.viewport_width);
        self.dirty = true;
    }

    /// Recomputes the expand column for a viewport of `width`.
    pub fn size_allocate(&mut self, width: f32) {
        self.viewport_width = width;
        self.columns.allocate(width);
        self.update_adjustments();
        self.dirty = true;
    }

    pub fn column_sort_type(&self, column: usize) -> Option<SortOrder> {
        self.columns.sort_order(column)
    }

    pub fn set_column_sort_type(&mut self, column: usize, order: SortOrder) {
        self.columns.set_sort_order(column, order);
    }

    pub fn sort_column(&self) -> Option<usize> {
        self.columns.sort_column()
    }

    /// Comparator used when the header of `column` is clicked.
    pub fn set_sorter(&mut self, column: usize, cmp: impl Fn(&T, &T) -> Ordering + 'static) {
        self.sorters.insert(column, Box::new(cmp));
    }

    /// Sorts with an ad-hoc comparator. Selection follows the rows.
    pub fn sort_by(&mut self, cmp: impl Fn(&T, &T) -> Ordering, order: SortOrder) {
        let saved = self.save_selection();
        match order {
            SortOrder::Ascending => self.rows.sort_by(|a, b| cmp(&a.item, &b.item)),
            SortOrder::Descending => self.rows.sort_by(|a, b| cmp(&b.item, &a.item)),
        }
        self.reindex();
        self.restore_selection(saved);
        self.dirty = true;
    }

    /// Header click: toggles the order of `column` and re-sorts by it.
    pub fn toggle_sort(&mut self, column: usize) {
        let Some(order) = self.columns.toggle_sort(column) else {
            return;
        };
        log::debug!("listview: sort column {column} {order:?}");
        self.sort_by_column(column);
    }

    fn sort_by_column(&mut self, column: usize) {
        let Some(order) = self.columns.sort_order(column) else {
            return;
        };
        let Some(cmp) = self.sorters.remove(&column) else {
            return;
        };
        self.sort_by(&cmp, order);
        self.sorters.insert(column, cmp);
    }

    // ── selection ─────────────────────────────────────────────────────────

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_ids(&self) -> Vec<RowId> {
        self.selection.rows().filter_map(|i| self.rows.get(i)).map(|r| r.id).collect()
    }

    /// The selected item when exactly one row is selected.
    pub fn get_current_item(&self) -> Option<&T> {
        self.selection.single().and_then(|i| self.rows.get(i)).map(|r| &r.item)
    }

    pub fn select_rows(&mut self, rows: impl IntoIterator<Item = usize>, anchor: Option<usize>) {
        let n = self.rows.len();
        let rows: Vec<usize> = rows.into_iter().filter(|r| *r < n).collect();
        self.selection.restore(rows, anchor);
        self.dirty = true;
    }

    pub fn highlight(&self) -> Option<RowId> {
        self.highlight
    }

    /// Marks `id` as the highlighted row (e.g. the playing track) and
    /// scrolls it into view.
    pub fn set_highlight(&mut self, id: RowId) {
        self.highlight = Some(id);
        self.visible_highlight();
        self.dirty = true;
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
        self.dirty = true;
    }

    /// Scrolls the highlighted row into view.
    pub fn visible_highlight(&mut self) {
        let Some(id) = self.highlight else {
            log::warn!("visible_highlight: no highlighted row");
            return;
        };
        if let Some(row) = self.index_of(id) {
            self.ensure_visible(row);
        }
    }

    pub fn hover_row(&self) -> Option<RowId> {
        self.hover_row
    }

    // ── viewport ──────────────────────────────────────────────────────────

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn geometry(&self) -> RowGeometry {
        RowGeometry {
            header_height: self.header_height(),
            row_height: self.row_height,
            row_count: self.rows.len(),
        }
    }

    /// `(horizontal offset, vertical offset, viewport height)`.
    fn scroll_state(&self) -> (f32, f32, f32) {
        let area = self.scroll.borrow();
        (area.hadjust.value(), area.vadjust.value(), area.vadjust.page_size())
    }

    fn set_vscroll(&self, value: f32) {
        self.scroll.borrow_mut().vadjust.set_value(value);
    }

    /// Rows intersecting the viewport right now.
    pub fn visible_range(&self) -> Range<usize> {
        let (_, offset, height) = self.scroll_state();
        self.geometry().visible_range(offset, height)
    }

    fn ensure_visible(&mut self, row: usize) {
        let (_, offset, height) = self.scroll_state();
        if let Some(value) = self.geometry().reveal(row, offset, height) {
            self.set_vscroll(value);
        }
        self.dirty = true;
    }

    fn update_adjustments(&self) {
        let height = self.geometry().content_height();
        let width = self.columns.total_width();
        let mut area = self.scroll.borrow_mut();
        area.vadjust.set_upper(height);
        let page = area.hadjust.page_size();
        area.hadjust.set_upper(width.max(page));
    }

    // ── redraw ────────────────────────────────────────────────────────────

    /// Flushes queued row redraws if the interval has elapsed. Returns true
    /// when a repaint was requested.
    pub fn tick(&mut self, now: Instant) -> bool {
        let visible = self.visible_range();
        let rows = &self.rows;
        let repaint = self.redraw.tick(now, visible, |id| rows.iter().position(|r| r.id == id));
        self.dirty |= repaint;
        repaint
    }

    pub fn next_tick(&self) -> Instant {
        self.redraw.next_deadline()
    }

    /// Whether a repaint is pending; clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn cursor(&self) -> &CursorShape {
        &self.cursor
    }
}

/// Sort arrow footprint: `(width + padding on both sides, height)`.
fn sort_icon_size(theme: &Theme, padding: f32) -> Vec2 {
    match theme.image("sort_descend") {
        Some(img) => Vec2::new(img.width() as f32 + padding * 2.0, img.height() as f32),
        None => Vec2::zero(),
    }
}

impl<T: ListItem> Widget for ListView<T> {
    fn measure(&self, _ctx: &LayoutCtx) -> Vec2 {
        Vec2::new(self.columns.total_min_width(), self.geometry().content_height())
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.paint_list(painter, rect);
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        self.handle_event(event, rect, ctx)
    }
}
