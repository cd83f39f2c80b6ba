use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::scene::{Layer, TextAlign};

use crate::painter::Painter;

use super::columns::SortOrder;
use super::item::{CellState, ListItem};
use super::{DragState, ListView};

/// Height of the drop indicator line.
const DRAG_LINE_HEIGHT: f32 = 2.0;

impl<T: ListItem> ListView<T> {
    pub(super) fn paint_list(&self, p: &mut Painter, rect: Rect) {
        p.clipped(rect, |p| {
            let background = p.theme().color("list_background");
            p.fill_rect(rect, background);
            if !self.rows.is_empty() {
                self.paint_rows(p, rect);
            }
            if !self.titles.is_empty() {
                self.paint_header(p, rect);
            }
            self.paint_drag_line(p, rect);
        });
    }

    fn paint_rows(&self, p: &mut Painter, rect: Rect) {
        let (h, v, page) = self.scroll_state();
        let geom = self.geometry();
        let header = geom.header_height;
        let row_rect = |row: usize| Rect::new(rect.x(), rect.y() + geom.row_top(row) - v, rect.width(), self.row_height);

        // Rows scrolled under the header stay hidden.
        let body = Rect::new(rect.x(), rect.y() + header, rect.width(), (rect.height() - header).max(0.0));
        p.clipped(body, |p| {
            let visible = geom.visible_range(v, page);
            let highlight = self.highlight.and_then(|id| self.index_of(id));
            let hover = self.hover_row.and_then(|id| self.index_of(id));

            if let Some(row) = hover.filter(|r| !self.selection.contains(*r) && Some(*r) != highlight) {
                p.fill_vlinear(row_rect(row), "listview_hover");
            }
            for row in self.selection.rows().filter(|r| visible.contains(r) && Some(*r) != highlight) {
                p.fill_vlinear(row_rect(row), "listview_select");
            }
            if let Some(row) = highlight {
                p.fill_vlinear(row_rect(row), "listview_highlight");
            }

            let widths = self.columns.widths();
            for index in visible {
                let row = &self.rows[index];
                let state = CellState {
                    selected: self.selection.contains(index),
                    highlighted: highlight == Some(index),
                };
                let y = rect.y() + geom.row_top(index) - v;
                let mut x = rect.x() - h;
                for (column, width) in widths.iter().copied().enumerate() {
                    let cell = Rect::new(x, y, width, self.row_height);
                    p.clipped(cell, |p| row.item.render_cell(column, p, cell, state));
                    x += width;
                }
            }
        });
    }

    fn paint_header(&self, p: &mut Painter, rect: Rect) {
        let (h, _, _) = self.scroll_state();
        let theme = p.theme();
        let widths = self.columns.widths();
        let total: f32 = widths.iter().sum();
        let last = widths.len().saturating_sub(1);
        let title_color = theme.color("list_view_title_text");
        let split_color = theme.color("list_view_title_split");
        let mut cache = self.header_cache.borrow_mut();

        for (column, width) in widths.iter().copied().enumerate() {
            let offset = self.columns.offset(column);
            // The last header stretches over any space right of the columns.
            let cell_width = if column == last && total < rect.width() { rect.width() - offset } else { width };
            let x = rect.x() + offset - h;
            let cell = Rect::new(x, rect.y(), cell_width, self.title_height);

            let key = match (self.header.hover == Some(column), self.header.pressed == Some(column)) {
                (_, true) => "header_press",
                (true, false) if self.left_pressed => "header_press",
                (true, false) => "header_hover",
                _ => "header_normal",
            };
            match (theme.image(key), cache.get_mut(column)) {
                (Some(img), Some(slot)) => {
                    let scaled = slot.scale(&img, cell_width.max(1.0) as u32, self.title_height.max(1.0) as u32);
                    p.image(scaled, cell.origin);
                }
                _ => p.fill_vlinear(cell, "button_normal"),
            }

            if offset != 0.0 {
                p.line(Vec2::new(x - 1.0, rect.y()), Vec2::new(x - 1.0, rect.y() + self.title_height), 1.0, split_color);
            }

            if let Some(title) = self.titles.get(column) {
                let text_rect = Rect::new(x, rect.y(), width, self.title_height);
                p.text(title.clone(), self.config.title_font_size, title_color, text_rect, TextAlign::Center);
            }

            if self.columns.sort_column() == Some(column) {
                let key = match self.columns.sort_order(column) {
                    Some(SortOrder::Ascending) => "sort_ascend",
                    _ => "sort_descend",
                };
                if let Some(icon) = theme.image(key) {
                    let (iw, ih) = (icon.width() as f32, icon.height() as f32);
                    let origin = Vec2::new(
                        x + cell_width - iw - self.config.sort_padding,
                        rect.y() + ((self.title_height - ih) / 2.0).floor(),
                    );
                    p.image(icon, origin);
                }
            }
        }
    }

    fn paint_drag_line(&self, p: &mut Painter, rect: Rect) {
        let DragState::ReorderDragging(session) = &self.state else {
            return;
        };
        let Some(slot) = session.reference_row else {
            return;
        };
        let (_, v, _) = self.scroll_state();
        let geom = self.geometry();
        let mut y = rect.y() + geom.row_top(slot) - v;
        if slot == geom.row_count && slot > 0 {
            y -= DRAG_LINE_HEIGHT;
        }
        let color = p.theme().color("listview_drag_line");
        p.with_layer(Layer::OVERLAY, |p| {
            p.fill_rect(Rect::new(rect.x(), y, rect.width(), DRAG_LINE_HEIGHT), color);
        });
    }
}
