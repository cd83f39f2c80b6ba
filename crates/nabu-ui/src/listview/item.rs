use std::sync::atomic::{AtomicU64, Ordering};

use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::scene::TextAlign;
use nabu_engine::text::TextMeasure;

use crate::painter::Painter;

static NEXT_ROW_ID: AtomicU64 = AtomicU64::new(1);

// ── RowId ─────────────────────────────────────────────────────────────────

/// Stable identity of a row, assigned when it is added to a list.
///
/// Positions change with every insert, delete, sort and reorder; the id does
/// not. Selection and highlight survive reordering by tracking ids.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RowId(u64);

impl RowId {
    pub(crate) fn next() -> Self {
        RowId(NEXT_ROW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// ── ListItem ──────────────────────────────────────────────────────────────

/// Paint state of one cell.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CellState {
    pub selected: bool,
    pub highlighted: bool,
}

/// Row data shown by a [`ListView`](super::ListView).
///
/// A row is a data-only value; the list asks it for per-column sizes and then
/// dispatches painting by column index.
pub trait ListItem {
    /// Preferred `(width, height)` of each column's cell.
    fn column_sizes(&self, text: &dyn TextMeasure) -> Vec<Vec2>;

    /// Paints column `column` of this row into `rect`. The painter is
    /// already clipped to `rect`.
    fn render_cell(&self, column: usize, painter: &mut Painter, rect: Rect, state: CellState);
}

/// A row stored in a list: identity, current position, data.
#[derive(Debug, Clone)]
pub struct Row<T> {
    pub id: RowId,
    /// Position in the current ordering. Rewritten after every change.
    pub index: usize,
    pub item: T,
}

// ── TextRow ───────────────────────────────────────────────────────────────

/// Plain text cells, one string per column.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRow {
    pub cells: Vec<String>,
    pub aligns: Vec<TextAlign>,
    pub font_size: f32,
    pub padding_x: f32,
    pub padding_y: f32,
}

impl TextRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            aligns: Vec::new(),
            font_size: 9.0,
            padding_x: 10.0,
            padding_y: 5.0,
        }
    }

    /// Per-column alignment; columns without an entry are left-aligned.
    pub fn aligns(mut self, aligns: impl IntoIterator<Item = TextAlign>) -> Self {
        self.aligns = aligns.into_iter().collect();
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

impl ListItem for TextRow {
    fn column_sizes(&self, text: &dyn TextMeasure) -> Vec<Vec2> {
        self.cells
            .iter()
            .map(|c| {
                let s = text.measure(c, self.font_size);
                Vec2::new(s.x + self.padding_x * 2.0, s.y + self.padding_y * 2.0)
            })
            .collect()
    }

    fn render_cell(&self, column: usize, painter: &mut Painter, rect: Rect, state: CellState) {
        let Some(content) = self.cells.get(column) else {
            return;
        };
        let key = if state.selected || state.highlighted {
            "list_item_select_text"
        } else {
            "list_item_text"
        };
        let color = painter.theme().color(key);
        let align = self.aligns.get(column).copied().unwrap_or_default();
        painter.text(content.clone(), self.font_size, color, rect.inset(self.padding_x, 0.0), align);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nabu_engine::text::FixedMetrics;

    #[test]
    fn text_row_sizes_include_padding() {
        let row = TextRow::new(["abcd", ""]).font_size(10.0);
        let sizes = row.column_sizes(&FixedMetrics::default());
        assert_eq!(sizes, [Vec2::new(40.0, 23.0), Vec2::new(20.0, 23.0)]);
    }

    #[test]
    fn row_ids_are_unique() {
        let a = RowId::next();
        let b = RowId::next();
        assert_ne!(a, b);
    }
}
