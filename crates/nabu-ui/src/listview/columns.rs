use nabu_engine::coords::Vec2;

/// Sort direction of a column.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    #[inline]
    pub fn flipped(self) -> SortOrder {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// What a header x-coordinate lands on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HeaderHit {
    /// Inside the title area of a column.
    Title(usize),
    /// On the resize grip to the right of a column.
    Separator(usize),
}

#[derive(Debug, Clone)]
struct Column {
    width: f32,
    min_width: f32,
    min_height: f32,
    sort: SortOrder,
}

impl Column {
    fn new() -> Self {
        // Stored as descending so the first header click sorts ascending.
        Self { width: 0.0, min_width: 0.0, min_height: 0.0, sort: SortOrder::Descending }
    }
}

/// Column widths, minimums and sort state.
///
/// Widths only change through [`set_width`](Self::set_width), which refuses
/// anything below the column's minimum. Minimums only grow.
#[derive(Debug, Clone, Default)]
pub struct Columns {
    cols: Vec<Column>,
    sort_column: Option<usize>,
    expand_column: Option<usize>,
    separator_width: f32,
}

impl Columns {
    pub fn new(separator_width: f32) -> Self {
        Self { separator_width, ..Self::default() }
    }

    pub fn widths(&self) -> Vec<f32> {
        self.cols.iter().map(|c| c.width).collect()
    }

    pub fn min_width(&self, column: usize) -> Option<f32> {
        self.cols.get(column).map(|c| c.min_width)
    }

    pub fn total_width(&self) -> f32 {
        self.cols.iter().map(|c| c.width).sum()
    }

    pub fn total_min_width(&self) -> f32 {
        self.cols.iter().map(|c| c.min_width).sum()
    }

    /// Tallest minimum cell height across columns.
    pub fn max_min_height(&self) -> f32 {
        self.cols.iter().map(|c| c.min_height).fold(0.0, f32::max)
    }

    /// x of the left edge of `column`.
    pub fn offset(&self, column: usize) -> f32 {
        self.cols.iter().take(column).map(|c| c.width).sum()
    }

    /// Raises minimums to `sizes` (one entry per column, extra columns are
    /// created) and widens columns that fall below their new minimum.
    pub fn grow_to(&mut self, sizes: &[Vec2]) {
        if self.cols.len() < sizes.len() {
            self.cols.resize_with(sizes.len(), Column::new);
        }
        for (col, size) in self.cols.iter_mut().zip(sizes) {
            col.min_width = col.min_width.max(size.x);
            col.min_height = col.min_height.max(size.y);
            col.width = col.width.max(col.min_width);
        }
    }

    /// Sets the width of `column` if `width` is at least its minimum.
    pub fn set_width(&mut self, column: usize, width: f32) -> bool {
        match self.cols.get_mut(column) {
            Some(col) if width >= col.min_width => {
                col.width = width;
                true
            }
            _ => false,
        }
    }

    pub fn set_expand_column(&mut self, column: Option<usize>) {
        self.expand_column = column;
    }

    /// Gives the expand column whatever `viewport_width` the other columns
    /// leave, never less than its minimum.
    pub fn allocate(&mut self, viewport_width: f32) {
        let Some(expand) = self.expand_column.filter(|c| *c < self.cols.len()) else {
            return;
        };
        let others: f32 = self
            .cols
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != expand)
            .map(|(_, c)| c.width)
            .sum();
        let col = &mut self.cols[expand];
        col.width = (viewport_width - others).max(col.min_width);
    }

    // ── sorting ───────────────────────────────────────────────────────────

    #[inline]
    pub fn sort_column(&self) -> Option<usize> {
        self.sort_column
    }

    pub fn sort_order(&self, column: usize) -> Option<SortOrder> {
        self.cols.get(column).map(|c| c.sort)
    }

    pub fn set_sort_order(&mut self, column: usize, order: SortOrder) {
        if let Some(col) = self.cols.get_mut(column) {
            col.sort = order;
        }
    }

    /// Header click: `column` becomes the sort column and its order flips.
    pub fn toggle_sort(&mut self, column: usize) -> Option<SortOrder> {
        let col = self.cols.get_mut(column)?;
        col.sort = col.sort.flipped();
        self.sort_column = Some(column);
        Some(col.sort)
    }

    // ── hit testing ───────────────────────────────────────────────────────

    /// Column under content x plus the offset into it.
    pub fn column_at(&self, x: f32) -> Option<(usize, f32)> {
        if x < 0.0 {
            return None;
        }
        let mut start = 0.0;
        for (i, c) in self.cols.iter().enumerate() {
            if x < start + c.width {
                return Some((i, x - start));
            }
            start += c.width;
        }
        None
    }

    /// Header hit-test at content x. The last column extends to
    /// `header_width` and has no grip.
    ///
    /// A column's title area is `(left + sep, right - sep)`; its grip spans
    /// `[right - sep, right + sep]`.
    pub fn header_hit(&self, x: f32, header_width: f32) -> Option<HeaderHit> {
        let sep = self.separator_width;
        let last = self.cols.len().checked_sub(1)?;
        for column in 0..=last {
            let end = if column == last {
                header_width.max(self.total_width())
            } else {
                self.offset(column + 1) - sep
            };
            let start = if column == 0 { 0.0 } else { self.offset(column) + sep };
            if start < x && x < end {
                return Some(HeaderHit::Title(column));
            }
            if column != last && end <= x && x <= end + sep * 2.0 {
                return Some(HeaderHit::Separator(column));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_columns() -> Columns {
        let mut c = Columns::new(2.0);
        c.grow_to(&[Vec2::new(50.0, 20.0), Vec2::new(30.0, 24.0), Vec2::new(40.0, 18.0)]);
        c
    }

    // ── widths ────────────────────────────────────────────────────────────

    #[test]
    fn minimums_only_grow() {
        let mut c = three_columns();
        c.grow_to(&[Vec2::new(10.0, 10.0), Vec2::new(60.0, 10.0)]);
        assert_eq!(c.widths(), [50.0, 60.0, 40.0]);
        assert_eq!(c.max_min_height(), 24.0);
    }

    #[test]
    fn width_below_minimum_is_refused() {
        let mut c = three_columns();
        assert!(!c.set_width(0, 49.0));
        assert!(c.set_width(0, 80.0));
        assert!(!c.set_width(9, 80.0));
        assert_eq!(c.widths()[0], 80.0);
    }

    #[test]
    fn expand_column_absorbs_leftover() {
        let mut c = three_columns();
        c.set_expand_column(Some(1));
        c.allocate(300.0);
        assert_eq!(c.widths()[1], 210.0);
        // Narrow viewport: floored at the minimum, columns overflow.
        c.allocate(100.0);
        assert_eq!(c.widths()[1], 30.0);
        assert_eq!(c.total_width(), 120.0);
    }

    // ── hit testing ───────────────────────────────────────────────────────

    #[test]
    fn header_hit_distinguishes_title_and_grip() {
        let c = three_columns();
        assert_eq!(c.header_hit(10.0, 200.0), Some(HeaderHit::Title(0)));
        assert_eq!(c.header_hit(48.0, 200.0), Some(HeaderHit::Separator(0)));
        assert_eq!(c.header_hit(51.0, 200.0), Some(HeaderHit::Separator(0)));
        assert_eq!(c.header_hit(60.0, 200.0), Some(HeaderHit::Title(1)));
        assert_eq!(c.header_hit(150.0, 200.0), Some(HeaderHit::Title(2)));
        assert_eq!(Columns::new(2.0).header_hit(5.0, 100.0), None);
    }

    #[test]
    fn column_at_reports_offset() {
        let c = three_columns();
        assert_eq!(c.column_at(55.0), Some((1, 5.0)));
        assert_eq!(c.column_at(500.0), None);
        assert_eq!(c.column_at(-1.0), None);
    }

    // ── sorting ───────────────────────────────────────────────────────────

    #[test]
    fn first_click_sorts_ascending_then_alternates() {
        let mut c = three_columns();
        assert_eq!(c.toggle_sort(1), Some(SortOrder::Ascending));
        assert_eq!(c.toggle_sort(1), Some(SortOrder::Descending));
        assert_eq!(c.sort_column(), Some(1));
        assert_eq!(c.toggle_sort(7), None);
    }
}
