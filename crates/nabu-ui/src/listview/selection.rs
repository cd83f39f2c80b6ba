use std::collections::BTreeSet;

/// Selected row positions plus the anchor used for range extension.
///
/// Invariant: when `anchor` is set it is a member of `rows`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    rows: BTreeSet<usize>,
    anchor: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    pub fn first(&self) -> Option<usize> {
        self.rows.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.rows.last().copied()
    }

    /// Selected rows in ascending order.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }

    /// The single selected row, if exactly one is selected.
    pub fn single(&self) -> Option<usize> {
        if self.rows.len() == 1 { self.first() } else { None }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.anchor = None;
    }

    /// Selection becomes `{row}` with `row` as anchor.
    pub fn select_only(&mut self, row: usize) {
        self.rows.clear();
        self.rows.insert(row);
        self.anchor = Some(row);
    }

    /// Selection becomes the inclusive range between `a` and `b`. The anchor
    /// is kept if it falls inside the range, otherwise it moves to `a`.
    pub fn select_range(&mut self, a: usize, b: usize) {
        let (lo, hi) = (a.min(b), a.max(b));
        self.rows = (lo..=hi).collect();
        if !self.anchor.is_some_and(|x| (lo..=hi).contains(&x)) {
            self.anchor = Some(a);
        }
    }

    /// Shift-click: range from the anchor to `row`. With no anchor this is a
    /// plain click. A lone selected row becomes the anchor first.
    pub fn extend_to(&mut self, row: usize) {
        if self.rows.len() == 1 {
            self.anchor = self.first();
        }
        match self.anchor {
            Some(anchor) if !self.rows.is_empty() => self.select_range(anchor, row),
            _ => self.select_only(row),
        }
    }

    /// Ctrl-click: flips membership of `row`. An added row becomes the
    /// anchor. Removing the anchor moves it to the nearest remaining row,
    /// preferring the one below.
    pub fn toggle(&mut self, row: usize) {
        if self.rows.remove(&row) {
            if self.anchor == Some(row) {
                self.anchor = self
                    .rows
                    .range(row..)
                    .next()
                    .or_else(|| self.rows.range(..row).next_back())
                    .copied();
            }
        } else {
            self.rows.insert(row);
            self.anchor = Some(row);
        }
    }

    /// Selects `0..n`. The anchor is kept, or set to 0 if there was none.
    pub fn select_all(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        self.rows = (0..n).collect();
        if !self.anchor.is_some_and(|a| a < n) {
            self.anchor = Some(0);
        }
    }

    /// Adds `row` without touching the anchor.
    pub fn insert(&mut self, row: usize) {
        self.rows.insert(row);
    }

    /// Removes `row`. Never removes the anchor; returns `false` instead.
    pub fn remove(&mut self, row: usize) -> bool {
        if self.anchor == Some(row) {
            return false;
        }
        self.rows.remove(&row)
    }

    /// Replaces the whole state. `anchor` is dropped if not in `rows`.
    pub fn restore(&mut self, rows: impl IntoIterator<Item = usize>, anchor: Option<usize>) {
        self.rows = rows.into_iter().collect();
        self.anchor = anchor.filter(|a| self.rows.contains(a));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(s: &Selection) -> Vec<usize> {
        s.rows().collect()
    }

    // ── click semantics ───────────────────────────────────────────────────

    #[test]
    fn plain_click_selects_only_row() {
        let mut s = Selection::new();
        s.select_range(1, 4);
        s.select_only(2);
        assert_eq!(rows(&s), [2]);
        assert_eq!(s.anchor(), Some(2));
    }

    #[test]
    fn shift_range_is_relative_to_anchor() {
        let mut s = Selection::new();
        s.select_only(5);
        s.toggle(9);
        s.toggle(1);
        // Anchor is now 1; range ignores the prior scattered rows.
        s.extend_to(3);
        assert_eq!(rows(&s), [1, 2, 3]);
        assert_eq!(s.anchor(), Some(1));

        s.extend_to(0);
        assert_eq!(rows(&s), [0, 1]);
        assert_eq!(s.anchor(), Some(1));
    }

    #[test]
    fn shift_without_anchor_acts_as_click() {
        let mut s = Selection::new();
        s.extend_to(4);
        assert_eq!(rows(&s), [4]);
        assert_eq!(s.anchor(), Some(4));
    }

    #[test]
    fn ctrl_toggle_moves_anchor_off_removed_row() {
        let mut s = Selection::new();
        s.select_only(2);
        s.toggle(5);
        s.toggle(8);
        assert_eq!(s.anchor(), Some(8));

        s.toggle(2);
        assert_eq!(s.anchor(), Some(8));

        s.toggle(8);
        assert_eq!(s.anchor(), Some(5));
        s.toggle(5);
        assert_eq!(s.anchor(), None);
        assert!(s.is_empty());
    }

    // ── bulk ──────────────────────────────────────────────────────────────

    #[test]
    fn select_all_yields_every_row() {
        for n in [1usize, 2, 7] {
            let mut s = Selection::new();
            s.select_all(n);
            assert_eq!(rows(&s), (0..n).collect::<Vec<_>>());
            assert_eq!(s.anchor(), Some(0));
        }
        let mut s = Selection::new();
        s.select_all(0);
        assert!(s.is_empty());
        assert_eq!(s.anchor(), None);
    }

    #[test]
    fn anchor_cannot_be_removed_directly() {
        let mut s = Selection::new();
        s.select_range(3, 5);
        assert!(!s.remove(3));
        assert!(s.remove(5));
        assert_eq!(rows(&s), [3, 4]);
    }

    #[test]
    fn restore_drops_foreign_anchor() {
        let mut s = Selection::new();
        s.restore([1, 2], Some(7));
        assert_eq!(s.anchor(), None);
        s.restore([1, 2], Some(2));
        assert_eq!(s.anchor(), Some(2));
    }
}
