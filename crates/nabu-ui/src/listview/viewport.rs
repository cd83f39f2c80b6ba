use std::ops::Range;

/// Vertical row geometry of a list: header band followed by fixed-height rows.
///
/// All `y` values are content coordinates (0 is the top of the header when
/// the list is scrolled to the top).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RowGeometry {
    pub header_height: f32,
    pub row_height: f32,
    pub row_count: usize,
}

impl RowGeometry {
    #[inline]
    pub fn content_height(&self) -> f32 {
        self.header_height + self.row_count as f32 * self.row_height
    }

    /// Top edge of row `row`.
    #[inline]
    pub fn row_top(&self, row: usize) -> f32 {
        self.header_height + row as f32 * self.row_height
    }

    /// Rows intersecting `[offset, offset + height]`.
    ///
    /// Always within `0..row_count`; empty for an empty list.
    pub fn visible_range(&self, offset: f32, height: f32) -> Range<usize> {
        if self.row_count == 0 || self.row_height <= 0.0 {
            return 0..0;
        }
        let n = self.row_count as f32;
        let first = ((offset - self.header_height) / self.row_height).floor().clamp(0.0, n - 1.0);
        let last = ((offset + height - self.header_height) / self.row_height).ceil().clamp(first + 1.0, n);
        first as usize..last as usize
    }

    /// Row under `y`, `None` on the header or below the last row.
    pub fn row_at(&self, y: f32) -> Option<usize> {
        if self.row_height <= 0.0 || y < self.header_height {
            return None;
        }
        let row = ((y - self.header_height) / self.row_height) as usize;
        (row < self.row_count).then_some(row)
    }

    /// Drop slot under `y` while dragging: `0..=row_count`, `None` on the
    /// header or further below.
    pub fn drop_slot(&self, y: f32) -> Option<usize> {
        if self.row_height <= 0.0 || y < self.header_height {
            return None;
        }
        let slot = ((y - self.header_height) / self.row_height) as usize;
        (slot <= self.row_count).then_some(slot)
    }

    /// Insertion slot under `y`, clamped to `0..=row_count`.
    pub fn slot_at(&self, y: f32) -> usize {
        if self.row_height <= 0.0 {
            return 0;
        }
        let slot = ((y - self.header_height) / self.row_height).max(0.0) as usize;
        slot.min(self.row_count)
    }

    /// Rows that fit in a viewport of `height`, at least one.
    pub fn rows_per_page(&self, height: f32) -> usize {
        if self.row_height <= 0.0 {
            return 1;
        }
        ((height / self.row_height).floor() as usize).max(1)
    }

    /// Scroll offset that brings `row` fully into a viewport of `height`
    /// currently at `offset`, or `None` if it is already visible.
    pub fn reveal(&self, row: usize, offset: f32, height: f32) -> Option<f32> {
        if row >= self.row_count {
            return None;
        }
        let top = self.row_top(row);
        let bottom = top + self.row_height;
        if top < offset + self.header_height {
            Some(top - self.header_height)
        } else if bottom > offset + height {
            Some(bottom - height)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom(n: usize) -> RowGeometry {
        RowGeometry { header_height: 24.0, row_height: 20.0, row_count: n }
    }

    // ── visible range ─────────────────────────────────────────────────────

    #[test]
    fn visible_range_stays_in_bounds() {
        for n in [0usize, 1, 3, 50] {
            let g = geom(n);
            let mut offset = -40.0;
            while offset < g.content_height() + 100.0 {
                let r = g.visible_range(offset, 100.0);
                assert!(r.end <= n, "n={n} offset={offset} {r:?}");
                if n > 0 {
                    assert!(r.start < r.end, "n={n} offset={offset} {r:?}");
                } else {
                    assert!(r.is_empty());
                }
                offset += 7.0;
            }
        }
    }

    #[test]
    fn visible_range_at_top_and_scrolled() {
        let g = geom(50);
        assert_eq!(g.visible_range(0.0, 100.0), 0..4);
        assert_eq!(g.visible_range(224.0, 100.0), 10..15);
    }

    // ── hit testing ───────────────────────────────────────────────────────

    #[test]
    fn row_at_ignores_header_and_space_below() {
        let g = geom(3);
        assert_eq!(g.row_at(10.0), None);
        assert_eq!(g.row_at(24.0), Some(0));
        assert_eq!(g.row_at(83.9), Some(2));
        assert_eq!(g.row_at(84.0), None);
    }

    #[test]
    fn slot_at_clamps() {
        let g = geom(3);
        assert_eq!(g.slot_at(0.0), 0);
        assert_eq!(g.slot_at(50.0), 1);
        assert_eq!(g.slot_at(900.0), 3);
        assert_eq!(g.drop_slot(90.0), Some(3));
        assert_eq!(g.drop_slot(104.0), None);
    }

    // ── reveal ────────────────────────────────────────────────────────────

    #[test]
    fn reveal_scrolls_minimally() {
        let g = geom(50);
        assert_eq!(g.reveal(1, 0.0, 100.0), None);
        assert_eq!(g.reveal(5, 0.0, 100.0), Some(44.0));
        assert_eq!(g.reveal(2, 100.0, 100.0), Some(40.0));
        assert_eq!(g.reveal(60, 0.0, 100.0), None);
    }
}
