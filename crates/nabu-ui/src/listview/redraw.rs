use std::collections::HashSet;
use std::ops::Range;
use std::time::{Duration, Instant};

use nabu_engine::time::Interval;

use super::item::RowId;

/// Batches per-row invalidations into at most one repaint per period.
#[derive(Debug)]
pub struct RedrawQueue {
    interval: Interval,
    pending: HashSet<RowId>,
}

impl RedrawQueue {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self { interval: Interval::starting_at(period, now), pending: HashSet::new() }
    }

    pub fn push(&mut self, row: RowId) {
        self.pending.insert(row);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Instant {
        self.interval.next_deadline()
    }

    /// Runs one tick if the period has elapsed. `index_of` resolves queued
    /// rows to their current position (`None` for removed rows).
    ///
    /// Returns true when a queued row is inside `visible`. The queue is
    /// emptied on every tick either way.
    pub fn tick(
        &mut self,
        now: Instant,
        visible: Range<usize>,
        index_of: impl Fn(RowId) -> Option<usize>,
    ) -> bool {
        if !self.interval.poll(now) {
            return false;
        }
        let repaint = self
            .pending
            .drain()
            .filter_map(&index_of)
            .any(|i| visible.contains(&i));
        if repaint {
            log::trace!("listview: flushing row redraws");
        }
        repaint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Duration = Duration::from_millis(100);

    #[test]
    fn visible_row_triggers_one_repaint_and_queue_clears() {
        let t0 = Instant::now();
        let mut q = RedrawQueue::new(P, t0);
        let a = RowId::next();
        let b = RowId::next();
        q.push(a);
        q.push(b);
        q.push(a);
        assert_eq!(q.len(), 2);

        assert!(!q.tick(t0 + Duration::from_millis(10), 0..10, |_| Some(3)));
        assert_eq!(q.len(), 2);

        assert!(q.tick(t0 + P, 0..10, |id| if id == a { Some(3) } else { None }));
        assert!(q.is_empty());
    }

    #[test]
    fn offscreen_rows_still_clear_queue() {
        let t0 = Instant::now();
        let mut q = RedrawQueue::new(P, t0);
        q.push(RowId::next());
        assert!(!q.tick(t0 + P, 0..10, |_| Some(40)));
        assert!(q.is_empty());
    }
}
