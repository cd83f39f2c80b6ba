use std::collections::BTreeSet;
use std::ops::Range;
use std::rc::Rc;

use image::RgbaImage;

use super::item::RowId;

/// Transient state of a reorder drag, alive from the press on a selected
/// row until release or cancellation.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Selected rows above the pressed one, top to bottom.
    pub before: Vec<RowId>,
    /// The pressed row.
    pub primary: RowId,
    /// Selected rows below the pressed one, top to bottom.
    pub after: Vec<RowId>,
    /// Selection anchor when the drag began, restored after the drop.
    pub anchor: Option<RowId>,
    /// Prospective insertion slot under the pointer.
    pub reference_row: Option<usize>,
    /// `DragOut` already emitted for this session.
    pub dragged_out: bool,
    /// Cursor badge, rendered once on the first motion.
    pub badge: Option<Rc<RgbaImage>>,
}

impl DragSession {
    /// Splits `selected` (in list order) around `primary`.
    pub fn new(selected: &[RowId], primary: RowId, anchor: Option<RowId>) -> Self {
        let split = selected.iter().position(|r| *r == primary).unwrap_or(selected.len());
        let before = selected[..split].to_vec();
        let after = selected.get(split + 1..).map(<[RowId]>::to_vec).unwrap_or_default();
        Self { before, primary, after, anchor, reference_row: None, dragged_out: false, badge: None }
    }

    /// Dragged rows in their original relative order.
    pub fn rows(&self) -> Vec<RowId> {
        let mut rows = Vec::with_capacity(self.before.len() + 1 + self.after.len());
        rows.extend_from_slice(&self.before);
        rows.push(self.primary);
        rows.extend_from_slice(&self.after);
        rows
    }

    pub fn len(&self) -> usize {
        self.before.len() + 1 + self.after.len()
    }
}

/// Moves the rows at `dragged` so they start at insertion slot `slot`.
///
/// The result is: undragged rows above `slot`, then the dragged rows in their
/// original order, then undragged rows at or below `slot`. A slot inside the
/// dragged block therefore leaves the block where it is. Returns the range
/// the dragged rows occupy afterwards.
pub fn reorder<T>(items: Vec<T>, dragged: &BTreeSet<usize>, slot: usize) -> (Vec<T>, Range<usize>) {
    let mut before = Vec::new();
    let mut moving = Vec::new();
    let mut after = Vec::new();
    for (i, item) in items.into_iter().enumerate() {
        if dragged.contains(&i) {
            moving.push(item);
        } else if i < slot {
            before.push(item);
        } else {
            after.push(item);
        }
    }
    let start = before.len();
    let end = start + moving.len();
    before.extend(moving);
    before.extend(after);
    (before, start..end)
}
