use core::cmp::Ordering;

/// Stacking layer for draw items. Higher layers paint on top.
///
/// Popups and the drag badge are recorded into the same list as ordinary
/// content, so their layer is what keeps them above it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Layer(pub i32);

impl Layer {
    pub const CONTENT: Layer = Layer(0);
    /// Drop indicators and other decorations drawn over rows.
    pub const OVERLAY: Layer = Layer(10);
    pub const POPUP_SHADOW: Layer = Layer(99);
    pub const POPUP: Layer = Layer(100);
    pub const DRAG_BADGE: Layer = Layer(200);

    /// Layer for nested popup `depth` (0 = first popup of a chain).
    #[inline]
    pub const fn popup(depth: usize) -> Layer {
        Layer(Self::POPUP.0 + 2 * depth as i32)
    }
}

/// Stable key: `layer` first, insertion order within a layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SortKey {
    pub layer: Layer,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(layer: Layer, order: u32) -> Self {
        Self { layer, order }
    }
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.layer.cmp(&other.layer).then(self.order.cmp(&other.order))
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
