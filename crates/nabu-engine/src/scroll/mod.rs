//! Scroll state owned by scrollable containers.
//!
//! Widgets that scroll never own their offset. They hold a [`ScrollHandle`]
//! to the container and read or request offsets through it.

use std::cell::RefCell;
use std::rc::Rc;

/// One scroll axis: content extent `[lower, upper)`, visible `page_size`
/// and current `value` (top of the visible page).
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    lower: f32,
    upper: f32,
    value: f32,
    page_size: f32,
    step_increment: f32,
}

impl Adjustment {
    pub fn new(lower: f32, upper: f32, page_size: f32) -> Self {
        let mut adj = Self { lower, upper, value: lower, page_size, step_increment: 20.0 };
        adj.clamp_value();
        adj
    }

    #[inline]
    pub fn lower(&self) -> f32 {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> f32 {
        self.upper
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn page_size(&self) -> f32 {
        self.page_size
    }

    #[inline]
    pub fn step_increment(&self) -> f32 {
        self.step_increment
    }

    /// Largest valid value.
    #[inline]
    pub fn max_value(&self) -> f32 {
        (self.upper - self.page_size).max(self.lower)
    }

    /// Sets the offset, clamped to `[lower, upper - page_size]`.
    pub fn set_value(&mut self, value: f32) {
        self.value = value;
        self.clamp_value();
    }

    pub fn set_upper(&mut self, upper: f32) {
        self.upper = upper;
        self.clamp_value();
    }

    pub fn set_page_size(&mut self, page_size: f32) {
        self.page_size = page_size.max(0.0);
        self.clamp_value();
    }

    pub fn set_step_increment(&mut self, step: f32) {
        self.step_increment = step.max(0.0);
    }

    /// Whether any part of the content is hidden.
    pub fn is_scrollable(&self) -> bool {
        self.upper - self.lower > self.page_size
    }

    fn clamp_value(&mut self) {
        self.value = self.value.clamp(self.lower, self.max_value());
    }
}

impl Default for Adjustment {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// Horizontal and vertical adjustments of one scrolled container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollArea {
    pub hadjust: Adjustment,
    pub vadjust: Adjustment,
}

impl ScrollArea {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            hadjust: Adjustment::new(0.0, viewport_width, viewport_width),
            vadjust: Adjustment::new(0.0, viewport_height, viewport_height),
        }
    }

    /// Shared handle for widgets that scroll inside this area.
    pub fn into_handle(self) -> ScrollHandle {
        Rc::new(RefCell::new(self))
    }
}

/// Back-reference from a scrolled widget to its container.
pub type ScrollHandle = Rc<RefCell<ScrollArea>>;
