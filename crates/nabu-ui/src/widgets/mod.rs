//! Small themed controls.

pub mod button;
pub mod color;
pub mod group;

pub use button::{Button, ButtonVisual, ClickTracker};
pub use color::{is_hex_color, ColorButton, ColorButtonEvent, ColorItem, DEFAULT_COLOR_LIST};
pub use group::{ImageButtonGroup, ImageButtonItem, ToggleButtonGroup, ToggleButtonItem};
