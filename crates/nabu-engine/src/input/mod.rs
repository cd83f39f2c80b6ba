//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform::winit` translates window-system events into `InputEvent`s.

mod state;
mod types;

pub mod platform;

pub use state::{InputState, DOUBLE_CLICK_DISTANCE, DOUBLE_CLICK_TIME};
pub use types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
    PointerMoveEvent,
    SurfaceId,
};
