//! Nabu engine crate.
//!
//! Platform-facing primitives the widget layer is built on: geometry, paint,
//! the recorded draw stream, input events and their winit translation, text
//! metrics, the theme table, scroll adjustments and CPU bitmaps.
//!
//! Rendering and window management stay with the host; this crate only
//! describes what to draw and what happened.

pub mod coords;
pub mod input;
pub mod logging;
pub mod paint;
pub mod pixbuf;
pub mod scene;
pub mod scroll;
pub mod text;
pub mod theme;
pub mod time;
