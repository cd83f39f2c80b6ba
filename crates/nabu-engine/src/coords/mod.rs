//! Coordinate and geometry types shared by the engine and the widget layer.
//!
//! Canonical space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Widgets work in their own content space; popups and the input router also
//! deal in root (screen) coordinates.

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
