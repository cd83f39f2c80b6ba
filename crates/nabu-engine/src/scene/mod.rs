//! Scene (draw stream) types.
//!
//! Widgets record into a `DrawList`; a backend walks it in paint order.
//! Ordering is layer first, then insertion order.

mod cmd;
mod layer;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use layer::{Layer, SortKey};
pub use list::{DrawItem, DrawList};
pub use shapes::TextAlign;
