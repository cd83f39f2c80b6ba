//! CPU-side bitmaps: scaled-image cache, drag badge, blur and a few
//! procedural shapes used by the default theme.

mod badge;
mod blur;
mod cache;
pub mod draw;

pub use badge::{render_drag_badge, BADGE_FONT_SIZE};
pub use blur::{drop_shadow, gaussian_blur};
pub use cache::CachePixbuf;
