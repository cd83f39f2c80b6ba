//! Text measurement.
//!
//! Widgets only ever ask two things of text: how big a run is, and (for
//! bitmaps composed on the CPU such as the drag badge) its coverage mask.

mod font_system;

use image::GrayImage;

use crate::coords::Vec2;

pub use font_system::{FontId, FontLoadError, FontSystem};

/// Single-line text metrics provider.
pub trait TextMeasure {
    /// Width and height of `text` at `size` logical pixels.
    fn measure(&self, text: &str, size: f32) -> Vec2;

    /// Coverage mask of `text`, or `None` when no glyph source is available.
    fn rasterize(&self, _text: &str, _size: f32) -> Option<GrayImage> {
        None
    }
}

/// Deterministic metrics: every char is `size * char_width` wide, lines are
/// `size * line_height` tall. Used headless and in tests.
#[derive(Debug, Copy, Clone)]
pub struct FixedMetrics {
    pub char_width: f32,
    pub line_height: f32,
}

impl FixedMetrics {
    pub const fn new(char_width: f32, line_height: f32) -> Self {
        Self { char_width, line_height }
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self::new(0.5, 1.25)
    }
}

impl TextMeasure for FixedMetrics {
    fn measure(&self, text: &str, size: f32) -> Vec2 {
        Vec2::new(
            (text.chars().count() as f32 * size * self.char_width).ceil(),
            (size * self.line_height).ceil(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_metrics_scale_with_length() {
        let m = FixedMetrics::default();
        assert_eq!(m.measure("abcd", 10.0), Vec2::new(20.0, 13.0));
        assert_eq!(m.measure("", 10.0).x, 0.0);
        assert!(m.rasterize("x", 10.0).is_none());
    }

    #[test]
    fn empty_font_system_still_measures_height() {
        let fs = FontSystem::new();
        let size = fs.measure("hello", 10.0);
        assert_eq!(size.x, 0.0);
        assert!((size.y - 12.0).abs() < 1e-4);
        assert!(fs.rasterize("hello", 10.0).is_none());
    }

    #[test]
    fn garbage_font_bytes_fail_to_load() {
        let mut fs = FontSystem::new();
        assert!(fs.load_font(&[0, 1, 2, 3]).is_err());
    }
}
