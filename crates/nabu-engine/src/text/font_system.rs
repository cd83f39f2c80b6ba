use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use image::GrayImage;

use crate::coords::Vec2;

use super::TextMeasure;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns the loaded fonts. The first font loaded is the UI font used for
/// measuring and rasterising labels.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        log::debug!("loaded font {:?} ({} glyphs)", id, self.fonts[id.0].glyph_count());
        Ok(id)
    }

    fn primary(&self) -> Option<&fontdue::Font> {
        self.fonts.first()
    }

    fn layout(&self, font: &fontdue::Font, text: &str, size: f32) -> Layout<()> {
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));
        layout
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasure for FontSystem {
    fn measure(&self, text: &str, size: f32) -> Vec2 {
        let Some(font) = self.primary() else {
            return Vec2::new(0.0, size * 1.2);
        };

        let layout = self.layout(font, text, size);
        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, size * 1.2);
        }

        // Advance extent, not bitmap extent, so trailing spaces count.
        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        Vec2::new(w.ceil(), layout.height().ceil())
    }

    fn rasterize(&self, text: &str, size: f32) -> Option<GrayImage> {
        let font = self.primary()?;
        let layout = self.layout(font, text, size);
        let extent = self.measure(text, size);
        let (w, h) = (extent.x.max(1.0) as u32, extent.y.max(1.0) as u32);

        let mut out = GrayImage::new(w, h);
        for g in layout.glyphs() {
            if g.width == 0 || g.height == 0 {
                continue;
            }
            let (_, coverage) = font.rasterize_config(g.key);
            for gy in 0..g.height {
                for gx in 0..g.width {
                    let x = g.x as i64 + gx as i64;
                    let y = g.y as i64 + gy as i64;
                    if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
                        continue;
                    }
                    let px = out.get_pixel_mut(x as u32, y as u32);
                    px.0[0] = px.0[0].max(coverage[gy * g.width + gx]);
                }
            }
        }
        Some(out)
    }
}
