use image::RgbaImage;

use crate::paint::{Color, VerticalGradient};
use crate::text::TextMeasure;

use super::draw::{capsule, composite, fill_mask};

/// Font size of the count drawn in the badge.
pub const BADGE_FONT_SIZE: f32 = 9.0;

const BADGE_TOP: &str = "#40408c";
const BADGE_BOTTOM: &str = "#0093F9";

/// Drag cursor for a multi-row drag: `icon` with a pill carrying `count`
/// in its top-right corner.
///
/// Falls back to a copy of `icon` when `text` cannot rasterise glyphs.
pub fn render_drag_badge(count: usize, icon: &RgbaImage, text: &dyn TextMeasure) -> RgbaImage {
    let label = count.to_string();
    let Some(mask) = text.rasterize(&label, BADGE_FONT_SIZE) else {
        log::debug!("no glyph rasteriser; drag badge falls back to bare icon");
        return icon.clone();
    };

    let (top, bottom) = match (Color::from_hex(BADGE_TOP), Color::from_hex(BADGE_BOTTOM)) {
        (Ok(t), Ok(b)) => (t, b),
        _ => return icon.clone(),
    };
    let pill_h = mask.height() + 4;
    let pill_w = (mask.width() + 8).max(pill_h);
    let mut pill = capsule(&VerticalGradient::between(top, bottom), pill_w, pill_h);
    fill_mask(
        &mut pill,
        &mask,
        ((pill_w - mask.width()) / 2) as i64,
        ((pill_h - mask.height()) / 2) as i64,
        Color::white(),
    );

    // Pill overhangs the icon's top-right corner by half its height.
    let overhang = pill_h / 2;
    let width = icon.width().max(pill_w) + overhang;
    let height = icon.height() + overhang;
    let mut out = RgbaImage::new(width, height);
    composite(&mut out, icon, 0, overhang as i64);
    composite(&mut out, &pill, (width - pill_w) as i64, 0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::text::FixedMetrics;
    use image::{GrayImage, Luma};

    struct BlockGlyphs;

    impl TextMeasure for BlockGlyphs {
        fn measure(&self, text: &str, size: f32) -> Vec2 {
            Vec2::new(text.len() as f32 * size / 2.0, size)
        }

        fn rasterize(&self, text: &str, size: f32) -> Option<GrayImage> {
            let s = self.measure(text, size);
            Some(GrayImage::from_pixel(s.x as u32, s.y as u32, Luma([255])))
        }
    }

    #[test]
    fn falls_back_to_icon_without_rasteriser() {
        let icon = RgbaImage::new(24, 24);
        let out = render_drag_badge(3, &icon, &FixedMetrics::default());
        assert_eq!(out.dimensions(), (24, 24));
    }

    #[test]
    fn badge_grows_canvas_and_paints_pill() {
        let icon = RgbaImage::new(24, 24);
        let out = render_drag_badge(12, &icon, &BlockGlyphs);
        assert!(out.width() > 24 && out.height() > 24);
        // Centre of the pill carries white glyph pixels.
        let pill_h = 9 + 4;
        let pill_w = 9 + 8;
        let px = out.get_pixel(out.width() - pill_w / 2, pill_h / 2);
        assert_eq!(px.0, [255, 255, 255, 255]);
    }
}
