use image::imageops;
use image::{Rgba, RgbaImage};

use crate::paint::Color;

/// Gaussian blur of `src` with standard deviation `sigma`. `sigma <= 0`
/// returns a copy.
pub fn gaussian_blur(src: &RgbaImage, sigma: f32) -> RgbaImage {
    if sigma <= 0.0 {
        return src.clone();
    }
    imageops::blur(src, sigma)
}

/// Soft shadow for a `width × height` popup: a filled rect padded by
/// `radius` on every side and blurred. The popup sits at (`radius`, `radius`).
pub fn drop_shadow(width: u32, height: u32, radius: u32, color: Color) -> RgbaImage {
    let mut canvas = RgbaImage::new(width + radius * 2, height + radius * 2);
    let px = Rgba(color.to_rgba8());
    for y in radius..radius + height {
        for x in radius..radius + width {
            canvas.put_pixel(x, y, px);
        }
    }
    gaussian_blur(&canvas, radius as f32 / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadow_fades_towards_the_edge() {
        let shadow = drop_shadow(20, 20, 6, Color::black());
        assert_eq!(shadow.dimensions(), (32, 32));
        let edge = shadow.get_pixel(0, 16).0[3];
        let inner = shadow.get_pixel(16, 16).0[3];
        assert!(edge < inner);
    }

    #[test]
    fn zero_sigma_is_identity() {
        let img = RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 4]));
        assert_eq!(gaussian_blur(&img, 0.0), img);
    }
}
