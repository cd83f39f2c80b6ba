//! Small CPU bitmap builders: gradient strips, arrows, capsules, blending.

use image::{GrayImage, Rgba, RgbaImage};

use crate::paint::{Color, VerticalGradient};

/// Source-over blend of a straight-alpha color into `dst`, with extra
/// `coverage` in [0, 255].
pub fn blend_pixel(dst: &mut Rgba<u8>, src: [u8; 4], coverage: u8) {
    let sa = src[3] as f32 / 255.0 * coverage as f32 / 255.0;
    if sa <= 0.0 {
        return;
    }
    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for c in 0..3 {
        let s = src[c] as f32 / 255.0;
        let d = dst.0[c] as f32 / 255.0;
        let v = (s * sa + d * da * (1.0 - sa)) / out_a;
        dst.0[c] = (v * 255.0).round() as u8;
    }
    dst.0[3] = (out_a * 255.0).round() as u8;
}

/// Blends `src` onto `dst` with its top-left at (`x`, `y`). Out-of-bounds
/// pixels are dropped.
pub fn composite(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    for (sx, sy, px) in src.enumerate_pixels() {
        let (dx, dy) = (x + sx as i64, y + sy as i64);
        if dx < 0 || dy < 0 || dx >= dst.width() as i64 || dy >= dst.height() as i64 {
            continue;
        }
        blend_pixel(dst.get_pixel_mut(dx as u32, dy as u32), px.0, 255);
    }
}

/// Paints `color` through a coverage mask at (`x`, `y`).
pub fn fill_mask(dst: &mut RgbaImage, mask: &GrayImage, x: i64, y: i64, color: Color) {
    let rgba = color.to_rgba8();
    for (mx, my, m) in mask.enumerate_pixels() {
        let (dx, dy) = (x + mx as i64, y + my as i64);
        if dx < 0 || dy < 0 || dx >= dst.width() as i64 || dy >= dst.height() as i64 {
            continue;
        }
        blend_pixel(dst.get_pixel_mut(dx as u32, dy as u32), rgba, m.0[0]);
    }
}

/// `width × height` bitmap filled top-to-bottom with `gradient`.
pub fn gradient_strip(gradient: &VerticalGradient, width: u32, height: u32) -> RgbaImage {
    let (width, height) = (width.max(1), height.max(1));
    let mut img = RgbaImage::new(width, height);
    for y in 0..height {
        let t = if height == 1 { 0.0 } else { y as f32 / (height - 1) as f32 };
        let px = Rgba(gradient.sample(t).to_rgba8());
        for x in 0..width {
            img.put_pixel(x, y, px);
        }
    }
    img
}

/// Horizontal capsule (fully rounded ends) filled with a vertical gradient.
pub fn capsule(gradient: &VerticalGradient, width: u32, height: u32) -> RgbaImage {
    let (width, height) = (width.max(height).max(1), height.max(1));
    let mut img = RgbaImage::new(width, height);
    let r = height as f32 / 2.0;
    let (left, right) = (r, width as f32 - r);
    for y in 0..height {
        let t = if height == 1 { 0.0 } else { y as f32 / (height - 1) as f32 };
        let color = gradient.sample(t).to_rgba8();
        for x in 0..width {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            let cx = px.clamp(left, right);
            let d = ((px - cx).powi(2) + (py - r).powi(2)).sqrt();
            // One pixel of edge falloff.
            let coverage = ((r - d + 0.5).clamp(0.0, 1.0) * 255.0) as u8;
            if coverage > 0 {
                blend_pixel(img.get_pixel_mut(x, y), color, coverage);
            }
        }
    }
    img
}

/// Solid isosceles triangle pointing up (`up = true`) or down.
pub fn arrow(width: u32, height: u32, up: bool, color: Color) -> RgbaImage {
    let mut img = RgbaImage::new(width.max(1), height.max(1));
    let rgba = color.to_rgba8();
    let half = width as f32 / 2.0;
    for y in 0..img.height() {
        // Row 0 is the tip when pointing up.
        let row = if up { y } else { img.height() - 1 - y };
        let span = half * (row as f32 + 1.0) / height.max(1) as f32;
        for x in 0..img.width() {
            if ((x as f32 + 0.5) - half).abs() <= span {
                img.put_pixel(x, y, Rgba(rgba));
            }
        }
    }
    img
}
