use std::rc::Rc;

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Keeps one scaled copy of a bitmap and rescales only when the requested
/// size (or the source bitmap) changes.
///
/// Header backgrounds are stretched to every column width on every paint;
/// without this the same resize runs once per column per frame.
#[derive(Debug, Default)]
pub struct CachePixbuf {
    source: Option<Rc<RgbaImage>>,
    scaled: Option<Rc<RgbaImage>>,
    rescales: u64,
}

impl CachePixbuf {
    pub fn new() -> Self {
        Self::default()
    }

    /// `source` scaled to `width × height` (each at least 1 px).
    pub fn scale(&mut self, source: &Rc<RgbaImage>, width: u32, height: u32) -> Rc<RgbaImage> {
        let (width, height) = (width.max(1), height.max(1));

        let same_source = self.source.as_ref().is_some_and(|s| Rc::ptr_eq(s, source));
        if same_source {
            if let Some(scaled) = &self.scaled {
                if scaled.dimensions() == (width, height) {
                    return Rc::clone(scaled);
                }
            }
        }

        let scaled = if source.dimensions() == (width, height) {
            Rc::clone(source)
        } else {
            Rc::new(imageops::resize(source.as_ref(), width, height, FilterType::Triangle))
        };
        self.rescales += 1;
        self.source = Some(Rc::clone(source));
        self.scaled = Some(Rc::clone(&scaled));
        scaled
    }

    /// Number of times a new scaled copy was produced.
    pub fn rescales(&self) -> u64 {
        self.rescales
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn rescales_only_on_size_change() {
        let src = Rc::new(RgbaImage::from_pixel(2, 24, Rgba([10, 20, 30, 255])));
        let mut cache = CachePixbuf::new();

        let a = cache.scale(&src, 80, 24);
        let b = cache.scale(&src, 80, 24);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(a.dimensions(), (80, 24));
        assert_eq!(cache.rescales(), 1);

        let c = cache.scale(&src, 120, 24);
        assert_eq!(c.dimensions(), (120, 24));
        assert_eq!(cache.rescales(), 2);
    }

    #[test]
    fn new_source_invalidates() {
        let a = Rc::new(RgbaImage::new(4, 4));
        let b = Rc::new(RgbaImage::new(4, 4));
        let mut cache = CachePixbuf::new();
        cache.scale(&a, 8, 8);
        cache.scale(&b, 8, 8);
        assert_eq!(cache.rescales(), 2);
    }

    #[test]
    fn zero_size_is_clamped() {
        let src = Rc::new(RgbaImage::new(4, 4));
        let mut cache = CachePixbuf::new();
        assert_eq!(cache.scale(&src, 0, 0).dimensions(), (1, 1));
    }
}
