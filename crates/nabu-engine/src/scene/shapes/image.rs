use std::rc::Rc;

use image::RgbaImage;

use crate::coords::Vec2;
use crate::scene::{DrawCmd, DrawList, Layer};

/// Bitmap payload. Pixels are straight-alpha RGBA and are drawn 1:1 at `origin`.
#[derive(Debug, Clone)]
pub struct ImageCmd {
    pub image: Rc<RgbaImage>,
    pub origin: Vec2,
}

impl PartialEq for ImageCmd {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.image, &other.image) && self.origin == other.origin
    }
}

impl DrawList {
    #[inline]
    pub fn push_image(&mut self, layer: Layer, image: Rc<RgbaImage>, origin: Vec2) {
        self.push(layer, DrawCmd::Image(ImageCmd { image, origin }));
    }
}
