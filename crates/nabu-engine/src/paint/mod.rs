//! Paint model shared between widgets and whatever rasterises the draw list.
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::{Color, ParseColorError};
pub use gradient::{ColorStop, VerticalGradient};

/// Paint source for filling geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Vertical(VerticalGradient),
}

impl Paint {
    #[inline]
    pub fn solid(color: Color) -> Self {
        Paint::Solid(color)
    }

    /// Scales alpha of every color in the paint.
    pub fn with_alpha_factor(self, factor: f32) -> Self {
        match self {
            Paint::Solid(c) => Paint::Solid(c.with_alpha_factor(factor)),
            Paint::Vertical(mut g) => {
                for s in &mut g.stops {
                    s.color = s.color.with_alpha_factor(factor);
                }
                Paint::Vertical(g)
            }
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

impl From<VerticalGradient> for Paint {
    fn from(g: VerticalGradient) -> Self {
        Paint::Vertical(g)
    }
}
