use super::Color;

/// A single gradient stop. `t` is in [0, 1].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Top-to-bottom gradient stretched over whatever rectangle it fills.
///
/// Row highlights, header backgrounds and button faces are all painted with
/// these; the renderer maps `t = 0` to the top edge and `t = 1` to the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalGradient {
    pub stops: Vec<ColorStop>,
}

impl VerticalGradient {
    pub fn new(stops: Vec<ColorStop>) -> Self {
        Self { stops }
    }

    /// Two-stop gradient.
    pub fn between(top: Color, bottom: Color) -> Self {
        Self::new(vec![ColorStop::new(0.0, top), ColorStop::new(1.0, bottom)])
    }

    /// Color at `t`, clamping outside the stop range.
    pub fn sample(&self, t: f32) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::transparent();
        };
        if t <= first.t {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.t {
                let span = (b.t - a.t).max(f32::EPSILON);
                return a.color.lerp(b.color, (t - a.t) / span);
            }
        }
        self.stops[self.stops.len() - 1].color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_interpolates_between_stops() {
        let g = VerticalGradient::between(Color::black(), Color::white());
        let mid = g.sample(0.5);
        assert!((mid.r - 0.5).abs() < 1e-5);
        assert_eq!(g.sample(-1.0), Color::black());
        assert_eq!(g.sample(2.0), Color::white());
    }

    #[test]
    fn empty_gradient_is_transparent() {
        assert_eq!(VerticalGradient::new(Vec::new()).sample(0.3), Color::transparent());
    }
}
