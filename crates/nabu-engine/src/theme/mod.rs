//! Read-only theme table: named colors, vertical gradients and bitmaps.
//!
//! Widgets look everything up by string key. Unknown keys resolve to a
//! neutral fallback instead of failing, and are reported once at `debug`.

mod defaults;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use image::RgbaImage;

use crate::paint::{Color, ParseColorError, VerticalGradient};

/// Error raised while building a theme.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeError {
    InvalidColor { key: String, source: ParseColorError },
    EmptyGradient { key: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::InvalidColor { key, source } => write!(f, "theme key {key:?}: {source}"),
            ThemeError::EmptyGradient { key } => write!(f, "theme key {key:?}: gradient has no stops"),
        }
    }
}

impl std::error::Error for ThemeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ThemeError::InvalidColor { source, .. } => Some(source),
            ThemeError::EmptyGradient { .. } => None,
        }
    }
}

const FALLBACK: Color = Color { r: 0.5, g: 0.5, b: 0.5, a: 1.0 };

#[derive(Debug, Default)]
pub struct Theme {
    colors: HashMap<String, Color>,
    gradients: HashMap<String, VerticalGradient>,
    images: HashMap<String, Rc<RgbaImage>>,
    missing: RefCell<HashSet<String>>,
}

impl Theme {
    /// Theme with no entries; every lookup falls back.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in look.
    pub fn builtin() -> Self {
        defaults::builtin()
    }

    pub fn set_color(&mut self, key: &str, hex: &str) -> Result<(), ThemeError> {
        let color = Color::from_hex(hex).map_err(|source| ThemeError::InvalidColor {
            key: key.to_string(),
            source,
        })?;
        self.colors.insert(key.to_string(), color);
        Ok(())
    }

    /// Evenly spaced stops from top to bottom.
    pub fn set_gradient(&mut self, key: &str, hexes: &[&str]) -> Result<(), ThemeError> {
        if hexes.is_empty() {
            return Err(ThemeError::EmptyGradient { key: key.to_string() });
        }
        let last = (hexes.len() - 1).max(1) as f32;
        let mut stops = Vec::with_capacity(hexes.len());
        for (i, hex) in hexes.iter().enumerate() {
            let color = Color::from_hex(hex).map_err(|source| ThemeError::InvalidColor {
                key: key.to_string(),
                source,
            })?;
            stops.push(crate::paint::ColorStop::new(i as f32 / last, color));
        }
        self.gradients.insert(key.to_string(), VerticalGradient::new(stops));
        Ok(())
    }

    pub fn set_image(&mut self, key: &str, image: RgbaImage) {
        self.images.insert(key.to_string(), Rc::new(image));
    }

    pub fn color(&self, key: &str) -> Color {
        match self.colors.get(key) {
            Some(c) => *c,
            None => {
                self.note_missing(key);
                FALLBACK
            }
        }
    }

    /// Gradient for `key`; a flat gradient of the same-named color otherwise.
    pub fn gradient(&self, key: &str) -> VerticalGradient {
        if let Some(g) = self.gradients.get(key) {
            return g.clone();
        }
        let c = self.color(key);
        VerticalGradient::between(c, c)
    }

    pub fn image(&self, key: &str) -> Option<Rc<RgbaImage>> {
        let img = self.images.get(key).cloned();
        if img.is_none() {
            self.note_missing(key);
        }
        img
    }

    fn note_missing(&self, key: &str) {
        if self.missing.borrow_mut().insert(key.to_string()) {
            log::debug!("theme has no entry for {key:?}; using fallback");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_theme_has_list_keys() {
        let theme = Theme::builtin();
        assert_ne!(theme.color("list_item_text"), FALLBACK);
        assert!(theme.image("sort_ascend").is_some());
        assert!(theme.image("header_normal").is_some());
        assert_eq!(theme.gradient("listview_select").stops.len(), 2);
    }

    #[test]
    fn unknown_key_falls_back() {
        let theme = Theme::empty();
        assert_eq!(theme.color("nope"), FALLBACK);
        assert_eq!(theme.gradient("nope").sample(0.5), FALLBACK);
        assert!(theme.image("nope").is_none());
    }

    #[test]
    fn malformed_hex_is_rejected() {
        let mut theme = Theme::empty();
        let err = theme.set_color("frame", "#12345").unwrap_err();
        assert!(matches!(err, ThemeError::InvalidColor { ref key, .. } if key == "frame"));
        assert_eq!(
            theme.set_gradient("g", &[]),
            Err(ThemeError::EmptyGradient { key: "g".into() })
        );
    }
}
