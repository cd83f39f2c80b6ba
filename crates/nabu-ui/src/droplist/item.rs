use nabu_engine::coords::Vec2;
use nabu_engine::text::TextMeasure;

use super::DroplistConfig;

/// One entry of a drop-down list.
#[derive(Debug, Clone, PartialEq)]
pub enum DroplistItem<V> {
    /// Thin non-interactive divider.
    Separator,
    Selectable { label: String, value: V },
}

impl<V> DroplistItem<V> {
    pub fn new(label: impl Into<String>, value: V) -> Self {
        DroplistItem::Selectable { label: label.into(), value }
    }

    #[inline]
    pub fn is_selectable(&self) -> bool {
        matches!(self, DroplistItem::Selectable { .. })
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            DroplistItem::Selectable { label, .. } => Some(label),
            DroplistItem::Separator => None,
        }
    }

    pub fn value(&self) -> Option<&V> {
        match self {
            DroplistItem::Selectable { value, .. } => Some(value),
            DroplistItem::Separator => None,
        }
    }

    /// Size of the entry before the popup stretches it to its own width.
    pub(super) fn measure(&self, text: &dyn TextMeasure, config: &DroplistConfig) -> Vec2 {
        match self {
            DroplistItem::Separator => Vec2::new(0.0, config.item_padding_y * 2.0 + 1.0),
            DroplistItem::Selectable { label, .. } => {
                let size = text.measure(label, config.font_size);
                let mut width = config.item_padding_left + config.item_padding_right + size.x;
                if let Some(max) = config.max_width {
                    width = width.min(max);
                }
                Vec2::new(width, config.item_padding_y * 2.0 + size.y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nabu_engine::text::FixedMetrics;

    #[test]
    fn separator_is_thin() {
        let config = DroplistConfig::default();
        let sep: DroplistItem<u32> = DroplistItem::Separator;
        assert_eq!(sep.measure(&FixedMetrics::default(), &config), Vec2::new(0.0, 7.0));
        assert!(!sep.is_selectable());
    }

    #[test]
    fn selectable_width_includes_padding_and_respects_max() {
        let text = FixedMetrics::default();
        let item = DroplistItem::new("Open", 1);
        // "Open" at 9 px: 4 chars * 4.5 = 18 wide, 12 tall.
        assert_eq!(item.measure(&text, &DroplistConfig::default()), Vec2::new(56.0, 18.0));
        let narrow = DroplistConfig::default().max_width(40.0);
        assert_eq!(item.measure(&text, &narrow).x, 40.0);
        assert_eq!(item.label(), Some("Open"));
        assert_eq!(item.value(), Some(&1));
    }
}
