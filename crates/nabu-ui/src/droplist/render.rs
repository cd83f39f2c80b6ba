use std::rc::Rc;

use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::pixbuf::drop_shadow;
use nabu_engine::scene::{Layer, TextAlign};

use crate::painter::Painter;

use super::{Droplist, DroplistItem};

/// Shadow sits this far below the popup.
const SHADOW_OFFSET_Y: f32 = 2.0;

impl<V: Clone> Droplist<V> {
    /// Paints the popup with its top-left corner at `origin`. The shadow goes
    /// one layer below the painter's current layer.
    pub(crate) fn paint_popup(&self, p: &mut Painter, origin: Vec2) {
        let rect = Rect { origin, size: self.size() };
        let config = self.config();
        let theme = p.theme();

        if config.shadow {
            self.paint_shadow(p, rect);
        }

        let background = theme.color("droplist_background").with_alpha_factor(config.opacity);
        p.fill_rect(rect, background);

        let area = self.item_area().translate(origin);
        p.clipped(area, |p| {
            for index in 0..self.items().len() {
                let Some(local) = self.item_rect(index) else { continue };
                let item_rect = local.translate(origin);
                if item_rect.bottom() < area.y() || item_rect.y() > area.bottom() {
                    continue;
                }
                self.paint_item(p, index, item_rect);
            }
        });

        if let Some(thumb) = self.thumb_rect() {
            p.fill_rect(thumb.translate(origin), theme.color("scrollbar_thumb"));
        }
        p.stroke_rect(rect, 1.0, theme.color("droplist_frame"));
    }

    fn paint_item(&self, p: &mut Painter, index: usize, rect: Rect) {
        let theme = p.theme();
        let config = self.config();
        match &self.items()[index] {
            DroplistItem::Separator => {
                let y = (rect.y() + rect.height() / 2.0).floor();
                let from = Vec2::new(rect.x() + config.item_padding_left, y);
                let to = Vec2::new(rect.right() - config.item_padding_left, y);
                p.line(from, to, 1.0, theme.color("droplist_separator"));
            }
            DroplistItem::Selectable { label, .. } => {
                let lit = self.active() == Some(index) || self.submenu_item() == Some(index);
                let color = if lit {
                    p.fill_vlinear(rect, "menu_item_select");
                    theme.color("menu_item_select_text")
                } else {
                    theme.color("menu_item_text")
                };
                let text_rect = Rect::new(
                    rect.x() + config.item_padding_left,
                    rect.y(),
                    (rect.width() - config.item_padding_left - config.item_padding_right).max(0.0),
                    rect.height(),
                );
                p.text(label.clone(), config.font_size, color, text_rect, TextAlign::Left);

                if self.submenu_item() == Some(index) {
                    let cx = rect.right() - config.item_padding_right / 2.0;
                    let cy = rect.y() + rect.height() / 2.0;
                    let arrow = theme.color("submenu_arrow");
                    p.line(Vec2::new(cx - 2.0, cy - 3.0), Vec2::new(cx + 1.0, cy), 1.0, arrow);
                    p.line(Vec2::new(cx + 1.0, cy), Vec2::new(cx - 2.0, cy + 3.0), 1.0, arrow);
                }
            }
        }
    }

    fn paint_shadow(&self, p: &mut Painter, rect: Rect) {
        let radius = self.config().shadow_radius;
        let (w, h) = (rect.width().max(1.0) as u32, rect.height().max(1.0) as u32);
        let mut cache = self.shadow.borrow_mut();
        let shadow = match cache.as_ref().filter(|img| img.dimensions() == (w + radius * 2, h + radius * 2)) {
            Some(img) => Rc::clone(img),
            None => {
                let img = Rc::new(drop_shadow(w, h, radius, p.theme().color("droplist_shadow")));
                *cache = Some(Rc::clone(&img));
                img
            }
        };
        let origin = Vec2::new(rect.x() - radius as f32, rect.y() - radius as f32 + SHADOW_OFFSET_Y);
        let layer = Layer(p.layer().0 - 1);
        p.with_layer(layer, |p| p.image(shadow, origin));
    }
}
