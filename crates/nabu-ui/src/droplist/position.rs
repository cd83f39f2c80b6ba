use nabu_engine::coords::Vec2;

/// Which part of the popup sits on the anchor along one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Start,
    Middle,
    End,
}

impl Align {
    fn place(self, anchor: f32, extent: f32) -> f32 {
        match self {
            Align::Start => anchor,
            Align::Middle => anchor - extent / 2.0,
            Align::End => anchor - extent,
        }
    }
}

/// Top-left corner of a popup of `size` anchored at `anchor` on a screen of
/// `screen` size.
///
/// A popup that would run past the right or bottom edge is pulled back by the
/// overflow, then shifted by `offset`. The left and top edges are not clamped.
pub fn place_popup(anchor: Vec2, size: Vec2, align: (Align, Align), screen: Vec2, offset: Vec2) -> Vec2 {
    let axis = |anchor: f32, extent: f32, align: Align, limit: f32, offset: f32| {
        let start = align.place(anchor, extent);
        let overflow = start + extent - limit;
        if overflow > 0.0 { start - overflow + offset } else { start }
    };
    Vec2::new(
        axis(anchor.x, size.x, align.0, screen.x, offset.x),
        axis(anchor.y, size.y, align.1, screen.y, offset.y),
    )
}

/// Screen position of a sub-list opened from an item spanning
/// `item_top..item_top + item_height` in a parent at `parent_x` that is
/// `parent_width` wide.
///
/// The sub-list goes right of the parent and flips to the left side when it
/// would leave the screen. Vertically it follows the bottom clamp of
/// [`place_popup`].
pub fn place_submenu(parent_x: f32, parent_width: f32, item_top: f32, size: Vec2, screen: Vec2) -> Vec2 {
    let right = parent_x + parent_width;
    let x = if right + size.x > screen.x { parent_x - size.x } else { right };
    let y = place_popup(Vec2::new(x, item_top), size, (Align::Start, Align::Start), screen, Vec2::zero()).y;
    Vec2::new(x, y)
}
