use image::Rgba;

use crate::paint::{Color, VerticalGradient};
use crate::pixbuf::draw::{arrow, gradient_strip};

use super::Theme;

const COLORS: &[(&str, &str)] = &[
    ("list_background", "#FFFFFF"),
    ("list_item_text", "#000000"),
    ("list_item_select_text", "#FFFFFF"),
    ("list_view_title_text", "#333333"),
    ("list_view_title_split", "#BBBBBB"),
    ("listview_drag_line", "#0093F9"),
    ("droplist_background", "#FFFFFF"),
    ("droplist_frame", "#A0A0A0"),
    ("droplist_separator", "#D0D0D0"),
    ("droplist_shadow", "#00000060"),
    ("menu_item_text", "#333333"),
    ("menu_item_select_text", "#FFFFFF"),
    ("submenu_arrow", "#666666"),
    ("scrollbar_thumb", "#B0B0B0"),
    ("button_frame", "#8A8A8A"),
    ("button_text", "#333333"),
    ("button_insensitive_text", "#A0A0A0"),
    ("color_item_frame", "#606060"),
    ("color_item_hover", "#FFFFFF"),
    ("color_item_highlight", "#0093F9"),
    ("color_button_frame", "#A0A0A0"),
];

const GRADIENTS: &[(&str, &[&str])] = &[
    ("listview_hover", &["#E6F2FD", "#D6EBFC"]),
    ("listview_select", &["#5DA2EB", "#3F86D6"]),
    ("listview_highlight", &["#FFF4C2", "#FBE38A"]),
    ("menu_item_select", &["#5DA2EB", "#3F86D6"]),
    ("menu_item_active", &["#CFE3F8", "#B9D6F5"]),
    ("button_normal", &["#FDFDFD", "#E4E4E4"]),
    ("button_hover", &["#FFFFFF", "#EDEDED"]),
    ("button_press", &["#D8D8D8", "#EDEDED"]),
    ("button_insensitive", &["#F2F2F2", "#F2F2F2"]),
];

const HEADERS: &[(&str, &str, &str)] = &[
    ("header_normal", "#FAFAFA", "#E8E8E8"),
    ("header_hover", "#FFFFFF", "#EFEFEF"),
    ("header_press", "#DCDCDC", "#EAEAEA"),
];

pub(super) fn builtin() -> Theme {
    let mut theme = Theme::empty();

    for (key, hex) in COLORS {
        if let Err(e) = theme.set_color(key, hex) {
            log::warn!("builtin theme: {e}");
        }
    }
    for (key, hexes) in GRADIENTS {
        if let Err(e) = theme.set_gradient(key, hexes) {
            log::warn!("builtin theme: {e}");
        }
    }

    for (key, top, bottom) in HEADERS {
        match (Color::from_hex(top), Color::from_hex(bottom)) {
            (Ok(t), Ok(b)) => theme.set_image(key, gradient_strip(&VerticalGradient::between(t, b), 2, 24)),
            _ => log::warn!("builtin theme: bad header colors for {key}"),
        }
    }

    let arrow_color = theme.color("submenu_arrow");
    theme.set_image("sort_ascend", arrow(9, 5, true, arrow_color));
    theme.set_image("sort_descend", arrow(9, 5, false, arrow_color));

    let mut icon = gradient_strip(&theme.gradient("button_normal"), 24, 24);
    let frame = Rgba(theme.color("button_frame").to_rgba8());
    for i in 0..24 {
        icon.put_pixel(i, 0, frame);
        icon.put_pixel(i, 23, frame);
        icon.put_pixel(0, i, frame);
        icon.put_pixel(23, i, frame);
    }
    theme.set_image("drag_icon", icon);

    theme
}
