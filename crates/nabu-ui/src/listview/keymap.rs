use nabu_engine::input::{Key, Modifiers};

/// Keyboard commands understood by a list.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ListAction {
    First,
    Last,
    Prev,
    Next,
    PageUp,
    PageDown,
    ExtendPrev,
    ExtendNext,
    ExtendFirst,
    ExtendLast,
    SelectAll,
    Delete,
    Activate,
}

pub fn action_for(key: Key, mods: Modifiers) -> Option<ListAction> {
    use ListAction::*;
    let plain = !mods.shift && !mods.ctrl && !mods.alt && !mods.meta;
    let shift_only = mods.shift && !mods.ctrl && !mods.alt && !mods.meta;
    let ctrl_only = mods.ctrl && !mods.shift && !mods.alt && !mods.meta;

    Some(match key {
        Key::Home if plain => First,
        Key::End if plain => Last,
        Key::ArrowUp if plain => Prev,
        Key::ArrowDown if plain => Next,
        Key::PageUp if plain => PageUp,
        Key::PageDown if plain => PageDown,
        Key::Delete if plain => Delete,
        Key::Enter if plain => Activate,
        Key::ArrowUp if shift_only => ExtendPrev,
        Key::ArrowDown if shift_only => ExtendNext,
        Key::Home if shift_only => ExtendFirst,
        Key::End if shift_only => ExtendLast,
        Key::Char('A') if ctrl_only => SelectAll,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_select_variant() {
        assert_eq!(action_for(Key::ArrowUp, Modifiers::NONE), Some(ListAction::Prev));
        assert_eq!(action_for(Key::ArrowUp, Modifiers::SHIFT), Some(ListAction::ExtendPrev));
        assert_eq!(action_for(Key::ArrowUp, Modifiers::CTRL), None);
        assert_eq!(action_for(Key::Char('A'), Modifiers::CTRL), Some(ListAction::SelectAll));
        assert_eq!(action_for(Key::Char('A'), Modifiers::NONE), None);
        assert_eq!(action_for(Key::Enter, Modifiers::NONE), Some(ListAction::Activate));
    }
}
