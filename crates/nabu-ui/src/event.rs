use nabu_engine::coords::Vec2;
use nabu_engine::input::{InputEvent, Key, KeyState, MouseButton, MouseButtonState};

pub use nabu_engine::input::Modifiers;

/// Pixels scrolled per wheel notch.
pub const WHEEL_LINE_HEIGHT: f32 = 20.0;

/// Input events routed to widgets.
///
/// Positions are surface-local logical pixels; `root` is the screen position.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Press {
        pos: Vec2,
        root: Vec2,
        button: MouseButton,
        modifiers: Modifiers,
        /// 1 single, 2 double, 3 triple.
        clicks: u8,
    },
    Release {
        pos: Vec2,
        root: Vec2,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Motion {
        pos: Vec2,
        root: Vec2,
        modifiers: Modifiers,
    },
    /// `delta` > 0 reveals content below; < 0 reveals content above.
    Scroll {
        pos: Vec2,
        delta: f32,
        modifiers: Modifiers,
    },
    KeyPress { key: Key, modifiers: Modifiers },
    KeyRelease { key: Key, modifiers: Modifiers },
    /// Pointer left the widget's surface.
    Leave,
    /// Keyboard focus moved elsewhere.
    FocusOut,
}

impl UiEvent {
    /// Converts a platform event. Modifier-only and focus-gain events have no
    /// widget counterpart.
    pub fn from_input(ev: &InputEvent) -> Option<UiEvent> {
        Some(match ev {
            InputEvent::ModifiersChanged(_) => return None,
            InputEvent::Focused { focused: true, .. } => return None,
            InputEvent::Focused { focused: false, .. } => UiEvent::FocusOut,
            InputEvent::PointerLeft { .. } => UiEvent::Leave,
            InputEvent::PointerMoved(m) => UiEvent::Motion { pos: m.pos, root: m.root, modifiers: m.modifiers },
            InputEvent::PointerButton(b) => match b.state {
                MouseButtonState::Pressed => UiEvent::Press {
                    pos: b.pos,
                    root: b.root,
                    button: b.button,
                    modifiers: b.modifiers,
                    clicks: b.click_count,
                },
                MouseButtonState::Released => UiEvent::Release {
                    pos: b.pos,
                    root: b.root,
                    button: b.button,
                    modifiers: b.modifiers,
                },
            },
            InputEvent::MouseWheel { pos, delta, modifiers, .. } => UiEvent::Scroll {
                pos: *pos,
                // Platform wheels report positive y for "away from user".
                delta: -delta.vertical_pixels(WHEEL_LINE_HEIGHT),
                modifiers: *modifiers,
            },
            InputEvent::Key { key, state, modifiers, .. } => match state {
                KeyState::Pressed => UiEvent::KeyPress { key: *key, modifiers: *modifiers },
                KeyState::Released => UiEvent::KeyRelease { key: *key, modifiers: *modifiers },
            },
        })
    }

    /// Pointer position for pointer events.
    pub fn pos(&self) -> Option<Vec2> {
        match self {
            UiEvent::Press { pos, .. }
            | UiEvent::Release { pos, .. }
            | UiEvent::Motion { pos, .. }
            | UiEvent::Scroll { pos, .. } => Some(*pos),
            _ => None,
        }
    }

    /// Same event with positions shifted by `-origin`.
    pub fn translated(&self, origin: Vec2) -> UiEvent {
        let mut ev = self.clone();
        match &mut ev {
            UiEvent::Press { pos, .. }
            | UiEvent::Release { pos, .. }
            | UiEvent::Motion { pos, .. }
            | UiEvent::Scroll { pos, .. } => *pos = *pos - origin,
            _ => {}
        }
        ev
    }
}

/// Result returned by [`Widget::on_event`](crate::widget::Widget::on_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled; stop routing.
    Consumed,
    /// Event was not handled; keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nabu_engine::input::{MouseWheelDelta, PointerButtonEvent, SurfaceId};

    #[test]
    fn wheel_up_scrolls_towards_start() {
        let ev = InputEvent::MouseWheel {
            surface: SurfaceId(1),
            pos: Vec2::zero(),
            delta: MouseWheelDelta::Line { x: 0.0, y: 1.0 },
            modifiers: Modifiers::NONE,
        };
        match UiEvent::from_input(&ev) {
            Some(UiEvent::Scroll { delta, .. }) => assert_eq!(delta, -WHEEL_LINE_HEIGHT),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn press_keeps_click_count() {
        let ev = InputEvent::PointerButton(PointerButtonEvent {
            surface: SurfaceId(1),
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            pos: Vec2::new(3.0, 4.0),
            root: Vec2::new(103.0, 104.0),
            modifiers: Modifiers::NONE,
            click_count: 2,
        });
        assert!(matches!(UiEvent::from_input(&ev), Some(UiEvent::Press { clicks: 2, .. })));
    }

    #[test]
    fn retargeted_press_lands_in_popup_coordinates() {
        let ev = InputEvent::PointerButton(PointerButtonEvent {
            surface: SurfaceId(1),
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            pos: Vec2::new(3.0, 4.0),
            root: Vec2::new(103.0, 104.0),
            modifiers: Modifiers::NONE,
            click_count: 1,
        });
        let popup = ev.retarget(SurfaceId(7), Vec2::new(100.0, 80.0));
        assert_eq!(popup.surface(), Some(SurfaceId(7)));
        assert!(matches!(
            UiEvent::from_input(&popup),
            Some(UiEvent::Press { pos, .. }) if pos == Vec2::new(3.0, 24.0)
        ));
    }

    #[test]
    fn translated_moves_only_local_position() {
        let ev = UiEvent::Motion { pos: Vec2::new(50.0, 60.0), root: Vec2::new(500.0, 600.0), modifiers: Modifiers::NONE };
        let t = ev.translated(Vec2::new(10.0, 20.0));
        assert_eq!(t, UiEvent::Motion { pos: Vec2::new(40.0, 40.0), root: Vec2::new(500.0, 600.0), modifiers: Modifiers::NONE });
    }
}
