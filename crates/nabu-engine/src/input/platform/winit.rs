use std::time::Instant;

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::Window;

use crate::coords::Vec2;
use crate::input::{
    InputEvent, InputState, Key, KeyState, Modifiers, MouseButton, MouseButtonState,
    MouseWheelDelta, PointerButtonEvent, PointerMoveEvent, SurfaceId,
};

/// Surface id for a winit window.
#[inline]
pub fn surface_id(window: &Window) -> SurfaceId {
    SurfaceId(u64::from(window.id()))
}

/// Screen position of the window's client area in logical pixels.
///
/// Platforms that hide window placement (Wayland) report the origin.
pub fn surface_origin(window: &Window) -> Vec2 {
    match window.inner_position() {
        Ok(p) => {
            let logical = p.to_logical::<f64>(window.scale_factor());
            Vec2::new(logical.x as f32, logical.y as f32)
        }
        Err(_) => Vec2::zero(),
    }
}

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// `state` supplies modifiers and the pointer position for events that do not
/// carry them, and counts click sequences. Callers apply the returned event
/// back with [`InputState::apply_event`].
///
/// Returns `None` for events the toolkit does not consume.
pub fn translate_window_event(
    window: &Window,
    state: &mut InputState,
    event: &WindowEvent,
    now: Instant,
) -> Option<InputEvent> {
    let surface = surface_id(window);

    match event {
        WindowEvent::ModifiersChanged(m) => Some(InputEvent::ModifiersChanged(map_modifiers(m.state()))),

        WindowEvent::Focused(focused) => Some(InputEvent::Focused { surface, focused: *focused }),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft { surface }),

        WindowEvent::CursorMoved { position, .. } => {
            let pos = to_logical(window, *position);
            Some(InputEvent::PointerMoved(PointerMoveEvent {
                surface,
                pos,
                root: pos + surface_origin(window),
                modifiers: state.modifiers,
            }))
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            let button = map_mouse_button(*button);

            // winit 0.30 has no cursor query; use the tracked position.
            let pos = match state.pointer {
                Some((s, pos, _)) if s == surface => pos,
                _ => Vec2::zero(),
            };
            let root = pos + surface_origin(window);

            let (st, click_count) = match st {
                ElementState::Pressed => {
                    (MouseButtonState::Pressed, state.register_press(button, root, now))
                }
                ElementState::Released => (MouseButtonState::Released, 1),
            };

            Some(InputEvent::PointerButton(PointerButtonEvent {
                surface,
                button,
                state: st,
                pos,
                root,
                modifiers: state.modifiers,
                click_count,
            }))
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let delta = match delta {
                MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x: *x, y: *y },
                MouseScrollDelta::PixelDelta(p) => {
                    let v = to_logical(window, *p);
                    MouseWheelDelta::Pixel { x: v.x, y: v.y }
                }
            };
            let pos = match state.pointer {
                Some((s, pos, _)) if s == surface => pos,
                _ => Vec2::zero(),
            };
            Some(InputEvent::MouseWheel { surface, pos, delta, modifiers: state.modifiers })
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let st = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                surface,
                key: map_key(event.physical_key),
                state: st,
                modifiers: state.modifiers,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> Vec2 {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    Vec2::new(logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(8),
        WinitMouseButton::Forward => MouseButton::Other(9),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = pk else {
        return Key::Unknown(0);
    };

    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Space => Key::Space,

        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

        KeyCode::KeyA => Key::Char('A'),
        KeyCode::KeyB => Key::Char('B'),
        KeyCode::KeyC => Key::Char('C'),
        KeyCode::KeyD => Key::Char('D'),
        KeyCode::KeyE => Key::Char('E'),
        KeyCode::KeyF => Key::Char('F'),
        KeyCode::KeyG => Key::Char('G'),
        KeyCode::KeyH => Key::Char('H'),
        KeyCode::KeyI => Key::Char('I'),
        KeyCode::KeyJ => Key::Char('J'),
        KeyCode::KeyK => Key::Char('K'),
        KeyCode::KeyL => Key::Char('L'),
        KeyCode::KeyM => Key::Char('M'),
        KeyCode::KeyN => Key::Char('N'),
        KeyCode::KeyO => Key::Char('O'),
        KeyCode::KeyP => Key::Char('P'),
        KeyCode::KeyQ => Key::Char('Q'),
        KeyCode::KeyR => Key::Char('R'),
        KeyCode::KeyS => Key::Char('S'),
        KeyCode::KeyT => Key::Char('T'),
        KeyCode::KeyU => Key::Char('U'),
        KeyCode::KeyV => Key::Char('V'),
        KeyCode::KeyW => Key::Char('W'),
        KeyCode::KeyX => Key::Char('X'),
        KeyCode::KeyY => Key::Char('Y'),
        KeyCode::KeyZ => Key::Char('Z'),

        other => Key::Unknown(other as u32),
    }
}

#[cfg(test)]
mod tests {
    use winit::keyboard::NativeKeyCode;

    use super::*;

    #[test]
    fn letter_keys_map_to_uppercase_chars() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyA)), Key::Char('A'));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyZ)), Key::Char('Z'));
    }

    #[test]
    fn navigation_keys_are_named() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::NumpadEnter)), Key::Enter);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::PageDown)), Key::PageDown);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ArrowUp)), Key::ArrowUp);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ControlRight)), Key::Control);
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::F5)), Key::Unknown(_)));
        assert_eq!(map_key(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)), Key::Unknown(0));
    }

    #[test]
    fn modifier_state_maps_each_flag() {
        assert_eq!(map_modifiers(ModifiersState::empty()), Modifiers::NONE);
        assert_eq!(map_modifiers(ModifiersState::CONTROL), Modifiers::CTRL);
        let all = map_modifiers(ModifiersState::SHIFT | ModifiersState::ALT | ModifiersState::SUPER);
        assert_eq!(all, Modifiers { shift: true, ctrl: false, alt: true, meta: true });
    }

    #[test]
    fn mouse_buttons_keep_extra_buttons_distinct() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(map_mouse_button(WinitMouseButton::Right), MouseButton::Right);
        assert_eq!(map_mouse_button(WinitMouseButton::Back), MouseButton::Other(8));
        assert_eq!(map_mouse_button(WinitMouseButton::Other(12)), MouseButton::Other(12));
    }
}
