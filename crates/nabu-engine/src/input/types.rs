use std::fmt;

use crate::coords::Vec2;

/// Identity of the surface (toplevel window, popup window) an event landed on.
///
/// Popup routing depends on this: the router decides between "inside a
/// popup", "inside another window we own" and "foreign" purely by surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SurfaceId(pub u64);

/// Keyboard key identifier.
///
/// Only the keys the toolkit binds are named; everything else maps to
/// `Unknown` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    /// Letter keys, uppercase ASCII.
    Char(char),

    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false, meta: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false, alt: false, meta: false };
    pub const CTRL: Modifiers = Modifiers { shift: false, ctrl: true, alt: false, meta: false };

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Mouse wheel delta. `Line` is notched wheel input, `Pixel` is touchpad.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Vertical component in pixels, positive = content moves down (scroll up).
    pub fn vertical_pixels(&self, line_height: f32) -> f32 {
        match *self {
            MouseWheelDelta::Line { y, .. } => y * line_height,
            MouseWheelDelta::Pixel { y, .. } => y,
        }
    }
}

/// Pointer move in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub surface: SurfaceId,
    /// Surface-local position.
    pub pos: Vec2,
    /// Screen position.
    pub root: Vec2,
    pub modifiers: Modifiers,
}

/// Pointer button transition.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub surface: SurfaceId,
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub pos: Vec2,
    pub root: Vec2,
    pub modifiers: Modifiers,
    /// 1 for a single press, 2 for a double press, 3 for a triple press.
    /// Always 1 on release.
    pub click_count: u8,
}

/// Platform-agnostic input events.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        surface: SurfaceId,
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    MouseWheel {
        surface: SurfaceId,
        pos: Vec2,
        delta: MouseWheelDelta,
        modifiers: Modifiers,
    },

    PointerLeft { surface: SurfaceId },

    Focused { surface: SurfaceId, focused: bool },
}

impl InputEvent {
    /// Surface the event targets, if it has one.
    pub fn surface(&self) -> Option<SurfaceId> {
        match self {
            InputEvent::ModifiersChanged(_) => None,
            InputEvent::Key { surface, .. }
            | InputEvent::MouseWheel { surface, .. }
            | InputEvent::PointerLeft { surface }
            | InputEvent::Focused { surface, .. } => Some(*surface),
            InputEvent::PointerMoved(m) => Some(m.surface),
            InputEvent::PointerButton(b) => Some(b.surface),
        }
    }

    /// Same event re-targeted at `surface`, with local coordinates derived
    /// from the root position and the surface's screen origin.
    pub fn retarget(&self, surface: SurfaceId, origin: Vec2) -> InputEvent {
        let mut ev = self.clone();
        match &mut ev {
            InputEvent::ModifiersChanged(_) => {}
            InputEvent::Key { surface: s, .. }
            | InputEvent::PointerLeft { surface: s }
            | InputEvent::Focused { surface: s, .. } => *s = surface,
            InputEvent::MouseWheel { surface: s, .. } => *s = surface,
            InputEvent::PointerMoved(m) => {
                m.surface = surface;
                m.pos = m.root - origin;
            }
            InputEvent::PointerButton(b) => {
                b.surface = surface;
                b.pos = b.root - origin;
            }
        }
        ev
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
