use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::coords::Vec2;

use super::types::{
    InputEvent, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
    SurfaceId,
};

/// Presses of the same button closer than this in time count as one click sequence.
pub const DOUBLE_CLICK_TIME: Duration = Duration::from_millis(400);
/// ... and closer than this in Manhattan distance (logical px).
pub const DOUBLE_CLICK_DISTANCE: f32 = 4.0;

#[derive(Debug, Copy, Clone)]
struct LastPress {
    button: MouseButton,
    root: Vec2,
    at: Instant,
    count: u8,
}

/// Process-wide input state shared by all surfaces.
///
/// Tracks modifiers, the pointer, held buttons and click sequences. Platform
/// adapters read it to fill in fields their native events lack.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    /// Surface holding keyboard focus.
    pub focused: Option<SurfaceId>,

    /// Surface under the pointer plus local and root positions.
    pub pointer: Option<(SurfaceId, Vec2, Vec2)>,

    pub buttons_down: HashSet<MouseButton>,

    last_press: Option<LastPress>,
}

impl InputState {
    /// Counts a press into the current click sequence and returns its count
    /// (1, 2 or 3; a fourth press starts over).
    pub fn register_press(&mut self, button: MouseButton, root: Vec2, now: Instant) -> u8 {
        let count = match self.last_press {
            Some(last)
                if last.button == button
                    && last.count < 3
                    && now.saturating_duration_since(last.at) <= DOUBLE_CLICK_TIME
                    && last.root.manhattan(root) <= DOUBLE_CLICK_DISTANCE =>
            {
                last.count + 1
            }
            _ => 1,
        };
        self.last_press = Some(LastPress { button, root, at: now, count });
        count
    }

    /// Applies a translated event to the persistent state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused { surface, focused } => {
                if *focused {
                    self.focused = Some(*surface);
                } else if self.focused == Some(*surface) {
                    // Avoid stuck buttons when focus leaves mid-press.
                    self.focused = None;
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { surface, pos, root, .. }) => {
                self.pointer = Some((*surface, *pos, *root));
            }

            InputEvent::PointerLeft { surface } => {
                if self.pointer.is_some_and(|(s, _, _)| s == *surface) {
                    self.pointer = None;
                }
            }

            InputEvent::Key { modifiers, .. } | InputEvent::MouseWheel { modifiers, .. } => {
                self.modifiers = *modifiers;
            }

            InputEvent::PointerButton(PointerButtonEvent {
                surface,
                button,
                state,
                pos,
                root,
                modifiers,
                ..
            }) => {
                self.pointer = Some((*surface, *pos, *root));
                self.modifiers = *modifiers;
                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }
        }
    }
}
