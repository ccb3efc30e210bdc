//! Input events delivered to tools and handlers.
//!
//! Positions are drawing-pad points already snapped to the tile grid by the
//! caller.

use classicyou_core::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Z,
    Y,
    C,
    V,
    R,
    Delete,
    Escape,
    PageUp,
    PageDown,
}

/// Modifier keys held while an event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
    };

    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
        alt: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolEvent {
    MouseDown { button: MouseButton, tile: Vec2 },
    MouseMove { tile: Vec2 },
    MouseUp { button: MouseButton, tile: Vec2 },
    KeyPressed(KeyCode),
}

impl ToolEvent {
    /// Tile the pointer is on, for mouse events.
    pub fn tile(&self) -> Option<Vec2> {
        match self {
            Self::MouseDown { tile, .. } | Self::MouseMove { tile } | Self::MouseUp { tile, .. } => {
                Some(*tile)
            }
            Self::KeyPressed(_) => None,
        }
    }
}

/// One frame of input as seen by the level editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputFrame {
    pub event: ToolEvent,
    pub modifiers: Modifiers,
    /// The pointer is over a UI widget; world tools must ignore clicks.
    pub ui_wants_pointer: bool,
}

impl InputFrame {
    pub fn new(event: ToolEvent) -> Self {
        Self {
            event,
            modifiers: Modifiers::NONE,
            ui_wants_pointer: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn over_ui(mut self) -> Self {
        self.ui_wants_pointer = true;
        self
    }
}
