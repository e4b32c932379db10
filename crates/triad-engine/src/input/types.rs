use std::fmt;

/// Keyboard key identifier.
///
/// Only keys the shell reacts to or echoes get named variants; everything
/// else is `Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    /// Letter key, always uppercase (`'A'..='Z'`).
    Letter(char),
    /// Digit row key (`0..=9`).
    Digit(u8),
    /// Function key (`1..=12`).
    Function(u8),

    /// Platform-dependent key not represented here.
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
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Mouse wheel delta.
///
/// `Line` corresponds to "scroll lines" style input; `Pixel` is high precision.
/// Positive `y` scrolls up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Vertical component regardless of unit.
    pub fn y(self) -> f32 {
        match self {
            MouseWheelDelta::Line { y, .. } | MouseWheelDelta::Pixel { y, .. } => y,
        }
    }
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// Stable platform code when available (e.g. scancode).
        code: u32,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    /// Cursor position in physical pixels, origin top-left.
    CursorMoved { x: f64, y: f64 },

    MouseButton {
        button: MouseButton,
        state: MouseButtonState,
    },

    MouseWheel(MouseWheelDelta),

    /// Framebuffer size changed, in physical pixels.
    Resized { width: u32, height: u32 },
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Letter(c) => write!(f, "{c}"),
            Key::Digit(d) => write!(f, "{d}"),
            Key::Function(n) => write!(f, "F{n}"),
            Key::Unknown(code) => write!(f, "Unknown({code})"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display() {
        assert_eq!(Key::Letter('V').to_string(), "V");
        assert_eq!(Key::Digit(7).to_string(), "7");
        assert_eq!(Key::Function(11).to_string(), "F11");
        assert_eq!(Key::Escape.to_string(), "Escape");
        assert_eq!(Key::Unknown(99).to_string(), "Unknown(99)");
    }

    #[test]
    fn wheel_y_ignores_unit() {
        assert_eq!(MouseWheelDelta::Line { x: 0.0, y: -1.0 }.y(), -1.0);
        assert_eq!(MouseWheelDelta::Pixel { x: 3.0, y: 12.5 }.y(), 12.5);
    }
}
