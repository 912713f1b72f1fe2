//! Platform-agnostic input types.
//!
//! Provides pointer, modifier, scroll and keyboard types consumed by the
//! editor without depending on any windowing crate.

use crate::math::Vec2;

/// Mouse / pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Only Ctrl held.
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
        alt: false,
    };

    /// Ctrl and Shift held.
    pub const CTRL_SHIFT: Self = Self {
        ctrl: true,
        shift: true,
        alt: false,
    };
}

/// Scroll wheel movement for one event, in notches. Positive is away from
/// the user (zoom in).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDelta {
    pub lines: Vec2,
}

impl ScrollDelta {
    /// Vertical scroll of `lines` notches.
    pub fn vertical(lines: f32) -> Self {
        Self {
            lines: Vec2::new(0.0, lines),
        }
    }
}

/// Physical keyboard key identifier.
///
/// Matches common physical key positions (US QWERTY layout names).
/// Platform layers (e.g. winit) map their native key codes to this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum KeyCode {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Digits
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Modifiers
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    SuperLeft,
    SuperRight,

    // Arrows
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Common keys
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,

    // Punctuation / symbols
    Minus,
    Equal,
    BracketLeft,
    BracketRight,
    Backslash,
    Semicolon,
    Quote,
    Backquote,
    Comma,
    Period,
    Slash,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_presets() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        assert!(Modifiers::CTRL.ctrl && !Modifiers::CTRL.shift);
        assert!(Modifiers::CTRL_SHIFT.ctrl && Modifiers::CTRL_SHIFT.shift);
    }

    #[test]
    fn vertical_scroll() {
        let delta = ScrollDelta::vertical(-1.0);
        assert_eq!(delta.lines.x, 0.0);
        assert_eq!(delta.lines.y, -1.0);
    }
}
