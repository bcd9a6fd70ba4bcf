#![forbid(unsafe_code)]

//! Canonical input event types.
//!
//! These are the events a carousel root container and its controls receive
//! from the host page. All events derive `Clone`, `PartialEq`, and `Eq` for
//! use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when the host cannot distinguish it
//! - `Modifiers` use bitflags for easy combination
//! - Pointer events carry no coordinates: hit testing is done by the host,
//!   which delivers the event to the element that was hit

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer (mouse, pen, touch) event.
    Pointer(PointerEvent),

    /// Focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this event is a press or an auto-repeat (not a release).
    #[must_use]
    pub const fn is_down(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }

    /// DOM-style key name, as reported by `KeyboardEvent.key` in a browser.
    #[must_use]
    pub fn key_name(&self) -> String {
        self.code.key_name()
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

impl KeyCode {
    /// DOM-style key name (`"ArrowLeft"`, `"Enter"`, `"a"`, ...).
    #[must_use]
    pub fn key_name(self) -> String {
        match self {
            Self::Char(' ') => " ".to_string(),
            Self::Char(c) => c.to_string(),
            Self::Enter => "Enter".to_string(),
            Self::Escape => "Escape".to_string(),
            Self::Backspace => "Backspace".to_string(),
            Self::Tab => "Tab".to_string(),
            Self::Home => "Home".to_string(),
            Self::End => "End".to_string(),
            Self::PageUp => "PageUp".to_string(),
            Self::PageDown => "PageDown".to_string(),
            Self::Up => "ArrowUp".to_string(),
            Self::Down => "ArrowDown".to_string(),
            Self::Left => "ArrowLeft".to_string(),
            Self::Right => "ArrowRight".to_string(),
        }
    }

    /// Parse a DOM-style key name. Single characters map to [`KeyCode::Char`].
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        let code = match name {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Backspace" => Self::Backspace,
            "Tab" => Self::Tab,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event delivered to the element that was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// Button involved in the event.
    pub button: PointerButton,
}

impl PointerEvent {
    /// Primary-button press.
    #[must_use]
    pub const fn down() -> Self {
        Self {
            kind: PointerEventKind::Down,
            button: PointerButton::Primary,
        }
    }

    /// Primary-button click (press followed by release on the same target).
    #[must_use]
    pub const fn click() -> Self {
        Self {
            kind: PointerEventKind::Click,
            button: PointerButton::Primary,
        }
    }

    /// Replace the button.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed down.
    Down,
    /// Button released.
    Up,
    /// Press and release on the same target.
    Click,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, pen tip, or touch contact.
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button.
    Auxiliary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_use_dom_names() {
        assert_eq!(KeyEvent::new(KeyCode::Left).key_name(), "ArrowLeft");
        assert_eq!(KeyEvent::new(KeyCode::Right).key_name(), "ArrowRight");
        assert_eq!(KeyCode::Char('x').key_name(), "x");
    }

    #[test]
    fn key_name_parses_back() {
        for code in [
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Enter,
            KeyCode::Char('q'),
            KeyCode::Char(' '),
        ] {
            assert_eq!(KeyCode::from_key_name(&code.key_name()), Some(code));
        }
        assert_eq!(KeyCode::from_key_name("Esc"), Some(KeyCode::Escape));
        assert_eq!(KeyCode::from_key_name("NotAKey"), None);
        assert_eq!(KeyCode::from_key_name(""), None);
    }

    #[test]
    fn release_is_not_down() {
        let key = KeyEvent::new(KeyCode::Right);
        assert!(key.is_down());
        assert!(key.with_kind(KeyEventKind::Repeat).is_down());
        assert!(!key.with_kind(KeyEventKind::Release).is_down());
    }

    #[test]
    fn modifiers_combine() {
        let key = KeyEvent::new(KeyCode::Left).with_modifiers(Modifiers::SHIFT | Modifiers::CTRL);
        assert!(key.modifiers.contains(Modifiers::SHIFT));
        assert!(key.modifiers.contains(Modifiers::CTRL));
        assert!(!key.modifiers.contains(Modifiers::ALT));
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    #[test]
    fn pointer_constructors() {
        assert_eq!(PointerEvent::down().kind, PointerEventKind::Down);
        assert_eq!(PointerEvent::click().button, PointerButton::Primary);
        let aux = PointerEvent::down().with_button(PointerButton::Auxiliary);
        assert_eq!(aux.button, PointerButton::Auxiliary);
    }
}
