#![forbid(unsafe_code)]

//! Arrow-key routing for the carousel root container.
//!
//! The router sits on the root in the capture phase, so it sees a key before
//! any descendant does. `ArrowLeft` maps to `scroll_prev` and `ArrowRight`
//! to `scroll_next`; both prevent the browser's default scroll. Every other
//! key, and every key release, passes through untouched. The mapping is the
//! same in both orientations.

use std::fmt;
use std::rc::Rc;

use reel_core::event::{KeyCode, KeyEvent};

use crate::controller::CarouselHandle;

/// Event propagation phase a listener is installed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Capture,
    Bubble,
}

/// Navigation requested by a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Prev,
    Next,
}

/// Result of routing one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key was consumed; the host must prevent its default action.
    Handled(KeyAction),
    /// The key is not ours; let it through.
    Ignored,
}

impl KeyOutcome {
    /// Whether the host should call `preventDefault`.
    #[must_use]
    pub const fn default_prevented(self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

type NavCallback = Rc<dyn Fn()>;

/// Stateless key-to-navigation mapping.
#[derive(Clone)]
pub struct KeyboardRouter {
    scroll_prev: NavCallback,
    scroll_next: NavCallback,
}

impl fmt::Debug for KeyboardRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardRouter")
            .field("phase", &Self::PHASE)
            .finish_non_exhaustive()
    }
}

impl KeyboardRouter {
    /// The router listens in the capture phase.
    pub const PHASE: EventPhase = EventPhase::Capture;

    /// Route to arbitrary navigation callbacks.
    #[must_use]
    pub fn new(scroll_prev: impl Fn() + 'static, scroll_next: impl Fn() + 'static) -> Self {
        Self {
            scroll_prev: Rc::new(scroll_prev),
            scroll_next: Rc::new(scroll_next),
        }
    }

    /// Route to a carousel's navigation callbacks.
    #[must_use]
    pub fn for_carousel(handle: &CarouselHandle) -> Self {
        let prev = handle.clone();
        let next = handle.clone();
        Self::new(move || prev.scroll_prev(), move || next.scroll_next())
    }

    /// What `key` would do, without doing it.
    #[must_use]
    pub fn classify(key: &KeyEvent) -> Option<KeyAction> {
        if !key.is_down() {
            return None;
        }
        match key.code {
            KeyCode::Left => Some(KeyAction::Prev),
            KeyCode::Right => Some(KeyAction::Next),
            _ => None,
        }
    }

    /// Route one key event.
    pub fn handle_key(&self, key: &KeyEvent) -> KeyOutcome {
        let Some(action) = Self::classify(key) else {
            return KeyOutcome::Ignored;
        };
        tracing::debug!(
            message = "keyboard.route",
            key = %key.key_name(),
            action = ?action
        );
        match action {
            KeyAction::Prev => (self.scroll_prev)(),
            KeyAction::Next => (self.scroll_next)(),
        }
        KeyOutcome::Handled(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::event::{KeyEventKind, Modifiers};
    use std::cell::Cell;

    fn counting() -> (KeyboardRouter, Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let prev = Rc::new(Cell::new(0));
        let next = Rc::new(Cell::new(0));
        let p = Rc::clone(&prev);
        let n = Rc::clone(&next);
        let router = KeyboardRouter::new(move || p.set(p.get() + 1), move || n.set(n.get() + 1));
        (router, prev, next)
    }

    #[test]
    fn arrows_navigate_and_prevent_default() {
        let (router, prev, next) = counting();

        let out = router.handle_key(&KeyEvent::new(KeyCode::Right));
        assert_eq!(out, KeyOutcome::Handled(KeyAction::Next));
        assert!(out.default_prevented());
        assert_eq!((prev.get(), next.get()), (0, 1));

        let out = router.handle_key(&KeyEvent::new(KeyCode::Left));
        assert_eq!(out, KeyOutcome::Handled(KeyAction::Prev));
        assert_eq!((prev.get(), next.get()), (1, 1));
    }

    #[test]
    fn other_keys_pass_through() {
        let (router, prev, next) = counting();
        for code in [
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Enter,
            KeyCode::Tab,
            KeyCode::Char('l'),
            KeyCode::Home,
        ] {
            let out = router.handle_key(&KeyEvent::new(code));
            assert_eq!(out, KeyOutcome::Ignored);
            assert!(!out.default_prevented());
        }
        assert_eq!((prev.get(), next.get()), (0, 0));
    }

    #[test]
    fn release_is_ignored_and_repeat_routes() {
        let (router, _, next) = counting();
        let release = KeyEvent::new(KeyCode::Right).with_kind(KeyEventKind::Release);
        assert_eq!(router.handle_key(&release), KeyOutcome::Ignored);
        let repeat = KeyEvent::new(KeyCode::Right).with_kind(KeyEventKind::Repeat);
        assert!(router.handle_key(&repeat).default_prevented());
        assert_eq!(next.get(), 1);
    }

    #[test]
    fn modifiers_do_not_block_routing() {
        let (router, prev, _) = counting();
        let key = KeyEvent::new(KeyCode::Left).with_modifiers(Modifiers::SHIFT);
        assert!(router.handle_key(&key).default_prevented());
        assert_eq!(prev.get(), 1);
    }

    #[test]
    fn installs_in_capture_phase() {
        assert_eq!(KeyboardRouter::PHASE, EventPhase::Capture);
    }
}
