//! Property tests for DOM key names.

use proptest::prelude::*;
use reel_core::event::{KeyCode, KeyEvent};

fn named() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        Just(KeyCode::Enter),
        Just(KeyCode::Escape),
        Just(KeyCode::Backspace),
        Just(KeyCode::Tab),
        Just(KeyCode::Home),
        Just(KeyCode::End),
        Just(KeyCode::PageUp),
        Just(KeyCode::PageDown),
        Just(KeyCode::Up),
        Just(KeyCode::Down),
        Just(KeyCode::Left),
        Just(KeyCode::Right),
    ]
}

fn key_code() -> impl Strategy<Value = KeyCode> {
    prop_oneof![named(), any::<char>().prop_map(KeyCode::Char)]
}

proptest! {
    #[test]
    fn key_names_parse_back(code in key_code()) {
        prop_assert_eq!(KeyCode::from_key_name(&code.key_name()), Some(code));
        prop_assert_eq!(KeyEvent::new(code).key_name(), code.key_name());
    }

    #[test]
    fn unknown_multi_char_names_are_rejected(name in "[a-z]{2,12}") {
        prop_assert_eq!(KeyCode::from_key_name(&name), None);
    }
}

#[test]
fn escape_alias_is_accepted() {
    assert_eq!(KeyCode::from_key_name("Esc"), Some(KeyCode::Escape));
    assert_eq!(KeyCode::from_key_name(""), None);
}
