#![cfg(feature = "serde")]

//! Carousel configs arrive from the page layer as JSON documents.
//!
//! Run:
//!   cargo test -p reel-core --features serde --test config_documents

use reel_core::config::{Axis, CarouselConfig, OptionValue, Orientation};

#[test]
fn empty_document_is_default_config() {
    let config: CarouselConfig = serde_json::from_str("{}").expect("parse");
    assert_eq!(config, CarouselConfig::default());
    assert_eq!(config.orientation, Orientation::Horizontal);
}

#[test]
fn partial_document_parses_known_and_opaque_options() {
    let doc = r#"{
        "orientation": "vertical",
        "opts": { "loop": true, "startIndex": 2, "align": "start", "duration": 25 },
        "plugins": [ { "name": "autoplay", "options": { "delay": 4000 } } ]
    }"#;
    let config: CarouselConfig = serde_json::from_str(doc).expect("parse");
    assert_eq!(config.orientation, Orientation::Vertical);
    assert!(config.options.loop_around);
    assert_eq!(config.options.start_index, 2);
    assert_eq!(
        config.options.extra.get("align"),
        Some(&OptionValue::Text("start".into()))
    );
    assert_eq!(config.options.extra.get("duration"), Some(&OptionValue::Int(25)));
    assert_eq!(config.plugins.len(), 1);
    assert_eq!(config.plugins[0].name, "autoplay");
    assert_eq!(config.engine_options().axis, Axis::Y);
}

#[test]
fn unknown_orientation_is_rejected() {
    let result = serde_json::from_str::<CarouselConfig>(r#"{ "orientation": "diagonal" }"#);
    assert!(result.is_err());
}
