#![forbid(unsafe_code)]

//! Core: input events, carousel configuration, and the engine boundary.
//!
//! # Role in reel
//! `reel-core` is the leaf layer. It owns the normalized input events the
//! keyboard router consumes, the immutable [`config::CarouselConfig`] a
//! carousel is built from, and the [`engine::ScrollEngine`] capability trait
//! that stands in for the external scroll/snap engine.
//!
//! # How it fits in the system
//! `reel-runtime` wraps a `ScrollEngine` in the adapter handle and its
//! listener table; `reel-widgets` builds the controller and controls on top.
//! Nothing here holds mutable state across calls.

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
#[cfg(feature = "tracing-json")]
pub mod logging;

pub use config::{Axis, CarouselConfig, EngineOptions, OptionValue, Orientation, PluginSpec};
pub use engine::{EngineEvent, EngineFactory, ScrollEngine, SnapPosition};
pub use error::{CarouselError, Result};
pub use event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerButton, PointerEvent,
    PointerEventKind,
};
