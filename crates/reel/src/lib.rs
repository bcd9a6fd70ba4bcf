#![forbid(unsafe_code)]

//! reel public facade crate.
//!
//! Re-exports the carousel surface from the internal crates and offers a
//! prelude for day-to-day use. Bring your own scroll engine by
//! implementing [`ScrollEngine`] and an [`EngineFactory`].

// --- Core re-exports -------------------------------------------------------

pub use reel_core::config::{Axis, CarouselConfig, EngineOptions, OptionValue, Orientation, PluginSpec};
pub use reel_core::engine::{EngineEvent, EngineFactory, ScrollEngine, SnapPosition};
pub use reel_core::error::{CarouselError, Result};
pub use reel_core::event::{KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerEvent};

// --- Runtime re-exports ----------------------------------------------------

pub use reel_runtime::{CarouselId, Disposer, DisposerBag, EngineApi, Observable, Subscription};

// --- Widget re-exports -----------------------------------------------------

pub use reel_widgets::{
    Applied, ButtonSize, ButtonVariant, Carousel, CarouselHandle, CarouselState, Content, Dots, Element,
    Item, KeyOutcome, NavButton, Node, View, render_tree,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Carousel, CarouselConfig, CarouselError, CarouselHandle, CarouselState, Dots, EngineApi,
        EngineFactory, KeyCode, KeyEvent, NavButton, Node, Orientation, Result, ScrollEngine, View,
    };

    pub use crate::{core, runtime, widgets};
}

pub use reel_core as core;
pub use reel_runtime as runtime;
pub use reel_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use reel_harness::SimEngineFactory;
    use std::rc::Rc;

    #[test]
    fn prelude_covers_a_basic_page() {
        let factory: Rc<dyn EngineFactory> = Rc::new(SimEngineFactory::new(3));
        let carousel = Carousel::mount(CarouselConfig::new(Orientation::Horizontal), factory);
        let tree = Node::carousel(
            &carousel,
            vec![
                Node::content(vec![Node::item(vec![Node::text("a")])]),
                Node::next(),
            ],
        );
        let html = match crate::render_tree(&tree).expect("render") {
            widgets::ViewNode::Element(e) => e.to_html(),
            widgets::ViewNode::Text(t) => t,
        };
        assert!(html.starts_with("<div class=\"relative\" role=\"region\""));
        assert!(html.contains("Next slide"));
    }
}
