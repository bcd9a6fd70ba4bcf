#![forbid(unsafe_code)]

//! Track and slide containers.

use reel_core::error::Result;

use crate::controller::CarouselHandle;
use crate::view::{Element, ViewNode};

/// The scrolling viewport and its inner track.
///
/// Only the track receives caller classes; the viewport is the element the
/// engine measures and always clips.
#[derive(Debug, Clone)]
pub struct Content {
    class: String,
}

impl Content {
    /// Requires a live carousel.
    pub fn new(handle: &CarouselHandle) -> Result<Self> {
        handle.ensure_live("Content")?;
        Ok(Self {
            class: String::new(),
        })
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Viewport wrapping a track of `items`.
    #[must_use]
    pub fn render(&self, items: impl IntoIterator<Item = ViewNode>) -> Element {
        Element::new("div").class("overflow-hidden").child(
            Element::new("div")
                .class("flex")
                .class(&self.class)
                .children(items),
        )
    }
}

/// One slide.
#[derive(Debug, Clone, Default)]
pub struct Item {
    class: String,
}

impl Item {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    #[must_use]
    pub fn render(&self, children: impl IntoIterator<Item = ViewNode>) -> Element {
        Element::new("div")
            .class("min-w-0 shrink-0 grow-0 basis-full")
            .class(&self.class)
            .attr("role", "group")
            .attr("aria-roledescription", "slide")
            .children(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Carousel;
    use reel_core::config::{CarouselConfig, Orientation};
    use reel_core::engine::EngineFactory;
    use reel_core::error::CarouselError;
    use reel_harness::SimEngineFactory;
    use std::rc::Rc;

    #[test]
    fn track_nests_inside_clipping_viewport() {
        let factory: Rc<dyn EngineFactory> = Rc::new(SimEngineFactory::new(2));
        let carousel = Carousel::mount(CarouselConfig::new(Orientation::Horizontal), factory);
        let content = Content::new(&carousel.handle()).expect("live").class("-ml-4");
        let el = content.render([ViewNode::from(Item::new().class("pl-4").render([]))]);

        assert_eq!(el.class_name(), "overflow-hidden");
        let track = el.child_elements().next().expect("track");
        assert_eq!(track.class_name(), "flex -ml-4");
        let slide = track.child_elements().next().expect("slide");
        assert_eq!(slide.get_attr("role"), Some("group"));
        assert_eq!(slide.get_attr("aria-roledescription"), Some("slide"));
        assert_eq!(slide.class_name(), "min-w-0 shrink-0 grow-0 basis-full pl-4");
    }

    #[test]
    fn content_requires_live_carousel() {
        let factory: Rc<dyn EngineFactory> = Rc::new(SimEngineFactory::new(2));
        let carousel = Carousel::mount(CarouselConfig::new(Orientation::Horizontal), factory);
        let handle = carousel.handle();
        carousel.unmount();
        assert_eq!(
            Content::new(&handle).unwrap_err(),
            CarouselError::OutsideCarousel {
                component: "Content"
            }
        );
    }
}
