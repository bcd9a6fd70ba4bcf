#![forbid(unsafe_code)]

//! Previous/Next navigation buttons.
//!
//! Both are pure consumers of the controller's boundary flags and
//! navigation callbacks. They hold no state and install no listeners: the
//! disabled flag is read from the handle every time the button renders or
//! is clicked.

use reel_core::config::Orientation;
use reel_core::error::Result;

use crate::View;
use crate::controller::CarouselHandle;
use crate::view::{Action, Element, Trigger};

/// Which way a button navigates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    const fn component(self) -> &'static str {
        match self {
            Self::Previous => "Previous",
            Self::Next => "Next",
        }
    }

    /// Screen-reader label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Previous => "Previous slide",
            Self::Next => "Next slide",
        }
    }

    const fn action(self) -> Action {
        match self {
            Self::Previous => Action::ScrollPrev,
            Self::Next => Action::ScrollNext,
        }
    }

    const fn icon(self) -> &'static str {
        match self {
            Self::Previous => "arrow-left",
            Self::Next => "arrow-right",
        }
    }

    /// Placement classes relative to the track.
    const fn position(self, orientation: Orientation) -> &'static str {
        match (self, orientation) {
            (Self::Previous, Orientation::Horizontal) => "-left-12 top-1/2 -translate-y-1/2",
            (Self::Previous, Orientation::Vertical) => "-top-12 left-1/2 -translate-x-1/2 rotate-90",
            (Self::Next, Orientation::Horizontal) => "-right-12 top-1/2 -translate-y-1/2",
            (Self::Next, Orientation::Vertical) => "-bottom-12 left-1/2 -translate-x-1/2 rotate-90",
        }
    }
}

/// Button visual variant, passed through to the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonVariant {
    Default,
    #[default]
    Outline,
    Ghost,
    Secondary,
}

impl ButtonVariant {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Outline => "outline",
            Self::Ghost => "ghost",
            Self::Secondary => "secondary",
        }
    }
}

/// Button size, passed through to the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonSize {
    Default,
    Sm,
    Lg,
    #[default]
    Icon,
}

impl ButtonSize {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Sm => "sm",
            Self::Lg => "lg",
            Self::Icon => "icon",
        }
    }
}

/// A directional navigation button.
#[derive(Debug, Clone)]
pub struct NavButton {
    handle: CarouselHandle,
    direction: Direction,
    variant: ButtonVariant,
    size: ButtonSize,
    class: String,
}

impl NavButton {
    /// Mount a button. Fails if the carousel is not live.
    pub fn new(handle: &CarouselHandle, direction: Direction) -> Result<Self> {
        handle.ensure_live(direction.component())?;
        Ok(Self {
            handle: handle.clone(),
            direction,
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            class: String::new(),
        })
    }

    /// Mount a "previous slide" button.
    pub fn previous(handle: &CarouselHandle) -> Result<Self> {
        Self::new(handle, Direction::Previous)
    }

    /// Mount a "next slide" button.
    pub fn next(handle: &CarouselHandle) -> Result<Self> {
        Self::new(handle, Direction::Next)
    }

    #[must_use]
    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    /// Extra classes, appended after the placement classes.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Disabled exactly when navigation in this direction is impossible.
    ///
    /// # Panics
    ///
    /// Panics if the carousel is gone.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        match self.direction {
            Direction::Previous => !self.handle.can_scroll_prev(),
            Direction::Next => !self.handle.can_scroll_next(),
        }
    }

    /// Activate the button. Returns whether navigation was requested;
    /// clicking a disabled button, or one whose carousel is gone, does
    /// nothing.
    pub fn click(&self) -> bool {
        if !self.handle.is_live() || self.is_disabled() {
            return false;
        }
        match self.direction {
            Direction::Previous => self.handle.scroll_prev(),
            Direction::Next => self.handle.scroll_next(),
        }
        true
    }
}

impl View for NavButton {
    fn view(&self) -> Element {
        let orientation = self.handle.orientation();
        let disabled = self.is_disabled();
        Element::new("button")
            .class("absolute h-8 w-8 rounded-full")
            .class(self.direction.position(orientation))
            .class(&self.class)
            .attr("type", "button")
            .attr("data-variant", self.variant.as_str())
            .attr("data-size", self.size.as_str())
            .flag("disabled", disabled)
            .bind(Trigger::Click, self.direction.action())
            .child(
                Element::new("svg")
                    .class("h-4 w-4")
                    .attr("data-icon", self.direction.icon())
                    .attr("aria-hidden", "true"),
            )
            .child(
                Element::new("span")
                    .class("sr-only")
                    .text(self.direction.label()),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Carousel;
    use reel_core::config::CarouselConfig;
    use reel_core::engine::EngineFactory;
    use reel_core::error::CarouselError;
    use reel_harness::{Command, SimEngineFactory};
    use std::rc::Rc;

    fn mounted(orientation: Orientation, slides: usize) -> (Carousel, Rc<SimEngineFactory>) {
        let factory = Rc::new(SimEngineFactory::new(slides));
        let carousel = Carousel::mount(
            CarouselConfig::new(orientation),
            Rc::clone(&factory) as Rc<dyn EngineFactory>,
        );
        (carousel, factory)
    }

    #[test]
    fn previous_disabled_at_start() {
        let (carousel, _) = mounted(Orientation::Horizontal, 3);
        let prev = NavButton::previous(&carousel.handle()).expect("mount");
        let next = NavButton::next(&carousel.handle()).expect("mount");
        assert!(prev.is_disabled());
        assert!(!next.is_disabled());
        assert!(prev.view().has_attr("disabled"));
        assert!(!next.view().has_attr("disabled"));
    }

    #[test]
    fn disabled_click_is_noop() {
        let (carousel, factory) = mounted(Orientation::Horizontal, 3);
        let prev = NavButton::previous(&carousel.handle()).expect("mount");
        assert!(!prev.click());
        assert!(factory.last_control().commands().is_empty());
    }

    #[test]
    fn click_after_unmount_is_noop() {
        let (carousel, factory) = mounted(Orientation::Horizontal, 3);
        let next = NavButton::next(&carousel.handle()).expect("mount");
        carousel.unmount();
        assert!(!next.click());
        let control = factory.last_control();
        assert!(control.is_destroyed());
        assert!(control.commands().is_empty());
    }

    #[test]
    fn click_navigates_and_flags_follow() {
        let (carousel, factory) = mounted(Orientation::Horizontal, 2);
        let next = NavButton::next(&carousel.handle()).expect("mount");
        assert!(next.click());
        assert_eq!(factory.last_control().commands(), vec![Command::Next]);
        assert!(next.is_disabled());
        assert!(!NavButton::previous(&carousel.handle()).expect("mount").is_disabled());
    }

    #[test]
    fn placement_follows_orientation() {
        let (horizontal, _) = mounted(Orientation::Horizontal, 3);
        let el = NavButton::previous(&horizontal.handle()).expect("mount").view();
        assert!(el.has_class("-left-12"));
        assert!(!el.has_class("rotate-90"));

        let (vertical, _) = mounted(Orientation::Vertical, 3);
        let el = NavButton::next(&vertical.handle()).expect("mount").view();
        assert!(el.has_class("-bottom-12"));
        assert!(el.has_class("rotate-90"));
    }

    #[test]
    fn view_carries_label_theme_and_passthrough_classes() {
        let (carousel, _) = mounted(Orientation::Horizontal, 3);
        let el = NavButton::next(&carousel.handle())
            .expect("mount")
            .variant(ButtonVariant::Ghost)
            .class("bg-white")
            .view();
        assert_eq!(el.text_content(), "Next slide");
        assert_eq!(el.get_attr("data-variant"), Some("ghost"));
        assert_eq!(el.get_attr("data-size"), Some("icon"));
        assert!(el.class_name().ends_with("bg-white"));
        assert_eq!(el.action_for(Trigger::Click), Some(Action::ScrollNext));
    }

    #[test]
    fn mount_after_unmount_fails() {
        let (carousel, _) = mounted(Orientation::Horizontal, 3);
        let handle = carousel.handle();
        drop(carousel);
        assert_eq!(
            NavButton::previous(&handle).unwrap_err(),
            CarouselError::OutsideCarousel {
                component: "Previous"
            }
        );
    }
}
