#![forbid(unsafe_code)]

//! Carousel widgets.
//!
//! [`Carousel`] owns the engine and publishes [`CarouselState`];
//! [`NavButton`], [`Dots`], [`Content`], and [`Item`] are built from its
//! [`CarouselHandle`]. Every widget describes its output as an [`Element`].

pub mod compose;
pub mod content;
pub mod controller;
pub mod dots;
pub mod keyboard;
pub mod nav;
pub mod view;

pub use compose::{NavProps, Node, render_tree};
pub use content::{Content, Item};
pub use controller::{Carousel, CarouselHandle, CarouselState, Phase};
pub use dots::{Dots, DotsState};
pub use keyboard::{EventPhase, KeyAction, KeyOutcome, KeyboardRouter};
pub use nav::{ButtonSize, ButtonVariant, Direction, NavButton};
pub use view::{Action, Applied, Binding, Element, Trigger, ViewNode};

/// A component that renders to an [`Element`].
pub trait View {
    /// Current rendering.
    fn view(&self) -> Element;
}
