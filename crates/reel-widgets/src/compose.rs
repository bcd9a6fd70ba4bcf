#![forbid(unsafe_code)]

//! Declarative carousel markup.
//!
//! A [`Node`] tree mirrors how a page nests the carousel pieces:
//!
//! ```text
//! Carousel
//! ├── Content
//! │   ├── Item ...
//! │   └── Item ...
//! ├── Previous
//! ├── Next
//! └── Dots
//! ```
//!
//! [`render_tree`] walks it with an explicit context: entering a
//! `Carousel` node makes its handle the context for everything below, and
//! the innermost one wins. A control reached with no context, or with a
//! handle whose controller is gone, fails with
//! [`CarouselError::OutsideCarousel`] naming the control.

use reel_core::error::{CarouselError, Result};

use crate::View;
use crate::content::{Content, Item};
use crate::controller::{Carousel, CarouselHandle};
use crate::dots::Dots;
use crate::nav::{ButtonSize, ButtonVariant, NavButton};
use crate::view::{Element, ViewNode};

/// Options shared by the two navigation buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavProps {
    pub variant: ButtonVariant,
    pub size: ButtonSize,
    pub class: String,
}

/// One node of carousel markup.
#[derive(Debug, Clone)]
pub enum Node {
    Carousel {
        handle: CarouselHandle,
        children: Vec<Node>,
    },
    Content {
        class: String,
        children: Vec<Node>,
    },
    Item {
        class: String,
        children: Vec<Node>,
    },
    Previous(NavProps),
    Next(NavProps),
    Dots {
        class: String,
    },
    /// Arbitrary page markup; context passes through it.
    Element {
        element: Element,
        children: Vec<Node>,
    },
    Text(String),
}

impl Node {
    #[must_use]
    pub fn carousel(carousel: &Carousel, children: Vec<Node>) -> Self {
        Self::Carousel {
            handle: carousel.handle(),
            children,
        }
    }

    #[must_use]
    pub fn content(children: Vec<Node>) -> Self {
        Self::Content {
            class: String::new(),
            children,
        }
    }

    #[must_use]
    pub fn item(children: Vec<Node>) -> Self {
        Self::Item {
            class: String::new(),
            children,
        }
    }

    #[must_use]
    pub fn previous() -> Self {
        Self::Previous(NavProps::default())
    }

    #[must_use]
    pub fn next() -> Self {
        Self::Next(NavProps::default())
    }

    #[must_use]
    pub fn dots() -> Self {
        Self::Dots {
            class: String::new(),
        }
    }

    #[must_use]
    pub fn element(element: Element, children: Vec<Node>) -> Self {
        Self::Element { element, children }
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Set caller classes on nodes that take them; others are unchanged.
    #[must_use]
    pub fn with_class(mut self, value: impl Into<String>) -> Self {
        match &mut self {
            Self::Content { class, .. } | Self::Item { class, .. } | Self::Dots { class } => {
                *class = value.into();
            }
            Self::Previous(props) | Self::Next(props) => props.class = value.into(),
            Self::Carousel { .. } | Self::Element { .. } | Self::Text(_) => {}
        }
        self
    }
}

/// Render a node tree.
pub fn render_tree(node: &Node) -> Result<ViewNode> {
    render(node, None)
}

fn render(node: &Node, ctx: Option<&CarouselHandle>) -> Result<ViewNode> {
    let out: ViewNode = match node {
        Node::Carousel { handle, children } => {
            let root = handle.root()?;
            root.children(render_all(children, Some(handle))?).into()
        }
        Node::Content { class, children } => {
            let handle = context(ctx, "Content")?;
            Content::new(handle)?
                .class(class.clone())
                .render(render_all(children, ctx)?)
                .into()
        }
        Node::Item { class, children } => {
            context(ctx, "Item")?;
            Item::new()
                .class(class.clone())
                .render(render_all(children, ctx)?)
                .into()
        }
        Node::Previous(props) => nav(NavButton::previous(context(ctx, "Previous")?)?, props),
        Node::Next(props) => nav(NavButton::next(context(ctx, "Next")?)?, props),
        Node::Dots { class } => Dots::mount(context(ctx, "Dots")?)?
            .class(class.clone())
            .view()
            .into(),
        Node::Element { element, children } => element
            .clone()
            .children(render_all(children, ctx)?)
            .into(),
        Node::Text(text) => ViewNode::Text(text.clone()),
    };
    Ok(out)
}

fn render_all(children: &[Node], ctx: Option<&CarouselHandle>) -> Result<Vec<ViewNode>> {
    children.iter().map(|child| render(child, ctx)).collect()
}

fn context<'a>(
    ctx: Option<&'a CarouselHandle>,
    component: &'static str,
) -> Result<&'a CarouselHandle> {
    ctx.ok_or(CarouselError::OutsideCarousel { component })
}

fn nav(button: NavButton, props: &NavProps) -> ViewNode {
    button
        .variant(props.variant)
        .size(props.size)
        .class(props.class.clone())
        .view()
        .into()
}
