#![forbid(unsafe_code)]

//! Element tree produced by carousel widgets.
//!
//! Widgets describe their output as [`Element`]s: tag, ordered attributes,
//! a class list, children, and the interactions the host must wire up
//! ([`Binding`]). The host either renders the tree to markup with
//! [`Element::to_html`] or walks it to attach real listeners. Class names
//! are opaque strings and are passed through untouched.

use std::fmt::Write as _;

use reel_core::error::Result;

use crate::controller::CarouselHandle;

/// A navigation request carried by an element binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollPrev,
    ScrollNext,
    ScrollTo(usize),
    /// Route arrow keys through the carousel's keyboard router.
    RouteKeys,
}

/// What [`Action::apply`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The request reached the engine.
    Dispatched,
    /// Nothing happened; the host must pass the key event to
    /// [`Carousel::handle_key`](crate::Carousel::handle_key).
    NeedsKeyEvent,
}

impl Action {
    /// Perform the action against a live carousel.
    ///
    /// `RouteKeys` carries no key and returns [`Applied::NeedsKeyEvent`].
    /// Returns `Err(OutsideCarousel)` if the carousel is gone.
    pub fn apply(self, handle: &CarouselHandle) -> Result<Applied> {
        handle.ensure_live("Action")?;
        match self {
            Self::ScrollPrev => handle.scroll_prev(),
            Self::ScrollNext => handle.scroll_next(),
            Self::ScrollTo(index) => {
                if let Some(api) = handle.api() {
                    api.scroll_to(index);
                }
            }
            Self::RouteKeys => return Ok(Applied::NeedsKeyEvent),
        }
        Ok(Applied::Dispatched)
    }
}

/// DOM event an element listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Click,
    PointerDown,
    /// `keydown` in the capture phase.
    KeyDownCapture,
}

impl Trigger {
    /// Attribute-style name used in markup (`data-on-click`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::PointerDown => "pointerdown",
            Self::KeyDownCapture => "keydown-capture",
        }
    }
}

/// An interaction the host must wire up.
///
/// Navigation actions can be run with [`Action::apply`]. A
/// `KeyDownCapture` binding is the host's cue to forward the key event to
/// [`Carousel::handle_key`](crate::Carousel::handle_key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    pub trigger: Trigger,
    pub action: Action,
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    Element(Element),
    Text(String),
}

impl From<Element> for ViewNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// A rendered element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    bindings: Vec<Binding>,
    children: Vec<ViewNode>,
}

impl Element {
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            classes: Vec::new(),
            bindings: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an existing value.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Set a boolean attribute (`disabled`, ...) when `on` is true.
    #[must_use]
    pub fn flag(self, name: &str, on: bool) -> Self {
        if on { self.attr(name, "") } else { self }
    }

    /// Set an attribute only when `on` is true.
    #[must_use]
    pub fn attr_if(self, on: bool, name: &str, value: &str) -> Self {
        if on { self.attr(name, value) } else { self }
    }

    /// Append whitespace-separated classes. Empty input is ignored.
    #[must_use]
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    #[must_use]
    pub fn bind(mut self, trigger: Trigger, action: Action) -> Self {
        self.bindings.push(Binding { trigger, action });
        self
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<ViewNode>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(ViewNode::Text(text.into()));
        self
    }

    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Space-joined class list, in insertion order.
    #[must_use]
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Action bound to `trigger`, if any.
    #[must_use]
    pub fn action_for(&self, trigger: Trigger) -> Option<Action> {
        self.bindings
            .iter()
            .find(|b| b.trigger == trigger)
            .map(|b| b.action)
    }

    #[must_use]
    pub fn child_nodes(&self) -> &[ViewNode] {
        &self.children
    }

    /// Child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            ViewNode::Element(e) => Some(e),
            ViewNode::Text(_) => None,
        })
    }

    /// Depth-first search over this element and its descendants.
    #[must_use]
    pub fn find_all(&self, pred: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect(pred, &mut out);
        out
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for child in self.child_elements() {
            child.collect(pred, out);
        }
    }

    /// Concatenated text of all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                ViewNode::Text(t) => out.push_str(t),
                ViewNode::Element(e) => out.push_str(&e.text_content()),
            }
        }
        out
    }

    /// Render as markup. Attribute values and text are escaped; bindings
    /// become `data-on-*` attributes naming the action.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.classes.is_empty() {
            let _ = write!(
                out,
                " class=\"{}\"",
                v_htmlescape::escape(&self.class_name())
            );
        }
        for (name, value) in &self.attrs {
            if value.is_empty() {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(out, " {name}=\"{}\"", v_htmlescape::escape(value));
            }
        }
        for binding in &self.bindings {
            let _ = write!(
                out,
                " data-on-{}=\"{}\"",
                binding.trigger.name(),
                action_name(binding.action)
            );
        }
        out.push('>');
        for child in &self.children {
            match child {
                ViewNode::Text(t) => {
                    let _ = write!(out, "{}", v_htmlescape::escape(t));
                }
                ViewNode::Element(e) => e.write_html(out),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn action_name(action: Action) -> String {
    match action {
        Action::ScrollPrev => "scroll-prev".to_string(),
        Action::ScrollNext => "scroll-next".to_string(),
        Action::ScrollTo(i) => format!("scroll-to:{i}"),
        Action::RouteKeys => "route-keys".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_replaces_existing_value() {
        let el = Element::new("div").attr("role", "group").attr("role", "region");
        assert_eq!(el.get_attr("role"), Some("region"));
        assert_eq!(el.to_html(), "<div role=\"region\"></div>");
    }

    #[test]
    fn classes_keep_order_and_skip_blanks() {
        let el = Element::new("div").class("relative").class("  ").class("my-8 w-full");
        assert_eq!(el.class_name(), "relative my-8 w-full");
        assert!(el.has_class("my-8"));
    }

    #[test]
    fn html_escapes_text_and_attributes() {
        let el = Element::new("span")
            .attr("aria-label", "a \"quoted\" <label>")
            .text("Tom & Jerry");
        let html = el.to_html();
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(!html.contains("<label>"));
    }

    #[test]
    fn flags_and_bindings_render() {
        let el = Element::new("button")
            .flag("disabled", true)
            .flag("hidden", false)
            .bind(Trigger::Click, Action::ScrollNext);
        assert_eq!(
            el.to_html(),
            "<button disabled data-on-click=\"scroll-next\"></button>"
        );
        assert_eq!(el.action_for(Trigger::Click), Some(Action::ScrollNext));
        assert_eq!(el.action_for(Trigger::PointerDown), None);
    }

    #[test]
    fn find_all_walks_depth_first() {
        let tree = Element::new("div")
            .child(Element::new("button").attr("id", "a"))
            .child(Element::new("div").child(Element::new("button").attr("id", "b")));
        let buttons = tree.find_all(&|e| e.tag() == "button");
        let ids: Vec<_> = buttons.iter().filter_map(|b| b.get_attr("id")).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
