#![forbid(unsafe_code)]

//! Pagination dots.
//!
//! The indicator keeps its own copy of the snap list and the selected
//! index, read straight from the engine:
//!
//! - `init` and `reInit` refresh the snap list and the selection together,
//!   so a shrinking slide count never leaves a stale index behind;
//! - `select` refreshes the selection only.
//!
//! The active dot is purely `selected == i`. A selection outside the snap
//! list (an engine mid-reconcile) highlights nothing.
//!
//! When the controller re-creates its engine the indicator notices through
//! the controller's state and re-subscribes to the new engine.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use reel_core::engine::{EngineEvent, SnapPosition};
use reel_core::error::{CarouselError, Result};
use reel_runtime::adapter::{CarouselId, EngineApi};
use reel_runtime::reactive::{Observable, Subscription};
use reel_runtime::subscription::DisposerBag;

use crate::View;
use crate::controller::CarouselHandle;
use crate::view::{Action, Element, Trigger, ViewNode};

const DOT_CLASSES: &str = "appearance-none px-1.5 py-2 after:block after:h-2.5 after:w-2.5 \
     after:rounded-full after:border-[1px] after:border-[#1a1a1a] after:border-opacity-50 \
     after:content-[''] after:hover:bg-[#1a1a1a] after:hover:bg-opacity-10 min-[450px]:p-2 \
     min-[500px]:p-2.5 min-[500px]:after:h-3 min-[500px]:after:w-3";
const DOT_ACTIVE: &str = "after:bg-[#1a1a1a] after:hover:bg-opacity-100";
const DOT_IDLE: &str = "after:bg-transparent";

/// What the indicator renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DotsState {
    pub selected: usize,
    pub snaps: Vec<SnapPosition>,
}

impl DotsState {
    fn read(api: &EngineApi) -> Self {
        Self {
            selected: api.selected_scroll_snap(),
            snaps: api.scroll_snap_list(),
        }
    }
}

struct DotsInner {
    handle: CarouselHandle,
    state: Observable<DotsState>,
    bound: Cell<Option<CarouselId>>,
    listeners: RefCell<DisposerBag>,
}

impl DotsInner {
    /// Follow the controller's current engine, if it changed.
    fn sync(&self) {
        let api = self.handle.api();
        let id = api.as_ref().map(EngineApi::id);
        if id == self.bound.get() {
            return;
        }
        self.listeners.borrow_mut().dispose_all();
        self.bound.set(id);
        match api {
            Some(api) => self.bind(&api),
            None => {
                self.state.set(DotsState::default());
            }
        }
    }

    fn bind(&self, api: &EngineApi) {
        let mut bag = DisposerBag::new();
        for event in [EngineEvent::Init, EngineEvent::ReInit] {
            let state = self.state.clone();
            bag.push(api.on(event, move |api| {
                state.set(DotsState::read(api));
            }));
        }
        let state = self.state.clone();
        bag.push(api.on(EngineEvent::Select, move |api| {
            let selected = api.selected_scroll_snap();
            let snaps = state.with(|s| s.snaps.clone());
            state.set(DotsState { selected, snaps });
        }));
        *self.listeners.borrow_mut() = bag;

        if api.is_initialized() {
            self.state.set(DotsState::read(api));
        }
    }
}

/// The pagination indicator.
pub struct Dots {
    inner: Rc<DotsInner>,
    _follow: Subscription,
    class: String,
}

impl fmt::Debug for Dots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dots")
            .field("state", &self.inner.state.get())
            .field("bound", &self.inner.bound.get())
            .field("class", &self.class)
            .finish()
    }
}

impl Dots {
    /// Mount the indicator under a live carousel.
    pub fn mount(handle: &CarouselHandle) -> Result<Self> {
        handle.ensure_live("Dots")?;
        let inner = Rc::new(DotsInner {
            handle: handle.clone(),
            state: Observable::new(DotsState::default()),
            bound: Cell::new(None),
            listeners: RefCell::new(DisposerBag::new()),
        });
        inner.sync();

        let weak: Weak<DotsInner> = Rc::downgrade(&inner);
        let follow = handle.subscribe(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.sync();
            }
        });

        Ok(Self {
            inner,
            _follow: follow,
            class: String::new(),
        })
    }

    /// Classes applied to the container and to every dot.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    #[must_use]
    pub fn state(&self) -> DotsState {
        self.inner.sync();
        self.inner.state.get()
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.state().selected
    }

    #[must_use]
    pub fn snaps(&self) -> Vec<SnapPosition> {
        self.state().snaps
    }

    /// Whether dot `index` is the highlighted one.
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        let state = self.state();
        index < state.snaps.len() && state.selected == index
    }

    /// Observe indicator changes.
    pub fn subscribe(&self, callback: impl Fn(&DotsState) + 'static) -> Subscription {
        self.inner.state.subscribe(callback)
    }

    /// Pointer-down on dot `index`: jump there.
    pub fn press(&self, index: usize) -> Result<()> {
        self.inner.sync();
        let api = self
            .inner
            .handle
            .api()
            .ok_or(CarouselError::OutsideCarousel { component: "Dots" })?;
        tracing::debug!(message = "dots.press", carousel = %api.id(), index);
        api.scroll_to(index);
        Ok(())
    }

    /// Engine listeners currently held.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Release every engine listener.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for Dots {
    fn drop(&mut self) {
        self.inner.listeners.borrow_mut().dispose_all();
    }
}

impl View for Dots {
    fn view(&self) -> Element {
        let state = self.state();
        let dots = (0..state.snaps.len()).map(|i| {
            let active = state.selected == i;
            let dot = Element::new("button")
                .class(&self.class)
                .class(DOT_CLASSES)
                .class(if active { DOT_ACTIVE } else { DOT_IDLE })
                .attr("type", "button")
                .attr("aria-label", format!("Go to slide {}", i + 1))
                .attr_if(active, "aria-current", "true")
                .bind(Trigger::PointerDown, Action::ScrollTo(i));
            ViewNode::from(dot)
        });
        Element::new("div")
            .class(&self.class)
            .class("hidden flex-row justify-center gap-0 p-0 min-[500px]:flex")
            .children(dots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Carousel;
    use reel_core::config::{CarouselConfig, Orientation};
    use reel_core::engine::EngineFactory;
    use reel_harness::SimEngineFactory;

    fn mounted(slides: usize) -> (Carousel, Rc<SimEngineFactory>) {
        let factory = Rc::new(SimEngineFactory::new(slides));
        let carousel = Carousel::mount(
            CarouselConfig::new(Orientation::Horizontal),
            Rc::clone(&factory) as Rc<dyn EngineFactory>,
        );
        (carousel, factory)
    }

    fn active_labels(dots: &Dots) -> Vec<String> {
        dots.view()
            .find_all(&|e| e.has_attr("aria-current"))
            .iter()
            .filter_map(|e| e.get_attr("aria-label").map(str::to_string))
            .collect()
    }

    #[test]
    fn mount_after_init_reads_engine_immediately() {
        let (carousel, _) = mounted(4);
        let dots = Dots::mount(&carousel.handle()).expect("mount");
        assert_eq!(dots.snaps(), vec![0, 1, 2, 3]);
        assert_eq!(dots.selected(), 0);
        assert_eq!(dots.listener_count(), 3);
    }

    #[test]
    fn select_moves_highlight() {
        let (carousel, _) = mounted(3);
        let dots = Dots::mount(&carousel.handle()).expect("mount");
        carousel.scroll_next();
        assert_eq!(dots.selected(), 1);
        assert_eq!(active_labels(&dots), vec!["Go to slide 2"]);
    }

    #[test]
    fn press_jumps_to_dot() {
        let (carousel, factory) = mounted(5);
        let dots = Dots::mount(&carousel.handle()).expect("mount");
        dots.press(3).expect("press");
        assert_eq!(carousel.state().selected_index, 3);
        assert!(dots.is_active(3));
        assert_eq!(
            factory.last_control().commands(),
            vec![reel_harness::Command::To(3)]
        );
    }

    #[test]
    fn reinit_refreshes_list_and_selection_together() {
        let (carousel, factory) = mounted(5);
        let dots = Dots::mount(&carousel.handle()).expect("mount");
        dots.press(4).expect("press");
        factory.last_control().set_slides(2);
        carousel.reinit();
        let state = dots.state();
        assert_eq!(state.snaps, vec![0, 1]);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn out_of_range_selection_highlights_nothing() {
        let (carousel, factory) = mounted(3);
        let dots = Dots::mount(&carousel.handle()).expect("mount");
        factory.last_control().force_selected(7);
        carousel.api().expect("api").pump();
        assert_eq!(dots.selected(), 7);
        assert!(!dots.is_active(7));
        assert!(active_labels(&dots).is_empty());
        assert_eq!(dots.view().child_elements().count(), 3);
    }

    #[test]
    fn dots_render_labels_and_pointer_down_bindings() {
        let (carousel, _) = mounted(2);
        let dots = Dots::mount(&carousel.handle()).expect("mount").class("mt-4");
        let root = dots.view();
        assert!(root.class_name().starts_with("mt-4 hidden"));
        let buttons: Vec<_> = root.child_elements().collect();
        assert_eq!(buttons[1].get_attr("aria-label"), Some("Go to slide 2"));
        assert_eq!(
            buttons[1].action_for(Trigger::PointerDown),
            Some(Action::ScrollTo(1))
        );
        assert_eq!(buttons[0].get_attr("aria-current"), Some("true"));
        assert!(buttons[0].has_class("after:bg-[#1a1a1a]"));
        assert!(buttons[1].has_class("after:bg-transparent"));
    }

    #[test]
    fn unmount_releases_listeners() {
        let (carousel, _) = mounted(3);
        let api = carousel.api().expect("api");
        let dots = Dots::mount(&carousel.handle()).expect("mount");
        assert_eq!(api.listener_count(EngineEvent::Select), 2);
        dots.unmount();
        assert_eq!(api.listener_count(EngineEvent::Select), 1);
        assert_eq!(api.listener_count(EngineEvent::ReInit), 1);
        assert_eq!(api.listener_count(EngineEvent::Init), 1);
    }

    #[test]
    fn follows_engine_recreation() {
        let (carousel, factory) = mounted(3);
        let dots = Dots::mount(&carousel.handle()).expect("mount");
        factory.set_slides(6);
        assert!(carousel.set_config(CarouselConfig::new(Orientation::Vertical)));
        assert_eq!(dots.snaps().len(), 6);
        let api = carousel.api().expect("api");
        assert_eq!(api.listener_count(EngineEvent::Select), 2);
    }

    #[test]
    fn mount_outside_carousel_fails() {
        let (carousel, _) = mounted(3);
        let handle = carousel.handle();
        drop(carousel);
        assert_eq!(
            Dots::mount(&handle).unwrap_err(),
            CarouselError::OutsideCarousel { component: "Dots" }
        );
    }
}
