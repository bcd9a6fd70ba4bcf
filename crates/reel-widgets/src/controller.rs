#![forbid(unsafe_code)]

//! Carousel controller.
//!
//! A [`Carousel`] owns exactly one engine at a time. On mount it builds the
//! engine from its [`CarouselConfig`], subscribes to `init`, `reInit`, and
//! `select`, and only then pumps the engine, so the first `init` is never
//! missed. Every one of those events re-derives the whole
//! [`CarouselState`] from the engine's own queries; nothing is updated
//! incrementally.
//!
//! Descendant controls never see the controller itself. They receive a
//! [`CarouselHandle`], a weak reference that fails loudly once the
//! controller is gone.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --init--> Ready --reInit--> Ready
//!       ^                   |
//!       +---- set_config ---+   (engine destroyed and re-created)
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use reel_core::config::{CarouselConfig, Orientation};
use reel_core::engine::{EngineEvent, EngineFactory, SnapPosition};
use reel_core::error::{CarouselError, Result};
use reel_core::event::KeyEvent;
use reel_runtime::adapter::{CarouselId, EngineApi, EngineOwner};
use reel_runtime::reactive::{Observable, Subscription};
use reel_runtime::subscription::DisposerBag;

use crate::View;
use crate::keyboard::{KeyOutcome, KeyboardRouter};
use crate::view::{Action, Element, Trigger};

/// Derived carousel state, recomputed from the engine on every event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselState {
    pub can_scroll_prev: bool,
    pub can_scroll_next: bool,
    pub selected_index: usize,
    pub snap_positions: Vec<SnapPosition>,
}

impl CarouselState {
    /// Query the engine for a fresh state.
    #[must_use]
    pub fn capture(api: &EngineApi) -> Self {
        Self {
            can_scroll_prev: api.can_scroll_prev(),
            can_scroll_next: api.can_scroll_next(),
            selected_index: api.selected_scroll_snap(),
            snap_positions: api.scroll_snap_list(),
        }
    }

    /// Whether the selection points into the snap list. Can be false
    /// transiently while an engine reconciles a geometry change.
    #[must_use]
    pub fn selection_in_range(&self) -> bool {
        self.selected_index < self.snap_positions.len()
    }
}

/// Controller lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Engine built, `init` not yet delivered.
    #[default]
    Uninitialized,
    /// `init` delivered; state reflects the engine.
    Ready,
}

type ApiCallback = Rc<dyn Fn(&EngineApi)>;

struct Shared {
    config: RefCell<CarouselConfig>,
    factory: Rc<dyn EngineFactory>,
    owner: RefCell<Option<EngineOwner>>,
    listeners: RefCell<DisposerBag>,
    state: Observable<CarouselState>,
    phase: Rc<Cell<Phase>>,
    on_api: RefCell<Vec<ApiCallback>>,
    class: RefCell<String>,
}

impl Shared {
    fn api(&self) -> Option<EngineApi> {
        self.owner.borrow().as_ref().map(|owner| owner.api().clone())
    }

    /// Build an engine, subscribe, then deliver its queued events.
    fn attach(&self) {
        let config = self.config.borrow().clone();
        let owner = EngineOwner::new(self.factory.create(&config));
        let api = owner.api().clone();

        let mut bag = DisposerBag::new();
        {
            let state = self.state.clone();
            let phase = Rc::clone(&self.phase);
            bag.push(api.on(EngineEvent::Init, move |api| {
                phase.set(Phase::Ready);
                state.set(CarouselState::capture(api));
            }));
        }
        {
            let state = self.state.clone();
            bag.push(api.on(EngineEvent::ReInit, move |api| {
                tracing::debug!(message = "carousel.reinit", carousel = %api.id());
                state.set(CarouselState::capture(api));
            }));
        }
        {
            let state = self.state.clone();
            bag.push(api.on(EngineEvent::Select, move |api| {
                state.set(CarouselState::capture(api));
            }));
        }

        *self.listeners.borrow_mut() = bag;
        *self.owner.borrow_mut() = Some(owner);
        tracing::debug!(
            message = "carousel.mount",
            carousel = %api.id(),
            orientation = config.orientation.as_str()
        );

        api.pump();

        let callbacks: Vec<ApiCallback> = self.on_api.borrow().clone();
        for callback in callbacks {
            callback(&api);
        }
    }

    /// Release subscriptions, then destroy the engine.
    fn detach(&self) {
        let released = self.listeners.borrow_mut().dispose_all();
        let owner = self.owner.borrow_mut().take();
        if let Some(owner) = owner {
            tracing::debug!(
                message = "carousel.unmount",
                carousel = %owner.api().id(),
                released
            );
            owner.destroy();
        }
        self.phase.set(Phase::Uninitialized);
        self.state.set(CarouselState::default());
    }
}

/// The carousel controller.
pub struct Carousel {
    shared: Rc<Shared>,
}

impl fmt::Debug for Carousel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("config", &*self.shared.config.borrow())
            .field("phase", &self.shared.phase.get())
            .field("state", &self.shared.state.get())
            .finish()
    }
}

impl Carousel {
    /// Mount a carousel: build its engine and deliver `init`.
    #[must_use]
    pub fn mount(config: CarouselConfig, factory: Rc<dyn EngineFactory>) -> Self {
        let shared = Rc::new(Shared {
            config: RefCell::new(config),
            factory,
            owner: RefCell::new(None),
            listeners: RefCell::new(DisposerBag::new()),
            state: Observable::new(CarouselState::default()),
            phase: Rc::new(Cell::new(Phase::Uninitialized)),
            on_api: RefCell::new(Vec::new()),
            class: RefCell::new(String::new()),
        });
        shared.attach();
        Self { shared }
    }

    /// Extra classes for the root element, appended after the defaults.
    #[must_use]
    pub fn with_class(self, class: impl Into<String>) -> Self {
        *self.shared.class.borrow_mut() = class.into();
        self
    }

    /// Context handle for descendant controls.
    #[must_use]
    pub fn handle(&self) -> CarouselHandle {
        CarouselHandle {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Current engine handle.
    #[must_use]
    pub fn api(&self) -> Option<EngineApi> {
        self.shared.api()
    }

    #[must_use]
    pub fn id(&self) -> Option<CarouselId> {
        self.api().map(|api| api.id())
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.shared.phase.get()
    }

    /// Snapshot of the derived state.
    #[must_use]
    pub fn state(&self) -> CarouselState {
        self.shared.state.get()
    }

    /// Observe derived state changes.
    pub fn subscribe(&self, callback: impl Fn(&CarouselState) + 'static) -> Subscription {
        self.shared.state.subscribe(callback)
    }

    #[must_use]
    pub fn config(&self) -> CarouselConfig {
        self.shared.config.borrow().clone()
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.shared.config.borrow().orientation
    }

    /// Register a callback that receives the engine handle now and after
    /// every re-creation.
    pub fn on_api(&self, callback: impl Fn(&EngineApi) + 'static) {
        let callback: ApiCallback = Rc::new(callback);
        self.shared.on_api.borrow_mut().push(Rc::clone(&callback));
        if let Some(api) = self.api() {
            callback(&api);
        }
    }

    /// Replace the configuration. A different config tears the engine down
    /// and builds a new one; returns whether that happened.
    pub fn set_config(&self, config: CarouselConfig) -> bool {
        if *self.shared.config.borrow() == config {
            return false;
        }
        self.shared.detach();
        *self.shared.config.borrow_mut() = config;
        self.shared.attach();
        true
    }

    /// Ask the engine to re-measure (slides added or removed).
    pub fn reinit(&self) {
        let options = self.shared.config.borrow().engine_options();
        if let Some(api) = self.api() {
            api.reinit(&options);
        }
    }

    pub fn scroll_prev(&self) {
        if let Some(api) = self.api() {
            api.scroll_prev();
        }
    }

    pub fn scroll_next(&self) {
        if let Some(api) = self.api() {
            api.scroll_next();
        }
    }

    /// Keyboard router bound to the current navigation callbacks.
    #[must_use]
    pub fn keyboard(&self) -> KeyboardRouter {
        KeyboardRouter::for_carousel(&self.handle())
    }

    /// Deliver a key event to the root container (capture phase).
    pub fn handle_key(&self, key: &KeyEvent) -> KeyOutcome {
        self.keyboard().handle_key(key)
    }

    /// Release subscriptions and destroy the engine.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.shared.detach();
    }
}

impl View for Carousel {
    /// Root container without children; [`crate::compose`] fills them in.
    fn view(&self) -> Element {
        root_element(&self.shared.class.borrow())
    }
}

pub(crate) fn root_element(class: &str) -> Element {
    Element::new("div")
        .class("relative")
        .class(class)
        .attr("role", "region")
        .attr("aria-roledescription", "carousel")
        .bind(Trigger::KeyDownCapture, Action::RouteKeys)
}

/// Weak context handle given to descendant controls.
///
/// Accessors panic with [`CarouselError::OutsideCarousel`] once the
/// controller is gone; check with [`CarouselHandle::ensure_live`] first.
#[derive(Clone)]
pub struct CarouselHandle {
    shared: Weak<Shared>,
}

impl fmt::Debug for CarouselHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselHandle")
            .field("live", &self.is_live())
            .finish()
    }
}

impl PartialEq for CarouselHandle {
    fn eq(&self, other: &Self) -> bool {
        self.shared.ptr_eq(&other.shared)
    }
}

impl CarouselHandle {
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.shared.strong_count() > 0
    }

    /// `Err(OutsideCarousel { component })` if the controller is gone.
    pub fn ensure_live(&self, component: &'static str) -> Result<()> {
        self.upgrade(component).map(|_| ())
    }

    fn upgrade(&self, component: &'static str) -> Result<Rc<Shared>> {
        self.shared
            .upgrade()
            .ok_or(CarouselError::OutsideCarousel { component })
    }

    /// Root element of the controller behind this handle.
    pub(crate) fn root(&self) -> Result<Element> {
        let shared = self.upgrade("Carousel")?;
        let class = shared.class.borrow();
        Ok(root_element(&class))
    }

    fn live(&self) -> Rc<Shared> {
        match self.upgrade("useCarousel") {
            Ok(shared) => shared,
            Err(err) => panic!("{err}"),
        }
    }

    /// # Panics
    ///
    /// Panics if the controller is gone.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.live().config.borrow().orientation
    }

    /// # Panics
    ///
    /// Panics if the controller is gone.
    #[must_use]
    pub fn can_scroll_prev(&self) -> bool {
        self.live().state.with(|s| s.can_scroll_prev)
    }

    /// # Panics
    ///
    /// Panics if the controller is gone.
    #[must_use]
    pub fn can_scroll_next(&self) -> bool {
        self.live().state.with(|s| s.can_scroll_next)
    }

    /// # Panics
    ///
    /// Panics if the controller is gone.
    #[must_use]
    pub fn state(&self) -> CarouselState {
        self.live().state.get()
    }

    /// # Panics
    ///
    /// Panics if the controller is gone.
    pub fn subscribe(&self, callback: impl Fn(&CarouselState) + 'static) -> Subscription {
        self.live().state.subscribe(callback)
    }

    /// Current engine handle, `None` if the controller is gone.
    #[must_use]
    pub fn api(&self) -> Option<EngineApi> {
        self.shared.upgrade().and_then(|shared| shared.api())
    }

    /// Navigate back. No-op if the controller is gone.
    pub fn scroll_prev(&self) {
        if let Some(api) = self.api() {
            api.scroll_prev();
        }
    }

    /// Navigate forward. No-op if the controller is gone.
    pub fn scroll_next(&self) {
        if let Some(api) = self.api() {
            api.scroll_next();
        }
    }
}
