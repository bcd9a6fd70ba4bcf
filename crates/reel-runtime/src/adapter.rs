#![forbid(unsafe_code)]

//! Scroll engine adapter.
//!
//! [`EngineOwner`] exclusively owns one [`ScrollEngine`] plus the listener
//! table for its events; [`EngineApi`] is the cloneable handle everybody
//! else borrows. Only the owner can destroy the engine, and dropping the
//! owner destroys it.
//!
//! # Event delivery
//!
//! Engines only queue events. Nothing reaches a listener until
//! [`EngineApi::pump`] drains the queue, which every command does after
//! forwarding to the engine. An owner therefore registers its listeners
//! between [`EngineOwner::new`] and the first pump and can never miss
//! `init`.
//!
//! A listener that issues a command while an event is being dispatched does
//! not dispatch recursively: the events it causes are appended to the
//! pending queue and delivered by the outermost pump, in order.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use reel_core::config::EngineOptions;
use reel_core::engine::{EngineEvent, ScrollEngine, SnapPosition};
use reel_core::error::{CarouselError, Result};

use crate::subscription::{Disposer, ListenerTable};

/// Identity of one engine instance.
///
/// A re-created engine gets a fresh id, so stale handles can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarouselId(u64);

impl CarouselId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CarouselId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "carousel-{}", self.0)
    }
}

struct ApiInner {
    id: CarouselId,
    /// `None` once destroyed.
    engine: RefCell<Option<Box<dyn ScrollEngine>>>,
    listeners: ListenerTable<EngineEvent, EngineApi>,
    pending: RefCell<VecDeque<EngineEvent>>,
    dispatching: Cell<bool>,
    initialized: Cell<bool>,
}

/// Shared handle to a live engine.
///
/// Handlers registered with [`EngineApi::on`] receive this handle.
#[derive(Clone)]
pub struct EngineApi {
    inner: Rc<ApiInner>,
}

impl fmt::Debug for EngineApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineApi")
            .field("id", &self.inner.id)
            .field("initialized", &self.inner.initialized.get())
            .field("destroyed", &self.is_destroyed())
            .field("listeners", &self.inner.listeners.len())
            .finish()
    }
}

impl PartialEq for EngineApi {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for EngineApi {}

/// Resets the dispatch flag even if a listener panics.
struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl EngineApi {
    /// Engine identity.
    #[must_use]
    pub fn id(&self) -> CarouselId {
        self.inner.id
    }

    /// Whether `init` has been delivered.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.get()
    }

    /// Whether the owner destroyed the engine.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.inner.engine.borrow().is_none()
    }

    /// Subscribe to `event`. The listener lives until the disposer is
    /// disposed or dropped, or the engine is destroyed.
    pub fn on(&self, event: EngineEvent, handler: impl Fn(&EngineApi) + 'static) -> Disposer {
        self.inner.listeners.add(event, handler)
    }

    /// Live listeners for `event`.
    #[must_use]
    pub fn listener_count(&self, event: EngineEvent) -> usize {
        self.inner.listeners.count(event)
    }

    /// Deliver queued engine events to listeners. Returns the number of
    /// events delivered by this call (0 when called re-entrantly).
    pub fn pump(&self) -> usize {
        self.collect_engine_events();
        if self.inner.dispatching.get() {
            return 0;
        }
        self.inner.dispatching.set(true);
        let _guard = DispatchGuard(&self.inner.dispatching);

        let mut delivered = 0;
        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(event) = next else { break };
            if event == EngineEvent::Init {
                self.inner.initialized.set(true);
            }
            let listeners = self.inner.listeners.emit(event, self);
            tracing::debug!(
                message = "engine.dispatch",
                carousel = %self.inner.id,
                event = event.name(),
                listeners
            );
            delivered += 1;
            self.collect_engine_events();
        }
        delivered
    }

    fn collect_engine_events(&self) {
        let events = match self.inner.engine.borrow_mut().as_mut() {
            Some(engine) => engine.take_events(),
            None => return,
        };
        self.inner.pending.borrow_mut().extend(events);
    }

    /// Run a mutating engine call, then pump.
    fn command(&self, name: &'static str, f: impl FnOnce(&mut dyn ScrollEngine)) -> Result<()> {
        {
            let mut slot = self.inner.engine.borrow_mut();
            let Some(engine) = slot.as_mut() else {
                tracing::warn!(
                    message = "engine.command_after_destroy",
                    carousel = %self.inner.id,
                    command = name
                );
                return Err(CarouselError::EngineDestroyed);
            };
            f(&mut **engine);
        }
        self.pump();
        Ok(())
    }

    fn query<R>(&self, default: R, f: impl FnOnce(&dyn ScrollEngine) -> R) -> R {
        match self.inner.engine.borrow().as_ref() {
            Some(engine) => f(&**engine),
            None => default,
        }
    }

    /// Move one snap back. No-op after destroy.
    pub fn scroll_prev(&self) {
        let _ = self.try_scroll_prev();
    }

    /// Move one snap forward. No-op after destroy.
    pub fn scroll_next(&self) {
        let _ = self.try_scroll_next();
    }

    /// Jump to snap `index`. Range handling is up to the engine.
    pub fn scroll_to(&self, index: usize) {
        let _ = self.try_scroll_to(index);
    }

    /// Re-measure the engine with `options`.
    pub fn reinit(&self, options: &EngineOptions) {
        let _ = self.try_reinit(options);
    }

    pub fn try_scroll_prev(&self) -> Result<()> {
        self.command("scroll_prev", |engine| engine.scroll_prev())
    }

    pub fn try_scroll_next(&self) -> Result<()> {
        self.command("scroll_next", |engine| engine.scroll_next())
    }

    pub fn try_scroll_to(&self, index: usize) -> Result<()> {
        self.command("scroll_to", |engine| engine.scroll_to(index))
    }

    pub fn try_reinit(&self, options: &EngineOptions) -> Result<()> {
        self.command("reinit", |engine| engine.reinit(options))
    }

    /// Whether a backwards move is possible. `false` after destroy.
    #[must_use]
    pub fn can_scroll_prev(&self) -> bool {
        self.query(false, |engine| engine.can_scroll_prev())
    }

    /// Whether a forwards move is possible. `false` after destroy.
    #[must_use]
    pub fn can_scroll_next(&self) -> bool {
        self.query(false, |engine| engine.can_scroll_next())
    }

    /// Selected snap index. `0` after destroy.
    #[must_use]
    pub fn selected_scroll_snap(&self) -> usize {
        self.query(0, |engine| engine.selected_scroll_snap())
    }

    /// Snap positions. Empty after destroy.
    #[must_use]
    pub fn scroll_snap_list(&self) -> Vec<SnapPosition> {
        self.query(Vec::new(), |engine| engine.scroll_snap_list())
    }
}

/// Exclusive owner of an engine instance.
///
/// Dropping the owner destroys the engine and releases every listener.
pub struct EngineOwner {
    api: EngineApi,
}

impl fmt::Debug for EngineOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineOwner").field("api", &self.api).finish()
    }
}

impl EngineOwner {
    /// Take ownership of `engine`. Queued events stay queued until the
    /// first pump.
    #[must_use]
    pub fn new(engine: Box<dyn ScrollEngine>) -> Self {
        let inner = ApiInner {
            id: CarouselId::next(),
            engine: RefCell::new(Some(engine)),
            listeners: ListenerTable::new(),
            pending: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
            initialized: Cell::new(false),
        };
        Self {
            api: EngineApi {
                inner: Rc::new(inner),
            },
        }
    }

    /// Borrowed handle for queries, commands, and subscriptions.
    #[must_use]
    pub fn api(&self) -> &EngineApi {
        &self.api
    }

    /// Tear the engine down. Listeners are dropped first so none can
    /// observe a destroyed engine.
    pub fn destroy(self) {
        drop(self);
    }

    fn teardown(&mut self) {
        let inner = &self.api.inner;
        let released = inner.listeners.clear();
        inner.pending.borrow_mut().clear();
        let engine = inner.engine.borrow_mut().take();
        if let Some(mut engine) = engine {
            engine.destroy();
            tracing::debug!(
                message = "engine.destroy",
                carousel = %inner.id,
                released
            );
        }
    }
}

impl Drop for EngineOwner {
    fn drop(&mut self) {
        self.teardown();
    }
}
