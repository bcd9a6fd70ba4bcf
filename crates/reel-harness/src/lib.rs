#![forbid(unsafe_code)]

//! Test harness and reference fixtures for reel.
//!
//! [`SimEngine`] is a deterministic stand-in for the external scroll engine:
//! one snap per slide, positions `0..n`, optional wraparound, no animation.
//! It emits the same lifecycle events a real engine does (`init` once, on
//! creation or when a deferred engine is released, `select` whenever the
//! selected snap changes, `reInit` after a geometry refresh), which is all
//! the carousel layer relies on.
//!
//! Tests steer an engine through its [`SimControl`] (slide count, forced
//! selection) and read back the command log to assert exactly which
//! navigation calls reached the engine.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use reel_core::config::{CarouselConfig, EngineOptions};
use reel_core::engine::{EngineEvent, EngineFactory, ScrollEngine, SnapPosition};

/// A navigation command as it reached the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Prev,
    Next,
    To(usize),
    Reinit,
}

#[derive(Debug)]
struct SimState {
    slides: usize,
    /// Slide count waiting for the next re-measure.
    pending_slides: Option<usize>,
    index: usize,
    loop_around: bool,
    events: Vec<EngineEvent>,
    commands: Vec<Command>,
    initialized: bool,
    destroyed: bool,
}

impl SimState {
    fn select(&mut self, index: usize) {
        if index != self.index {
            self.index = index;
            self.events.push(EngineEvent::Select);
        }
    }

    fn last(&self) -> usize {
        self.slides.saturating_sub(1)
    }

    fn remeasure(&mut self) {
        if let Some(slides) = self.pending_slides.take() {
            self.slides = slides;
        }
        self.index = self.index.min(self.last());
        self.events.push(EngineEvent::ReInit);
    }
}

/// Shared view of one [`SimEngine`] for tests.
#[derive(Debug, Clone)]
pub struct SimControl {
    state: Rc<RefCell<SimState>>,
}

impl SimControl {
    /// Change the slide count. Takes effect on the engine's next `reinit`,
    /// the way a real engine only re-measures when asked.
    pub fn set_slides(&self, slides: usize) {
        self.state.borrow_mut().pending_slides = Some(slides);
    }

    /// Slide count as last measured.
    #[must_use]
    pub fn slides(&self) -> usize {
        self.state.borrow().slides
    }

    /// Force the reported selection without clamping and queue `select`.
    /// Models an engine whose selection briefly disagrees with its snap list.
    pub fn force_selected(&self, index: usize) {
        let mut state = self.state.borrow_mut();
        state.index = index;
        state.events.push(EngineEvent::Select);
    }

    /// Queue `init` for an engine created with deferred init. Later calls
    /// do nothing; `init` fires at most once.
    pub fn emit_init(&self) {
        let mut state = self.state.borrow_mut();
        if !state.initialized {
            state.initialized = true;
            state.events.push(EngineEvent::Init);
        }
    }

    /// Whether `init` has been queued.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.borrow().initialized
    }

    /// Queue `reInit` as if the engine re-measured on its own (resize).
    pub fn emit_reinit(&self) {
        self.state.borrow_mut().remeasure();
    }

    /// Every command received so far, oldest first.
    #[must_use]
    pub fn commands(&self) -> Vec<Command> {
        self.state.borrow().commands.clone()
    }

    /// Forget the command log.
    pub fn clear_commands(&self) {
        self.state.borrow_mut().commands.clear();
    }

    /// Whether the engine was destroyed.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    /// Currently selected index as the engine sees it.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.state.borrow().index
    }
}

/// Deterministic reference engine.
#[derive(Debug)]
pub struct SimEngine {
    state: Rc<RefCell<SimState>>,
}

impl SimEngine {
    /// Create an engine with `slides` snaps. Queues `init`.
    #[must_use]
    pub fn new(slides: usize, options: &EngineOptions) -> (Self, SimControl) {
        let (engine, control) = Self::deferred(slides, options);
        control.emit_init();
        (engine, control)
    }

    /// Create an engine that stays silent until [`SimControl::emit_init`],
    /// like a real engine still waiting for its viewport to be laid out.
    #[must_use]
    pub fn deferred(slides: usize, options: &EngineOptions) -> (Self, SimControl) {
        let index = options.start_index.min(slides.saturating_sub(1));
        let state = Rc::new(RefCell::new(SimState {
            slides,
            pending_slides: None,
            index,
            loop_around: options.loop_around,
            events: Vec::new(),
            commands: Vec::new(),
            initialized: false,
            destroyed: false,
        }));
        let control = SimControl {
            state: Rc::clone(&state),
        };
        (Self { state }, control)
    }
}

impl ScrollEngine for SimEngine {
    fn scroll_prev(&mut self) {
        let mut state = self.state.borrow_mut();
        state.commands.push(Command::Prev);
        if state.slides == 0 {
            return;
        }
        let target = match (state.index, state.loop_around) {
            (0, true) => state.last(),
            (i, _) => i.saturating_sub(1),
        };
        state.select(target);
    }

    fn scroll_next(&mut self) {
        let mut state = self.state.borrow_mut();
        state.commands.push(Command::Next);
        if state.slides == 0 {
            return;
        }
        let last = state.last();
        let target = match (state.index, state.loop_around) {
            (i, true) if i >= last => 0,
            (i, _) => (i + 1).min(last),
        };
        state.select(target);
    }

    fn scroll_to(&mut self, index: usize) {
        let mut state = self.state.borrow_mut();
        state.commands.push(Command::To(index));
        if state.slides == 0 {
            return;
        }
        let target = index.min(state.last());
        state.select(target);
    }

    fn can_scroll_prev(&self) -> bool {
        let state = self.state.borrow();
        state.slides > 1 && (state.loop_around || state.index > 0)
    }

    fn can_scroll_next(&self) -> bool {
        let state = self.state.borrow();
        state.slides > 1 && (state.loop_around || state.index < state.last())
    }

    fn selected_scroll_snap(&self) -> usize {
        self.state.borrow().index
    }

    fn scroll_snap_list(&self) -> Vec<SnapPosition> {
        (0..self.state.borrow().slides as SnapPosition).collect()
    }

    fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.state.borrow_mut().events)
    }

    fn reinit(&mut self, options: &EngineOptions) {
        let mut state = self.state.borrow_mut();
        state.commands.push(Command::Reinit);
        state.loop_around = options.loop_around;
        state.remeasure();
    }

    fn destroy(&mut self) {
        self.state.borrow_mut().destroyed = true;
    }
}

/// Builds [`SimEngine`]s with a fixed slide count and remembers their
/// controls, newest last.
#[derive(Debug)]
pub struct SimEngineFactory {
    slides: Cell<usize>,
    defer_init: Cell<bool>,
    created: RefCell<Vec<SimControl>>,
}

impl SimEngineFactory {
    #[must_use]
    pub fn new(slides: usize) -> Self {
        Self {
            slides: Cell::new(slides),
            defer_init: Cell::new(false),
            created: RefCell::new(Vec::new()),
        }
    }

    /// Engines created from now on wait for [`SimControl::emit_init`].
    #[must_use]
    pub fn with_deferred_init(self) -> Self {
        self.defer_init.set(true);
        self
    }

    /// Slide count for engines created from now on.
    pub fn set_slides(&self, slides: usize) {
        self.slides.set(slides);
    }

    /// Control of the most recently created engine.
    ///
    /// # Panics
    ///
    /// Panics if no engine was created yet.
    #[must_use]
    pub fn last_control(&self) -> SimControl {
        self.created
            .borrow()
            .last()
            .cloned()
            .expect("no SimEngine created yet")
    }

    /// Controls of every engine created, oldest first.
    #[must_use]
    pub fn controls(&self) -> Vec<SimControl> {
        self.created.borrow().clone()
    }
}

impl EngineFactory for SimEngineFactory {
    fn create(&self, config: &CarouselConfig) -> Box<dyn ScrollEngine> {
        let slides = self.slides.get();
        let options = config.engine_options();
        let (engine, control) = if self.defer_init.get() {
            SimEngine::deferred(slides, &options)
        } else {
            SimEngine::new(slides, &options)
        };
        self.created.borrow_mut().push(control);
        tracing::trace!(message = "sim.create", slides);
        Box::new(engine)
    }
}

/// Records labelled invocations so tests can count handler calls.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    log: Rc<RefCell<Vec<String>>>,
}

impl EventRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that records `label` each time it runs.
    pub fn hook<A: ?Sized + 'static>(&self, label: impl Into<String>) -> impl Fn(&A) + 'static {
        let log = Rc::clone(&self.log);
        let label = label.into();
        move |_| log.borrow_mut().push(label.clone())
    }

    /// Record `label` directly.
    pub fn record(&self, label: impl Into<String>) {
        self.log.borrow_mut().push(label.into());
    }

    /// How many times `label` was recorded.
    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.log.borrow().iter().filter(|l| *l == label).count()
    }

    /// Full log, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}
