#![forbid(unsafe_code)]

//! Capability boundary for the external scroll/snap engine.
//!
//! The carousel layer makes no assumption about how an engine computes snap
//! points or animates between them. It needs the navigation commands, the
//! boundary and selection queries, and an ordered stream of lifecycle
//! events, which the adapter in `reel-runtime` drains with
//! [`ScrollEngine::take_events`] after every command.

use crate::config::{CarouselConfig, EngineOptions};

/// A snap position as reported by the engine.
pub type SnapPosition = i64;

/// Lifecycle events emitted by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineEvent {
    /// The engine finished its first layout pass.
    Init,
    /// Geometry or options changed; derived state must be recomputed.
    ReInit,
    /// The selected snap changed.
    Select,
}

impl EngineEvent {
    /// Event name as the engine reports it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::ReInit => "reInit",
            Self::Select => "select",
        }
    }
}

/// A live scroll engine instance.
///
/// Out-of-range `scroll_to` indices are the engine's business: it may clamp,
/// ignore, or wrap them. `scroll_prev`/`scroll_next` at a boundary without
/// wraparound must be a no-op.
pub trait ScrollEngine {
    /// Move one snap backwards along the axis.
    fn scroll_prev(&mut self);

    /// Move one snap forwards along the axis.
    fn scroll_next(&mut self);

    /// Jump to snap `index`.
    fn scroll_to(&mut self, index: usize);

    /// Whether a backwards move would change the selection.
    fn can_scroll_prev(&self) -> bool;

    /// Whether a forwards move would change the selection.
    fn can_scroll_next(&self) -> bool;

    /// Index of the selected snap.
    fn selected_scroll_snap(&self) -> usize;

    /// Ordered snap positions.
    fn scroll_snap_list(&self) -> Vec<SnapPosition>;

    /// Events emitted since the last call, oldest first.
    fn take_events(&mut self) -> Vec<EngineEvent>;

    /// Re-measure and re-apply options. The engine queues
    /// [`EngineEvent::ReInit`] when done.
    fn reinit(&mut self, options: &EngineOptions);

    /// Release engine resources. Called at most once.
    fn destroy(&mut self) {}
}

/// Builds engine instances from a carousel configuration.
pub trait EngineFactory {
    /// Create an engine. The engine should queue [`EngineEvent::Init`] once
    /// it is ready; it is not delivered until the owner pumps.
    fn create(&self, config: &CarouselConfig) -> Box<dyn ScrollEngine>;
}

impl<F> EngineFactory for F
where
    F: Fn(&CarouselConfig) -> Box<dyn ScrollEngine>,
{
    fn create(&self, config: &CarouselConfig) -> Box<dyn ScrollEngine> {
        self(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_match_engine_vocabulary() {
        assert_eq!(EngineEvent::Init.name(), "init");
        assert_eq!(EngineEvent::ReInit.name(), "reInit");
        assert_eq!(EngineEvent::Select.name(), "select");
    }
}
