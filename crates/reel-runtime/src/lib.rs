#![forbid(unsafe_code)]

//! Runtime: the scroll engine adapter and the state plumbing around it.
//!
//! # Role in reel
//! `reel-runtime` turns a passive [`reel_core::ScrollEngine`] into a live,
//! shareable handle ([`adapter::EngineApi`]) with an explicit listener table
//! whose registrations are released through [`subscription::Disposer`]
//! handles. Derived UI state is published through
//! [`reactive::Observable`].
//!
//! Everything here is single-threaded (`Rc`/`RefCell`): engine events and
//! input events are delivered one at a time on the host's event loop.

pub mod adapter;
pub mod reactive;
pub mod subscription;

pub use adapter::{CarouselId, EngineApi, EngineOwner};
pub use reactive::{Observable, Subscription};
pub use subscription::{Disposer, DisposerBag, ListenerId, ListenerTable};
