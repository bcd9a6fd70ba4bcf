#![forbid(unsafe_code)]

//! Shared state cells for derived carousel state.
//!
//! The controller keeps its `CarouselState` in an [`Observable`], and every
//! pagination indicator keeps its own selected/snaps pair in another one.
//! Engine listeners write fresh snapshots; views subscribe and re-render.
//! A write that equals the stored snapshot is dropped, so a `select` that
//! lands on the current snap never reaches a view.
//!
//! Subscribers are held weakly. The [`Subscription`] returned by
//! [`Observable::subscribe`] owns the callback, and dropping it is the only
//! way to unsubscribe. Dead slots are swept on the next change.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, debug_span};
use web_time::Instant;

type Callback<T> = dyn Fn(&T);

struct Store<T> {
    value: T,
    version: u64,
    listeners: Vec<Weak<Callback<T>>>,
}

impl<T> Store<T> {
    /// Drop dead slots and upgrade the rest, in subscription order.
    fn live(&mut self) -> Vec<Rc<Callback<T>>> {
        let mut live = Vec::with_capacity(self.listeners.len());
        self.listeners.retain(|slot| match slot.upgrade() {
            Some(cb) => {
                live.push(cb);
                true
            }
            None => false,
        });
        live
    }
}

/// Version-counted state shared between a writer and its views.
///
/// Clones are handles to one cell. The version moves by one per accepted
/// write and never otherwise.
pub struct Observable<T> {
    cell: Rc<RefCell<Store<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cell = self.cell.borrow();
        f.debug_struct("Observable")
            .field("value", &cell.value)
            .field("version", &cell.version)
            .field("listeners", &cell.listeners.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(RefCell::new(Store {
                value,
                version: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Snapshot of the stored value.
    #[must_use]
    pub fn get(&self) -> T {
        self.cell.borrow().value.clone()
    }

    /// Read one field without cloning the whole snapshot.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.borrow().value)
    }

    /// Store `value` and tell subscribers. Returns `false`, and tells no
    /// one, when it equals the stored value.
    ///
    /// Subscribers may write back into the same observable.
    pub fn set(&self, value: T) -> bool {
        let version = {
            let mut cell = self.cell.borrow_mut();
            if cell.value == value {
                return false;
            }
            cell.value = value;
            cell.version += 1;
            cell.version
        };
        self.publish(version);
        true
    }

    /// Run `callback` after every accepted write until the guard drops.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let owned: Rc<Callback<T>> = Rc::new(callback);
        self.cell.borrow_mut().listeners.push(Rc::downgrade(&owned));
        Subscription {
            _owned: Box::new(owned),
        }
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.cell.borrow().version
    }

    /// Subscriber slots, counting dropped ones not yet swept.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.cell.borrow().listeners.len()
    }

    fn publish(&self, version: u64) {
        let (callbacks, value) = {
            let mut cell = self.cell.borrow_mut();
            let callbacks = cell.live();
            if callbacks.is_empty() {
                return;
            }
            (callbacks, cell.value.clone())
        };

        let subscribers = callbacks.len() as u64;
        let span = debug_span!(
            "reel.state.propagate",
            version,
            subscribers,
            duration_us = tracing::field::Empty
        );
        let _entered = span.enter();
        let started = Instant::now();
        callbacks.iter().for_each(|cb| cb(&value));
        let duration_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        span.record("duration_us", duration_us);
        debug!(version, subscribers, duration_us, "state propagated");
    }
}

/// Owns a subscriber callback. Drop it to unsubscribe.
pub struct Subscription {
    _owned: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
