#![forbid(unsafe_code)]

//! Keyed listener table with disposer handles.
//!
//! Every registration returns a [`Disposer`]. Disposing it is the only way
//! to remove the listener, and `dispose` consumes the handle, so a listener
//! is released exactly once: explicitly through [`Disposer::dispose`], or
//! implicitly when the disposer is dropped.
//!
//! # How dispatch works
//!
//! 1. [`ListenerTable::emit`] snapshots the listeners registered for a key
//! 2. The table borrow is released before any callback runs
//! 3. Each snapshotted listener is re-checked before it is invoked, so one
//!    disposed by an earlier callback in the same pass is skipped
//!
//! Callbacks may therefore register and dispose listeners freely.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Identifier of one registration, unique within its table.
pub type ListenerId = u64;

type Callback<A> = Rc<dyn Fn(&A)>;

struct Entry<K, A> {
    id: ListenerId,
    key: K,
    callback: Callback<A>,
}

struct TableInner<K, A> {
    next_id: ListenerId,
    entries: Vec<Entry<K, A>>,
}

/// Type-erased removal so a [`Disposer`] need not carry the table's types.
trait Release {
    fn release(&self, id: ListenerId) -> bool;
}

impl<K, A> Release for RefCell<TableInner<K, A>> {
    fn release(&self, id: ListenerId) -> bool {
        // Callbacks may own disposers; drop the entry after the borrow ends.
        let removed = {
            let mut inner = self.borrow_mut();
            let position = inner.entries.iter().position(|entry| entry.id == id);
            position.map(|pos| inner.entries.remove(pos))
        };
        removed.is_some()
    }
}

/// Ordered listeners keyed by event.
///
/// Listeners for the same key run in registration order.
pub struct ListenerTable<K, A> {
    inner: Rc<RefCell<TableInner<K, A>>>,
}

impl<K, A> Default for ListenerTable<K, A> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(TableInner {
                next_id: 1,
                entries: Vec::new(),
            })),
        }
    }
}

impl<K: fmt::Debug, A> fmt::Debug for ListenerTable<K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        let keys: Vec<&K> = inner.entries.iter().map(|e| &e.key).collect();
        f.debug_struct("ListenerTable").field("keys", &keys).finish()
    }
}

impl<K, A> ListenerTable<K, A>
where
    K: Copy + PartialEq + fmt::Debug + 'static,
    A: 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `key`.
    pub fn add(&self, key: K, callback: impl Fn(&A) + 'static) -> Disposer {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.push(Entry {
                id,
                key,
                callback: Rc::new(callback),
            });
            id
        };
        let table: Weak<dyn Release> = Rc::downgrade(&self.inner) as Weak<dyn Release>;
        Disposer {
            id,
            label: format!("{key:?}"),
            table: Some(table),
        }
    }

    /// Invoke every listener registered for `key`. Returns how many ran.
    pub fn emit(&self, key: K, arg: &A) -> usize {
        let snapshot: Vec<(ListenerId, Callback<A>)> = {
            let inner = self.inner.borrow();
            inner
                .entries
                .iter()
                .filter(|entry| entry.key == key)
                .map(|entry| (entry.id, Rc::clone(&entry.callback)))
                .collect()
        };

        let mut invoked = 0;
        for (id, callback) in snapshot {
            if !self.contains(id) {
                continue;
            }
            callback(arg);
            invoked += 1;
        }
        invoked
    }

    /// Whether registration `id` is still live.
    #[must_use]
    pub fn contains(&self, id: ListenerId) -> bool {
        self.inner.borrow().entries.iter().any(|entry| entry.id == id)
    }

    /// Number of live listeners for `key`.
    #[must_use]
    pub fn count(&self, key: K) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.key == key)
            .count()
    }

    /// Number of live listeners across all keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every listener. Outstanding disposers become no-ops.
    pub fn clear(&self) -> usize {
        let removed = std::mem::take(&mut self.inner.borrow_mut().entries);
        removed.len()
    }
}

/// Handle to one registration.
///
/// Disposing (or dropping) it removes the listener. If the table is gone or
/// was cleared, disposal is a no-op.
#[must_use = "dropping a Disposer immediately removes its listener"]
pub struct Disposer {
    id: ListenerId,
    label: String,
    table: Option<Weak<dyn Release>>,
}

impl Disposer {
    /// Registration id.
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener. Returns `true` if it was still registered.
    pub fn dispose(mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        let Some(table) = self.table.take() else {
            return false;
        };
        let removed = table.upgrade().is_some_and(|table| table.release(self.id));
        tracing::trace!(
            message = "listener.dispose",
            listener = self.id,
            event = %self.label,
            removed
        );
        removed
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Disposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposer")
            .field("id", &self.id)
            .field("event", &self.label)
            .field("pending", &self.table.is_some())
            .finish()
    }
}

/// A set of disposers released together, in registration order.
#[derive(Debug, Default)]
pub struct DisposerBag {
    disposers: Vec<Disposer>,
}

impl DisposerBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a disposer.
    pub fn push(&mut self, disposer: Disposer) {
        self.disposers.push(disposer);
    }

    /// Number of held disposers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }

    /// Release all held listeners. Returns how many were still registered.
    pub fn dispose_all(&mut self) -> usize {
        self.disposers
            .drain(..)
            .map(Disposer::dispose)
            .filter(|removed| *removed)
            .count()
    }
}

impl Extend<Disposer> for DisposerBag {
    fn extend<T: IntoIterator<Item = Disposer>>(&mut self, iter: T) {
        self.disposers.extend(iter);
    }
}
