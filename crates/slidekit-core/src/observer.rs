//! Explicit publish/subscribe for frames and decisions.
//!
//! Subscribers are keyed by id so several listeners (a renderer, a debug
//! overlay, a test recorder) can watch the same pager. Dropping the returned
//! [`Subscription`] removes the listener.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: Cell<u64>,
    listeners: RefCell<FxHashMap<u64, Listener<T>>>,
}

pub struct Publisher<T> {
    registry: Rc<Registry<T>>,
}

impl<T: 'static> Publisher<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(Registry {
                next_id: Cell::new(0),
                listeners: RefCell::new(FxHashMap::default()),
            }),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        self.registry
            .listeners
            .borrow_mut()
            .insert(id, Rc::new(listener));

        let registry: Weak<Registry<T>> = Rc::downgrade(&self.registry);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.listeners.borrow_mut().remove(&id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.listeners.borrow().len()
    }

    /// Calls every listener with `value`. Listeners may subscribe or
    /// unsubscribe while being notified; changes apply from the next publish.
    pub fn publish(&self, value: &T) {
        let listeners: SmallVec<[Listener<T>; 4]> = {
            let mut entries: SmallVec<[(u64, Listener<T>); 4]> = self
                .registry
                .listeners
                .borrow()
                .iter()
                .map(|(id, listener)| (*id, Rc::clone(listener)))
                .collect();
            entries.sort_by_key(|(id, _)| *id);
            entries.into_iter().map(|(_, listener)| listener).collect()
        };
        for listener in listeners {
            listener(value);
        }
    }
}

impl<T: 'static> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Publisher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("subscribers", &self.registry.listeners.borrow().len())
            .finish()
    }
}

/// Keeps a listener registered until dropped or cancelled.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keeps the listener registered for as long as the publisher lives.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
