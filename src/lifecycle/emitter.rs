// SPDX-License-Identifier: MPL-2.0
//! Single-threaded change stream.

use super::Subscription;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Callback registered with a collaborator.
///
/// Listeners are `Send` so that adapters delivering from a background thread
/// (such as the filesystem watcher) can share the same signature.
pub type Listener<T> = Box<dyn Fn(T) + Send + 'static>;

type Registry<T> = RefCell<Vec<(u64, Rc<dyn Fn(T) + Send>)>>;

/// Fan-out of values of type `T` to every subscribed listener.
pub struct Emitter<T> {
    listeners: Rc<Registry<T>>,
    next_id: RefCell<u64>,
}

impl<T: Clone + 'static> Emitter<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: RefCell::new(0),
        }
    }

    /// Registers `listener`; disposing the returned handle unregisters it.
    pub fn subscribe(&self, listener: Listener<T>) -> Subscription {
        let id = {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            *next
        };
        self.listeners.borrow_mut().push((id, Rc::from(listener)));

        let registry: Weak<Registry<T>> = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Delivers `value` to the listeners registered when the call starts.
    pub fn fire(&self, value: T) {
        let snapshot: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(value.clone());
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<T: Clone + 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}
