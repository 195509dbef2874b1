//! Listener registration and fan-out
//!
//! Each event-emitting proxy owns one [`HandlerList`] per event type.
//! Registration is safe from any thread, including while a dispatch is in
//! progress on another one.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

/// An ordered collection of listeners for one event type
///
/// Notification happens in registration order. The same handler may be
/// registered several times and will then be invoked once per registration;
/// removal matches by `Arc` identity and drops the first matching entry.
pub struct HandlerList<H: ?Sized> {
    handlers: RwLock<Vec<Arc<H>>>,
}

impl<H: ?Sized> HandlerList<H> {
    /// Create an empty list
    pub fn new() -> HandlerList<H> {
        HandlerList {
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Append a handler
    pub fn add(&self, handler: Arc<H>) {
        self.handlers.write().unwrap().push(handler);
    }

    /// Remove the first entry registered from the same `Arc` as `handler`
    ///
    /// Does nothing if the handler is not present.
    pub fn remove(&self, handler: &Arc<H>) {
        let mut handlers = self.handlers.write().unwrap();
        if let Some(idx) = handlers.iter().position(|h| Arc::ptr_eq(h, handler)) {
            handlers.remove(idx);
        }
    }

    /// Number of currently registered handlers
    pub fn len(&self) -> usize {
        self.handlers.read().unwrap().len()
    }

    /// Whether no handler is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke `invoke` once per registered handler, in registration order
    ///
    /// The list is snapshotted under the read lock and the handlers run
    /// outside of it, so a slow handler never stalls concurrent `add` or
    /// `remove` calls. A handler removed concurrently with the fan-out may
    /// still see this one event. A panicking handler is logged and does not
    /// prevent the remaining handlers from running.
    pub fn notify<F: Fn(&H)>(&self, invoke: F) {
        let snapshot: Vec<Arc<H>> = self.handlers.read().unwrap().clone();
        for handler in snapshot {
            if panic::catch_unwind(AssertUnwindSafe(|| invoke(&handler))).is_err() {
                log::error!("a listener panicked during event dispatch");
            }
        }
    }
}

impl<H: ?Sized> Default for HandlerList<H> {
    fn default() -> HandlerList<H> {
        HandlerList::new()
    }
}
