#![forbid(unsafe_code)]

//! Multi-subscriber broadcast channel.
//!
//! # Design
//!
//! [`EventChannel<T>`] keeps an ordered list of subscriber callbacks in
//! shared storage (`Rc<RefCell<..>>`). [`EventChannel::emit`] calls every
//! current subscriber in subscription order. There is no replay: a
//! subscriber only sees events emitted after it subscribed.
//!
//! Subscribing returns a [`Subscription`] guard. Dropping the guard (or
//! calling [`Subscription::unsubscribe`]) removes the callback immediately,
//! so [`EventChannel::subscriber_count`] is an exact reference count. Callers
//! use it to skip building an event nobody will see.
//!
//! # Invariants
//!
//! 1. Subscribers are notified in registration order.
//! 2. `subscriber_count()` equals the number of live guards.
//! 3. After [`close`](EventChannel::close), `emit` is a no-op and
//!    `subscribe` returns [`ChannelClosed`].
//! 4. A delivery deferred by a [`BatchScope`](super::batch::BatchScope) is
//!    dropped if its subscriber unsubscribes or the channel closes before
//!    the flush.
//!
//! # Failure Modes
//!
//! - **Re-entrant emit**: callbacks are collected before any is invoked, so a
//!   callback may subscribe, unsubscribe, or emit on the same channel.
//!   Subscribers added during an emit are not called for that emit.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use super::batch;

type Callback<T> = Rc<dyn Fn(&T)>;

struct Subscriber<T> {
    id: u64,
    callback: Callback<T>,
}

struct ChannelInner<T> {
    label: &'static str,
    subscribers: Vec<Subscriber<T>>,
    next_id: u64,
    closed: bool,
}

impl<T> ChannelInner<T> {
    fn contains(&self, id: u64) -> bool {
        self.subscribers.iter().any(|s| s.id == id)
    }
}

/// Type-erased view of a channel used by [`Subscription`].
trait SubscriberRegistry {
    fn remove(&self, id: u64);
    fn contains(&self, id: u64) -> bool;
}

impl<T> SubscriberRegistry for RefCell<ChannelInner<T>> {
    fn remove(&self, id: u64) {
        let removed = {
            let mut inner = self.borrow_mut();
            let index = inner.subscribers.iter().position(|s| s.id == id);
            index.map(|index| inner.subscribers.remove(index))
        };
        // The callback may own guards on this channel; drop it unborrowed.
        drop(removed);
    }

    fn contains(&self, id: u64) -> bool {
        self.borrow().contains(id)
    }
}

/// A broadcast channel for one kind of notification.
///
/// Cloning an `EventChannel` creates a new handle to the **same** channel.
pub struct EventChannel<T> {
    inner: Rc<RefCell<ChannelInner<T>>>,
}

impl<T> Clone for EventChannel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("EventChannel")
            .field("label", &inner.label)
            .field("subscriber_count", &inner.subscribers.len())
            .field("closed", &inner.closed)
            .finish()
    }
}

impl<T: Clone + 'static> EventChannel<T> {
    /// Create an open channel. `label` names the channel in logs.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ChannelInner {
                label,
                subscribers: Vec::new(),
                next_id: 1,
                closed: false,
            })),
        }
    }

    /// Label given at construction.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.inner.borrow().label
    }

    /// Register a callback for future events.
    ///
    /// Fails with [`ChannelClosed`] once the channel has been closed.
    pub fn subscribe(
        &self,
        callback: impl Fn(&T) + 'static,
    ) -> Result<Subscription, ChannelClosed> {
        let mut inner = self.inner.borrow_mut();
        if inner.closed {
            return Err(ChannelClosed { label: inner.label });
        }
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push(Subscriber {
            id,
            callback: Rc::new(callback),
        });
        trace!(channel = inner.label, id, "subscribed");

        let weak: Weak<RefCell<ChannelInner<T>>> = Rc::downgrade(&self.inner);
        let registry: Weak<dyn SubscriberRegistry> = weak;
        Ok(Subscription {
            id,
            registry: Some(registry),
        })
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Whether at least one subscriber is attached.
    #[must_use]
    pub fn has_subscribers(&self) -> bool {
        !self.inner.borrow().subscribers.is_empty()
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.borrow().closed
    }

    /// Deliver `value` to every current subscriber, in subscription order.
    ///
    /// Inside a [`BatchScope`](super::batch::BatchScope) each delivery is
    /// queued until the outermost scope exits. Returns the number of
    /// subscribers the value was delivered or queued for.
    pub fn emit(&self, value: &T) -> usize {
        // Collect first so callbacks never run under our borrow.
        let (label, targets): (&'static str, Vec<(u64, Callback<T>)>) = {
            let inner = self.inner.borrow();
            if inner.closed {
                return 0;
            }
            (
                inner.label,
                inner
                    .subscribers
                    .iter()
                    .map(|s| (s.id, Rc::clone(&s.callback)))
                    .collect(),
            )
        };

        if targets.is_empty() {
            return 0;
        }

        let count = targets.len();
        trace!(channel = label, subscribers = count, "emit");

        if batch::is_batching() {
            for (id, callback) in targets {
                let channel = Rc::downgrade(&self.inner);
                let value = value.clone();
                batch::defer_or_run(move || {
                    let live = channel.upgrade().is_some_and(|inner| {
                        let inner = inner.borrow();
                        !inner.closed && inner.contains(id)
                    });
                    if live {
                        callback(&value);
                    }
                });
            }
            return count;
        }

        for (id, callback) in targets {
            // An earlier callback in this emit may have unsubscribed this one.
            if self.inner.borrow().contains(id) {
                callback(value);
            }
        }
        count
    }

    /// Drop every subscriber and refuse further subscriptions.
    ///
    /// Closing twice is a no-op.
    pub fn close(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.closed {
            return;
        }
        inner.closed = true;
        let dropped = inner.subscribers.len();
        let subscribers = std::mem::take(&mut inner.subscribers);
        let label = inner.label;
        drop(inner);
        // Release callbacks outside the borrow; their captures may own guards.
        drop(subscribers);
        debug!(channel = label, dropped, "channel closed");
    }
}

/// RAII guard for a channel subscription.
///
/// Dropping the guard unsubscribes. [`unsubscribe`](Self::unsubscribe) may
/// be called any number of times.
pub struct Subscription {
    id: u64,
    registry: Option<Weak<dyn SubscriberRegistry>>,
}

impl Subscription {
    /// Remove the callback from its channel. Idempotent.
    pub fn unsubscribe(&mut self) {
        if let Some(registry) = self.registry.take()
            && let Some(registry) = registry.upgrade()
        {
            registry.remove(self.id);
        }
    }

    /// Whether the callback is still registered on an open channel.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|registry| registry.contains(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Returned when subscribing to a closed channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelClosed {
    pub label: &'static str,
}

impl fmt::Display for ChannelClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channel `{}` is closed", self.label)
    }
}

impl std::error::Error for ChannelClosed {}
