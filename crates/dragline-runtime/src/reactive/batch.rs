#![forbid(unsafe_code)]

//! Batched delivery of channel notifications.
//!
//! While a [`BatchScope`] is alive, [`EventChannel::emit`] queues each
//! delivery instead of calling subscribers directly. The queue is flushed when
//! the outermost scope drops. Hosts use this to run subscriber side effects
//! after their own input handling has finished, for example after releasing a
//! `RefCell` borrow on the drag session.
//!
//! ```
//! use dragline_runtime::{BatchScope, EventChannel};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let channel = EventChannel::<u32>::new("demo");
//! let seen = Rc::new(Cell::new(0));
//! let sink = Rc::clone(&seen);
//! let _sub = channel.subscribe(move |v| sink.set(*v)).unwrap();
//!
//! {
//!     let _batch = BatchScope::new();
//!     channel.emit(&7);
//!     assert_eq!(seen.get(), 0); // deferred
//! }
//! assert_eq!(seen.get(), 7);
//! ```
//!
//! # Invariants
//!
//! 1. Nested batches are supported: only the outermost scope triggers flush.
//! 2. Flush calls deferred deliveries in the order they were enqueued.
//!
//! # Failure Modes
//!
//! - **Callback panics during flush**: Remaining callbacks are still called.
//!   The first panic is re-raised after all callbacks have been attempted.
//!
//! [`EventChannel::emit`]: super::channel::EventChannel::emit

use std::cell::RefCell;
use tracing::{debug, debug_span};

type Deferred = Box<dyn FnOnce()>;

/// Thread-local batch context.
struct BatchContext {
    /// Nesting depth. Only flush when this reaches 0.
    depth: u32,
    /// Queued deliveries to fire on flush.
    deferred: Vec<Deferred>,
}

thread_local! {
    static BATCH_CTX: RefCell<Option<BatchContext>> = const { RefCell::new(None) };
}

/// Returns true if a batch is currently active on this thread.
pub fn is_batching() -> bool {
    BATCH_CTX.with(|ctx| ctx.borrow().is_some())
}

/// Enqueue `f` to run when the current batch exits.
///
/// If no batch is active, `f` runs immediately.
///
/// Returns `true` if the call was deferred, `false` if it ran immediately.
pub fn defer_or_run(f: impl FnOnce() + 'static) -> bool {
    BATCH_CTX.with(|ctx| {
        let mut guard = ctx.borrow_mut();
        if let Some(ref mut batch) = *guard {
            batch.deferred.push(Box::new(f));
            true
        } else {
            drop(guard); // Release borrow before calling f.
            f();
            false
        }
    })
}

/// Number of deliveries waiting for the current batch to exit.
pub fn pending() -> usize {
    BATCH_CTX.with(|ctx| {
        ctx.borrow()
            .as_ref()
            .map_or(0, |batch| batch.deferred.len())
    })
}

/// Run every queued delivery, returning the first panic payload, if any.
fn flush() -> Option<Box<dyn std::any::Any + Send>> {
    let deferred: Vec<Deferred> = BATCH_CTX.with(|ctx| {
        ctx.borrow_mut()
            .as_mut()
            .map(|batch| std::mem::take(&mut batch.deferred))
            .unwrap_or_default()
    });

    if deferred.is_empty() {
        return None;
    }

    let _span = debug_span!("dragline.flush", deliveries = deferred.len()).entered();

    // Run outside the borrow. A panicking callback does not starve the rest.
    let mut first_panic: Option<Box<dyn std::any::Any + Send>> = None;
    for notify in deferred {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(notify));
        if let Err(payload) = result
            && first_panic.is_none()
        {
            first_panic = Some(payload);
        }
    }

    debug!("batched deliveries flushed");
    first_panic
}

/// RAII guard that batches channel deliveries.
///
/// Deliveries emitted while the guard is alive are queued. When the outermost
/// guard drops, the queue is flushed.
pub struct BatchScope {
    _private: (),
}

impl BatchScope {
    /// Begin a new batch scope.
    #[must_use]
    pub fn new() -> Self {
        BATCH_CTX.with(|ctx| {
            let mut guard = ctx.borrow_mut();
            match *guard {
                Some(ref mut batch) => batch.depth += 1,
                None => {
                    *guard = Some(BatchContext {
                        depth: 1,
                        deferred: Vec::new(),
                    });
                }
            }
        });
        Self { _private: () }
    }
}

impl Default for BatchScope {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BatchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchScope")
            .field("pending", &pending())
            .finish()
    }
}

impl Drop for BatchScope {
    fn drop(&mut self) {
        let should_flush = BATCH_CTX.with(|ctx| {
            let mut guard = ctx.borrow_mut();
            match *guard {
                Some(ref mut batch) if batch.depth > 1 => {
                    batch.depth -= 1;
                    false
                }
                Some(_) => true,
                None => false,
            }
        });

        if should_flush {
            // Flush while the context still exists so deliveries emitted from
            // callbacks queue behind the current ones.
            let mut first_panic = None;
            while pending() > 0 {
                let panic = flush();
                if first_panic.is_none() {
                    first_panic = panic;
                }
            }
            BATCH_CTX.with(|ctx| {
                *ctx.borrow_mut() = None;
            });
            if let Some(payload) = first_panic {
                std::panic::resume_unwind(payload);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn runs_immediately_without_scope() {
        let hit = Rc::new(Cell::new(false));
        let h = Rc::clone(&hit);
        assert!(!defer_or_run(move || h.set(true)));
        assert!(hit.get());
        assert!(!is_batching());
    }

    #[test]
    fn defers_until_scope_exit() {
        let hit = Rc::new(Cell::new(0));
        {
            let _scope = BatchScope::new();
            assert!(is_batching());
            let h = Rc::clone(&hit);
            assert!(defer_or_run(move || h.set(h.get() + 1)));
            assert_eq!(pending(), 1);
            assert_eq!(hit.get(), 0);
        }
        assert_eq!(hit.get(), 1);
        assert!(!is_batching());
    }

    #[test]
    fn nested_scopes_flush_once_at_outermost() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let _outer = BatchScope::new();
            {
                let _inner = BatchScope::new();
                let l = Rc::clone(&log);
                defer_or_run(move || l.borrow_mut().push("inner"));
            }
            assert!(log.borrow().is_empty());
            let l = Rc::clone(&log);
            defer_or_run(move || l.borrow_mut().push("outer"));
        }
        assert_eq!(*log.borrow(), vec!["inner", "outer"]);
    }

    #[test]
    fn reentrant_defer_during_flush_still_runs() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let _scope = BatchScope::new();
            let l = Rc::clone(&log);
            defer_or_run(move || {
                l.borrow_mut().push(1);
                let l2 = Rc::clone(&l);
                defer_or_run(move || l2.borrow_mut().push(2));
            });
        }
        assert_eq!(*log.borrow(), vec![1, 2]);
        assert!(!is_batching());
    }

    #[test]
    fn panic_in_flush_runs_remaining_callbacks() {
        let hit = Rc::new(Cell::new(false));
        let h = Rc::clone(&hit);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scope = BatchScope::new();
            defer_or_run(|| panic!("subscriber failure"));
            defer_or_run(move || h.set(true));
        }));
        assert!(result.is_err());
        assert!(hit.get());
        assert!(!is_batching());
    }
}
