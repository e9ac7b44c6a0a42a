#![forbid(unsafe_code)]

//! Single-slot observable value with synchronous change notification.
//!
//! # Design
//!
//! [`Observable<T>`] wraps a value in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). Publishing a value notifies every live subscriber, in
//! registration order, before the publishing call returns. There is no event
//! log: a subscriber registered after a change only sees later changes.
//!
//! Two publishing flavours exist:
//!
//! - [`set`](Observable::set) skips notification when the new value equals the
//!   current one.
//! - [`replace`](Observable::replace) always notifies. Theme selection uses
//!   this so that re-selecting the same theme with a new transition still
//!   reaches observers.
//!
//! # Failure Modes
//!
//! - **Subscriber leak**: `Subscription` guards stored forever keep their
//!   callbacks alive. Dead weak references are pruned lazily on notify.
//! - **Re-entrancy**: no borrow is held while callbacks run, so a callback may
//!   read or publish to the same observable. A nested publish delivers the
//!   nested value to every subscriber and the outer delivery then stops, so
//!   the last value each subscriber sees is the stored one.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug_span, trace};
use web_time::Instant;

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct ObservableInner<T> {
    value: T,
    version: u64,
    /// Weak references; dead entries are pruned on notify.
    subscribers: Vec<CallbackWeak<T>>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` creates a new handle to the **same** state.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each published value.
/// 2. `set(v)` where `v == current` is a no-op.
/// 3. Subscribers are notified in registration order.
/// 4. The stored value is replaced before any subscriber runs.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable. The initial version is 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Store `value` and notify, unless it equals the current value.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Store `value` and notify unconditionally.
    pub fn replace(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Modify the value in place. Notifies only if the value changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let old = inner.value.clone();
            f(&mut inner.value);
            if inner.value != old {
                inner.version += 1;
                true
            } else {
                false
            }
        };
        if changed {
            self.notify();
        }
    }

    /// Subscribe to published values.
    ///
    /// Dropping the returned [`Subscription`] unsubscribes the callback.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        let weak = Rc::downgrade(&strong);
        self.inner.borrow_mut().subscribers.push(weak);
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Number of published values so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// True if both handles share the same state.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self) {
        // Collect live callbacks first so no borrow is held during calls.
        let (callbacks, value, version) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            let callbacks: Vec<CallbackRc<T>> = inner
                .subscribers
                .iter()
                .filter_map(|w| w.upgrade())
                .collect();
            (callbacks, inner.value.clone(), inner.version)
        };

        if callbacks.is_empty() {
            return;
        }

        let started = Instant::now();
        let _span = debug_span!(
            "themeparty.notify",
            version,
            subscribers = callbacks.len() as u64
        )
        .entered();

        for cb in &callbacks {
            // A nested publish already delivered a newer value to everyone.
            if self.inner.borrow().version != version {
                trace!(version, "delivery superseded by nested publish");
                break;
            }
            cb(&value);
        }

        trace!(
            duration_us = started.elapsed().as_micros() as u64,
            "observable delivery complete"
        );
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping it releases the strong reference to the callback, so the weak
/// entry in the observable fails to upgrade on the next notification.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
