//! Synchronous publish/subscribe state stream.
//!
//! A [`Subject`] holds the latest value and pushes every new one to its
//! listeners inline, in registration order. New listeners receive the
//! current value immediately. [`Subscription`] guards release their listener
//! on [`Subscription::unsubscribe`] or on drop.
//!
//! Listeners registered or removed while a notification is running take
//! effect from the next publish.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<V> = Rc<dyn Fn(&V)>;

struct Inner<V> {
    value: V,
    listeners: Vec<(u64, Listener<V>)>,
    next_id: u64,
}

/// Single-threaded state stream with synchronous delivery.
pub struct Subject<V> {
    inner: Rc<RefCell<Inner<V>>>,
}

impl<V: Clone + 'static> Subject<V> {
    pub fn new(value: V) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Current value.
    pub fn get(&self) -> V {
        self.inner.borrow().value.clone()
    }

    /// Replace the value and notify every listener before returning.
    pub fn publish(&self, value: V) {
        let listeners: Vec<Listener<V>> = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.clone();
            inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
        };
        for listener in listeners {
            listener(&value);
        }
    }

    /// Register a listener. It is called with the current value right away.
    pub fn subscribe(&self, listener: impl Fn(&V) + 'static) -> Subscription {
        let listener: Listener<V> = Rc::new(listener);
        let (id, current) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Rc::clone(&listener)));
            (id, inner.value.clone())
        };
        listener(&current);

        let weak: Weak<RefCell<Inner<V>>> = Rc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().listeners.retain(|(other, _)| *other != id);
                }
            })),
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl<V> fmt::Debug for Subject<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("listeners", &self.inner.borrow().listeners.len())
            .finish_non_exhaustive()
    }
}

/// Guard for a registered listener.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
