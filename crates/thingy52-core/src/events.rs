//! Typed listener registry for sensor events.
//!
//! One topic per sensor kind. Listeners fire in registration order, and
//! each registration returns a [`Registration`] handle that unsubscribes
//! exactly that listener. Delivery happens on the thread the driver
//! callback arrives on; the host serializes callbacks per session, so
//! listeners never observe concurrent dispatch within one session.

use std::sync::{Arc, Mutex, Weak};

use thingy52_types::{AccelerometerChange, BatteryChange, ButtonChange, TemperatureChange};

use crate::util::lock;

/// Handle returned by listener registration.
///
/// Dropping the handle keeps the listener subscribed; call
/// [`Registration::remove`] to unsubscribe. Removing one registration
/// leaves every other listener on the topic untouched.
pub struct Registration {
    remove: Option<Box<dyn FnOnce() + Send>>,
}

impl Registration {
    /// Unsubscribe the listener this handle was returned for.
    pub fn remove(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration").finish_non_exhaustive()
    }
}

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct TopicInner<E> {
    next_id: u64,
    entries: Vec<(u64, Listener<E>)>,
}

/// A single event topic with registration-order delivery.
pub(crate) struct Topic<E> {
    inner: Arc<Mutex<TopicInner<E>>>,
}

impl<E: Send + 'static> Topic<E> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(TopicInner {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    pub(crate) fn add(&self, listener: impl Fn(&E) + Send + Sync + 'static) -> Registration {
        let id = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.push((id, Arc::new(listener)));
            id
        };

        let weak: Weak<Mutex<TopicInner<E>>> = Arc::downgrade(&self.inner);
        Registration {
            remove: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner).entries.retain(|(entry_id, _)| *entry_id != id);
                }
            })),
        }
    }

    pub(crate) fn dispatch(&self, event: &E) {
        // Snapshot outside the lock so a listener can register or remove
        // without deadlocking.
        let listeners: Vec<Listener<E>> = lock(&self.inner)
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        lock(&self.inner).entries.len()
    }
}

/// The four sensor topics owned by one proxy.
pub(crate) struct EventBus {
    pub(crate) battery: Topic<BatteryChange>,
    pub(crate) button: Topic<ButtonChange>,
    pub(crate) accelerometer: Topic<AccelerometerChange>,
    pub(crate) temperature: Topic<TemperatureChange>,
}

impl EventBus {
    pub(crate) fn new() -> Self {
        Self {
            battery: Topic::new(),
            button: Topic::new(),
            accelerometer: Topic::new(),
            temperature: Topic::new(),
        }
    }
}
