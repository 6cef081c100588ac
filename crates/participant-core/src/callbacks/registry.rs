//! Ordered listener registry with synchronous dispatch

use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex, ReentrantMutexGuard};

use super::listener::{notify, ParticipantDeviceListener};
use crate::device::ParticipantDevice;
use crate::events::ParticipantDeviceEvent;

type ListenerRef = Arc<dyn ParticipantDeviceListener>;

/// True when both handles point at the same listener object
pub fn same_listener<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// One `add` of a listener. The token tells repeated registrations of the
/// same listener apart.
struct Registration {
    token: u64,
    listener: ListenerRef,
}

#[derive(Default)]
struct Registrations {
    next_token: u64,
    entries: Vec<Registration>,
}

impl Registrations {
    fn holds(&self, token: u64) -> bool {
        self.entries.iter().any(|r| r.token == token)
    }
}

/// Listeners of one device, kept in registration order
pub(crate) struct CallbackRegistry {
    listeners: Mutex<Registrations>,
    current: Mutex<Option<ListenerRef>>,
    // One dispatcher per device at a time; re-entrant for nested notifications.
    dispatch_lock: ReentrantMutex<()>,
}

/// Restores the previous "current" listener when an invocation ends
struct CurrentGuard<'a> {
    slot: &'a Mutex<Option<ListenerRef>>,
    previous: Option<ListenerRef>,
}

impl Drop for CurrentGuard<'_> {
    fn drop(&mut self) {
        *self.slot.lock() = self.previous.take();
    }
}

impl CallbackRegistry {
    pub(crate) fn new() -> Self {
        Self {
            listeners: Mutex::new(Registrations::default()),
            current: Mutex::new(None),
            dispatch_lock: ReentrantMutex::new(()),
        }
    }

    pub(crate) fn add(&self, listener: ListenerRef) {
        let mut listeners = self.listeners.lock();
        let token = listeners.next_token;
        listeners.next_token += 1;
        listeners.entries.push(Registration { token, listener });
    }

    /// Remove the first registration of `listener`
    pub(crate) fn remove<L: ParticipantDeviceListener + ?Sized>(&self, listener: &Arc<L>) -> bool {
        let mut listeners = self.listeners.lock();
        match listeners
            .entries
            .iter()
            .position(|r| same_listener(&r.listener, listener))
        {
            Some(pos) => {
                listeners.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.lock().entries.len()
    }

    pub(crate) fn current(&self) -> Option<ListenerRef> {
        self.current.lock().clone()
    }

    /// Hold off dispatch from other threads until the guard drops.
    ///
    /// Mutators take this before writing state so that listeners observe
    /// changes in the order they were stored.
    pub(crate) fn serialize(&self) -> ReentrantMutexGuard<'_, ()> {
        self.dispatch_lock.lock()
    }

    /// Invoke every registered listener in order.
    ///
    /// Works on a snapshot of registrations. A registration made during
    /// dispatch sees the next event, one withdrawn during dispatch is
    /// skipped, even if the same listener was registered again meanwhile.
    pub(crate) fn dispatch(&self, device: &ParticipantDevice, event: &ParticipantDeviceEvent) {
        let _dispatching = self.dispatch_lock.lock();
        let snapshot: Vec<(u64, ListenerRef)> = self
            .listeners
            .lock()
            .entries
            .iter()
            .map(|r| (r.token, r.listener.clone()))
            .collect();

        for (token, listener) in snapshot {
            if !self.listeners.lock().holds(token) {
                continue;
            }

            let previous = self.current.lock().replace(listener.clone());
            let _guard = CurrentGuard {
                slot: &self.current,
                previous,
            };
            notify(listener.as_ref(), device, event);
        }
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("listeners", &self.len())
            .field("dispatching", &self.current.lock().is_some())
            .finish()
    }
}
