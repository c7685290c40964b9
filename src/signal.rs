//! Payload-free change notification.
//!
//! A [`ChangeSignal`] is a list of listeners that are invoked synchronously,
//! in subscription order, every time [`ChangeSignal::emit`] is called.
//! Subscribing returns a [`Subscription`] handle; the subscriber releases its
//! registration by handing the handle back to [`ChangeSignal::unsubscribe`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn()>;

/// Registration handle returned by [`ChangeSignal::subscribe`].
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping the handle makes the listener impossible to unsubscribe"]
pub struct Subscription(u64);

#[derive(Default)]
struct SignalInner {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
}

/// Broadcast signal with no payload.
///
/// Cloning yields another handle to the same listener list.
#[derive(Clone, Default)]
pub struct ChangeSignal {
    inner: Rc<SignalInner>,
}

/// Non-owning handle to a [`ChangeSignal`].
#[derive(Clone, Default)]
pub struct WeakChangeSignal {
    inner: Weak<SignalInner>,
}

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, Rc::new(listener)));
        Subscription(id)
    }

    /// Remove a listener. Returns `false` if the handle was not registered here.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription.0);
        listeners.len() != before
    }

    /// Invoke every listener once.
    ///
    /// The listener list is snapshotted first, so listeners may subscribe or
    /// unsubscribe while the signal is being emitted.
    pub fn emit(&self) {
        let snapshot: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn downgrade(&self) -> WeakChangeSignal {
        WeakChangeSignal { inner: Rc::downgrade(&self.inner) }
    }
}

impl WeakChangeSignal {
    pub fn upgrade(&self) -> Option<ChangeSignal> {
        self.inner.upgrade().map(|inner| ChangeSignal { inner })
    }
}

impl std::fmt::Debug for ChangeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeSignal")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
