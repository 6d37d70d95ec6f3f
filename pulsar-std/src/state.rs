//! State container with logged, broadcast mutations.
//!
//! The container is the controller of a small MVC arrangement: it owns the
//! model, and views subscribe to its notification event on the bus. A mailbox
//! can then update its message table and its unread badge from two unrelated
//! listeners, neither of which knows about the other or about whoever
//! changed the mailbox.

use crate::bus::{DispatchReport, EventBus};
use pulsar_core::{Event, Message};
use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::{PoisonError, RwLock};

/// A value paired with the name of the event broadcast whenever it changes.
///
/// Listeners subscribe on the bus under [`event_name`](Self::event_name) and
/// re-read the container when notified; the notice itself carries nothing.
///
/// # Example
///
/// ```rust,ignore
/// let bus = EventBus::new();
/// let inbox = Arc::new(StateContainer::new(Inbox::default(), "inboxChanged", bus.clone()));
///
/// let view = inbox.clone();
/// bus.subscribe("inboxChanged", move |_: &Event| badge.show(view.with_state(|i| i.unread)));
///
/// inbox.set_state(Inbox { unread: 3 });
/// ```
pub struct StateContainer<T> {
    state: RwLock<T>,
    event: Cow<'static, str>,
    bus: EventBus,
}

impl<T: Message> StateContainer<T> {
    /// Create a container holding `initial`, announcing changes as `event`
    /// on `bus`.
    pub fn new(initial: T, event: impl Into<Cow<'static, str>>, bus: EventBus) -> Self {
        let event = event.into();
        tracing::debug!(event = %event, "initializing state");
        Self {
            state: RwLock::new(initial),
            event,
            bus,
        }
    }

    /// Name of the event broadcast after every [`set_state`](Self::set_state).
    pub fn event_name(&self) -> &str {
        &self.event
    }

    /// Run `f` against the current value.
    pub fn with_state<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Clone of the current value.
    pub fn state(&self) -> T
    where
        T: Clone,
    {
        self.with_state(T::clone)
    }
}

impl<T: Message + Debug> StateContainer<T> {
    /// Replace the value wholesale and broadcast the change.
    ///
    /// There is no merging: pass a complete replacement. The event is sent
    /// even when the new value equals the old one. Listeners run before this
    /// returns and see the new value.
    pub fn set_state(&self, new_state: T) -> DispatchReport {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            tracing::debug!(event = %self.event, previous = ?*state, "previous state");
            *state = new_state;
            tracing::debug!(event = %self.event, new = ?*state, "new state");
        }

        let report = self.bus.dispatch(&Event::named(self.event.clone()));
        tracing::debug!(
            event = %self.event,
            delivered = report.delivered,
            failed = report.failed,
            "state event fired"
        );
        report
    }
}

impl<T: Debug> Debug for StateContainer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateContainer")
            .field("event", &self.event)
            .field("state", &*self.state.read().unwrap_or_else(PoisonError::into_inner))
            .finish()
    }
}
