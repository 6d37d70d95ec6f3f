//! Named publish/subscribe event bus.
//!
//! The bus replaces the page-wide `dispatchEvent`/`addEventListener` pair
//! with an explicitly constructed instance. Components that publish (the
//! route renderer, state containers) receive a handle at construction, and
//! tests get a fresh, isolated bus each.

pub mod logging;

use crate::isolate::run_isolated;
use pulsar_core::{Event, HookFn};
use std::collections::HashMap;
use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicU64, Ordering},
};

pub use logging::LoggingListener;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Outcome of a single [`EventBus::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchReport {
    /// Listeners that ran to completion.
    pub delivered: usize,
    /// Listeners that returned an error or panicked.
    pub failed: usize,
}

impl DispatchReport {
    /// Total number of listeners that were invoked.
    pub const fn invoked(&self) -> usize {
        self.delivered + self.failed
    }
}

struct Subscription {
    id: SubscriptionId,
    listener: Arc<dyn HookFn<Event>>,
}

#[derive(Default)]
struct BusInner {
    channels: RwLock<HashMap<String, Vec<Subscription>>>,
    next_id: AtomicU64,
}

/// A synchronous, name-keyed event bus.
///
/// Cloning an `EventBus` produces another handle to the same channels.
///
/// # Example
///
/// ```rust,ignore
/// let bus = EventBus::new();
/// bus.subscribe("inboxChanged", |_: &Event| badge.refresh());
/// bus.dispatch(&Event::named("inboxChanged"));
/// ```
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `listener` to events named `name`.
    ///
    /// Listeners for one name run in subscription order. Subscribing the same
    /// closure twice makes it run twice.
    pub fn subscribe<L>(&self, name: impl Into<String>, listener: L) -> SubscriptionId
    where
        L: HookFn<Event>,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let mut channels = self
            .inner
            .channels
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        channels.entry(name.into()).or_default().push(Subscription {
            id,
            listener: Arc::new(listener),
        });
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut channels = self
            .inner
            .channels
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut removed = false;
        channels.retain(|_, subs| {
            let before = subs.len();
            subs.retain(|s| s.id != id);
            removed |= subs.len() != before;
            !subs.is_empty()
        });
        removed
    }

    /// Number of listeners currently subscribed to `name`.
    pub fn listener_count(&self, name: &str) -> usize {
        self.inner
            .channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map_or(0, Vec::len)
    }

    /// Deliver `event` to every listener subscribed to its name.
    ///
    /// Runs synchronously: every listener has completed (or failed and been
    /// logged) when this returns. A failing or panicking listener never stops
    /// the ones after it. The listener list is snapshotted first, so
    /// listeners may subscribe, unsubscribe or dispatch re-entrantly; changes
    /// take effect from the next dispatch.
    pub fn dispatch(&self, event: &Event) -> DispatchReport {
        let listeners: Vec<Arc<dyn HookFn<Event>>> = {
            let channels = self
                .inner
                .channels
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            match channels.get(event.name()) {
                Some(subs) => subs.iter().map(|s| s.listener.clone()).collect(),
                None => return DispatchReport::default(),
            }
        };

        let mut report = DispatchReport::default();
        for listener in listeners {
            match run_isolated(event.name(), || listener.call(event)) {
                Ok(()) => report.delivered += 1,
                Err(error) => {
                    tracing::warn!(event = %event.name(), %error, "event listener failed");
                    report.failed += 1;
                }
            }
        }
        report
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let channels = self
            .inner
            .channels
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("EventBus")
            .field("channels", &channels.keys().collect::<Vec<_>>())
            .finish()
    }
}
