//! Logging listener - observability for bus traffic.

use pulsar_core::{BoxError, Event, EventDetail, HookFn};

/// A listener that logs every event it receives.
///
/// # Example
///
/// ```rust,ignore
/// use pulsar_std::bus::{EventBus, LoggingListener};
///
/// let bus = EventBus::new();
/// bus.subscribe("pageTransition", LoggingListener::named("router"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingListener {
    name: &'static str,
}

impl LoggingListener {
    /// Create a new `LoggingListener` with a default name.
    pub fn new() -> Self {
        Self { name: "event" }
    }

    /// Create a new `LoggingListener` with a custom name.
    ///
    /// The name is used in log messages to identify the subscriber.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl HookFn<Event> for LoggingListener {
    fn call(&self, event: &Event) -> Result<(), BoxError> {
        match event.detail() {
            EventDetail::Transition(notice) => tracing::debug!(
                listener = %self.name,
                event = %event.name(),
                old_route = %notice.old_route,
                new_route = %notice.new_route,
                "received event"
            ),
            EventDetail::Empty => {
                tracing::debug!(listener = %self.name, event = %event.name(), "received event")
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;
    use pulsar_core::TransitionNotice;

    #[test]
    fn test_logging_listener_never_fails() {
        let bus = EventBus::new();
        bus.subscribe("pageTransition", LoggingListener::named("router"));

        let report = bus.dispatch(&Event::transition(
            "pageTransition",
            TransitionNotice::new("home", "help"),
        ));
        assert_eq!(report.delivered, 1);
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn test_logging_listener_default_name() {
        let listener = LoggingListener::default();
        assert!(listener.call(&Event::named("inboxChanged")).is_ok());
    }
}
