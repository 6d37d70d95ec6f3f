//! Named events carried by the event bus.

use std::borrow::Cow;
use std::fmt;

/// Payload of a route transition: the route that was left and the route that
/// is now visible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransitionNotice {
    /// Route that was active before the transition.
    pub old_route: String,
    /// Route that is visible after the transition.
    pub new_route: String,
}

impl TransitionNotice {
    /// Create a notice for a transition from `old_route` to `new_route`.
    pub fn new(old_route: impl Into<String>, new_route: impl Into<String>) -> Self {
        Self {
            old_route: old_route.into(),
            new_route: new_route.into(),
        }
    }
}

impl fmt::Display for TransitionNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.old_route, self.new_route)
    }
}

/// Detail attached to an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventDetail {
    /// No payload; the event name alone is the signal.
    #[default]
    Empty,
    /// A route transition.
    Transition(TransitionNotice),
}

/// A named notice dispatched on an event bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: Cow<'static, str>,
    detail: EventDetail,
}

impl Event {
    /// Create a payload-less event.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            detail: EventDetail::Empty,
        }
    }

    /// Create a transition event carrying `notice`.
    pub fn transition(name: impl Into<Cow<'static, str>>, notice: TransitionNotice) -> Self {
        Self {
            name: name.into(),
            detail: EventDetail::Transition(notice),
        }
    }

    /// The event name subscribers are keyed by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attached detail.
    pub fn detail(&self) -> &EventDetail {
        &self.detail
    }

    /// The transition notice, if this is a transition event.
    pub fn transition_notice(&self) -> Option<&TransitionNotice> {
        match &self.detail {
            EventDetail::Transition(notice) => Some(notice),
            EventDetail::Empty => None,
        }
    }
}
