//! Testing utilities for Pulsar.
//!
//! This module provides doubles that make testing routing, state and API code
//! possible without a browser or a network.
//!
//! # Features
//!
//! - [`RecordingListener`]: A bus listener that records every event it receives
//! - [`ScriptedTransport`]: A transport answering from a table of canned responses

use pulsar_core::{BoxError, Event, HookFn, HttpRequest, HttpResponse, Transport, TransitionNotice};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records all events it receives.
///
/// Useful for verifying what was announced, and in which order.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingListener::new();
/// bus.subscribe("pageTransition", recorder.clone());
///
/// renderer.render_route("/help.html", "home", "help");
///
/// assert_eq!(recorder.notices(), vec![TransitionNotice::new("home", "help")]);
/// ```
#[derive(Clone, Default)]
pub struct RecordingListener {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingListener {
    /// Create a new, empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Transition notices among the recorded events, in arrival order.
    pub fn notices(&self) -> Vec<TransitionNotice> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter_map(|e| e.transition_notice().cloned())
            .collect()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl HookFn<Event> for RecordingListener {
    fn call(&self, event: &Event) -> Result<(), BoxError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}

// ============================================================================
// Scripted Transport
// ============================================================================

#[derive(Debug, Clone)]
enum Scripted {
    Respond(HttpResponse),
    Fail(String),
}

#[derive(Default)]
struct ScriptedInner {
    routes: HashMap<String, Scripted>,
    requests: Vec<HttpRequest>,
}

/// A transport that answers from a table of canned responses keyed by URL.
///
/// Every request is recorded. URLs with no scripted answer fail with a
/// transport error, like an unreachable host.
///
/// # Example
///
/// ```rust,ignore
/// let transport = ScriptedTransport::new();
/// transport.respond("/about.html", HttpResponse::new(200, "<p>hi</p>"));
/// transport.fail("/offline.html", "connection refused");
/// ```
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Mutex<ScriptedInner>>,
}

impl ScriptedTransport {
    /// Create a transport with no scripted answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests for `url` with `response`.
    pub fn respond(&self, url: impl Into<String>, response: HttpResponse) {
        self.lock().routes.insert(url.into(), Scripted::Respond(response));
    }

    /// Fail requests for `url` with a transport error.
    pub fn fail(&self, url: impl Into<String>, message: impl Into<String>) {
        self.lock()
            .routes
            .insert(url.into(), Scripted::Fail(message.into()));
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptedInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let scripted = {
            let mut inner = self.lock();
            inner.requests.push(request.clone());
            inner.routes.get(&request.url).cloned()
        };
        match scripted {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(message.into()),
            None => Err(format!("no scripted response for {}", request.url).into()),
        }
    }
}
