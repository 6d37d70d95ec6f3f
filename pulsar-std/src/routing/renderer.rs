//! Route renderer.

use crate::bus::EventBus;
use futures::future::{BoxFuture, FutureExt};
use pulsar_core::{
    DynTransport, Event, HttpRequest, Page, RouteError, TransitionNotice, Transport,
};
use std::borrow::Cow;
use std::future::Future;
use std::pin::Pin;
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, RwLock,
    atomic::{AtomicU64, Ordering},
};
use std::task::{Context, Poll};

/// Configuration for a [`RouteRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    transition_event: Cow<'static, str>,
}

impl RouterConfig {
    /// Default configuration: transitions are announced as `pageTransition`.
    pub fn new() -> Self {
        Self {
            transition_event: Cow::Borrowed("pageTransition"),
        }
    }

    /// Set the name of the transition event.
    pub fn with_transition_event(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.transition_event = name.into();
        self
    }

    /// Name of the transition event.
    pub fn transition_event(&self) -> &str {
        &self.transition_event
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What [`RouteRenderer::render_route`] did before returning.
///
/// A `Loading` outcome that is dropped leaves the old section hidden and
/// never fetches the new one.
#[derive(Debug)]
#[must_use = "a Loading outcome does nothing unless its pending route is spawned or awaited"]
pub enum RenderOutcome {
    /// Old and new route were the same; nothing happened.
    Unchanged,
    /// The new route's section was already on the page and is now visible.
    /// The notice has been dispatched unless a newer request overtook this
    /// one first.
    Shown(TransitionNotice),
    /// The new route has to be fetched. Spawn or await the pending load;
    /// the transition notice is the signal that the content is in place.
    Loading(PendingRoute),
}

impl RenderOutcome {
    /// The pending load, if the route has to be fetched.
    pub fn into_pending(self) -> Option<PendingRoute> {
        match self {
            RenderOutcome::Loading(pending) => Some(pending),
            _ => None,
        }
    }
}

/// Result of driving a [`PendingRoute`] to completion.
#[derive(Debug)]
pub enum RouteLoad {
    /// Markup was injected and the notice dispatched.
    Loaded(TransitionNotice),
    /// A newer route request was made while this one was in flight. Either
    /// the response was discarded, or it was injected but the newer request
    /// took over before the notice went out.
    Superseded,
    /// The fetch failed. Nothing was injected, no notice was dispatched, and
    /// the previously visible section stays hidden.
    Failed(RouteError),
}

/// A route fetch that has not completed yet.
///
/// The load is a `'static` future: it can be spawned onto any executor and
/// forgotten, or awaited by the caller. Nothing is requested until it is
/// first polled.
#[must_use = "a pending route does nothing unless spawned or awaited"]
pub struct PendingRoute {
    token: u64,
    url: String,
    future: BoxFuture<'static, RouteLoad>,
}

impl PendingRoute {
    /// Request token of this load. Only the latest token may commit.
    pub fn token(&self) -> u64 {
        self.token
    }

    /// URL being fetched.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Spawn the load on the current tokio runtime.
    #[cfg(feature = "tokio")]
    pub fn spawn(self) -> tokio::task::JoinHandle<RouteLoad> {
        tokio::spawn(self.future)
    }
}

impl Future for PendingRoute {
    type Output = RouteLoad;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.as_mut().poll(cx)
    }
}

impl std::fmt::Debug for PendingRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRoute")
            .field("token", &self.token)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

struct Shared {
    page: Arc<dyn Page>,
    transport: Arc<dyn DynTransport>,
    bus: EventBus,
    config: RouterConfig,
    latest: AtomicU64,
    active: RwLock<Option<String>>,
    // Serializes token draws, page mutations and active-route updates.
    // Never held while listeners run.
    gate: Mutex<()>,
}

impl Shared {
    fn gate(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `route` as active. Callers hold the gate.
    fn activate(&self, route: &str) {
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = Some(route.to_owned());
    }

    /// Dispatch the notice for `token`, unless a newer request has been made
    /// since the page was updated. Returns whether it was dispatched.
    fn announce(&self, token: u64, notice: &TransitionNotice) -> bool {
        if !self.is_latest(token) {
            tracing::debug!(new_route = %notice.new_route, token, "skipping overtaken transition");
            return false;
        }
        let event = Event::transition(self.config.transition_event.clone(), notice.clone());
        let report = self.bus.dispatch(&event);
        tracing::debug!(
            old_route = %notice.old_route,
            new_route = %notice.new_route,
            delivered = report.delivered,
            "page transition"
        );
        true
    }

    fn is_latest(&self, token: u64) -> bool {
        self.latest.load(Ordering::Acquire) == token
    }

    async fn load(self: Arc<Self>, token: u64, url: String, notice: TransitionNotice) -> RouteLoad {
        let response = match self.transport.send_dyn(HttpRequest::get(url.as_str())).await {
            Ok(response) => response,
            Err(source) => return fail(RouteError::Transport { url, source }),
        };
        if !response.is_success() {
            return fail(RouteError::Status {
                url,
                status: response.status,
            });
        }
        let Ok(markup) = String::from_utf8(response.body) else {
            return fail(RouteError::Body { url });
        };

        {
            let _gate = self.gate();
            if !self.is_latest(token) {
                tracing::debug!(%url, new_route = %notice.new_route, token, "discarding superseded route");
                return RouteLoad::Superseded;
            }
            self.page.inject(&notice.new_route, &markup);
            self.activate(&notice.new_route);
        }

        if self.announce(token, &notice) {
            RouteLoad::Loaded(notice)
        } else {
            RouteLoad::Superseded
        }
    }
}

fn fail(error: RouteError) -> RouteLoad {
    tracing::warn!(%error, "route fetch failed");
    RouteLoad::Failed(error)
}

/// Shows, hides and loads routed sections of a [`Page`].
///
/// Cloning a renderer produces another handle to the same page, transport,
/// bus and request counter.
#[derive(Clone)]
pub struct RouteRenderer {
    shared: Arc<Shared>,
}

impl RouteRenderer {
    /// Create a renderer with the default [`RouterConfig`].
    pub fn new<P, T>(page: P, transport: T, bus: EventBus) -> Self
    where
        P: Page,
        T: Transport,
    {
        Self::with_config(page, transport, bus, RouterConfig::default())
    }

    /// Create a renderer with an explicit configuration.
    pub fn with_config<P, T>(page: P, transport: T, bus: EventBus, config: RouterConfig) -> Self
    where
        P: Page,
        T: Transport,
    {
        Self {
            shared: Arc::new(Shared {
                page: Arc::new(page),
                transport: Arc::new(transport),
                bus,
                config,
                latest: AtomicU64::new(0),
                active: RwLock::new(None),
                gate: Mutex::new(()),
            }),
        }
    }

    /// Move the page from `old_route` to `new_route`.
    ///
    /// 1. Same route: nothing happens at all.
    /// 2. The section for `old_route` is hidden (kept in the document).
    /// 3. If the page has a section for `new_route` it is shown and the
    ///    transition notice is dispatched before this returns.
    /// 4. Otherwise `source_url` has to be fetched; the returned
    ///    [`PendingRoute`] injects the markup and then dispatches the notice.
    ///    The fetch is lazy: dropping the outcome drops the load.
    ///
    /// Every call other than a same-route call supersedes earlier pending
    /// loads: their responses are discarded when they arrive.
    #[must_use = "a Loading outcome does nothing unless its pending route is spawned or awaited"]
    pub fn render_route(&self, source_url: &str, old_route: &str, new_route: &str) -> RenderOutcome {
        if old_route == new_route {
            return RenderOutcome::Unchanged;
        }

        let notice = TransitionNotice::new(old_route, new_route);
        let (token, shown) = {
            let _gate = self.shared.gate();
            let token = self.shared.latest.fetch_add(1, Ordering::AcqRel) + 1;
            self.shared.page.set_visibility(old_route, false);
            let shown = self.shared.page.set_visibility(new_route, true);
            if shown {
                self.shared.activate(new_route);
            }
            (token, shown)
        };
        if shown {
            self.shared.announce(token, &notice);
            return RenderOutcome::Shown(notice);
        }

        tracing::debug!(url = %source_url, %new_route, token, "fetching route");
        let url = source_url.to_owned();
        RenderOutcome::Loading(PendingRoute {
            token,
            url: url.clone(),
            future: self.shared.clone().load(token, url, notice).boxed(),
        })
    }

    /// The route made visible by the most recent committed transition.
    pub fn active_route(&self) -> Option<String> {
        self.shared
            .active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Token of the most recent route request.
    pub fn latest_token(&self) -> u64 {
        self.shared.latest.load(Ordering::Acquire)
    }

    /// The configuration in use.
    pub fn config(&self) -> &RouterConfig {
        &self.shared.config
    }
}

impl std::fmt::Debug for RouteRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteRenderer")
            .field("config", &self.shared.config)
            .field("latest_token", &self.latest_token())
            .field("active_route", &self.active_route())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;
    use crate::testing::{RecordingListener, ScriptedTransport};
    use pulsar_core::HttpResponse;

    fn setup() -> (Arc<MemoryPage>, ScriptedTransport, EventBus, RecordingListener) {
        let page = Arc::new(
            MemoryPage::new()
                .with_section("home", "<p>home</p>", true)
                .unwrap()
                .with_section("help", "<p>help</p>", false)
                .unwrap(),
        );
        let bus = EventBus::new();
        let recorder = RecordingListener::new();
        bus.subscribe("pageTransition", recorder.clone());
        (page, ScriptedTransport::new(), bus, recorder)
    }

    #[test]
    fn test_same_route_is_noop() {
        let (page, transport, bus, recorder) = setup();
        let renderer = RouteRenderer::new(page.clone(), transport.clone(), bus);

        assert!(matches!(
            renderer.render_route("/home.html", "home", "home"),
            RenderOutcome::Unchanged
        ));
        assert_eq!(page.mutation_count(), 0);
        assert_eq!(transport.request_count(), 0);
        assert_eq!(recorder.count(), 0);
        assert_eq!(renderer.latest_token(), 0);
    }

    #[test]
    fn test_existing_section_is_shown_synchronously() {
        let (page, transport, bus, recorder) = setup();
        let renderer = RouteRenderer::new(page.clone(), transport.clone(), bus);

        let outcome = renderer.render_route("/help.html", "home", "help");
        assert!(matches!(outcome, RenderOutcome::Shown(ref n) if n.new_route == "help"));
        assert!(!page.is_visible("home"));
        assert!(page.is_visible("help"));
        assert_eq!(recorder.notices(), vec![TransitionNotice::new("home", "help")]);
        assert_eq!(transport.request_count(), 0);
        assert_eq!(renderer.active_route().as_deref(), Some("help"));
    }

    #[tokio::test]
    async fn test_missing_section_is_fetched() {
        let (page, transport, bus, recorder) = setup();
        transport.respond("/about.html", HttpResponse::new(200, "<p>hi</p>"));
        let renderer = RouteRenderer::new(page.clone(), transport.clone(), bus);

        let pending = renderer
            .render_route("/about.html", "home", "about")
            .into_pending()
            .unwrap();
        assert_eq!(pending.url(), "/about.html");
        assert_eq!(recorder.count(), 0);

        let load = pending.await;
        assert!(matches!(load, RouteLoad::Loaded(_)));
        let injected = page.injected().unwrap();
        assert_eq!(injected.route, "about");
        assert_eq!(injected.markup, "<p>hi</p>");
        assert_eq!(recorder.notices(), vec![TransitionNotice::new("home", "about")]);
    }

    #[test]
    fn test_custom_transition_event_name() {
        let page = Arc::new(MemoryPage::new().with_section("a", "", true).unwrap());
        let bus = EventBus::new();
        let recorder = RecordingListener::new();
        bus.subscribe("routeChanged", recorder.clone());
        let renderer = RouteRenderer::with_config(
            page.clone(),
            ScriptedTransport::new(),
            bus,
            RouterConfig::new().with_transition_event("routeChanged"),
        );

        page.add_section("b", "", false).unwrap();
        let _ = renderer.render_route("/b", "a", "b");
        assert_eq!(recorder.count(), 1);
        assert_eq!(renderer.config().transition_event(), "routeChanged");
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_old_section_hidden() {
        let (page, transport, bus, recorder) = setup();
        transport.respond("/missing.html", HttpResponse::new(404, "not found"));
        let renderer = RouteRenderer::new(page.clone(), transport, bus);

        let load = renderer
            .render_route("/missing.html", "home", "missing")
            .into_pending()
            .unwrap()
            .await;

        assert!(matches!(
            load,
            RouteLoad::Failed(RouteError::Status { status: 404, .. })
        ));
        assert!(!page.is_visible("home"));
        assert!(page.injected().is_none());
        assert_eq!(recorder.count(), 0);
        assert_eq!(renderer.active_route(), None);
    }

    #[tokio::test]
    async fn test_stale_load_is_discarded() {
        let (page, transport, bus, recorder) = setup();
        transport.respond("/slow.html", HttpResponse::new(200, "<p>slow</p>"));
        let renderer = RouteRenderer::new(page.clone(), transport, bus);

        let stale = renderer
            .render_route("/slow.html", "home", "slow")
            .into_pending()
            .unwrap();
        let _ = renderer.render_route("/help.html", "slow", "help");

        assert!(matches!(stale.await, RouteLoad::Superseded));
        assert!(page.injected().is_none());
        assert_eq!(recorder.notices(), vec![TransitionNotice::new("slow", "help")]);
        assert_eq!(renderer.active_route().as_deref(), Some("help"));
    }

    #[test]
    fn test_dropped_loading_outcome_fetches_nothing() {
        let (page, transport, bus, recorder) = setup();
        transport.respond("/about.html", HttpResponse::new(200, "<p>hi</p>"));
        let renderer = RouteRenderer::new(page.clone(), transport.clone(), bus);

        let outcome = renderer.render_route("/about.html", "home", "about");
        assert!(matches!(outcome, RenderOutcome::Loading(_)));
        drop(outcome);

        assert_eq!(transport.request_count(), 0);
        assert!(!page.is_visible("home"));
        assert!(page.injected().is_none());
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn test_listener_can_route_while_notified() {
        let (page, transport, bus, recorder) = setup();
        let renderer = RouteRenderer::new(page.clone(), transport, bus.clone());

        // Bounce straight back home once help is announced.
        let inner = renderer.clone();
        bus.subscribe("pageTransition", move |event: &Event| {
            if event.transition_notice().is_some_and(|n| n.new_route == "help") {
                let _ = inner.render_route("/home.html", "help", "home");
            }
        });

        let _ = renderer.render_route("/help.html", "home", "help");

        assert_eq!(
            recorder.notices(),
            vec![
                TransitionNotice::new("home", "help"),
                TransitionNotice::new("help", "home"),
            ]
        );
        assert!(page.is_visible("home"));
        assert_eq!(renderer.active_route().as_deref(), Some("home"));
        assert_eq!(renderer.latest_token(), 2);
    }
}
