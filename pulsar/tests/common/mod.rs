#![allow(dead_code)]

use pulsar::page::MemoryPage;
use pulsar::testing::{RecordingListener, ScriptedTransport};
use pulsar::{EventBus, HttpResponse, RouteRenderer};
use std::sync::Arc;

// ============================================================================
// Tracing
// ============================================================================

/// Route log output through the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// ============================================================================
// Router Fixture
// ============================================================================

/// A renderer over an in-memory page with `home` visible and `about` hidden,
/// and a recorder subscribed to `pageTransition`.
pub struct RouterFixture {
    pub page: Arc<MemoryPage>,
    pub transport: ScriptedTransport,
    pub bus: EventBus,
    pub recorder: RecordingListener,
    pub renderer: RouteRenderer,
}

impl RouterFixture {
    pub fn new() -> Self {
        init_tracing();
        let page = MemoryPage::new()
            .with_section("home", "<h1>Home</h1>", true)
            .and_then(|p| p.with_section("about", "<h1>About</h1>", false))
            .unwrap();
        let page = Arc::new(page);
        let transport = ScriptedTransport::new();
        let bus = EventBus::new();
        let recorder = RecordingListener::new();
        bus.subscribe("pageTransition", recorder.clone());
        let renderer = RouteRenderer::new(page.clone(), transport.clone(), bus.clone());

        Self {
            page,
            transport,
            bus,
            recorder,
            renderer,
        }
    }

    pub fn serve(&self, url: &str, status: u16, body: &str) -> &Self {
        self.transport
            .respond(url, HttpResponse::new(status, body.as_bytes().to_vec()));
        self
    }
}
