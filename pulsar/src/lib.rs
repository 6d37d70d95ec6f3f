//! # pulsar - Single-Page Front-End Toolkit
//!
//! `pulsar` collects the plumbing a hash-routed single-page application
//! needs, independent of any particular rendering surface:
//!
//! - a route renderer that hides, shows and lazily fetches page sections and
//!   announces each completed transition on an event bus,
//! - a hook registry of named, isolated callbacks,
//! - a state container that broadcasts every mutation,
//! - an environment-aware API adapter, cards and an autocomplete model.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pulsar::prelude::*;
//! use pulsar::page::MemoryPage;
//!
//! let bus = EventBus::new();
//! let page = MemoryPage::new().with_section("home", "<h1>Home</h1>", true)?;
//! let renderer = RouteRenderer::new(page, transport, bus.clone());
//! let navigator = HashNavigator::new(renderer, NavigatorConfig::default());
//!
//! bus.subscribe("pageTransition", |event: &Event| {
//!     println!("{}", event.transition_notice().unwrap());
//! });
//!
//! if let Some(load) = navigator.navigate("#/help").into_pending() {
//!     load.await;
//! }
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use pulsar_core::{
    // Errors
    ApiError,
    BoxError,
    // Hooks
    DynHookFn,
    // Transport
    DynTransport,
    // Events
    Event,
    EventDetail,
    HookError,
    HookFn,
    HttpRequest,
    HttpResponse,
    IntoOutcome,
    Message,
    Method,
    // Page
    Page,
    PulsarError,
    RouteError,
    TransitionNotice,
    Transport,
};

// Standard implementations
pub use pulsar_std::{
    api::{ApiAdapter, ApiConfig, ApiRequest, ApiResponse, Environment, ReturnType},
    bus::{DispatchReport, EventBus, LoggingListener, SubscriptionId},
    hooks::{HookRegistry, HookRegistryBuilder, InvokeReport},
    routing::{
        HashNavigator, NavigatorConfig, PendingRoute, RenderOutcome, RouteLoad, RouteRenderer,
        RouterConfig,
    },
    state::StateContainer,
};

/// Service access.
pub mod api {
    pub use pulsar_std::api::{
        ApiAdapter, ApiBody, ApiConfig, ApiRequest, ApiResponse, Environment, ReturnType,
    };
}

/// Hash routing.
pub mod routing {
    pub use pulsar_std::routing::{
        HashNavigator, NavigatorConfig, PendingRoute, RenderOutcome, RouteLoad, RouteRenderer,
        RouterConfig, route_from_location,
    };
}

/// Documents.
pub mod page {
    pub use pulsar_std::page::{MemoryPage, Section};
}

/// Cards and autocomplete.
pub mod widgets {
    #![allow(clippy::wildcard_imports)]
    pub use pulsar_std::widgets::*;
}

/// Transports.
#[cfg(feature = "reqwest")]
pub mod transport {
    #![allow(clippy::wildcard_imports)]
    pub use pulsar_std::transport::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use pulsar_std::testing::*;
}

/// Prelude module - common imports for Pulsar.
///
/// # Usage
///
/// ```rust,ignore
/// use pulsar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Service access
        ApiAdapter,
        ApiConfig,
        ApiRequest,
        // Errors
        BoxError,
        // Events
        Event,
        EventBus,
        // Routing
        HashNavigator,
        HookFn,
        // Hooks
        HookRegistry,
        IntoOutcome,
        NavigatorConfig,
        Page,
        PulsarError,
        RenderOutcome,
        RouteRenderer,
        // State
        StateContainer,
        TransitionNotice,
        Transport,
    };
}
