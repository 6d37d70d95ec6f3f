//! # pulsar-std
//!
//! Standard implementations for the Pulsar front-end toolkit.
//!
//! This crate provides:
//! - **Event bus**: [`bus::EventBus`], named publish/subscribe
//! - **Hooks**: [`hooks::HookRegistry`], ordered and isolated callbacks
//! - **State**: [`state::StateContainer`], logged and broadcast mutations
//! - **Routing**: [`routing::RouteRenderer`], [`routing::HashNavigator`]
//! - **Page**: [`page::MemoryPage`], an in-memory document
//! - **API**: [`api::ApiAdapter`], environment-aware HTTP client
//! - **Widgets**: card rendering and the autocomplete model
//! - **Transport**: `ReqwestTransport` (feature `reqwest`)

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use pulsar_core;

// Modules
pub mod api;
pub mod bus;
pub mod hooks;
pub mod page;
pub mod routing;
pub mod state;
pub mod testing;
pub mod transport;
pub mod widgets;

mod isolate;
