//! # pulsar-core
//!
//! Core traits and types for the Pulsar front-end toolkit.
//!
//! This crate has minimal dependencies and is meant to be imported by code that
//! only needs to speak the contracts (a custom [`Page`], a custom
//! [`Transport`]) without pulling in the standard implementations from
//! `pulsar-std`.
//!
//! # Contracts
//!
//! ## Hooks ([`HookFn`])
//!
//! A hook is a named extension point. Callbacks are plain closures over an
//! argument bundle; anything returning `()` or `Result<(), E>` qualifies
//! through [`IntoOutcome`].
//!
//! ## Events ([`Event`])
//!
//! Events are named notices carried by an event bus. Route transitions carry a
//! [`TransitionNotice`]; state changes carry nothing and subscribers re-read
//! the state they care about.
//!
//! ## Page ([`Page`])
//!
//! The document the router mutates: sections tagged with a route token that
//! can be shown or hidden, plus one container receiving fetched markup.
//!
//! ## Transport ([`Transport`])
//!
//! The network boundary. A single `send` operation taking an [`HttpRequest`]
//! and producing an [`HttpResponse`].
//!
//! # Error Types
//!
//! - [`PulsarError`] - Top-level error type
//! - [`RouteError`] - Route loading errors
//! - [`ApiError`] - API adapter errors
//! - [`HookError`] - Isolated callback failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod event;
mod hook;
mod message;
mod page;
mod response;
mod transport;

// Re-exports
pub use error::{ApiError, BoxError, HookError, PulsarError, RouteError};
pub use event::{Event, EventDetail, TransitionNotice};
pub use hook::{DynHookFn, HookFn};
pub use message::Message;
pub use page::Page;
pub use response::IntoOutcome;
pub use transport::{DynTransport, HttpRequest, HttpResponse, Method, Transport};
