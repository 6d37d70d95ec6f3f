//! Error types for Pulsar.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`PulsarError`] - Top-level error type for all Pulsar operations
//! - [`HookError`] - Failures of isolated hook or listener callbacks
//! - [`RouteError`] - Errors while loading or registering route sections
//! - [`ApiError`] - Errors from the API adapter

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Pulsar operations.
#[derive(Error, Debug)]
pub enum PulsarError {
    /// A route could not be loaded or registered.
    #[error("route error: {0}")]
    Route(#[from] RouteError),

    /// An API request failed.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// A callback failed.
    #[error("hook error: {0}")]
    Hook(#[from] HookError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Failure of a single isolated callback.
///
/// These are logged and counted by the hook registry and the event bus; they
/// never reach the caller of `invoke` or `dispatch`.
#[derive(Error, Debug)]
pub enum HookError {
    /// The callback returned an error.
    #[error("hook event {name} failed - {source}")]
    Failed {
        /// Hook or event name the callback was registered under.
        name: String,
        /// The error returned by the callback.
        #[source]
        source: BoxError,
    },

    /// The callback panicked.
    #[error("hook event {name} panicked - {message}")]
    Panic {
        /// Hook or event name the callback was registered under.
        name: String,
        /// The panic payload, when it was a string.
        message: String,
    },
}

impl HookError {
    /// Name of the hook or event whose callback failed.
    pub fn name(&self) -> &str {
        match self {
            HookError::Failed { name, .. } | HookError::Panic { name, .. } => name,
        }
    }
}

/// Errors that can occur while loading or registering route sections.
#[derive(Error, Debug)]
pub enum RouteError {
    /// The server answered with a non-2xx status.
    #[error("HTTP error! status: {status} ({url})")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },

    /// The request never produced a response.
    #[error("there was a problem with the fetch operation: {source} ({url})")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        #[source]
        source: BoxError,
    },

    /// The response body was not valid UTF-8 text.
    #[error("response body is not valid text ({url})")]
    Body {
        /// Requested URL.
        url: String,
    },

    /// A section with this route token is already present on the page.
    #[error("a section for route '{0}' already exists")]
    DuplicateSection(String),
}

/// Errors returned by the API adapter.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with one of the configured fatal statuses.
    #[error("HTTP Error: {status}")]
    Status {
        /// Response status code.
        status: u16,
    },

    /// The requested return type is not one the adapter can decode.
    #[error("Unsupported return type: {0}")]
    UnsupportedReturnType(String),

    /// The response body could not be decoded as the requested type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] BoxError),

    /// The request payload could not be serialized.
    #[error("failed to encode request payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
}

impl ApiError {
    /// Status code carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

// Convenience conversions
impl From<BoxError> for PulsarError {
    fn from(err: BoxError) -> Self {
        PulsarError::Custom(err)
    }
}
