//! Named hook registry.
//!
//! Hooks keep orthogonal concerns apart: a download does not need to know
//! that a button is disabled while it runs, and the button does not need to
//! know how downloads work.
//!
//! ```rust,ignore
//! let hooks = HookRegistry::new();
//! hooks.register("before_download", move |_: &()| button.set_enabled(false));
//! hooks.register("after_download", move |_: &()| button.set_enabled(true));
//!
//! hooks.invoke("before_download", &());
//! download().await?;
//! hooks.invoke("after_download", &());
//! ```

use crate::isolate::run_isolated;
use pulsar_core::HookFn;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

type Callbacks<A> = Vec<Arc<dyn HookFn<A>>>;

/// Outcome of a single [`HookRegistry::invoke`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvokeReport {
    /// Callbacks that were invoked.
    pub ran: usize,
    /// Callbacks that returned an error or panicked.
    pub failed: usize,
}

impl InvokeReport {
    /// Whether every invoked callback succeeded.
    pub const fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// A registry of named hooks whose callbacks take `&A`.
///
/// Cloning a `HookRegistry` produces another handle to the same hooks.
pub struct HookRegistry<A: ?Sized = ()> {
    hooks: Arc<RwLock<HashMap<String, Callbacks<A>>>>,
}

impl<A: ?Sized + 'static> HookRegistry<A> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            hooks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Start building a registry with a fixed initial set of hooks.
    pub fn builder() -> HookRegistryBuilder<A> {
        HookRegistryBuilder::new()
    }

    /// Append `callback` to the hook `name`, creating the hook if needed.
    ///
    /// Registering the same callback twice makes it run twice.
    pub fn register<H>(&self, name: impl Into<String>, callback: H)
    where
        H: HookFn<A>,
    {
        self.hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.into())
            .or_default()
            .push(Arc::new(callback));
    }

    /// Run every callback registered under `name`, in registration order.
    ///
    /// Unknown names are a no-op. Each callback is isolated: an error or a
    /// panic is logged as a warning and the next callback still runs. Nothing
    /// is propagated to the caller.
    pub fn invoke(&self, name: &str, args: &A) -> InvokeReport {
        let callbacks = {
            let hooks = self.hooks.read().unwrap_or_else(PoisonError::into_inner);
            match hooks.get(name) {
                Some(callbacks) => callbacks.clone(),
                None => return InvokeReport::default(),
            }
        };

        let mut report = InvokeReport::default();
        for callback in callbacks {
            report.ran += 1;
            if let Err(error) = run_isolated(name, || callback.call(args)) {
                tracing::warn!(hook = %name, %error, "hook callback failed");
                report.failed += 1;
            }
        }
        report
    }
}

impl<A: ?Sized + 'static> Default for HookRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> Clone for HookRegistry<A> {
    fn clone(&self) -> Self {
        Self {
            hooks: self.hooks.clone(),
        }
    }
}

impl<A: ?Sized> std::fmt::Debug for HookRegistry<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hooks = self.hooks.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("HookRegistry")
            .field("hooks", &hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for constructing a [`HookRegistry`].
pub struct HookRegistryBuilder<A: ?Sized = ()> {
    hooks: HashMap<String, Callbacks<A>>,
}

impl<A: ?Sized + 'static> Default for HookRegistryBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized + 'static> HookRegistryBuilder<A> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            hooks: HashMap::new(),
        }
    }

    /// Register a callback.
    pub fn register<H: HookFn<A>>(mut self, name: impl Into<String>, callback: H) -> Self {
        self.hooks
            .entry(name.into())
            .or_default()
            .push(Arc::new(callback));
        self
    }

    /// Build the registry.
    pub fn build(self) -> HookRegistry<A> {
        HookRegistry {
            hooks: Arc::new(RwLock::new(self.hooks)),
        }
    }
}
