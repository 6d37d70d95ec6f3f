//! Isolated execution of user callbacks.

use pulsar_core::{BoxError, HookError};
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Run `f`, turning both a returned error and a panic into a [`HookError`]
/// labelled with `name`.
///
/// Callers must not hold any lock while calling this.
pub(crate) fn run_isolated<F>(name: &str, f: F) -> Result<(), HookError>
where
    F: FnOnce() -> Result<(), BoxError>,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(source)) => Err(HookError::Failed {
            name: name.to_owned(),
            source,
        }),
        Err(payload) => Err(HookError::Panic {
            name: name.to_owned(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
