//! # Hook callbacks
//!
//! A hook is a named extension point. Pre and post callbacks (disable a
//! button before a download, enable it afterwards) live next to the code that
//! owns the button, not inside the download.
//!
//! Callbacks receive a shared reference to an argument bundle `A`. Hooks with
//! no arguments use `()`; hooks with several use a tuple.

use crate::{error::BoxError, response::IntoOutcome};

/// A callback registered under a hook name.
///
/// Closures implement this automatically when they take `&A` and return a
/// value implementing [`IntoOutcome`]:
///
/// ```rust,ignore
/// hooks.register("before_download", |_: &()| button.disable());
/// hooks.register("after_download", |(file, bytes): &(String, u64)| {
///     log_download(file, *bytes)
/// });
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a hook callback for `{A}`",
    label = "missing `HookFn` implementation",
    note = "Hook callbacks are `Fn(&{A}) -> R` where `R: IntoOutcome`."
)]
pub trait HookFn<A: ?Sized>: Send + Sync + 'static {
    /// Run the callback.
    fn call(&self, args: &A) -> Result<(), BoxError>;
}

impl<A, F, R> HookFn<A> for F
where
    A: ?Sized,
    F: Fn(&A) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn call(&self, args: &A) -> Result<(), BoxError> {
        (self)(args).into_outcome()
    }
}

/// Object-safe alias used for storing callbacks of different concrete types.
pub type DynHookFn<A> = dyn HookFn<A>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn run<A: ?Sized + 'static>(hook: &DynHookFn<A>, args: &A) -> Result<(), BoxError> {
        hook.call(args)
    }

    #[test]
    fn test_closure_returning_unit() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let hook: Box<DynHookFn<()>> = Box::new(move |_: &()| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        run(&*hook, &()).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_closure_with_tuple_arguments() {
        let hook: Box<DynHookFn<(u32, String)>> =
            Box::new(|(id, name): &(u32, String)| -> Result<(), String> {
                if *id == 0 {
                    Err(format!("no id for {name}"))
                } else {
                    Ok(())
                }
            });

        assert!(run(&*hook, &(1, "a".into())).is_ok());
        let err = run(&*hook, &(0, "b".into())).unwrap_err();
        assert_eq!(err.to_string(), "no id for b");
    }
}
