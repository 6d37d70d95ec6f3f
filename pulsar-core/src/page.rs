//! The document contract the route renderer mutates.

/// A page made of sections tagged with route tokens.
///
/// Participating sections carry an attribute naming their route. Hiding a
/// section suppresses its display without removing it from the document. One
/// designated container receives markup fetched for routes that have no
/// section yet.
///
/// Implementations must keep route tokens unique among present sections; the
/// first section carrying a token is the one the renderer addresses.
pub trait Page: Send + Sync + 'static {
    /// Show or hide the section tagged `route`.
    ///
    /// Returns `false` when no section carries `route`; the page is left
    /// untouched in that case.
    fn set_visibility(&self, route: &str, visible: bool) -> bool;

    /// Replace the container's content with `markup`, wrapped in a visible
    /// section tagged `route` so later lookups find it.
    fn inject(&self, route: &str, markup: &str);
}

impl<P: Page + ?Sized> Page for std::sync::Arc<P> {
    fn set_visibility(&self, route: &str, visible: bool) -> bool {
        (**self).set_visibility(route, visible)
    }

    fn inject(&self, route: &str, markup: &str) {
        (**self).inject(route, markup)
    }
}
