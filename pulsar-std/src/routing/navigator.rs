//! Location-hash navigation.

use super::renderer::{RenderOutcome, RouteRenderer};
use std::sync::{PoisonError, RwLock};

type Resolver = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Configuration for a [`HashNavigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorConfig {
    default_route: String,
}

impl NavigatorConfig {
    /// Default configuration: an empty fragment means `home`.
    pub fn new() -> Self {
        Self {
            default_route: "home".to_owned(),
        }
    }

    /// Set the route used when the location has no fragment.
    pub fn with_default_route(mut self, route: impl Into<String>) -> Self {
        self.default_route = route.into();
        self
    }
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the route token from a location.
///
/// The route is whatever follows the first `#`, minus a leading `/`. An
/// empty or missing fragment yields `default_route`.
///
/// ```rust,ignore
/// assert_eq!(route_from_location("/app#/inbox", "home"), "inbox");
/// assert_eq!(route_from_location("/app", "home"), "home");
/// ```
pub fn route_from_location<'a>(location: &'a str, default_route: &'a str) -> &'a str {
    match location.split_once('#') {
        Some((_, fragment)) => {
            let route = fragment.strip_prefix('/').unwrap_or(fragment);
            if route.is_empty() { default_route } else { route }
        }
        None => default_route,
    }
}

/// Drives a [`RouteRenderer`] from location changes.
///
/// This is the glue a hash-change listener calls into: it works out the
/// route, resolves the URL its markup is served from, and remembers the
/// current route for the next transition.
pub struct HashNavigator {
    renderer: RouteRenderer,
    config: NavigatorConfig,
    resolver: Resolver,
    current: RwLock<String>,
}

impl HashNavigator {
    /// Create a navigator that serves route `r` from `r.html`.
    pub fn new(renderer: RouteRenderer, config: NavigatorConfig) -> Self {
        Self {
            renderer,
            config,
            resolver: Box::new(|route: &str| format!("{route}.html")),
            current: RwLock::new(String::new()),
        }
    }

    /// Use `resolver` to map a route token to the URL of its markup.
    pub fn with_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.resolver = Box::new(resolver);
        self
    }

    /// Navigate to the route named by `location`'s fragment.
    ///
    /// The navigator's current route is updated immediately, even when the
    /// markup still has to be fetched, so that the next navigation hides the
    /// right section.
    #[must_use = "a Loading outcome does nothing unless its pending route is spawned or awaited"]
    pub fn navigate(&self, location: &str) -> RenderOutcome {
        let route = route_from_location(location, &self.config.default_route).to_owned();
        let url = (self.resolver)(&route);

        let previous = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *current, route.clone())
        };
        tracing::debug!(%location, from = %previous, to = %route, "navigate");
        self.renderer.render_route(&url, &previous, &route)
    }

    /// The route most recently navigated to; empty before the first
    /// navigation.
    pub fn current_route(&self) -> String {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The renderer this navigator drives.
    pub fn renderer(&self) -> &RouteRenderer {
        &self.renderer
    }
}
