//! Hash-based single-page routing.
//!
//! The URL is split by `#`: the part before it is the page served by the
//! server, the part after it is the route handled here. Sections of the page
//! are tagged with route tokens; moving between routes hides one section and
//! shows another, fetching markup for routes the page does not have yet.
//!
//! - [`RouteRenderer`] performs a single transition.
//! - [`HashNavigator`] turns locations into transitions and remembers where
//!   the page currently is.

pub mod navigator;
pub mod renderer;

pub use navigator::{HashNavigator, NavigatorConfig, route_from_location};
pub use renderer::{PendingRoute, RenderOutcome, RouteLoad, RouteRenderer, RouterConfig};
