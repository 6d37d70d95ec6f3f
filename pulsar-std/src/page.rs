//! In-memory page.
//!
//! A [`Page`] implementation that models just enough of a document for the
//! router: a list of static sections and one container for fetched markup.
//! It is what tests and headless callers use; a browser binding implements
//! [`Page`] over the real DOM instead.

use pulsar_core::{Page, RouteError};
use std::sync::{PoisonError, RwLock};

/// One routed section of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Route token carried by the section.
    pub route: String,
    /// Markup inside the section.
    pub markup: String,
    /// Whether the section is displayed.
    pub visible: bool,
}

impl Section {
    fn render(&self) -> String {
        let style = if self.visible { "" } else { " style=\"display: none\"" };
        format!(
            "<div route=\"{}\"{}>{}</div>",
            self.route, style, self.markup
        )
    }
}

#[derive(Debug, Default)]
struct PageInner {
    sections: Vec<Section>,
    container: Option<Section>,
    mutations: usize,
}

impl PageInner {
    fn find_mut(&mut self, route: &str) -> Option<&mut Section> {
        self.sections
            .iter_mut()
            .chain(self.container.iter_mut())
            .find(|s| s.route == route)
    }

    fn contains(&self, route: &str) -> bool {
        self.sections
            .iter()
            .chain(self.container.iter())
            .any(|s| s.route == route)
    }
}

/// An in-memory document with routed sections and a page container.
#[derive(Debug)]
pub struct MemoryPage {
    container_id: String,
    inner: RwLock<PageInner>,
}

impl MemoryPage {
    /// Create an empty page whose container element is `page-container`.
    pub fn new() -> Self {
        Self::with_container("page-container")
    }

    /// Create an empty page with a custom container element id.
    pub fn with_container(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            inner: RwLock::new(PageInner::default()),
        }
    }

    /// Add a static section. Route tokens must be unique on the page.
    pub fn add_section(
        &self,
        route: impl Into<String>,
        markup: impl Into<String>,
        visible: bool,
    ) -> Result<(), RouteError> {
        let route = route.into();
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.contains(&route) {
            return Err(RouteError::DuplicateSection(route));
        }
        inner.sections.push(Section {
            route,
            markup: markup.into(),
            visible,
        });
        Ok(())
    }

    /// Builder form of [`add_section`](Self::add_section).
    pub fn with_section(
        self,
        route: impl Into<String>,
        markup: impl Into<String>,
        visible: bool,
    ) -> Result<Self, RouteError> {
        self.add_section(route, markup, visible)?;
        Ok(self)
    }

    /// Copy of the section tagged `route`, static or injected.
    pub fn section(&self, route: &str) -> Option<Section> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .sections
            .iter()
            .chain(inner.container.iter())
            .find(|s| s.route == route)
            .cloned()
    }

    /// Whether the section tagged `route` exists and is visible.
    pub fn is_visible(&self, route: &str) -> bool {
        self.section(route).is_some_and(|s| s.visible)
    }

    /// Routes of all visible sections, in document order.
    pub fn visible_routes(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .sections
            .iter()
            .chain(inner.container.iter())
            .filter(|s| s.visible)
            .map(|s| s.route.clone())
            .collect()
    }

    /// The section currently held by the page container, if any.
    pub fn injected(&self) -> Option<Section> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .container
            .clone()
    }

    /// Id of the container element.
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Number of visibility changes and injections applied so far.
    pub fn mutation_count(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .mutations
    }

    /// Serialize the page as markup.
    pub fn render(&self) -> String {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut html: String = inner.sections.iter().map(Section::render).collect();
        html.push_str(&format!("<div id=\"{}\">", self.container_id));
        if let Some(section) = &inner.container {
            html.push_str(&section.render());
        }
        html.push_str("</div>");
        html
    }
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for MemoryPage {
    fn set_visibility(&self, route: &str, visible: bool) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match inner.find_mut(route) {
            Some(section) => {
                section.visible = visible;
                inner.mutations += 1;
                true
            }
            None => false,
        }
    }

    fn inject(&self, route: &str, markup: &str) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.container = Some(Section {
            route: route.to_owned(),
            markup: markup.to_owned(),
            visible: true,
        });
        inner.mutations += 1;
    }
}
