//! `Surface` over real DOM elements.
use rater_core::{Surface, SurfaceLookup};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::dom;

/// A bound `HtmlElement`.
#[derive(Debug, Clone, PartialEq)]
pub struct DomSurface(HtmlElement);

impl DomSurface {
    #[must_use]
    pub const fn new(element: HtmlElement) -> Self {
        Self(element)
    }

    #[must_use]
    pub const fn element(&self) -> &HtmlElement {
        &self.0
    }

    /// Horizontal offset of `client_x` from the element's left edge.
    #[must_use]
    pub fn offset_of(&self, client_x: i32) -> f64 {
        f64::from(client_x) - self.0.get_bounding_client_rect().left()
    }

    /// Remove the element from its parent.
    pub fn detach(&self) {
        self.0.remove();
    }
}

impl From<HtmlElement> for DomSurface {
    fn from(element: HtmlElement) -> Self {
        Self(element)
    }
}

impl Surface for DomSurface {
    fn add_class(&self, name: &str) {
        let _ = self.0.class_list().add_1(name);
    }

    fn remove_class(&self, name: &str) {
        let _ = self.0.class_list().remove_1(name);
    }

    fn has_class(&self, name: &str) -> bool {
        self.0.class_list().contains(name)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn remove_attribute(&self, name: &str) {
        let _ = self.0.remove_attribute(name);
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.0.style().set_property(property, value);
    }

    fn width(&self) -> f64 {
        f64::from(self.0.offset_width())
    }

    fn append_child_node(&self) -> Option<Self> {
        let document = self.0.owner_document().or_else(dom::document)?;
        let child = document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        self.0.append_child(&child).ok()?;
        Some(Self(child))
    }
}

/// Resolves selectors against a browser document.
#[derive(Debug, Clone)]
pub struct DocumentLookup(Document);

impl DocumentLookup {
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self(document)
    }

    /// Lookup over the current window's document.
    #[must_use]
    pub fn current() -> Option<Self> {
        dom::document().map(Self)
    }
}

impl SurfaceLookup<DomSurface> for DocumentLookup {
    fn query_all(&self, selector: &str) -> Vec<DomSurface> {
        dom::query_html_all(&self.0, selector)
            .into_iter()
            .map(DomSurface)
            .collect()
    }
}
