//! The element a widget binds to, and how lookup keys resolve to one.
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::error::ConfigError;

pub const RATING_CLASS: &str = "star-rating";
pub const FILL_CLASS: &str = "star-value";
pub const REVERSE_CLASS: &str = "rtl";
pub const DISABLED_CLASS: &str = "disabled";
pub const BUSY_CLASS: &str = "is-busy";
pub const TITLE_ATTR: &str = "title";
pub const RATING_ATTR: &str = "data-rating";

/// An interactive element: holds classes, attributes and inline styles,
/// reports its width, and can grow child nodes.
///
/// Handles are cheap clones that refer to the same underlying element.
pub trait Surface: Clone {
    fn add_class(&self, name: &str);
    fn remove_class(&self, name: &str);
    fn has_class(&self, name: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);
    fn set_style(&self, property: &str, value: &str);
    /// Rendered width in pixels.
    fn width(&self) -> f64;
    /// Create a child element, append it, and return a handle to it.
    fn append_child_node(&self) -> Option<Self>;
}

/// Resolves lookup keys (selectors) against a hosting document.
pub trait SurfaceLookup<S: Surface> {
    fn query_all(&self, selector: &str) -> Vec<S>;
}

/// What a widget is asked to bind to.
#[derive(Debug, Clone)]
pub enum Target<S> {
    Selector(String),
    Surface(S),
}

impl<S: Surface> Target<S> {
    /// Resolve to exactly one surface.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTarget`] when a selector matches no
    /// surface or more than one.
    pub fn resolve<L: SurfaceLookup<S>>(self, lookup: &L) -> Result<S, ConfigError> {
        match self {
            Self::Surface(surface) => Ok(surface),
            Self::Selector(selector) => {
                let mut matches = lookup.query_all(&selector);
                match matches.len() {
                    1 => Ok(matches.remove(0)),
                    0 => Err(ConfigError::invalid_target(format!(
                        "`{selector}` matched nothing"
                    ))),
                    n => Err(ConfigError::invalid_target(format!(
                        "`{selector}` matched {n} elements"
                    ))),
                }
            }
        }
    }
}

impl<S> From<&str> for Target<S> {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

#[derive(Debug, Default)]
struct HeadlessNode {
    id: Option<String>,
    classes: SmallVec<[String; 4]>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    width: f64,
    children: Vec<HeadlessSurface>,
}

/// In-memory surface for tests and scripted runs.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface(Rc<RefCell<HeadlessNode>>);

impl HeadlessSurface {
    #[must_use]
    pub fn new(width: f64) -> Self {
        let surface = Self::default();
        surface.set_width(width);
        surface
    }

    #[must_use]
    pub fn with_id(self, id: &str) -> Self {
        self.0.borrow_mut().id = Some(id.to_string());
        self
    }

    #[must_use]
    pub fn with_class(self, name: &str) -> Self {
        self.add_class(name);
        self
    }

    #[must_use]
    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn set_width(&self, width: f64) {
        self.0.borrow_mut().width = width;
    }

    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.0.borrow().id.clone()
    }

    #[must_use]
    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.to_vec()
    }

    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.0.borrow().children.clone()
    }

    /// Whether both handles point at the same element.
    #[must_use]
    pub fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Surface for HeadlessSurface {
    fn add_class(&self, name: &str) {
        let mut node = self.0.borrow_mut();
        if !node.classes.iter().any(|c| c == name) {
            node.classes.push(name.to_string());
        }
    }

    fn remove_class(&self, name: &str) {
        self.0.borrow_mut().classes.retain(|c| c != name);
    }

    fn has_class(&self, name: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == name)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, name: &str) {
        self.0.borrow_mut().attributes.remove(name);
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn width(&self) -> f64 {
        self.0.borrow().width
    }

    fn append_child_node(&self) -> Option<Self> {
        let child = Self::default();
        self.0.borrow_mut().children.push(child.clone());
        Some(child)
    }
}

/// Flat in-memory document understanding `#id` and `.class` selectors.
#[derive(Debug, Clone, Default)]
pub struct HeadlessDocument {
    surfaces: Vec<HeadlessSurface>,
}

impl HeadlessDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, surface: HeadlessSurface) -> HeadlessSurface {
        self.surfaces.push(surface.clone());
        surface
    }
}

impl SurfaceLookup<HeadlessSurface> for HeadlessDocument {
    fn query_all(&self, selector: &str) -> Vec<HeadlessSurface> {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            self.surfaces
                .iter()
                .filter(|s| s.id().as_deref() == Some(id))
                .cloned()
                .collect()
        } else if let Some(class) = selector.strip_prefix('.') {
            self.surfaces
                .iter()
                .filter(|s| s.has_class(class))
                .cloned()
                .collect()
        } else {
            Vec::new()
        }
    }
}
