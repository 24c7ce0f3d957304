//! Element access seam used by the action engine.
//!
//! # Design
//! - Keep the engine generic over the handful of element operations it needs.
//! - Selectors are plain CSS compound selectors (`.class`, `tag.class`, `[name=value]`).
//! - The browser implementation lives in `services::dom`; tests drive an in-memory page.

use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use thiserror::Error;

/// Future produced by a click handler; driven on the UI thread.
pub type ClickFuture = Pin<Box<dyn Future<Output = ()>>>;

/// Click handler registered on a trigger element.
pub type ClickHandler = Rc<dyn Fn() -> ClickFuture>;

/// Failure to attach behavior to an element.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomError {
    /// The element was removed from the document before binding.
    #[error("element is no longer attached to the document")]
    Detached {
        /// Short description of the element.
        element: String,
    },
}

/// Document operations needed to arm triggers and reconcile the page.
pub trait Dom {
    /// Element handle. Equality must mean "same element".
    type Node: Clone + PartialEq + Debug + 'static;

    /// All attached elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First attached element matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node>;

    /// First descendant of `node` matching `selector`.
    fn query_within(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;

    /// Number of descendants of `node` matching `selector`.
    fn count_within(&self, node: &Self::Node, selector: &str) -> usize;

    /// `node` itself or its nearest ancestor matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;

    /// Attribute value, `None` when absent.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Set an attribute value.
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    /// Current value of a form control.
    fn value(&self, node: &Self::Node) -> Option<String>;

    /// Successful controls of a form as ordered name/value pairs.
    fn form_entries(&self, form: &Self::Node) -> Vec<(String, String)>;

    /// Raw `document.cookie` string.
    fn cookies(&self) -> String;

    /// Whether `class` is present in the class list.
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Add `class` to the class list.
    fn add_class(&self, node: &Self::Node, class: &str);

    /// Remove `class` from the class list.
    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Detach `node` from the document.
    fn remove(&self, node: &Self::Node);

    /// Serialized content of `node`.
    fn inner_html(&self, node: &Self::Node) -> String;

    /// Replace the content of `node`.
    fn set_inner_html(&self, node: &Self::Node, html: &str);

    /// Register a click listener that suppresses default navigation and
    /// drives the future returned by `handler`.
    ///
    /// # Errors
    /// Returns [`DomError`] when the element cannot take a listener.
    fn on_click(&self, node: &Self::Node, handler: ClickHandler) -> Result<(), DomError>;
}
