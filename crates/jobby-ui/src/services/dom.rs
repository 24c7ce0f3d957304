//! `web_sys` document access.

use std::cell::RefCell;

use gloo::events::{EventListener, EventListenerOptions};
use js_sys::Array;
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{
    Blob, Document, Element, FormData, HtmlDocument, HtmlFormElement, HtmlInputElement,
};

use crate::core::dom::{ClickHandler, Dom, DomError};
use crate::core::search_form::EntryValue;

/// Live document; owns the click listeners it registers.
pub(crate) struct WebDom {
    document: Document,
    listeners: RefCell<Vec<EventListener>>,
}

impl WebDom {
    pub(crate) fn new(document: Document) -> Self {
        Self {
            document,
            listeners: RefCell::new(Vec::new()),
        }
    }
}

/// Entries of a form data set in submission order.
pub(crate) fn form_data_entries(data: &FormData) -> Vec<(String, EntryValue<Blob>)> {
    let Ok(Some(entries)) = js_sys::try_iter(data) else {
        return Vec::new();
    };
    entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let pair = Array::from(&entry);
            let name = pair.get(0).as_string()?;
            let value = pair.get(1);
            let value = match value.as_string() {
                Some(text) => EntryValue::Text(text),
                None => EntryValue::File(value.dyn_into::<Blob>().ok()?),
            };
            Some((name, value))
        })
        .collect()
}

fn elements(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Dom for WebDom {
    type Node = Element;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        self.document
            .query_selector_all(selector)
            .map(|list| elements(&list))
            .unwrap_or_default()
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_within(&self, node: &Element, selector: &str) -> Option<Element> {
        node.query_selector(selector).ok().flatten()
    }

    fn count_within(&self, node: &Element, selector: &str) -> usize {
        node.query_selector_all(selector)
            .ok()
            .and_then(|list| usize::try_from(list.length()).ok())
            .unwrap_or_default()
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        node.closest(selector).ok().flatten()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            debug!(attribute = name, error = ?err, "failed to set attribute");
        }
    }

    fn value(&self, node: &Element) -> Option<String> {
        node.dyn_ref::<HtmlInputElement>()
            .map(HtmlInputElement::value)
    }

    fn form_entries(&self, form: &Element) -> Vec<(String, String)> {
        let Some(form) = form.dyn_ref::<HtmlFormElement>() else {
            return Vec::new();
        };
        FormData::new_with_form(form)
            .map(|data| {
                form_data_entries(&data)
                    .into_iter()
                    .filter_map(|(name, value)| match value {
                        EntryValue::Text(text) => Some((name, text)),
                        EntryValue::File(_) => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn cookies(&self) -> String {
        self.document
            .dyn_ref::<HtmlDocument>()
            .and_then(|document| document.cookie().ok())
            .unwrap_or_default()
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            debug!(class, error = ?err, "failed to add class");
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().remove_1(class) {
            debug!(class, error = ?err, "failed to remove class");
        }
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn inner_html(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn on_click(&self, node: &Element, handler: ClickHandler) -> Result<(), DomError> {
        if !node.is_connected() {
            return Err(DomError::Detached {
                element: node.tag_name().to_lowercase(),
            });
        }
        let listener = EventListener::new_with_options(
            node,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                wasm_bindgen_futures::spawn_local(handler());
            },
        );
        self.listeners.borrow_mut().push(listener);
        Ok(())
    }
}
