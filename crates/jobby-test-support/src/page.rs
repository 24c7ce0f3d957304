//! In-memory document implementing [`Dom`].
//!
//! Selectors support one compound per query: an optional tag followed by any
//! number of `.class`, `#id` and `[name]` / `[name=value]` parts.

use std::cell::RefCell;

use jobby_ui::core::dom::{ClickFuture, ClickHandler, Dom, DomError};

/// Handle to an element of a [`FakePage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Element description appended to a [`FakePage`].
#[derive(Clone, Debug, Default)]
pub struct El {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    value: Option<String>,
    text: String,
    children: Vec<El>,
}

impl El {
    /// Element from `tag.class.class` shorthand.
    #[must_use]
    pub fn new(shorthand: &str) -> Self {
        let mut parts = shorthand.split('.');
        let tag = parts.next().unwrap_or_default().to_ascii_lowercase();
        Self {
            tag: if tag.is_empty() { "div".into() } else { tag },
            classes: parts.filter(|class| !class.is_empty()).map(String::from).collect(),
            ..Self::default()
        }
    }

    /// Add a class.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Set the control value.
    #[must_use]
    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    /// Set text content.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Append a child element.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }
}

struct NodeData {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    value: Option<String>,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
    handlers: Vec<ClickHandler>,
}

/// Mutable document tree with click handler bookkeeping.
pub struct FakePage {
    nodes: RefCell<Vec<NodeData>>,
    cookies: RefCell<String>,
}

const ROOT: usize = 0;

impl Default for FakePage {
    fn default() -> Self {
        Self::new()
    }
}

impl FakePage {
    /// Empty page with a `body` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![NodeData {
                tag: "body".into(),
                classes: Vec::new(),
                attributes: Vec::new(),
                value: None,
                text: String::new(),
                parent: None,
                children: Vec::new(),
                handlers: Vec::new(),
            }]),
            cookies: RefCell::new(String::new()),
        }
    }

    /// Page holding `elements` under its root.
    #[must_use]
    pub fn with(elements: impl IntoIterator<Item = El>) -> Self {
        let page = Self::new();
        for element in elements {
            page.mount(element);
        }
        page
    }

    /// Root element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(ROOT)
    }

    /// Append `element` to the root.
    pub fn mount(&self, element: El) -> NodeId {
        self.append(self.root(), element)
    }

    /// Append `element` under `parent`.
    pub fn append(&self, parent: NodeId, element: El) -> NodeId {
        let El {
            tag,
            classes,
            attributes,
            value,
            text,
            children,
        } = element;
        let id = {
            let mut nodes = self.nodes.borrow_mut();
            let id = nodes.len();
            nodes.push(NodeData {
                tag,
                classes,
                attributes,
                value,
                text,
                parent: Some(parent.0),
                children: Vec::new(),
                handlers: Vec::new(),
            });
            nodes[parent.0].children.push(id);
            id
        };
        for child in children {
            self.append(NodeId(id), child);
        }
        NodeId(id)
    }

    /// Replace the `document.cookie` string.
    pub fn set_cookies(&self, cookies: &str) {
        *self.cookies.borrow_mut() = cookies.to_string();
    }

    /// Class list of `node`.
    #[must_use]
    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.nodes.borrow()[node.0].classes.clone()
    }

    /// Whether `node` is still reachable from the root.
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = node.0;
        loop {
            if current == ROOT {
                return true;
            }
            match nodes[current].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Click handlers registered on `node`.
    #[must_use]
    pub fn handler_count(&self, node: NodeId) -> usize {
        self.nodes.borrow()[node.0].handlers.len()
    }

    /// Dispatch a click and return the futures started by its handlers.
    #[must_use]
    pub fn click(&self, node: NodeId) -> Vec<ClickFuture> {
        let handlers = self.nodes.borrow()[node.0].handlers.clone();
        handlers.iter().map(|handler| handler()).collect()
    }

    /// Click `node` and drive every started future to completion.
    pub async fn press(&self, node: NodeId) {
        for future in self.click(node) {
            future.await;
        }
    }

    /// First element matching `selector`; panics when there is none.
    #[must_use]
    pub fn find(&self, selector: &str) -> NodeId {
        match self.query(selector) {
            Some(node) => node,
            None => panic!("no element matches {selector}"),
        }
    }

    fn descendants(&self, node: usize) -> Vec<usize> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<usize> = nodes[node].children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(nodes[current].children.iter().rev().copied());
        }
        out
    }

    fn matches(&self, node: usize, selector: &Selector) -> bool {
        let nodes = self.nodes.borrow();
        let data = &nodes[node];
        selector
            .tag
            .as_ref()
            .is_none_or(|tag| data.tag.eq_ignore_ascii_case(tag))
            && selector
                .classes
                .iter()
                .all(|class| data.classes.contains(class))
            && selector.attributes.iter().all(|(name, expected)| {
                let actual = attribute_of(data, name);
                match expected {
                    Some(expected) => actual.as_deref() == Some(expected.as_str()),
                    None => actual.is_some(),
                }
            })
    }

    fn detach(&self, node: usize) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[node].parent.take() {
            nodes[parent].children.retain(|child| *child != node);
        }
    }

    fn serialize(&self, node: usize, out: &mut String) {
        let (tag, classes, text, children) = {
            let nodes = self.nodes.borrow();
            let data = &nodes[node];
            (
                data.tag.clone(),
                data.classes.join(" "),
                data.text.clone(),
                data.children.clone(),
            )
        };
        out.push('<');
        out.push_str(&tag);
        if !classes.is_empty() {
            out.push_str(&format!(" class=\"{classes}\""));
        }
        out.push('>');
        out.push_str(&text);
        for child in children {
            self.serialize(child, out);
        }
        out.push_str(&format!("</{tag}>"));
    }
}

fn attribute_of(data: &NodeData, name: &str) -> Option<String> {
    if name == "class" {
        return Some(data.classes.join(" "));
    }
    data.attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

#[derive(Debug, Default)]
struct Selector {
    tag: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

const SIMPLE_START: [char; 3] = ['.', '#', '['];

impl Selector {
    fn parse(raw: &str) -> Self {
        let mut selector = Self::default();
        let mut rest = raw.trim();
        let tag_end = rest.find(SIMPLE_START).unwrap_or(rest.len());
        if tag_end > 0 && &rest[..tag_end] != "*" {
            selector.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];
        while let Some(first) = rest.chars().next() {
            match first {
                '[' => {
                    let end = rest.find(']').unwrap_or(rest.len());
                    let inner = &rest[1..end];
                    let attribute = match inner.split_once('=') {
                        Some((name, value)) => (
                            name.trim().to_string(),
                            Some(value.trim().trim_matches(['"', '\'']).to_string()),
                        ),
                        None => (inner.trim().to_string(), None),
                    };
                    selector.attributes.push(attribute);
                    rest = rest.get(end + 1..).unwrap_or_default();
                }
                '.' | '#' => {
                    let body = &rest[1..];
                    let end = body.find(SIMPLE_START).unwrap_or(body.len());
                    let name = body[..end].to_string();
                    if first == '.' {
                        selector.classes.push(name);
                    } else {
                        selector.attributes.push(("id".into(), Some(name)));
                    }
                    rest = &body[end..];
                }
                _ => break,
            }
        }
        selector
    }
}

impl Dom for FakePage {
    type Node = NodeId;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let selector = Selector::parse(selector);
        self.descendants(ROOT)
            .into_iter()
            .filter(|node| self.matches(*node, &selector))
            .map(NodeId)
            .collect()
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_within(&self.root(), selector)
    }

    fn query_within(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector);
        self.descendants(node.0)
            .into_iter()
            .find(|candidate| self.matches(*candidate, &selector))
            .map(NodeId)
    }

    fn count_within(&self, node: &NodeId, selector: &str) -> usize {
        let selector = Selector::parse(selector);
        self.descendants(node.0)
            .into_iter()
            .filter(|candidate| self.matches(*candidate, &selector))
            .count()
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector);
        let mut current = Some(node.0);
        while let Some(candidate) = current {
            if self.matches(candidate, &selector) {
                return Some(NodeId(candidate));
            }
            current = self.nodes.borrow()[candidate].parent;
        }
        None
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        attribute_of(&self.nodes.borrow()[node.0], name)
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let data = &mut nodes[node.0];
        if name == "class" {
            data.classes = value.split_whitespace().map(String::from).collect();
            return;
        }
        match data.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, current)) => *current = value.to_string(),
            None => data.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn value(&self, node: &NodeId) -> Option<String> {
        let nodes = self.nodes.borrow();
        let data = &nodes[node.0];
        data.value
            .clone()
            .or_else(|| attribute_of(data, "value"))
    }

    fn form_entries(&self, form: &NodeId) -> Vec<(String, String)> {
        self.descendants(form.0)
            .into_iter()
            .filter_map(|node| {
                let nodes = self.nodes.borrow();
                let data = &nodes[node];
                if !matches!(data.tag.as_str(), "input" | "select" | "textarea") {
                    return None;
                }
                if attribute_of(data, "disabled").is_some() {
                    return None;
                }
                let kind = attribute_of(data, "type").unwrap_or_default();
                if matches!(kind.as_str(), "checkbox" | "radio")
                    && attribute_of(data, "checked").is_none()
                {
                    return None;
                }
                let name = attribute_of(data, "name").filter(|name| !name.is_empty())?;
                let value = data
                    .value
                    .clone()
                    .or_else(|| attribute_of(data, "value"))
                    .unwrap_or_default();
                Some((name, value))
            })
            .collect()
    }

    fn cookies(&self) -> String {
        self.cookies.borrow().clone()
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[node.0]
            .classes
            .iter()
            .any(|current| current == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[node.0].classes;
        if !classes.iter().any(|current| current == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.nodes.borrow_mut()[node.0]
            .classes
            .retain(|current| current != class);
    }

    fn remove(&self, node: &NodeId) {
        self.detach(node.0);
    }

    fn inner_html(&self, node: &NodeId) -> String {
        let (mut out, children) = {
            let nodes = self.nodes.borrow();
            (nodes[node.0].text.clone(), nodes[node.0].children.clone())
        };
        for child in children {
            self.serialize(child, &mut out);
        }
        out
    }

    fn set_inner_html(&self, node: &NodeId, html: &str) {
        let children = self.nodes.borrow()[node.0].children.clone();
        for child in children {
            self.detach(child);
        }
        self.nodes.borrow_mut()[node.0].text = html.to_string();
    }

    fn on_click(&self, node: &NodeId, handler: ClickHandler) -> Result<(), DomError> {
        if !self.is_attached(*node) {
            return Err(DomError::Detached {
                element: self.nodes.borrow()[node.0].tag.clone(),
            });
        }
        self.nodes.borrow_mut()[node.0].handlers.push(handler);
        Ok(())
    }
}
