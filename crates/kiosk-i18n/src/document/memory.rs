use super::{Document, NodeId};
use crossbeam_channel::{Receiver, Sender, unbounded};
use indexmap::IndexMap;
use std::borrow::Cow;

#[derive(Clone, Debug)]
enum Child {
    Element(NodeId),
    Text(String),
    Markup(String),
}

#[derive(Clone, Debug)]
struct Element {
    tag: String,
    attributes: IndexMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<Child>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: IndexMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// An arena-backed [`Document`].
///
/// Starts as `<html><head></head><body></body></html>`. Elements created with
/// [`create_element`](Self::create_element) are detached until appended;
/// appending to a connected parent publishes the element to insertion
/// subscribers. Markup set through `set_inner_html` is stored verbatim and
/// never parsed into elements. Attribute names are ASCII case-insensitive.
///
/// Node slots are never reclaimed: a removed or replaced element keeps its
/// [`NodeId`] and its memory for the life of the document, so it can be
/// re-appended later. Hosts that churn through markup for a long time should
/// start a fresh document rather than keep one forever.
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: Vec<Element>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    title: String,
    subscribers: Vec<Sender<NodeId>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            title: String::new(),
            subscribers: Vec::new(),
        };
        doc.root = doc.create_element("html");
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        doc.append_child(doc.root, doc.head);
        doc.append_child(doc.root, doc.body);
        doc
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// The document title as last set through [`Document::set_title`].
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::new(tag));
        id
    }

    /// Creates a detached element with the given attributes.
    pub fn create_element_with(&mut self, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let id = self.create_element(tag);
        for (name, value) in attributes {
            self.set_attribute(id, name, value);
        }
        id
    }

    /// Moves `child` under `parent`, after its existing children.
    ///
    /// Does nothing if `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        if self.is_inclusive_ancestor(child, parent) {
            tracing::debug!("Refusing to append {:?} under its own descendant", child);
            return;
        }

        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(Child::Element(child));

        if self.is_connected(child) {
            self.subscribers.retain(|tx| tx.send(child).is_ok());
        }
    }

    /// Appends a text run to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        if let Some(element) = self.get_mut(parent) {
            element.children.push(Child::Text(text.to_string()));
        }
    }

    /// Detaches `node` from its parent. The node and its subtree stay valid.
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    /// Whether `node` is reachable from the root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root, node)
    }

    /// Concatenated text of `node` and its descendants. Markup contributes
    /// its text with tags stripped.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Some(element) = self.get(node) {
            for child in &element.children {
                self.write_child(child, &mut out);
            }
        }
        out
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_element(node, &mut out);
        out
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    /// Element children of `node`.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.get(node)
            .map(|element| {
                element
                    .children
                    .iter()
                    .filter_map(|child| match child {
                        Child::Element(id) => Some(*id),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0)
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.parent(candidate);
        }
        false
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.get_mut(node).and_then(|element| element.parent.take()) else {
            return;
        };
        if let Some(parent) = self.get_mut(parent) {
            parent
                .children
                .retain(|child| !matches!(child, Child::Element(id) if *id == node));
        }
    }

    fn clear_children(&mut self, node: NodeId) {
        let Some(element) = self.get_mut(node) else {
            return;
        };
        let children = std::mem::take(&mut element.children);
        for child in children {
            if let Child::Element(id) = child
                && let Some(orphan) = self.get_mut(id)
            {
                orphan.parent = None;
            }
        }
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(element) = self.get(node) else {
            return;
        };
        for child in &element.children {
            match child {
                Child::Element(id) => self.collect_text(*id, out),
                Child::Text(text) => out.push_str(text),
                Child::Markup(markup) => out.push_str(&strip_tags(markup)),
            }
        }
    }

    fn write_child(&self, child: &Child, out: &mut String) {
        match child {
            Child::Element(id) => self.write_element(*id, out),
            Child::Text(text) => out.push_str(&escape(text, false)),
            Child::Markup(markup) => out.push_str(markup),
        }
    }

    fn write_element(&self, node: NodeId, out: &mut String) {
        let Some(element) = self.get(node) else {
            return;
        };
        out.push('<');
        out.push_str(&element.tag);
        for (name, value) in &element.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value, true));
            out.push('"');
        }
        out.push('>');
        for child in &element.children {
            self.write_child(child, out);
        }
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }
}

impl Document for MemoryDocument {
    fn root(&self) -> NodeId {
        self.root
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(|element| element.tag.as_str())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node)?
            .attributes
            .get(&*attribute_name(name))
            .map(String::as_str)
    }

    fn attributes(&self, node: NodeId) -> Vec<(&str, &str)> {
        self.get(node)
            .map(|element| {
                element
                    .attributes
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.get_mut(node) {
            element
                .attributes
                .insert(attribute_name(name).into_owned(), value.to_string());
        }
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        if let Some(element) = self.get_mut(node) {
            element.children.push(Child::Text(text.to_string()));
        }
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        self.clear_children(node);
        if let Some(element) = self.get_mut(node) {
            element.children.push(Child::Markup(html.to_string()));
        }
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn toggle_class(&mut self, node: NodeId, class: &str, enabled: bool) {
        let Some(element) = self.get_mut(node) else {
            return;
        };
        let current = element.attributes.get("class").map(String::as_str).unwrap_or("");
        let mut classes: Vec<&str> = current
            .split_ascii_whitespace()
            .filter(|c| *c != class)
            .collect();
        if enabled {
            classes.push(class);
        }
        let joined = classes.join(" ");
        element.attributes.insert("class".to_string(), joined);
    }

    fn query_all(&self, scope: NodeId, attribute: &str) -> Vec<NodeId> {
        let attribute = attribute_name(attribute);
        let mut found = Vec::new();
        let mut stack = vec![scope];
        while let Some(node) = stack.pop() {
            let Some(element) = self.get(node) else {
                continue;
            };
            if element.attributes.contains_key(&*attribute) {
                found.push(node);
            }
            for child in element.children.iter().rev() {
                if let Child::Element(id) = child {
                    stack.push(*id);
                }
            }
        }
        found
    }

    fn subscribe_insertions(&mut self) -> Receiver<NodeId> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }
}

/// Attribute names are ASCII case-insensitive, as in HTML.
fn attribute_name(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {},
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_head_and_body() {
        let doc = MemoryDocument::new();
        assert_eq!(doc.tag_name(doc.root()), Some("html"));
        assert_eq!(doc.children(doc.root()), vec![doc.head(), doc.body()]);
        assert_eq!(
            doc.outer_html(doc.root()),
            "<html><head></head><body></body></html>"
        );
    }

    #[test]
    fn query_all_is_inclusive_and_in_document_order() {
        let mut doc = MemoryDocument::new();
        let section = doc.create_element_with("section", &[("data-translate", "a")]);
        let first = doc.create_element_with("p", &[("data-translate", "b")]);
        let nested = doc.create_element_with("span", &[("data-translate", "c")]);
        let second = doc.create_element_with("p", &[("data-translate", "d")]);
        doc.append_child(doc.body(), section);
        doc.append_child(section, first);
        doc.append_child(first, nested);
        doc.append_child(section, second);

        assert_eq!(
            doc.query_all(section, "data-translate"),
            vec![section, first, nested, second]
        );
        assert_eq!(doc.query_all(first, "data-translate"), vec![first, nested]);
    }

    #[test]
    fn publishes_only_connected_insertions() {
        let mut doc = MemoryDocument::new();
        let rx = doc.subscribe_insertions();

        let card = doc.create_element("div");
        let label = doc.create_element("span");
        doc.append_child(card, label);
        assert!(rx.try_recv().is_err());

        doc.append_child(doc.body(), card);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![card]);
    }

    #[test]
    fn text_and_markup_replace_children() {
        let mut doc = MemoryDocument::new();
        let p = doc.create_element("p");
        let old = doc.create_element("b");
        doc.append_child(doc.body(), p);
        doc.append_child(p, old);

        doc.set_text_content(p, "1 < 2");
        assert_eq!(doc.inner_html(p), "1 &lt; 2");
        assert_eq!(doc.parent(old), None);

        doc.set_inner_html(p, "<b>Salam</b> dünya");
        assert_eq!(doc.inner_html(p), "<b>Salam</b> dünya");
        assert_eq!(doc.text_content(p), "Salam dünya");
    }

    #[test]
    fn toggle_class_adds_and_removes() {
        let mut doc = MemoryDocument::new();
        let button = doc.create_element_with("button", &[("class", "btn active")]);

        doc.toggle_class(button, "active", false);
        assert!(!doc.has_class(button, "active"));
        assert!(doc.has_class(button, "btn"));

        doc.toggle_class(button, "active", true);
        doc.toggle_class(button, "active", true);
        assert_eq!(doc.attribute(button, "class"), Some("btn active"));
    }

    #[test]
    fn closest_walks_ancestors() {
        let mut doc = MemoryDocument::new();
        let button = doc.create_element_with("button", &[("data-language-switch", "ru")]);
        let icon = doc.create_element("i");
        doc.append_child(doc.body(), button);
        doc.append_child(button, icon);

        assert_eq!(doc.closest(icon, "data-language-switch"), Some(button));
        assert_eq!(doc.closest(doc.body(), "data-language-switch"), None);
    }

    #[test]
    fn refuses_cycles() {
        let mut doc = MemoryDocument::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner);
        doc.append_child(inner, outer);

        assert_eq!(doc.parent(outer), None);
        assert_eq!(doc.parent(inner), Some(outer));
    }

    #[test]
    fn attribute_names_ignore_ascii_case() {
        let mut doc = MemoryDocument::new();
        let input =
            doc.create_element_with("input", &[("data-translate-Placeholder", "search.hint")]);
        doc.append_child(doc.body(), input);

        assert_eq!(
            doc.attribute(input, "data-translate-placeholder"),
            Some("search.hint")
        );
        assert_eq!(
            doc.attribute(input, "DATA-TRANSLATE-PLACEHOLDER"),
            Some("search.hint")
        );
        assert_eq!(doc.query_all(doc.root(), "Data-Translate-Placeholder"), vec![input]);

        doc.set_attribute(input, "PlaceHolder", "Ad yazın");
        assert_eq!(doc.attribute(input, "placeholder"), Some("Ad yazın"));
        assert_eq!(doc.attributes(input).len(), 2);
    }

    #[test]
    fn removed_nodes_keep_their_ids() {
        let mut doc = MemoryDocument::new();
        let card = doc.create_element_with("div", &[("data-translate", "card")]);
        let label = doc.create_element("span");
        doc.append_child(card, label);
        doc.append_child(doc.body(), card);

        doc.remove(card);
        assert!(!doc.is_connected(card));
        assert_eq!(doc.parent(label), Some(card));
        assert_eq!(doc.attribute(card, "data-translate"), Some("card"));

        let fresh = doc.create_element("p");
        assert_ne!(fresh, card);
        assert_ne!(fresh, label);

        doc.append_child(doc.body(), card);
        assert!(doc.is_connected(label));
    }
}
