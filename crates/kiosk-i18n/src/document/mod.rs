//! The document tree the runtime translates.
//!
//! The runtime only needs a narrow view of a document: attribute reads and
//! writes, content replacement, attribute queries and a feed of inserted
//! elements. [`MemoryDocument`] is the in-process implementation.

mod memory;

pub use memory::MemoryDocument;

use crossbeam_channel::Receiver;

/// Handle to an element of a [`Document`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

pub trait Document {
    /// The root element (`<html>`).
    fn root(&self) -> NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Lowercase tag name, `None` for an unknown node.
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// All attributes of `node` in document order.
    fn attributes(&self, node: NodeId) -> Vec<(&str, &str)>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Replaces the children of `node` with plain text.
    fn set_text_content(&mut self, node: NodeId, text: &str);

    /// Replaces the children of `node` with markup, taken as-is.
    fn set_inner_html(&mut self, node: NodeId, html: &str);

    fn set_title(&mut self, title: &str);

    fn toggle_class(&mut self, node: NodeId, class: &str, enabled: bool);

    /// Elements in the subtree of `scope` (`scope` included) carrying
    /// `attribute`, in document order.
    fn query_all(&self, scope: NodeId, attribute: &str) -> Vec<NodeId>;

    /// Receives every element inserted into the document from now on.
    ///
    /// When a subtree is attached only its top element is published.
    fn subscribe_insertions(&mut self) -> Receiver<NodeId>;

    /// The nearest ancestor-or-self of `node` carrying `attribute`.
    fn closest(&self, node: NodeId, attribute: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.attribute(candidate, attribute).is_some() {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// The `lang` attribute declared on the root element.
    fn declared_language(&self) -> Option<&str> {
        self.attribute(self.root(), "lang")
    }
}
