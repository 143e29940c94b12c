//! In-memory node tree.
//!
//! [`NodeImpl`] is the engine-independent side of the DOM: script wrappers
//! hold a [`NodeHandle`] and translate property access into calls here.
//! Children are owned by their parent; the parent link is weak.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::exception::DomException;

/// Shared reference to a tree node.
pub type NodeHandle = Rc<NodeImpl>;

/// Node kinds, with their script-visible `nodeType` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// `ELEMENT_NODE`
    Element,
    /// `TEXT_NODE`
    Text,
    /// `COMMENT_NODE`
    Comment,
    /// `DOCUMENT_NODE`
    Document,
}

impl NodeType {
    /// Every node type, in code order.
    pub const ALL: [NodeType; 4] = [NodeType::Element, NodeType::Text, NodeType::Comment, NodeType::Document];

    /// The numeric `nodeType` code.
    pub fn code(self) -> u16 {
        match self {
            NodeType::Element => 1,
            NodeType::Text => 3,
            NodeType::Comment => 8,
            NodeType::Document => 9,
        }
    }

    /// The constant name on the `Node` constructor.
    pub fn constant_name(self) -> &'static str {
        match self {
            NodeType::Element => "ELEMENT_NODE",
            NodeType::Text => "TEXT_NODE",
            NodeType::Comment => "COMMENT_NODE",
            NodeType::Document => "DOCUMENT_NODE",
        }
    }

    fn allows_children(self) -> bool {
        matches!(self, NodeType::Element | NodeType::Document)
    }
}

/// A node in the tree.
pub struct NodeImpl {
    node_type: NodeType,
    name: String,
    data: RefCell<Option<String>>,
    attributes: RefCell<IndexMap<String, String>>,
    children: RefCell<Vec<NodeHandle>>,
    parent: RefCell<Weak<NodeImpl>>,
}

impl NodeImpl {
    fn create(node_type: NodeType, name: String, data: Option<String>) -> NodeHandle {
        Rc::new(NodeImpl {
            node_type,
            name,
            data: RefCell::new(data),
            attributes: RefCell::new(IndexMap::new()),
            children: RefCell::new(Vec::new()),
            parent: RefCell::new(Weak::new()),
        })
    }

    /// A new element. Tag names are stored upper-cased.
    pub fn element(tag_name: &str) -> NodeHandle {
        Self::create(NodeType::Element, tag_name.to_ascii_uppercase(), None)
    }

    /// A new text node.
    pub fn text(data: &str) -> NodeHandle {
        Self::create(NodeType::Text, "#text".to_string(), Some(data.to_string()))
    }

    /// A new comment node.
    pub fn comment(data: &str) -> NodeHandle {
        Self::create(NodeType::Comment, "#comment".to_string(), Some(data.to_string()))
    }

    /// A new document node.
    pub fn document() -> NodeHandle {
        Self::create(NodeType::Document, "#document".to_string(), None)
    }

    /// The node's kind.
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// `nodeName`: the tag name for elements, `#text` and friends
    /// otherwise.
    pub fn node_name(&self) -> &str {
        &self.name
    }

    /// `nodeValue`: character data for text and comments, `None` otherwise.
    pub fn node_value(&self) -> Option<String> {
        self.data.borrow().clone()
    }

    /// Set `nodeValue`. Has no effect on elements and documents.
    pub fn set_node_value(&self, value: Option<String>) {
        if self.data.borrow().is_some() {
            *self.data.borrow_mut() = Some(value.unwrap_or_default());
        }
    }

    /// `textContent`.
    ///
    /// Character data for text and comments; the concatenated text of all
    /// descendant text nodes for elements; `None` for documents.
    pub fn text_content(&self) -> Option<String> {
        match self.node_type {
            NodeType::Text | NodeType::Comment => self.node_value(),
            NodeType::Element => {
                let mut text = String::new();
                self.collect_text(&mut text);
                Some(text)
            }
            NodeType::Document => None,
        }
    }

    fn collect_text(&self, out: &mut String) {
        for child in self.children.borrow().iter() {
            match child.node_type {
                NodeType::Text => {
                    if let Some(data) = child.data.borrow().as_deref() {
                        out.push_str(data);
                    }
                }
                NodeType::Element => child.collect_text(out),
                NodeType::Comment | NodeType::Document => {}
            }
        }
    }

    /// Set `textContent`.
    ///
    /// Elements drop their children and, for non-empty text, take a single
    /// text child. Documents ignore the write.
    pub fn set_text_content(self: &Rc<Self>, text: Option<String>) {
        match self.node_type {
            NodeType::Text | NodeType::Comment => self.set_node_value(text),
            NodeType::Element => {
                let removed: Vec<NodeHandle> = self.children.borrow_mut().drain(..).collect();
                for child in removed {
                    *child.parent.borrow_mut() = Weak::new();
                }
                if let Some(text) = text.filter(|text| !text.is_empty()) {
                    let child = NodeImpl::text(&text);
                    *child.parent.borrow_mut() = Rc::downgrade(self);
                    self.children.borrow_mut().push(child);
                }
            }
            NodeType::Document => {}
        }
    }

    /// The parent node, if attached.
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent.borrow().upgrade()
    }

    /// Children in document order.
    pub fn children(&self) -> Vec<NodeHandle> {
        self.children.borrow().clone()
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    /// First child.
    pub fn first_child(&self) -> Option<NodeHandle> {
        self.children.borrow().first().cloned()
    }

    /// Last child.
    pub fn last_child(&self) -> Option<NodeHandle> {
        self.children.borrow().last().cloned()
    }

    /// Returns true if the node has children.
    pub fn has_child_nodes(&self) -> bool {
        !self.children.borrow().is_empty()
    }

    /// Returns true if `self` is `other` or one of its ancestors.
    pub fn is_inclusive_ancestor_of(&self, other: &NodeHandle) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if std::ptr::eq(self, Rc::as_ptr(&node)) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Append `child`, detaching it from its current parent first.
    ///
    /// # Errors
    ///
    /// [`DomException::HierarchyRequest`] if this node cannot have
    /// children, `child` is a document, or `child` is this node or one of
    /// its ancestors.
    pub fn append_child(self: &Rc<Self>, child: &NodeHandle) -> Result<(), DomException> {
        if !self.node_type.allows_children()
            || child.node_type == NodeType::Document
            || child.is_inclusive_ancestor_of(self)
        {
            return Err(DomException::HierarchyRequest);
        }

        if let Some(old_parent) = child.parent() {
            old_parent.detach(child);
        }
        *child.parent.borrow_mut() = Rc::downgrade(self);
        self.children.borrow_mut().push(child.clone());
        Ok(())
    }

    /// Remove `child`.
    ///
    /// # Errors
    ///
    /// [`DomException::NotFound`] if `child` is not a child of this node.
    pub fn remove_child(&self, child: &NodeHandle) -> Result<NodeHandle, DomException> {
        if !self.detach(child) {
            return Err(DomException::NotFound);
        }
        *child.parent.borrow_mut() = Weak::new();
        Ok(child.clone())
    }

    fn detach(&self, child: &NodeHandle) -> bool {
        let mut children = self.children.borrow_mut();
        match children.iter().position(|c| Rc::ptr_eq(c, child)) {
            Some(index) => {
                children.remove(index);
                true
            }
            None => false,
        }
    }

    /// Attribute value, for elements.
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    /// Set an attribute. Only elements carry attributes.
    ///
    /// # Errors
    ///
    /// [`DomException::InvalidCharacter`] for an empty or whitespace-bearing
    /// name; [`DomException::NoModificationAllowed`] on non-elements.
    pub fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomException> {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(DomException::InvalidCharacter);
        }
        if self.node_type != NodeType::Element {
            return Err(DomException::NoModificationAllowed);
        }
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Returns true if the attribute is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.borrow().contains_key(name)
    }

    /// Remove an attribute; absent attributes are ignored.
    pub fn remove_attribute(&self, name: &str) {
        self.attributes.borrow_mut().shift_remove(name);
    }

    /// Attribute names in insertion order.
    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes.borrow().keys().cloned().collect()
    }
}

impl fmt::Debug for NodeImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeImpl")
            .field("node_type", &self.node_type)
            .field("name", &self.name)
            .field("children", &self.child_count())
            .finish()
    }
}
