//! Arena-based XML tree.
//!
//! Every node of a document lives in one contiguous vector owned by
//! [`XmlTree`]. Parent and child links are indices into that vector, so the
//! parent back-reference never owns anything and cannot form a cycle.
//! Nodes detached by [`XmlTree::replace_child`] stay allocated until the tree
//! is dropped.

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single `name="value"` pair on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Attribute mapping of an element.
///
/// Keys are unique. Insertion order is kept so that a serialized element
/// lists its attributes the way they were read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of an attribute.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|a| a.name == name)
    }

    /// Set an attribute, replacing the value in place if the key exists.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.0.push(Attribute { name, value }),
        }
    }

    /// Remove an attribute, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.0.iter().position(|a| a.name == name)?;
        Some(self.0.remove(pos).value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|a| (a.name.as_str(), a.value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.set(name, value);
        }
        attrs
    }
}

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// Element with qualified name and attributes.
    Element {
        name: String,
        attrs: Attributes,
        /// Written as `<name/>` when it has no children.
        self_closing: bool,
    },
    /// Text content, stored unescaped.
    Text(String),
    /// Comment body, kept only so it survives a round trip.
    Comment(String),
    /// CDATA section body.
    CData(String),
    /// Processing instruction, stored as written between `<?` and `?>`.
    ProcessingInstruction(String),
    /// Document type declaration body.
    Doctype(String),
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct XmlNode {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl XmlNode {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Arena-based XML document tree.
#[derive(Debug, Clone, Default)]
pub struct XmlTree {
    nodes: Vec<XmlNode>,
    /// Body of the `<?xml ...?>` declaration, if the source had one.
    declaration: Option<String>,
    /// Comments, processing instructions and whitespace that precede the root.
    prolog: Vec<NodeId>,
    root: Option<NodeId>,
    /// Nodes that follow the root, usually the trailing newline.
    epilog: Vec<NodeId>,
}

impl XmlTree {
    /// Create an empty tree with no root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree whose root is a fresh element.
    pub fn with_root(name: &str, attrs: Attributes) -> Self {
        let mut tree = Self::new();
        let root = tree.create_element(name, attrs);
        tree.root = Some(root);
        tree
    }

    fn alloc(&mut self, node: XmlNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    pub fn declaration(&self) -> Option<&str> {
        self.declaration.as_deref()
    }

    pub fn set_declaration(&mut self, decl: impl Into<String>) {
        self.declaration = Some(decl.into());
    }

    pub fn prolog(&self) -> &[NodeId] {
        &self.prolog
    }

    pub fn push_prolog(&mut self, id: NodeId) {
        self.prolog.push(id);
    }

    pub fn epilog(&self) -> &[NodeId] {
        &self.epilog
    }

    pub fn push_epilog(&mut self, id: NodeId) {
        self.epilog.push(id);
    }

    pub fn get(&self, id: NodeId) -> Option<&XmlNode> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut XmlNode> {
        self.nodes.get_mut(id.index())
    }

    /// Number of allocated nodes, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached node.
    pub fn create_node(&mut self, data: NodeData) -> NodeId {
        self.alloc(XmlNode::new(data))
    }

    /// Allocate a detached element written as `<name></name>` when empty.
    pub fn create_element(&mut self, name: &str, attrs: Attributes) -> NodeId {
        self.create_node(NodeData::Element {
            name: name.to_string(),
            attrs,
            self_closing: false,
        })
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.create_node(NodeData::Text(text.into()))
    }

    /// Append a child to a parent node.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() {
            return;
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Append text to the last child if it is a text node, or add a new text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        // Try to append to existing text node
        if let Some(last) = self.children(parent).last().copied()
            && let Some(node) = self.get_mut(last)
            && let NodeData::Text(existing) = &mut node.data
        {
            existing.push_str(text);
            return;
        }
        let node = self.create_text(text);
        self.append(parent, node);
    }

    /// Insert a child at `index`, clamped to the end of the child list.
    pub fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) {
        let Some(node) = self.get_mut(parent) else {
            return;
        };
        let index = index.min(node.children.len());
        node.children.insert(index, child);
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
    }

    /// Replace the child at `index`, returning the detached node.
    pub fn replace_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Option<NodeId> {
        let slot = self.get_mut(parent)?.children.get_mut(index)?;
        let old = std::mem::replace(slot, child);
        if let Some(node) = self.get_mut(old) {
            node.parent = None;
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        Some(old)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Iterate over the element children of a node, skipping text and comments.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.name(child).is_some())
    }

    /// Get element's tag name.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }

    /// Check whether a node is an element with the given name.
    pub fn is_element(&self, id: NodeId, name: &str) -> bool {
        self.name(id) == Some(name)
    }

    pub fn attrs(&self, id: NodeId) -> Option<&Attributes> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { attrs, .. } => Some(attrs),
            _ => None,
        })
    }

    pub fn attrs_mut(&mut self, id: NodeId) -> Option<&mut Attributes> {
        self.get_mut(id).and_then(|n| match &mut n.data {
            NodeData::Element { attrs, .. } => Some(attrs),
            _ => None,
        })
    }

    /// Get an attribute value.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attrs(id).and_then(|attrs| attrs.get(name))
    }

    /// Set an attribute on an element. Returns `false` for non-element nodes.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        match self.attrs_mut(id) {
            Some(attrs) => {
                attrs.set(name, value);
                true
            }
            None => false,
        }
    }

    /// Get text content of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Text of the first child, when that child is a non-empty text node.
    ///
    /// Trailing children are not inspected.
    pub fn first_child_text(&self, id: NodeId) -> Option<&str> {
        let first = *self.children(id).first()?;
        self.text(first).filter(|s| !s.is_empty())
    }

    /// Find the first element named `name` in the subtree rooted at `id`.
    ///
    /// Depth-first, pre-order; the subtree root itself is a candidate.
    pub fn find_descendant(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if self.is_element(current, name) {
                return Some(current);
            }
            // Push children in reverse order for left-to-right traversal
            stack.extend(self.children(current).iter().rev().copied());
        }
        None
    }

    /// Find the first direct child element named `name`.
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.element_children(parent)
            .find(|&child| self.is_element(child, name))
    }

    /// Find the first direct child element named `name` whose `attr` equals `value`.
    pub fn find_child_with_attr(
        &self,
        parent: NodeId,
        name: &str,
        attr: &str,
        value: &str,
    ) -> Option<NodeId> {
        self.element_children(parent)
            .find(|&child| self.is_element(child, name) && self.attr(child, attr) == Some(value))
    }

    /// Index within the full child list of the first element named `name`.
    pub fn position_of_child(&self, parent: NodeId, name: &str) -> Option<usize> {
        self.children(parent)
            .iter()
            .position(|&child| self.is_element(child, name))
    }

    /// Deep-copy a subtree of this tree. The copy is detached.
    pub fn duplicate_subtree(&mut self, id: NodeId) -> Option<NodeId> {
        let copy = self.create_node(self.get(id)?.data.clone());
        let mut stack = vec![(id, copy)];
        while let Some((original, parent)) = stack.pop() {
            let children = self.children(original).to_vec();
            for child in children {
                let Some(data) = self.get(child).map(|n| n.data.clone()) else {
                    continue;
                };
                let child_copy = self.create_node(data);
                self.append(parent, child_copy);
                stack.push((child, child_copy));
            }
        }
        Some(copy)
    }

    /// Deep-copy a subtree of another tree into this one. The copy is detached.
    pub fn import_subtree(&mut self, source: &XmlTree, id: NodeId) -> Option<NodeId> {
        let copy = self.create_node(source.get(id)?.data.clone());
        let mut stack = vec![(id, copy)];
        while let Some((original, parent)) = stack.pop() {
            for &child in source.children(original) {
                let Some(node) = source.get(child) else {
                    continue;
                };
                let child_copy = self.create_node(node.data.clone());
                self.append(parent, child_copy);
                stack.push((child, child_copy));
            }
        }
        Some(copy)
    }
}
