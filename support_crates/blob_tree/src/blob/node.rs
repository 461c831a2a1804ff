//! Nodes and properties of a decoded tree

use crate::blob::list::{Link, ListIter};
use crate::blob::{PropType, PropValue, Tree};
use core::fmt;

/// Stable index of a node inside the [`Tree`] that decoded it
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node `/` which exists in every tree
    pub const ROOT: NodeId = NodeId(0);
}

/// Stable index of a property inside the [`Tree`] that decoded it
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone)]
pub struct PropId(pub(crate) usize);

/// Storage of a single node inside the tree arena
#[derive(Debug)]
pub(crate) struct NodeRecord<'buf> {
    pub(crate) name: &'buf str,
    pub(crate) parent: Option<NodeId>,
    pub(crate) level: u8,
    /// Head of the list of child nodes
    pub(crate) children: Link,
    /// Head of the list of properties
    pub(crate) props: Link,
}

/// A single property of a node.
///
/// Both the name and the value borrow directly from the buffer the tree was decoded from.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct Property<'buf> {
    /// The name of the property
    pub name: &'buf str,
    /// The still encoded value, starting at its tag byte
    pub raw: &'buf [u8],
    /// The decoded value
    pub value: PropValue<'buf>,
}

impl<'buf> Property<'buf> {
    pub fn prop_type(&self) -> PropType {
        self.value.prop_type()
    }

    pub fn tag(&self) -> u8 {
        self.value.tag()
    }
}

/// A handle to one node of a [`Tree`].
///
/// Handles are cheap to copy and compare equal if they refer to the same node of the same tree.
#[derive(Copy, Clone)]
pub struct Node<'tree, 'buf> {
    tree: &'tree Tree<'buf>,
    id: NodeId,
}

impl<'tree, 'buf> Node<'tree, 'buf> {
    pub(crate) fn new(tree: &'tree Tree<'buf>, id: NodeId) -> Self {
        Self { tree, id }
    }

    fn record(&self) -> &'tree NodeRecord<'buf> {
        self.tree.record(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'tree Tree<'buf> {
        self.tree
    }

    /// The name of the node (`/` for the root)
    pub fn name(&self) -> &'buf str {
        self.record().name
    }

    /// The level byte this node was encoded with, which is its depth below the root
    pub fn level(&self) -> u8 {
        self.record().level
    }

    pub fn is_root(&self) -> bool {
        self.id == NodeId::ROOT
    }

    /// The parent of this node or `None` if this is the root
    pub fn parent(&self) -> Option<Node<'tree, 'buf>> {
        self.record().parent.map(|id| Node::new(self.tree, id))
    }

    pub fn has_children(&self) -> bool {
        !self.tree.child_links().is_empty(self.record().children)
    }

    /// Iterate over the direct children of this node in the order they were decoded
    pub fn children(&self) -> NodeIter<'tree, 'buf> {
        NodeIter {
            tree: self.tree,
            inner: self.tree.child_links().iter(self.record().children),
        }
    }

    /// Iterate over the properties of this node in the order they were decoded
    pub fn props(&self) -> PropertyIter<'tree, 'buf> {
        PropertyIter {
            tree: self.tree,
            inner: self.tree.prop_links().iter(self.record().props),
        }
    }
}

impl<'tree, 'buf> PartialEq for Node<'tree, 'buf> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<'tree, 'buf> Eq for Node<'tree, 'buf> {}

impl<'tree, 'buf> fmt::Debug for Node<'tree, 'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

/// An iterator over sibling nodes
#[derive(Debug, Clone)]
pub struct NodeIter<'tree, 'buf> {
    tree: &'tree Tree<'buf>,
    inner: ListIter<'tree, NodeId>,
}

impl<'tree, 'buf> Iterator for NodeIter<'tree, 'buf> {
    type Item = Node<'tree, 'buf>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = *self.inner.next()?;
        Some(Node::new(self.tree, id))
    }
}

impl<'tree, 'buf> DoubleEndedIterator for NodeIter<'tree, 'buf> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = *self.inner.next_back()?;
        Some(Node::new(self.tree, id))
    }
}

/// An iterator over the properties of one node
#[derive(Debug, Clone)]
pub struct PropertyIter<'tree, 'buf> {
    tree: &'tree Tree<'buf>,
    inner: ListIter<'tree, PropId>,
}

impl<'tree, 'buf> Iterator for PropertyIter<'tree, 'buf> {
    type Item = &'tree Property<'buf>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = *self.inner.next()?;
        Some(self.tree.property(id))
    }
}

impl<'tree, 'buf> DoubleEndedIterator for PropertyIter<'tree, 'buf> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = *self.inner.next_back()?;
        Some(self.tree.property(id))
    }
}
