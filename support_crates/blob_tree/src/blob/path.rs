//! Lookup of nodes and properties by name and by path

use crate::blob::{AccessError, Node, Property, Tree};

/// Whether a path segment names `name`.
/// Spaces inside a segment are not significant.
fn segment_matches(segment: &str, name: &str) -> bool {
    segment.bytes().filter(|&b| b != b' ').eq(name.bytes())
}

impl<'tree, 'buf> Node<'tree, 'buf> {
    /// Find the direct child of this node that is called `name`
    pub fn child(&self, name: &str) -> Result<Node<'tree, 'buf>, AccessError> {
        self.children()
            .find(|child| child.name() == name)
            .ok_or(AccessError::NotFound)
    }

    /// Find the property of this node that is called `name`
    pub fn prop(&self, name: &str) -> Result<&'tree Property<'buf>, AccessError> {
        self.props()
            .find(|prop| prop.name == name)
            .ok_or(AccessError::NotFound)
    }
}

impl<'buf> Tree<'buf> {
    /// Search the direct children of `node` (or of the root if no node is given) for one called `name`.
    ///
    /// The search does not descend any further into the tree.
    pub fn find_node_by_name<'tree>(
        &'tree self,
        node: Option<Node<'tree, 'buf>>,
        name: &str,
    ) -> Result<Node<'tree, 'buf>, AccessError> {
        node.unwrap_or_else(|| self.root()).child(name)
    }

    /// Search the properties of `node` (or of the root if no node is given) for one called `name`
    pub fn find_prop_by_name<'tree>(
        &'tree self,
        node: Option<Node<'tree, 'buf>>,
        name: &str,
    ) -> Result<&'tree Property<'buf>, AccessError> {
        node.unwrap_or_else(|| self.root()).prop(name)
    }

    /// Search for the node that is located at the given `path`.
    ///
    /// The path is resolved from the root, with `/` separating the names of successive child nodes.
    /// Empty segments are skipped so that leading, trailing and repeated separators don't matter, and spaces are
    /// ignored entirely.
    /// Both `/` and the empty path resolve to the root itself.
    ///
    /// # Example
    ///
    /// Given a tree in which the root contains a `spi1` node that in turn contains a `display` node, the latter
    /// is identified by the path `/spi1/display`:
    ///
    /// ```text
    /// / {
    ///   spi1 {
    ///     display {
    ///       …
    ///     }
    ///   }
    /// }
    /// ```
    pub fn find_node_by_path(&self, path: &str) -> Result<Node<'_, 'buf>, AccessError> {
        path.split('/')
            .filter(|segment| segment.bytes().any(|b| b != b' '))
            .try_fold(self.root(), |node, segment| {
                node.children()
                    .find(|child| segment_matches(segment, child.name()))
                    .ok_or(AccessError::NotFound)
            })
    }

    /// Find the property identified by `path`.
    ///
    /// Everything up to the last `/` is resolved as a node path (see [`find_node_by_path`](Tree::find_node_by_path))
    /// and the remainder is looked up as a property name on that node.
    /// A path without any `/` names a property of the root.
    pub fn find_prop_by_path(&self, path: &str) -> Result<&Property<'buf>, AccessError> {
        let (node_path, prop_name) = path.rsplit_once('/').unwrap_or(("", path));
        self.find_node_by_path(node_path)?.prop(prop_name)
    }
}
