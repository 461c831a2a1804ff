use crate::blob::Node;
use core::fmt;

const INDENT: usize = 4;

/// Human readable rendition of a subtree, created by [`Node::dump`]
///
/// ```text
/// node = node1
///     prop: string = test_string
///     prop: array = 0x1 0x2 0x787de
///     node = subnode1
///         prop: u32 = 0xdeadbeef
/// ```
#[derive(Debug, Copy, Clone)]
pub struct NodeDump<'tree, 'buf> {
    node: Node<'tree, 'buf>,
}

impl<'tree, 'buf> Node<'tree, 'buf> {
    /// Render this node, its properties and all of its descendants
    pub fn dump(&self) -> NodeDump<'tree, 'buf> {
        NodeDump { node: *self }
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: Node<'_, '_>, depth: usize) -> fmt::Result {
    let indent = depth * INDENT;
    writeln!(f, "{:indent$}node = {}", "", node.name(), indent = indent)?;
    for prop in node.props() {
        writeln!(
            f,
            "{:indent$}prop: {} = {}",
            "",
            prop.name,
            prop.value,
            indent = indent + INDENT
        )?;
    }
    for child in node.children() {
        write_node(f, child, depth + 1)?;
    }
    Ok(())
}

impl<'tree, 'buf> fmt::Display for NodeDump<'tree, 'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.node, 0)
    }
}
