//! Rendering of decoded trees for the terminal

use blob_tree::blob::Tree;
use std::io::{self, Write};

/// Print the header information and allocation statistics of a decoded tree
pub fn write_summary(out: &mut impl Write, tree: &Tree) -> io::Result<()> {
    writeln!(out, "version: {:#08x}", tree.version())?;
    writeln!(out, "nodes: {}", tree.node_count())?;
    writeln!(out, "properties: {}", tree.prop_count())?;
    writeln!(out, "consumed: {} bytes", tree.consumed_bytes())
}

/// Look `path` up as a node and then as a property and print what was found.
///
/// Returns whether the path could be resolved.
pub fn write_query(out: &mut impl Write, tree: &Tree, path: &str) -> io::Result<bool> {
    if let Ok(node) = tree.find_node_by_path(path) {
        writeln!(
            out,
            "{}: node {} ({} children, {} properties)",
            path,
            node.name(),
            node.children().count(),
            node.props().count()
        )?;
        return Ok(true);
    }

    match tree.find_prop_by_path(path) {
        Ok(prop) => {
            writeln!(out, "{} = {}", path, prop.value)?;
            Ok(true)
        }
        Err(e) => {
            log::debug!("lookup of {:?} failed: {}", path, e);
            writeln!(out, "{}: not found", path)?;
            Ok(false)
        }
    }
}
