//! Handling of the blob as a whole and decoding of its record stream

use crate::blob::list::LinkedSlab;
use crate::blob::node::NodeRecord;
use crate::blob::{
    BlobHeader, HeaderReadError, Node, NodeId, PropId, PropValue, Property, ValueError,
    STREAM_OFFSET,
};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ffi::CStr;
use core::mem;
use thiserror_no_std::Error;

/// First byte of a property record. Any other value starts a node record and is that node's level.
const PROP_MARKER: u8 = 0xff;

const ROOT_NAME: &str = "/";

/// The error that can occur when decoding a blob
#[derive(Debug, Error, Eq, PartialEq)]
pub enum DecodeError {
    /// The blob header could not be parsed for a specific reason
    #[error("Could not parse the blob header: {0}")]
    Header(#[from] HeaderReadError),
    /// Memory for a node or property record could not be allocated
    #[error("Could not allocate memory for another node or property")]
    AllocationFailure,
    /// A record started at `offset` but the buffer ended before its name was terminated
    #[error("The name of the record at offset {offset} is not null-terminated")]
    UnterminatedName { offset: usize },
    /// A record name is not valid UTF-8
    #[error("The name of the record at offset {offset} is not valid UTF-8")]
    InvalidName { offset: usize },
    /// The value of the property record at `offset` could not be parsed
    #[error("The property value at offset {offset} is invalid: {error}")]
    InvalidValue { offset: usize, error: ValueError },
    /// A node record descended more than one level at once
    #[error("The node record at offset {offset} jumps from level {from} to level {to}")]
    LevelJump { offset: usize, from: u8, to: u8 },
    /// A node record would have to be placed next to or above the root
    #[error("The node record at offset {offset} has level {level} which lies outside of the tree")]
    LevelUnderflow { offset: usize, level: u8 },
}

/// A tree of nodes and properties that has been decoded from an underlying buffer.
///
/// Node and property names as well as property values are not copied but borrowed from the buffer, which is why
/// the buffer must outlive the tree.
/// The tree itself only grows while it is decoded and is read-only afterwards.
#[derive(Debug)]
pub struct Tree<'buf> {
    version: u32,
    buf: &'buf [u8],
    nodes: Vec<NodeRecord<'buf>>,
    props: Vec<Property<'buf>>,
    child_links: LinkedSlab<NodeId>,
    prop_links: LinkedSlab<PropId>,
    consumed: usize,
}

impl<'buf> Tree<'buf> {
    /// Create a tree that contains nothing but the root node
    pub fn new() -> Self {
        let (child_links, children) = LinkedSlab::with_head();
        let (prop_links, props) = LinkedSlab::with_head();
        let mut nodes = Vec::new();
        nodes.push(NodeRecord {
            name: ROOT_NAME,
            parent: None,
            level: 0,
            children,
            props,
        });

        Self {
            version: 0,
            buf: &[],
            nodes,
            props: Vec::new(),
            child_links,
            prop_links,
            consumed: 0,
        }
    }

    /// Try to decode a tree from a buffer
    pub fn load(buf: &'buf [u8]) -> Result<Self, DecodeError> {
        let mut tree = Self::new();
        tree.reload(buf)?;
        Ok(tree)
    }

    /// Try to decode a tree from a raw pointer
    ///
    /// # Safety
    /// The given pointer must be valid and the backing memory must be readable for `len` bytes after it.
    ///
    /// The underlying memory must also be valid and unmodified for as long as the resulting instance is used.
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Result<Self, DecodeError> {
        let buf = core::slice::from_raw_parts::<u8>(ptr, len);
        Self::load(buf)
    }

    /// Discard everything that is currently stored in the tree and decode `buf` into it instead.
    ///
    /// If decoding fails, the tree is left containing only an empty root node.
    pub fn reload(&mut self, buf: &'buf [u8]) -> Result<(), DecodeError> {
        *self = Self::new();

        match self.decode(buf) {
            Ok(()) => {
                log::debug!(
                    "decoded blob version {:#08x} with {} nodes and {} properties ({} bytes consumed)",
                    self.version,
                    self.node_count(),
                    self.prop_count(),
                    self.consumed
                );
                Ok(())
            }
            Err(e) => {
                log::error!("could not decode blob: {}", e);
                *self = Self::new();
                Err(e)
            }
        }
    }

    fn decode(&mut self, buf: &'buf [u8]) -> Result<(), DecodeError> {
        let header = BlobHeader::read_from_buffer(buf)?;
        log::debug!(
            "decoding blob version {:#08x} of {} bytes",
            header.version,
            buf.len()
        );
        self.version = header.version;
        self.buf = buf;

        let mut pos = STREAM_OFFSET;
        let mut level = 0u8;
        let mut parent = NodeId::ROOT;
        let mut current = NodeId::ROOT;

        while pos < buf.len() {
            let record_start = pos;

            if buf[pos] == PROP_MARKER {
                let (name, name_len) = read_name(buf, pos + 1)?;
                let value_start = pos + 1 + name_len;
                let (value_len, value) =
                    PropValue::parse(&buf[value_start..]).map_err(|error| {
                        DecodeError::InvalidValue {
                            offset: value_start,
                            error,
                        }
                    })?;
                pos = value_start + value_len;

                log::trace!("property {:?} on {:?} at offset {}", name, current, record_start);
                self.add_prop(
                    current,
                    Property {
                        name,
                        raw: &buf[value_start..pos],
                        value,
                    },
                )?;
            } else {
                let new_level = buf[pos];
                if new_level == 0 {
                    log::warn!("node record at offset {} claims the root level", record_start);
                    return Err(DecodeError::LevelUnderflow {
                        offset: record_start,
                        level: new_level,
                    });
                }

                parent = match new_level.cmp(&level) {
                    Ordering::Greater if new_level - level > 1 => {
                        log::warn!(
                            "node record at offset {} skips from level {} to {}",
                            record_start,
                            level,
                            new_level
                        );
                        return Err(DecodeError::LevelJump {
                            offset: record_start,
                            from: level,
                            to: new_level,
                        });
                    }
                    Ordering::Greater => current,
                    Ordering::Equal => parent,
                    Ordering::Less => {
                        let mut ancestor = parent;
                        for _ in 0..level - new_level {
                            ancestor = self.record(ancestor).parent.ok_or(
                                DecodeError::LevelUnderflow {
                                    offset: record_start,
                                    level: new_level,
                                },
                            )?;
                        }
                        ancestor
                    }
                };

                let (name, name_len) = read_name(buf, pos + 1)?;
                pos += 1 + name_len;

                log::trace!(
                    "node {:?} at level {} below {:?} at offset {}",
                    name,
                    new_level,
                    parent,
                    record_start
                );
                current = self.add_node(parent, name, new_level)?;
                level = new_level;
            }
        }

        Ok(())
    }

    fn add_node(
        &mut self,
        parent: NodeId,
        name: &'buf str,
        level: u8,
    ) -> Result<NodeId, DecodeError> {
        self.nodes
            .try_reserve(1)
            .map_err(|_| DecodeError::AllocationFailure)?;
        let children = self
            .child_links
            .new_head()
            .map_err(|_| DecodeError::AllocationFailure)?;
        let props = self
            .prop_links
            .new_head()
            .map_err(|_| DecodeError::AllocationFailure)?;

        let id = NodeId(self.nodes.len());
        let entry = self
            .child_links
            .new_entry(id)
            .map_err(|_| DecodeError::AllocationFailure)?;
        self.nodes.push(NodeRecord {
            name,
            parent: Some(parent),
            level,
            children,
            props,
        });
        self.child_links
            .push_back(self.nodes[parent.0].children, entry);

        self.consumed += mem::size_of::<NodeRecord<'buf>>();
        Ok(id)
    }

    fn add_prop(&mut self, node: NodeId, prop: Property<'buf>) -> Result<PropId, DecodeError> {
        self.props
            .try_reserve(1)
            .map_err(|_| DecodeError::AllocationFailure)?;

        let id = PropId(self.props.len());
        let entry = self
            .prop_links
            .new_entry(id)
            .map_err(|_| DecodeError::AllocationFailure)?;
        self.props.push(prop);
        self.prop_links.push_back(self.nodes[node.0].props, entry);

        self.consumed += mem::size_of::<Property<'buf>>();
        Ok(id)
    }

    /// The root node `/`
    pub fn root(&self) -> Node<'_, 'buf> {
        Node::new(self, NodeId::ROOT)
    }

    /// Get a handle to the node with the given id if this tree contains it
    pub fn node(&self, id: NodeId) -> Option<Node<'_, 'buf>> {
        (id.0 < self.nodes.len()).then(|| Node::new(self, id))
    }

    /// The opaque 24-bit version stored in the blob header (`0` if nothing was decoded)
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The exact buffer that holds this tree's data
    pub fn buf(&self) -> &'buf [u8] {
        self.buf
    }

    /// How many bytes of node and property records were allocated while decoding
    pub fn consumed_bytes(&self) -> usize {
        self.consumed
    }

    /// Number of nodes in the tree, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn prop_count(&self) -> usize {
        self.props.len()
    }

    pub(crate) fn record(&self, id: NodeId) -> &NodeRecord<'buf> {
        &self.nodes[id.0]
    }

    pub(crate) fn property(&self, id: PropId) -> &Property<'buf> {
        &self.props[id.0]
    }

    pub(crate) fn child_links(&self) -> &LinkedSlab<NodeId> {
        &self.child_links
    }

    pub(crate) fn prop_links(&self) -> &LinkedSlab<PropId> {
        &self.prop_links
    }
}

impl<'buf> Default for Tree<'buf> {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the null-terminated name starting at `offset` and return it together with its size including the terminator
fn read_name(buf: &[u8], offset: usize) -> Result<(&str, usize), DecodeError> {
    let name = buf
        .get(offset..)
        .and_then(|rest| CStr::from_bytes_until_nul(rest).ok())
        .ok_or(DecodeError::UnterminatedName { offset })?;
    let name_str = name
        .to_str()
        .map_err(|_| DecodeError::InvalidName { offset })?;
    Ok((name_str, name.to_bytes_with_nul().len()))
}
