use thiserror_no_std::Error;

/// The magic bytes every blob starts with (`"fdt"` when read as little-endian bytes)
pub const HEADER_MAGIC: u32 = 0x746466;

/// Offset at which the node and property record stream starts
pub const STREAM_OFFSET: usize = 9;

/// The implicit root node record which must follow the magic and version fields
const ROOT_RECORD: [u8; 3] = [0x00, b'/', 0x00];

/// Errors that can occur when reading the blob header
#[derive(Debug, Error, Eq, PartialEq)]
pub enum HeaderReadError {
    /// The provided buffer did not contain enough bytes to read a header from it
    #[error("The provided buffer did not contain enough bytes to read a header from it")]
    BufferTooSmall,
    /// The provided buffer did not contain the required magic bytes at the start
    #[error("The provided buffer started with magic {0:#08x} instead of 0x746466")]
    InvalidMagic(u32),
    /// The magic and version were not followed by the root node record `00 '/' 00`
    #[error("The header is not followed by a valid root node record")]
    InvalidRootRecord,
}

/// The header present at the start of every blob.
///
/// Both fields are 24-bit integers stored in little-endian format.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct BlobHeader {
    /// This field shall contain the value [`HEADER_MAGIC`].
    pub magic: u32,
    /// An opaque version number of the blob.
    /// By convention it encodes the date the blob was produced as `0xYYMMDD`.
    pub version: u32,
}

impl BlobHeader {
    /// Try to read a header from a provided buffer.
    ///
    /// This also validates the root node record so that a successful read guarantees that the record stream can
    /// be decoded starting at [`STREAM_OFFSET`].
    pub fn read_from_buffer(buf: &[u8]) -> Result<Self, HeaderReadError> {
        fn read_u24(buf: &[u8]) -> Result<(u32, &[u8]), HeaderReadError> {
            if buf.len() < 3 {
                return Err(HeaderReadError::BufferTooSmall);
            }

            let (head, tail) = buf.split_at(3);
            let value = u32::from_le_bytes([head[0], head[1], head[2], 0]);
            Ok((value, tail))
        }

        if buf.len() < STREAM_OFFSET {
            return Err(HeaderReadError::BufferTooSmall);
        }

        let (magic, buf) = read_u24(buf)?;
        if magic != HEADER_MAGIC {
            return Err(HeaderReadError::InvalidMagic(magic));
        }
        let (version, buf) = read_u24(buf)?;
        if buf[..ROOT_RECORD.len()] != ROOT_RECORD {
            return Err(HeaderReadError::InvalidRootRecord);
        }

        Ok(Self { magic, version })
    }
}
