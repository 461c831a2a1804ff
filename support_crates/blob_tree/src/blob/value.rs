//! Encoding of property values
//!
//! Every property value starts with a tag byte that selects how the remaining bytes are interpreted:
//!
//! | tag      | encoding             | payload                                                          |
//! |----------|----------------------|------------------------------------------------------------------|
//! | `0`      | string               | null-terminated UTF-8 text                                       |
//! | `1..=31` | fixed-width integer  | `tag` bytes, little-endian                                       |
//! | `32`     | *reserved*           | rejected                                                         |
//! | `33..`   | homogeneous array    | one count byte `n`, then `n` little-endian cells of `tag - 32` bytes |

use core::ffi::CStr;
use core::fmt;
use thiserror_no_std::Error;

const TAG_STRING: u8 = 0;
const TAG_ARRAY_BASE: u8 = 32;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ValueError {
    #[error("The value needs {needed} bytes but only {available} are available")]
    Truncated { needed: usize, available: usize },
    #[error("The string value is not null-terminated")]
    Unterminated,
    #[error("The string value is not valid UTF-8")]
    InvalidUtf8,
    #[error("The tag byte 32 is reserved and does not select any value encoding")]
    ReservedTag,
}

/// The general shape of a property value as selected by its tag byte
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum PropType {
    String,
    Int,
    Array,
}

impl PropType {
    /// Classify a tag byte, returning `None` for the reserved tag
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            TAG_STRING => Some(PropType::String),
            1..=31 => Some(PropType::Int),
            TAG_ARRAY_BASE => None,
            _ => Some(PropType::Array),
        }
    }
}

/// A decoded property value that still borrows its payload from the underlying buffer
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum PropValue<'buf> {
    /// Text without its null terminator
    String(&'buf str),
    /// The raw little-endian bytes of an integer that is between 1 and 31 bytes wide
    Int(&'buf [u8]),
    /// `count` little-endian cells of `cell_width` bytes each, stored back to back in `cells`
    Array {
        cell_width: u8,
        count: u8,
        cells: &'buf [u8],
    },
}

fn take(buf: &[u8], start: usize, len: usize) -> Result<&[u8], ValueError> {
    buf.get(start..start + len).ok_or(ValueError::Truncated {
        needed: start + len,
        available: buf.len(),
    })
}

impl<'buf> PropValue<'buf> {
    /// Parse a tagged value from the start of `buf` and return it together with the number of bytes it occupies
    /// (including the tag byte).
    ///
    /// The buffer may be larger than the value.
    pub fn parse(buf: &'buf [u8]) -> Result<(usize, Self), ValueError> {
        let tag = *buf.first().ok_or(ValueError::Truncated {
            needed: 1,
            available: 0,
        })?;

        match tag {
            TAG_STRING => {
                let cstr =
                    CStr::from_bytes_until_nul(&buf[1..]).map_err(|_| ValueError::Unterminated)?;
                let str = cstr.to_str().map_err(|_| ValueError::InvalidUtf8)?;
                Ok((1 + cstr.to_bytes_with_nul().len(), PropValue::String(str)))
            }
            TAG_ARRAY_BASE => Err(ValueError::ReservedTag),
            1..=31 => {
                let bytes = take(buf, 1, tag as usize)?;
                Ok((1 + bytes.len(), PropValue::Int(bytes)))
            }
            _ => {
                let cell_width = tag - TAG_ARRAY_BASE;
                let count = take(buf, 1, 1)?[0];
                let cells = take(buf, 2, cell_width as usize * count as usize)?;
                Ok((
                    2 + cells.len(),
                    PropValue::Array {
                        cell_width,
                        count,
                        cells,
                    },
                ))
            }
        }
    }

    pub fn prop_type(&self) -> PropType {
        match self {
            PropValue::String(_) => PropType::String,
            PropValue::Int(_) => PropType::Int,
            PropValue::Array { .. } => PropType::Array,
        }
    }

    /// The tag byte this value was encoded with
    pub fn tag(&self) -> u8 {
        match self {
            PropValue::String(_) => TAG_STRING,
            PropValue::Int(bytes) => bytes.len() as u8,
            PropValue::Array { cell_width, .. } => TAG_ARRAY_BASE + cell_width,
        }
    }

    /// Iterate over the raw bytes of each array cell.
    ///
    /// Strings and integers yield nothing.
    pub fn cells(&self) -> impl Iterator<Item = &'buf [u8]> {
        let (cells, width): (&'buf [u8], usize) = match *self {
            PropValue::Array {
                cell_width, cells, ..
            } => (cells, cell_width as usize),
            _ => (&[], 1),
        };
        cells.chunks_exact(width)
    }
}

/// Interpret up to 8 bytes as a little-endian unsigned integer
pub(crate) fn fold_le(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() <= 8);
    bytes
        .iter()
        .rev()
        .fold(0, |acc, &byte| (acc << 8) | byte as u64)
}

/// Write little-endian bytes as one hex number, falling back to a digit string for very wide integers
fn write_le_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    if bytes.len() <= 8 {
        return write!(f, "{:#x}", fold_le(bytes));
    }
    f.write_str("0x")?;
    for byte in bytes.iter().rev() {
        write!(f, "{:02x}", byte)?;
    }
    Ok(())
}

impl<'buf> fmt::Display for PropValue<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::String(str) => f.write_str(str),
            PropValue::Int(bytes) => write_le_hex(f, bytes),
            PropValue::Array { .. } => {
                for (i, cell) in self.cells().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write_le_hex(f, cell)?;
                }
                Ok(())
            }
        }
    }
}
