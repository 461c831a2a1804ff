//! Typed access to property values

use crate::blob::value::fold_le;
use crate::blob::{Node, PropType, PropValue, Property, Tree};
use thiserror_no_std::Error;

/// The error returned when a property cannot be read in the requested way
#[derive(Debug, Error, Eq, PartialEq, Copy, Clone)]
pub enum AccessError {
    /// There is no node or property with the requested name or path
    #[error("No node or property exists under the requested name or path")]
    NotFound,
    /// The property exists but is not encoded in the requested shape
    #[error("Expected {expected} but the property value has tag {tag}")]
    TypeMismatch { expected: &'static str, tag: u8 },
    /// An array cell beyond the end of the array was requested
    #[error("Cell {index} was requested from an array of {count} cells")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Unsigned integer types that can be read from little-endian property bytes of exactly their own width
trait LeUint: Sized {
    const WIDTH: usize;
    const INT_EXPECTED: &'static str;
    const CELL_EXPECTED: &'static str;

    fn from_u64(value: u64) -> Self;
}

impl LeUint for u8 {
    const WIDTH: usize = 1;
    const INT_EXPECTED: &'static str = "a 1 byte integer";
    const CELL_EXPECTED: &'static str = "an array of 1 byte cells";

    fn from_u64(value: u64) -> Self {
        value as u8
    }
}

impl LeUint for u16 {
    const WIDTH: usize = 2;
    const INT_EXPECTED: &'static str = "a 2 byte integer";
    const CELL_EXPECTED: &'static str = "an array of 2 byte cells";

    fn from_u64(value: u64) -> Self {
        value as u16
    }
}

impl LeUint for u32 {
    const WIDTH: usize = 4;
    const INT_EXPECTED: &'static str = "a 4 byte integer";
    const CELL_EXPECTED: &'static str = "an array of 4 byte cells";

    fn from_u64(value: u64) -> Self {
        value as u32
    }
}

impl LeUint for u64 {
    const WIDTH: usize = 8;
    const INT_EXPECTED: &'static str = "an 8 byte integer";
    const CELL_EXPECTED: &'static str = "an array of 8 byte cells";

    fn from_u64(value: u64) -> Self {
        value
    }
}

impl<'buf> Property<'buf> {
    fn mismatch<T>(&self, expected: &'static str) -> Result<T, AccessError> {
        Err(AccessError::TypeMismatch {
            expected,
            tag: self.tag(),
        })
    }

    /// Interpret the value as a string
    pub fn as_str(&self) -> Result<&'buf str, AccessError> {
        match self.value {
            PropValue::String(str) => Ok(str),
            _ => self.mismatch("a string"),
        }
    }

    fn int_bytes(&self, expected: &'static str) -> Result<&'buf [u8], AccessError> {
        match self.value {
            PropValue::Int(bytes) => Ok(bytes),
            _ => self.mismatch(expected),
        }
    }

    /// Interpret the value as an integer of any width up to 8 bytes
    pub fn as_int(&self) -> Result<u64, AccessError> {
        const EXPECTED: &str = "an integer of at most 8 bytes";
        let bytes = self.int_bytes(EXPECTED)?;
        if bytes.len() > 8 {
            return self.mismatch(EXPECTED);
        }
        Ok(fold_le(bytes))
    }

    fn as_uint<T: LeUint>(&self) -> Result<T, AccessError> {
        let bytes = self.int_bytes(T::INT_EXPECTED)?;
        if bytes.len() != T::WIDTH {
            return self.mismatch(T::INT_EXPECTED);
        }
        Ok(T::from_u64(fold_le(bytes)))
    }

    pub fn as_u8(&self) -> Result<u8, AccessError> {
        self.as_uint()
    }

    pub fn as_u16(&self) -> Result<u16, AccessError> {
        self.as_uint()
    }

    pub fn as_u32(&self) -> Result<u32, AccessError> {
        self.as_uint()
    }

    pub fn as_u64(&self) -> Result<u64, AccessError> {
        self.as_uint()
    }

    /// Get the raw bytes of array cell `index` after checking that the cells are `width` bytes wide
    fn cell_bytes(
        &self,
        index: usize,
        expected: &'static str,
        width_ok: impl FnOnce(usize) -> bool,
    ) -> Result<&'buf [u8], AccessError> {
        let PropValue::Array {
            cell_width,
            count,
            cells,
        } = self.value
        else {
            return self.mismatch(expected);
        };
        let width = cell_width as usize;
        if !width_ok(width) {
            return self.mismatch(expected);
        }
        if index >= count as usize {
            return Err(AccessError::IndexOutOfRange {
                index,
                count: count as usize,
            });
        }
        Ok(&cells[index * width..(index + 1) * width])
    }

    /// Read cell `index` of an array whose cells are at most 8 bytes wide
    pub fn cell(&self, index: usize) -> Result<u64, AccessError> {
        let bytes = self.cell_bytes(index, "an array of cells with at most 8 bytes", |width| {
            width <= 8
        })?;
        Ok(fold_le(bytes))
    }

    fn typed_cell<T: LeUint>(&self, index: usize) -> Result<T, AccessError> {
        let bytes = self.cell_bytes(index, T::CELL_EXPECTED, |width| width == T::WIDTH)?;
        Ok(T::from_u64(fold_le(bytes)))
    }

    pub fn cell_u8(&self, index: usize) -> Result<u8, AccessError> {
        self.typed_cell(index)
    }

    pub fn cell_u16(&self, index: usize) -> Result<u16, AccessError> {
        self.typed_cell(index)
    }

    pub fn cell_u32(&self, index: usize) -> Result<u32, AccessError> {
        self.typed_cell(index)
    }

    pub fn cell_u64(&self, index: usize) -> Result<u64, AccessError> {
        self.typed_cell(index)
    }

    /// Read an integer that is either stored on its own (then only index `0` is valid) or as cell `index` of an
    /// array
    pub fn int_or_cell(&self, index: usize) -> Result<u64, AccessError> {
        match self.value {
            PropValue::Int(_) if index == 0 => self.as_int(),
            PropValue::Int(_) => Err(AccessError::IndexOutOfRange { index, count: 1 }),
            PropValue::Array { .. } => self.cell(index),
            PropValue::String(_) => self.mismatch("an integer or an array"),
        }
    }

    /// How many integers the value holds: `1` for a plain integer and the cell count for an array
    pub fn int_size(&self) -> Result<usize, AccessError> {
        match self.value {
            PropValue::Int(_) => Ok(1),
            PropValue::Array { count, .. } => Ok(count as usize),
            PropValue::String(_) => self.mismatch("an integer or an array"),
        }
    }
}

impl<'buf> TryFrom<&Property<'buf>> for &'buf str {
    type Error = AccessError;

    fn try_from(value: &Property<'buf>) -> Result<Self, Self::Error> {
        value.as_str()
    }
}

impl<'buf> TryFrom<&Property<'buf>> for u8 {
    type Error = AccessError;

    fn try_from(value: &Property<'buf>) -> Result<Self, Self::Error> {
        value.as_u8()
    }
}

impl<'buf> TryFrom<&Property<'buf>> for u16 {
    type Error = AccessError;

    fn try_from(value: &Property<'buf>) -> Result<Self, Self::Error> {
        value.as_u16()
    }
}

impl<'buf> TryFrom<&Property<'buf>> for u32 {
    type Error = AccessError;

    fn try_from(value: &Property<'buf>) -> Result<Self, Self::Error> {
        value.as_u32()
    }
}

impl<'buf> TryFrom<&Property<'buf>> for u64 {
    type Error = AccessError;

    fn try_from(value: &Property<'buf>) -> Result<Self, Self::Error> {
        value.as_u64()
    }
}

impl<'tree, 'buf> Node<'tree, 'buf> {
    pub fn read_string(&self, name: &str) -> Result<&'buf str, AccessError> {
        self.prop(name)?.as_str()
    }

    pub fn read_int(&self, name: &str) -> Result<u64, AccessError> {
        self.prop(name)?.as_int()
    }

    pub fn read_u8(&self, name: &str) -> Result<u8, AccessError> {
        self.prop(name)?.as_u8()
    }

    pub fn read_u16(&self, name: &str) -> Result<u16, AccessError> {
        self.prop(name)?.as_u16()
    }

    pub fn read_u32(&self, name: &str) -> Result<u32, AccessError> {
        self.prop(name)?.as_u32()
    }

    pub fn read_u64(&self, name: &str) -> Result<u64, AccessError> {
        self.prop(name)?.as_u64()
    }

    pub fn read_array(&self, name: &str, index: usize) -> Result<u64, AccessError> {
        self.prop(name)?.cell(index)
    }

    pub fn read_array_u8(&self, name: &str, index: usize) -> Result<u8, AccessError> {
        self.prop(name)?.cell_u8(index)
    }

    pub fn read_array_u16(&self, name: &str, index: usize) -> Result<u16, AccessError> {
        self.prop(name)?.cell_u16(index)
    }

    pub fn read_array_u32(&self, name: &str, index: usize) -> Result<u32, AccessError> {
        self.prop(name)?.cell_u32(index)
    }

    pub fn read_array_u64(&self, name: &str, index: usize) -> Result<u64, AccessError> {
        self.prop(name)?.cell_u64(index)
    }

    /// See [`Property::int_or_cell`]
    pub fn read_int_index(&self, name: &str, index: usize) -> Result<u64, AccessError> {
        self.prop(name)?.int_or_cell(index)
    }

    /// See [`Property::int_size`]
    pub fn get_prop_int_size(&self, name: &str) -> Result<usize, AccessError> {
        self.prop(name)?.int_size()
    }

    pub fn get_prop_type(&self, name: &str) -> Result<PropType, AccessError> {
        Ok(self.prop(name)?.prop_type())
    }
}

/// Readers that first resolve `node_path` (see [`Tree::find_node_by_path`]) and then read property `name` from the
/// resulting node
impl<'buf> Tree<'buf> {
    pub fn read_string_by_path(&self, node_path: &str, name: &str) -> Result<&'buf str, AccessError> {
        self.find_node_by_path(node_path)?.read_string(name)
    }

    pub fn read_int_by_path(&self, node_path: &str, name: &str) -> Result<u64, AccessError> {
        self.find_node_by_path(node_path)?.read_int(name)
    }

    pub fn read_u8_by_path(&self, node_path: &str, name: &str) -> Result<u8, AccessError> {
        self.find_node_by_path(node_path)?.read_u8(name)
    }

    pub fn read_u16_by_path(&self, node_path: &str, name: &str) -> Result<u16, AccessError> {
        self.find_node_by_path(node_path)?.read_u16(name)
    }

    pub fn read_u32_by_path(&self, node_path: &str, name: &str) -> Result<u32, AccessError> {
        self.find_node_by_path(node_path)?.read_u32(name)
    }

    pub fn read_u64_by_path(&self, node_path: &str, name: &str) -> Result<u64, AccessError> {
        self.find_node_by_path(node_path)?.read_u64(name)
    }

    pub fn read_array_by_path(
        &self,
        node_path: &str,
        name: &str,
        index: usize,
    ) -> Result<u64, AccessError> {
        self.find_node_by_path(node_path)?.read_array(name, index)
    }

    pub fn read_array_u8_by_path(
        &self,
        node_path: &str,
        name: &str,
        index: usize,
    ) -> Result<u8, AccessError> {
        self.find_node_by_path(node_path)?.read_array_u8(name, index)
    }

    pub fn read_array_u16_by_path(
        &self,
        node_path: &str,
        name: &str,
        index: usize,
    ) -> Result<u16, AccessError> {
        self.find_node_by_path(node_path)?.read_array_u16(name, index)
    }

    pub fn read_array_u32_by_path(
        &self,
        node_path: &str,
        name: &str,
        index: usize,
    ) -> Result<u32, AccessError> {
        self.find_node_by_path(node_path)?.read_array_u32(name, index)
    }

    pub fn read_array_u64_by_path(
        &self,
        node_path: &str,
        name: &str,
        index: usize,
    ) -> Result<u64, AccessError> {
        self.find_node_by_path(node_path)?.read_array_u64(name, index)
    }

    pub fn read_int_index_by_path(
        &self,
        node_path: &str,
        name: &str,
        index: usize,
    ) -> Result<u64, AccessError> {
        self.find_node_by_path(node_path)?.read_int_index(name, index)
    }

    pub fn get_prop_int_size_by_path(
        &self,
        node_path: &str,
        name: &str,
    ) -> Result<usize, AccessError> {
        self.find_node_by_path(node_path)?.get_prop_int_size(name)
    }

    pub fn get_prop_type_by_path(&self, node_path: &str, name: &str) -> Result<PropType, AccessError> {
        self.find_node_by_path(node_path)?.get_prop_type(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::blob::test_util::sample;

    #[test]
    fn read_string() {
        let buf = sample();
        let tree = Tree::load(&buf).unwrap();
        let node1 = tree.find_node_by_path("/node1").unwrap();

        assert_eq!(node1.read_string("string"), Ok("test_string"));
        assert_eq!(tree.read_string_by_path("/node1", "string"), Ok("test_string"));
        assert_eq!(
            tree.read_string_by_path("/node1/subnode1", "string"),
            Ok("sub")
        );
        assert_eq!(
            node1.read_string("int"),
            Err(AccessError::TypeMismatch {
                expected: "a string",
                tag: 1
            })
        );
        assert_eq!(node1.read_string("missing"), Err(AccessError::NotFound));
        assert_eq!(
            tree.read_string_by_path("/missing", "string"),
            Err(AccessError::NotFound)
        );
    }

    #[test]
    fn read_int() {
        let buf = sample();
        let tree = Tree::load(&buf).unwrap();
        let node1 = tree.find_node_by_path("/node1").unwrap();

        assert_eq!(node1.read_int("int"), Ok(95));
        assert_eq!(tree.read_int_by_path("/node1", "int"), Ok(95));
        assert_eq!(
            tree.read_int_by_path("/node1/subnode1", "u64"),
            Ok(0x0102030405060708)
        );
        assert!(matches!(
            node1.read_int("array"),
            Err(AccessError::TypeMismatch { tag: 36, .. })
        ));
        assert!(matches!(
            tree.read_int_by_path("/node2/leaf", "wide"),
            Err(AccessError::TypeMismatch { tag: 16, .. })
        ));
    }

    #[test]
    fn read_fixed_width_ints() {
        let buf = sample();
        let tree = Tree::load(&buf).unwrap();
        let sub = tree.find_node_by_path("/node1/subnode1").unwrap();

        assert_eq!(tree.read_u8_by_path("/node1", "int"), Ok(95));
        assert_eq!(sub.read_u16("u16"), Ok(0x1234));
        assert_eq!(sub.read_u32("u32"), Ok(0xdeadbeef));
        assert_eq!(sub.read_u64("u64"), Ok(0x0102030405060708));
        assert_eq!(tree.read_u16_by_path("/node1/subnode1", "u16"), Ok(0x1234));
        assert_eq!(
            tree.read_u32_by_path("/node1/subnode1", "u32"),
            Ok(0xdeadbeef)
        );
        assert_eq!(
            tree.read_u64_by_path("/node1/subnode1", "u64"),
            Ok(0x0102030405060708)
        );
    }

    #[test]
    fn read_fixed_width_ints_rejects_other_widths() {
        let buf = sample();
        let tree = Tree::load(&buf).unwrap();
        let sub = tree.find_node_by_path("/node1/subnode1").unwrap();

        assert_eq!(
            sub.read_u32("u16"),
            Err(AccessError::TypeMismatch {
                expected: "a 4 byte integer",
                tag: 2
            })
        );
        assert!(sub.read_u8("u16").is_err());
        assert!(sub.read_u64("u32").is_err());
        assert!(sub.read_u16("string").is_err());
    }

    #[test]
    fn scalar_widths_read_back_exactly() {
        use crate::blob::test_util::BlobBuilder;

        let mut u8_value = [1u8; 2];
        u8_value[1] = 0xfe;
        let mut u16_value = [2u8; 3];
        u16_value[1..].copy_from_slice(&0xfedcu16.to_le_bytes());
        let mut u32_value = [4u8; 5];
        u32_value[1..].copy_from_slice(&0xfedcba98u32.to_le_bytes());
        let mut u64_value = [8u8; 9];
        u64_value[1..].copy_from_slice(&u64::MAX.to_le_bytes());

        let buf = BlobBuilder::new(0)
            .node(1, "n")
            .prop("a", &u8_value)
            .prop("b", &u16_value)
            .prop("c", &u32_value)
            .prop("d", &u64_value)
            .build();
        let tree = Tree::load(&buf).unwrap();
        let n = tree.find_node_by_path("/n").unwrap();

        assert_eq!(n.read_u8("a"), Ok(0xfe));
        assert_eq!(n.read_u16("b"), Ok(0xfedc));
        assert_eq!(n.read_u32("c"), Ok(0xfedcba98));
        assert_eq!(n.read_u64("d"), Ok(u64::MAX));
        assert_eq!(n.read_int("c"), Ok(0xfedcba98));
    }

    #[test]
    fn try_from_property() {
        let buf = sample();
        let tree = Tree::load(&buf).unwrap();
        let sub = tree.find_node_by_path("/node1/subnode1").unwrap();

        let value: u16 = sub.prop("u16").unwrap().try_into().unwrap();
        assert_eq!(value, 0x1234);
        let value: Result<u32, _> = sub.prop("u16").unwrap().try_into();
        assert!(value.is_err());
        let value: &str = sub.prop("string").unwrap().try_into().unwrap();
        assert_eq!(value, "sub");
        assert_eq!(u64::try_from(sub.prop("u64").unwrap()), Ok(0x0102030405060708));
        assert!(u8::try_from(sub.prop("u64").unwrap()).is_err());
    }

    #[test]
    fn read_array() {
        let buf = sample();
        let tree = Tree::load(&buf).unwrap();
        let node1 = tree.find_node_by_path("/node1").unwrap();

        assert_eq!(node1.read_array("array", 0), Ok(0x1));
        assert_eq!(node1.read_array("array", 1), Ok(0x2));
        assert_eq!(node1.read_array("array", 2), Ok(0x787de));
        assert_eq!(node1.read_array_u32("array", 2), Ok(0x787de));
        assert_eq!(
            node1.read_array("array", 3),
            Err(AccessError::IndexOutOfRange { index: 3, count: 3 })
        );
        assert_eq!(tree.read_array_by_path("/node1", "array", 2), Ok(0x787de));
        assert_eq!(
            tree.read_array_u32_by_path("/node1", "array", 3),
            Err(AccessError::IndexOutOfRange { index: 3, count: 3 })
        );
    }

    #[test]
    fn read_typed_arrays() {
        let buf = sample();
        let tree = Tree::load(&buf).unwrap();

        assert_eq!(tree.read_array_u16_by_path("/node1", "array16", 3), Ok(40));
        assert_eq!(tree.read_array_u8_by_path("/node2/leaf", "bytes", 1), Ok(0xbb));
        assert!(matches!(
            tree.read_array_u64_by_path("/node1", "array", 0),
            Err(AccessError::TypeMismatch { tag: 36, .. })
        ));
        assert!(matches!(
            tree.read_array_u16_by_path("/node1", "int", 0),
            Err(AccessError::TypeMismatch { tag: 1, .. })
        ));
        assert_eq!(
            tree.read_array_u8_by_path("/node2/leaf", "bytes", 2),
            Err(AccessError::IndexOutOfRange { index: 2, count: 2 })
        );
    }

    #[test]
    fn read_int_index() {
        let buf = sample();
        let tree = Tree::load(&buf).unwrap();
        let node1 = tree.find_node_by_path("/node1").unwrap();

        assert_eq!(node1.read_int_index("array", 1), Ok(0x2));
        assert_eq!(node1.read_int_index("int", 0), Ok(95));
        assert_eq!(
            node1.read_int_index("int", 1),
            Err(AccessError::IndexOutOfRange { index: 1, count: 1 })
        );
        assert_eq!(tree.read_int_index_by_path("/node1", "array", 2), Ok(0x787de));
        assert!(node1.read_int_index("string", 0).is_err());
    }

    #[test]
    fn get_prop_int_size() {
        let buf = sample();
        let tree = Tree::load(&buf).unwrap();
        let node1 = tree.find_node_by_path("/node1").unwrap();

        assert_eq!(node1.get_prop_int_size("array16"), Ok(4));
        assert_eq!(node1.get_prop_int_size("int"), Ok(1));
        assert_eq!(tree.get_prop_int_size_by_path("/node1", "array"), Ok(3));
        assert!(node1.get_prop_int_size("string").is_err());
        assert_eq!(
            tree.get_prop_int_size_by_path("/nowhere", "array"),
            Err(AccessError::NotFound)
        );
    }

    #[test]
    fn get_prop_type() {
        let buf = sample();
        let tree = Tree::load(&buf).unwrap();
        let node1 = tree.find_node_by_path("/node1").unwrap();

        assert_eq!(node1.get_prop_type("string"), Ok(PropType::String));
        assert_eq!(node1.get_prop_type("int"), Ok(PropType::Int));
        assert_eq!(node1.get_prop_type("array"), Ok(PropType::Array));
        assert_eq!(
            tree.get_prop_type_by_path("/node1", "string"),
            Ok(PropType::String)
        );
        assert_eq!(tree.get_prop_type_by_path("/node1", "int"), Ok(PropType::Int));
        assert_eq!(
            tree.get_prop_type_by_path("/node1", "array"),
            Ok(PropType::Array)
        );
        assert_eq!(node1.get_prop_type("missing"), Err(AccessError::NotFound));
    }
}
