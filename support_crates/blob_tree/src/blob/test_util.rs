use alloc::vec::Vec;

/// Assembles blobs record by record
pub(crate) struct BlobBuilder(Vec<u8>);

impl BlobBuilder {
    pub(crate) fn new(version: u32) -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(&[0x66, 0x64, 0x74]);
        buf.extend_from_slice(&version.to_le_bytes()[..3]);
        buf.extend_from_slice(&[0x00, b'/', 0x00]);
        Self(buf)
    }

    pub(crate) fn node(mut self, level: u8, name: &str) -> Self {
        self.0.push(level);
        self.0.extend_from_slice(name.as_bytes());
        self.0.push(0);
        self
    }

    pub(crate) fn prop(mut self, name: &str, value: &[u8]) -> Self {
        self.0.push(0xff);
        self.0.extend_from_slice(name.as_bytes());
        self.0.push(0);
        self.0.extend_from_slice(value);
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        self.0
    }
}

/// The tree used by most accessor tests:
///
/// ```text
/// /
/// ├── node1      string = "test_string", int = 95, array = <0x1 0x2 0x787de>, array16 = <…4 cells>
/// │   └── subnode1   string = "sub", u16 = 0x1234, u32 = 0xdeadbeef, u64 = 0x0102030405060708
/// └── node2
///     └── leaf       bytes = <0xaa 0xbb>, wide = 16 byte integer
/// ```
pub(crate) fn sample() -> Vec<u8> {
    let mut array = Vec::from([36u8, 3]);
    for v in [0x1u32, 0x2, 0x787de] {
        array.extend_from_slice(&v.to_le_bytes());
    }
    let mut array16 = Vec::from([34u8, 4]);
    for v in [10u16, 20, 30, 40] {
        array16.extend_from_slice(&v.to_le_bytes());
    }
    let mut u64_value = Vec::from([8u8]);
    u64_value.extend_from_slice(&0x0102030405060708u64.to_le_bytes());
    let mut wide = Vec::from([16u8]);
    wide.extend_from_slice(&[0x11; 16]);

    BlobBuilder::new(0x240101)
        .node(1, "node1")
        .prop("string", b"\0test_string\0")
        .prop("int", &[1, 95])
        .prop("array", &array)
        .prop("array16", &array16)
        .node(2, "subnode1")
        .prop("string", b"\0sub\0")
        .prop("u16", &[2, 0x34, 0x12])
        .prop("u32", &[4, 0xef, 0xbe, 0xad, 0xde])
        .prop("u64", &u64_value)
        .node(1, "node2")
        .node(2, "leaf")
        .prop("bytes", &[33, 2, 0xaa, 0xbb])
        .prop("wide", &wide)
        .build()
}
