//! Library for decoding compact configuration tree blobs into a tree of named nodes with typed properties.
//!
//! The blob layout is a small, bespoke relative of the flattened device tree format and is described in [`blob`].
#![no_std]

extern crate alloc;

pub mod blob;
