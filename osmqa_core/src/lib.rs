//! Byte buffers and protobuf value readers/writers shared by the OSM QA tiles crates.

pub mod io;

pub mod types;

pub use types::*;
