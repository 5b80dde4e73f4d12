//! Protobuf value readers and writers.
//!
//! [`ValueReaderSlice`] decodes from a borrowed byte slice, [`ValueWriterBlob`] encodes into a [`crate::Blob`].
//! Both use little-endian byte order for fixed-width floats, as required by the protobuf wire format.

mod value_reader_slice;
mod value_writer_blob;

pub use value_reader_slice::*;
pub use value_writer_blob::*;
