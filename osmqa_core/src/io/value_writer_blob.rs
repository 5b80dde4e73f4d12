//! This module provides the `ValueWriterBlob` struct for writing protobuf values into an in-memory [`Blob`].
//!
//! # Examples
//!
//! ```rust
//! use osmqa_core::io::ValueWriterBlob;
//!
//! let mut writer = ValueWriterBlob::new();
//! writer.write_varint(1025);
//! assert_eq!(writer.into_blob().into_vec(), vec![0b10000001, 0b00001000]);
//! ```

use crate::Blob;
use byteorder::{ByteOrder, LE};

/// Appends varints, zigzag integers, little-endian floats and length-delimited protobuf fields.
///
/// Writing into memory cannot fail, so none of the methods return a `Result`.
#[derive(Default)]
pub struct ValueWriterBlob {
	buffer: Vec<u8>,
}

impl ValueWriterBlob {
	#[must_use]
	pub fn new() -> ValueWriterBlob {
		ValueWriterBlob { buffer: Vec::new() }
	}

	#[must_use]
	pub fn len(&self) -> u64 {
		self.buffer.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.buffer.is_empty()
	}

	#[must_use]
	pub fn into_blob(self) -> Blob {
		Blob::from(self.buffer)
	}

	pub fn write_u8(&mut self, value: u8) {
		self.buffer.push(value);
	}

	pub fn write_varint(&mut self, mut value: u64) {
		while value >= 0x80 {
			self.buffer.push(((value & 0x7F) as u8) | 0x80);
			value >>= 7;
		}
		self.buffer.push(value as u8);
	}

	/// Writes a zigzag-encoded signed integer.
	pub fn write_svarint(&mut self, value: i64) {
		self.write_varint(((value << 1) ^ (value >> 63)) as u64);
	}

	pub fn write_f32(&mut self, value: f32) {
		let mut bytes = [0u8; 4];
		LE::write_f32(&mut bytes, value);
		self.buffer.extend_from_slice(&bytes);
	}

	pub fn write_f64(&mut self, value: f64) {
		let mut bytes = [0u8; 8];
		LE::write_f64(&mut bytes, value);
		self.buffer.extend_from_slice(&bytes);
	}

	pub fn write_slice(&mut self, buf: &[u8]) {
		self.buffer.extend_from_slice(buf);
	}

	pub fn write_pbf_key(&mut self, field_number: u32, wire_type: u8) {
		self.write_varint((u64::from(field_number) << 3) | u64::from(wire_type));
	}

	/// Writes a packed repeated `uint32` field body (length prefix included).
	pub fn write_pbf_packed_uint32(&mut self, data: &[u32]) {
		let mut writer = ValueWriterBlob::new();
		for &value in data {
			writer.write_varint(u64::from(value));
		}
		self.write_pbf_blob(&writer.into_blob());
	}

	pub fn write_pbf_blob(&mut self, blob: &Blob) {
		self.write_varint(blob.len());
		self.write_slice(blob.as_slice());
	}

	pub fn write_pbf_string(&mut self, text: &str) {
		self.write_varint(text.len() as u64);
		self.write_slice(text.as_bytes());
	}
}
