//! This module provides the `ValueReaderSlice` struct for reading protobuf values from a byte slice.
//!
//! # Examples
//!
//! ```rust
//! use osmqa_core::io::ValueReaderSlice;
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut reader = ValueReaderSlice::new(&[0x1a, 0x02, 0xac, 0x02]);
//!     assert_eq!(reader.read_pbf_key()?, (3, 2));
//!     let mut sub = reader.get_pbf_sub_reader()?;
//!     assert_eq!(sub.read_varint()?, 300);
//!     assert!(!reader.has_remaining());
//!     Ok(())
//! }
//! ```

use crate::Blob;
use anyhow::{Context, Result, bail, ensure};
use byteorder::{ByteOrder, LE};

/// Reads varints, zigzag integers, little-endian floats and length-delimited protobuf fields.
///
/// Sub-readers borrow the same underlying slice, so nested messages are read without copying.
pub struct ValueReaderSlice<'a> {
	data: &'a [u8],
	position: usize,
}

impl<'a> ValueReaderSlice<'a> {
	#[must_use]
	pub fn new(data: &'a [u8]) -> ValueReaderSlice<'a> {
		ValueReaderSlice { data, position: 0 }
	}

	#[must_use]
	pub fn len(&self) -> u64 {
		self.data.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	#[must_use]
	pub fn position(&self) -> u64 {
		self.position as u64
	}

	#[must_use]
	pub fn remaining(&self) -> u64 {
		(self.data.len() - self.position) as u64
	}

	#[must_use]
	pub fn has_remaining(&self) -> bool {
		self.position < self.data.len()
	}

	fn take(&mut self, length: u64) -> Result<&'a [u8]> {
		let data = self.data;
		let start = self.position;
		let end = usize::try_from(length)
			.ok()
			.and_then(|length| start.checked_add(length))
			.filter(|end| *end <= data.len());
		let Some(end) = end else {
			bail!(
				"Read of {length} bytes at position {start} exceeds data length {}",
				data.len()
			);
		};
		self.position = end;
		Ok(&data[start..end])
	}

	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.take(1)?[0])
	}

	/// Reads a variable-length unsigned integer.
	///
	/// Fails on truncated input or when the varint is longer than 10 bytes.
	pub fn read_varint(&mut self) -> Result<u64> {
		let mut value = 0;
		let mut shift = 0;
		loop {
			let byte = self.read_u8().context("Unexpected end of data in varint")?;
			value |= (u64::from(byte) & 0x7F) << shift;
			if byte & 0x80 == 0 {
				break;
			}
			shift += 7;
			if shift >= 70 {
				bail!("Varint too long");
			}
		}
		Ok(value)
	}

	/// Reads a zigzag-encoded signed integer.
	pub fn read_svarint(&mut self) -> Result<i64> {
		let value = self.read_varint()?;
		Ok(((value >> 1) as i64) ^ -((value & 1) as i64))
	}

	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(LE::read_f32(self.take(4)?))
	}

	pub fn read_f64(&mut self) -> Result<f64> {
		Ok(LE::read_f64(self.take(8)?))
	}

	pub fn read_blob(&mut self, length: u64) -> Result<Blob> {
		Ok(Blob::from(self.take(length)?))
	}

	pub fn read_string(&mut self, length: u64) -> Result<String> {
		let bytes = self.take(length)?;
		String::from_utf8(bytes.to_vec()).context("String is not valid UTF-8")
	}

	/// Reads a protobuf key and splits it into `(field_number, wire_type)`.
	pub fn read_pbf_key(&mut self) -> Result<(u32, u8)> {
		let value = self.read_varint().context("Failed to read varint for PBF key")?;
		let field = u32::try_from(value >> 3).context("PBF field number out of range")?;
		Ok((field, (value & 0x07) as u8))
	}

	/// Returns a reader over the next `length` bytes and advances past them.
	pub fn get_sub_reader(&mut self, length: u64) -> Result<ValueReaderSlice<'a>> {
		let data = self
			.take(length)
			.context("Requested sub-reader length exceeds remaining data")?;
		Ok(ValueReaderSlice::new(data))
	}

	/// Returns a reader over a length-delimited embedded message.
	pub fn get_pbf_sub_reader(&mut self) -> Result<ValueReaderSlice<'a>> {
		let length = self
			.read_varint()
			.context("Failed to read varint for sub-reader length")?;
		self.get_sub_reader(length)
	}

	pub fn read_pbf_packed_uint32(&mut self) -> Result<Vec<u32>> {
		let mut reader = self
			.get_pbf_sub_reader()
			.context("Failed to get PBF sub-reader for packed uint32")?;
		let mut values = Vec::new();
		while reader.has_remaining() {
			let value = reader
				.read_varint()
				.context("Failed to read varint for packed uint32")?;
			ensure!(value <= u64::from(u32::MAX), "Packed uint32 value {value} out of range");
			values.push(value as u32);
		}
		Ok(values)
	}

	pub fn read_pbf_string(&mut self) -> Result<String> {
		let length = self.read_varint().context("Failed to read varint for string length")?;
		self.read_string(length).context("Failed to read PBF string")
	}

	pub fn read_pbf_blob(&mut self) -> Result<Blob> {
		let length = self.read_varint().context("Failed to read varint for blob length")?;
		self.read_blob(length).context("Failed to read PBF blob")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(&[0x00], 0)]
	#[case(&[0x01], 1)]
	#[case(&[0xac, 0x02], 300)]
	#[case(&[0xff, 0xff, 0xff, 0xff, 0x0f], 0xffff_ffff)]
	fn varint(#[case] data: &[u8], #[case] expected: u64) -> Result<()> {
		let mut reader = ValueReaderSlice::new(data);
		assert_eq!(reader.read_varint()?, expected);
		assert!(!reader.has_remaining());
		Ok(())
	}

	#[rstest]
	#[case(&[0x00], 0)]
	#[case(&[0x01], -1)]
	#[case(&[0x02], 1)]
	#[case(&[0x03], -2)]
	#[case(&[0x20], 16)]
	fn svarint(#[case] data: &[u8], #[case] expected: i64) -> Result<()> {
		assert_eq!(ValueReaderSlice::new(data).read_svarint()?, expected);
		Ok(())
	}

	#[test]
	fn varint_too_long() {
		let data = [0xff; 11];
		let err = ValueReaderSlice::new(&data).read_varint().unwrap_err();
		assert_eq!(err.to_string(), "Varint too long");
	}

	#[test]
	fn truncated_varint() {
		assert!(ValueReaderSlice::new(&[0x80]).read_varint().is_err());
	}

	#[test]
	fn floats() -> Result<()> {
		let mut data = vec![];
		data.extend_from_slice(&1.5f32.to_le_bytes());
		data.extend_from_slice(&(-2.25f64).to_le_bytes());
		let mut reader = ValueReaderSlice::new(&data);
		assert_eq!(reader.read_f32()?, 1.5);
		assert_eq!(reader.read_f64()?, -2.25);
		Ok(())
	}

	#[test]
	fn pbf_fields() -> Result<()> {
		let data = [
			0x0a, 0x03, b'o', b's', b'm', // field 1: string "osm"
			0x12, 0x03, 0x01, 0x02, 0x03, // field 2: packed [1, 2, 3]
		];
		let mut reader = ValueReaderSlice::new(&data);
		assert_eq!(reader.read_pbf_key()?, (1, 2));
		assert_eq!(reader.read_pbf_string()?, "osm");
		assert_eq!(reader.read_pbf_key()?, (2, 2));
		assert_eq!(reader.read_pbf_packed_uint32()?, vec![1, 2, 3]);
		assert_eq!(reader.position(), 10);
		assert_eq!(reader.remaining(), 0);
		Ok(())
	}

	#[test]
	fn sub_reader_out_of_bounds() {
		let mut reader = ValueReaderSlice::new(&[0x05, 0x01]);
		assert!(reader.get_pbf_sub_reader().is_err());
	}
}
