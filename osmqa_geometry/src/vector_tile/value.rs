use crate::geo::GeoValue;
use anyhow::{Context, Result, anyhow, bail};
use osmqa_core::{
	Blob,
	io::{ValueReaderSlice, ValueWriterBlob},
};

/// Protobuf encoding of a layer value (the `Value` message of the MVT schema).
pub trait GeoValuePBF: Sized {
	fn read(reader: &mut ValueReaderSlice<'_>) -> Result<Self>;
	fn to_blob(&self) -> Blob;
}

impl GeoValuePBF for GeoValue {
	fn read(reader: &mut ValueReaderSlice<'_>) -> Result<GeoValue> {
		let mut value: Option<GeoValue> = None;

		while reader.has_remaining() {
			value = Some(match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, 2) => GeoValue::String(reader.read_pbf_string().context("Failed to read string value")?),
				(2, 5) => GeoValue::Float(reader.read_f32().context("Failed to read f32 value")?),
				(3, 1) => GeoValue::Double(reader.read_f64().context("Failed to read f64 value")?),
				(4, 0) => GeoValue::Int(reader.read_varint().context("Failed to read int value")? as i64),
				(5, 0) => GeoValue::UInt(reader.read_varint().context("Failed to read uint value")?),
				(6, 0) => GeoValue::Int(reader.read_svarint().context("Failed to read sint value")?),
				(7, 0) => GeoValue::Bool(reader.read_varint().context("Failed to read bool value")? != 0),
				(f, w) => bail!("Unexpected combination of field number ({f}) and wire type ({w})"),
			});
		}

		value.ok_or_else(|| anyhow!("No value found"))
	}

	fn to_blob(&self) -> Blob {
		let mut writer = ValueWriterBlob::new();
		match self {
			GeoValue::String(s) => {
				writer.write_pbf_key(1, 2);
				writer.write_pbf_string(s);
			}
			GeoValue::Float(f) => {
				writer.write_pbf_key(2, 5);
				writer.write_f32(*f);
			}
			GeoValue::Double(f) => {
				writer.write_pbf_key(3, 1);
				writer.write_f64(*f);
			}
			GeoValue::UInt(u) => {
				writer.write_pbf_key(5, 0);
				writer.write_varint(*u);
			}
			GeoValue::Int(i) => {
				writer.write_pbf_key(6, 0);
				writer.write_svarint(*i);
			}
			GeoValue::Bool(b) => {
				writer.write_pbf_key(7, 0);
				writer.write_varint(u64::from(*b));
			}
		}
		writer.into_blob()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(GeoValue::from("hello"), &[0x0A, 0x05, b'h', b'e', b'l', b'l', b'o'])]
	#[case(GeoValue::Float(1.0), &[0x15, 0x00, 0x00, 0x80, 0x3F])]
	#[case(GeoValue::Double(1.0), &[0x19, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F])]
	#[case(GeoValue::UInt(150), &[0x28, 0x96, 0x01])]
	#[case(GeoValue::Int(75), &[0x30, 0x96, 0x01])]
	#[case(GeoValue::Bool(true), &[0x38, 0x01])]
	fn encoding(#[case] value: GeoValue, #[case] bytes: &[u8]) -> Result<()> {
		assert_eq!(value.to_blob().as_slice(), bytes);
		assert_eq!(GeoValue::read(&mut ValueReaderSlice::new(bytes))?, value);
		Ok(())
	}

	#[test]
	fn plain_int_field() -> Result<()> {
		let value = GeoValue::read(&mut ValueReaderSlice::new(&[0x20, 0x96, 0x01]))?;
		assert_eq!(value, GeoValue::Int(150));
		Ok(())
	}

	#[test]
	fn empty_message() {
		assert!(GeoValue::read(&mut ValueReaderSlice::new(&[])).is_err());
	}

	#[test]
	fn unknown_field() {
		let err = GeoValue::read(&mut ValueReaderSlice::new(&[0x40, 0x01])).unwrap_err();
		assert_eq!(err.to_string(), "Unexpected combination of field number (8) and wire type (0)");
	}
}
