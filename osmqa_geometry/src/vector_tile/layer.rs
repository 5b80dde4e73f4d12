//! A single named layer of a vector tile.
//!
//! MVT fields:
//!  * 1: `name` (string)
//!  * 2: repeated `feature` (embedded message)
//!  * 3: repeated `keys` (string)
//!  * 4: repeated `values` (embedded message)
//!  * 5: `extent` (varint, default 4096)
//!  * 15: `version` (varint, default 1)

use super::{DEFAULT_EXTENT, GeoValuePBF, PropertyManager, VectorTileFeature};
use crate::geo::{GeoFeature, GeoProperties, GeoValue};
use anyhow::{Context, Result, anyhow, bail, ensure};
use osmqa_core::{
	Blob,
	io::{ValueReaderSlice, ValueWriterBlob},
};

/// A vector tile layer: features plus the key/value tables their `tag_ids` point into.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorTileLayer {
	/// Coordinate units per tile edge.
	pub extent: u32,
	pub features: Vec<VectorTileFeature>,
	pub name: String,
	pub property_manager: PropertyManager,
	pub version: u32,
}

impl VectorTileLayer {
	#[must_use]
	pub fn new(name: String, extent: u32, version: u32) -> VectorTileLayer {
		VectorTileLayer {
			extent,
			features: vec![],
			name,
			property_manager: PropertyManager::default(),
			version,
		}
	}

	/// A layer with `extent = 4096` and `version = 2`.
	#[must_use]
	pub fn new_standard(name: &str) -> VectorTileLayer {
		VectorTileLayer::new(name.to_string(), DEFAULT_EXTENT, 2)
	}

	pub fn read(reader: &mut ValueReaderSlice<'_>) -> Result<VectorTileLayer> {
		let mut extent = DEFAULT_EXTENT;
		let mut features: Vec<VectorTileFeature> = Vec::new();
		let mut name = None;
		let mut property_manager = PropertyManager::new();
		let mut version = 1;

		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, 2) => name = Some(reader.read_pbf_string().context("Failed to read layer name")?),
				(2, 2) => {
					let mut sub_reader = reader
						.get_pbf_sub_reader()
						.context("Failed to get PBF sub-reader for feature")?;
					features.push(VectorTileFeature::read(&mut sub_reader).context("Failed to read VectorTileFeature")?);
				}
				(3, 2) => {
					property_manager.add_key(reader.read_pbf_string().context("Failed to read property key")?);
				}
				(4, 2) => {
					let mut sub_reader = reader
						.get_pbf_sub_reader()
						.context("Failed to get PBF sub-reader for property value")?;
					property_manager.add_value(GeoValue::read(&mut sub_reader).context("Failed to read property value")?);
				}
				(5, 0) => extent = u32::try_from(reader.read_varint().context("Failed to read extent")?)?,
				(15, 0) => version = u32::try_from(reader.read_varint().context("Failed to read version")?)?,
				(f, w) => bail!("Unexpected combination of field number ({f}) and wire type ({w})"),
			}
		}

		ensure!(extent > 0, "Layer extent must be greater than zero");

		Ok(VectorTileLayer {
			extent,
			features,
			name: name.ok_or_else(|| anyhow!("Layer name is required"))?,
			property_manager,
			version,
		})
	}

	/// Serializes the layer. `extent` and `version` are only written when they differ from
	/// their protobuf defaults.
	pub fn to_blob(&self) -> Blob {
		let mut writer = ValueWriterBlob::new();

		writer.write_pbf_key(1, 2);
		writer.write_pbf_string(&self.name);

		for feature in &self.features {
			writer.write_pbf_key(2, 2);
			writer.write_pbf_blob(&feature.to_blob());
		}

		for key in self.property_manager.keys.iter() {
			writer.write_pbf_key(3, 2);
			writer.write_pbf_string(key);
		}

		for value in self.property_manager.values.iter() {
			writer.write_pbf_key(4, 2);
			writer.write_pbf_blob(&value.to_blob());
		}

		if self.extent != DEFAULT_EXTENT {
			writer.write_pbf_key(5, 0);
			writer.write_varint(u64::from(self.extent));
		}

		if self.version != 1 {
			writer.write_pbf_key(15, 0);
			writer.write_varint(u64::from(self.version));
		}

		writer.into_blob()
	}

	pub fn encode_tag_ids(&mut self, properties: GeoProperties) -> Vec<u32> {
		self.property_manager.encode_tag_ids(properties)
	}

	pub fn decode_tag_ids(&self, tag_ids: &[u32]) -> Result<GeoProperties> {
		self.property_manager.decode_tag_ids(tag_ids)
	}

	/// Builds a layer from features whose geometry is given in pixel space.
	pub fn from_features(name: String, features: Vec<GeoFeature>, extent: u32, version: u32) -> Result<VectorTileLayer> {
		ensure!(extent > 0, "Layer extent must be greater than zero");
		let mut property_manager = PropertyManager::from_properties(features.iter().map(|f| &f.properties));

		let features = features
			.into_iter()
			.map(|feature| {
				let tag_ids = property_manager.encode_tag_ids(feature.properties);
				VectorTileFeature::from_pixel_geometry(feature.id, tag_ids, &feature.geometry, extent)
			})
			.collect::<Result<Vec<VectorTileFeature>>>()?;

		Ok(VectorTileLayer {
			extent,
			features,
			name,
			property_manager,
			version,
		})
	}

	/// Decodes all features, geometry in pixel space.
	pub fn to_features(&self) -> Result<Vec<GeoFeature>> {
		self
			.features
			.iter()
			.map(|feature| feature.to_feature(self).context("Failed to convert VectorTileFeature to GeoFeature"))
			.collect()
	}

	/// Rebuilds the key/value tables from the attributes still referenced by the features.
	///
	/// Entries only used by removed features are dropped and `tag_ids` are re-encoded.
	pub fn compact_properties(&mut self) -> Result<()> {
		let properties = self
			.features
			.iter()
			.map(|feature| self.decode_tag_ids(&feature.tag_ids))
			.collect::<Result<Vec<GeoProperties>>>()?;

		let mut property_manager = PropertyManager::from_properties(properties.iter());
		for (feature, properties) in self.features.iter_mut().zip(properties) {
			feature.tag_ids = property_manager.encode_tag_ids(properties);
		}
		self.property_manager = property_manager;
		Ok(())
	}
}
