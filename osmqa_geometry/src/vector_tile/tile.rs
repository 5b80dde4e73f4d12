use super::VectorTileLayer;
use anyhow::{Context, Result, bail};
use osmqa_core::{
	Blob,
	io::{ValueReaderSlice, ValueWriterBlob},
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorTile {
	pub layers: Vec<VectorTileLayer>,
}

impl VectorTile {
	pub fn new(layers: Vec<VectorTileLayer>) -> VectorTile {
		VectorTile { layers }
	}

	pub fn from_blob(blob: &Blob) -> Result<VectorTile> {
		let mut reader = ValueReaderSlice::new(blob.as_slice());

		let mut tile = VectorTile::default();
		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(3, 2) => {
					let mut sub_reader = reader.get_pbf_sub_reader().context("Failed to get PBF sub-reader")?;
					tile
						.layers
						.push(VectorTileLayer::read(&mut sub_reader).context("Failed to read VectorTileLayer")?);
				}
				(f, w) => bail!("Unexpected combination of field number ({f}) and wire type ({w})"),
			}
		}

		Ok(tile)
	}

	pub fn to_blob(&self) -> Blob {
		let mut writer = ValueWriterBlob::new();
		for layer in &self.layers {
			writer.write_pbf_key(3, 2);
			writer.write_pbf_blob(&layer.to_blob());
		}
		writer.into_blob()
	}

	pub fn find_layer(&self, name: &str) -> Option<&VectorTileLayer> {
		self.layers.iter().find(|layer| layer.name == name)
	}

	pub fn find_layer_mut(&mut self, name: &str) -> Option<&mut VectorTileLayer> {
		self.layers.iter_mut().find(|layer| layer.name == name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::geo::{GeoFeature, Geometry};

	fn example_tile() -> Result<VectorTile> {
		let line = GeoFeature::new(Geometry::new_line_string(vec![[0.0, 0.0], [12.0, 4.0]]));
		let point = GeoFeature::new(Geometry::new_point([3.0, 3.0]));
		Ok(VectorTile::new(vec![
			VectorTileLayer::from_features(String::from("osm"), vec![line], 4096, 2)?,
			VectorTileLayer::from_features(String::from("pois"), vec![point], 256, 2)?,
		]))
	}

	#[test]
	fn blob_round_trip() -> Result<()> {
		let tile = example_tile()?;
		let blob = tile.to_blob();
		assert_eq!(VectorTile::from_blob(&blob)?, tile);
		Ok(())
	}

	#[test]
	fn find_layer() -> Result<()> {
		let mut tile = example_tile()?;
		assert_eq!(tile.find_layer("pois").map(|l| l.extent), Some(256));
		assert!(tile.find_layer("water").is_none());
		if let Some(layer) = tile.find_layer_mut("osm") {
			layer.features.clear();
		}
		assert!(tile.find_layer("osm").is_some_and(|l| l.features.is_empty()));
		Ok(())
	}

	#[test]
	fn rejects_unknown_fields() {
		assert!(VectorTile::from_blob(&Blob::from(&[0x08, 0x01])).is_err());
	}
}
