//! Turns collected features into encoded vector tiles and applies the profile's layer
//! post-processing.

use crate::{
	generalize::LayerUpdate,
	profile::{FeatureCollector, Profile},
};
use anyhow::{Context, Result};
use log::{debug, warn};
use osmqa_core::Blob;
use osmqa_geometry::{
	GeoFeature,
	vector_tile::{VectorTile, VectorTileLayer},
};

const LAYER_VERSION: u32 = 2;

/// Applies [`Profile::post_process_layer_features`] to an encoded layer.
///
/// A replaced feature list also rebuilds the layer's key/value tables.
pub fn post_process_layer(profile: &dyn Profile, zoom: u8, layer: &mut VectorTileLayer) -> Result<()> {
	let update = profile
		.post_process_layer_features(&layer.name, zoom, layer.extent, &layer.features)
		.with_context(|| format!("Failed to post-process layer '{}' at zoom {zoom}", layer.name))?;

	match update {
		LayerUpdate::Unchanged => {}
		LayerUpdate::Replaced(features) => {
			debug!(
				"layer '{}' at zoom {zoom}: {} -> {} features",
				layer.name,
				layer.features.len(),
				features.len()
			);
			layer.features = features;
			layer.compact_properties()?;
		}
	}
	Ok(())
}

/// Encodes the features of one layer and post-processes them.
pub fn render_layer(
	profile: &dyn Profile,
	name: &str,
	zoom: u8,
	features: Vec<GeoFeature>,
	extent: u32,
) -> Result<VectorTileLayer> {
	let mut layer = VectorTileLayer::from_features(name.to_string(), features, extent, LAYER_VERSION)
		.with_context(|| format!("Failed to encode layer '{name}'"))?;
	post_process_layer(profile, zoom, &mut layer)?;
	Ok(layer)
}

/// Renders every layer of `collector`, in layer name order.
pub fn render_tile(profile: &dyn Profile, zoom: u8, collector: FeatureCollector, extent: u32) -> Result<VectorTile> {
	let layers = collector
		.into_layers()
		.map(|(name, features)| render_layer(profile, &name, zoom, features, extent))
		.collect::<Result<Vec<_>>>()?;
	Ok(VectorTile::new(layers))
}

/// Post-processes every layer of an already encoded tile, each with its own extent.
pub fn post_process_tile(profile: &dyn Profile, zoom: u8, tile: &mut VectorTile) -> Result<()> {
	for layer in &mut tile.layers {
		post_process_layer(profile, zoom, layer)?;
	}
	Ok(())
}

/// Logs a warning and returns `true` if `blob` is larger than `warning_size_mb` megabytes.
pub fn check_tile_size(blob: &Blob, warning_size_mb: u64) -> bool {
	let limit = warning_size_mb.saturating_mul(1024 * 1024);
	if blob.len() <= limit {
		return false;
	}
	warn!(
		"tile is {:.1} MB, larger than the warning threshold of {warning_size_mb} MB",
		blob.len() as f64 / (1024.0 * 1024.0)
	);
	true
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		osm::{OsmElement, OsmElementKind, SourceFeature},
		profile::OsmQaTiles,
	};
	use osmqa_geometry::{GeoValue, Geometry};
	use pretty_assertions::assert_eq;

	fn bench(id: u64, x: f64, y: f64) -> SourceFeature {
		SourceFeature::new(OsmElement::new(OsmElementKind::Node, id), Geometry::new_point([x, y]))
			.with_tag("amenity", "bench")
			.with_tag("ref", &id.to_string())
	}

	fn collect(sources: &[SourceFeature]) -> FeatureCollector {
		let profile = OsmQaTiles::new(14);
		let mut collector = FeatureCollector::new();
		for source in sources {
			profile.process_feature(source, &mut collector);
		}
		collector
	}

	#[test]
	fn renders_at_max_zoom_without_changes() -> Result<()> {
		let profile = OsmQaTiles::new(14);
		let sources: Vec<SourceFeature> = (1..=5).map(|id| bench(id, 8.0, 8.0)).collect();
		let tile = render_tile(&profile, 14, collect(&sources), 4096)?;

		let layer = tile.find_layer("osm").expect("layer");
		assert_eq!(layer.extent, 4096);
		assert_eq!(layer.features.len(), 5);
		Ok(())
	}

	#[test]
	fn caps_points_below_max_zoom_and_compacts_values() -> Result<()> {
		let profile = OsmQaTiles::new(14);
		let sources: Vec<SourceFeature> = (1..=5).map(|id| bench(id, 8.0, 8.0)).collect();
		let tile = render_tile(&profile, 13, collect(&sources), 4096)?;

		let layer = tile.find_layer("osm").expect("layer");
		let features = layer.to_features()?;
		let refs: Vec<_> = features.iter().map(|f| f.properties.get("ref").cloned()).collect();
		assert_eq!(
			refs,
			[Some(GeoValue::from("1")), Some(GeoValue::from("2")), Some(GeoValue::from("3"))]
		);
		let values: Vec<&GeoValue> = layer.property_manager.values.iter().collect();
		assert!(!values.contains(&&GeoValue::from("4")));
		assert!(!values.contains(&&GeoValue::from("5")));
		Ok(())
	}

	#[test]
	fn post_processes_decoded_tile() -> Result<()> {
		let profile = OsmQaTiles::new(14);
		let sources: Vec<SourceFeature> = (1..=4).map(|id| bench(id, 100.0, 100.0)).collect();
		let blob = render_tile(&profile, 14, collect(&sources), 4096)?.to_blob();

		let mut tile = VectorTile::from_blob(&blob)?;
		post_process_tile(&profile, 10, &mut tile)?;
		assert_eq!(tile.layers[0].features.len(), 3);

		let mut unchanged = VectorTile::from_blob(&blob)?;
		post_process_tile(&profile, 14, &mut unchanged)?;
		assert_eq!(unchanged.to_blob(), blob);
		Ok(())
	}

	#[test]
	fn empty_collector_gives_empty_tile() -> Result<()> {
		let tile = render_tile(&OsmQaTiles::new(14), 3, FeatureCollector::new(), 4096)?;
		assert!(tile.layers.is_empty());
		Ok(())
	}

	#[test]
	fn tile_size_warning() {
		assert!(!check_tile_size(&Blob::from(vec![0; 1024]), 1));
		assert!(!check_tile_size(&Blob::from(vec![0; 1024 * 1024]), 1));
		assert!(check_tile_size(&Blob::from(vec![0; 1024 * 1024 + 1]), 1));
		assert!(check_tile_size(&Blob::from(vec![0; 1]), 0));
	}
}
