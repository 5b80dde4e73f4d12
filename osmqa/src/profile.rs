//! Profiles decide which source elements end up in which layer, and how layers are
//! post-processed before they are written.

use crate::{
	generalize::{GeneralizeError, GenerationContext, LayerUpdate, generalize_layer_features},
	osm::SourceFeature,
};
use osmqa_geometry::{GeoFeature, vector_tile::VectorTileFeature};
use std::collections::{BTreeMap, btree_map};

pub trait Profile: Send + Sync {
	fn name(&self) -> &str;

	fn attribution(&self) -> &str;

	/// Emits output features for one source element into `features`.
	fn process_feature(&self, source: &SourceFeature, features: &mut FeatureCollector);

	/// Called once per layer and zoom level with the encoded features of that layer.
	fn post_process_layer_features(
		&self,
		_layer: &str,
		_zoom: u8,
		_extent: u32,
		_features: &[VectorTileFeature],
	) -> Result<LayerUpdate, GeneralizeError> {
		Ok(LayerUpdate::Unchanged)
	}
}

/// Output features grouped by layer name. Geometries are in tile pixel space.
#[derive(Clone, Debug, Default)]
pub struct FeatureCollector {
	layers: BTreeMap<String, Vec<GeoFeature>>,
}

impl FeatureCollector {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a feature to `layer` that copies the id and geometry of `source`, and returns it for
	/// setting attributes.
	pub fn any_geometry(&mut self, layer: &str, source: &SourceFeature) -> &mut GeoFeature {
		let mut feature = GeoFeature::new(source.geometry.clone());
		feature.set_id(source.element.id);
		let features = self.layers.entry(layer.to_string()).or_default();
		features.push(feature);
		let index = features.len() - 1;
		&mut features[index]
	}

	pub fn is_empty(&self) -> bool {
		self.layers.values().all(Vec::is_empty)
	}

	pub fn layer(&self, name: &str) -> Option<&[GeoFeature]> {
		self.layers.get(name).map(Vec::as_slice)
	}

	/// Layers in name order.
	pub fn into_layers(self) -> btree_map::IntoIter<String, Vec<GeoFeature>> {
		self.layers.into_iter()
	}
}

const OSM_ATTRIBUTION: &str =
	r#"<a href="https://www.openstreetmap.org/copyright" target="_blank">&copy; OpenStreetMap contributors</a>"#;

/// A raw copy of every tagged OSM element in a single `osm` layer, generalized below `max_zoom`.
///
/// Besides all tags, every feature carries `@id` and `@type` (`node`, `way` or `relation`).
/// If edit metadata is available, `@version`, `@timestamp`, `@changeset`, `@uid` and `@user` are
/// added as well, skipping values that are zero or blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OsmQaTiles {
	max_zoom: u8,
}

impl OsmQaTiles {
	pub const LAYER: &'static str = "osm";

	pub fn new(max_zoom: u8) -> Self {
		OsmQaTiles { max_zoom }
	}

	pub fn max_zoom(&self) -> u8 {
		self.max_zoom
	}
}

impl Profile for OsmQaTiles {
	fn name(&self) -> &str {
		"osm qa"
	}

	fn attribution(&self) -> &str {
		OSM_ATTRIBUTION
	}

	fn process_feature(&self, source: &SourceFeature, features: &mut FeatureCollector) {
		if source.tags.is_empty() {
			return;
		}

		let feature = features.any_geometry(OsmQaTiles::LAYER, source);
		for (key, value) in &source.tags {
			feature.set_property(key, value);
		}

		let element = &source.element;
		feature.set_property("@id", element.id);
		feature.set_property("@type", element.kind.as_str());

		let Some(info) = &element.info else {
			return;
		};
		if info.version != 0 {
			feature.set_property("@version", info.version);
		}
		if info.timestamp != 0 {
			feature.set_property("@timestamp", info.timestamp);
		}
		if info.changeset != 0 {
			feature.set_property("@changeset", info.changeset);
		}
		if info.user_id != 0 {
			feature.set_property("@uid", info.user_id);
		}
		if let Some(user) = info.user.as_deref().filter(|user| !user.trim().is_empty()) {
			feature.set_property("@user", user);
		}
	}

	fn post_process_layer_features(
		&self,
		layer: &str,
		zoom: u8,
		extent: u32,
		features: &[VectorTileFeature],
	) -> Result<LayerUpdate, GeneralizeError> {
		let context = GenerationContext {
			layer_name: layer,
			zoom,
			max_zoom: self.max_zoom,
			extent,
		};
		generalize_layer_features(&context, features)
	}
}
