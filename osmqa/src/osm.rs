//! OpenStreetMap elements as they reach a profile.

use osmqa_geometry::Geometry;
use std::{collections::BTreeMap, fmt::Display};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OsmElementKind {
	Node,
	Way,
	Relation,
}

impl OsmElementKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			OsmElementKind::Node => "node",
			OsmElementKind::Way => "way",
			OsmElementKind::Relation => "relation",
		}
	}
}

impl Display for OsmElementKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Metadata of the last edit. Zero or blank values mean "unknown".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OsmInfo {
	pub version: u32,
	/// Seconds since the Unix epoch.
	pub timestamp: i64,
	pub changeset: i64,
	pub user_id: u32,
	pub user: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OsmElement {
	pub kind: OsmElementKind,
	pub id: u64,
	/// `None` when the source was read without metadata.
	pub info: Option<OsmInfo>,
}

impl OsmElement {
	pub fn new(kind: OsmElementKind, id: u64) -> Self {
		OsmElement { kind, id, info: None }
	}

	#[must_use]
	pub fn with_info(mut self, info: OsmInfo) -> Self {
		self.info = Some(info);
		self
	}
}

/// An element with its tags and its geometry, already projected into tile pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceFeature {
	pub tags: BTreeMap<String, String>,
	pub element: OsmElement,
	pub geometry: Geometry,
}

impl SourceFeature {
	pub fn new(element: OsmElement, geometry: Geometry) -> Self {
		SourceFeature {
			tags: BTreeMap::new(),
			element,
			geometry,
		}
	}

	#[must_use]
	pub fn with_tag(mut self, key: &str, value: &str) -> Self {
		self.tags.insert(key.to_string(), value.to_string());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn kind_names() {
		assert_eq!(OsmElementKind::Node.as_str(), "node");
		assert_eq!(OsmElementKind::Way.to_string(), "way");
		assert_eq!(OsmElementKind::Relation.to_string(), "relation");
	}

	#[test]
	fn builder() {
		let element = OsmElement::new(OsmElementKind::Way, 4).with_info(OsmInfo {
			version: 2,
			..Default::default()
		});
		let feature = SourceFeature::new(element, Geometry::new_point([0.0, 0.0])).with_tag("highway", "track");
		assert_eq!(feature.tags.get("highway").map(String::as_str), Some("track"));
		assert_eq!(feature.element.info.map(|info| info.version), Some(2));
	}
}
