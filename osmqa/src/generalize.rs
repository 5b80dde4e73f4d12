//! Zoom dependent generalization of one tile layer.
//!
//! Below the maximum zoom level every layer passes through [`generalize_layer_features`] right
//! before it is serialized:
//!
//! 1. Lines shorter than [`MIN_PIXEL_SIZE`] pixels and areas smaller than [`MIN_PIXEL_SIZE`] square
//!    pixels are replaced by their centroid. Geometry collections are measured by their area only,
//!    so a collection of short lines always collapses. This is a known approximation.
//! 2. Of all point features sharing the exact same pixel, only the first
//!    [`MAX_POINTS_PER_PIXEL`] are kept. Centroids from step 1 compete with original points.
//!
//! At the maximum zoom level the layer is left untouched.

use log::{debug, trace};
use osmqa_geometry::{Coordinates, Geometry, GeometryKind, PointGeometry, vector_tile::VectorTileFeature};
use std::collections::HashMap;
use thiserror::Error;

/// Threshold below which lines (length in px) and areas (area in px²) collapse to a point.
pub const MIN_PIXEL_SIZE: f64 = 2.0;

/// Number of point features that may share one pixel.
pub const MAX_POINTS_PER_PIXEL: usize = 3;

/// Where a layer is being generalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationContext<'a> {
	pub layer_name: &'a str,
	pub zoom: u8,
	pub max_zoom: u8,
	/// Coordinate units per tile edge of the layer.
	pub extent: u32,
}

impl GenerationContext<'_> {
	fn empty_geometry(&self, index: usize, feature: &VectorTileFeature, kind: GeometryKind) -> GeneralizeError {
		GeneralizeError::EmptyGeometry {
			layer: self.layer_name.to_string(),
			zoom: self.zoom,
			index,
			id: feature.id,
			detail: format!("{kind} has no coordinates"),
		}
	}

	fn decode_error(&self, index: usize, feature: &VectorTileFeature, source: anyhow::Error) -> GeneralizeError {
		GeneralizeError::Decode {
			layer: self.layer_name.to_string(),
			zoom: self.zoom,
			index,
			id: feature.id,
			source,
		}
	}

	fn encode_error(&self, index: usize, feature: &VectorTileFeature, source: anyhow::Error) -> GeneralizeError {
		GeneralizeError::Encode {
			layer: self.layer_name.to_string(),
			zoom: self.zoom,
			index,
			id: feature.id,
			source,
		}
	}
}

/// Outcome of a generalization pass.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerUpdate {
	/// Keep the features as they are.
	Unchanged,
	/// Use this sequence instead of the original features.
	Replaced(Vec<VectorTileFeature>),
}

/// A generalization pass failed. The whole layer has to be treated as failed.
#[derive(Debug, Error)]
pub enum GeneralizeError {
	#[error("empty geometry in feature #{index} (id {id:?}) of layer '{layer}' at zoom {zoom}: {detail}")]
	EmptyGeometry {
		layer: String,
		zoom: u8,
		index: usize,
		id: Option<u64>,
		detail: String,
	},

	#[error("failed to decode the geometry of feature #{index} (id {id:?}) of layer '{layer}' at zoom {zoom}")]
	Decode {
		layer: String,
		zoom: u8,
		index: usize,
		id: Option<u64>,
		#[source]
		source: anyhow::Error,
	},

	#[error("failed to encode the centroid of feature #{index} (id {id:?}) of layer '{layer}' at zoom {zoom}")]
	Encode {
		layer: String,
		zoom: u8,
		index: usize,
		id: Option<u64>,
		#[source]
		source: anyhow::Error,
	},
}

/// Exact pixel position used to count coinciding points.
///
/// Compares the bit patterns of both ordinates, with `-0.0` treated as `0.0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelCoordinate {
	x: u64,
	y: u64,
}

impl PixelCoordinate {
	pub fn new(x: f64, y: f64) -> Self {
		fn bits(value: f64) -> u64 {
			if value == 0.0 { 0f64.to_bits() } else { value.to_bits() }
		}
		PixelCoordinate { x: bits(x), y: bits(y) }
	}

	pub fn x(&self) -> f64 {
		f64::from_bits(self.x)
	}

	pub fn y(&self) -> f64 {
		f64::from_bits(self.y)
	}
}

impl From<&Coordinates> for PixelCoordinate {
	fn from(c: &Coordinates) -> Self {
		PixelCoordinate::new(c.x(), c.y())
	}
}

/// Returns the centroid if `geometry` (in pixel space) is too small to be drawn as anything but a point.
pub fn collapse_geometry(geometry: &Geometry) -> Option<PointGeometry> {
	let too_small = match geometry.kind() {
		GeometryKind::Point | GeometryKind::MultiPoint => false,
		GeometryKind::LineString | GeometryKind::MultiLineString => geometry.length() < MIN_PIXEL_SIZE,
		GeometryKind::Polygon | GeometryKind::MultiPolygon | GeometryKind::GeometryCollection => {
			geometry.area() < MIN_PIXEL_SIZE
		}
	};
	if too_small { geometry.centroid() } else { None }
}

/// Generalizes the features of one layer at one zoom level.
///
/// Returns [`LayerUpdate::Unchanged`] at the maximum zoom level, otherwise the replacement
/// sequence in input order. Fails on the first feature whose geometry is empty or can not be
/// decoded; no partial result is returned.
pub fn generalize_layer_features(
	context: &GenerationContext<'_>,
	features: &[VectorTileFeature],
) -> Result<LayerUpdate, GeneralizeError> {
	if context.zoom == context.max_zoom {
		trace!("layer '{}' is at max zoom {}, nothing to do", context.layer_name, context.zoom);
		return Ok(LayerUpdate::Unchanged);
	}

	let mut collapsed = 0;
	let mut candidates = Vec::with_capacity(features.len());
	for (index, feature) in features.iter().enumerate() {
		let geometry = feature
			.to_pixel_geometry(context.extent)
			.map_err(|source| context.decode_error(index, feature, source))?;

		if geometry.is_empty() {
			return Err(context.empty_geometry(index, feature, geometry.kind()));
		}

		match collapse_geometry(&geometry) {
			Some(centroid) => {
				trace!("feature #{index} ({}) collapses to {centroid:?}", geometry.kind());
				let point = feature
					.copy_with_new_geometry(&Geometry::Point(centroid), context.extent)
					.map_err(|source| context.encode_error(index, feature, source))?;
				candidates.push(point);
				collapsed += 1;
			}
			None => candidates.push(feature.clone()),
		}
	}

	let mut points_per_pixel: HashMap<PixelCoordinate, usize> = HashMap::new();
	let mut result = Vec::with_capacity(candidates.len());
	for (index, feature) in candidates.into_iter().enumerate() {
		if feature.geom_type.is_point() {
			let first = feature
				.first_pixel_coordinate(context.extent)
				.map_err(|source| context.decode_error(index, &feature, source))?;
			if let Some(first) = first {
				let count = points_per_pixel.entry(PixelCoordinate::from(&first)).or_default();
				if *count >= MAX_POINTS_PER_PIXEL {
					trace!("feature #{index} dropped, pixel {first:?} already has {count} points");
					continue;
				}
				*count += 1;
			}
		}
		result.push(feature);
	}

	debug!(
		"generalized layer '{}' at zoom {}: {} features, {} collapsed to points, {} dropped",
		context.layer_name,
		context.zoom,
		features.len(),
		collapsed,
		features.len() - result.len()
	);

	Ok(LayerUpdate::Replaced(result))
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::{assert_abs_diff_eq, assert_relative_eq};
	use osmqa_core::Blob;
	use osmqa_geometry::vector_tile::GeomType;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	const EXTENT: u32 = 4096;

	fn context(zoom: u8, max_zoom: u8) -> GenerationContext<'static> {
		GenerationContext {
			layer_name: "osm",
			zoom,
			max_zoom,
			extent: EXTENT,
		}
	}

	fn feature(id: u64, geometry: &Geometry) -> VectorTileFeature {
		VectorTileFeature::from_pixel_geometry(Some(id), vec![0, id as u32], geometry, EXTENT).unwrap()
	}

	fn point(id: u64, x: f64, y: f64) -> VectorTileFeature {
		feature(id, &Geometry::new_point([x, y]))
	}

	fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Vec<[f64; 2]> {
		vec![[x, y], [x + width, y], [x + width, y + height], [x, y + height], [x, y]]
	}

	fn generalize(zoom: u8, max_zoom: u8, features: &[VectorTileFeature]) -> Vec<VectorTileFeature> {
		match generalize_layer_features(&context(zoom, max_zoom), features).unwrap() {
			LayerUpdate::Replaced(features) => features,
			LayerUpdate::Unchanged => panic!("expected a replacement"),
		}
	}

	fn ids(features: &[VectorTileFeature]) -> Vec<u64> {
		features.iter().filter_map(|f| f.id).collect()
	}

	#[rstest]
	#[case(14, vec![])]
	#[case(14, vec![point(1, 5.0, 5.0); 10])]
	#[case(0, vec![VectorTileFeature { geom_type: GeomType::MultiPolygon, ..Default::default() }])]
	fn unchanged_at_max_zoom(#[case] zoom: u8, #[case] features: Vec<VectorTileFeature>) {
		let update = generalize_layer_features(&context(zoom, zoom), &features).unwrap();
		assert_eq!(update, LayerUpdate::Unchanged);
	}

	#[test]
	fn replaced_even_without_changes() {
		let line = feature(1, &Geometry::new_line_string(vec![[0.0, 0.0], [100.0, 0.0]]));
		assert_eq!(generalize(10, 14, &[line.clone()]), vec![line]);
		assert_eq!(generalize(10, 14, &[]), vec![]);
	}

	#[test]
	fn small_polygon_becomes_centroid() {
		let polygon = feature(7, &Geometry::new_polygon(vec![rectangle(10.0, 20.0, 1.5, 1.0)]));
		let result = generalize(10, 14, &[polygon.clone()]);

		assert_eq!(result.len(), 1);
		assert_eq!(result[0].id, Some(7));
		assert_eq!(result[0].tag_ids, polygon.tag_ids);
		assert_eq!(result[0].geom_type, GeomType::MultiPoint);
		let Geometry::Point(centroid) = result[0].to_pixel_geometry(EXTENT).unwrap() else {
			panic!("expected a point");
		};
		assert_relative_eq!(centroid.x(), 10.75);
		assert_relative_eq!(centroid.y(), 20.5);
	}

	#[test]
	fn four_points_on_one_pixel_keep_the_first_three() {
		let points: Vec<_> = (1..=4).map(|id| point(id, 5.0, 5.0)).collect();
		let result = generalize(10, 14, &points);
		assert_eq!(result, points[0..3].to_vec());
	}

	#[test]
	fn short_line_collapses_long_line_stays() {
		let short = feature(1, &Geometry::new_line_string(vec![[4.0, 4.0], [4.5, 4.0]]));
		let long = feature(2, &Geometry::new_line_string(vec![[0.0, 8.0], [10.0, 8.0]]));
		let result = generalize(8, 12, &[short, long.clone()]);

		assert_eq!(result.len(), 2);
		assert_eq!(result[0].to_pixel_geometry(EXTENT).unwrap(), Geometry::new_point([4.25, 4.0]));
		assert_eq!(result[1], long);
	}

	#[rstest]
	#[case::short_line(Geometry::new_line_string(vec![[0.0, 0.0], [1.875, 0.0]]), true)]
	#[case::line_at_threshold(Geometry::new_line_string(vec![[0.0, 0.0], [2.0, 0.0]]), false)]
	#[case::short_multi_line(Geometry::new_multi_line_string(vec![vec![[0.0, 0.0], [0.75, 0.0]], vec![[5.0, 5.0], [5.0, 5.75]]]), true)]
	#[case::long_multi_line(Geometry::new_multi_line_string(vec![vec![[0.0, 0.0], [1.0, 0.0]], vec![[5.0, 5.0], [5.0, 6.0]]]), false)]
	#[case::small_polygon(Geometry::new_polygon(vec![rectangle(0.0, 0.0, 1.0, 1.875)]), true)]
	#[case::polygon_at_threshold(Geometry::new_polygon(vec![rectangle(0.0, 0.0, 2.0, 1.0)]), false)]
	#[case::polygon_with_large_hole(Geometry::new_polygon(vec![rectangle(0.0, 0.0, 4.0, 4.0), rectangle(0.5, 0.5, 3.0, 3.0)]), false)]
	#[case::polygon_mostly_hole(Geometry::new_polygon(vec![rectangle(0.0, 0.0, 4.0, 4.0), rectangle(0.125, 0.125, 3.75, 3.75)]), true)]
	#[case::small_multi_polygon(Geometry::new_multi_polygon(vec![vec![rectangle(0.0, 0.0, 0.5, 1.0)], vec![rectangle(8.0, 8.0, 0.5, 1.0)]]), true)]
	#[case::large_multi_polygon(Geometry::new_multi_polygon(vec![vec![rectangle(0.0, 0.0, 1.0, 1.0)], vec![rectangle(8.0, 8.0, 1.0, 1.0)]]), false)]
	#[case::point(Geometry::new_point([1.0, 1.0]), false)]
	#[case::multi_point(Geometry::new_multi_point(vec![[1.0, 1.0], [1.0, 1.0]]), false)]
	fn collapse_rules(#[case] geometry: Geometry, #[case] collapses: bool) {
		let input = feature(1, &geometry);
		let result = generalize(10, 14, &[input.clone()]);
		assert_eq!(result.len(), 1);
		if collapses {
			let expected = geometry.centroid().unwrap();
			assert_eq!(result[0].geom_type, GeomType::MultiPoint);
			assert_eq!(result[0].tag_ids, input.tag_ids);
			let Geometry::Point(centroid) = result[0].to_pixel_geometry(EXTENT).unwrap() else {
				panic!("expected a point");
			};
			// centroids are stored in whole extent units, 1/16 px at 4096
			assert_abs_diff_eq!(centroid.x(), expected.x(), epsilon = 1.0 / 32.0);
			assert_abs_diff_eq!(centroid.y(), expected.y(), epsilon = 1.0 / 32.0);
		} else {
			assert_eq!(result[0], input);
		}
	}

	#[test]
	fn collection_uses_the_area_rule_only() {
		let long_line = Geometry::new_line_string(vec![[0.0, 0.0], [100.0, 0.0]]);
		let small_square = Geometry::new_polygon(vec![rectangle(50.0, 50.0, 1.0, 1.0)]);
		let large_square = Geometry::new_polygon(vec![rectangle(50.0, 50.0, 3.0, 3.0)]);

		let collection = Geometry::GeometryCollection(vec![long_line.clone(), small_square]);
		let centroid = collapse_geometry(&collection).unwrap();
		assert_relative_eq!(centroid.x(), 50.5);
		assert_relative_eq!(centroid.y(), 50.5);

		assert!(collapse_geometry(&Geometry::GeometryCollection(vec![long_line.clone()])).is_some());
		assert!(collapse_geometry(&Geometry::GeometryCollection(vec![long_line, large_square])).is_none());
	}

	#[test]
	fn centroids_share_the_budget_with_points() {
		let tiny = feature(1, &Geometry::new_polygon(vec![rectangle(4.5, 4.5, 1.0, 1.0)]));
		let features = vec![tiny, point(2, 5.0, 5.0), point(3, 5.0, 5.0), point(4, 5.0, 5.0)];
		assert_eq!(ids(&generalize(10, 14, &features)), vec![1, 2, 3]);
	}

	#[test]
	fn multi_points_are_keyed_by_their_first_point() {
		let features = vec![
			feature(1, &Geometry::new_multi_point(vec![[5.0, 5.0], [9.0, 9.0]])),
			point(2, 5.0, 5.0),
			point(3, 9.0, 9.0),
			point(4, 5.0, 5.0),
			point(5, 5.0, 5.0),
		];
		assert_eq!(ids(&generalize(10, 14, &features)), vec![1, 2, 3, 4]);
	}

	#[test]
	fn non_points_are_never_dropped() {
		let line = |id| feature(id, &Geometry::new_line_string(vec![[5.0, 5.0], [50.0, 5.0]]));
		let features = vec![line(1), point(2, 5.0, 5.0), line(3), point(4, 5.0, 5.0), point(5, 5.0, 5.0), line(6), point(7, 5.0, 5.0)];
		assert_eq!(ids(&generalize(10, 14, &features)), vec![1, 2, 3, 4, 5, 6]);
	}

	#[test]
	fn order_is_preserved() {
		let features = vec![
			point(1, 1.0, 1.0),
			feature(2, &Geometry::new_polygon(vec![rectangle(0.0, 0.0, 10.0, 10.0)])),
			point(3, 2.0, 2.0),
			feature(4, &Geometry::new_line_string(vec![[0.0, 0.0], [0.5, 0.5]])),
			point(5, 1.0, 1.0),
		];
		assert_eq!(ids(&generalize(10, 14, &features)), vec![1, 2, 3, 4, 5]);
	}

	#[test]
	fn counter_is_local_to_one_call() {
		let points: Vec<_> = (1..=3).map(|id| point(id, 5.0, 5.0)).collect();
		assert_eq!(generalize(10, 14, &points).len(), 3);
		assert_eq!(generalize(10, 14, &points).len(), 3);
	}

	#[test]
	fn empty_geometry_fails_the_whole_layer() {
		let empty = VectorTileFeature {
			id: Some(99),
			geom_type: GeomType::MultiLineString,
			geom_data: Blob::new_empty(),
			..Default::default()
		};
		let features = vec![point(1, 1.0, 1.0), empty];
		let err = generalize_layer_features(&context(10, 14), &features).unwrap_err();

		match &err {
			GeneralizeError::EmptyGeometry { layer, zoom, index, id, .. } => {
				assert_eq!((layer.as_str(), *zoom, *index, *id), ("osm", 10, 1, Some(99)));
			}
			other => panic!("unexpected error {other:?}"),
		}
		assert_eq!(
			err.to_string(),
			"empty geometry in feature #1 (id Some(99)) of layer 'osm' at zoom 10: MultiLineString has no coordinates"
		);
	}

	#[test]
	fn decode_errors_are_wrapped() {
		let broken = VectorTileFeature {
			id: Some(5),
			geom_type: GeomType::Unknown,
			geom_data: Blob::from(&[9, 2, 2]),
			..Default::default()
		};
		let err = generalize_layer_features(&context(3, 4), &[broken]).unwrap_err();
		assert!(matches!(err, GeneralizeError::Decode { index: 0, id: Some(5), .. }));
		let source = std::error::Error::source(&err).map(ToString::to_string);
		assert_eq!(source.as_deref(), Some("Unknown geometry type"));
	}

	#[test]
	fn coordinate_overflow_is_a_decode_error() {
		let mut data = vec![17];
		for _ in 0..2 {
			// zigzag encoded i64::MAX as x, 0 as y
			data.extend_from_slice(&[0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01, 0x00]);
		}
		let broken = VectorTileFeature {
			id: Some(8),
			geom_type: GeomType::MultiPoint,
			geom_data: Blob::from(data),
			..Default::default()
		};
		let err = generalize_layer_features(&context(3, 4), &[broken]).unwrap_err();
		assert!(matches!(err, GeneralizeError::Decode { index: 0, id: Some(8), .. }));
		let source = std::error::Error::source(&err).map(ToString::to_string);
		assert_eq!(source.as_deref(), Some("Coordinate overflow in geometry"));
	}

	#[test]
	fn pixel_coordinate_equality() {
		assert_eq!(PixelCoordinate::new(0.0, 1.0), PixelCoordinate::new(-0.0, 1.0));
		assert_ne!(PixelCoordinate::new(1.0, 1.0), PixelCoordinate::new(1.0 + f64::EPSILON, 1.0));
		assert_eq!(PixelCoordinate::from(&Coordinates::new(2.5, 3.0)).x(), 2.5);
	}

	#[test]
	fn can_run_on_many_threads() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<GeneralizeError>();
		assert_send_sync::<LayerUpdate>();
		assert_send_sync::<GenerationContext<'static>>();

		let points: Vec<_> = (1..=5).map(|id| point(id, 5.0, 5.0)).collect();
		std::thread::scope(|scope| {
			let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| generalize(10, 14, &points).len())).collect();
			for handle in handles {
				assert_eq!(handle.join().unwrap(), 3);
			}
		});
	}
}
