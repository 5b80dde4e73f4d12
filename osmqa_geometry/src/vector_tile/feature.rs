//! A single MVT feature. The geometry stays encoded until it is asked for.
//!
//! Command stream layout: <https://github.com/mapbox/vector-tile-spec/blob/master/2.1/README.md#43-geometry-encoding>

use super::{GeomType, TILE_SIZE_PIXELS, VectorTileLayer, pixels_per_unit};
use crate::geo::*;
use anyhow::{Context, Result, bail, ensure};
use log::trace;
use osmqa_core::{
	Blob,
	io::{ValueReaderSlice, ValueWriterBlob},
};

const MOVE_TO: u64 = 1;
const LINE_TO: u64 = 2;
const CLOSE_PATH: u64 = 7;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorTileFeature {
	pub id: Option<u64>,
	pub tag_ids: Vec<u32>,
	pub geom_type: GeomType,
	pub geom_data: Blob,
}

impl VectorTileFeature {
	pub fn read(reader: &mut ValueReaderSlice<'_>) -> Result<VectorTileFeature> {
		let mut f = VectorTileFeature::default();

		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, 0) => f.id = Some(reader.read_varint().context("Failed to read feature ID")?),
				(2, 2) => f.tag_ids = reader.read_pbf_packed_uint32().context("Failed to read tag IDs")?,
				(3, 0) => f.geom_type = GeomType::from(reader.read_varint().context("Failed to read geometry type")?),
				(4, 2) => f.geom_data = reader.read_pbf_blob().context("Failed to read geometry data")?,
				(f, w) => bail!("Unexpected combination of field number ({f}) and wire type ({w})"),
			}
		}

		Ok(f)
	}

	pub fn to_blob(&self) -> Blob {
		let mut writer = ValueWriterBlob::new();

		if let Some(id) = self.id {
			writer.write_pbf_key(1, 0);
			writer.write_varint(id);
		}

		if !self.tag_ids.is_empty() {
			writer.write_pbf_key(2, 2);
			writer.write_pbf_packed_uint32(&self.tag_ids);
		}

		writer.write_pbf_key(3, 0);
		writer.write_varint(self.geom_type.as_u64());

		if !self.geom_data.is_empty() {
			writer.write_pbf_key(4, 2);
			writer.write_pbf_blob(&self.geom_data);
		}

		writer.into_blob()
	}

	/// Splits the command stream into its paths: one entry per point, line or ring.
	/// Closed rings repeat their first coordinate at the end.
	fn decode_paths(&self) -> Result<Vec<Vec<Coordinates>>> {
		let mut reader = ValueReaderSlice::new(self.geom_data.as_slice());
		let mut paths = Vec::new();
		let mut path: Vec<Coordinates> = Vec::new();
		let mut x = 0i64;
		let mut y = 0i64;

		while reader.has_remaining() {
			let value = reader.read_varint().context("Failed to read geometry command")?;
			let command = value & 0x7;
			let count = value >> 3;

			match command {
				MOVE_TO | LINE_TO => {
					ensure!(command == MOVE_TO || !path.is_empty(), "LineTo command without a preceding MoveTo");
					for _ in 0..count {
						if command == MOVE_TO && !path.is_empty() {
							paths.push(std::mem::take(&mut path));
						}
						let dx = reader.read_svarint().context("Failed to read x coordinate")?;
						let dy = reader.read_svarint().context("Failed to read y coordinate")?;
						x = x.checked_add(dx).context("Coordinate overflow in geometry")?;
						y = y.checked_add(dy).context("Coordinate overflow in geometry")?;
						path.push(Coordinates::new(x as f64, y as f64));
					}
				}
				CLOSE_PATH => {
					let Some(first) = path.first().copied() else {
						bail!("ClosePath command found on an empty path");
					};
					path.push(first);
				}
				_ => bail!("Unknown geometry command {command}"),
			}
		}

		if !path.is_empty() {
			paths.push(path);
		}

		Ok(paths)
	}

	/// Decodes the geometry in tile extent units.
	///
	/// A feature with exactly one part decodes to the single variant (`Point`, `LineString`,
	/// `Polygon`), otherwise to the multi variant. An empty command stream yields an empty
	/// multi geometry.
	pub fn to_geometry(&self) -> Result<Geometry> {
		let paths = self.decode_paths()?;

		match self.geom_type {
			GeomType::Unknown => bail!("Unknown geometry type"),

			GeomType::MultiPoint => {
				let points = paths
					.into_iter()
					.map(|path| match <[Coordinates; 1]>::try_from(path) {
						Ok([c]) => Ok(PointGeometry(c)),
						Err(path) => bail!("(Multi)Point entries must have exactly one coordinate, found {}", path.len()),
					})
					.collect::<Result<Vec<_>>>()?;
				Ok(single_or_multi(points, Geometry::Point, |p| {
					Geometry::MultiPoint(MultiPointGeometry(p))
				}))
			}

			GeomType::MultiLineString => {
				let lines = paths
					.into_iter()
					.map(|path| {
						ensure!(path.len() >= 2, "Each line must have at least two points");
						Ok(LineStringGeometry(path))
					})
					.collect::<Result<Vec<_>>>()?;
				Ok(single_or_multi(lines, Geometry::LineString, |l| {
					Geometry::MultiLineString(MultiLineStringGeometry(l))
				}))
			}

			GeomType::MultiPolygon => {
				let mut polygons: Vec<PolygonGeometry> = Vec::new();
				for path in paths {
					let ring = RingGeometry(path);
					ring.verify().context("Invalid polygon ring")?;

					let area = ring.signed_area();
					match polygons.last_mut() {
						Some(polygon) if area < 0.0 => polygon.0.push(ring),
						_ => {
							if area < 0.0 {
								trace!("polygon starts with a hole, treating it as the outer ring");
							}
							polygons.push(PolygonGeometry(vec![ring]));
						}
					}
				}
				Ok(single_or_multi(polygons, Geometry::Polygon, |p| {
					Geometry::MultiPolygon(MultiPolygonGeometry(p))
				}))
			}
		}
	}

	/// Decodes the geometry in pixel space of a tile with the given `extent`.
	pub fn to_pixel_geometry(&self, extent: u32) -> Result<Geometry> {
		Ok(self.to_geometry()?.scale(pixels_per_unit(extent)))
	}

	/// The first coordinate of the command stream in extent units, without decoding the rest.
	pub fn first_coordinate(&self) -> Result<Option<Coordinates>> {
		let mut reader = ValueReaderSlice::new(self.geom_data.as_slice());
		if !reader.has_remaining() {
			return Ok(None);
		}
		let value = reader.read_varint().context("Failed to read geometry command")?;
		ensure!(
			value & 0x7 == MOVE_TO && value >> 3 > 0,
			"Geometry must start with a MoveTo command"
		);
		let x = reader.read_svarint().context("Failed to read x coordinate")?;
		let y = reader.read_svarint().context("Failed to read y coordinate")?;
		Ok(Some(Coordinates::new(x as f64, y as f64)))
	}

	pub fn first_pixel_coordinate(&self, extent: u32) -> Result<Option<Coordinates>> {
		Ok(self.first_coordinate()?.map(|c| c.scale(pixels_per_unit(extent))))
	}

	/// Encodes a geometry given in tile extent units. Coordinates are rounded to integers.
	///
	/// Outer rings are written with positive, holes with negative area.
	/// A `GeometryCollection` has no wire representation and is rejected.
	pub fn from_geometry(id: Option<u64>, tag_ids: Vec<u32>, geometry: &Geometry) -> Result<VectorTileFeature> {
		let geom_type = GeomType::try_from(geometry)?;
		let mut writer = CommandWriter::default();

		match geometry {
			Geometry::Point(g) => writer.points(std::slice::from_ref(g)),
			Geometry::MultiPoint(g) => writer.points(&g.0),
			Geometry::LineString(g) => writer.line_string(g),
			Geometry::MultiLineString(g) => g.0.iter().for_each(|l| writer.line_string(l)),
			Geometry::Polygon(g) => writer.polygon(g),
			Geometry::MultiPolygon(g) => g.0.iter().for_each(|p| writer.polygon(p)),
			Geometry::GeometryCollection(_) => bail!("a GeometryCollection can not be encoded"),
		}

		Ok(VectorTileFeature {
			id,
			tag_ids,
			geom_type,
			geom_data: writer.into_blob(),
		})
	}

	/// Encodes a geometry given in pixel space of a tile with the given `extent`.
	pub fn from_pixel_geometry(
		id: Option<u64>,
		tag_ids: Vec<u32>,
		geometry: &Geometry,
		extent: u32,
	) -> Result<VectorTileFeature> {
		VectorTileFeature::from_geometry(id, tag_ids, &geometry.scale(f64::from(extent) / TILE_SIZE_PIXELS))
	}

	/// Returns a new feature with the same id and attributes but a different (pixel space) geometry.
	pub fn copy_with_new_geometry(&self, geometry: &Geometry, extent: u32) -> Result<VectorTileFeature> {
		VectorTileFeature::from_pixel_geometry(self.id, self.tag_ids.clone(), geometry, extent)
	}

	pub fn decode_properties(&self, layer: &VectorTileLayer) -> Result<GeoProperties> {
		layer.decode_tag_ids(&self.tag_ids)
	}

	/// Converts into a [`GeoFeature`] with pixel space geometry and decoded attributes.
	pub fn to_feature(&self, layer: &VectorTileLayer) -> Result<GeoFeature> {
		let mut feature = GeoFeature::new(
			self
				.to_pixel_geometry(layer.extent)
				.context("Failed to decode geometry")?,
		);
		feature.id = self.id;
		feature.set_properties(self.decode_properties(layer)?);
		Ok(feature)
	}
}

fn single_or_multi<T>(items: Vec<T>, single: impl FnOnce(T) -> Geometry, multi: impl FnOnce(Vec<T>) -> Geometry) -> Geometry {
	match <[T; 1]>::try_from(items) {
		Ok([item]) => single(item),
		Err(items) => multi(items),
	}
}

/// Writes delta-encoded commands, tracking the cursor across paths.
#[derive(Default)]
struct CommandWriter {
	writer: ValueWriterBlob,
	cursor: (i64, i64),
}

impl CommandWriter {
	fn command(&mut self, id: u64, count: usize) {
		self.writer.write_varint(((count as u64) << 3) | id);
	}

	/// Coordinates are clamped to the 32 bit range of the format.
	fn coordinate(&mut self, c: &Coordinates) {
		fn clamp(value: f64) -> i64 {
			value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i64
		}
		let x = clamp(c.x());
		let y = clamp(c.y());
		self.writer.write_svarint(x - self.cursor.0);
		self.writer.write_svarint(y - self.cursor.1);
		self.cursor = (x, y);
	}

	fn path<'a>(&mut self, coordinates: impl ExactSizeIterator<Item = &'a Coordinates>) {
		let mut coordinates = coordinates;
		let Some(first) = coordinates.next() else {
			return;
		};
		self.command(MOVE_TO, 1);
		self.coordinate(first);
		let count = coordinates.len();
		if count > 0 {
			self.command(LINE_TO, count);
			coordinates.for_each(|c| self.coordinate(c));
		}
	}

	fn points(&mut self, points: &[PointGeometry]) {
		if points.is_empty() {
			return;
		}
		self.command(MOVE_TO, points.len());
		for point in points {
			self.coordinate(&point.0);
		}
	}

	fn line_string(&mut self, line: &LineStringGeometry) {
		if line.0.len() >= 2 {
			self.path(line.0.iter());
		}
	}

	fn polygon(&mut self, polygon: &PolygonGeometry) {
		if polygon.0.first().is_none_or(|outer| outer.0.len() < 4) {
			return;
		}
		for (index, ring) in polygon.0.iter().enumerate() {
			if ring.0.len() < 4 {
				continue;
			}
			let area = ring.signed_area();
			let reverse = if index == 0 { area < 0.0 } else { area > 0.0 };
			// the closing coordinate is implied by ClosePath
			let open = &ring.0[..ring.0.len() - 1];
			if reverse {
				self.path(open.iter().rev());
			} else {
				self.path(open.iter());
			}
			self.command(CLOSE_PATH, 1);
		}
	}

	fn into_blob(self) -> Blob {
		self.writer.into_blob()
	}
}
