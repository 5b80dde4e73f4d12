use crate::geo::{Geometry, GeometryKind};
use anyhow::{Result, bail};

/// Geometry type as written to field 3 of an MVT feature.
///
/// The wire format knows no single geometries: a `MultiPoint` feature may hold one point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GeomType {
	#[default]
	Unknown = 0,
	MultiPoint = 1,
	MultiLineString = 2,
	MultiPolygon = 3,
}

impl GeomType {
	pub fn as_u64(&self) -> u64 {
		*self as u64
	}

	/// `true` for the wire type that carries points.
	pub fn is_point(&self) -> bool {
		*self == GeomType::MultiPoint
	}
}

impl From<u64> for GeomType {
	fn from(value: u64) -> Self {
		match value {
			1 => GeomType::MultiPoint,
			2 => GeomType::MultiLineString,
			3 => GeomType::MultiPolygon,
			_ => GeomType::Unknown,
		}
	}
}

impl TryFrom<GeometryKind> for GeomType {
	type Error = anyhow::Error;

	fn try_from(kind: GeometryKind) -> Result<Self> {
		Ok(match kind {
			GeometryKind::Point | GeometryKind::MultiPoint => GeomType::MultiPoint,
			GeometryKind::LineString | GeometryKind::MultiLineString => GeomType::MultiLineString,
			GeometryKind::Polygon | GeometryKind::MultiPolygon => GeomType::MultiPolygon,
			GeometryKind::GeometryCollection => bail!("a {kind} can not be encoded as a single vector tile feature"),
		})
	}
}

impl TryFrom<&Geometry> for GeomType {
	type Error = anyhow::Error;

	fn try_from(geometry: &Geometry) -> Result<Self> {
		GeomType::try_from(geometry.kind())
	}
}
