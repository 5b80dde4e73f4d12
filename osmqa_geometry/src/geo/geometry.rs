use super::*;
use ::geo::Centroid;
use anyhow::Result;
use std::fmt::{Debug, Display};

/// The kind of a [`Geometry`], without its coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
	Point,
	LineString,
	Polygon,
	MultiPoint,
	MultiLineString,
	MultiPolygon,
	GeometryCollection,
}

impl Display for GeometryKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			GeometryKind::Point => "Point",
			GeometryKind::LineString => "LineString",
			GeometryKind::Polygon => "Polygon",
			GeometryKind::MultiPoint => "MultiPoint",
			GeometryKind::MultiLineString => "MultiLineString",
			GeometryKind::MultiPolygon => "MultiPolygon",
			GeometryKind::GeometryCollection => "GeometryCollection",
		})
	}
}

#[derive(Clone, PartialEq)]
pub enum Geometry {
	Point(PointGeometry),
	LineString(LineStringGeometry),
	Polygon(PolygonGeometry),
	MultiPoint(MultiPointGeometry),
	MultiLineString(MultiLineStringGeometry),
	MultiPolygon(MultiPolygonGeometry),
	GeometryCollection(Vec<Geometry>),
}

impl Geometry {
	pub fn new_point(value: [f64; 2]) -> Self {
		Self::Point(PointGeometry::from(value))
	}
	pub fn new_line_string(value: Vec<[f64; 2]>) -> Self {
		Self::LineString(LineStringGeometry::from(value))
	}
	pub fn new_polygon(value: Vec<Vec<[f64; 2]>>) -> Self {
		Self::Polygon(PolygonGeometry::from(value))
	}
	pub fn new_multi_point(value: Vec<[f64; 2]>) -> Self {
		Self::MultiPoint(MultiPointGeometry::from(value))
	}
	pub fn new_multi_line_string(value: Vec<Vec<[f64; 2]>>) -> Self {
		Self::MultiLineString(MultiLineStringGeometry::from(value))
	}
	pub fn new_multi_polygon(value: Vec<Vec<Vec<[f64; 2]>>>) -> Self {
		Self::MultiPolygon(MultiPolygonGeometry::from(value))
	}

	pub fn kind(&self) -> GeometryKind {
		match self {
			Geometry::Point(_) => GeometryKind::Point,
			Geometry::LineString(_) => GeometryKind::LineString,
			Geometry::Polygon(_) => GeometryKind::Polygon,
			Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
			Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
			Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
			Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
		}
	}

	/// A geometry is empty when it holds no coordinate at all.
	pub fn is_empty(&self) -> bool {
		match self {
			Geometry::Point(_) => false,
			Geometry::LineString(g) => !g.has_coordinates(),
			Geometry::Polygon(g) => !g.has_coordinates(),
			Geometry::MultiPoint(g) => !g.has_coordinates(),
			Geometry::MultiLineString(g) => !g.has_coordinates(),
			Geometry::MultiPolygon(g) => !g.has_coordinates(),
			Geometry::GeometryCollection(c) => c.iter().all(Geometry::is_empty),
		}
	}

	/// Unsigned area, holes subtracted. Zero for points and lines.
	pub fn area(&self) -> f64 {
		match self {
			Geometry::Point(g) => g.area(),
			Geometry::LineString(g) => g.area(),
			Geometry::Polygon(g) => g.area(),
			Geometry::MultiPoint(g) => g.area(),
			Geometry::MultiLineString(g) => g.area(),
			Geometry::MultiPolygon(g) => g.area(),
			Geometry::GeometryCollection(c) => c.iter().map(Geometry::area).sum(),
		}
	}

	/// Total length of all lines, or the perimeter of all rings for areas.
	pub fn length(&self) -> f64 {
		match self {
			Geometry::Point(g) => g.length(),
			Geometry::LineString(g) => g.length(),
			Geometry::Polygon(g) => g.length(),
			Geometry::MultiPoint(g) => g.length(),
			Geometry::MultiLineString(g) => g.length(),
			Geometry::MultiPolygon(g) => g.length(),
			Geometry::GeometryCollection(c) => c.iter().map(Geometry::length).sum(),
		}
	}

	/// Center of mass, weighted by the highest dimension present in the geometry.
	///
	/// Returns `None` for empty geometries.
	pub fn centroid(&self) -> Option<PointGeometry> {
		self
			.to_geo()
			.centroid()
			.map(|point| PointGeometry(Coordinates::from(point.0)))
	}

	pub fn first_coordinate(&self) -> Option<&Coordinates> {
		match self {
			Geometry::Point(g) => g.first_coordinate(),
			Geometry::LineString(g) => g.first_coordinate(),
			Geometry::Polygon(g) => g.first_coordinate(),
			Geometry::MultiPoint(g) => g.first_coordinate(),
			Geometry::MultiLineString(g) => g.first_coordinate(),
			Geometry::MultiPolygon(g) => g.first_coordinate(),
			Geometry::GeometryCollection(c) => c.iter().find_map(Geometry::first_coordinate),
		}
	}

	/// Multiplies every coordinate by `factor`.
	#[must_use]
	pub fn scale(&self, factor: f64) -> Self {
		match self {
			Geometry::Point(g) => Geometry::Point(g.scale(factor)),
			Geometry::LineString(g) => Geometry::LineString(g.scale(factor)),
			Geometry::Polygon(g) => Geometry::Polygon(g.scale(factor)),
			Geometry::MultiPoint(g) => Geometry::MultiPoint(g.scale(factor)),
			Geometry::MultiLineString(g) => Geometry::MultiLineString(g.scale(factor)),
			Geometry::MultiPolygon(g) => Geometry::MultiPolygon(g.scale(factor)),
			Geometry::GeometryCollection(c) => Geometry::GeometryCollection(c.iter().map(|g| g.scale(factor)).collect()),
		}
	}

	pub fn into_multi(self) -> Self {
		match self {
			Geometry::Point(g) => Geometry::MultiPoint(g.into_multi()),
			Geometry::LineString(g) => Geometry::MultiLineString(g.into_multi()),
			Geometry::Polygon(g) => Geometry::MultiPolygon(g.into_multi()),
			Geometry::MultiPoint(_)
			| Geometry::MultiLineString(_)
			| Geometry::MultiPolygon(_)
			| Geometry::GeometryCollection(_) => self,
		}
	}

	pub fn verify(&self) -> Result<()> {
		match self {
			Geometry::Point(g) => g.verify(),
			Geometry::LineString(g) => g.verify(),
			Geometry::Polygon(g) => g.verify(),
			Geometry::MultiPoint(g) => g.verify(),
			Geometry::MultiLineString(g) => g.verify(),
			Geometry::MultiPolygon(g) => g.verify(),
			Geometry::GeometryCollection(c) => c.iter().try_for_each(Geometry::verify),
		}
	}

	pub fn to_geo(&self) -> ::geo::Geometry<f64> {
		match self {
			Geometry::Point(g) => ::geo::Geometry::Point(g.into()),
			Geometry::LineString(g) => ::geo::Geometry::LineString(g.into()),
			Geometry::Polygon(g) => ::geo::Geometry::Polygon(g.into()),
			Geometry::MultiPoint(g) => ::geo::Geometry::MultiPoint(g.into()),
			Geometry::MultiLineString(g) => ::geo::Geometry::MultiLineString(g.into()),
			Geometry::MultiPolygon(g) => ::geo::Geometry::MultiPolygon(g.into()),
			Geometry::GeometryCollection(c) => {
				::geo::Geometry::GeometryCollection(::geo::GeometryCollection(c.iter().map(Geometry::to_geo).collect()))
			}
		}
	}
}

impl From<PointGeometry> for Geometry {
	fn from(value: PointGeometry) -> Self {
		Geometry::Point(value)
	}
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let kind = self.kind().to_string();
		let inner: &dyn Debug = match self {
			Geometry::Point(g) => g,
			Geometry::LineString(g) => g,
			Geometry::Polygon(g) => g,
			Geometry::MultiPoint(g) => g,
			Geometry::MultiLineString(g) => g,
			Geometry::MultiPolygon(g) => g,
			Geometry::GeometryCollection(c) => c,
		};
		f.debug_tuple(&kind).field(inner).finish()
	}
}
