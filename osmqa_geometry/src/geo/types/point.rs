use super::{Coordinates, GeometryTrait, MultiPointGeometry, SingleGeometryTrait};
use std::fmt::Debug;

/// A single point, the building block of every other geometry.
#[derive(Clone, PartialEq)]
pub struct PointGeometry(pub Coordinates);

impl PointGeometry {
	#[must_use]
	pub fn new(c: Coordinates) -> Self {
		Self(c)
	}
	#[must_use]
	pub fn x(&self) -> f64 {
		self.0.x()
	}
	#[must_use]
	pub fn y(&self) -> f64 {
		self.0.y()
	}
	#[must_use]
	pub fn as_coord(&self) -> &Coordinates {
		&self.0
	}
}

impl GeometryTrait for PointGeometry {
	fn area(&self) -> f64 {
		0.0
	}

	fn length(&self) -> f64 {
		0.0
	}

	fn verify(&self) -> anyhow::Result<()> {
		Ok(())
	}

	fn has_coordinates(&self) -> bool {
		true
	}

	fn first_coordinate(&self) -> Option<&Coordinates> {
		Some(&self.0)
	}

	fn scale(&self, factor: f64) -> Self {
		PointGeometry(self.0.scale(factor))
	}
}

impl SingleGeometryTrait<MultiPointGeometry> for PointGeometry {
	fn into_multi(self) -> MultiPointGeometry {
		MultiPointGeometry(vec![self])
	}
}

impl Debug for PointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

impl<T> From<T> for PointGeometry
where
	Coordinates: From<T>,
{
	fn from(value: T) -> Self {
		Self(Coordinates::from(value))
	}
}

impl From<&PointGeometry> for ::geo::Point<f64> {
	fn from(value: &PointGeometry) -> Self {
		::geo::Point(::geo::Coord::from(&value.0))
	}
}
