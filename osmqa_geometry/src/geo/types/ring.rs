use super::{CompositeGeometryTrait, Coordinates, GeometryTrait};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// A closed loop of coordinates; the first and last points must be identical.
///
/// Rings are the building blocks of polygons. The orientation of a ring is given by the sign
/// of [`RingGeometry::signed_area`]: outer rings are positive, holes are negative.
#[derive(Clone, PartialEq)]
pub struct RingGeometry(pub Vec<Coordinates>);

impl RingGeometry {
	/// Shoelace area of the ring. The sign encodes the winding order.
	#[must_use]
	pub fn signed_area(&self) -> f64 {
		let mut sum = 0f64;
		if let Some(mut p2) = self.0.last() {
			for p1 in &self.0 {
				sum += (p2.x() - p1.x()) * (p1.y() + p2.y());
				p2 = p1;
			}
		}
		sum / 2.0
	}

	/// Reverses the winding order in place.
	pub fn reverse(&mut self) {
		self.0.reverse();
	}
}

impl GeometryTrait for RingGeometry {
	fn area(&self) -> f64 {
		self.signed_area().abs()
	}

	/// Perimeter of the ring.
	fn length(&self) -> f64 {
		self.0.windows(2).map(|w| w[0].distance(&w[1])).sum()
	}

	/// A valid ring has at least 4 coordinates (3 distinct points plus the closing one) and is closed.
	fn verify(&self) -> Result<()> {
		ensure!(self.0.len() >= 4, "Ring must have at least 4 points");
		ensure!(self.0.first() == self.0.last(), "Ring must be closed");
		Ok(())
	}

	fn has_coordinates(&self) -> bool {
		!self.0.is_empty()
	}

	fn first_coordinate(&self) -> Option<&Coordinates> {
		self.0.first()
	}

	fn scale(&self, factor: f64) -> Self {
		RingGeometry(self.0.iter().map(|c| c.scale(factor)).collect())
	}
}

impl CompositeGeometryTrait<Coordinates> for RingGeometry {
	fn new() -> Self {
		Self(Vec::new())
	}
	fn as_vec(&self) -> &Vec<Coordinates> {
		&self.0
	}
	fn as_mut_vec(&mut self) -> &mut Vec<Coordinates> {
		&mut self.0
	}
	fn into_inner(self) -> Vec<Coordinates> {
		self.0
	}
}

impl Debug for RingGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(RingGeometry, Coordinates);

impl From<&RingGeometry> for ::geo::LineString<f64> {
	fn from(value: &RingGeometry) -> Self {
		::geo::LineString(value.0.iter().map(::geo::Coord::from).collect())
	}
}
