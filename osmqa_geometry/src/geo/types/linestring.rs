use super::{CompositeGeometryTrait, Coordinates, GeometryTrait, MultiLineStringGeometry, SingleGeometryTrait};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// An open path through two or more coordinates.
#[derive(Clone, PartialEq)]
pub struct LineStringGeometry(pub Vec<Coordinates>);

impl GeometryTrait for LineStringGeometry {
	fn area(&self) -> f64 {
		0.0
	}

	/// Sum of the Euclidean lengths of all segments.
	fn length(&self) -> f64 {
		self.0.windows(2).map(|w| w[0].distance(&w[1])).sum()
	}

	fn verify(&self) -> Result<()> {
		ensure!(self.0.len() >= 2, "LineString must have at least 2 points");
		Ok(())
	}

	fn has_coordinates(&self) -> bool {
		!self.0.is_empty()
	}

	fn first_coordinate(&self) -> Option<&Coordinates> {
		self.0.first()
	}

	fn scale(&self, factor: f64) -> Self {
		LineStringGeometry(self.0.iter().map(|c| c.scale(factor)).collect())
	}
}

impl CompositeGeometryTrait<Coordinates> for LineStringGeometry {
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

impl SingleGeometryTrait<MultiLineStringGeometry> for LineStringGeometry {
	fn into_multi(self) -> MultiLineStringGeometry {
		MultiLineStringGeometry(vec![self])
	}
}

impl Debug for LineStringGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(LineStringGeometry, Coordinates);

impl From<&LineStringGeometry> for ::geo::LineString<f64> {
	fn from(value: &LineStringGeometry) -> Self {
		::geo::LineString(value.0.iter().map(::geo::Coord::from).collect())
	}
}
