use super::{CompositeGeometryTrait, Coordinates, GeometryTrait, PointGeometry};
use anyhow::Result;
use std::fmt::Debug;

#[derive(Clone, PartialEq)]
pub struct MultiPointGeometry(pub Vec<PointGeometry>);

impl GeometryTrait for MultiPointGeometry {
	fn area(&self) -> f64 {
		0.0
	}

	fn length(&self) -> f64 {
		0.0
	}

	fn verify(&self) -> Result<()> {
		Ok(())
	}

	fn has_coordinates(&self) -> bool {
		!self.0.is_empty()
	}

	fn first_coordinate(&self) -> Option<&Coordinates> {
		self.0.first().map(PointGeometry::as_coord)
	}

	fn scale(&self, factor: f64) -> Self {
		MultiPointGeometry(self.0.iter().map(|p| p.scale(factor)).collect())
	}
}

impl CompositeGeometryTrait<PointGeometry> for MultiPointGeometry {
	fn new() -> Self {
		Self(Vec::new())
	}
	fn as_vec(&self) -> &Vec<PointGeometry> {
		&self.0
	}
	fn as_mut_vec(&mut self) -> &mut Vec<PointGeometry> {
		&mut self.0
	}
	fn into_inner(self) -> Vec<PointGeometry> {
		self.0
	}
}

impl Debug for MultiPointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(MultiPointGeometry, PointGeometry);

impl From<&MultiPointGeometry> for ::geo::MultiPoint<f64> {
	fn from(value: &MultiPointGeometry) -> Self {
		::geo::MultiPoint(value.0.iter().map(::geo::Point::from).collect())
	}
}
