use super::{CompositeGeometryTrait, Coordinates, GeometryTrait, PolygonGeometry};
use anyhow::Result;
use std::fmt::Debug;

#[derive(Clone, PartialEq)]
pub struct MultiPolygonGeometry(pub Vec<PolygonGeometry>);

impl GeometryTrait for MultiPolygonGeometry {
	fn area(&self) -> f64 {
		self.0.iter().map(GeometryTrait::area).sum()
	}

	fn length(&self) -> f64 {
		self.0.iter().map(GeometryTrait::length).sum()
	}

	fn verify(&self) -> Result<()> {
		for polygon in &self.0 {
			polygon.verify()?;
		}
		Ok(())
	}

	fn has_coordinates(&self) -> bool {
		self.0.iter().any(GeometryTrait::has_coordinates)
	}

	fn first_coordinate(&self) -> Option<&Coordinates> {
		self.0.iter().find_map(GeometryTrait::first_coordinate)
	}

	fn scale(&self, factor: f64) -> Self {
		MultiPolygonGeometry(self.0.iter().map(|p| p.scale(factor)).collect())
	}
}

impl CompositeGeometryTrait<PolygonGeometry> for MultiPolygonGeometry {
	fn new() -> Self {
		Self(Vec::new())
	}
	fn as_vec(&self) -> &Vec<PolygonGeometry> {
		&self.0
	}
	fn as_mut_vec(&mut self) -> &mut Vec<PolygonGeometry> {
		&mut self.0
	}
	fn into_inner(self) -> Vec<PolygonGeometry> {
		self.0
	}
}

impl Debug for MultiPolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(MultiPolygonGeometry, PolygonGeometry);

impl From<&MultiPolygonGeometry> for ::geo::MultiPolygon<f64> {
	fn from(value: &MultiPolygonGeometry) -> Self {
		::geo::MultiPolygon(value.0.iter().map(::geo::Polygon::from).collect())
	}
}
