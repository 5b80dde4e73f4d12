use super::{CompositeGeometryTrait, Coordinates, GeometryTrait, MultiPolygonGeometry, RingGeometry, SingleGeometryTrait};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// An outer ring followed by zero or more holes.
#[derive(Clone, PartialEq)]
pub struct PolygonGeometry(pub Vec<RingGeometry>);

impl GeometryTrait for PolygonGeometry {
	/// Area of the outer ring minus the area of all holes, regardless of winding.
	fn area(&self) -> f64 {
		let mut rings = self.0.iter();
		let Some(outer) = rings.next() else {
			return 0.0;
		};
		rings.fold(outer.area(), |area, hole| area - hole.area())
	}

	fn length(&self) -> f64 {
		self.0.iter().map(GeometryTrait::length).sum()
	}

	fn verify(&self) -> Result<()> {
		ensure!(!self.0.is_empty(), "Polygon must have at least one ring");
		for ring in &self.0 {
			ring.verify()?;
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
		PolygonGeometry(self.0.iter().map(|r| r.scale(factor)).collect())
	}
}

impl CompositeGeometryTrait<RingGeometry> for PolygonGeometry {
	fn new() -> Self {
		Self(Vec::new())
	}
	fn as_vec(&self) -> &Vec<RingGeometry> {
		&self.0
	}
	fn as_mut_vec(&mut self) -> &mut Vec<RingGeometry> {
		&mut self.0
	}
	fn into_inner(self) -> Vec<RingGeometry> {
		self.0
	}
}

impl SingleGeometryTrait<MultiPolygonGeometry> for PolygonGeometry {
	fn into_multi(self) -> MultiPolygonGeometry {
		MultiPolygonGeometry(vec![self])
	}
}

impl Debug for PolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(PolygonGeometry, RingGeometry);

impl From<&PolygonGeometry> for ::geo::Polygon<f64> {
	fn from(value: &PolygonGeometry) -> Self {
		let mut rings = value.0.iter().map(::geo::LineString::from);
		let exterior = rings.next().unwrap_or_else(|| ::geo::LineString(Vec::new()));
		::geo::Polygon::new(exterior, rings.collect())
	}
}
