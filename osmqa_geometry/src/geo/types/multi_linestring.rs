use super::{CompositeGeometryTrait, Coordinates, GeometryTrait, LineStringGeometry};
use anyhow::Result;
use std::fmt::Debug;

#[derive(Clone, PartialEq)]
pub struct MultiLineStringGeometry(pub Vec<LineStringGeometry>);

impl GeometryTrait for MultiLineStringGeometry {
	fn area(&self) -> f64 {
		0.0
	}

	fn length(&self) -> f64 {
		self.0.iter().map(GeometryTrait::length).sum()
	}

	fn verify(&self) -> Result<()> {
		for line in &self.0 {
			line.verify()?;
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
		MultiLineStringGeometry(self.0.iter().map(|l| l.scale(factor)).collect())
	}
}

impl CompositeGeometryTrait<LineStringGeometry> for MultiLineStringGeometry {
	fn new() -> Self {
		Self(Vec::new())
	}
	fn as_vec(&self) -> &Vec<LineStringGeometry> {
		&self.0
	}
	fn as_mut_vec(&mut self) -> &mut Vec<LineStringGeometry> {
		&mut self.0
	}
	fn into_inner(self) -> Vec<LineStringGeometry> {
		self.0
	}
}

impl Debug for MultiLineStringGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(MultiLineStringGeometry, LineStringGeometry);

impl From<&MultiLineStringGeometry> for ::geo::MultiLineString<f64> {
	fn from(value: &MultiLineStringGeometry) -> Self {
		::geo::MultiLineString(value.0.iter().map(::geo::LineString::from).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn length_sums_parts() {
		let lines = MultiLineStringGeometry::from(&[[[0, 0], [0, 1]], [[5, 5], [5, 6]]]);
		assert_eq!(lines.length(), 2.0);
		assert_eq!(lines.first_coordinate(), Some(&Coordinates::new(0.0, 0.0)));
	}

	#[test]
	fn verify_checks_every_part() {
		let lines = MultiLineStringGeometry(vec![
			LineStringGeometry::from(&[[0, 0], [1, 1]]),
			LineStringGeometry::from(&[[2, 2]]),
		]);
		assert!(lines.verify().is_err());
	}
}
