use std::fmt::Debug;

/// A 2D coordinate. Inside a tile this is measured in pixels (a tile is 256 px wide),
/// inside an encoded vector tile feature in extent units.
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinates([f64; 2]);

impl Coordinates {
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self([x, y])
	}

	#[must_use]
	pub fn x(&self) -> f64 {
		self.0[0]
	}

	#[must_use]
	pub fn y(&self) -> f64 {
		self.0[1]
	}

	#[must_use]
	pub fn scale(&self, factor: f64) -> Self {
		Self([self.0[0] * factor, self.0[1] * factor])
	}

	/// Euclidean distance to `other`.
	#[must_use]
	pub fn distance(&self, other: &Coordinates) -> f64 {
		(other.x() - self.x()).hypot(other.y() - self.y())
	}
}

impl<'a, T> From<&'a [T; 2]> for Coordinates
where
	T: Copy + Into<f64>,
{
	fn from(value: &'a [T; 2]) -> Self {
		Coordinates([value[0].into(), value[1].into()])
	}
}

impl From<[f64; 2]> for Coordinates {
	fn from(value: [f64; 2]) -> Self {
		Coordinates(value)
	}
}

impl From<(f64, f64)> for Coordinates {
	fn from(value: (f64, f64)) -> Self {
		Coordinates([value.0, value.1])
	}
}

impl From<Coordinates> for [f64; 2] {
	fn from(value: Coordinates) -> Self {
		value.0
	}
}

impl From<::geo::Coord<f64>> for Coordinates {
	fn from(value: ::geo::Coord<f64>) -> Self {
		Coordinates([value.x, value.y])
	}
}

impl From<&Coordinates> for ::geo::Coord<f64> {
	fn from(value: &Coordinates) -> Self {
		::geo::Coord {
			x: value.x(),
			y: value.y(),
		}
	}
}

impl Debug for Coordinates {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_and_accessors() {
		let c = Coordinates::new(12.5, 200.0);
		assert_eq!(c.x(), 12.5);
		assert_eq!(c.y(), 200.0);
	}

	#[test]
	fn debug_formats_like_array() {
		assert_eq!(format!("{:?}", Coordinates::new(1.0, 2.0)), "[1.0, 2.0]");
	}

	#[test]
	fn from_integer_array_ref() {
		assert_eq!(Coordinates::from(&[3, 4]), Coordinates::new(3.0, 4.0));
	}

	#[test]
	fn scale_and_distance() {
		let c = Coordinates::new(48.0, 64.0).scale(1.0 / 16.0);
		assert_eq!(c, Coordinates::new(3.0, 4.0));
		assert_eq!(Coordinates::new(0.0, 0.0).distance(&c), 5.0);
	}

	#[test]
	fn geo_coord_conversion() {
		let coord = ::geo::Coord::from(&Coordinates::new(1.0, 2.0));
		assert_eq!(coord, ::geo::Coord { x: 1.0, y: 2.0 });
		assert_eq!(Coordinates::from(coord), Coordinates::new(1.0, 2.0));
	}
}
