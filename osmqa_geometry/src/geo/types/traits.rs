use super::Coordinates;
use anyhow::Result;
use std::fmt::Debug;

/// Defines the basic interface for geometric primitives, providing common functionality
/// for all geometry types.
pub trait GeometryTrait: Debug + Clone + Sized {
	/// Returns the unsigned area. Holes are subtracted; points and lines have no area.
	fn area(&self) -> f64;

	/// Returns the total Euclidean length. For areas this is the perimeter of all rings.
	fn length(&self) -> f64;

	/// Verifies the geometric validity of the geometry.
	/// For example, checks if there are enough points or if polygons are properly closed.
	fn verify(&self) -> Result<()>;

	/// Returns `true` if the geometry contains at least one coordinate.
	fn has_coordinates(&self) -> bool;

	/// Returns the first coordinate in encoding order, if any.
	fn first_coordinate(&self) -> Option<&Coordinates>;

	/// Multiplies every coordinate by `factor`.
	fn scale(&self, factor: f64) -> Self;
}

/// Represents geometries that can be wrapped into a corresponding multi-geometry.
pub trait SingleGeometryTrait<Multi>: Debug + Clone {
	fn into_multi(self) -> Multi;
}

/// Represents composite geometries that are collections of simpler elements.
/// For example, a polygon is made of rings, and a multilinestring is made of lines.
pub trait CompositeGeometryTrait<Item>: Debug + Clone {
	fn new() -> Self;

	fn as_vec(&self) -> &Vec<Item>;

	fn as_mut_vec(&mut self) -> &mut Vec<Item>;

	fn into_inner(self) -> Vec<Item>;

	fn into_iter(self) -> impl Iterator<Item = Item> {
		self.into_inner().into_iter()
	}

	fn is_empty(&self) -> bool {
		self.as_vec().is_empty()
	}

	fn len(&self) -> usize {
		self.as_vec().len()
	}

	fn push(&mut self, item: Item) {
		self.as_mut_vec().push(item);
	}

	fn first(&self) -> Option<&Item> {
		self.as_vec().first()
	}
}
