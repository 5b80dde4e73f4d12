//! Mapbox Vector Tile (MVT) support.
//!
//! - [`VectorTile`]: the top-level container holding multiple layers.
//! - [`VectorTileLayer`]: one named layer with its key/value tables and extent.
//! - [`VectorTileFeature`]: a feature with tag ids and its encoded command stream, decoded on demand.
//! - [`GeomType`]: the wire-level geometry type.
//!
//! Geometry inside a feature is stored in integer tile-extent units. The `*_pixel_*` helpers
//! convert from and to pixel space, where a tile is [`TILE_SIZE_PIXELS`] wide regardless of extent.

mod feature;
mod geometry_type;
mod layer;
mod property_manager;
mod tile;
mod value;

pub use feature::VectorTileFeature;
pub use geometry_type::GeomType;
pub use layer::VectorTileLayer;
pub use property_manager::{IndexedTable, PropertyManager};
pub use tile::VectorTile;
pub use value::GeoValuePBF;

/// Width and height of a rendered tile in pixels.
pub const TILE_SIZE_PIXELS: f64 = 256.0;

/// Default number of coordinate units per tile edge.
pub const DEFAULT_EXTENT: u32 = 4096;

/// Factor converting extent units into pixels.
#[must_use]
pub fn pixels_per_unit(extent: u32) -> f64 {
	TILE_SIZE_PIXELS / f64::from(extent)
}
