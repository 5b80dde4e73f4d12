// Geometric primitives in tile pixel space: `PointGeometry`, `LineStringGeometry`, `PolygonGeometry`
// and their multi-geometry counterparts. All of them implement `GeometryTrait` for the measures used
// when generalizing tiles (area, length) and for scaling between pixel and tile-extent units.

mod coordinates;
mod linestring;
mod macros;
mod multi_linestring;
mod multi_point;
mod multi_polygon;
mod point;
mod polygon;
mod ring;
mod traits;

pub use coordinates::*;
pub use linestring::*;
pub use multi_linestring::*;
pub use multi_point::*;
pub use multi_polygon::*;
pub use point::*;
pub use polygon::*;
pub use ring::*;
pub use traits::*;
