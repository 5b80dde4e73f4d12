//! OSM QA tiles: a raw copy of OpenStreetMap data in a single `osm` layer, generalized below the
//! maximum zoom level.
//!
//! - [`generalize`]: the per-layer generalization pass (centroid collapse and point density cap).
//! - [`profile`]: the [`Profile`](profile::Profile) trait and the [`OsmQaTiles`](profile::OsmQaTiles) profile.
//! - [`render`]: turns collected features into layers and tiles, running the post-processing.
//! - [`osm`]: source features as handed to a profile.
//! - [`config`]: run configuration from defaults, YAML and command line.

pub mod config;
pub mod generalize;
pub mod osm;
pub mod profile;
pub mod render;

pub use osmqa_core as core;
pub use osmqa_geometry as geometry;
