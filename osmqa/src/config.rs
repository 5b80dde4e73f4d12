//! Run configuration, resolved from defaults, an optional YAML file and command line flags.
//!
//! ```yaml
//! zoom: 14
//! area: planet
//! tile_warning_size_mb: 250
//! ```

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::{
	fs::File,
	io::{BufReader, Read},
	path::{Path, PathBuf},
};

/// Highest zoom level tiles are generated for.
pub const MAX_ZOOM_LIMIT: u8 = 15;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct QaTilesConfig {
	/// The single zoom level tiles are generated for.
	pub zoom: u8,

	/// Name of the extract, e.g. `monaco` or `planet`.
	pub area: String,

	/// Tiles larger than this are reported with a warning.
	pub tile_warning_size_mb: u64,
}

impl Default for QaTilesConfig {
	fn default() -> Self {
		QaTilesConfig {
			zoom: 12,
			area: String::from("monaco"),
			tile_warning_size_mb: 100,
		}
	}
}

impl QaTilesConfig {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		let config: QaTilesConfig = serde_yaml_ng::from_reader(reader)?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		let config: QaTilesConfig = serde_yaml_ng::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("Failed to open config file {path:?}"))?;
		QaTilesConfig::from_reader(BufReader::new(file)).with_context(|| format!("Failed to parse config file {path:?}"))
	}

	/// Loads `path` if given, otherwise starts from the defaults.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		match path {
			Some(path) => QaTilesConfig::from_path(path),
			None => Ok(QaTilesConfig::default()),
		}
	}

	/// Applies command line flags on top of the file values.
	pub fn with_overrides(mut self, zoom: Option<u8>, area: Option<&str>, tile_warning_size_mb: Option<u64>) -> Result<Self> {
		if let Some(zoom) = zoom {
			self.zoom = zoom;
		}
		if let Some(area) = area {
			self.area = area.to_string();
		}
		if let Some(size) = tile_warning_size_mb {
			self.tile_warning_size_mb = size;
		}
		self.validate()?;
		Ok(self)
	}

	pub fn validate(&self) -> Result<()> {
		ensure!(
			self.zoom <= MAX_ZOOM_LIMIT,
			"zoom must be between 0 and {MAX_ZOOM_LIMIT}, got {}",
			self.zoom
		);
		ensure!(!self.area.trim().is_empty(), "area must not be empty");
		Ok(())
	}

	pub fn min_zoom(&self) -> u8 {
		self.zoom
	}

	pub fn max_zoom(&self) -> u8 {
		self.zoom
	}

	pub fn source_path(&self) -> PathBuf {
		PathBuf::from("data/sources").join(format!("{}.osm.pbf", self.area))
	}

	/// Where the extract is downloaded from: the latest planet on AWS, or a Geofabrik extract.
	pub fn download_source(&self) -> String {
		if self.area.eq_ignore_ascii_case("planet") {
			String::from("aws:latest")
		} else {
			format!("geofabrik:{}", self.area)
		}
	}

	pub fn output_path(&self) -> PathBuf {
		PathBuf::from("data/qa.mbtiles")
	}

	pub fn plan(&self) -> Plan {
		Plan {
			area: self.area.clone(),
			minzoom: self.min_zoom(),
			maxzoom: self.max_zoom(),
			source: self.source_path().display().to_string(),
			download: self.download_source(),
			output: self.output_path().display().to_string(),
			tile_warning_size_mb: self.tile_warning_size_mb,
		}
	}
}

/// Everything a run would do, with all derived values filled in.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Plan {
	pub area: String,
	pub minzoom: u8,
	pub maxzoom: u8,
	pub source: String,
	pub download: String,
	pub output: String,
	pub tile_warning_size_mb: u64,
}

impl Plan {
	pub fn to_yaml(&self) -> Result<String> {
		Ok(serde_yaml_ng::to_string(self)?)
	}
}
