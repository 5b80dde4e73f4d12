use anyhow::{Context, Result};
use clap::Args;
use log::info;
use osmqa::{
	config::QaTilesConfig,
	core::Blob,
	geometry::vector_tile::VectorTile,
	profile::OsmQaTiles,
	render::{check_tile_size, post_process_tile},
};
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// uncompressed Mapbox vector tile (*.pbf, *.mvt)
	#[arg(required = true)]
	input: PathBuf,

	/// where to write the generalized tile
	#[arg(required = true)]
	output: PathBuf,

	/// zoom level of the tile
	#[arg(long, short, required = true)]
	zoom: u8,

	/// zoom level at which features are kept unchanged, defaults to the configured zoom
	#[arg(long)]
	max_zoom: Option<u8>,

	/// warn if the generalized tile is larger than this many megabytes
	#[arg(long)]
	tile_warning_size_mb: Option<u64>,

	/// YAML configuration file
	#[arg(long, short)]
	config: Option<PathBuf>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let config = QaTilesConfig::load(arguments.config.as_deref())?.with_overrides(
		arguments.max_zoom,
		None,
		arguments.tile_warning_size_mb,
	)?;
	let profile = OsmQaTiles::new(config.max_zoom());

	let input = Blob::load_from_file(&arguments.input)?;
	let mut tile =
		VectorTile::from_blob(&input).with_context(|| format!("Failed to decode vector tile {:?}", arguments.input))?;
	let count_before: usize = tile.layers.iter().map(|layer| layer.features.len()).sum();

	post_process_tile(&profile, arguments.zoom, &mut tile)?;

	let output = tile.to_blob();
	check_tile_size(&output, config.tile_warning_size_mb);
	output.save_to_file(&arguments.output)?;

	let count_after: usize = tile.layers.iter().map(|layer| layer.features.len()).sum();
	info!(
		"generalized {:?} at zoom {} (max zoom {}): {count_before} -> {count_after} features, {} -> {} bytes",
		arguments.input,
		arguments.zoom,
		profile.max_zoom(),
		input.len(),
		output.len()
	);
	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::tests::run_command;
	use osmqa::{
		core::Blob,
		geometry::{GeoFeature, Geometry, vector_tile::VectorTile},
		profile::OsmQaTiles,
		render::render_layer,
	};

	fn write_tile(path: &std::path::Path) {
		let features = (0..5)
			.map(|id| {
				let mut feature = GeoFeature::new(Geometry::new_point([4.0, 4.0]));
				feature.set_id(id);
				feature
			})
			.collect();
		let layer = render_layer(&OsmQaTiles::new(14), "osm", 14, features, 4096).unwrap();
		VectorTile::new(vec![layer]).to_blob().save_to_file(path).unwrap();
	}

	#[test]
	fn generalize_file() {
		let dir = tempfile::tempdir().unwrap();
		let input = dir.path().join("in.pbf");
		let output = dir.path().join("out.pbf");
		write_tile(&input);

		run_command(vec![
			"osmqa",
			"generalize",
			"-q",
			input.to_str().unwrap(),
			output.to_str().unwrap(),
			"--zoom",
			"12",
			"--max-zoom",
			"14",
		])
		.unwrap();

		let tile = VectorTile::from_blob(&Blob::load_from_file(&output).unwrap()).unwrap();
		assert_eq!(tile.layers[0].features.len(), 3);
	}

	#[test]
	fn invalid_input() {
		let dir = tempfile::tempdir().unwrap();
		let input = dir.path().join("in.pbf");
		Blob::from(&[0xff, 0xff]).save_to_file(&input).unwrap();
		let output = dir.path().join("out.pbf");

		let err = run_command(vec![
			"osmqa",
			"generalize",
			input.to_str().unwrap(),
			output.to_str().unwrap(),
			"-z",
			"3",
		])
		.unwrap_err();
		assert!(err.to_string().starts_with("Failed to decode vector tile"), "{err}");
		assert!(!output.exists());
	}
}
