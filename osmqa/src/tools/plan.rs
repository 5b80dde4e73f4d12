use anyhow::Result;
use clap::Args;
use osmqa::{
	config::QaTilesConfig,
	profile::{OsmQaTiles, Profile},
};
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {
	/// YAML configuration file
	#[arg(long, short)]
	config: Option<PathBuf>,

	/// zoom level to generate tiles for, overrides the configuration
	#[arg(long, short)]
	zoom: Option<u8>,

	/// extract to generate tiles from (e.g. "monaco", "planet"), overrides the configuration
	#[arg(long, short)]
	area: Option<String>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let config = QaTilesConfig::load(arguments.config.as_deref())?.with_overrides(
		arguments.zoom,
		arguments.area.as_deref(),
		None,
	)?;
	let profile = OsmQaTiles::new(config.max_zoom());

	println!("profile: {}", profile.name());
	print!("{}", config.plan().to_yaml()?);
	Ok(())
}
