use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets::UTF8_BORDERS_ONLY, Table};

use crate::config::{CliConfig, KEYS};

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
	/// Show all configuration
	Show,
	/// Get a configuration value
	Get {
		/// Configuration key (e.g., "server_url", "locale")
		key: String,
	},
	/// Set a configuration value
	Set {
		/// Configuration key
		key: String,
		/// Configuration value
		value: String,
	},
}

pub fn run(data_dir: &Path, cmd: ConfigCmd) -> Result<()> {
	let mut config = CliConfig::load(data_dir)?;

	match cmd {
		ConfigCmd::Show => {
			let mut table = Table::new();
			table.load_preset(UTF8_BORDERS_ONLY);
			table.set_header(vec!["Key", "Value"]);

			for key in KEYS {
				table.add_row(vec![key.to_string(), config.get(key)?]);
			}

			println!("{table}");
			println!();
			println!("Config file: {}", CliConfig::config_path(data_dir).display());
		}
		ConfigCmd::Get { key } => println!("{}", config.get(&key)?),
		ConfigCmd::Set { key, value } => {
			config.set(&key, &value)?;
			config.save(data_dir)?;
			println!("Set {key} = {}", config.get(&key)?);
		}
	}

	Ok(())
}
