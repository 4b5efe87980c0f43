//! CLI configuration, stored as `cli.json` in the data directory

use std::{
	path::{Path, PathBuf},
	time::Duration,
};

use anyhow::{anyhow, bail, Context as _, Result};
use bs_api::{auth::SessionCookie, feature_access::DEFAULT_UPDATE_PATH};
use bs_metrics::NumberLocale;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Keys accepted by `bs config get` and `bs config set`
pub const KEYS: [&str; 5] = [
	"server_url",
	"locale",
	"timeout_secs",
	"feature_access_path",
	"session",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
	/// Base URL of the battlestats server
	pub server_url: String,
	/// Locale used to group digits when showing and reading numbers
	pub locale: NumberLocale,
	/// Upper bound for every request, in seconds
	pub timeout_secs: u64,
	/// Endpoint receiving the feature access matrix
	pub feature_access_path: String,
	/// Cookie captured at login
	pub session: Option<SessionCookie>,
}

impl Default for CliConfig {
	fn default() -> Self {
		Self {
			server_url: DEFAULT_SERVER_URL.to_string(),
			locale: NumberLocale::default(),
			timeout_secs: DEFAULT_TIMEOUT_SECS,
			feature_access_path: DEFAULT_UPDATE_PATH.to_string(),
			session: None,
		}
	}
}

pub fn default_data_dir() -> Result<PathBuf> {
	dirs::config_dir()
		.map(|dir| dir.join("battlestats"))
		.ok_or_else(|| anyhow!("Could not find a config directory, pass --data-dir"))
}

impl CliConfig {
	pub fn config_path(data_dir: &Path) -> PathBuf {
		data_dir.join("cli.json")
	}

	/// Loads the config, writing the defaults on first use
	pub fn load(data_dir: &Path) -> Result<Self> {
		let config_path = Self::config_path(data_dir);

		if config_path.exists() {
			let json = std::fs::read_to_string(&config_path)
				.with_context(|| format!("Failed to read {}", config_path.display()))?;
			serde_json::from_str(&json)
				.with_context(|| format!("Invalid config file {}", config_path.display()))
		} else {
			debug!(path = %config_path.display(), "Creating default config");
			let config = Self::default();
			config.save(data_dir)?;
			Ok(config)
		}
	}

	pub fn save(&self, data_dir: &Path) -> Result<()> {
		std::fs::create_dir_all(data_dir)?;

		let config_path = Self::config_path(data_dir);
		let json = serde_json::to_string_pretty(self)?;
		std::fs::write(&config_path, json)
			.with_context(|| format!("Failed to write {}", config_path.display()))
	}

	pub const fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}

	pub fn get(&self, key: &str) -> Result<String> {
		Ok(match key {
			"server_url" => self.server_url.clone(),
			"locale" => self.locale.to_string(),
			"timeout_secs" => self.timeout_secs.to_string(),
			"feature_access_path" => self.feature_access_path.clone(),
			"session" => String::from(if self.session.is_some() {
				"(logged in)"
			} else {
				"(not set)"
			}),
			_ => bail!("Unknown config key: {key}"),
		})
	}

	pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
		match key {
			"server_url" => {
				if !(value.starts_with("http://") || value.starts_with("https://")) {
					bail!("server_url must start with http:// or https://");
				}
				self.server_url = value.trim_end_matches('/').to_string();
			}
			"locale" => self.locale = value.parse()?,
			"timeout_secs" => {
				let secs = value
					.parse::<u64>()
					.with_context(|| format!("'{value}' is not a number of seconds"))?;
				if secs == 0 {
					bail!("timeout_secs must be at least 1");
				}
				self.timeout_secs = secs;
			}
			"feature_access_path" => {
				self.feature_access_path = format!("/{}", value.trim_start_matches('/'));
			}
			"session" => bail!("The session is managed by 'bs auth login' and 'bs auth logout'"),
			_ => bail!("Cannot set key: {key}"),
		}

		Ok(())
	}

	pub fn set_session(&mut self, session: Option<SessionCookie>, data_dir: &Path) -> Result<()> {
		self.session = session;
		self.save(data_dir)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use pretty_assertions::assert_eq;
	use tempfile::tempdir;

	#[test]
	fn first_load_writes_defaults() {
		let dir = tempdir().unwrap();

		let config = CliConfig::load(dir.path()).unwrap();

		assert_eq!(config, CliConfig::default());
		assert!(CliConfig::config_path(dir.path()).exists());
	}

	#[test]
	fn saved_values_survive_reload() {
		let dir = tempdir().unwrap();
		let mut config = CliConfig::load(dir.path()).unwrap();

		config.set("locale", "de_de").unwrap();
		config.set("server_url", "https://stats.example.com/").unwrap();
		config.set("feature_access_path", "admin/access").unwrap();
		config
			.set_session(Some(SessionCookie::new("session=abc")), dir.path())
			.unwrap();

		let reloaded = CliConfig::load(dir.path()).unwrap();

		assert_eq!(reloaded, config);
		assert_eq!(reloaded.locale, NumberLocale::DE_DE);
		assert_eq!(reloaded.get("server_url").unwrap(), "https://stats.example.com");
		assert_eq!(reloaded.get("feature_access_path").unwrap(), "/admin/access");
		assert_eq!(reloaded.get("session").unwrap(), "(logged in)");
	}

	#[test]
	fn older_files_fill_missing_keys() {
		let dir = tempdir().unwrap();
		std::fs::write(
			CliConfig::config_path(dir.path()),
			r#"{ "server_url": "http://battle.local" }"#,
		)
		.unwrap();

		let config = CliConfig::load(dir.path()).unwrap();

		assert_eq!(config.server_url, "http://battle.local");
		assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
		assert_eq!(config.session, None);
	}

	#[test]
	fn bad_values_are_refused() {
		let mut config = CliConfig::default();

		assert!(config.set("locale", "xx-XX").is_err());
		assert!(config.set("timeout_secs", "0").is_err());
		assert!(config.set("timeout_secs", "soon").is_err());
		assert!(config.set("server_url", "ftp://nope").is_err());
		assert!(config.set("session", "session=forged").is_err());
		assert!(config.get("colour").is_err());
		assert_eq!(config, CliConfig::default());

		for key in KEYS {
			assert!(config.get(key).is_ok(), "{key}");
		}
	}
}
