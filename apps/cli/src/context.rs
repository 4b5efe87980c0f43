use std::{future::Future, path::PathBuf, sync::Arc};

use anyhow::Result;
use bs_api::{auth::SessionCookie, RequestConfig, RequestConfigProvider};
use bs_metrics::NumberLocale;
use tracing::{debug, warn};

use crate::config::CliConfig;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
	Human,
	Json,
}

#[derive(Debug, Clone)]
pub struct Context {
	pub format: OutputFormat,
	pub data_dir: PathBuf,
	pub config: CliConfig,
	request: RequestConfig,
}

impl Context {
	/// Loads the stored config; `server` overrides the configured URL for this run
	pub fn load(format: OutputFormat, data_dir: PathBuf, server: Option<String>) -> Result<Self> {
		let config = CliConfig::load(&data_dir)?;
		let server_url = server.unwrap_or_else(|| config.server_url.clone());
		debug!(%server_url, timeout = ?config.timeout(), "Using server");

		let request = RequestConfig::new(server_url, config.timeout())?
			.with_session(config.session.clone());

		Ok(Self {
			format,
			data_dir,
			config,
			request,
		})
	}

	pub fn request(&self) -> RequestConfig {
		self.request.clone()
	}

	pub const fn locale(&self) -> NumberLocale {
		self.config.locale
	}

	pub fn warn_if_logged_out(&self) {
		if self.config.session.is_none() {
			warn!("No stored session, run 'bs auth login' first if the server refuses the request");
		}
	}

	/// Stores (or clears) the session for this and later runs
	pub fn set_session(&mut self, session: Option<SessionCookie>) -> Result<()> {
		self.request.session.clone_from(&session);
		self.config.set_session(session, &self.data_dir)
	}
}

impl RequestConfigProvider for Context {
	fn get_request_config(self: &Arc<Self>) -> impl Future<Output = RequestConfig> + Send {
		let config = self.request();
		async move { config }
	}
}
