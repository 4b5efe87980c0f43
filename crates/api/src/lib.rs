pub mod auth;
pub mod feature_access;

use std::{collections::HashMap, future::Future, sync::Arc, time::Duration};

use auth::SessionCookie;
use reqwest::{header::COOKIE, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RequestConfig {
	pub client: reqwest::Client,
	pub api_url: String,
	pub session: Option<SessionCookie>,
}

impl RequestConfig {
	pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
		let client = reqwest::Client::builder().timeout(timeout).build()?;
		let api_url = api_url.into().trim_end_matches('/').to_string();

		Ok(Self {
			client,
			api_url,
			session: None,
		})
	}

	#[must_use]
	pub fn with_session(mut self, session: Option<SessionCookie>) -> Self {
		self.session = session;
		self
	}
}

pub trait RequestConfigProvider {
	fn get_request_config(self: &Arc<Self>) -> impl Future<Output = RequestConfig> + Send;
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("request failed: {0}")]
	Transport(#[from] reqwest::Error),
	#[error("{}", join_details(.message, .details.as_deref()))]
	Remote {
		status: StatusCode,
		message: String,
		details: Option<String>,
	},
	#[error("server answered {0}")]
	Status(StatusCode),
	#[error("unexpected response: {0}")]
	Decode(String),
}

impl Error {
	#[must_use]
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Transport(e) if e.is_timeout())
	}
}

fn join_details(message: &str, details: Option<&str>) -> String {
	match details {
		Some(details) if !details.is_empty() => format!("{message}: {details}"),
		_ => message.to_string(),
	}
}

trait WithSession {
	fn with_session(self, session: Option<&SessionCookie>) -> Self;
}

impl WithSession for reqwest::RequestBuilder {
	fn with_session(self, session: Option<&SessionCookie>) -> Self {
		match session {
			Some(session) => self.header(COOKIE, session.as_str()),
			None => self,
		}
	}
}

#[derive(Deserialize)]
struct ErrorBody {
	error: Option<String>,
	details: Option<String>,
}

#[derive(Deserialize)]
struct MessageBody {
	message: Option<String>,
}

/// Reads a JSON reply, turning an `error` field or a failure status into
/// [`Error::Remote`].
async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, Error> {
	let status = res.status();
	let bytes = res.bytes().await?;

	let body = serde_json::from_slice::<Value>(&bytes).ok();

	if let Some(ErrorBody {
		error: Some(message),
		details,
	}) = body
		.as_ref()
		.and_then(|body| ErrorBody::deserialize(body).ok())
	{
		return Err(Error::Remote {
			status,
			message,
			details,
		});
	}

	if !status.is_success() {
		return Err(Error::Status(status));
	}

	let body = body.ok_or_else(|| Error::Decode("body is not JSON".to_string()))?;
	serde_json::from_value(body).map_err(|e| Error::Decode(e.to_string()))
}

async fn read_message(res: reqwest::Response, fallback: &str) -> Result<String, Error> {
	read_json::<MessageBody>(res)
		.await
		.map(|body| body.message.unwrap_or_else(|| fallback.to_string()))
}

pub mod stats {
	use super::*;

	pub use get::exec as get;
	pub mod get {
		use super::*;

		/// Raw `/stats` body, metric key to bare number or `{current, previous}`
		pub type Response = HashMap<String, Value>;

		pub async fn exec(config: RequestConfig) -> Result<Response, Error> {
			let url = format!("{}/stats", config.api_url);
			debug!(%url, "Fetching stats");

			let res = config
				.client
				.get(&url)
				.with_session(config.session.as_ref())
				.send()
				.await?;

			read_json(res).await
		}
	}

	pub use update::exec as update;
	pub mod update {
		use super::*;

		use bs_metrics::EditedMetrics;

		pub async fn exec(config: RequestConfig, stats: &EditedMetrics) -> Result<String, Error> {
			let url = format!("{}/stats", config.api_url);
			debug!(%url, count = stats.len(), "Submitting stats");

			let res = config
				.client
				.post(&url)
				.json(stats)
				.with_session(config.session.as_ref())
				.send()
				.await?;

			read_message(res, "Stats updated").await
		}
	}
}

pub mod faction {
	use super::*;

	pub use create::exec as create;
	pub mod create {
		use super::*;

		#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
		pub struct Response {
			pub message: Option<String>,
			pub invitation_code: String,
		}

		impl Response {
			#[must_use]
			pub fn confirmation(&self) -> String {
				format!(
					"Faction created successfully. Invitation code: {}",
					self.invitation_code
				)
			}
		}

		pub async fn exec(config: RequestConfig, name: &str) -> Result<Response, Error> {
			let url = format!("{}/faction/create", config.api_url);
			debug!(%url, name, "Creating faction");

			let res = config
				.client
				.post(&url)
				.json(&json!({ "name": name }))
				.with_session(config.session.as_ref())
				.send()
				.await?;

			read_json(res).await
		}
	}

	pub use join::exec as join;
	pub mod join {
		use super::*;

		pub async fn exec(config: RequestConfig, invitation_code: &str) -> Result<String, Error> {
			let url = format!("{}/faction/join", config.api_url);
			debug!(%url, "Joining faction");

			let res = config
				.client
				.post(&url)
				.json(&json!({ "invitation_code": invitation_code }))
				.with_session(config.session.as_ref())
				.send()
				.await?;

			read_message(res, "Joined faction").await
		}
	}

	pub use members::exec as members;
	pub mod members {
		use super::*;

		/// Older servers list bare usernames instead of member objects
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Member {
			Object { username: String },
			Name(String),
		}

		#[derive(Deserialize)]
		struct Body {
			members: Vec<Member>,
		}

		pub type Response = Vec<String>;

		pub async fn exec(config: RequestConfig) -> Result<Response, Error> {
			let url = format!("{}/faction/members", config.api_url);
			debug!(%url, "Listing faction members");

			let res = config
				.client
				.get(&url)
				.with_session(config.session.as_ref())
				.send()
				.await?;

			let body: Body = read_json(res).await?;

			Ok(body
				.members
				.into_iter()
				.map(|member| match member {
					Member::Object { username } | Member::Name(username) => username,
				})
				.collect())
		}
	}
}
