use std::fmt;

use reqwest::header::{HeaderMap, SET_COOKIE};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use super::{read_json, read_message, Error, RequestConfig, WithSession};

/// Cookies handed out by the server at login, kept as a `Cookie` header value
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCookie(String);

impl SessionCookie {
	#[must_use]
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Collects the `name=value` part of every `Set-Cookie` header
	#[must_use]
	pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
		let pairs = headers
			.get_all(SET_COOKIE)
			.iter()
			.filter_map(|value| {
				value
					.to_str()
					.map_err(|e| warn!(%e, "Skipping non UTF-8 Set-Cookie header"))
					.ok()
			})
			.filter_map(|value| value.split(';').next())
			.map(str::trim)
			.filter(|pair| pair.contains('='))
			.collect::<Vec<_>>();

		(!pairs.is_empty()).then(|| Self(pairs.join("; ")))
	}
}

// Never print the cookie itself
impl fmt::Debug for SessionCookie {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SessionCookie(..)")
	}
}

pub use register::exec as register;
pub mod register {
	use super::*;

	pub async fn exec(
		config: RequestConfig,
		username: &str,
		email: &str,
		password: &str,
	) -> Result<String, Error> {
		let url = format!("{}/register", config.api_url);
		debug!(%url, username, "Registering user");

		let res = config
			.client
			.post(&url)
			.json(&json!({
				"username": username,
				"email": email,
				"password": password,
			}))
			.send()
			.await?;

		read_message(res, "Registration successful. Please log in.").await
	}
}

pub use login::exec as login;
pub mod login {
	use super::*;

	pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";

	#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
	pub struct Response {
		pub message: Option<String>,
		#[serde(default)]
		pub is_admin: bool,
		pub redirect: Option<String>,
	}

	#[derive(Debug, Clone)]
	pub struct Login {
		pub response: Response,
		pub session: Option<SessionCookie>,
	}

	impl Login {
		/// Page the user lands on: admins always go to their dashboard
		#[must_use]
		pub fn destination(&self) -> &str {
			if self.response.is_admin {
				ADMIN_DASHBOARD
			} else {
				self.response.redirect.as_deref().unwrap_or("/")
			}
		}
	}

	pub async fn exec(config: RequestConfig, username: &str, password: &str) -> Result<Login, Error> {
		let url = format!("{}/login", config.api_url);
		debug!(%url, username, "Logging in");

		let res = config
			.client
			.post(&url)
			.json(&json!({
				"username": username,
				"password": password,
			}))
			.send()
			.await?;

		let session = SessionCookie::from_headers(res.headers());
		let response = read_json(res).await?;

		if session.is_none() {
			warn!("Login succeeded but the server set no session cookie");
		}

		Ok(Login { response, session })
	}
}

pub use logout::exec as logout;
pub mod logout {
	use super::*;

	pub async fn exec(config: RequestConfig) -> Result<String, Error> {
		let url = format!("{}/logout", config.api_url);
		debug!(%url, "Logging out");

		let res = config
			.client
			.get(&url)
			.with_session(config.session.as_ref())
			.send()
			.await?;

		read_message(res, "Logged out").await
	}
}
