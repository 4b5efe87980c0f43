//! Admin matrix of which user may use which feature.
//!
//! The admin page renders one row per user and one column per feature and
//! posts the whole grid back, so a [`FeatureAccessMatrix`] always serializes
//! every cell, granted or not.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

use super::{read_json, Error, RequestConfig, WithSession};

pub const DEFAULT_UPDATE_PATH: &str = "/admin/feature_access/update";

/// Key of a feature column, derived from its header: `"Edit Stats"` is `edit_stats`
#[must_use]
pub fn feature_name(header: &str) -> String {
	header
		.split_whitespace()
		.map(str::to_lowercase)
		.collect::<Vec<_>>()
		.join("_")
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatrixError {
	#[error("user {0} is not part of the access matrix")]
	UnknownUser(u64),
	#[error("feature '{0}' is not part of the access matrix")]
	UnknownFeature(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureAccessMatrix {
	users: Vec<u64>,
	features: Vec<String>,
	granted: BTreeSet<(u64, String)>,
}

impl FeatureAccessMatrix {
	/// Builds an empty grid; features may be given as headers or names
	pub fn new<I, S>(users: impl IntoIterator<Item = u64>, features: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut matrix = Self::default();

		for user in users {
			if !matrix.users.contains(&user) {
				matrix.users.push(user);
			}
		}

		for feature in features {
			let name = feature_name(feature.as_ref());
			if !name.is_empty() && !matrix.features.contains(&name) {
				matrix.features.push(name);
			}
		}

		matrix
	}

	#[must_use]
	pub fn users(&self) -> &[u64] {
		&self.users
	}

	#[must_use]
	pub fn features(&self) -> &[String] {
		&self.features
	}

	pub fn grant(&mut self, user: u64, feature: &str) -> Result<(), MatrixError> {
		let cell = self.cell(user, feature)?;
		self.granted.insert(cell);
		Ok(())
	}

	pub fn revoke(&mut self, user: u64, feature: &str) -> Result<(), MatrixError> {
		let cell = self.cell(user, feature)?;
		self.granted.remove(&cell);
		Ok(())
	}

	#[must_use]
	pub fn is_granted(&self, user: u64, feature: &str) -> bool {
		self.granted.contains(&(user, feature_name(feature)))
	}

	fn cell(&self, user: u64, feature: &str) -> Result<(u64, String), MatrixError> {
		if !self.users.contains(&user) {
			return Err(MatrixError::UnknownUser(user));
		}

		let name = feature_name(feature);
		if !self.features.contains(&name) {
			return Err(MatrixError::UnknownFeature(feature.to_string()));
		}

		Ok((user, name))
	}
}

impl Serialize for FeatureAccessMatrix {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let grid = self
			.users
			.iter()
			.map(|&user| {
				let row = self
					.features
					.iter()
					.map(|feature| {
						(
							feature.as_str(),
							self.granted.contains(&(user, feature.clone())),
						)
					})
					.collect::<BTreeMap<_, _>>();
				(user.to_string(), row)
			})
			.collect::<BTreeMap<_, _>>();

		grid.serialize(serializer)
	}
}

pub use update::exec as update;
pub mod update {
	use super::*;

	#[derive(Debug, Deserialize)]
	struct Response {
		#[serde(default)]
		success: bool,
	}

	/// Posts the whole grid; `path` defaults to [`DEFAULT_UPDATE_PATH`] upstream
	pub async fn exec(
		config: RequestConfig,
		path: &str,
		matrix: &FeatureAccessMatrix,
	) -> Result<(), Error> {
		let url = format!("{}/{}", config.api_url, path.trim_start_matches('/'));
		debug!(
			%url,
			users = matrix.users().len(),
			features = matrix.features().len(),
			"Updating feature access"
		);

		let res = config
			.client
			.post(&url)
			.json(matrix)
			.with_session(config.session.as_ref())
			.send()
			.await?;

		let status = res.status();
		let Response { success } = read_json(res).await?;

		if success {
			Ok(())
		} else {
			Err(Error::Remote {
				status,
				message: "Feature access update was not applied".to_string(),
				details: None,
			})
		}
	}
}
