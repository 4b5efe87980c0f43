use std::{
	collections::HashMap,
	future::Future,
	sync::{
		atomic::{AtomicU64, Ordering},
		Arc,
	},
	time::Duration,
};

use bs_metrics::{
	battle_metrics, parse_edited_form, present, EditDraft, EditedMetrics, MetricSet, MetricValues,
	NumberLocale, PresentedMetric,
};
use tokio::{sync::RwLock, time::timeout};
use tracing::{debug, info, instrument, warn};

use crate::{
	error::{FetchError, SubmitError},
	remote::MetricsRemote,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// What a completed fetch did to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
	/// The response was the newest one and now backs the presentation
	Applied(Vec<PresentedMetric>),
	/// A newer fetch had already been applied, the response was dropped
	Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
	pub message: String,
	pub resync: Result<Refresh, FetchError>,
}

#[derive(Debug)]
struct SyncState {
	values: MetricValues,
	applied_token: u64,
}

/// Owns the last applied metric values and keeps them in step with the server.
///
/// Every fetch draws a token from a counter; a response only replaces the
/// values when its token is newer than the last applied one. Failed fetches
/// leave the values untouched.
#[derive(Debug)]
pub struct MetricSyncModel<R> {
	remote: R,
	definitions: Arc<MetricSet>,
	locale: NumberLocale,
	timeout: Duration,
	state: RwLock<SyncState>,
	next_token: AtomicU64,
}

impl<R: MetricsRemote> MetricSyncModel<R> {
	pub fn new(remote: R, definitions: Arc<MetricSet>, locale: NumberLocale) -> Self {
		let values = MetricValues::zeroed(&definitions);

		Self {
			remote,
			definitions,
			locale,
			timeout: DEFAULT_TIMEOUT,
			state: RwLock::new(SyncState {
				values,
				applied_token: 0,
			}),
			next_token: AtomicU64::new(0),
		}
	}

	/// Model over the canonical battle metric set
	pub fn battle(remote: R, locale: NumberLocale) -> Self {
		Self::new(remote, Arc::new(battle_metrics().clone()), locale)
	}

	#[must_use]
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn definitions(&self) -> &MetricSet {
		&self.definitions
	}

	pub const fn locale(&self) -> NumberLocale {
		self.locale
	}

	/// Fetches the metric mapping and applies it if no newer fetch won the race
	#[instrument(skip(self))]
	pub async fn refresh(&self) -> Result<Refresh, FetchError> {
		let token = self.next_token.fetch_add(1, Ordering::SeqCst) + 1;
		debug!(token, "Fetching metrics");

		let raw = bounded(self.timeout, self.remote.fetch_metrics(), || FetchError::Timeout)
			.await
			.map_err(|e| {
				warn!(token, %e, "Metrics fetch failed, keeping the last applied values");
				e
			})?;

		let values = MetricValues::normalize(&self.definitions, raw);

		let mut state = self.state.write().await;
		if token <= state.applied_token {
			warn!(
				token,
				applied_token = state.applied_token,
				"Discarding metrics response older than the applied one"
			);
			return Ok(Refresh::Stale);
		}

		let presented = present(&self.definitions, &values, self.locale);
		state.values = values;
		state.applied_token = token;

		Ok(Refresh::Applied(presented))
	}

	pub async fn has_loaded(&self) -> bool {
		self.state.read().await.applied_token > 0
	}

	pub async fn values(&self) -> MetricValues {
		self.state.read().await.values.clone()
	}

	pub async fn presented(&self) -> Vec<PresentedMetric> {
		let state = self.state.read().await;
		present(&self.definitions, &state.values, self.locale)
	}

	/// Edit form prefilled with the last applied values
	pub async fn draft(&self) -> EditDraft {
		let state = self.state.read().await;
		EditDraft::from_values(&self.definitions, &state.values, self.locale)
	}

	/// Sends `edited` and, once the server confirmed, fetches again.
	///
	/// A failed resync is reported in the outcome; the submit itself still
	/// succeeded. A failed submit changes nothing and triggers no resync.
	#[instrument(skip_all, fields(count = edited.len()), err)]
	pub async fn submit(&self, edited: &EditedMetrics) -> Result<SubmitOutcome, SubmitError> {
		let message = bounded(self.timeout, self.remote.submit_metrics(edited), || {
			SubmitError::Timeout
		})
		.await?;

		info!(%message, "Metrics submitted");

		let resync = self.refresh().await;

		Ok(SubmitOutcome { message, resync })
	}

	pub async fn submit_draft(&self, draft: &EditDraft) -> Result<SubmitOutcome, SubmitError> {
		let edited = draft.parse()?;
		self.submit(&edited).await
	}

	/// Parses raw field texts, keyed by metric, then submits them
	pub async fn submit_form(
		&self,
		raw_inputs: &HashMap<String, String>,
	) -> Result<SubmitOutcome, SubmitError> {
		let edited = parse_edited_form(&self.definitions, raw_inputs, self.locale)?;
		self.submit(&edited).await
	}
}

async fn bounded<T, E>(
	limit: Duration,
	fut: impl Future<Output = Result<T, E>>,
	on_timeout: impl FnOnce() -> E,
) -> Result<T, E> {
	timeout(limit, fut).await.unwrap_or_else(|_| Err(on_timeout()))
}
