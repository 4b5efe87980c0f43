use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bs_api::{stats, RequestConfigProvider};
use bs_metrics::EditedMetrics;
use serde_json::Value;

use crate::error::{FetchError, SubmitError};

/// Where metrics are loaded from and sent to
#[async_trait]
pub trait MetricsRemote: Send + Sync {
	/// Raw `/stats` mapping, before normalization
	async fn fetch_metrics(&self) -> Result<HashMap<String, Value>, FetchError>;

	/// Replaces every editable metric, answering with the server confirmation
	async fn submit_metrics(&self, metrics: &EditedMetrics) -> Result<String, SubmitError>;
}

#[async_trait]
impl<R: MetricsRemote + ?Sized> MetricsRemote for Arc<R> {
	async fn fetch_metrics(&self) -> Result<HashMap<String, Value>, FetchError> {
		(**self).fetch_metrics().await
	}

	async fn submit_metrics(&self, metrics: &EditedMetrics) -> Result<String, SubmitError> {
		(**self).submit_metrics(metrics).await
	}
}

/// [`MetricsRemote`] talking to the battlestats server through `bs-api`
#[derive(Debug)]
pub struct HttpRemote<P> {
	provider: Arc<P>,
}

impl<P> HttpRemote<P> {
	pub const fn new(provider: Arc<P>) -> Self {
		Self { provider }
	}
}

#[async_trait]
impl<P: RequestConfigProvider + Send + Sync> MetricsRemote for HttpRemote<P> {
	async fn fetch_metrics(&self) -> Result<HashMap<String, Value>, FetchError> {
		let config = self.provider.get_request_config().await;
		stats::get(config).await.map_err(Into::into)
	}

	async fn submit_metrics(&self, metrics: &EditedMetrics) -> Result<String, SubmitError> {
		let config = self.provider.get_request_config().await;
		stats::update(config, metrics).await.map_err(Into::into)
	}
}
