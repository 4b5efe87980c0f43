use std::{
	collections::{HashMap, VecDeque},
	sync::{
		atomic::{AtomicUsize, Ordering},
		Mutex,
	},
	time::Duration,
};

use async_trait::async_trait;
use bs_metrics::EditedMetrics;
use bs_sync::{FetchError, MetricsRemote, SubmitError};
use serde_json::Value;
use tracing::debug;

struct FetchStep {
	delay: Duration,
	result: Result<Value, FetchError>,
}

/// Remote answering from queues of canned responses, in call order
#[derive(Default)]
pub struct ScriptedRemote {
	fetches: Mutex<VecDeque<FetchStep>>,
	submits: Mutex<VecDeque<Result<String, SubmitError>>>,
	submitted: Mutex<Vec<EditedMetrics>>,
	fetch_calls: AtomicUsize,
	submit_calls: AtomicUsize,
}

impl ScriptedRemote {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn fetch(self, body: Value) -> Self {
		self.fetch_after(Duration::ZERO, Ok(body))
	}

	pub fn fetch_error(self, e: FetchError) -> Self {
		self.fetch_after(Duration::ZERO, Err(e))
	}

	pub fn fetch_after(self, delay: Duration, result: Result<Value, FetchError>) -> Self {
		self.fetches
			.lock()
			.unwrap()
			.push_back(FetchStep { delay, result });
		self
	}

	pub fn submit(self, result: Result<String, SubmitError>) -> Self {
		self.submits.lock().unwrap().push_back(result);
		self
	}

	pub fn fetch_calls(&self) -> usize {
		self.fetch_calls.load(Ordering::SeqCst)
	}

	pub fn submit_calls(&self) -> usize {
		self.submit_calls.load(Ordering::SeqCst)
	}

	pub fn submitted(&self) -> Vec<EditedMetrics> {
		self.submitted.lock().unwrap().clone()
	}
}

#[async_trait]
impl MetricsRemote for ScriptedRemote {
	async fn fetch_metrics(&self) -> Result<HashMap<String, Value>, FetchError> {
		let call = self.fetch_calls.fetch_add(1, Ordering::SeqCst);
		let step = self.fetches.lock().unwrap().pop_front();

		let Some(FetchStep { delay, result }) = step else {
			return Err(FetchError::Transport(format!("no fetch scripted for call {call}")));
		};

		debug!(call, ?delay, "Answering scripted fetch");
		tokio::time::sleep(delay).await;

		result.map(|body| serde_json::from_value(body).unwrap())
	}

	async fn submit_metrics(&self, metrics: &EditedMetrics) -> Result<String, SubmitError> {
		self.submit_calls.fetch_add(1, Ordering::SeqCst);
		self.submitted.lock().unwrap().push(metrics.clone());

		self.submits
			.lock()
			.unwrap()
			.pop_front()
			.unwrap_or_else(|| Err(SubmitError::Transport("no submit scripted".to_string())))
	}
}
