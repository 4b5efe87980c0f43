use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{trace, warn};

use crate::{delta::MetricDelta, definition::MetricSet};

/// A number as the server writes it.
///
/// Counters are stored as integers, but a derived value can come back as a
/// float, which is truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
	Int(i64),
	Float(f64),
}

impl RawNumber {
	#[must_use]
	#[allow(clippy::cast_possible_truncation)]
	pub fn truncate(self) -> i64 {
		match self {
			Self::Int(n) => n,
			// `as` saturates at the i64 bounds and maps NaN to 0
			Self::Float(f) => f.trunc() as i64,
		}
	}
}

/// The two shapes a metric takes in a `/stats` response
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawMetricValue {
	Bare(RawNumber),
	Pair {
		#[serde(default)]
		current: Option<RawNumber>,
		#[serde(default)]
		previous: Option<RawNumber>,
	},
}

impl From<RawMetricValue> for MetricValue {
	fn from(raw: RawMetricValue) -> Self {
		match raw {
			// a metric seen for the first time shows no change
			RawMetricValue::Bare(n) => {
				let n = n.truncate();
				Self::new(n, n)
			}
			RawMetricValue::Pair { current, previous } => Self::new(
				current.map_or(0, RawNumber::truncate),
				previous.map_or(0, RawNumber::truncate),
			),
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricValue {
	pub current: i64,
	pub previous: i64,
}

impl MetricValue {
	#[must_use]
	pub const fn new(current: i64, previous: i64) -> Self {
		Self { current, previous }
	}

	#[must_use]
	pub fn delta(&self) -> MetricDelta {
		MetricDelta::between(self.current, self.previous)
	}
}

/// Values for every metric of a set, as of one fetch.
///
/// Always fully populated: a key the server did not send reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricValues {
	values: HashMap<&'static str, MetricValue>,
}

impl MetricValues {
	#[must_use]
	pub fn zeroed(set: &MetricSet) -> Self {
		Self {
			values: set
				.iter()
				.map(|def| (def.key(), MetricValue::default()))
				.collect(),
		}
	}

	/// Builds the value table for `set` out of a decoded `/stats` body.
	///
	/// Unknown keys are dropped, missing or malformed ones become zero.
	#[must_use]
	pub fn normalize(set: &MetricSet, mut raw: HashMap<String, Value>) -> Self {
		let values = set
			.iter()
			.map(|def| {
				let value = match raw.remove(def.key()) {
					None | Some(Value::Null) => MetricValue::default(),
					Some(json) => serde_json::from_value::<RawMetricValue>(json)
						.map(MetricValue::from)
						.unwrap_or_else(|e| {
							warn!(key = def.key(), %e, "Malformed metric value, using zero");
							MetricValue::default()
						}),
				};
				(def.key(), value)
			})
			.collect();

		if !raw.is_empty() {
			trace!(ignored = ?raw.keys().collect::<Vec<_>>(), "Ignoring unknown metric keys");
		}

		Self { values }
	}

	#[must_use]
	pub fn get(&self, key: &str) -> MetricValue {
		self.values.get(key).copied().unwrap_or_default()
	}

	pub fn set(&mut self, key: &'static str, value: MetricValue) {
		self.values.insert(key, value);
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.values.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use crate::definition::battle_metrics;

	use pretty_assertions::assert_eq;
	use serde_json::json;

	fn raw(body: Value) -> HashMap<String, Value> {
		serde_json::from_value(body).expect("test body is an object")
	}

	#[test]
	fn both_shapes_are_normalized() {
		let values = MetricValues::normalize(
			battle_metrics(),
			raw(json!({
				"total_wins": { "current": 150, "previous": 145 },
				"kills": 500,
			})),
		);

		assert_eq!(values.get("total_wins"), MetricValue::new(150, 145));
		assert_eq!(values.get("kills"), MetricValue::new(500, 500));
		assert_eq!(values.get("lost_traps"), MetricValue::new(0, 0));
		assert_eq!(values.len(), battle_metrics().len());
	}

	#[test]
	fn unknown_and_malformed_keys() {
		let values = MetricValues::normalize(
			battle_metrics(),
			raw(json!({
				"total_losses": "lots",
				"assaults_won": null,
				"assaults_lost": { "current": 3 },
				"win_rate": { "current": 74.9, "previous": null },
				"rainbows": 12,
			})),
		);

		assert_eq!(values.get("total_losses"), MetricValue::default());
		assert_eq!(values.get("assaults_won"), MetricValue::default());
		assert_eq!(values.get("assaults_lost"), MetricValue::new(3, 0));
		assert_eq!(values.get("win_rate"), MetricValue::new(74, 0));
		assert_eq!(values.get("rainbows"), MetricValue::default());
		assert_eq!(values.len(), battle_metrics().len());
	}

	#[test]
	fn floats_truncate_toward_zero() {
		assert_eq!(RawNumber::Float(9.99).truncate(), 9);
		assert_eq!(RawNumber::Float(-9.99).truncate(), -9);
		assert_eq!(RawNumber::Float(f64::NAN).truncate(), 0);
		assert_eq!(RawNumber::Int(i64::MAX).truncate(), i64::MAX);
	}
}
