use std::{collections::HashSet, fmt, sync::OnceLock};

use serde::Serialize;
use thiserror::Error;

/// Whether a metric is typed in by the user or computed by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
	Counter,
	Derived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetricDefinition {
	key: &'static str,
	kind: MetricKind,
	order: usize,
}

impl MetricDefinition {
	#[must_use]
	pub const fn key(&self) -> &'static str {
		self.key
	}

	#[must_use]
	pub const fn kind(&self) -> MetricKind {
		self.kind
	}

	/// Position in the canonical sequence
	#[must_use]
	pub const fn order(&self) -> usize {
		self.order
	}

	#[must_use]
	pub const fn is_editable(&self) -> bool {
		matches!(self.kind, MetricKind::Counter)
	}

	/// Display name, always derived from the key
	#[must_use]
	pub fn label(&self) -> String {
		label_for(self.key)
	}
}

impl fmt::Display for MetricDefinition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.label())
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
	#[error("duplicated metric key <key='{0}'>")]
	DuplicateKey(&'static str),
	#[error("metric key must not be empty <position={0}>")]
	EmptyKey(usize),
}

/// The fixed, ordered set of metrics tracked by the application.
///
/// Iteration order is the canonical order: it drives the dashboard rows and
/// the edit form, whatever order the server sends its data in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSet {
	definitions: Vec<MetricDefinition>,
}

impl MetricSet {
	pub fn new(
		entries: impl IntoIterator<Item = (&'static str, MetricKind)>,
	) -> Result<Self, DefinitionError> {
		let mut seen = HashSet::new();

		let definitions = entries
			.into_iter()
			.enumerate()
			.map(|(order, (key, kind))| {
				if key.is_empty() {
					return Err(DefinitionError::EmptyKey(order));
				}
				if !seen.insert(key) {
					return Err(DefinitionError::DuplicateKey(key));
				}
				Ok(MetricDefinition { key, kind, order })
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self { definitions })
	}

	pub fn iter(&self) -> impl Iterator<Item = &MetricDefinition> {
		self.definitions.iter()
	}

	pub fn editable(&self) -> impl Iterator<Item = &MetricDefinition> {
		self.definitions.iter().filter(|def| def.is_editable())
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<&MetricDefinition> {
		self.definitions.iter().find(|def| def.key == key)
	}

	#[must_use]
	pub fn contains(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

impl<'a> IntoIterator for &'a MetricSet {
	type Item = &'a MetricDefinition;
	type IntoIter = std::slice::Iter<'a, MetricDefinition>;

	fn into_iter(self) -> Self::IntoIter {
		self.definitions.iter()
	}
}

pub const BATTLE_METRICS: [(&str, MetricKind); 16] = [
	("total_wins", MetricKind::Counter),
	("total_losses", MetricKind::Counter),
	("assaults_won", MetricKind::Counter),
	("assaults_lost", MetricKind::Counter),
	("defending_battles_won", MetricKind::Counter),
	("defending_battles_lost", MetricKind::Counter),
	("win_rate", MetricKind::Derived),
	("kills", MetricKind::Counter),
	("destroyed_traps", MetricKind::Counter),
	("lost_associates", MetricKind::Counter),
	("lost_traps", MetricKind::Counter),
	("healed_associates", MetricKind::Counter),
	("wounded_enemy_associates", MetricKind::Counter),
	("enemy_turfs_destroyed", MetricKind::Counter),
	("turf_destroyed_times", MetricKind::Counter),
	("eliminated_enemy_influence", MetricKind::Counter),
];

/// Process-wide battle statistics set, built on first use
#[must_use]
pub fn battle_metrics() -> &'static MetricSet {
	static SET: OnceLock<MetricSet> = OnceLock::new();

	SET.get_or_init(|| MetricSet {
		definitions: BATTLE_METRICS
			.into_iter()
			.enumerate()
			.map(|(order, (key, kind))| MetricDefinition { key, kind, order })
			.collect(),
	})
}

/// `"total_wins"` -> `"Total Wins"`
#[must_use]
pub fn label_for(key: &str) -> String {
	key.split(|c: char| c == '_' || c == '-')
		.filter(|word| !word.is_empty())
		.map(|word| {
			let mut chars = word.chars();
			chars.next().map_or_else(String::new, |first| {
				first.to_uppercase().chain(chars).collect::<String>()
			})
		})
		.collect::<Vec<_>>()
		.join(" ")
}
