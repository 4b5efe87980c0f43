use serde::Serialize;

use crate::{
	definition::MetricSet, delta::Direction, format::NumberLocale, value::MetricValues,
};

/// One dashboard row, ready to be drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentedMetric {
	pub key: &'static str,
	pub label: String,
	pub current_display: String,
	pub delta_display: String,
	pub direction: Direction,
}

impl PresentedMetric {
	/// Delta with its direction marker, e.g. `"↑ 1,250"`
	#[must_use]
	pub fn delta_with_indicator(&self) -> String {
		format!("{} {}", self.direction.indicator(), self.delta_display)
	}
}

/// Maps the latest values onto display rows, one per definition in canonical
/// order. This is where the dashboard order is enforced.
#[must_use]
pub fn present(
	definitions: &MetricSet,
	values: &MetricValues,
	locale: NumberLocale,
) -> Vec<PresentedMetric> {
	definitions
		.iter()
		.map(|def| {
			let value = values.get(def.key());
			let delta = value.delta();

			PresentedMetric {
				key: def.key(),
				label: def.label(),
				current_display: locale.format_integer(value.current),
				delta_display: locale.format_unsigned(delta.magnitude),
				direction: delta.direction,
			}
		})
		.collect()
}
