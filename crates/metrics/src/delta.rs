use std::cmp::Ordering;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
	Increase,
	Decrease,
	Unchanged,
}

impl Direction {
	/// Arrow shown next to the delta, a dash when nothing moved
	#[must_use]
	pub const fn indicator(self) -> &'static str {
		match self {
			Self::Increase => "↑",
			Self::Decrease => "↓",
			Self::Unchanged => "-",
		}
	}
}

impl From<Ordering> for Direction {
	fn from(ordering: Ordering) -> Self {
		match ordering {
			Ordering::Greater => Self::Increase,
			Ordering::Less => Self::Decrease,
			Ordering::Equal => Self::Unchanged,
		}
	}
}

/// Difference between the current and previous value of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MetricDelta {
	/// `current - previous`, saturating at the `i64` bounds
	pub change: i64,
	pub direction: Direction,
	/// `|current - previous|`, exact even when `change` saturates
	pub magnitude: u64,
}

impl MetricDelta {
	#[must_use]
	pub fn between(current: i64, previous: i64) -> Self {
		Self {
			change: current.saturating_sub(previous),
			direction: current.cmp(&previous).into(),
			magnitude: current.abs_diff(previous),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn direction_follows_sign() {
		let cases = [
			(150, 145, Direction::Increase, 5),
			(50, 52, Direction::Decrease, 2),
			(70, 70, Direction::Unchanged, 0),
			(0, 0, Direction::Unchanged, 0),
			(-3, 4, Direction::Decrease, 7),
		];

		for (current, previous, direction, magnitude) in cases {
			let delta = MetricDelta::between(current, previous);
			assert_eq!(delta.direction, direction, "{current} vs {previous}");
			assert_eq!(delta.magnitude, magnitude);
			assert_eq!(delta.change.signum(), (current - previous).signum());
		}
	}

	#[test]
	fn sign_law_is_exhaustive() {
		let samples = [i64::MIN, -1_000, -1, 0, 1, 999, i64::MAX];

		for current in samples {
			for previous in samples {
				let delta = MetricDelta::between(current, previous);
				let expected = match (current > previous, current < previous) {
					(true, false) => Direction::Increase,
					(false, true) => Direction::Decrease,
					(false, false) => Direction::Unchanged,
					(true, true) => unreachable!(),
				};
				assert_eq!(delta.direction, expected);
				assert_eq!(delta.magnitude == 0, delta.direction == Direction::Unchanged);
			}
		}
	}

	#[test]
	fn extreme_values_do_not_overflow() {
		let delta = MetricDelta::between(i64::MAX, i64::MIN);

		assert_eq!(delta.change, i64::MAX);
		assert_eq!(delta.magnitude, u64::MAX);
		assert_eq!(delta.direction, Direction::Increase);
	}
}
