//!
//! # Battlestats Metrics
//!
//! Data model behind the battle statistics dashboard: the fixed, ordered set of
//! named counters a faction member tracks, and everything needed to show and
//! edit them without touching the network.
//!
//! - [`MetricSet`] holds the canonical metric definitions. Labels are derived
//!   from keys and the set order is the order every screen uses;
//! - [`MetricValues`] normalizes a `/stats` response, accepting both the
//!   `{current, previous}` pair and the bare number shapes, and fills the gaps
//!   with zeros;
//! - [`present`] turns values into display rows with locale grouped numbers and
//!   a direction marker per delta;
//! - [`EditDraft`] and [`parse_edited_form`] take user typed text back to
//!   numbers, rejecting the whole form on the first bad field;
//! - [`LiveNumberInput`] regroups a numeric field on every keystroke.
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use bs_metrics::{battle_metrics, present, Direction, MetricValues, NumberLocale};
//! use serde_json::json;
//!
//! let body: HashMap<String, serde_json::Value> = serde_json::from_value(json!({
//!     "total_wins": { "current": 1500, "previous": 1450 },
//!     "kills": 500,
//! }))
//! .unwrap();
//!
//! let values = MetricValues::normalize(battle_metrics(), body);
//! let rows = present(battle_metrics(), &values, NumberLocale::EN_US);
//!
//! assert_eq!(rows[0].label, "Total Wins");
//! assert_eq!(rows[0].current_display, "1,500");
//! assert_eq!(rows[0].delta_display, "50");
//! assert_eq!(rows[0].direction, Direction::Increase);
//! ```

#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::unnecessary_cast,
	clippy::cast_lossless,
	clippy::cast_possible_truncation,
	clippy::cast_possible_wrap,
	clippy::cast_precision_loss,
	clippy::cast_sign_loss,
	clippy::dbg_macro,
	clippy::deprecated_cfg_attr,
	clippy::separated_literal_suffix,
	deprecated
)]
#![forbid(deprecated_in_future)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod definition;
mod delta;
mod form;
mod format;
mod input;
mod present;
mod value;

pub use definition::{
	battle_metrics, label_for, DefinitionError, MetricDefinition, MetricKind, MetricSet,
	BATTLE_METRICS,
};
pub use delta::{Direction, MetricDelta};
pub use form::{parse_edited_form, EditDraft, EditedMetrics, FieldId, ParseError};
pub use format::{NumberError, NumberLocale, UnknownLocaleError};
pub use input::{Decorated, LiveNumberInput};
pub use present::{present, PresentedMetric};
pub use value::{MetricValue, MetricValues, RawMetricValue, RawNumber};
