//!
//! # Battlestats Sync
//!
//! Keeps a local copy of a user's battle metrics in step with the server.
//!
//! [`MetricSyncModel`] is the single owner of the applied values. It fetches
//! through a [`MetricsRemote`] (usually an [`HttpRemote`] over `bs-api`),
//! bounds every remote call with a timeout, drops fetch responses that lost a
//! race against a newer fetch, and resyncs after each accepted submit.
//! Failures come back as [`FetchError`] or [`SubmitError`] and can be turned
//! into a user facing [`Notice`].

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

mod error;
mod model;
mod notice;
mod remote;

pub use error::{FetchError, SubmitError};
pub use model::{MetricSyncModel, Refresh, SubmitOutcome, DEFAULT_TIMEOUT};
pub use notice::{Notice, NoticeLevel};
pub use remote::{HttpRemote, MetricsRemote};
