use std::fmt;

use crate::{
	error::{FetchError, SubmitError},
	model::SubmitOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
	Success,
	Warning,
	Error,
}

/// Short, non-fatal message for the user after a sync operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	pub level: NoticeLevel,
	pub text: String,
}

impl Notice {
	pub fn fetch_failed(e: &FetchError) -> Self {
		Self {
			level: NoticeLevel::Error,
			text: format!("Failed to load stats: {e}"),
		}
	}

	pub fn submit_failed(e: &SubmitError) -> Self {
		Self {
			level: NoticeLevel::Error,
			text: format!("Failed to update stats: {e}"),
		}
	}

	/// One notice for the submit, plus one more if the resync failed
	pub fn submitted(outcome: &SubmitOutcome) -> Vec<Self> {
		let mut notices = vec![Self {
			level: NoticeLevel::Success,
			text: outcome.message.clone(),
		}];

		if let Err(e) = &outcome.resync {
			notices.push(Self {
				level: NoticeLevel::Warning,
				text: format!("Stats were saved but could not be reloaded: {e}"),
			});
		}

		notices
	}
}

impl fmt::Display for Notice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text)
	}
}
