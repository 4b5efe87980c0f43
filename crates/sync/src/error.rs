use bs_metrics::ParseError;

use thiserror::Error;

/// Failure to load the metric mapping; the last applied values stay in place
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
	#[error("could not reach the server: {0}")]
	Transport(String),
	#[error("the server did not answer in time")]
	Timeout,
	#[error("{message}")]
	Remote { status: Option<u16>, message: String },
	#[error("unexpected stats response: {0}")]
	Decode(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
	#[error(transparent)]
	InvalidInput(#[from] ParseError),
	#[error("{}", rejection(.message, .details.as_deref()))]
	Rejected {
		message: String,
		details: Option<String>,
	},
	#[error("could not reach the server: {0}")]
	Transport(String),
	#[error("the server did not answer in time")]
	Timeout,
	#[error("the server answered with status {status}")]
	Remote { status: u16 },
	#[error("unexpected submit response: {0}")]
	Decode(String),
}

fn rejection(message: &str, details: Option<&str>) -> String {
	match details {
		Some(details) if !details.is_empty() => format!("{message}: {details}"),
		_ => message.to_string(),
	}
}

impl From<bs_api::Error> for FetchError {
	fn from(e: bs_api::Error) -> Self {
		match e {
			e if e.is_timeout() => Self::Timeout,
			bs_api::Error::Transport(e) => Self::Transport(e.to_string()),
			bs_api::Error::Remote {
				status,
				message,
				details,
			} => Self::Remote {
				status: Some(status.as_u16()),
				message: rejection(&message, details.as_deref()),
			},
			bs_api::Error::Status(status) => Self::Remote {
				status: Some(status.as_u16()),
				message: status.to_string(),
			},
			bs_api::Error::Decode(e) => Self::Decode(e),
		}
	}
}

impl From<bs_api::Error> for SubmitError {
	fn from(e: bs_api::Error) -> Self {
		match e {
			e if e.is_timeout() => Self::Timeout,
			bs_api::Error::Transport(e) => Self::Transport(e.to_string()),
			bs_api::Error::Remote {
				message, details, ..
			} => Self::Rejected { message, details },
			bs_api::Error::Status(status) => Self::Remote {
				status: status.as_u16(),
			},
			bs_api::Error::Decode(e) => Self::Decode(e),
		}
	}
}
