use thiserror::Error;

use super::Method;

#[derive(Debug, Error)]
pub enum Error {
	#[error("failed to build HTTP client: {0}")]
	Builder(#[source] reqwest::Error),
	#[error("{method} {url} failed: {message}")]
	Transport {
		method: Method,
		url: String,
		message: String,
	},
	#[error("{method} {url} returned status {status}")]
	Status {
		method: Method,
		url: String,
		status: u16,
	},
	#[error("{method} {url} returned malformed JSON: {source}")]
	Decode {
		method: Method,
		url: String,
		#[source]
		source: serde_json::Error,
	},
}

impl Error {
	/// HTTP status code, when the server answered at all.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}
