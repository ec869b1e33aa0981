//! Unified error handling for the core

use thiserror::Error;

use crate::screen::ScreenError;

/// Main error type for core operations
#[derive(Error, Debug)]
pub enum CoreError {
	#[error("HTTP error: {0}")]
	Http(#[from] od_http::Error),

	#[error("Unexpected payload: {0}")]
	Decode(#[from] serde_json::Error),

	#[error(transparent)]
	Screen(#[from] ScreenError),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
