//! HTTP plumbing for the console core.
//!
//! Everything above this crate talks to the backend through [`HttpClient`], a single
//! `send` seam that takes a [`Request`] and yields the decoded JSON body. The
//! production implementation is [`RemoteClient`]; tests use
//! [`testing::FakeBackend`].

mod error;
mod remote;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

pub use error::Error;
pub use remote::{AuthToken, RemoteClient};

/// Shared handle every surface holds on to.
pub type Client = Arc<dyn HttpClient>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
	Get,
	Post,
	Put,
	Delete,
}

/// Multipart payload for the upload endpoints: a `file` part and an optional
/// `projectId` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
	pub file_name: String,
	pub bytes: Vec<u8>,
	pub project_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
	pub method: Method,
	/// Path relative to the API root, always starting with `/`
	pub path: String,
	pub query: Vec<(String, String)>,
	pub body: Option<Value>,
	pub upload: Option<Upload>,
}

impl Request {
	fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			query: Vec::new(),
			body: None,
			upload: None,
		}
	}

	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	pub fn post(path: impl Into<String>, body: Value) -> Self {
		Self {
			body: Some(body),
			..Self::new(Method::Post, path)
		}
	}

	pub fn put(path: impl Into<String>, body: Value) -> Self {
		Self {
			body: Some(body),
			..Self::new(Method::Put, path)
		}
	}

	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::Delete, path)
	}

	pub fn upload(path: impl Into<String>, upload: Upload) -> Self {
		Self {
			upload: Some(upload),
			..Self::new(Method::Post, path)
		}
	}

	pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
		self.query.push((key.to_string(), value.to_string()));
		self
	}

	/// Looks up a query parameter by name.
	pub fn query_param(&self, key: &str) -> Option<&str> {
		self.query
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}
}

#[async_trait]
pub trait HttpClient: Send + Sync {
	/// Sends the request and returns the JSON body. Empty bodies decode to
	/// [`Value::Null`]; non-2xx statuses are errors.
	async fn send(&self, request: Request) -> Result<Value, Error>;
}
