use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{Error, HttpClient, Method, Request};

/// Credentials forwarded verbatim as the `authorization` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
	pub token_type: String,
	pub access_token: String,
}

trait WithAuth {
	fn with_auth(self, token: &AuthToken) -> Self;
}

impl WithAuth for reqwest::RequestBuilder {
	fn with_auth(self, token: &AuthToken) -> Self {
		self.header(
			"authorization",
			format!("{} {}", token.token_type, token.access_token),
		)
	}
}

/// [`HttpClient`] talking to a real backend over `reqwest`.
pub struct RemoteClient {
	client: reqwest::Client,
	api_url: String,
	auth_token: Option<AuthToken>,
}

impl RemoteClient {
	pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
		let client = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(Error::Builder)?;

		Ok(Self {
			client,
			api_url: api_url.into(),
			auth_token: None,
		})
	}

	pub fn with_auth(mut self, token: AuthToken) -> Self {
		self.auth_token = Some(token);
		self
	}

	pub fn api_url(&self) -> &str {
		&self.api_url
	}

	fn url(&self, path: &str) -> String {
		format!(
			"{}/{}",
			self.api_url.trim_end_matches('/'),
			path.trim_start_matches('/')
		)
	}
}

#[async_trait]
impl HttpClient for RemoteClient {
	async fn send(&self, request: Request) -> Result<Value, Error> {
		let Request {
			method,
			path,
			query,
			body,
			upload,
		} = request;
		let url = self.url(&path);

		let mut req = match method {
			Method::Get => self.client.get(&url),
			Method::Post => self.client.post(&url),
			Method::Put => self.client.put(&url),
			Method::Delete => self.client.delete(&url),
		};

		if !query.is_empty() {
			req = req.query(&query);
		}

		if let Some(body) = &body {
			req = req.json(body);
		}

		if let Some(upload) = upload {
			let mut form = Form::new().part(
				"file",
				Part::bytes(upload.bytes).file_name(upload.file_name),
			);
			if let Some(project_id) = upload.project_id {
				form = form.text("projectId", project_id.to_string());
			}
			req = req.multipart(form);
		}

		if let Some(token) = &self.auth_token {
			req = req.with_auth(token);
		}

		debug!(%method, %url, "Sending request");

		let transport = |e: reqwest::Error| Error::Transport {
			method,
			url: url.clone(),
			message: e.to_string(),
		};

		let response = req.send().await.map_err(transport)?;
		let status = response.status();
		if !status.is_success() {
			warn!(%method, %url, status = status.as_u16(), "Request rejected");
			return Err(Error::Status {
				method,
				url: url.clone(),
				status: status.as_u16(),
			});
		}

		let bytes = response.bytes().await.map_err(transport)?;
		decode_body(method, &url, &bytes)
	}
}

pub(crate) fn decode_body(method: Method, url: &str, bytes: &[u8]) -> Result<Value, Error> {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(Value::Null);
	}

	serde_json::from_slice(bytes).map_err(|source| Error::Decode {
		method,
		url: url.to_string(),
		source,
	})
}
