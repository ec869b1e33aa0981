//! Opsdesk core
//!
//! Typed request functions and explicit state containers for an administration
//! console: a page normalizer every list relies on, a relation resolver for the
//! hand-modelled entities, and a configuration-driven screen engine for the rest.

use std::sync::Arc;

use od_config::ConsoleConfig;
use od_http::{Client, RemoteClient};
use tracing::info;

pub mod entity;
pub mod error;
pub mod list;
pub mod logging;
pub mod messages;
pub mod page;
pub mod relation;
pub mod resource;
pub mod screen;

pub use error::{CoreError, Result};
pub use list::ListState;
pub use page::{fetch_all, fetch_page, Page};
pub use resource::{Entity, Resource};

/// Where a surface asks to go after a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
	pub route: String,
}

impl Navigation {
	pub fn to(route: impl Into<String>) -> Self {
		Self {
			route: route.into(),
		}
	}
}

/// Everything a surface needs to talk to the backend.
#[derive(Clone)]
pub struct Console {
	pub client: Client,
	pub config: ConsoleConfig,
}

impl Console {
	pub fn connect(config: ConsoleConfig) -> Result<Self> {
		let mut remote = RemoteClient::new(config.resolved_api_url(), config.request_timeout())?;
		if let Some(token) = config.auth.clone() {
			remote = remote.with_auth(token);
		}

		info!("Using backend at {}", remote.api_url());

		Ok(Self::with_client(Arc::new(remote), config))
	}

	pub fn with_client(client: Client, config: ConsoleConfig) -> Self {
		Self { client, config }
	}

	pub fn client(&self) -> &dyn od_http::HttpClient {
		self.client.as_ref()
	}
}
