//! Console configuration

use anyhow::{anyhow, Result};
use od_http::AuthToken;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "opsdesk.json";

/// Environment variable that overrides the configured API root.
pub const API_URL_ENV: &str = "OPSDESK_API_URL";

const TARGET_VERSION: u32 = 2;

/// Platform-specific data directory resolution
pub fn default_data_dir() -> Result<PathBuf> {
	#[cfg(any(target_os = "macos", target_os = "windows"))]
	let dir = dirs::data_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join("Opsdesk");

	#[cfg(not(any(target_os = "macos", target_os = "windows")))]
	let dir = dirs::data_local_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join("opsdesk");

	fs::create_dir_all(&dir)?;

	Ok(dir)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
	/// Config schema version
	pub version: u32,

	/// Data directory path, holds this file and the logs
	pub data_dir: PathBuf,

	/// Root the API paths (`/api/owners`, ...) are resolved against
	pub api_url: String,

	/// Default tracing directive when `RUST_LOG` is unset
	pub log_level: String,

	/// Rows per page for list surfaces
	#[serde(default = "default_page_size")]
	pub page_size: usize,

	#[serde(default = "default_request_timeout_secs")]
	pub request_timeout_secs: u64,

	/// Token forwarded as the `authorization` header, if any
	#[serde(default)]
	pub auth: Option<AuthToken>,

	/// Session-only API root from the environment or the command line, never saved
	#[serde(skip)]
	api_url_override: Option<String>,
}

fn default_page_size() -> usize {
	10
}

fn default_request_timeout_secs() -> u64 {
	30
}

impl ConsoleConfig {
	/// Load configuration from the default location
	pub fn load() -> Result<Self> {
		let data_dir = default_data_dir()?;
		Self::load_from(&data_dir)
	}

	/// Load configuration from a specific data directory, creating it with defaults
	/// when missing. `OPSDESK_API_URL` wins over the stored API root.
	pub fn load_from(data_dir: &Path) -> Result<Self> {
		let config_path = data_dir.join(CONFIG_FILE);

		let mut config = if config_path.exists() {
			info!("Loading config from {:?}", config_path);
			let json = fs::read_to_string(&config_path)?;
			let mut config: ConsoleConfig = serde_json::from_str(&json)?;

			if config.version < TARGET_VERSION {
				info!(
					"Migrating config from v{} to v{}",
					config.version, TARGET_VERSION
				);
				config.migrate()?;
				config.save()?;
			}

			config
		} else {
			warn!("No config found, creating default at {:?}", config_path);
			let config = Self::default_with_dir(data_dir.to_path_buf());
			config.save()?;
			config
		};

		config.override_api_url(std::env::var(API_URL_ENV).ok());

		Ok(config)
	}

	pub fn default_with_dir(data_dir: PathBuf) -> Self {
		Self {
			version: TARGET_VERSION,
			data_dir,
			api_url: "http://localhost:8080".to_string(),
			log_level: "info".to_string(),
			page_size: default_page_size(),
			request_timeout_secs: default_request_timeout_secs(),
			auth: None,
			api_url_override: None,
		}
	}

	pub fn save(&self) -> Result<()> {
		fs::create_dir_all(&self.data_dir)?;
		let config_path = self.data_dir.join(CONFIG_FILE);
		let json = serde_json::to_string_pretty(self)?;
		fs::write(&config_path, json)?;
		info!("Saved config to {:?}", config_path);
		Ok(())
	}

	/// Overrides the API root for this session only; blank overrides are ignored.
	pub fn override_api_url(&mut self, api_url: Option<String>) {
		if let Some(api_url) = api_url.filter(|url| !url.trim().is_empty()) {
			self.api_url_override = Some(api_url);
		}
	}

	/// API root requests go to: the session override if any, else the stored one.
	pub fn resolved_api_url(&self) -> &str {
		self.api_url_override.as_deref().unwrap_or(&self.api_url)
	}

	pub fn logs_dir(&self) -> PathBuf {
		self.data_dir.join("logs")
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}

	fn migrate(&mut self) -> Result<()> {
		match self.version {
			0 => {
				self.version = 1;
				self.migrate()
			}
			1 => {
				// v2 introduced paging and request timeouts
				self.page_size = default_page_size();
				self.request_timeout_secs = default_request_timeout_secs();
				self.version = 2;
				Ok(())
			}
			TARGET_VERSION => Ok(()),
			v => Err(anyhow!("Unknown config version: {}", v)),
		}
	}
}
