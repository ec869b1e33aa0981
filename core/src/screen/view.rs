use od_http::HttpClient;
use tracing::warn;

use super::{config::ScreenConfig, record::Record};
use crate::{messages, resource::Resource};

#[derive(Debug)]
pub struct ScreenView {
	config: &'static ScreenConfig,
	pub record: Option<Record>,
	pub loading: bool,
	pub error: Option<&'static str>,
}

impl ScreenView {
	pub async fn open(client: &dyn HttpClient, config: &'static ScreenConfig, id: i64) -> Self {
		let mut view = Self {
			config,
			record: None,
			loading: true,
			error: None,
		};

		match Resource::<Record>::new(config.base_url).get(client, id).await {
			Ok(record) => view.record = Some(record),
			Err(e) => {
				warn!(screen = config.key, id, error = %e, "Failed to load record");
				view.error = Some(messages::RECORD.load_one);
			}
		}
		view.loading = false;

		view
	}

	pub fn config(&self) -> &'static ScreenConfig {
		self.config
	}

	pub fn title(&self) -> String {
		format!("{} Details", self.config.title)
	}

	/// Label and display value of every configured field.
	pub fn rows(&self) -> Vec<(&'static str, String)> {
		let Some(record) = &self.record else {
			return Vec::new();
		};

		self.config
			.fields
			.iter()
			.map(|field| (field.label, record.text(field.key)))
			.collect()
	}
}
