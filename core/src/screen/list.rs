use od_http::HttpClient;

use super::{
	config::{Field, ScreenConfig},
	record::Record,
};
use crate::{list::ListState, messages, resource::Resource};

/// List state of a configured screen: a [`ListState`] over its records plus columns.
#[derive(Debug)]
pub struct ScreenList {
	config: &'static ScreenConfig,
	pub state: ListState<Record>,
}

impl ScreenList {
	pub fn new(config: &'static ScreenConfig, page_size: usize) -> Self {
		Self {
			config,
			state: ListState::new(Resource::new(config.base_url), messages::RECORD, page_size),
		}
	}

	/// Builds the list and loads its first page.
	pub async fn open(
		client: &dyn HttpClient,
		config: &'static ScreenConfig,
		page_size: usize,
	) -> Self {
		let mut list = Self::new(config, page_size);
		list.state.refresh(client, 0).await;
		list
	}

	pub fn config(&self) -> &'static ScreenConfig {
		self.config
	}

	pub fn columns(&self) -> Vec<&'static Field> {
		self.config.list_fields()
	}

	/// Cell text for every row, in column order.
	pub fn rows(&self) -> Vec<Vec<String>> {
		let columns = self.columns();
		self.state
			.items
			.iter()
			.map(|record| columns.iter().map(|field| record.text(field.key)).collect())
			.collect()
	}
}
