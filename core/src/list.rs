//! Paged list state shared by every list surface

use std::collections::HashSet;

use od_http::HttpClient;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::{
	messages::Messages,
	page::Page,
	resource::{Entity, Resource},
	Result,
};

/// One page of a collection plus the busy and error state a list needs.
#[derive(Debug)]
pub struct ListState<T> {
	resource: Resource<T>,
	messages: Messages,
	pub items: Vec<T>,
	pub page_index: usize,
	pub page_size: usize,
	pub total_items: usize,
	pub total_pages: usize,
	pub loading: bool,
	pub error: Option<&'static str>,
	deleting: HashSet<i64>,
}

impl<T> ListState<T> {
	pub fn new(resource: Resource<T>, messages: Messages, page_size: usize) -> Self {
		Self {
			resource,
			messages,
			items: Vec::new(),
			page_index: 0,
			page_size: page_size.max(1),
			total_items: 0,
			total_pages: 0,
			loading: false,
			error: None,
			deleting: HashSet::new(),
		}
	}

	pub fn resource(&self) -> &Resource<T> {
		&self.resource
	}

	pub fn apply(&mut self, page: Page<T>) {
		self.items = page.items;
		self.page_index = page.page_index;
		self.page_size = page.page_size;
		self.total_items = page.total_items;
		self.total_pages = page.total_pages;
	}

	/// 1-based position of the first row shown, 0 when the list is empty.
	pub fn range_start(&self) -> usize {
		if self.total_items == 0 {
			0
		} else {
			self.page_index.saturating_mul(self.page_size).saturating_add(1)
		}
	}

	pub fn range_end(&self) -> usize {
		self.total_items
			.min(self.page_index.saturating_add(1).saturating_mul(self.page_size))
	}

	pub fn is_deleting(&self, id: i64) -> bool {
		self.deleting.contains(&id)
	}

	/// Marks a row busy. Returns `false` if a delete for that row is already running.
	pub fn begin_delete(&mut self, id: i64) -> bool {
		self.error = None;
		self.deleting.insert(id)
	}

	/// Clears the row's busy flag whatever the outcome. On success returns the page to
	/// refresh: one page back when the row was the last one shown on a later page.
	pub fn finish_delete(&mut self, id: i64, outcome: Result<()>) -> Option<usize> {
		self.deleting.remove(&id);

		match outcome {
			Ok(()) => Some(self.refresh_target_after_delete()),
			Err(e) => {
				warn!(id, error = %e, "Delete failed");
				self.error = Some(self.messages.delete);
				None
			}
		}
	}

	fn refresh_target_after_delete(&self) -> usize {
		if self.items.len() <= 1 && self.page_index > 0 {
			self.page_index - 1
		} else {
			self.page_index
		}
	}
}

impl<T: Entity + Serialize + DeserializeOwned> ListState<T> {
	pub async fn refresh(&mut self, client: &dyn HttpClient, page_index: usize) {
		self.loading = true;
		self.error = None;

		match self.resource.page(client, page_index, self.page_size).await {
			Ok(page) => self.apply(page),
			Err(e) => {
				warn!(base_url = self.resource.base_url(), error = %e, "Failed to load list");
				self.error = Some(self.messages.load_many);
			}
		}

		self.loading = false;
	}

	pub async fn reload(&mut self, client: &dyn HttpClient) {
		self.refresh(client, self.page_index).await
	}

	pub async fn next_page(&mut self, client: &dyn HttpClient) {
		if self.page_index + 1 < self.total_pages {
			self.refresh(client, self.page_index + 1).await
		}
	}

	pub async fn previous_page(&mut self, client: &dyn HttpClient) {
		if self.page_index > 0 {
			self.refresh(client, self.page_index - 1).await
		}
	}

	/// Applies a page size typed by the user. Anything that is not a positive integer is
	/// ignored; a change jumps back to the first page.
	pub async fn set_page_size(&mut self, client: &dyn HttpClient, input: &str) -> bool {
		let Some(size) = input.trim().parse::<usize>().ok().filter(|size| *size > 0) else {
			return false;
		};

		if size == self.page_size {
			return false;
		}

		self.page_size = size;
		self.refresh(client, 0).await;
		true
	}

	pub async fn delete(&mut self, client: &dyn HttpClient, id: i64) {
		if !self.begin_delete(id) {
			return;
		}

		let outcome = self.resource.delete(client, id).await;
		if let Some(target) = self.finish_delete(id, outcome) {
			self.refresh(client, target).await;
		}
	}

	pub fn find(&self, id: i64) -> Option<&T> {
		self.items.iter().find(|item| item.id() == Some(id))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use pretty_assertions::assert_eq;
	use serde_json::Value;

	use crate::messages;

	#[test]
	fn test_range_on_far_pages_saturates() {
		let mut list = ListState::<Value>::new(Resource::new("/api/things"), messages::RECORD, 10);
		list.apply(Page {
			items: Vec::new(),
			page_index: usize::MAX / 4,
			page_size: 10,
			total_items: usize::MAX,
			total_pages: usize::MAX.div_ceil(10),
		});

		assert_eq!(list.range_start(), usize::MAX);
		assert_eq!(list.range_end(), usize::MAX);
	}

	#[test]
	fn test_range_on_empty_list() {
		let list = ListState::<Value>::new(Resource::new("/api/things"), messages::RECORD, 10);

		assert_eq!((list.range_start(), list.range_end()), (0, 0));
	}
}
