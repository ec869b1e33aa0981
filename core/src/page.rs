//! Page normalization
//!
//! Backends answer collection requests in one of three ways: a bare JSON array
//! holding the whole collection, a flat paged envelope
//! (`content/totalElements/totalPages/size/number`) or a nested one (`content` plus
//! `page {size,totalElements,totalPages,number}`). [`fetch_page`] folds all three into
//! a [`Page`] whose index, size and counts are always consistent with its items.

use od_http::{HttpClient, Request};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::Result;

/// Page size used when `/all` is unavailable and the whole collection has to be
/// pulled through the paged endpoint instead.
pub const FETCH_ALL_FALLBACK_SIZE: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
	pub items: Vec<T>,
	pub page_index: usize,
	pub page_size: usize,
	pub total_items: usize,
	pub total_pages: usize,
}

impl<T> Page<T> {
	pub fn empty(page_size: usize) -> Self {
		Self {
			items: Vec::new(),
			page_index: 0,
			page_size: page_size.max(1),
			total_items: 0,
			total_pages: 0,
		}
	}

	/// Slices a complete collection the way a paging backend would, clamping the
	/// requested index into range.
	pub fn from_items(all: Vec<T>, page_index: usize, page_size: usize) -> Self {
		let page_size = page_size.max(1);
		let total_items = all.len();
		let total_pages = total_items.div_ceil(page_size);
		let page_index = page_index.min(total_pages.saturating_sub(1));

		let items = all
			.into_iter()
			.skip(page_index * page_size)
			.take(page_size)
			.collect();

		Self {
			items,
			page_index,
			page_size,
			total_items,
			total_pages,
		}
	}

	pub fn is_first(&self) -> bool {
		self.page_index == 0
	}

	pub fn is_last(&self) -> bool {
		self.page_index + 1 >= self.total_pages
	}

	pub fn try_map<U, E>(
		self,
		f: impl FnMut(T) -> std::result::Result<U, E>,
	) -> std::result::Result<Page<U>, E> {
		Ok(Page {
			items: self
				.items
				.into_iter()
				.map(f)
				.collect::<std::result::Result<_, _>>()?,
			page_index: self.page_index,
			page_size: self.page_size,
			total_items: self.total_items,
			total_pages: self.total_pages,
		})
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPage {
	Bare(Vec<Value>),
	Envelope(Envelope),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
	content: Option<Vec<Value>>,
	items: Option<Vec<Value>>,
	total_elements: Option<usize>,
	total_pages: Option<usize>,
	size: Option<usize>,
	number: Option<usize>,
	page: Option<PageInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
	size: Option<usize>,
	total_elements: Option<usize>,
	total_pages: Option<usize>,
	number: Option<usize>,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Counts {
	size: Option<usize>,
	total_elements: Option<usize>,
	total_pages: Option<usize>,
	number: Option<usize>,
}

impl Envelope {
	fn counts(&self) -> Counts {
		let top = Counts {
			size: self.size,
			total_elements: self.total_elements,
			total_pages: self.total_pages,
			number: self.number,
		};

		match &self.page {
			// content/totalElements/totalPages/size/number
			None => top,
			// content + page {size,totalElements,totalPages,number}
			Some(info) => Counts {
				size: top.size.or(info.size),
				total_elements: top.total_elements.or(info.total_elements),
				total_pages: top.total_pages.or(info.total_pages),
				number: top.number.or(info.number),
			},
		}
	}

	fn into_page(self, requested_index: usize, requested_size: usize) -> Page<Value> {
		let counts = self.counts();

		let page_size = counts
			.size
			.filter(|size| *size > 0)
			.unwrap_or(requested_size);
		let page_index = counts.number.unwrap_or(requested_index);

		let mut items = self.content.or(self.items).unwrap_or_default();
		items.truncate(page_size);

		let total_items = counts
			.total_elements
			.unwrap_or_else(|| page_index.saturating_mul(page_size).saturating_add(items.len()));
		let total_pages = counts
			.total_pages
			.unwrap_or_else(|| total_items.div_ceil(page_size));

		Page {
			items,
			page_index: page_index.min(total_pages.saturating_sub(1)),
			page_size,
			total_items,
			total_pages,
		}
	}
}

/// Folds any supported list response into a [`Page`] of raw JSON items.
pub fn normalize(
	raw: Value,
	page_index: usize,
	page_size: usize,
) -> serde_json::Result<Page<Value>> {
	let page_size = page_size.max(1);

	Ok(match serde_json::from_value(raw)? {
		RawPage::Bare(all) => Page::from_items(all, page_index, page_size),
		RawPage::Envelope(envelope) => envelope.into_page(page_index, page_size),
	})
}

/// `GET {base_url}?page=N&size=M`, normalized.
pub async fn fetch_page<T: DeserializeOwned>(
	client: &dyn HttpClient,
	base_url: &str,
	page_index: usize,
	page_size: usize,
) -> Result<Page<T>> {
	let page_size = page_size.max(1);
	let raw = client
		.send(
			Request::get(base_url)
				.with_query("page", page_index)
				.with_query("size", page_size),
		)
		.await?;

	Ok(normalize(raw, page_index, page_size)?.try_map(serde_json::from_value)?)
}

/// Whole collection behind `base_url`. Prefers `GET {base_url}/all` and falls back to
/// one large page when that endpoint fails in any way; the fallback is invisible to
/// callers.
pub async fn fetch_all<T: DeserializeOwned>(
	client: &dyn HttpClient,
	base_url: &str,
) -> Result<Vec<T>> {
	match fetch_unpaged(client, base_url).await {
		Ok(items) => Ok(items),
		Err(e) => {
			debug!(
				%base_url,
				error = %e,
				"Unpaged listing unavailable, falling back to paged fetch"
			);
			Ok(fetch_page(client, base_url, 0, FETCH_ALL_FALLBACK_SIZE)
				.await?
				.items)
		}
	}
}

async fn fetch_unpaged<T: DeserializeOwned>(
	client: &dyn HttpClient,
	base_url: &str,
) -> Result<Vec<T>> {
	let raw = client.send(Request::get(format!("{base_url}/all"))).await?;
	Ok(serde_json::from_value(raw)?)
}
