//! Request functions over one REST collection.

use std::marker::PhantomData;

use od_http::{HttpClient, Request, Upload};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
	page::{fetch_all, fetch_page, Page},
	Result,
};

/// Anything that may or may not have been persisted yet.
pub trait Entity {
	fn id(&self) -> Option<i64>;
}

/// A REST collection rooted at `base_url`: `GET {base}`, `GET {base}/{id}`,
/// `POST {base}`, `PUT {base}/{id}`, `DELETE {base}/{id}` and
/// `GET {base}/{id}/{relation}`.
#[derive(Debug, Clone)]
pub struct Resource<T> {
	base_url: &'static str,
	_entity: PhantomData<fn() -> T>,
}

impl<T> Resource<T> {
	pub const fn new(base_url: &'static str) -> Self {
		Self {
			base_url,
			_entity: PhantomData,
		}
	}

	pub fn base_url(&self) -> &'static str {
		self.base_url
	}

	pub fn item_url(&self, id: i64) -> String {
		format!("{}/{id}", self.base_url)
	}
}

impl<T: Serialize + DeserializeOwned> Resource<T> {
	pub async fn page(
		&self,
		client: &dyn HttpClient,
		page_index: usize,
		page_size: usize,
	) -> Result<Page<T>> {
		fetch_page(client, self.base_url, page_index, page_size).await
	}

	pub async fn all(&self, client: &dyn HttpClient) -> Result<Vec<T>> {
		fetch_all(client, self.base_url).await
	}

	pub async fn get(&self, client: &dyn HttpClient, id: i64) -> Result<T> {
		let raw = client.send(Request::get(self.item_url(id))).await?;
		Ok(serde_json::from_value(raw)?)
	}

	pub async fn create(&self, client: &dyn HttpClient, entity: &T) -> Result<T> {
		let body = serde_json::to_value(entity)?;
		let raw = client.send(Request::post(self.base_url, body)).await?;
		Ok(serde_json::from_value(raw)?)
	}

	pub async fn update(&self, client: &dyn HttpClient, id: i64, entity: &T) -> Result<T> {
		let body = serde_json::to_value(entity)?;
		let raw = client.send(Request::put(self.item_url(id), body)).await?;
		Ok(serde_json::from_value(raw)?)
	}

	pub async fn delete(&self, client: &dyn HttpClient, id: i64) -> Result<()> {
		client.send(Request::delete(self.item_url(id))).await?;
		Ok(())
	}

	/// `GET {base}/{id}/{relation}`
	pub async fn relation<R: DeserializeOwned>(
		&self,
		client: &dyn HttpClient,
		id: i64,
		relation: &str,
	) -> Result<R> {
		let raw = client
			.send(Request::get(format!("{}/{relation}", self.item_url(id))))
			.await?;
		Ok(serde_json::from_value(raw)?)
	}

	/// Multipart `POST {base}/upload`, or `POST {base}/{id}/upload` to replace the
	/// content of an existing record.
	pub async fn upload(
		&self,
		client: &dyn HttpClient,
		id: Option<i64>,
		upload: Upload,
	) -> Result<T> {
		let path = match id {
			Some(id) => format!("{}/upload", self.item_url(id)),
			None => format!("{}/upload", self.base_url),
		};
		let raw = client.send(Request::upload(path, upload)).await?;
		Ok(serde_json::from_value(raw)?)
	}
}
