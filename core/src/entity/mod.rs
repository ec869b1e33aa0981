//! Hand-modelled entities: projects, owners, addresses and files.
//!
//! Each module carries the wire type, its [`Resource`], and the view and form state
//! containers built on the relation resolver.

pub mod address;
pub mod file;
pub mod owner;
pub mod project;

pub use address::{Address, AddressForm, AddressView, ADDRESSES};
pub use file::{FileForm, FileRecord, FileView, FILES};
pub use owner::{Owner, OwnerForm, OwnerView, OWNERS};
pub use project::{Project, ProjectForm, ProjectView, PROJECTS};

use od_http::HttpClient;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::{resource::Resource, Result};

/// Creates when `id` is `None`, updates otherwise.
pub(crate) async fn save<T: Serialize + DeserializeOwned>(
	client: &dyn HttpClient,
	resource: &Resource<T>,
	id: Option<i64>,
	payload: &T,
) -> Result<T> {
	match id {
		Some(id) => resource.update(client, id, payload).await,
		None => resource.create(client, payload).await,
	}
}

/// Picker lists never surface an error: an empty list makes payload reconciliation
/// fall back to the relations last fetched for the parent.
pub(crate) fn options_or_empty<T>(resource: &str, options: Result<Vec<T>>) -> Vec<T> {
	options.unwrap_or_else(|e| {
		warn!(resource, error = %e, "Picker options unavailable");
		Vec::new()
	})
}

pub(crate) fn is_blank(value: &str) -> bool {
	value.trim().is_empty()
}
