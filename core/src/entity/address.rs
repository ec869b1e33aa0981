use futures_concurrency::future::Join;
use od_http::HttpClient;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{is_blank, owner::Owner, project::Project, save};
use crate::{
	list::ListState,
	messages,
	relation::{combined_error, resolve, Relation},
	resource::{Entity, Resource},
	Navigation,
};

pub const ADDRESSES: Resource<Address> = Resource::new("/api/addresses");

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<i64>,
	#[serde(default)]
	pub street: String,
	#[serde(default)]
	pub city: String,
	#[serde(default)]
	pub state: String,
	#[serde(default)]
	pub number: String,
	#[serde(default)]
	pub zip_code: String,
}

impl Entity for Address {
	fn id(&self) -> Option<i64> {
		self.id
	}
}

pub fn list(page_size: usize) -> ListState<Address> {
	ListState::new(ADDRESSES, messages::ADDRESS, page_size)
}

/// `/addresses/{id}/owner` and `/addresses/{id}/project`
#[derive(Debug, Default)]
pub struct AddressRelations {
	pub owner: Relation<Option<Owner>>,
	pub project: Relation<Option<Project>>,
	pub error: Option<&'static str>,
}

impl AddressRelations {
	pub async fn load(&mut self, client: &dyn HttpClient, id: i64) {
		self.owner.begin();
		self.project.begin();
		self.error = None;

		let (owner, project) = (
			resolve(ADDRESSES.relation(client, id, "owner"), None),
			resolve(ADDRESSES.relation(client, id, "project"), None),
		)
			.join()
			.await;

		self.owner.settle(owner);
		self.project.settle(project);
		self.error = combined_error([self.owner.failed(), self.project.failed()]);
	}

	pub fn reset(&mut self) {
		self.owner.reset(None);
		self.project.reset(None);
		self.error = None;
	}
}

#[derive(Debug, Default)]
pub struct AddressView {
	pub address: Option<Address>,
	pub relations: AddressRelations,
	pub loading: bool,
	pub error: Option<&'static str>,
}

impl AddressView {
	pub async fn open(client: &dyn HttpClient, id: i64) -> Self {
		let mut view = Self {
			loading: true,
			..Self::default()
		};

		let result = ADDRESSES.get(client, id).await;
		view.loading = false;

		match result {
			Ok(address) => {
				view.address = Some(address);
				view.relations.load(client, id).await;
			}
			Err(e) => {
				warn!(id, error = %e, "Failed to load address");
				view.error = Some(messages::ADDRESS.load_one);
				view.relations.reset();
			}
		}

		view
	}
}

#[derive(Debug, Default)]
pub struct AddressForm {
	pub draft: Address,
	pub is_edit: bool,
	pub loading: bool,
	pub error: Option<&'static str>,
	pub relations: AddressRelations,
}

impl AddressForm {
	pub async fn open(client: &dyn HttpClient, id: Option<i64>) -> Self {
		let mut form = Self::default();
		let Some(id) = id else {
			return form;
		};

		form.is_edit = true;
		form.loading = true;
		let result = ADDRESSES.get(client, id).await;
		form.loading = false;

		match result {
			Ok(address) => {
				let id = address.id;
				form.draft = address;
				match id {
					Some(id) => form.relations.load(client, id).await,
					None => form.relations.reset(),
				}
			}
			Err(e) => {
				warn!(id, error = %e, "Failed to load address");
				form.error = Some(messages::ADDRESS.load_one);
				form.relations.reset();
			}
		}

		form
	}

	pub async fn submit(&mut self, client: &dyn HttpClient) -> Option<Navigation> {
		if is_blank(&self.draft.street) {
			self.error = Some(messages::REQUIRED_FIELDS_MISSING);
			return None;
		}

		self.loading = true;
		self.error = None;
		let id = self.draft.id.filter(|_| self.is_edit);
		let result = save(client, &ADDRESSES, id, &self.draft).await;
		self.loading = false;

		match result {
			Ok(_) => Some(Navigation::to("/addresses")),
			Err(e) => {
				warn!(error = %e, "Failed to save address");
				self.error = Some(messages::ADDRESS.save(self.is_edit));
				None
			}
		}
	}
}
