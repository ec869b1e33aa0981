use futures_concurrency::future::Join;
use od_http::HttpClient;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{
	address::ADDRESSES, is_blank, options_or_empty, project::PROJECTS, save, Address, Project,
};
use crate::{
	list::ListState,
	messages,
	relation::{
		combined_error, parse_id, parse_ids, reconcile_many, reconcile_one, resolve, Relation,
	},
	resource::{Entity, Resource},
	Navigation,
};

pub const OWNERS: Resource<Owner> = Resource::new("/api/owners");

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<i64>,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub address: Option<Address>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub projects: Option<Vec<Project>>,
}

impl Entity for Owner {
	fn id(&self) -> Option<i64> {
		self.id
	}
}

pub fn list(page_size: usize) -> ListState<Owner> {
	ListState::new(OWNERS, messages::OWNER, page_size)
}

/// `/owners/{id}/address` and `/owners/{id}/projects`
#[derive(Debug, Default)]
pub struct OwnerRelations {
	pub address: Relation<Option<Address>>,
	pub projects: Relation<Vec<Project>>,
	pub error: Option<&'static str>,
}

impl OwnerRelations {
	pub async fn load(&mut self, client: &dyn HttpClient, id: i64) {
		self.address.begin();
		self.projects.begin();
		self.error = None;

		let (address, projects) = (
			resolve(OWNERS.relation(client, id, "address"), None),
			resolve(OWNERS.relation(client, id, "projects"), Vec::new()),
		)
			.join()
			.await;

		self.address.settle(address);
		self.projects.settle(projects);
		self.error = combined_error([self.address.failed(), self.projects.failed()]);
	}

	pub fn reset(&mut self) {
		self.address.reset(None);
		self.projects.reset(Vec::new());
		self.error = None;
	}
}

#[derive(Debug, Default)]
pub struct OwnerView {
	pub owner: Option<Owner>,
	pub relations: OwnerRelations,
	pub loading: bool,
	pub error: Option<&'static str>,
}

impl OwnerView {
	pub async fn open(client: &dyn HttpClient, id: i64) -> Self {
		let mut view = Self {
			loading: true,
			..Self::default()
		};

		let result = OWNERS.get(client, id).await;
		view.loading = false;

		match result {
			Ok(owner) => {
				view.owner = Some(owner);
				view.relations.load(client, id).await;
			}
			Err(e) => {
				warn!(id, error = %e, "Failed to load owner");
				view.error = Some(messages::OWNER.load_one);
				view.relations.reset();
			}
		}

		view
	}
}

#[derive(Debug, Default)]
pub struct OwnerForm {
	pub draft: Owner,
	pub is_edit: bool,
	pub loading: bool,
	pub error: Option<&'static str>,
	pub relations: OwnerRelations,
	pub address_options: Vec<Address>,
	pub project_options: Vec<Project>,
	pub selected_address: Option<i64>,
	pub selected_projects: Vec<i64>,
}

impl OwnerForm {
	pub async fn open(client: &dyn HttpClient, id: Option<i64>) -> Self {
		let mut form = Self::default();

		let (addresses, projects) = (ADDRESSES.all(client), PROJECTS.all(client)).join().await;
		form.address_options = options_or_empty(ADDRESSES.base_url(), addresses);
		form.project_options = options_or_empty(PROJECTS.base_url(), projects);

		if let Some(id) = id {
			form.is_edit = true;
			form.load(client, id).await;
		}

		form
	}

	async fn load(&mut self, client: &dyn HttpClient, id: i64) {
		self.loading = true;
		self.error = None;
		let result = OWNERS.get(client, id).await;
		self.loading = false;

		match result {
			Ok(owner) => {
				self.draft = owner;
				self.relations.load(client, id).await;
				self.selected_address = self
					.relations
					.address
					.value
					.as_ref()
					.or(self.draft.address.as_ref())
					.and_then(Entity::id);
				self.selected_projects = self
					.relations
					.projects
					.value
					.iter()
					.filter_map(Entity::id)
					.collect();
			}
			Err(e) => {
				warn!(id, error = %e, "Failed to load owner");
				self.error = Some(messages::OWNER.load_one);
				self.relations.reset();
			}
		}
	}

	pub fn select_address(&mut self, token: &str) {
		self.selected_address = parse_id(token);
	}

	pub fn select_projects<'a>(&mut self, tokens: impl IntoIterator<Item = &'a str>) {
		self.selected_projects = parse_ids(tokens);
	}

	/// The draft with its relations rebuilt from the pickers.
	pub fn payload(&self) -> Owner {
		Owner {
			address: reconcile_one(
				&self.address_options,
				self.selected_address,
				self.relations.address.value.as_ref(),
			),
			projects: Some(reconcile_many(
				&self.project_options,
				&self.selected_projects,
				&self.relations.projects.value,
			)),
			..self.draft.clone()
		}
	}

	pub async fn submit(&mut self, client: &dyn HttpClient) -> Option<Navigation> {
		if is_blank(&self.draft.name) {
			self.error = Some(messages::REQUIRED_FIELDS_MISSING);
			return None;
		}

		self.loading = true;
		self.error = None;
		let id = self.draft.id.filter(|_| self.is_edit);
		let result = save(client, &OWNERS, id, &self.payload()).await;
		self.loading = false;

		match result {
			Ok(_) => Some(Navigation::to("/owners")),
			Err(e) => {
				warn!(error = %e, "Failed to save owner");
				self.error = Some(messages::OWNER.save(self.is_edit));
				None
			}
		}
	}
}
