use futures_concurrency::future::Join;
use od_http::HttpClient;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{
	address::ADDRESSES, is_blank, options_or_empty, owner::OWNERS, save, Address, FileRecord, Owner,
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

pub const PROJECTS: Resource<Project> = Resource::new("/api/projects");

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<i64>,
	#[serde(default)]
	pub project_name: String,
	#[serde(default)]
	pub address: Option<Address>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub owners: Option<Vec<Owner>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub files: Option<Vec<FileRecord>>,
}

impl Entity for Project {
	fn id(&self) -> Option<i64> {
		self.id
	}
}

pub fn list(page_size: usize) -> ListState<Project> {
	ListState::new(PROJECTS, messages::PROJECT, page_size)
}

/// `/projects/{id}/address`, `/projects/{id}/owners` and `/projects/{id}/files`
#[derive(Debug, Default)]
pub struct ProjectRelations {
	pub address: Relation<Option<Address>>,
	pub owners: Relation<Vec<Owner>>,
	pub files: Relation<Vec<FileRecord>>,
	pub error: Option<&'static str>,
}

impl ProjectRelations {
	pub async fn load(&mut self, client: &dyn HttpClient, id: i64) {
		self.address.begin();
		self.owners.begin();
		self.files.begin();
		self.error = None;

		let (address, owners, files) = (
			resolve(PROJECTS.relation(client, id, "address"), None),
			resolve(PROJECTS.relation(client, id, "owners"), Vec::new()),
			resolve(PROJECTS.relation(client, id, "files"), Vec::new()),
		)
			.join()
			.await;

		self.address.settle(address);
		self.owners.settle(owners);
		self.files.settle(files);
		self.error = combined_error([
			self.address.failed(),
			self.owners.failed(),
			self.files.failed(),
		]);
	}

	pub fn reset(&mut self) {
		self.address.reset(None);
		self.owners.reset(Vec::new());
		self.files.reset(Vec::new());
		self.error = None;
	}
}

#[derive(Debug, Default)]
pub struct ProjectView {
	pub project: Option<Project>,
	pub relations: ProjectRelations,
	pub loading: bool,
	pub error: Option<&'static str>,
}

impl ProjectView {
	pub async fn open(client: &dyn HttpClient, id: i64) -> Self {
		let mut view = Self {
			loading: true,
			..Self::default()
		};

		let result = PROJECTS.get(client, id).await;
		view.loading = false;

		match result {
			Ok(project) => {
				view.project = Some(project);
				view.relations.load(client, id).await;
			}
			Err(e) => {
				warn!(id, error = %e, "Failed to load project");
				view.error = Some(messages::PROJECT.load_one);
				view.relations.reset();
			}
		}

		view
	}
}

#[derive(Debug, Default)]
pub struct ProjectForm {
	pub draft: Project,
	pub is_edit: bool,
	pub loading: bool,
	pub error: Option<&'static str>,
	pub relations: ProjectRelations,
	pub address_options: Vec<Address>,
	pub owner_options: Vec<Owner>,
	pub selected_address: Option<i64>,
	pub selected_owners: Vec<i64>,
}

impl ProjectForm {
	pub async fn open(client: &dyn HttpClient, id: Option<i64>) -> Self {
		let mut form = Self::default();

		let (addresses, owners) = (ADDRESSES.all(client), OWNERS.all(client)).join().await;
		form.address_options = options_or_empty(ADDRESSES.base_url(), addresses);
		form.owner_options = options_or_empty(OWNERS.base_url(), owners);

		if let Some(id) = id {
			form.is_edit = true;
			form.load(client, id).await;
		}

		form
	}

	async fn load(&mut self, client: &dyn HttpClient, id: i64) {
		self.loading = true;
		self.error = None;
		let result = PROJECTS.get(client, id).await;
		self.loading = false;

		match result {
			Ok(project) => {
				self.draft = project;
				self.relations.load(client, id).await;
				self.selected_address = self
					.relations
					.address
					.value
					.as_ref()
					.or(self.draft.address.as_ref())
					.and_then(Entity::id);
				self.selected_owners = self
					.relations
					.owners
					.value
					.iter()
					.filter_map(Entity::id)
					.collect();
			}
			Err(e) => {
				warn!(id, error = %e, "Failed to load project");
				self.error = Some(messages::PROJECT.load_one);
				self.relations.reset();
			}
		}
	}

	pub fn select_address(&mut self, token: &str) {
		self.selected_address = parse_id(token);
	}

	pub fn select_owners<'a>(&mut self, tokens: impl IntoIterator<Item = &'a str>) {
		self.selected_owners = parse_ids(tokens);
	}

	/// The draft with owners and address rebuilt from the pickers. Files are not
	/// picked here, so the fetched list is sent back untouched.
	pub fn payload(&self) -> Project {
		Project {
			address: reconcile_one(
				&self.address_options,
				self.selected_address,
				self.relations.address.value.as_ref(),
			),
			owners: Some(reconcile_many(
				&self.owner_options,
				&self.selected_owners,
				&self.relations.owners.value,
			)),
			files: self
				.is_edit
				.then(|| self.relations.files.value.clone()),
			..self.draft.clone()
		}
	}

	pub async fn submit(&mut self, client: &dyn HttpClient) -> Option<Navigation> {
		if is_blank(&self.draft.project_name) {
			self.error = Some(messages::REQUIRED_FIELDS_MISSING);
			return None;
		}

		self.loading = true;
		self.error = None;
		let id = self.draft.id.filter(|_| self.is_edit);
		let result = save(client, &PROJECTS, id, &self.payload()).await;
		self.loading = false;

		match result {
			Ok(_) => Some(Navigation::to("/projects")),
			Err(e) => {
				warn!(error = %e, "Failed to save project");
				self.error = Some(messages::PROJECT.save(self.is_edit));
				None
			}
		}
	}
}
