use std::collections::HashSet;

use futures_concurrency::future::Join;
use od_http::HttpClient;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{
	behavior::{
		self, prefill, site_endpoint, Behavior, Prerequisite, SiteOption, PROJECT_ID, SITE,
		SITE_TYPE,
	},
	config::{Field, InputType, ScreenConfig, SelectOption},
	record::{is_missing, text, Record},
};
use crate::{
	entity::{options_or_empty, Project, PROJECTS},
	messages,
	relation::{parse_id, resolve_all, RelationSpec},
	resource::{Entity, Resource},
	Navigation,
};

/// `/api/projects/{id}` and `/api/projects/{id}/contract`, read as raw JSON for prefill.
const PROJECT_PAYLOADS: Resource<Value> = Resource::new("/api/projects");

/// New/Edit state of a configured screen.
#[derive(Debug)]
pub struct ScreenForm {
	config: &'static ScreenConfig,
	behavior: Behavior,
	pub draft: Record,
	pub is_edit: bool,
	pub loading: bool,
	pub error: Option<&'static str>,
	pub project_options: Vec<SelectOption>,
	pub site_options: Vec<SiteOption>,
	shown_optional: HashSet<&'static str>,
}

impl ScreenForm {
	pub fn new(config: &'static ScreenConfig) -> Self {
		Self {
			config,
			behavior: behavior::behavior(config.key),
			draft: config.empty_draft(),
			is_edit: false,
			loading: false,
			error: None,
			project_options: Vec::new(),
			site_options: Vec::new(),
			shown_optional: HashSet::new(),
		}
	}

	/// Opens a blank form, or the record `id` merged over a blank draft.
	pub async fn open(
		client: &dyn HttpClient,
		config: &'static ScreenConfig,
		id: Option<i64>,
	) -> Self {
		let mut form = Self::new(config);
		let resource = Resource::<Record>::new(config.base_url);
		let wants_projects = form.behavior.project_prefill;

		let load_projects = async {
			if wants_projects {
				Some(PROJECTS.all(client).await)
			} else {
				None
			}
		};
		let load_record = async {
			match id {
				Some(id) => Some(resource.get(client, id).await),
				None => None,
			}
		};

		form.is_edit = id.is_some();
		form.loading = form.is_edit;
		let (projects, record) = (load_projects, load_record).join().await;
		form.loading = false;

		if let Some(projects) = projects {
			form.project_options = project_options(options_or_empty(PROJECTS.base_url(), projects));
		}

		match record {
			Some(Ok(record)) => {
				form.draft = record.merged_over(config.empty_draft());
				if form.behavior.site_cascade && !is_missing(form.draft.get(SITE_TYPE)) {
					form.load_site_options(client).await;
				}
			}
			Some(Err(e)) => {
				warn!(screen = config.key, id, error = %e, "Failed to load record");
				form.error = Some(messages::RECORD.load_one);
			}
			None => {}
		}

		form
	}

	pub fn config(&self) -> &'static ScreenConfig {
		self.config
	}

	pub fn title(&self) -> String {
		if self.is_edit {
			format!("Edit {}", self.config.title)
		} else {
			format!("New {}", self.config.title)
		}
	}

	/// Sets a draft value and runs whatever cascade the screen attaches to `key`.
	pub async fn update_field(&mut self, client: &dyn HttpClient, key: &str, value: Value) {
		self.draft.set(key, value);

		match key {
			SITE_TYPE if self.behavior.site_cascade => self.load_site_options(client).await,
			SITE if self.behavior.site_cascade => self.backfill_site(),
			PROJECT_ID if self.behavior.project_prefill => self.prefill_from_project(client).await,
			_ => {}
		}
	}

	/// Shows or hides an optional field. Returns whether it is now shown.
	pub fn toggle_optional(&mut self, key: &str) -> bool {
		let Some(field) = self.config.field(key).filter(|field| field.optional) else {
			return false;
		};

		if !self.shown_optional.remove(field.key) {
			self.shown_optional.insert(field.key);
			true
		} else {
			false
		}
	}

	pub fn visible_fields(&self) -> Vec<&'static Field> {
		self.config
			.fields
			.iter()
			.filter(|field| !field.optional || self.shown_optional.contains(field.key))
			.collect()
	}

	/// Choices for a select: the configured ones, or the loaded project/site pickers.
	pub fn options_for(&self, key: &str) -> Vec<SelectOption> {
		match key {
			PROJECT_ID if self.behavior.project_prefill => self.project_options.clone(),
			SITE if self.behavior.site_cascade => self
				.site_options
				.iter()
				.map(|site| SelectOption::new(site.value.clone(), site.label.clone()))
				.collect(),
			_ => self
				.config
				.field(key)
				.filter(|field| field.input_type == InputType::Select)
				.map(|field| field.options.clone())
				.unwrap_or_default(),
		}
	}

	pub async fn submit(&mut self, client: &dyn HttpClient) -> Option<Navigation> {
		if !self.prerequisites_met() {
			self.error = Some(messages::PREREQUISITES_MISSING);
			return None;
		}

		if self
			.config
			.fields
			.iter()
			.any(|field| field.required && is_missing(self.draft.get(field.key)))
		{
			self.error = Some(messages::REQUIRED_FIELDS_MISSING);
			return None;
		}

		self.loading = true;
		self.error = None;
		let resource = Resource::<Record>::new(self.config.base_url);
		let result = match self.draft.id().filter(|_| self.is_edit) {
			Some(id) => resource.update(client, id, &self.draft).await,
			None => resource.create(client, &self.draft).await,
		};
		self.loading = false;

		match result {
			Ok(saved) => {
				info!(screen = self.config.key, id = ?saved.id(), "Saved record");
				Some(Navigation::to(self.config.list_route()))
			}
			Err(e) => {
				warn!(screen = self.config.key, error = %e, "Failed to save record");
				self.error = Some(messages::RECORD.save(self.is_edit));
				None
			}
		}
	}

	fn prerequisites_met(&self) -> bool {
		match self.behavior.gate {
			Some(Prerequisite::SiteOptions) => !self.site_options.is_empty(),
			Some(Prerequisite::ProjectOptions) => !self.project_options.is_empty(),
			None => true,
		}
	}

	async fn load_site_options(&mut self, client: &dyn HttpClient) {
		let site_type = self.draft.text(SITE_TYPE);
		let Some(endpoint) = site_endpoint(&site_type) else {
			debug!(%site_type, "No sites for site type");
			self.site_options.clear();
			return;
		};

		let sites = Resource::<Record>::new(endpoint).all(client).await;
		self.site_options = options_or_empty(endpoint, sites)
			.iter()
			.filter_map(SiteOption::from_record)
			.collect();
	}

	fn backfill_site(&mut self) {
		let selected = self.draft.text(SITE);
		let Some(site) = self.site_options.iter().find(|site| site.value == selected) else {
			return;
		};

		let (site_id, address_id) = (site.site_id.clone(), site.address_id.clone());
		self.draft.set(behavior::SITE_ID, site_id);
		self.draft.set(behavior::ADDRESS_ID, address_id);
	}

	async fn prefill_from_project(&mut self, client: &dyn HttpClient) {
		let project_id = self.draft.get(PROJECT_ID).map(text);
		let Some(project_id) = project_id.as_deref().and_then(parse_id) else {
			return;
		};

		let payloads = &PROJECT_PAYLOADS;
		let specs = vec![
			RelationSpec::new("project", move |id| payloads.get(client, id), Value::Null),
			RelationSpec::new(
				"contract",
				move |id| payloads.relation(client, id, "contract"),
				Value::Null,
			),
		];
		let resolved = resolve_all(project_id, specs).await;

		if resolved.iter().any(|slot| slot.error.is_some()) {
			self.error = Some(messages::RELATIONS_FAILED);
		}

		let mut values = resolved.into_iter().map(|slot| slot.value);
		let project = values.next().unwrap_or_default();
		let contract = values.next().unwrap_or_default();
		prefill(&mut self.draft, &project, &contract);
	}
}

fn project_options(projects: Vec<Project>) -> Vec<SelectOption> {
	projects
		.into_iter()
		.filter_map(|project| {
			let id = project.id?;
			let label = if project.project_name.trim().is_empty() {
				id.to_string()
			} else {
				project.project_name
			};
			Some(SelectOption::new(id.to_string(), label))
		})
		.collect()
}
