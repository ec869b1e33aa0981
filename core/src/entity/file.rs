use od_http::{HttpClient, Upload};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{is_blank, save, Project};
use crate::{
	list::ListState,
	messages,
	relation::{combined_error, parse_id, resolve, Relation},
	resource::{Entity, Resource},
	Navigation,
};

pub const FILES: Resource<FileRecord> = Resource::new("/api/files");

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<i64>,
	#[serde(default)]
	pub filename: String,
	#[serde(default)]
	pub path: String,
	#[serde(default)]
	pub project_id: Option<i64>,
}

impl Entity for FileRecord {
	fn id(&self) -> Option<i64> {
		self.id
	}
}

pub fn list(page_size: usize) -> ListState<FileRecord> {
	ListState::new(FILES, messages::FILE, page_size)
}

/// `/files/{id}/project`
#[derive(Debug, Default)]
pub struct FileRelations {
	pub project: Relation<Option<Project>>,
	pub error: Option<&'static str>,
}

impl FileRelations {
	pub async fn load(&mut self, client: &dyn HttpClient, id: i64) {
		self.project.begin();
		self.error = None;

		let project = resolve(FILES.relation(client, id, "project"), None).await;
		self.project.settle(project);
		self.error = combined_error([self.project.failed()]);
	}

	pub fn reset(&mut self) {
		self.project.reset(None);
		self.error = None;
	}
}

#[derive(Debug, Default)]
pub struct FileView {
	pub file: Option<FileRecord>,
	pub relations: FileRelations,
	pub loading: bool,
	pub error: Option<&'static str>,
}

impl FileView {
	pub async fn open(client: &dyn HttpClient, id: i64) -> Self {
		let mut view = Self {
			loading: true,
			..Self::default()
		};

		let result = FILES.get(client, id).await;
		view.loading = false;

		match result {
			Ok(file) => {
				view.file = Some(file);
				view.relations.load(client, id).await;
			}
			Err(e) => {
				warn!(id, error = %e, "Failed to load file");
				view.error = Some(messages::FILE.load_one);
				view.relations.reset();
			}
		}

		view
	}
}

#[derive(Debug, Default)]
pub struct FileForm {
	pub draft: FileRecord,
	pub is_edit: bool,
	pub loading: bool,
	pub error: Option<&'static str>,
	pub relations: FileRelations,
	pub uploading: bool,
	pub upload_error: Option<&'static str>,
}

impl FileForm {
	pub async fn open(client: &dyn HttpClient, id: Option<i64>) -> Self {
		let mut form = Self::default();
		let Some(id) = id else {
			return form;
		};

		form.is_edit = true;
		form.loading = true;
		let result = FILES.get(client, id).await;
		form.loading = false;

		match result {
			Ok(file) => form.hydrate(client, file).await,
			Err(e) => {
				warn!(id, error = %e, "Failed to load file");
				form.error = Some(messages::FILE.load_one);
				form.relations.reset();
			}
		}

		form
	}

	async fn hydrate(&mut self, client: &dyn HttpClient, file: FileRecord) {
		let id = file.id;
		self.draft = file;

		match id {
			Some(id) => self.relations.load(client, id).await,
			None => self.relations.reset(),
		}
	}

	pub fn set_project(&mut self, token: &str) {
		self.draft.project_id = parse_id(token);
	}

	/// Uploads new content: creates a record when the draft is unsaved, replaces the
	/// stored file otherwise. Ignored while another upload is running.
	pub async fn upload(&mut self, client: &dyn HttpClient, file_name: &str, bytes: Vec<u8>) {
		if self.uploading {
			return;
		}

		self.uploading = true;
		self.upload_error = None;

		let upload = Upload {
			file_name: file_name.to_string(),
			bytes,
			project_id: self.draft.project_id,
		};
		let result = FILES.upload(client, self.draft.id, upload).await;
		self.uploading = false;

		match result {
			Ok(saved) => {
				info!(id = ?saved.id, file_name, "Uploaded file");
				self.draft = saved;
			}
			Err(e) => {
				warn!(error = %e, "Failed to upload file");
				self.upload_error = Some(messages::UPLOAD_FAILED);
			}
		}
	}

	pub async fn submit(&mut self, client: &dyn HttpClient) -> Option<Navigation> {
		if is_blank(&self.draft.filename) {
			self.error = Some(messages::REQUIRED_FIELDS_MISSING);
			return None;
		}

		self.loading = true;
		self.error = None;
		let id = self.draft.id.filter(|_| self.is_edit);
		let result = save(client, &FILES, id, &self.draft).await;
		self.loading = false;

		match result {
			Ok(_) => Some(Navigation::to("/files")),
			Err(e) => {
				warn!(error = %e, "Failed to save file");
				self.error = Some(messages::FILE.save(self.is_edit));
				None
			}
		}
	}
}
