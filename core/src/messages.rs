//! User-facing strings. Surfaces only ever show these, never raw error text.

pub const SCREEN_CONFIG_FAILED: &str = "Failed to load screen configuration.";
pub const RELATIONS_FAILED: &str = "Failed to load related data.";
pub const PREREQUISITES_MISSING: &str = "Complete the prerequisite records before proceeding.";
pub const REQUIRED_FIELDS_MISSING: &str = "Fill in all required fields.";
pub const UPLOAD_FAILED: &str = "Failed to upload file.";

/// Phrasings a surface reports for its entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
	pub load_one: &'static str,
	pub load_many: &'static str,
	pub create: &'static str,
	pub update: &'static str,
	pub delete: &'static str,
}

pub const RECORD: Messages = Messages {
	load_one: "Failed to load record.",
	load_many: "Failed to load records.",
	create: "Failed to create record.",
	update: "Failed to update record.",
	delete: "Failed to delete record.",
};

pub const OWNER: Messages = Messages {
	load_one: "Failed to load owner.",
	load_many: "Failed to load owners.",
	create: "Failed to create owner.",
	update: "Failed to update owner.",
	delete: "Failed to delete owner.",
};

pub const PROJECT: Messages = Messages {
	load_one: "Failed to load project.",
	load_many: "Failed to load projects.",
	create: "Failed to create project.",
	update: "Failed to update project.",
	delete: "Failed to delete project.",
};

pub const ADDRESS: Messages = Messages {
	load_one: "Failed to load address.",
	load_many: "Failed to load addresses.",
	create: "Failed to create address.",
	update: "Failed to update address.",
	delete: "Failed to delete address.",
};

pub const FILE: Messages = Messages {
	load_one: "Failed to load file.",
	load_many: "Failed to load files.",
	create: "Failed to create file.",
	update: "Failed to update file.",
	delete: "Failed to delete file.",
};

impl Messages {
	/// Picks the mutation phrasing for a form submit.
	pub fn save(&self, is_edit: bool) -> &'static str {
		if is_edit {
			self.update
		} else {
			self.create
		}
	}
}
