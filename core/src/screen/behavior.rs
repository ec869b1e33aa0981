//! Per-screen cascades and submission gates, looked up by screen key.

use serde_json::Value;

use super::record::{is_missing, Record};

pub const SITE_TYPE: &str = "siteType";
pub const SITE: &str = "site";
pub const SITE_ID: &str = "siteId";
pub const ADDRESS_ID: &str = "addressId";
pub const PROJECT_ID: &str = "projectId";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prerequisite {
	SiteOptions,
	ProjectOptions,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Behavior {
	/// `siteType` reloads the site picker, `site` back-fills `siteId` and `addressId`.
	pub site_cascade: bool,
	/// `projectId` pulls fields from the project and its contract.
	pub project_prefill: bool,
	/// A lookup list that must be non-empty before anything is submitted.
	pub gate: Option<Prerequisite>,
}

const PROJECT_LINKED: Behavior = Behavior {
	site_cascade: true,
	project_prefill: true,
	gate: Some(Prerequisite::ProjectOptions),
};

static BEHAVIORS: &[(&str, Behavior)] = &[
	("tickets", PROJECT_LINKED),
	("billings", PROJECT_LINKED),
	(
		"contract-registrations",
		Behavior {
			site_cascade: true,
			project_prefill: false,
			gate: Some(Prerequisite::SiteOptions),
		},
	),
];

/// Screens without an entry are plain CRUD.
pub fn behavior(screen_key: &str) -> Behavior {
	BEHAVIORS
		.iter()
		.find(|(key, _)| *key == screen_key)
		.map(|(_, behavior)| *behavior)
		.unwrap_or_default()
}

/// Sites endpoint for a site type, matched case-insensitively.
pub fn site_endpoint(site_type: &str) -> Option<&'static str> {
	match site_type.trim().to_ascii_uppercase().as_str() {
		"CLARO" => Some("/api/claro-sites"),
		"TIM" => Some("/api/tim-sites"),
		"VIVO" => Some("/api/vivo-sites"),
		_ => None,
	}
}

/// An entry of the site picker together with the values it back-fills.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteOption {
	pub value: String,
	pub label: String,
	pub site_id: Value,
	pub address_id: Value,
}

impl SiteOption {
	/// `None` for records without an id, which cannot be selected.
	pub fn from_record(record: &Record) -> Option<Self> {
		let id = record.get("id").filter(|id| !is_missing(Some(id)))?;
		let value = super::record::text(id);

		let label = ["siteName", "name", "siteCode"]
			.iter()
			.map(|key| record.text(key))
			.find(|label| !label.trim().is_empty())
			.unwrap_or_else(|| value.clone());

		let site_id = present(record.get(SITE_ID)).unwrap_or(id).clone();
		let address_id = present(record.get(ADDRESS_ID))
			.or_else(|| present(record.get("address").and_then(|address| address.get("id"))))
			.cloned()
			.unwrap_or(Value::Null);

		Some(Self {
			value,
			label,
			site_id,
			address_id,
		})
	}
}

fn present(value: Option<&Value>) -> Option<&Value> {
	value.filter(|value| !is_missing(Some(value)))
}

#[derive(Debug, Clone, Copy)]
enum Source {
	Project,
	Contract,
}

/// Draft key, the payload it comes from, and where it sits in that payload.
const PREFILL: &[(&str, Source, &[&str])] = &[
	("projectName", Source::Project, &["projectName"]),
	(ADDRESS_ID, Source::Project, &["address", "id"]),
	("contractNumber", Source::Contract, &["contractNumber"]),
	("clientName", Source::Contract, &["clientName"]),
	(SITE_TYPE, Source::Contract, &["siteType"]),
	(SITE_ID, Source::Contract, &["siteId"]),
];

/// Copies the prefilled fields into the draft. A server value wins when it is
/// present and not null, then whatever the draft already held, then `""`.
pub fn prefill(draft: &mut Record, project: &Value, contract: &Value) {
	for (key, source, path) in PREFILL {
		let payload = match source {
			Source::Project => project,
			Source::Contract => contract,
		};

		let server = path
			.iter()
			.try_fold(payload, |value, segment| value.get(*segment))
			.filter(|value| !value.is_null());

		let value = server
			.or_else(|| draft.get(key).filter(|value| !value.is_null()))
			.cloned()
			.unwrap_or_else(|| Value::String(String::new()));

		draft.set(key, value);
	}
}
