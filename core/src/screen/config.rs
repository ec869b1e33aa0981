use serde::Serialize;

use super::record::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
	#[default]
	Text,
	Select,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
	pub value: String,
	pub label: String,
}

impl SelectOption {
	pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
		}
	}
}

/// One input of a configured screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
	pub key: &'static str,
	pub label: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub placeholder: Option<&'static str>,
	pub required: bool,
	/// Hidden on forms until the user asks for it; unrelated to `required`.
	pub optional: bool,
	pub read_only: bool,
	pub input_type: InputType,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub options: Vec<SelectOption>,
	/// Only an explicit `false` removes the field from list columns.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub show_in_list: Option<bool>,
}

impl Field {
	pub fn text(key: &'static str, label: &'static str) -> Self {
		Self {
			key,
			label,
			placeholder: None,
			required: false,
			optional: false,
			read_only: false,
			input_type: InputType::Text,
			options: Vec::new(),
			show_in_list: None,
		}
	}

	pub fn select(key: &'static str, label: &'static str) -> Self {
		Self {
			input_type: InputType::Select,
			..Self::text(key, label)
		}
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn optional(mut self) -> Self {
		self.optional = true;
		self
	}

	pub fn read_only(mut self) -> Self {
		self.read_only = true;
		self
	}

	pub fn placeholder(mut self, placeholder: &'static str) -> Self {
		self.placeholder = Some(placeholder);
		self
	}

	pub fn hidden_in_list(mut self) -> Self {
		self.show_in_list = Some(false);
		self
	}

	pub fn options(mut self, options: &[(&str, &str)]) -> Self {
		self.options = options
			.iter()
			.map(|(value, label)| SelectOption::new(*value, *label))
			.collect();
		self
	}

	pub fn is_listed(&self) -> bool {
		self.show_in_list != Some(false)
	}
}

/// Declarative description of a record type: where it lives on the backend, where
/// its list route is, and which fields its surfaces render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenConfig {
	pub key: &'static str,
	pub title: &'static str,
	pub base_url: &'static str,
	pub route: &'static str,
	pub fields: Vec<Field>,
}

impl ScreenConfig {
	pub fn field(&self, key: &str) -> Option<&Field> {
		self.fields.iter().find(|field| field.key == key)
	}

	/// List columns. A config that hides every field still gets all of them.
	pub fn list_fields(&self) -> Vec<&Field> {
		let listed = self
			.fields
			.iter()
			.filter(|field| field.is_listed())
			.collect::<Vec<_>>();

		if listed.is_empty() {
			self.fields.iter().collect()
		} else {
			listed
		}
	}

	/// A draft holding every field key, each set to `""`.
	pub fn empty_draft(&self) -> Record {
		Record::blank(self.fields.iter().map(|field| field.key))
	}

	pub fn list_route(&self) -> String {
		format!("/{}", self.route)
	}
}
