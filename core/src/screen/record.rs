use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::resource::Entity;

/// A record of a configured screen, kept as the JSON object the backend sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
	pub fn blank<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
		Self(
			keys.into_iter()
				.map(|key| (key.to_string(), Value::String(String::new())))
				.collect(),
		)
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	pub fn set(&mut self, key: &str, value: Value) {
		self.0.insert(key.to_string(), value);
	}

	/// `self` laid over `base`: keys the server left out keep their blank default.
	pub fn merged_over(self, mut base: Record) -> Record {
		base.0.extend(self.0);
		base
	}

	pub fn text(&self, key: &str) -> String {
		self.get(key).map(text).unwrap_or_default()
	}
}

impl Entity for Record {
	fn id(&self) -> Option<i64> {
		self.get("id").and_then(Value::as_i64)
	}
}

/// Whether a required field counts as unfilled. Numbers and booleans are always
/// filled, `0` and `false` included.
pub fn is_missing(value: Option<&Value>) -> bool {
	match value {
		None | Some(Value::Null) => true,
		Some(Value::String(s)) => s.is_empty(),
		Some(Value::Object(map)) => map.is_empty(),
		Some(Value::Array(items)) => items.is_empty(),
		Some(Value::Number(_)) | Some(Value::Bool(_)) => false,
	}
}

/// Display form of a field value.
pub fn text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}
