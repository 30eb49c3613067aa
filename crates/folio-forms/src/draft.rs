//! In-progress form values and the field-level error map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current, possibly invalid, values of a form keyed by field name.
///
/// Missing fields read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormDraft {
	values: BTreeMap<String, String>,
}

impl FormDraft {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder form of [`FormDraft::set`].
	///
	/// # Examples
	///
	/// ```
	/// use folio_forms::FormDraft;
	///
	/// let draft = FormDraft::new().with("name", "Jo").with("email", "jo@x.co");
	/// assert_eq!(draft.value("name"), "Jo");
	/// assert_eq!(draft.value("message"), "");
	/// ```
	pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
		self.set(field, value);
		self
	}

	pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
		self.values.insert(field.into(), value.into());
	}

	pub fn get(&self, field: &str) -> Option<&str> {
		self.values.get(field).map(String::as_str)
	}

	/// Value of `field`, or `""` when it was never set.
	pub fn value(&self, field: &str) -> &str {
		self.get(field).unwrap_or("")
	}

	/// Whether every value is empty.
	pub fn is_blank(&self) -> bool {
		self.values.values().all(String::is_empty)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormDraft {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			values: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

/// Field-level validation messages. A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors {
	messages: BTreeMap<String, String>,
}

impl FormErrors {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
		self.messages.insert(field.into(), message.into());
	}

	pub fn get(&self, field: &str) -> Option<&str> {
		self.messages.get(field).map(String::as_str)
	}

	pub fn contains(&self, field: &str) -> bool {
		self.messages.contains_key(field)
	}

	pub fn remove(&mut self, field: &str) -> Option<String> {
		self.messages.remove(field)
	}

	pub fn clear(&mut self) {
		self.messages.clear();
	}

	pub fn len(&self) -> usize {
		self.messages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}

	/// Fields with errors, in name order.
	pub fn fields(&self) -> impl Iterator<Item = &str> {
		self.messages.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.messages.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}
