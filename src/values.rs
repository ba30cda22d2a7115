//! Submitted form values.
//!
//! A [`ValuesMap`] is built fresh from live form state before each write
//! request and discarded afterwards; it is never persisted.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field name to submitted value, one entry per non-readonly field.
///
/// Insertion-ordered: entries appear in schema walk order, and serialize to
/// the wire in that order.
pub type ValuesMap = IndexMap<String, FormValue>;

/// One submitted value: free text, a checkbox set, or a nested group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
	Text(String),
	Many(Vec<String>),
	Group(ValuesMap),
}

impl FormValue {
	pub fn as_text(&self) -> Option<&str> {
		match self {
			FormValue::Text(text) => Some(text),
			_ => None,
		}
	}

	pub fn as_many(&self) -> Option<&[String]> {
		match self {
			FormValue::Many(values) => Some(values),
			_ => None,
		}
	}

	pub fn as_group(&self) -> Option<&ValuesMap> {
		match self {
			FormValue::Group(values) => Some(values),
			_ => None,
		}
	}
}

impl From<&str> for FormValue {
	fn from(text: &str) -> Self {
		FormValue::Text(text.to_string())
	}
}

impl From<String> for FormValue {
	fn from(text: String) -> Self {
		FormValue::Text(text)
	}
}

impl From<Vec<String>> for FormValue {
	fn from(values: Vec<String>) -> Self {
		FormValue::Many(values)
	}
}

impl From<ValuesMap> for FormValue {
	fn from(values: ValuesMap) -> Self {
		FormValue::Group(values)
	}
}
