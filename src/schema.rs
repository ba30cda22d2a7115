//! Field schema model: the wire shape served over OPTIONS and a
//! programmatic builder for constructing it.
//!
//! A schema node is either a [`LeafField`] (one input) or a [`GroupField`]
//! (a named set of nested fields). On the wire the distinction is the
//! presence of a `fields` array, which serde resolves through the untagged
//! [`Field`] enum.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
	#[error("missing name in field definition")]
	MissingName,

	#[error("name {0} exists")]
	DuplicateName(String),
}

fn is_false(value: &bool) -> bool {
	!*value
}

/// One schema node.
///
/// Deserialization is untagged: a node carrying `fields` becomes a
/// [`Field::Group`], anything else a [`Field::Leaf`].
///
/// # Examples
///
/// ```
/// use restform::schema::Field;
///
/// let node: Field = serde_json::from_value(serde_json::json!({
///     "name": "things",
///     "fields": [{"name": "yin"}, {"name": "yang"}],
/// })).unwrap();
/// assert!(matches!(node, Field::Group(_)));
///
/// let node: Field = serde_json::from_value(serde_json::json!({
///     "name": "people",
///     "style": "textarea",
/// })).unwrap();
/// assert!(matches!(node, Field::Leaf(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
	Group(GroupField),
	Leaf(LeafField),
}

impl Field {
	pub fn name(&self) -> &str {
		match self {
			Field::Group(group) => &group.name,
			Field::Leaf(leaf) => &leaf.name,
		}
	}

	pub fn as_leaf(&self) -> Option<&LeafField> {
		match self {
			Field::Leaf(leaf) => Some(leaf),
			Field::Group(_) => None,
		}
	}

	pub fn as_group(&self) -> Option<&GroupField> {
		match self {
			Field::Group(group) => Some(group),
			Field::Leaf(_) => None,
		}
	}
}

impl From<LeafField> for Field {
	fn from(leaf: LeafField) -> Self {
		Field::Leaf(leaf)
	}
}

impl From<GroupField> for Field {
	fn from(group: GroupField) -> Self {
		Field::Group(group)
	}
}

/// A single input.
///
/// Absent attributes are omitted on the wire, matching the server's sparse
/// field dicts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeafField {
	pub name: String,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<Value>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub original: Option<Value>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default: Option<Value>,

	/// Ordered selectable values. Present means the field is choice-type.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub options: Option<Vec<String>>,

	/// Display labels for `options`, keyed or parallel per server convention.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub labels: Option<Value>,

	/// Rendering hint, e.g. `"select"` or `"textarea"`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub style: Option<String>,

	/// Checkbox set rather than a single choice.
	#[serde(default, skip_serializing_if = "is_false")]
	pub multi: bool,

	/// Changing this field re-drives the schema round-trip.
	#[serde(default, skip_serializing_if = "is_false")]
	pub trigger: bool,

	#[serde(default, skip_serializing_if = "is_false")]
	pub readonly: bool,

	#[serde(default, skip_serializing_if = "is_false")]
	pub header: bool,
}

impl LeafField {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_value(mut self, value: impl Into<Value>) -> Self {
		self.value = Some(value.into());
		self
	}

	pub fn with_original(mut self, original: impl Into<Value>) -> Self {
		self.original = Some(original.into());
		self
	}

	pub fn with_default(mut self, default: impl Into<Value>) -> Self {
		self.default = Some(default.into());
		self
	}

	pub fn with_options<I, S>(mut self, options: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.options = Some(options.into_iter().map(Into::into).collect());
		self
	}

	pub fn with_labels(mut self, labels: impl Into<Value>) -> Self {
		self.labels = Some(labels.into());
		self
	}

	pub fn with_style(mut self, style: impl Into<String>) -> Self {
		self.style = Some(style.into());
		self
	}

	pub fn multi(mut self) -> Self {
		self.multi = true;
		self
	}

	pub fn trigger(mut self) -> Self {
		self.trigger = true;
		self
	}

	pub fn readonly(mut self) -> Self {
		self.readonly = true;
		self
	}

	pub fn header(mut self) -> Self {
		self.header = true;
		self
	}
}

/// A named group of nested fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupField {
	pub name: String,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,

	/// Group value: an object whose entries seed the nested fields.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<Value>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub original: Option<Value>,

	pub fields: Vec<Field>,
}

impl GroupField {
	pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
		Self {
			name: name.into(),
			label: None,
			value: None,
			original: None,
			fields,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_value(mut self, value: impl Into<Value>) -> Self {
		self.value = Some(value.into());
		self
	}

	pub fn with_original(mut self, original: impl Into<Value>) -> Self {
		self.original = Some(original.into());
		self
	}
}

/// Ordered field collection with name uniqueness, used to build the schema
/// the server serves over OPTIONS.
///
/// Seeding maps passed via [`Schema::with_values`] / [`Schema::with_originals`]
/// fill in per-field `value` / `original` as fields are pushed, recursing
/// into groups whose seeded value is an object.
///
/// # Examples
///
/// ```
/// use restform::schema::{LeafField, Schema, SchemaError};
///
/// let mut schema = Schema::new();
/// schema.push(LeafField::new("kind").with_options(["a", "b"])).unwrap();
/// assert_eq!(
///     schema.push(LeafField::new("kind")),
///     Err(SchemaError::DuplicateName("kind".to_string())),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
	fields: Vec<Field>,
	names: HashMap<String, usize>,
	values: HashMap<String, Value>,
	originals: HashMap<String, Value>,
}

impl Schema {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_values(mut self, values: HashMap<String, Value>) -> Self {
		self.values = values;
		self
	}

	pub fn with_originals(mut self, originals: HashMap<String, Value>) -> Self {
		self.originals = originals;
		self
	}

	pub fn push(&mut self, field: impl Into<Field>) -> Result<(), SchemaError> {
		let mut field = field.into();
		if field.name().is_empty() {
			return Err(SchemaError::MissingName);
		}
		if self.names.contains_key(field.name()) {
			return Err(SchemaError::DuplicateName(field.name().to_string()));
		}
		seed(&mut field, &self.values, &self.originals);
		self.names.insert(field.name().to_string(), self.fields.len());
		self.fields.push(field);
		Ok(())
	}

	pub fn extend<I, F>(&mut self, fields: I) -> Result<(), SchemaError>
	where
		I: IntoIterator<Item = F>,
		F: Into<Field>,
	{
		for field in fields {
			self.push(field)?;
		}
		Ok(())
	}

	pub fn get(&self, name: &str) -> Option<&Field> {
		self.names.get(name).map(|&index| &self.fields[index])
	}

	pub fn fields(&self) -> &[Field] {
		&self.fields
	}

	pub fn into_fields(self) -> Vec<Field> {
		self.fields
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Field> {
		self.fields.iter()
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl<'a> IntoIterator for &'a Schema {
	type Item = &'a Field;
	type IntoIter = std::slice::Iter<'a, Field>;

	fn into_iter(self) -> Self::IntoIter {
		self.fields.iter()
	}
}

fn seed(field: &mut Field, values: &HashMap<String, Value>, originals: &HashMap<String, Value>) {
	match field {
		Field::Leaf(leaf) => {
			if leaf.value.is_none() {
				leaf.value = values.get(&leaf.name).cloned();
			}
			if leaf.original.is_none() {
				leaf.original = originals.get(&leaf.name).cloned();
			}
		}
		Field::Group(group) => {
			if group.value.is_none() {
				group.value = values.get(&group.name).cloned();
			}
			if group.original.is_none() {
				group.original = originals.get(&group.name).cloned();
			}
			let nested_values = object_entries(group.value.as_ref());
			let nested_originals = object_entries(group.original.as_ref());
			for child in &mut group.fields {
				seed(child, &nested_values, &nested_originals);
			}
		}
	}
}

fn object_entries(value: Option<&Value>) -> HashMap<String, Value> {
	match value.and_then(Value::as_object) {
		Some(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
		None => HashMap::new(),
	}
}

/// The last-fetched response envelope driving the current view.
///
/// Replaced wholesale on every server round-trip; never partially mutated.
/// Anything the server returns beyond `fields` and `errors` (typically the
/// resource payload keyed by the singular name) lands in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub fields: Vec<Field>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub errors: Option<Vec<String>>,

	#[serde(flatten)]
	pub extra: serde_json::Map<String, Value>,
}

impl Descriptor {
	/// Validation failed when the server included an `errors` key.
	///
	/// Key presence is what counts: an empty `errors` array still blocks the
	/// write and re-renders.
	pub fn has_errors(&self) -> bool {
		self.errors.is_some()
	}

	/// The resource payload under its singular name, if present.
	pub fn resource(&self, singular: &str) -> Option<&Value> {
		self.extra.get(singular)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn push_rejects_duplicate_and_missing_names() {
		let mut schema = Schema::new();
		schema.push(LeafField::new("types")).unwrap();
		assert_eq!(
			schema.push(LeafField::new("types")),
			Err(SchemaError::DuplicateName("types".to_string())),
		);
		assert_eq!(schema.push(LeafField::new("")), Err(SchemaError::MissingName));
		assert_eq!(schema.len(), 1);
	}

	#[test]
	fn push_seeds_value_and_original() {
		let mut schema = Schema::new()
			.with_values(HashMap::from([("people".to_string(), json!("us"))]))
			.with_originals(HashMap::from([("people".to_string(), json!("them"))]));
		schema.push(LeafField::new("people")).unwrap();
		schema.push(LeafField::new("unset")).unwrap();

		let leaf = schema.get("people").and_then(Field::as_leaf).unwrap();
		assert_eq!(leaf.value, Some(json!("us")));
		assert_eq!(leaf.original, Some(json!("them")));

		let leaf = schema.get("unset").and_then(Field::as_leaf).unwrap();
		assert_eq!(leaf.value, None);
	}

	#[test]
	fn explicit_value_wins_over_seed() {
		let mut schema =
			Schema::new().with_values(HashMap::from([("people".to_string(), json!("seeded"))]));
		schema
			.push(LeafField::new("people").with_value("explicit"))
			.unwrap();
		let leaf = schema.get("people").and_then(Field::as_leaf).unwrap();
		assert_eq!(leaf.value, Some(json!("explicit")));
	}

	#[test]
	fn group_value_seeds_nested_fields() {
		let mut schema = Schema::new()
			.with_values(HashMap::from([("things".to_string(), json!({"yin": 1, "yang": 2}))]));
		schema
			.push(GroupField::new(
				"things",
				vec![LeafField::new("yin").into(), LeafField::new("yang").into()],
			))
			.unwrap();

		let group = schema.get("things").and_then(Field::as_group).unwrap();
		assert_eq!(group.value, Some(json!({"yin": 1, "yang": 2})));
		let yin = group.fields[0].as_leaf().unwrap();
		assert_eq!(yin.value, Some(json!(1)));
	}

	#[test]
	fn leaf_serializes_sparse() {
		let leaf = LeafField::new("types")
			.with_options(["textarea", "options", "fields"])
			.multi()
			.trigger();
		assert_eq!(
			serde_json::to_value(Field::from(leaf)).unwrap(),
			json!({
				"name": "types",
				"options": ["textarea", "options", "fields"],
				"multi": true,
				"trigger": true,
			}),
		);
	}

	#[test]
	fn untagged_field_resolves_group_by_fields_key() {
		let node: Field = serde_json::from_value(json!({
			"name": "things",
			"fields": [{"name": "yin"}],
		}))
		.unwrap();
		let group = node.as_group().unwrap();
		assert_eq!(group.fields.len(), 1);
		assert_eq!(group.fields[0].name(), "yin");

		let node: Field = serde_json::from_value(json!({"name": "people"})).unwrap();
		assert!(node.as_leaf().is_some());
	}

	#[test]
	fn descriptor_errors_presence_counts_even_when_empty() {
		let descriptor: Descriptor =
			serde_json::from_value(json!({"fields": [], "errors": []})).unwrap();
		assert!(descriptor.has_errors());

		let descriptor: Descriptor = serde_json::from_value(json!({"fields": []})).unwrap();
		assert!(!descriptor.has_errors());
	}

	#[test]
	fn descriptor_keeps_resource_payload_in_extra() {
		let descriptor: Descriptor = serde_json::from_value(json!({
			"fields": [{"name": "id", "readonly": true}],
			"widget": {"id": 42, "people": "us"},
		}))
		.unwrap();
		assert_eq!(descriptor.resource("widget").unwrap()["id"], json!(42));
		assert!(descriptor.resource("gadget").is_none());
	}
}
