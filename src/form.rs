//! Live form state and the walk that turns a field schema into a values
//! payload.
//!
//! [`FormSource`] is the seam to whatever holds the rendered form (a DOM, a
//! TUI, a test fixture). [`fields_values`] walks a schema against it and
//! produces the [`ValuesMap`] submitted back to the server.

use crate::schema::Field;
use crate::values::{FormValue, ValuesMap};
use std::collections::HashMap;

/// Read access to rendered form controls.
///
/// Single inputs are addressed by element id, checkbox/radio groups by a
/// shared control name. Both identifiers are derived from the schema path by
/// [`control_name`].
pub trait FormSource: Send + Sync {
	/// Current value of a single input, `None` when the control is absent.
	fn value(&self, id: &str) -> Option<String>;

	/// Checked values of a checkbox/radio group, in form order.
	fn checked(&self, name: &str) -> Vec<String>;
}

/// HashMap-backed [`FormSource`] for tests and embedders without a real
/// form layer.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
	values: HashMap<String, String>,
	checked: HashMap<String, Vec<String>>,
}

impl MemoryForm {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the value of a single input.
	pub fn set(&mut self, id: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.values.insert(id.into(), value.into());
		self
	}

	/// Check one value of a checkbox/radio group. Checks accumulate in call
	/// order, which stands in for form order.
	pub fn check(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.checked.entry(name.into()).or_default().push(value.into());
		self
	}
}

impl FormSource for MemoryForm {
	fn value(&self, id: &str) -> Option<String> {
		self.values.get(id).cloned()
	}

	fn checked(&self, name: &str) -> Vec<String> {
		self.checked.get(name).cloned().unwrap_or_default()
	}
}

/// Control identifier for a schema path: segments joined by `-`, dots
/// flattened to `-` as well.
pub fn control_name(prefix: &[String], name: &str) -> String {
	let mut parts: Vec<&str> = prefix.iter().map(String::as_str).collect();
	parts.push(name);
	parts.join("-").replace('.', "-")
}

/// Walk a schema against live form state and collect submitted values.
///
/// Rules, in order of precedence:
///
/// 1. Groups recurse with the prefix extended by the group name; the result
///    nests under that name.
/// 2. `readonly` leaves are skipped entirely.
/// 3. Choice leaves (`options` present, not styled `"select"`) read checked
///    state by control name. `multi` collects every checked value found in
///    the option list, in form order; single choice takes the first checked
///    value, and drops it silently when it is not a listed option.
/// 4. Every other leaf reads a single value by the same identifier; an
///    absent control leaves no entry.
/// 5. A leaf named `yaml` whose value came back empty is coerced to `"{}"`.
pub fn fields_values(form: &dyn FormSource, prefix: &[String], fields: &[Field]) -> ValuesMap {
	let mut values = ValuesMap::new();
	for field in fields {
		match field {
			Field::Group(group) => {
				let mut nested = prefix.to_vec();
				nested.push(group.name.clone());
				values.insert(
					group.name.clone(),
					FormValue::Group(fields_values(form, &nested, &group.fields)),
				);
			}
			Field::Leaf(leaf) => {
				if leaf.readonly {
					continue;
				}
				let control = control_name(prefix, &leaf.name);
				let value = match &leaf.options {
					Some(options) if leaf.style.as_deref() != Some("select") => {
						if leaf.multi {
							let picked: Vec<String> = form
								.checked(&control)
								.into_iter()
								.filter(|checked| options.contains(checked))
								.collect();
							Some(FormValue::Many(picked))
						} else {
							form.checked(&control)
								.into_iter()
								.next()
								.filter(|checked| options.contains(checked))
								.map(FormValue::Text)
						}
					}
					_ => form.value(&control).map(FormValue::Text),
				};
				let Some(mut value) = value else {
					continue;
				};
				if leaf.name == "yaml" && value.as_text() == Some("") {
					value = FormValue::Text("{}".to_string());
				}
				values.insert(leaf.name.clone(), value);
			}
		}
	}
	values
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::{GroupField, LeafField};
	use rstest::rstest;

	fn no_prefix() -> Vec<String> {
		Vec::new()
	}

	#[test]
	fn readonly_fields_never_appear() {
		let fields: Vec<Field> = vec![
			LeafField::new("id").readonly().into(),
			LeafField::new("people").into(),
		];
		let mut form = MemoryForm::new();
		form.set("id", "7").set("people", "us");

		let values = fields_values(&form, &no_prefix(), &fields);
		assert_eq!(values.len(), 1);
		assert_eq!(values["people"], "us".into());
		assert!(!values.contains_key("id"));
	}

	#[test]
	fn multi_choice_collects_in_form_order() {
		let fields: Vec<Field> =
			vec![LeafField::new("types").with_options(["a", "b", "c"]).multi().into()];
		let mut form = MemoryForm::new();
		// checked c before a: output follows form order, not option order
		form.check("types", "c").check("types", "a");

		let values = fields_values(&form, &no_prefix(), &fields);
		assert_eq!(values["types"], vec!["c".to_string(), "a".to_string()].into());
	}

	#[test]
	fn multi_choice_drops_unlisted_values() {
		let fields: Vec<Field> =
			vec![LeafField::new("types").with_options(["a", "b", "c"]).multi().into()];
		let mut form = MemoryForm::new();
		form.check("types", "a").check("types", "bogus").check("types", "c");

		let values = fields_values(&form, &no_prefix(), &fields);
		assert_eq!(values["types"], vec!["a".to_string(), "c".to_string()].into());
	}

	#[test]
	fn multi_choice_with_nothing_checked_yields_empty_sequence() {
		let fields: Vec<Field> =
			vec![LeafField::new("types").with_options(["a", "b"]).multi().into()];
		let values = fields_values(&MemoryForm::new(), &no_prefix(), &fields);
		assert_eq!(values["types"], Vec::<String>::new().into());
	}

	#[rstest]
	#[case("radios", Some("radios"))]
	#[case("bogus", None)]
	fn single_choice_validates_against_options(
		#[case] checked: &str,
		#[case] expected: Option<&str>,
	) {
		let fields: Vec<Field> =
			vec![LeafField::new("style").with_options(["radios", "select"]).into()];
		let mut form = MemoryForm::new();
		form.check("style", checked);

		let values = fields_values(&form, &no_prefix(), &fields);
		match expected {
			Some(value) => assert_eq!(values["style"], value.into()),
			None => assert!(!values.contains_key("style")),
		}
	}

	#[test]
	fn select_styled_choice_reads_as_plain_value() {
		let fields: Vec<Field> = vec![
			LeafField::new("stuff")
				.with_options(["fee", "fie"])
				.with_style("select")
				.into(),
		];
		let mut form = MemoryForm::new();
		form.set("stuff", "fie");

		let values = fields_values(&form, &no_prefix(), &fields);
		assert_eq!(values["stuff"], "fie".into());
	}

	#[test]
	fn groups_nest_and_extend_the_control_prefix() {
		let fields: Vec<Field> = vec![
			GroupField::new(
				"things",
				vec![LeafField::new("yin").into(), LeafField::new("yang").readonly().into()],
			)
			.into(),
		];
		let mut form = MemoryForm::new();
		form.set("things-yin", "1");

		let values = fields_values(&form, &no_prefix(), &fields);
		let group = values["things"].as_group().unwrap();
		assert_eq!(group["yin"], "1".into());
		assert!(!group.contains_key("yang"));
	}

	#[test]
	fn dots_in_names_flatten_into_the_control_name() {
		let fields: Vec<Field> = vec![LeafField::new("meta.label").into()];
		let mut form = MemoryForm::new();
		form.set("meta-label", "tag");

		let values = fields_values(&form, &no_prefix(), &fields);
		assert_eq!(values["meta.label"], "tag".into());
	}

	#[test]
	fn empty_yaml_field_defaults_to_empty_object() {
		let fields: Vec<Field> = vec![LeafField::new("yaml").into()];
		let mut form = MemoryForm::new();
		form.set("yaml", "");

		let values = fields_values(&form, &no_prefix(), &fields);
		assert_eq!(values["yaml"], "{}".into());
	}

	#[test]
	fn absent_control_leaves_no_entry() {
		let fields: Vec<Field> = vec![LeafField::new("people").into(), LeafField::new("yaml").into()];
		let values = fields_values(&MemoryForm::new(), &no_prefix(), &fields);
		assert!(values.is_empty());
	}

	#[test]
	fn serialized_values_follow_walk_order() {
		let fields: Vec<Field> = vec![
			LeafField::new("zeta").into(),
			LeafField::new("alpha").into(),
			LeafField::new("mid").readonly().into(),
			GroupField::new("things", vec![LeafField::new("yin").into()]).into(),
		];
		let mut form = MemoryForm::new();
		form.set("zeta", "z").set("alpha", "a").set("things-yin", "1");

		let values = fields_values(&form, &no_prefix(), &fields);
		assert_eq!(
			serde_json::to_string(&values).unwrap(),
			r#"{"zeta":"z","alpha":"a","things":{"yin":"1"}}"#,
		);
	}

	#[test]
	fn control_name_joins_prefix_with_dashes() {
		assert_eq!(control_name(&[], "people"), "people");
		assert_eq!(control_name(&["things".to_string()], "yin"), "things-yin");
		assert_eq!(control_name(&["a.b".to_string()], "c.d"), "a-b-c-d");
	}
}
