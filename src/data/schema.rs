use std::fmt;

use crate::data::value::Item;

/// Declarative shape a type may claim for its raw data.
#[derive(Debug, Clone)]
pub enum Schema {
	/// Exactly null.
	Null,
	/// Boolean scalar.
	Bool,
	/// Integer scalar.
	Int,
	/// Float scalar; integers are accepted as numerically exact floats.
	Float,
	/// Integer or float scalar.
	Number,
	/// String scalar.
	Str,
	/// Homogeneous list of any length.
	List(Box<Schema>),
	/// Fixed-length list with per-position shapes.
	Tuple(Vec<Schema>),
	/// String-keyed mapping with a uniform value shape.
	Map(Box<Schema>),
	/// String-keyed mapping with named fields. Unknown keys are ignored.
	Record {
		/// Fields that must be present.
		required: Vec<(&'static str, Schema)>,
		/// Fields that are checked only when present.
		optional: Vec<(&'static str, Schema)>,
	},
	/// Anything goes.
	Any,
}

/// One schema violation with the breadcrumb path of the offending node.
#[derive(Debug, Clone)]
pub struct Violation {
	/// Breadcrumb path into the raw data.
	pub path: String,
	/// Human-readable description of the mismatch.
	pub message: String,
}

impl fmt::Display for Violation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.path, self.message)
	}
}

/// Validate raw data against a schema, collecting every violation.
///
/// Returns the empty `Ok` on success so callers can chain straight into
/// construction; the input itself is never modified.
pub fn validate(schema: &Schema, item: &Item) -> Result<(), Vec<Violation>> {
	let mut violations = Vec::new();
	check(schema, item, &mut String::from("$"), &mut violations);
	if violations.is_empty() { Ok(()) } else { Err(violations) }
}

fn check(schema: &Schema, item: &Item, path: &mut String, violations: &mut Vec<Violation>) {
	match schema {
		Schema::Any => {}
		Schema::Null => expect(matches!(item, Item::Null), "null", item, path, violations),
		Schema::Bool => expect(matches!(item, Item::Bool(_)), "bool", item, path, violations),
		Schema::Int => expect(matches!(item, Item::Int(_)), "int", item, path, violations),
		Schema::Float | Schema::Number => {
			expect(matches!(item, Item::Int(_) | Item::Float(_)), "number", item, path, violations);
		}
		Schema::Str => expect(matches!(item, Item::Str(_)), "str", item, path, violations),
		Schema::List(element) => {
			let Item::List(items) = item else {
				expect(false, "list", item, path, violations);
				return;
			};
			for (index, value) in items.iter().enumerate() {
				with_index(path, index, |path| check(element, value, path, violations));
			}
		}
		Schema::Tuple(elements) => {
			let Item::List(items) = item else {
				expect(false, "list", item, path, violations);
				return;
			};
			if items.len() != elements.len() {
				violations.push(Violation {
					path: path.clone(),
					message: format!("expected {} elements, got {}", elements.len(), items.len()),
				});
				return;
			}
			for (index, (element, value)) in elements.iter().zip(items).enumerate() {
				with_index(path, index, |path| check(element, value, path, violations));
			}
		}
		Schema::Map(value_schema) => {
			let Some(dict) = string_keyed_dict(item, path, violations) else { return };
			for (key, value) in dict.iter() {
				let Item::Str(key) = key else { unreachable!("checked string keys") };
				with_key(path, key, |path| check(value_schema, value, path, violations));
			}
		}
		Schema::Record { required, optional } => {
			let Some(dict) = string_keyed_dict(item, path, violations) else { return };
			for (field, field_schema) in required {
				match dict.get_str(field) {
					Some(value) => with_key(path, field, |path| check(field_schema, value, path, violations)),
					None => violations.push(Violation {
						path: path.clone(),
						message: format!("missing required field \"{field}\""),
					}),
				}
			}
			for (field, field_schema) in optional {
				if let Some(value) = dict.get_str(field) {
					with_key(path, field, |path| check(field_schema, value, path, violations));
				}
			}
		}
	}
}

fn string_keyed_dict<'a>(item: &'a Item, path: &mut String, violations: &mut Vec<Violation>) -> Option<&'a crate::data::value::Dict> {
	match item {
		Item::Dict(dict) if dict.keys_are_strings() => Some(dict),
		Item::Dict(_) => {
			violations.push(Violation {
				path: path.clone(),
				message: "expected string keys".to_owned(),
			});
			None
		}
		other => {
			expect(false, "dict", other, path, violations);
			None
		}
	}
}

fn expect(ok: bool, wanted: &str, item: &Item, path: &mut String, violations: &mut Vec<Violation>) {
	if !ok {
		violations.push(Violation {
			path: path.clone(),
			message: format!("expected {wanted}, got {}", item.kind()),
		});
	}
}

fn with_index(path: &mut String, index: usize, body: impl FnOnce(&mut String)) {
	let len = path.len();
	path.push_str(&format!("[{index}]"));
	body(path);
	path.truncate(len);
}

fn with_key(path: &mut String, key: &str, body: impl FnOnce(&mut String)) {
	let len = path.len();
	path.push('.');
	path.push_str(key);
	body(path);
	path.truncate(len);
}

#[cfg(test)]
mod tests {
	use super::{Schema, validate};
	use crate::data::value::{Dict, Item};

	fn polygon_schema() -> Schema {
		Schema::Record {
			required: vec![(
				"points",
				Schema::List(Box::new(Schema::Tuple(vec![Schema::Number, Schema::Number, Schema::Number]))),
			)],
			optional: vec![],
		}
	}

	#[test]
	fn conforming_data_passes() {
		let mut raw = Dict::new();
		raw.insert(
			"points",
			Item::List(vec![
				Item::List(vec![0.0.into(), 0.0.into(), 0.0.into()]),
				Item::List(vec![1_i64.into(), 0.0.into(), 0.0.into()]),
			]),
		);
		assert!(validate(&polygon_schema(), &raw.into()).is_ok());
	}

	#[test]
	fn violations_carry_paths() {
		let mut raw = Dict::new();
		raw.insert("points", Item::List(vec![Item::List(vec![0.0.into(), "x".into(), 0.0.into()])]));

		let violations = validate(&polygon_schema(), &raw.into()).expect_err("bad coordinate");
		assert_eq!(violations.len(), 1);
		assert_eq!(violations[0].path, "$.points[0][1]");
	}

	#[test]
	fn missing_required_field_is_reported_at_the_record() {
		let violations = validate(&polygon_schema(), &Dict::new().into()).expect_err("empty record");
		assert_eq!(violations.len(), 1);
		assert_eq!(violations[0].path, "$");
		assert!(violations[0].message.contains("points"));
	}

	#[test]
	fn every_violation_is_collected() {
		let schema = Schema::Tuple(vec![Schema::Int, Schema::Str]);
		let item = Item::List(vec!["a".into(), 1_i64.into()]);

		let violations = validate(&schema, &item).expect_err("both positions wrong");
		assert_eq!(violations.len(), 2);
	}
}
