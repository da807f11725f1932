use std::fmt::Write as _;

use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

use crate::data::encode::DICT_TAG;
use crate::data::registry::TypeRegistry;
use crate::data::value::{Dict, Item};
use crate::data::{DataError, Result};

/// Decode a parsed JSON tree into live values.
///
/// Typed wrappers are dispatched through the registry; plain containers and
/// scalars pass through unchanged. Any node-level failure aborts the whole
/// decode and carries the failing node's breadcrumb path.
pub fn decode(value: &JsonValue, registry: &TypeRegistry) -> Result<Item> {
	let mut path = DecodePath::default();
	decode_at(value, registry, &mut path)
}

#[derive(Debug)]
enum PathStep {
	Key(String),
	Index(usize),
}

#[derive(Debug, Default)]
struct DecodePath {
	steps: Vec<PathStep>,
}

impl DecodePath {
	fn push_key(&mut self, key: &str) {
		self.steps.push(PathStep::Key(key.to_owned()));
	}

	fn push_index(&mut self, index: usize) {
		self.steps.push(PathStep::Index(index));
	}

	fn pop(&mut self) {
		self.steps.pop();
	}

	fn render(&self) -> String {
		let mut out = String::from("$");
		for step in &self.steps {
			match step {
				PathStep::Key(key) => {
					let _ = write!(out, ".{key}");
				}
				PathStep::Index(index) => {
					let _ = write!(out, "[{index}]");
				}
			}
		}
		out
	}
}

/// Attach the current path to a node-level error, once.
fn fail(err: DataError, path: &DecodePath) -> DataError {
	if matches!(err, DataError::DecodeAt { .. }) {
		return err;
	}
	DataError::DecodeAt {
		path: path.render(),
		source: Box::new(err),
	}
}

fn decode_at(value: &JsonValue, registry: &TypeRegistry, path: &mut DecodePath) -> Result<Item> {
	match value {
		JsonValue::Null => Ok(Item::Null),
		JsonValue::Bool(flag) => Ok(Item::Bool(*flag)),
		JsonValue::Number(number) => {
			if let Some(int) = number.as_i64() {
				return Ok(Item::Int(int));
			}
			// Large u64 and fractional numbers both land here.
			number
				.as_f64()
				.map(Item::Float)
				.ok_or_else(|| fail(DataError::Unencodable { what: format!("number {number}") }, path))
		}
		JsonValue::String(text) => Ok(Item::Str(text.clone())),
		JsonValue::Array(elements) => {
			let mut items = Vec::with_capacity(elements.len());
			for (index, element) in elements.iter().enumerate() {
				path.push_index(index);
				items.push(decode_at(element, registry, path)?);
				path.pop();
			}
			Ok(Item::List(items))
		}
		JsonValue::Object(map) => decode_object(map, registry, path),
	}
}

fn decode_object(map: &Map<String, JsonValue>, registry: &TypeRegistry, path: &mut DecodePath) -> Result<Item> {
	let Some(JsonValue::String(tag)) = map.get("dtype") else {
		return decode_plain(map, registry, path);
	};

	if tag == DICT_TAG {
		return decode_wrapped_dict(map, registry, path);
	}

	let registration = registry.resolve(tag).map_err(|err| fail(err, path))?;

	let Some(payload) = map.get("data") else {
		let err = DataError::SchemaMismatch {
			dtype: tag.clone(),
			detail: "missing \"data\" payload".to_owned(),
		};
		return Err(fail(err, path));
	};
	path.push_key("data");
	let raw = decode_at(payload, registry, path)?;
	path.pop();

	let mut obj = registration.construct(&raw).map_err(|err| fail(err, path))?;

	if let Some(guid) = map.get("guid") {
		let guid = parse_guid(guid).map_err(|err| fail(err, path))?;
		obj.set_identity(guid);
	}

	Ok(Item::Object(obj))
}

fn decode_plain(map: &Map<String, JsonValue>, registry: &TypeRegistry, path: &mut DecodePath) -> Result<Item> {
	let mut dict = Dict::new();
	for (key, value) in map {
		path.push_key(key);
		let decoded = decode_at(value, registry, path)?;
		path.pop();
		dict.insert(key.as_str(), decoded);
	}
	Ok(Item::Dict(dict))
}

fn decode_wrapped_dict(map: &Map<String, JsonValue>, registry: &TypeRegistry, path: &mut DecodePath) -> Result<Item> {
	path.push_key("data");
	let Some(JsonValue::Array(pairs)) = map.get("data") else {
		let err = DataError::SchemaMismatch {
			dtype: DICT_TAG.to_owned(),
			detail: "expected a pair array payload".to_owned(),
		};
		return Err(fail(err, path));
	};

	let mut dict = Dict::new();
	for (index, pair) in pairs.iter().enumerate() {
		path.push_index(index);
		let Some(pair) = pair.as_array().filter(|pair| pair.len() == 2) else {
			let err = DataError::SchemaMismatch {
				dtype: DICT_TAG.to_owned(),
				detail: "expected [key, value] pairs".to_owned(),
			};
			return Err(fail(err, path));
		};
		let key = decode_at(&pair[0], registry, path)?;
		let value = decode_at(&pair[1], registry, path)?;
		dict.insert(key, value);
		path.pop();
	}
	path.pop();

	Ok(Item::Dict(dict))
}

fn parse_guid(value: &JsonValue) -> Result<Uuid> {
	let JsonValue::String(text) = value else {
		return Err(DataError::InvalidIdentity { guid: value.to_string() });
	};
	Uuid::parse_str(text).map_err(|_| DataError::InvalidIdentity { guid: text.clone() })
}

#[cfg(test)]
mod tests {
	use super::decode;
	use crate::data::registry::TypeRegistry;
	use crate::data::value::Item;
	use crate::data::DataError;

	fn registry() -> TypeRegistry {
		TypeRegistry::with_core_types()
	}

	#[test]
	fn scalars_and_containers_pass_through() {
		let tree = serde_json::json!({"a": [1, 2.5, "x", null, true]});
		let item = decode(&tree, &registry()).unwrap();

		let dict = item.as_dict().expect("plain object decodes to dict");
		let list = dict.get_str("a").and_then(Item::as_list).expect("list payload");
		assert_eq!(list[0], Item::Int(1));
		assert_eq!(list[1], Item::Float(2.5));
		assert_eq!(list[2], Item::from("x"));
		assert_eq!(list[3], Item::Null);
		assert_eq!(list[4], Item::Bool(true));
	}

	#[test]
	fn unknown_tag_is_a_hard_failure_with_path() {
		let tree = serde_json::json!({"objects": [{"dtype": "nope/Nope", "data": {}}]});
		let err = decode(&tree, &registry()).expect_err("unresolvable tag");

		let DataError::DecodeAt { path, source } = err else {
			panic!("expected path context, got {err:?}");
		};
		assert_eq!(path, "$.objects[0]");
		assert!(matches!(*source, DataError::UnknownType { ref tag } if tag == "nope/Nope"));
	}

	#[test]
	fn tagged_node_without_data_is_a_schema_mismatch() {
		let tree = serde_json::json!({"dtype": "cadoc.geometry/Point"});
		let err = decode(&tree, &registry()).expect_err("missing payload");

		let DataError::DecodeAt { source, .. } = err else {
			panic!("expected path context, got {err:?}");
		};
		assert!(matches!(*source, DataError::SchemaMismatch { .. }));
	}

	#[test]
	fn wrapped_dict_restores_integer_keys() {
		let tree = serde_json::json!({"dtype": "builtins/dict", "data": [[1, "a"], [2, "b"]]});
		let item = decode(&tree, &registry()).unwrap();

		let dict = item.as_dict().expect("dict wrapper decodes to dict");
		assert_eq!(dict.get(&Item::Int(1)), Some(&Item::from("a")));
		assert_eq!(dict.get(&Item::Int(2)), Some(&Item::from("b")));
	}

	#[test]
	fn garbage_guid_is_rejected() {
		let tree = serde_json::json!({
			"dtype": "cadoc.geometry/Point",
			"data": [0.0, 0.0, 0.0],
			"guid": "not-a-uuid",
		});
		let err = decode(&tree, &registry()).expect_err("bad identity token");

		let DataError::DecodeAt { source, .. } = err else {
			panic!("expected path context, got {err:?}");
		};
		assert!(matches!(*source, DataError::InvalidIdentity { ref guid } if guid == "not-a-uuid"));
	}

	#[test]
	fn mapping_with_non_string_dtype_key_stays_plain() {
		let tree = serde_json::json!({"dtype": 5, "data": "payload"});
		let item = decode(&tree, &registry()).unwrap();

		let dict = item.as_dict().expect("plain mapping");
		assert_eq!(dict.get_str("dtype"), Some(&Item::Int(5)));
	}
}
