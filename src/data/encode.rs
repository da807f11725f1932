use serde_json::{Map, Number, Value as JsonValue};

use crate::data::object::DataObject;
use crate::data::value::{Dict, Item};
use crate::data::{DataError, Result};

/// Wrapper tag for mappings whose keys are not all strings.
pub const DICT_TAG: &str = "builtins/dict";

/// Behavior switches for the canonical tree walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
	/// Omit `guid` from every typed object wrapper.
	pub minimal: bool,
	/// Sort plain-object keys. Tagged wrappers keep their fixed key order.
	pub sort_keys: bool,
}

impl EncodeOptions {
	/// Identity-stripped, key-order-normalized mode used for content hashing.
	pub fn canonical() -> Self {
		Self {
			minimal: true,
			sort_keys: true,
		}
	}
}

/// Encode an item into a JSON tree, depth-first, order preserved.
pub fn encode(item: &Item, opt: &EncodeOptions) -> Result<JsonValue> {
	match item {
		Item::Null => Ok(JsonValue::Null),
		Item::Bool(value) => Ok(JsonValue::Bool(*value)),
		Item::Int(value) => Ok(JsonValue::Number((*value).into())),
		Item::Float(value) => Number::from_f64(*value)
			.map(JsonValue::Number)
			.ok_or_else(|| DataError::Unencodable { what: format!("non-finite float {value}") }),
		Item::Str(value) => Ok(JsonValue::String(value.clone())),
		Item::List(items) => {
			let mut out = Vec::with_capacity(items.len());
			for element in items {
				out.push(encode(element, opt)?);
			}
			Ok(JsonValue::Array(out))
		}
		Item::Dict(dict) => encode_dict(dict, opt),
		Item::Object(obj) => encode_object(obj.as_ref(), opt),
	}
}

/// Encode a typed object as its tagged wrapper.
///
/// Keys are always emitted in `dtype`, `data`, `guid` order so the format
/// stays stable for external tooling regardless of output mode.
pub fn encode_object(obj: &dyn DataObject, opt: &EncodeOptions) -> Result<JsonValue> {
	let mut wrapper = Map::new();
	wrapper.insert("dtype".to_owned(), JsonValue::String(obj.type_tag()));
	wrapper.insert("data".to_owned(), encode(&obj.raw_data(), opt)?);
	if !opt.minimal {
		wrapper.insert("guid".to_owned(), JsonValue::String(obj.identity().to_string()));
	}
	Ok(JsonValue::Object(wrapper))
}

fn encode_dict(dict: &Dict, opt: &EncodeOptions) -> Result<JsonValue> {
	if dict.keys_are_strings() {
		let mut entries = Vec::with_capacity(dict.len());
		for (key, value) in dict.iter() {
			let Item::Str(key) = key else { unreachable!("checked string keys") };
			entries.push((key.clone(), encode(value, opt)?));
		}
		if opt.sort_keys {
			entries.sort_by(|a, b| a.0.cmp(&b.0));
		}
		return Ok(JsonValue::Object(entries.into_iter().collect()));
	}

	// Non-string keys cannot live in a JSON object; emit the pair-list wrapper.
	let mut pairs = Vec::with_capacity(dict.len());
	for (key, value) in dict.iter() {
		pairs.push(JsonValue::Array(vec![encode(key, opt)?, encode(value, opt)?]));
	}

	let mut wrapper = Map::new();
	wrapper.insert("dtype".to_owned(), JsonValue::String(DICT_TAG.to_owned()));
	wrapper.insert("data".to_owned(), JsonValue::Array(pairs));
	Ok(JsonValue::Object(wrapper))
}
