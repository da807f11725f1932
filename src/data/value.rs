use crate::data::object::DataObject;

/// Runtime value carried through the serialization engine.
#[derive(Debug)]
pub enum Item {
	/// Explicit null marker.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	Int(i64),
	/// 64-bit float scalar.
	Float(f64),
	/// Owned string scalar.
	Str(String),
	/// Ordered sequence, order is semantic.
	List(Vec<Item>),
	/// Insertion-ordered mapping with arbitrary item keys.
	Dict(Dict),
	/// Typed document object implementing the data contract.
	Object(Box<dyn DataObject>),
}

impl Item {
	/// Wrap a typed object as an item.
	pub fn object(obj: impl DataObject + 'static) -> Self {
		Self::Object(Box::new(obj))
	}

	/// Short lowercase label for the value kind.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Float(_) => "float",
			Self::Str(_) => "str",
			Self::List(_) => "list",
			Self::Dict(_) => "dict",
			Self::Object(_) => "object",
		}
	}

	/// Return the integer payload if this is an `Int`.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(value) => Some(*value),
			_ => None,
		}
	}

	/// Return the numeric payload as a float for `Int` and `Float` items.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			Self::Int(value) => Some(*value as f64),
			Self::Float(value) => Some(*value),
			_ => None,
		}
	}

	/// Return the string payload if this is a `Str`.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(value) => Some(value),
			_ => None,
		}
	}

	/// Return the element slice if this is a `List`.
	pub fn as_list(&self) -> Option<&[Item]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}

	/// Return the mapping if this is a `Dict`.
	pub fn as_dict(&self) -> Option<&Dict> {
		match self {
			Self::Dict(dict) => Some(dict),
			_ => None,
		}
	}

	/// Return the typed object if this is an `Object`.
	pub fn as_object(&self) -> Option<&dyn DataObject> {
		match self {
			Self::Object(obj) => Some(obj.as_ref()),
			_ => None,
		}
	}
}

impl Clone for Item {
	fn clone(&self) -> Self {
		match self {
			Self::Null => Self::Null,
			Self::Bool(value) => Self::Bool(*value),
			Self::Int(value) => Self::Int(*value),
			Self::Float(value) => Self::Float(*value),
			Self::Str(value) => Self::Str(value.clone()),
			Self::List(items) => Self::List(items.clone()),
			Self::Dict(dict) => Self::Dict(dict.clone()),
			Self::Object(obj) => Self::Object(obj.clone_object()),
		}
	}
}

impl PartialEq for Item {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::Float(a), Self::Float(b)) => a == b,
			(Self::Str(a), Self::Str(b)) => a == b,
			(Self::List(a), Self::List(b)) => a == b,
			(Self::Dict(a), Self::Dict(b)) => a == b,
			// Objects compare by type and projected state, never by identity.
			(Self::Object(a), Self::Object(b)) => a.type_tag() == b.type_tag() && a.raw_data() == b.raw_data(),
			_ => false,
		}
	}
}

impl From<bool> for Item {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Item {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<f64> for Item {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for Item {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}

impl From<String> for Item {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<Vec<Item>> for Item {
	fn from(items: Vec<Item>) -> Self {
		Self::List(items)
	}
}

impl From<Dict> for Item {
	fn from(dict: Dict) -> Self {
		Self::Dict(dict)
	}
}

/// Insertion-ordered association list with arbitrary item keys.
///
/// JSON objects require string keys; document mappings do not. The encoder
/// emits string-keyed dicts as plain JSON objects and everything else through
/// the `builtins/dict` wrapper, so order and key types survive a round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dict {
	entries: Vec<(Item, Item)>,
}

impl Dict {
	/// Create an empty mapping.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a pair, replacing the value in place if an equal key exists.
	pub fn insert(&mut self, key: impl Into<Item>, value: impl Into<Item>) {
		let key = key.into();
		let value = value.into();
		for entry in &mut self.entries {
			if entry.0 == key {
				entry.1 = value;
				return;
			}
		}
		self.entries.push((key, value));
	}

	/// Look up a value by key.
	pub fn get(&self, key: &Item) -> Option<&Item> {
		self.entries.iter().find(|entry| entry.0 == *key).map(|entry| &entry.1)
	}

	/// Look up a value by string key.
	pub fn get_str(&self, key: &str) -> Option<&Item> {
		self.get(&Item::Str(key.to_owned()))
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when the mapping holds no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &(Item, Item)> {
		self.entries.iter()
	}

	/// True when every key is a string (encodable as a plain JSON object).
	pub fn keys_are_strings(&self) -> bool {
		self.entries.iter().all(|entry| matches!(entry.0, Item::Str(_)))
	}
}

impl FromIterator<(Item, Item)> for Dict {
	fn from_iter<I: IntoIterator<Item = (Item, Item)>>(iter: I) -> Self {
		let mut dict = Self::new();
		for (key, value) in iter {
			dict.insert(key, value);
		}
		dict
	}
}

impl<'a> IntoIterator for &'a Dict {
	type Item = &'a (Item, Item);
	type IntoIter = std::slice::Iter<'a, (Item, Item)>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}
