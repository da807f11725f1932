use std::any::TypeId;
use std::collections::HashMap;

use crate::data::object::{DataObject, TypedData};
use crate::data::value::Item;
use crate::data::{DataError, Result};

/// Constructor invoked by the decoder for a resolved tag.
pub type Constructor = fn(&Item) -> Result<Box<dyn DataObject>>;

/// Pre-flight raw data validator for a registered type.
pub type RawValidator = fn(&Item) -> Result<()>;

/// One registered type: the single dispatch point for polymorphic decode.
#[derive(Debug)]
pub struct Registration {
	type_id: TypeId,
	type_name: &'static str,
	construct: Constructor,
	validate: RawValidator,
}

impl Registration {
	/// Build an instance of the registered type from raw data.
	pub fn construct(&self, raw: &Item) -> Result<Box<dyn DataObject>> {
		(self.construct)(raw)
	}

	/// Run the registered type's declared schema against raw data.
	pub fn validate_raw(&self, raw: &Item) -> Result<()> {
		(self.validate)(raw)
	}

	/// Rust type name of the registrant, for diagnostics.
	pub fn rust_type_name(&self) -> &'static str {
		self.type_name
	}
}

/// Maps `dtype` tags to constructors for the closed set of loaded types.
///
/// Built once at startup and treated as read-only afterwards; shared
/// references may be used from any number of threads during decode.
#[derive(Default)]
pub struct TypeRegistry {
	entries: HashMap<String, Registration>,
}

impl TypeRegistry {
	/// Empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry preloaded with this crate's geometry types.
	pub fn with_core_types() -> Self {
		let mut registry = Self::new();
		registry.register::<crate::geometry::Point>().expect("core tags are collision-free");
		registry.register::<crate::geometry::Polygon>().expect("core tags are collision-free");
		registry
	}

	/// Register a type under its computed tag.
	///
	/// Idempotent for an identical `(tag, type)` pair; a different type
	/// claiming an already-registered tag fails with
	/// [`DataError::TagCollision`] so configuration errors surface at startup,
	/// not at first decode.
	pub fn register<T: TypedData>(&mut self) -> Result<()> {
		let tag = T::tag();
		if let Some(existing) = self.entries.get(&tag) {
			if existing.type_id == TypeId::of::<T>() {
				return Ok(());
			}
			return Err(DataError::TagCollision {
				tag,
				first: existing.type_name,
				second: std::any::type_name::<T>(),
			});
		}

		log::debug!("registering dtype {tag} -> {}", std::any::type_name::<T>());
		self.entries.insert(tag, Registration {
			type_id: TypeId::of::<T>(),
			type_name: std::any::type_name::<T>(),
			construct: construct_boxed::<T>,
			validate: T::validate_raw,
		});
		Ok(())
	}

	/// Resolve a tag to its registration.
	pub fn resolve(&self, tag: &str) -> Result<&Registration> {
		self.entries.get(tag).ok_or_else(|| DataError::UnknownType { tag: tag.to_owned() })
	}

	/// True when a tag has a registration.
	pub fn contains(&self, tag: &str) -> bool {
		self.entries.contains_key(tag)
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

fn construct_boxed<T: TypedData>(raw: &Item) -> Result<Box<dyn DataObject>> {
	Ok(Box::new(T::from_raw_data(raw)?))
}
