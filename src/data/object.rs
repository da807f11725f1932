use std::fmt;

use uuid::Uuid;

use crate::data::schema::{self, Schema};
use crate::data::value::Item;
use crate::data::{DataError, Result};

/// Compute a `dtype` tag from a module path and a concrete type name.
///
/// The module path is truncated to its first two segments and joined with
/// `.`, so `cadoc::geometry::polygon` + `Polygon` yields
/// `cadoc.geometry/Polygon`. Tags are always recomputed from the live type,
/// never stored.
pub fn type_tag_for(module_path: &str, type_name: &str) -> String {
	let prefix: Vec<&str> = module_path.split("::").take(2).collect();
	format!("{}/{}", prefix.join("."), type_name)
}

/// Identity and naming state embedded by every typed document object.
///
/// The identity token is generated at construction time rather than on first
/// access, so concurrent reads never race on lazy initialization.
#[derive(Debug, Clone)]
pub struct ObjectCore {
	guid: Uuid,
	name: Option<Box<str>>,
}

impl ObjectCore {
	/// Fresh core with a random identity and no user-assigned name.
	pub fn new() -> Self {
		Self {
			guid: Uuid::new_v4(),
			name: None,
		}
	}

	/// Current identity token.
	pub fn guid(&self) -> Uuid {
		self.guid
	}

	/// Overwrite the identity token with a persisted one.
	pub fn set_guid(&mut self, guid: Uuid) {
		self.guid = guid;
	}

	/// User-assigned name, or `default` when never set.
	pub fn name_or<'a>(&'a self, default: &'a str) -> &'a str {
		self.name.as_deref().unwrap_or(default)
	}

	/// Assign a display name.
	pub fn set_name(&mut self, name: &str) {
		self.name = Some(name.into());
	}
}

impl Default for ObjectCore {
	fn default() -> Self {
		Self::new()
	}
}

/// Object-safe contract every serializable document object implements.
///
/// Only `raw_data` is persisted; the tag is recomputed at encode time and the
/// identity token travels alongside the data, never inside it.
pub trait DataObject: fmt::Debug + Send + Sync {
	/// Computed `dtype` tag for the concrete type.
	fn type_tag(&self) -> String;

	/// Pure projection of current state into persistable form.
	///
	/// Must exclude the identity token and be stable across calls without
	/// intervening mutation.
	fn raw_data(&self) -> Item;

	/// Identity token for this in-memory instance.
	fn identity(&self) -> Uuid;

	/// Replace the identity token (used by the decoder to carry a persisted guid through).
	fn set_identity(&mut self, guid: Uuid);

	/// User-facing name, defaulting to the concrete type name.
	fn display_name(&self) -> &str;

	/// Assign a user-facing name. Not part of identity or equality.
	fn set_display_name(&mut self, name: &str);

	/// Clone behind the object-safe surface.
	fn clone_object(&self) -> Box<dyn DataObject>;
}

/// Type-level half of the contract: construction, registration, validation.
pub trait TypedData: DataObject + Sized + 'static {
	/// The `dtype` tag every instance of this type computes.
	fn tag() -> String;

	/// Construct an instance from the shape produced by `raw_data`.
	///
	/// Fails with [`DataError::SchemaMismatch`] when the shape is structurally
	/// invalid for this type, before any field values are interpreted.
	fn from_raw_data(raw: &Item) -> Result<Self>;

	/// Optional declarative schema for this type's raw data.
	fn data_schema() -> Option<Schema> {
		None
	}

	/// Validate raw data against the declared schema, if any.
	///
	/// Pre-flight check only; the decode path never calls this automatically.
	fn validate_raw(raw: &Item) -> Result<()> {
		let Some(data_schema) = Self::data_schema() else {
			return Ok(());
		};
		schema::validate(&data_schema, raw).map_err(|violations| DataError::SchemaValidation {
			dtype: Self::tag(),
			violations,
		})
	}

	/// Independent copy via reconstruction from projected raw data.
	///
	/// The copy gets a fresh identity token.
	fn copied(&self) -> Result<Self> {
		Self::from_raw_data(&self.raw_data())
	}

	/// Reconstruct this object's raw data as a different type.
	///
	/// Intentional duck-typed conversion that bypasses schema validation:
	/// incompatible shapes surface only as a `SchemaMismatch` from the target
	/// constructor.
	fn copy_as<T: TypedData>(&self) -> Result<T> {
		T::from_raw_data(&self.raw_data())
	}
}

#[cfg(test)]
mod tests {
	use super::type_tag_for;

	#[test]
	fn tag_truncates_module_path_to_two_segments() {
		assert_eq!(type_tag_for("cadoc::geometry::polygon", "Polygon"), "cadoc.geometry/Polygon");
	}

	#[test]
	fn tag_keeps_short_module_paths_whole() {
		assert_eq!(type_tag_for("cadoc", "Pair"), "cadoc/Pair");
		assert_eq!(type_tag_for("cadoc::data", "Thing"), "cadoc.data/Thing");
	}
}
