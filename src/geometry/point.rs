use uuid::Uuid;

use crate::data::{DataError, DataObject, Item, ObjectCore, Result, Schema, TypedData, type_tag_for};

/// A point in 3D space.
///
/// Raw data is the coordinate triple `[x, y, z]`.
#[derive(Debug, Clone)]
pub struct Point {
	/// X coordinate.
	pub x: f64,
	/// Y coordinate.
	pub y: f64,
	/// Z coordinate.
	pub z: f64,
	core: ObjectCore,
}

impl Point {
	/// Point at the given coordinates, with a fresh identity.
	pub fn new(x: f64, y: f64, z: f64) -> Self {
		Self {
			x,
			y,
			z,
			core: ObjectCore::new(),
		}
	}
}

impl PartialEq for Point {
	fn eq(&self, other: &Self) -> bool {
		self.x == other.x && self.y == other.y && self.z == other.z
	}
}

impl DataObject for Point {
	fn type_tag(&self) -> String {
		Self::tag()
	}

	fn raw_data(&self) -> Item {
		Item::List(vec![self.x.into(), self.y.into(), self.z.into()])
	}

	fn identity(&self) -> Uuid {
		self.core.guid()
	}

	fn set_identity(&mut self, guid: Uuid) {
		self.core.set_guid(guid);
	}

	fn display_name(&self) -> &str {
		self.core.name_or("Point")
	}

	fn set_display_name(&mut self, name: &str) {
		self.core.set_name(name);
	}

	fn clone_object(&self) -> Box<dyn DataObject> {
		Box::new(self.clone())
	}
}

impl TypedData for Point {
	fn tag() -> String {
		type_tag_for(module_path!(), "Point")
	}

	fn from_raw_data(raw: &Item) -> Result<Self> {
		let mismatch = |detail: &str| DataError::SchemaMismatch {
			dtype: Self::tag(),
			detail: detail.to_owned(),
		};

		let coords = raw.as_list().ok_or_else(|| mismatch("expected a coordinate list"))?;
		if coords.len() != 3 {
			return Err(mismatch("expected exactly three coordinates"));
		}

		let mut xyz = [0.0_f64; 3];
		for (slot, coord) in xyz.iter_mut().zip(coords) {
			*slot = coord.as_number().ok_or_else(|| mismatch("coordinates must be numbers"))?;
		}
		Ok(Self::new(xyz[0], xyz[1], xyz[2]))
	}

	fn data_schema() -> Option<Schema> {
		Some(Schema::Tuple(vec![Schema::Number, Schema::Number, Schema::Number]))
	}
}

#[cfg(test)]
mod tests {
	use super::Point;
	use crate::data::{DataError, DataObject, Item, TypedData};

	#[test]
	fn tag_is_computed_from_the_module_path() {
		assert_eq!(Point::tag(), "cadoc.geometry/Point");
		assert_eq!(Point::new(0.0, 0.0, 0.0).type_tag(), "cadoc.geometry/Point");
	}

	#[test]
	fn raw_data_round_trip_preserves_coordinates() {
		let point = Point::new(1.0, 2.0, 3.0);
		let rebuilt = Point::from_raw_data(&point.raw_data()).unwrap();
		assert_eq!(point, rebuilt);
		assert_eq!(point.raw_data(), rebuilt.raw_data());
	}

	#[test]
	fn integer_coordinates_are_accepted() {
		let raw = Item::List(vec![1_i64.into(), 2_i64.into(), 3_i64.into()]);
		let point = Point::from_raw_data(&raw).unwrap();
		assert_eq!(point, Point::new(1.0, 2.0, 3.0));
	}

	#[test]
	fn short_coordinate_list_is_a_schema_mismatch() {
		let raw = Item::List(vec![1.0.into(), 2.0.into()]);
		let err = Point::from_raw_data(&raw).expect_err("two coordinates");
		assert!(matches!(err, DataError::SchemaMismatch { .. }));
	}

	#[test]
	fn copies_are_independent_with_fresh_identity() {
		let point = Point::new(1.0, 2.0, 3.0);
		let copy = point.copied().unwrap();
		assert_eq!(point, copy);
		assert_ne!(point.identity(), copy.identity());
	}

	#[test]
	fn display_name_defaults_to_the_type_name() {
		let mut point = Point::new(0.0, 0.0, 0.0);
		assert_eq!(point.display_name(), "Point");
		point.set_display_name("origin");
		assert_eq!(point.display_name(), "origin");
	}
}
