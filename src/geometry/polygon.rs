use uuid::Uuid;

use crate::data::{DataError, DataObject, Dict, Item, ObjectCore, Result, Schema, TypedData, type_tag_for};
use crate::geometry::Point;

/// An ordered ring of points describing a closed boundary.
///
/// Raw data is `{"points": [[x, y, z], ...]}`. The closing edge from the last
/// point back to the first is implied and never stored.
#[derive(Debug, Clone)]
pub struct Polygon {
	points: Vec<Point>,
	core: ObjectCore,
}

impl Polygon {
	/// Polygon over the given boundary points, with a fresh identity.
	pub fn new(points: Vec<Point>) -> Self {
		Self {
			points,
			core: ObjectCore::new(),
		}
	}

	/// Boundary points in ring order.
	pub fn points(&self) -> &[Point] {
		&self.points
	}

	/// Append a point to the boundary.
	pub fn push(&mut self, point: Point) {
		self.points.push(point);
	}

	/// Number of boundary points.
	pub fn len(&self) -> usize {
		self.points.len()
	}

	/// True when the boundary holds no points.
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}
}

impl PartialEq for Polygon {
	fn eq(&self, other: &Self) -> bool {
		self.points == other.points
	}
}

impl DataObject for Polygon {
	fn type_tag(&self) -> String {
		Self::tag()
	}

	fn raw_data(&self) -> Item {
		let points = self.points.iter().map(DataObject::raw_data).collect();
		let mut raw = Dict::new();
		raw.insert("points", Item::List(points));
		raw.into()
	}

	fn identity(&self) -> Uuid {
		self.core.guid()
	}

	fn set_identity(&mut self, guid: Uuid) {
		self.core.set_guid(guid);
	}

	fn display_name(&self) -> &str {
		self.core.name_or("Polygon")
	}

	fn set_display_name(&mut self, name: &str) {
		self.core.set_name(name);
	}

	fn clone_object(&self) -> Box<dyn DataObject> {
		Box::new(self.clone())
	}
}

impl TypedData for Polygon {
	fn tag() -> String {
		type_tag_for(module_path!(), "Polygon")
	}

	fn from_raw_data(raw: &Item) -> Result<Self> {
		let mismatch = |detail: &str| DataError::SchemaMismatch {
			dtype: Self::tag(),
			detail: detail.to_owned(),
		};

		let dict = raw.as_dict().ok_or_else(|| mismatch("expected a mapping"))?;
		let points = dict
			.get_str("points")
			.and_then(Item::as_list)
			.ok_or_else(|| mismatch("expected a \"points\" list"))?;

		let points = points
			.iter()
			.map(Point::from_raw_data)
			.collect::<Result<Vec<_>>>()
			.map_err(|_| mismatch("points must be coordinate triples"))?;
		Ok(Self::new(points))
	}

	fn data_schema() -> Option<Schema> {
		Some(Schema::Record {
			required: vec![(
				"points",
				Schema::List(Box::new(Schema::Tuple(vec![Schema::Number, Schema::Number, Schema::Number]))),
			)],
			optional: vec![],
		})
	}
}

#[cfg(test)]
mod tests {
	use super::Polygon;
	use crate::data::{DataError, DataObject, TypedData};
	use crate::geometry::Point;

	fn triangle() -> Polygon {
		Polygon::new(vec![
			Point::new(0.0, 0.0, 0.0),
			Point::new(1.0, 0.0, 0.0),
			Point::new(0.0, 1.0, 0.0),
		])
	}

	#[test]
	fn raw_data_round_trip_preserves_the_ring() {
		let polygon = triangle();
		let rebuilt = Polygon::from_raw_data(&polygon.raw_data()).unwrap();
		assert_eq!(polygon, rebuilt);
		assert_eq!(polygon.raw_data(), rebuilt.raw_data());
	}

	#[test]
	fn nested_points_are_stored_untagged() {
		let raw = triangle().raw_data();
		let dict = raw.as_dict().unwrap();
		let points = dict.get_str("points").unwrap().as_list().unwrap();
		assert!(points.iter().all(|point| point.as_list().is_some()));
	}

	#[test]
	fn mapping_without_points_is_a_schema_mismatch() {
		let err = Polygon::from_raw_data(&crate::data::Dict::new().into()).expect_err("no points field");
		assert!(matches!(err, DataError::SchemaMismatch { .. }));
	}

	#[test]
	fn declared_schema_accepts_own_raw_data() {
		let polygon = triangle();
		Polygon::validate_raw(&polygon.raw_data()).unwrap();
	}

	#[test]
	fn cross_type_copy_surfaces_as_target_mismatch() {
		// Duck-typed conversion: the shapes are incompatible, and the target
		// constructor is where that surfaces.
		let err = triangle().copy_as::<Point>().expect_err("polygon data is not a point");
		assert!(matches!(err, DataError::SchemaMismatch { ref dtype, .. } if dtype == "cadoc.geometry/Point"));
	}
}
