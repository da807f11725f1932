//! Typed JSON serialization engine for CAD document data.

/// Encoding, decoding, type registry, content hashing, and schema validation.
pub mod data;
/// Geometry value types that consume the serialization engine.
pub mod geometry;
