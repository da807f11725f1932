use thiserror::Error;

use crate::data::schema::Violation;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors produced while encoding, decoding, hashing, and validating document data.
#[derive(Debug, Error)]
pub enum DataError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// JSON parse or serialization failure.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Value the encoder has no JSON rule for.
	#[error("unencodable value: {what}")]
	Unencodable {
		/// Description of the offending value.
		what: String,
	},
	/// Tag that no registered type claims.
	#[error("unknown dtype tag: {tag}")]
	UnknownType {
		/// The unresolvable tag string.
		tag: String,
	},
	/// Two distinct types claimed the same tag at registration time.
	#[error("dtype tag collision on {tag}: first={first}, second={second}")]
	TagCollision {
		/// The contested tag.
		tag: String,
		/// Rust type name of the first registrant.
		first: &'static str,
		/// Rust type name of the second registrant.
		second: &'static str,
	},
	/// Raw data shape is structurally wrong for the target type.
	#[error("schema mismatch for {dtype}: {detail}")]
	SchemaMismatch {
		/// Tag of the type that rejected the data.
		dtype: String,
		/// What was wrong with the shape.
		detail: String,
	},
	/// Declared schema rejected the raw data.
	#[error("schema validation failed for {dtype}: {} violation(s)", .violations.len())]
	SchemaValidation {
		/// Tag of the validated type.
		dtype: String,
		/// Individual schema violations with paths.
		violations: Vec<Violation>,
	},
	/// Persisted guid string is not a valid identity token.
	#[error("invalid identity token: {guid}")]
	InvalidIdentity {
		/// The unparseable guid text.
		guid: String,
	},
	/// Failure at a specific node inside a decoded tree.
	#[error("decode failed at {path}: {source}")]
	DecodeAt {
		/// Breadcrumb path of the failing node.
		path: String,
		/// Underlying node-level failure.
		source: Box<DataError>,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
}
