mod decode;
mod encode;
mod error;
mod hash;
mod json;
mod object;
mod registry;
mod schema;
mod value;

/// Tree decoding entry point.
pub use decode::decode;
/// Canonical encoding entry points, options, and the dict wrapper tag.
pub use encode::{DICT_TAG, EncodeOptions, encode, encode_object};
/// Error and result aliases.
pub use error::{DataError, Result};
/// Content hashing entry points and digest type.
pub use hash::{ContentHash, content_hash, object_hash};
/// JSON dump/load entry points and source handling.
pub use json::{DumpOptions, SourceCompression, ZSTD_MAGIC, decode_source, dump, dump_writer, dumps, load, load_reader, loads};
/// Typed object contract and identity plumbing.
pub use object::{DataObject, ObjectCore, TypedData, type_tag_for};
/// Tag resolution types.
pub use registry::{Constructor, RawValidator, Registration, TypeRegistry};
/// Declarative raw data schemas.
pub use schema::{Schema, Violation, validate};
/// Runtime value types.
pub use value::{Dict, Item};
