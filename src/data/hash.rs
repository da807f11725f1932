use std::fmt;
use std::fmt::Write as _;

use sha2::{Digest, Sha256};

use crate::data::encode::{EncodeOptions, encode, encode_object};
use crate::data::object::DataObject;
use crate::data::value::Item;
use crate::data::Result;

/// SHA-256 digest of a value's canonical encoded form.
///
/// Two values hash equal exactly when their raw-data trees are structurally
/// identical under the canonical encoding rules; identity tokens and display
/// names never participate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
	/// Raw digest bytes.
	pub fn as_bytes(&self) -> &[u8; 32] {
		&self.0
	}

	/// Lowercase hexadecimal rendering of the digest.
	pub fn to_hex(&self) -> String {
		let mut out = String::with_capacity(64);
		for byte in self.0 {
			let _ = write!(out, "{byte:02x}");
		}
		out
	}
}

impl fmt::Display for ContentHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_hex())
	}
}

/// Hash a value for change detection and version comparison.
pub fn content_hash(item: &Item) -> Result<ContentHash> {
	let tree = encode(item, &EncodeOptions::canonical())?;
	Ok(digest(&serde_json::to_string(&tree)?))
}

/// Hash a typed object directly, identical to hashing it wrapped as an item.
pub fn object_hash(obj: &dyn DataObject) -> Result<ContentHash> {
	let tree = encode_object(obj, &EncodeOptions::canonical())?;
	Ok(digest(&serde_json::to_string(&tree)?))
}

fn digest(text: &str) -> ContentHash {
	let mut hasher = Sha256::new();
	hasher.update(text.as_bytes());
	ContentHash(hasher.finalize().into())
}
