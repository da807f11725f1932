use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::data::decode::decode;
use crate::data::encode::{EncodeOptions, encode};
use crate::data::registry::TypeRegistry;
use crate::data::value::Item;
use crate::data::{DataError, Result};

const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;
/// zstd frame magic used by compressed `.json.zst` sources.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression mode detected for a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCompression {
	/// Raw JSON text.
	None,
	/// zstd-compressed JSON text.
	Zstd,
}

impl SourceCompression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Surface formatting flags for a dump call.
///
/// `pretty` and `compact` are cosmetic over the same semantic tree; `minimal`
/// suppresses `guid` emission for every typed object in the tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct DumpOptions {
	/// Sort plain-object keys and indent the output.
	pub pretty: bool,
	/// Emit without any whitespace. Wins over `pretty` indentation.
	pub compact: bool,
	/// Omit identity tokens from every typed object wrapper.
	pub minimal: bool,
}

/// Serialize a value to a JSON string.
pub fn dumps(item: &Item, opt: DumpOptions) -> Result<String> {
	let tree = encode(item, &EncodeOptions {
		minimal: opt.minimal,
		sort_keys: opt.pretty,
	})?;
	if opt.pretty && !opt.compact {
		Ok(serde_json::to_string_pretty(&tree)?)
	} else {
		Ok(serde_json::to_string(&tree)?)
	}
}

/// Serialize a value to a JSON file.
pub fn dump(item: &Item, path: impl AsRef<Path>, opt: DumpOptions) -> Result<()> {
	let text = dumps(item, opt)?;
	fs::write(path, text)?;
	Ok(())
}

/// Serialize a value into a writable sink.
pub fn dump_writer(item: &Item, mut sink: impl Write, opt: DumpOptions) -> Result<()> {
	let text = dumps(item, opt)?;
	sink.write_all(text.as_bytes())?;
	Ok(())
}

/// Deserialize a value from a JSON string.
pub fn loads(text: &str, registry: &TypeRegistry) -> Result<Item> {
	let tree: serde_json::Value = serde_json::from_str(text)?;
	decode(&tree, registry)
}

/// Deserialize a value from a file path, decompressing transparently.
pub fn load(path: impl AsRef<Path>, registry: &TypeRegistry) -> Result<Item> {
	let raw = fs::read(path)?;
	Ok(decode_source(raw, registry)?.1)
}

/// Deserialize a value from a readable source, decompressing transparently.
pub fn load_reader(mut source: impl Read, registry: &TypeRegistry) -> Result<Item> {
	let mut raw = Vec::new();
	source.read_to_end(&mut raw)?;
	Ok(decode_source(raw, registry)?.1)
}

/// Detect compression, decompress if needed, then parse and decode.
pub fn decode_source(raw: Vec<u8>, registry: &TypeRegistry) -> Result<(SourceCompression, Item)> {
	let (compression, bytes) = decompress_bytes(raw)?;
	let tree: serde_json::Value = serde_json::from_slice(&bytes)?;
	Ok((compression, decode(&tree, registry)?))
}

fn decompress_bytes(raw: Vec<u8>) -> Result<(SourceCompression, Vec<u8>)> {
	if !raw.starts_with(&ZSTD_MAGIC) {
		return Ok((SourceCompression::None, raw));
	}

	let mut decoder = zstd::stream::read::Decoder::new(raw.as_slice())?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(DataError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok((SourceCompression::Zstd, out))
}
