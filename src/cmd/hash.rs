use std::path::PathBuf;

use cadoc::data::{TypeRegistry, content_hash, load};

/// Load a document and print its content hash.
pub fn run(path: PathBuf) -> cadoc::data::Result<()> {
	let registry = TypeRegistry::with_core_types();
	let item = load(&path, &registry)?;
	println!("{}", content_hash(&item)?);
	Ok(())
}
