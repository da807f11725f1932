use std::path::PathBuf;

use cadoc::data::{DumpOptions, TypeRegistry, dump, dumps, load};

/// Reload a document and re-emit it with the requested formatting.
pub fn run(path: PathBuf, opt: DumpOptions, out: Option<PathBuf>) -> cadoc::data::Result<()> {
	let registry = TypeRegistry::with_core_types();
	let item = load(&path, &registry)?;

	match out {
		Some(out) => dump(&item, out, opt)?,
		None => println!("{}", dumps(&item, opt)?),
	}
	Ok(())
}
