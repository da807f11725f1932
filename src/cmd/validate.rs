use std::path::PathBuf;

use cadoc::data::{DataError, Item, TypeRegistry, load};

/// Load a document and run every typed node's declared schema over its raw data.
pub fn run(path: PathBuf) -> cadoc::data::Result<()> {
	let registry = TypeRegistry::with_core_types();
	let item = load(&path, &registry)?;

	let mut checked = 0_u64;
	let mut failures = Vec::new();
	visit(&item, &registry, &mut checked, &mut failures);

	println!("objects checked: {checked}");
	if failures.is_empty() {
		println!("ok");
		return Ok(());
	}

	for failure in &failures {
		println!("invalid: {failure}");
	}
	let Some(first) = failures.into_iter().next() else { unreachable!("failure list is non-empty") };
	Err(first)
}

fn visit(item: &Item, registry: &TypeRegistry, checked: &mut u64, failures: &mut Vec<DataError>) {
	match item {
		Item::List(items) => {
			for element in items {
				visit(element, registry, checked, failures);
			}
		}
		Item::Dict(dict) => {
			for (key, value) in dict.iter() {
				visit(key, registry, checked, failures);
				visit(value, registry, checked, failures);
			}
		}
		Item::Object(obj) => {
			*checked += 1;
			let raw = obj.raw_data();
			// The object decoded, so its tag must resolve.
			if let Ok(registration) = registry.resolve(&obj.type_tag())
				&& let Err(err) = registration.validate_raw(&raw)
			{
				failures.push(err);
			}
			visit(&raw, registry, checked, failures);
		}
		_ => {}
	}
}
