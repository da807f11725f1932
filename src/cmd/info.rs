use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use cadoc::data::{Item, TypeRegistry, decode_source};

#[derive(serde::Serialize)]
struct InfoReport {
	path: String,
	compression: &'static str,
	root_kind: &'static str,
	nodes: u64,
	objects: BTreeMap<String, u64>,
}

/// Load a document and print a structural summary.
pub fn run(path: PathBuf, json: bool) -> cadoc::data::Result<()> {
	let registry = TypeRegistry::with_core_types();
	let raw = fs::read(&path)?;
	let (compression, item) = decode_source(raw, &registry)?;

	let mut report = InfoReport {
		path: path.display().to_string(),
		compression: compression.as_str(),
		root_kind: item.kind(),
		nodes: 0,
		objects: BTreeMap::new(),
	};
	tally(&item, &mut report);

	if json {
		println!("{}", serde_json::to_string_pretty(&report)?);
		return Ok(());
	}

	println!("path: {}", report.path);
	println!("compression: {}", report.compression);
	println!("root: {}", report.root_kind);
	println!("nodes: {}", report.nodes);
	println!("objects:");
	if report.objects.is_empty() {
		println!("  (none)");
	}
	for (dtype, count) in &report.objects {
		println!("  {dtype}: {count}");
	}

	Ok(())
}

fn tally(item: &Item, report: &mut InfoReport) {
	report.nodes += 1;
	match item {
		Item::List(items) => {
			for element in items {
				tally(element, report);
			}
		}
		Item::Dict(dict) => {
			for (key, value) in dict.iter() {
				tally(key, report);
				tally(value, report);
			}
		}
		Item::Object(obj) => {
			*report.objects.entry(obj.type_tag()).or_insert(0) += 1;
			tally(&obj.raw_data(), report);
		}
		_ => {}
	}
}
