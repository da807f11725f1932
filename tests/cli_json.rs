#![allow(missing_docs)]

use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;

fn write_fixture(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
	let path = dir.path().join(name);
	std::fs::write(&path, text).expect("fixture writes");
	path
}

const SCENE: &str = r#"{
	"origin": {"dtype": "cadoc.geometry/Point", "data": [0.0, 0.0, 0.0], "guid": "5f2b1a84-74a5-4672-9031-a7e2ab8c3be2"},
	"boundary": {"dtype": "cadoc.geometry/Polygon", "data": {"points": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]}}
}"#;

#[test]
fn info_json_output_is_valid_and_structured() {
	let dir = tempfile::tempdir().expect("scratch dir");
	let path = write_fixture(&dir, "scene.json", SCENE);

	let output = Command::new(env!("CARGO_BIN_EXE_cadoc"))
		.args(["info", path.to_str().unwrap(), "--json"])
		.output()
		.expect("command executes");
	assert!(output.status.success(), "info should succeed: {}", String::from_utf8_lossy(&output.stderr));

	let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be valid json");
	assert_eq!(json["compression"], "none");
	assert_eq!(json["root_kind"], "dict");
	assert_eq!(json["objects"]["cadoc.geometry/Point"], 1);
	assert_eq!(json["objects"]["cadoc.geometry/Polygon"], 1);
}

#[test]
fn hash_output_is_a_hex_digest_and_ignores_guids() {
	let dir = tempfile::tempdir().expect("scratch dir");
	let with_guid = write_fixture(&dir, "a.json", SCENE);
	let without_guid = write_fixture(&dir, "b.json", &SCENE.replace(", \"guid\": \"5f2b1a84-74a5-4672-9031-a7e2ab8c3be2\"", ""));

	let first = run_hash(&with_guid);
	let second = run_hash(&without_guid);
	assert_eq!(first.len(), 64);
	assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
	assert_eq!(first, second);
}

fn run_hash(path: &std::path::Path) -> String {
	let output = Command::new(env!("CARGO_BIN_EXE_cadoc"))
		.args(["hash", path.to_str().unwrap()])
		.output()
		.expect("command executes");
	assert!(output.status.success(), "hash should succeed: {}", String::from_utf8_lossy(&output.stderr));
	String::from_utf8(output.stdout).expect("utf-8 stdout").trim().to_owned()
}

#[test]
fn repack_minimal_strips_guids() {
	let dir = tempfile::tempdir().expect("scratch dir");
	let path = write_fixture(&dir, "scene.json", SCENE);

	let output = Command::new(env!("CARGO_BIN_EXE_cadoc"))
		.args(["repack", path.to_str().unwrap(), "--compact", "--minimal"])
		.output()
		.expect("command executes");
	assert!(output.status.success());

	let text = String::from_utf8(output.stdout).expect("utf-8 stdout");
	assert!(!text.contains("guid"));
	assert!(text.contains("\"dtype\":\"cadoc.geometry/Point\""));
}

#[test]
fn validate_reports_ok_for_conforming_documents() {
	let dir = tempfile::tempdir().expect("scratch dir");
	let path = write_fixture(&dir, "scene.json", SCENE);

	let output = Command::new(env!("CARGO_BIN_EXE_cadoc"))
		.args(["validate", path.to_str().unwrap()])
		.output()
		.expect("command executes");
	assert!(output.status.success());

	let text = String::from_utf8(output.stdout).expect("utf-8 stdout");
	assert!(text.contains("objects checked: 2"));
	assert!(text.contains("ok"));
}

#[test]
fn unknown_dtype_fails_with_the_offending_tag() {
	let dir = tempfile::tempdir().expect("scratch dir");
	let path = write_fixture(&dir, "bad.json", r#"{"dtype": "nope/Nope", "data": {}}"#);

	let output = Command::new(env!("CARGO_BIN_EXE_cadoc"))
		.args(["info", path.to_str().unwrap()])
		.output()
		.expect("command executes");
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("nope/Nope"));
}
