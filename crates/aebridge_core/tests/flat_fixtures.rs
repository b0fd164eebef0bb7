#![allow(missing_docs)]

use std::rc::Rc;

use aebridge::desc::{Api, DescError, DescTree, Descriptor, FourCharCode, HeapApi, Value, ValueOptions, encode_flat, open_flat};
use aebridge_testkit::{fixture_path, scratch_path};

fn code(bytes: &[u8; 4]) -> FourCharCode {
	FourCharCode::from_bytes(*bytes)
}

fn open_document() -> DescTree {
	DescTree::message(
		code(b"aevt"),
		code(b"odoc"),
		DescTree::data(FourCharCode::APPLICATION_BUNDLE_ID, "com.apple.finder"),
		-7,
		0,
		vec![
			(FourCharCode::DIRECT_OBJECT, DescTree::list(vec![DescTree::data(FourCharCode::FILE_URL, "file:///tmp/a.txt")])),
			(code(b"usin"), DescTree::text("TextEdit")),
		],
	)
}

#[test]
fn open_document_fixture_decodes_to_expected_tree() {
	let tree = open_flat(fixture_path("open_document.aefl")).expect("fixture opens");
	assert_eq!(tree, open_document());
	assert_eq!(tree.node_count(), 9);

	let bytes = std::fs::read(fixture_path("open_document.aefl")).expect("fixture reads");
	assert_eq!(encode_flat(&tree).expect("encode"), bytes, "encoder reproduces the fixture byte for byte");
}

#[test]
fn written_stream_reopens_from_disk() {
	let tree = DescTree::record(vec![(code(b"pnam"), DescTree::text("Finder")), (code(b"pidx"), DescTree::int32(3))]);
	let path = scratch_path("finder_record.aefl");
	std::fs::write(&path, encode_flat(&tree).expect("encode")).expect("scratch write");
	assert_eq!(open_flat(&path).expect("stream reopens"), tree);

	std::fs::write(&path, b"PK\x03\x04 zip").expect("scratch write");
	let err = open_flat(&path).expect_err("foreign file");
	assert!(matches!(err, DescError::UnknownMagic { magic } if magic == *b"PK\x03\x04"));
	assert_eq!(err.kind().as_str(), "format");
}

#[test]
fn fixture_snapshot_renders_message() {
	let tree = open_flat(fixture_path("open_document.aefl")).expect("fixture opens");
	let heap = Rc::new(HeapApi::new());
	let api: Api = heap.clone();
	let desc = Descriptor::from_raw(api, heap.insert(tree));

	let Value::Message(message) = desc.into_value(&ValueOptions::default()).expect("snapshot") else {
		panic!("expected message value");
	};
	assert_eq!(message.class.to_string(), "aevt");
	assert_eq!(message.id.to_string(), "odoc");
	assert_eq!(message.parameters[0].key, FourCharCode::DIRECT_OBJECT);
	assert_eq!(
		message.parameters[0].value,
		Value::List(vec![Value::Bytes {
			descriptor_type: FourCharCode::FILE_URL,
			data: b"file:///tmp/a.txt".to_vec(),
		}])
	);
	assert_eq!(heap.live_count(), 0);
}

#[test]
fn mixed_list_fixture_covers_every_value_kind() {
	let tree = open_flat(fixture_path("mixed_list.aefl")).expect("fixture opens");
	let heap = Rc::new(HeapApi::new());
	let api: Api = heap.clone();
	let value = Descriptor::from_raw(api, heap.insert(tree))
		.into_value(&ValueOptions::default())
		.expect("snapshot");

	let json = serde_json::to_value(&value).expect("json");
	let kinds: Vec<&str> = json["value"]
		.as_array()
		.expect("list items")
		.iter()
		.map(|item| item["kind"].as_str().expect("kind tag"))
		.collect();
	assert_eq!(kinds, ["record", "float", "bool", "null", "unknown"]);
	assert_eq!(json["value"][0]["value"]["descriptor_type"], "obj ");
	assert_eq!(json["value"][1]["value"], 2.5);
	assert_eq!(json["value"][4]["value"]["data"], serde_json::json!([77, 65, 67, 83]));
}

#[test]
fn missing_fixture_is_an_io_error() {
	let err = open_flat(fixture_path("does_not_exist.aefl")).expect_err("missing file");
	assert_eq!(err.kind().as_str(), "io");
}
