use crate::desc::test_support::{code, finder_record, heap_with, open_document_message, three_item_list, wrap};
use crate::desc::{DescTree, Descriptor, DescriptorOps, FourCharCode, NullDesc, Variant};

#[test]
fn classifies_known_tags() {
	assert_eq!(Variant::classify(FourCharCode::NULL), Variant::Null);
	assert_eq!(Variant::classify(FourCharCode::LIST), Variant::List);
	assert_eq!(Variant::classify(FourCharCode::RECORD), Variant::Record);
	assert_eq!(Variant::classify(FourCharCode::APPLE_EVENT), Variant::Message);
	assert_eq!(Variant::classify(FourCharCode::UTF16), Variant::Data);
	assert_eq!(Variant::classify(FourCharCode::KERNEL_PROCESS_ID), Variant::Data);
	assert_eq!(Variant::classify(code(b"obj ")), Variant::Unknown);
	assert_eq!(Variant::classify(FourCharCode(0)), Variant::Unknown);
}

#[test]
fn factory_wraps_into_matching_view() {
	let (heap, api) = heap_with();
	let cases = [
		(DescTree::null(), Variant::Null),
		(DescTree::int32(1), Variant::Data),
		(three_item_list(), Variant::List),
		(finder_record(), Variant::Record),
		(open_document_message(), Variant::Message),
		(DescTree::data(code(b"obj "), vec![1, 2, 3]), Variant::Unknown),
	];

	for (tree, expected) in cases {
		let tag = tree.descriptor_type;
		let desc = wrap(&heap, &api, tree);
		assert_eq!(desc.variant(), expected, "variant for {tag}");
		assert_eq!(desc.raw_type().expect("type readable"), tag);
		assert_eq!(desc.variant().as_str(), expected.as_str());
	}
	assert_eq!(heap.live_count(), 0);
}

#[test]
fn copy_from_never_shares_storage() {
	let (heap, api) = heap_with();
	let borrowed = heap.insert(DescTree::text("shared?"));

	let first = Descriptor::copy_from(api.clone(), &borrowed).expect("first copy");
	let second = Descriptor::copy_from(api.clone(), &borrowed).expect("second copy");
	assert_eq!(heap.live_count(), 3);

	drop(first);
	drop(second);
	assert!(heap.is_live(borrowed.data_handle()), "borrowed storage stays with its owner");
	assert_eq!(heap.live_count(), 1);
}

#[test]
fn with_variant_overrides_classification() {
	let (heap, api) = heap_with();
	let raw = heap.insert(DescTree::data(code(b"obj "), b"payload".to_vec()));
	let Descriptor::Data(data) = Descriptor::with_variant(api, raw, Variant::Data) else {
		panic!("expected explicit data view");
	};
	assert_eq!(data.bytes().expect("bytes readable"), b"payload");
}

#[test]
fn unknown_descriptors_still_coerce() {
	let (heap, api) = heap_with();
	let unknown = wrap(&heap, &api, DescTree::data(code(b"obj "), Vec::new()));
	let wrapped = unknown.coerce_to("list").expect("any data wraps into a list");
	assert_eq!(wrapped.variant(), Variant::List);
}

#[test]
fn created_null_is_owned_and_disposed() {
	let (heap, api) = heap_with();
	let null = NullDesc::create(api).expect("null creates");
	assert_eq!(null.raw_type().expect("type"), FourCharCode::NULL);
	let desc = Descriptor::Null(null);
	assert_eq!(desc.variant(), Variant::Null);
	assert_eq!(heap.live_count(), 1);
	drop(desc);
	assert_eq!(heap.disposed_count(), 1);
}
