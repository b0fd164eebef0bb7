use crate::desc::codes::{ERR_AE_COERCION_FAIL, ERR_AE_DESC_NOT_FOUND, ERR_AE_ILLEGAL_INDEX, ERR_AE_NOT_AE_DESC, ERR_AE_WRONG_DATA_TYPE};
use crate::desc::{DescApi, DescTree, FourCharCode, HeapApi, RawDesc, TreeBody};

fn key(code: &[u8; 4]) -> FourCharCode {
	FourCharCode::from_bytes(*code)
}

#[test]
fn dispose_releases_each_handle_once() {
	let heap = HeapApi::new();
	let raw = heap.insert(DescTree::int32(5));
	let handle = raw.data_handle();
	assert!(heap.is_live(handle));
	assert_eq!(heap.live_count(), 1);

	heap.dispose(raw).expect("first dispose succeeds");
	assert!(!heap.is_live(handle));
	assert_eq!(heap.disposed_count(), 1);

	let forged = RawDesc::new(FourCharCode::SINT32, handle);
	assert_eq!(heap.dispose(forged), Err(ERR_AE_NOT_AE_DESC));
	assert_eq!(heap.disposed_count(), 1);
	assert_eq!(heap.rejected_disposals(), 1);
}

#[test]
fn nth_item_is_one_based_and_copies() {
	let heap = HeapApi::new();
	let list = heap.insert(DescTree::list(vec![DescTree::int32(1), DescTree::text("two")]));

	assert_eq!(heap.count_items(&list), Ok(2));
	let (item_key, item) = heap.nth_item(&list, 2, FourCharCode::WILDCARD).expect("second item exists");
	assert_eq!(item_key, FourCharCode::WILDCARD);
	assert_eq!(heap.tree(&item), Some(DescTree::text("two")));
	assert_eq!(heap.nth_item(&list, 0, FourCharCode::WILDCARD).map(|(_, raw)| raw), Err(ERR_AE_ILLEGAL_INDEX));
	assert_eq!(heap.nth_item(&list, 3, FourCharCode::WILDCARD).map(|(_, raw)| raw), Err(ERR_AE_ILLEGAL_INDEX));

	heap.dispose(item).expect("item disposes");
	assert_eq!(heap.count_items(&list), Ok(2), "copy-out leaves the container intact");
	heap.dispose(list).expect("list disposes");
	assert_eq!(heap.live_count(), 0);
}

#[test]
fn nth_item_applies_desired_type() {
	let heap = HeapApi::new();
	let list = heap.insert(DescTree::list(vec![DescTree::int32(12)]));
	let (_, item) = heap.nth_item(&list, 1, FourCharCode::UTF8).expect("item coerces");
	assert_eq!(heap.tree(&item), Some(DescTree::text("12")));
}

#[test]
fn key_lookup_distinguishes_missing_and_wrong_type() {
	let heap = HeapApi::new();
	let record = heap.insert(DescTree::record(vec![(key(b"pnam"), DescTree::text("Finder"))]));
	let list = heap.insert(DescTree::list(Vec::new()));

	let name = heap.key_item(&record, key(b"pnam"), FourCharCode::WILDCARD).expect("field exists");
	assert_eq!(heap.tree(&name), Some(DescTree::text("Finder")));
	assert_eq!(heap.key_item(&record, key(b"xxxx"), FourCharCode::WILDCARD), Err(ERR_AE_DESC_NOT_FOUND));
	assert_eq!(heap.key_item(&list, key(b"pnam"), FourCharCode::WILDCARD), Err(ERR_AE_WRONG_DATA_TYPE));
}

#[test]
fn coercion_allocates_new_storage() {
	let heap = HeapApi::new();
	let number = heap.insert(DescTree::text("41"));
	let coerced = heap.coerce(&number, FourCharCode::SINT32).expect("text coerces to long");

	assert_ne!(coerced.data_handle(), number.data_handle());
	assert_eq!(heap.tree(&coerced), Some(DescTree::int32(41)));
	assert_eq!(heap.tree(&number), Some(DescTree::text("41")));
	assert_eq!(heap.live_count(), 2);
}

#[test]
fn coercion_wraps_and_unwraps_lists() {
	let heap = HeapApi::new();
	let number = heap.insert(DescTree::int32(3));
	let wrapped = heap.coerce(&number, FourCharCode::LIST).expect("data wraps into list");
	assert_eq!(heap.tree(&wrapped), Some(DescTree::list(vec![DescTree::int32(3)])));

	let unwrapped = heap.coerce(&wrapped, FourCharCode::UTF8).expect("single item list unwraps");
	assert_eq!(heap.tree(&unwrapped), Some(DescTree::text("3")));

	let pair = heap.insert(DescTree::list(vec![DescTree::int32(1), DescTree::int32(2)]));
	assert_eq!(heap.coerce(&pair, FourCharCode::SINT32), Err(ERR_AE_COERCION_FAIL));
}

#[test]
fn unsupported_coercions_fail() {
	let heap = HeapApi::new();
	let record = heap.insert(DescTree::record(Vec::new()));
	let null = heap.insert(DescTree::null());
	let text = heap.insert(DescTree::text("not a number"));

	assert_eq!(heap.coerce(&record, FourCharCode::UTF8), Err(ERR_AE_COERCION_FAIL));
	assert_eq!(heap.coerce(&null, FourCharCode::SINT32), Err(ERR_AE_COERCION_FAIL));
	assert_eq!(heap.coerce(&text, FourCharCode::SINT32), Err(ERR_AE_COERCION_FAIL));
	assert_eq!(heap.live_count(), 3, "failed coercions allocate nothing");
}

#[test]
fn custom_typed_record_coerces_to_plain_record() {
	let heap = HeapApi::new();
	let mut tree = DescTree::record(vec![(key(b"pnam"), DescTree::text("Finder"))]);
	tree.descriptor_type = key(b"obj ");
	let specifier = heap.insert(tree);

	let plain = heap.coerce(&specifier, FourCharCode::RECORD).expect("record body relabels");
	assert_eq!(plain.descriptor_type(), FourCharCode::RECORD);
	assert_eq!(heap.count_items(&plain), Ok(1));
	assert_eq!(heap.coerce(&specifier, FourCharCode::LIST), Err(ERR_AE_COERCION_FAIL));
}

#[test]
fn put_key_item_replaces_existing_fields() {
	let heap = HeapApi::new();
	let mut record = heap.create_list(true).expect("record allocates");
	let first = heap.insert(DescTree::int32(1));
	let second = heap.insert(DescTree::int32(2));

	heap.put_key_item(&mut record, key(b"size"), &first).expect("first put");
	heap.put_key_item(&mut record, key(b"size"), &second).expect("second put");

	let Some(DescTree {
		body: TreeBody::Record(fields),
		..
	}) = heap.tree(&record)
	else {
		panic!("expected record body");
	};
	assert_eq!(fields, vec![(key(b"size"), DescTree::int32(2))]);
}

#[test]
fn copy_attribute_reports_full_size() {
	let heap = HeapApi::new();
	let message = heap.insert(DescTree::message(key(b"aevt"), key(b"odoc"), DescTree::null(), 7, 0, Vec::new()));

	let mut buf = [0_u8; 4];
	let (kind, size) = heap
		.copy_attribute(&message, FourCharCode::EVENT_ID_ATTR, FourCharCode::TYPE, &mut buf)
		.expect("event id copies");
	assert_eq!(kind, FourCharCode::TYPE);
	assert_eq!(size, 4);
	assert_eq!(FourCharCode(u32::from_ne_bytes(buf)), key(b"odoc"));

	let mut short = [0_u8; 2];
	let (_, size) = heap
		.copy_attribute(&message, FourCharCode::RETURN_ID_ATTR, FourCharCode::WILDCARD, &mut short)
		.expect("return id copies");
	assert_eq!(size, 4);
}

#[test]
fn nth_item_key_reads_keys_without_copying() {
	let heap = HeapApi::new();
	let record = heap.insert(DescTree::record(vec![(key(b"pnam"), DescTree::text("Finder")), (key(b"pidx"), DescTree::int32(3))]));
	let list = heap.insert(DescTree::list(vec![DescTree::int32(1)]));
	let data = heap.insert(DescTree::int32(1));

	assert_eq!(heap.nth_item_key(&record, 2), Ok(key(b"pidx")));
	assert_eq!(heap.nth_item_key(&record, 0), Err(ERR_AE_ILLEGAL_INDEX));
	assert_eq!(heap.nth_item_key(&record, 3), Err(ERR_AE_ILLEGAL_INDEX));
	assert_eq!(heap.nth_item_key(&list, 1), Ok(FourCharCode::WILDCARD));
	assert_eq!(heap.nth_item_key(&list, 2), Err(ERR_AE_ILLEGAL_INDEX));
	assert_eq!(heap.nth_item_key(&data, 1), Err(ERR_AE_WRONG_DATA_TYPE));
	assert_eq!(heap.allocated_count(), 3);
}

#[test]
fn create_desc_refuses_container_types() {
	let heap = HeapApi::new();
	let text = heap.create_desc(FourCharCode::UTF8, b"hi").expect("data creates");
	assert_eq!(heap.tree(&text), Some(DescTree::text("hi")));

	for container in [FourCharCode::LIST, FourCharCode::RECORD, FourCharCode::APPLE_EVENT] {
		assert_eq!(heap.create_desc(container, &[]), Err(ERR_AE_WRONG_DATA_TYPE), "{container}");
	}
	assert_eq!(heap.allocated_count(), 1);
}

#[test]
fn put_nth_item_appends_and_replaces() {
	let heap = HeapApi::new();
	let mut list = heap.create_list(false).expect("list creates");
	let one = heap.insert(DescTree::int32(1));
	let two = heap.insert(DescTree::text("two"));

	heap.put_nth_item(&mut list, 0, &one).expect("index 0 appends");
	heap.put_nth_item(&mut list, 2, &two).expect("count + 1 appends");
	heap.put_nth_item(&mut list, 1, &two).expect("in-range index replaces");
	assert_eq!(heap.put_nth_item(&mut list, 4, &one), Err(ERR_AE_ILLEGAL_INDEX));
	assert_eq!(heap.tree(&list), Some(DescTree::list(vec![DescTree::text("two"), DescTree::text("two")])));

	let mut record = heap.create_list(true).expect("record creates");
	assert_eq!(heap.put_nth_item(&mut record, 0, &one), Err(ERR_AE_WRONG_DATA_TYPE));

	heap.dispose(one).expect("source stays owned by the caller");
	heap.dispose(two).expect("source stays owned by the caller");
	assert_eq!(heap.live_count(), 2);
}
