use std::rc::Rc;

use crate::desc::{Api, DescTree, Descriptor, FourCharCode, HeapApi};

pub(crate) fn heap_with() -> (Rc<HeapApi>, Api) {
	let heap = Rc::new(HeapApi::new());
	let api: Api = heap.clone();
	(heap, api)
}

pub(crate) fn wrap(heap: &HeapApi, api: &Api, tree: DescTree) -> Descriptor {
	Descriptor::from_raw(api.clone(), heap.insert(tree))
}

pub(crate) fn code(bytes: &[u8; 4]) -> FourCharCode {
	FourCharCode::from_bytes(*bytes)
}

pub(crate) fn three_item_list() -> DescTree {
	DescTree::list(vec![DescTree::int32(10), DescTree::text("two"), DescTree::list(vec![DescTree::boolean(true)])])
}

pub(crate) fn finder_record() -> DescTree {
	DescTree::record(vec![
		(code(b"pnam"), DescTree::text("Finder")),
		(code(b"pidx"), DescTree::int32(3)),
		(code(b"pcls"), DescTree::code(FourCharCode::TYPE, code(b"capp"))),
	])
}

pub(crate) fn open_document_message() -> DescTree {
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
