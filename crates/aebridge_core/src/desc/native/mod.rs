//! Boundary to the native descriptor manager.
//!
//! Everything that actually allocates, copies, coerces, or frees descriptor
//! storage lives behind [`DescApi`]. The rest of the crate only ever holds
//! [`RawDesc`] tokens and hands them back to the API that minted them.

mod heap;
mod tree;

use std::num::NonZeroU64;

use crate::desc::{FourCharCode, OsErr};

pub use heap::HeapApi;
pub use tree::{DescTree, TreeBody};

/// Result of a native call: the value, or the raw status code on failure.
pub type NativeResult<T> = std::result::Result<T, OsErr>;

/// Opaque storage handle inside a native descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataHandle(NonZeroU64);

impl DataHandle {
	/// Wrap a native storage id.
	pub fn new(id: NonZeroU64) -> Self {
		Self(id)
	}

	/// Raw storage id.
	pub fn get(self) -> u64 {
		self.0.get()
	}
}

/// One native descriptor: type code plus storage handle.
///
/// `RawDesc` is neither `Clone` nor `Copy`. Holding one means
/// holding the disposal right for its storage; passing it by value moves that
/// right. Only a [`DescApi`] implementation should mint new values.
#[derive(Debug, PartialEq, Eq)]
pub struct RawDesc {
	descriptor_type: FourCharCode,
	data_handle: DataHandle,
}

impl RawDesc {
	/// Mint a token for freshly allocated native storage.
	pub fn new(descriptor_type: FourCharCode, data_handle: DataHandle) -> Self {
		Self {
			descriptor_type,
			data_handle,
		}
	}

	/// Native type code.
	pub fn descriptor_type(&self) -> FourCharCode {
		self.descriptor_type
	}

	/// Native storage handle.
	pub fn data_handle(&self) -> DataHandle {
		self.data_handle
	}
}

/// Native descriptor manager operations.
///
/// Every method that produces a [`RawDesc`] hands the caller sole ownership of
/// new storage; the caller must eventually pass it to [`DescApi::dispose`].
/// Item and attribute getters copy out of their container, they never alias it.
/// Indexes passed to [`DescApi::nth_item`] are 1-based, like the native API.
pub trait DescApi {
	/// Free a descriptor's storage.
	fn dispose(&self, desc: RawDesc) -> NativeResult<()>;

	/// Copy a descriptor into new storage.
	fn duplicate(&self, desc: &RawDesc) -> NativeResult<RawDesc>;

	/// Convert a descriptor into new storage of type `to`.
	fn coerce(&self, desc: &RawDesc, to: FourCharCode) -> NativeResult<RawDesc>;

	/// Size of the payload in bytes.
	fn data_size(&self, desc: &RawDesc) -> NativeResult<usize>;

	/// Copy up to `out.len()` payload bytes, returning the count copied.
	fn copy_data(&self, desc: &RawDesc, out: &mut [u8]) -> NativeResult<usize>;

	/// Number of items in a list, fields in a record, or parameters in a message.
	fn count_items(&self, container: &RawDesc) -> NativeResult<usize>;

	/// Copy out the `index`th (1-based) item with its key, coerced to `desired`.
	/// List items report [`FourCharCode::WILDCARD`] as their key.
	fn nth_item(&self, container: &RawDesc, index: usize, desired: FourCharCode) -> NativeResult<(FourCharCode, RawDesc)>;

	/// Key of the `index`th (1-based) item without copying it out. List items
	/// report [`FourCharCode::WILDCARD`].
	fn nth_item_key(&self, container: &RawDesc, index: usize) -> NativeResult<FourCharCode>;

	/// Copy out the record field or message parameter stored under `key`.
	fn key_item(&self, container: &RawDesc, key: FourCharCode, desired: FourCharCode) -> NativeResult<RawDesc>;

	/// Copy out a message attribute.
	fn attribute(&self, message: &RawDesc, key: FourCharCode, desired: FourCharCode) -> NativeResult<RawDesc>;

	/// Copy a message attribute's payload into `out`, returning its type and full size.
	fn copy_attribute(&self, message: &RawDesc, key: FourCharCode, desired: FourCharCode, out: &mut [u8]) -> NativeResult<(FourCharCode, usize)>;

	/// Allocate a data descriptor holding a copy of `bytes`.
	fn create_desc(&self, descriptor_type: FourCharCode, bytes: &[u8]) -> NativeResult<RawDesc>;

	/// Allocate an empty list, or an empty record when `is_record` is set.
	fn create_list(&self, is_record: bool) -> NativeResult<RawDesc>;

	/// Store a copy of `item` at the `index`th (1-based) position of `list`,
	/// replacing what is there. Index 0 appends.
	fn put_nth_item(&self, list: &mut RawDesc, index: usize, item: &RawDesc) -> NativeResult<()>;

	/// Store a copy of `item` in `record` under `key`, replacing any previous value.
	fn put_key_item(&self, record: &mut RawDesc, key: FourCharCode, item: &RawDesc) -> NativeResult<()>;
}
