use std::cell::RefCell;
use std::collections::HashMap;
use std::num::NonZeroU64;

use crate::desc::codes::{ERR_AE_DESC_NOT_FOUND, ERR_AE_ILLEGAL_INDEX, ERR_AE_NOT_AE_DESC, ERR_AE_NOT_APPLE_EVENT, ERR_AE_WRONG_DATA_TYPE};
use crate::desc::native::{DataHandle, DescApi, DescTree, NativeResult, RawDesc, TreeBody};
use crate::desc::FourCharCode;

mod coerce;

/// In-process descriptor manager.
///
/// Storage lives in a handle table of owned [`DescTree`]s. Getters copy
/// subtrees into fresh handles, disposal removes the handle, and counters
/// record every allocation and disposal so callers can check that each
/// handle was released exactly once.
///
/// Interior mutability is a `RefCell`; the manager is confined to one thread.
pub struct HeapApi {
	state: RefCell<HeapState>,
}

struct HeapState {
	next_id: NonZeroU64,
	live: HashMap<u64, DescTree>,
	allocated: usize,
	disposed: usize,
	rejected: usize,
}

impl Default for HeapApi {
	fn default() -> Self {
		Self::new()
	}
}

impl HeapApi {
	/// Create an empty manager.
	pub fn new() -> Self {
		Self {
			state: RefCell::new(HeapState {
				next_id: NonZeroU64::MIN,
				live: HashMap::new(),
				allocated: 0,
				disposed: 0,
				rejected: 0,
			}),
		}
	}

	/// Store `tree` and return the owning token for it.
	pub fn insert(&self, tree: DescTree) -> RawDesc {
		self.alloc(tree)
	}

	/// Copy of the tree stored behind `desc`, if it is still live.
	pub fn tree(&self, desc: &RawDesc) -> Option<DescTree> {
		self.state.borrow().live.get(&desc.data_handle().get()).cloned()
	}

	/// Whether `handle` still refers to undisposed storage.
	pub fn is_live(&self, handle: DataHandle) -> bool {
		self.state.borrow().live.contains_key(&handle.get())
	}

	/// Handles allocated and not yet disposed.
	pub fn live_count(&self) -> usize {
		self.state.borrow().live.len()
	}

	/// Handles allocated over the manager's lifetime.
	pub fn allocated_count(&self) -> usize {
		self.state.borrow().allocated
	}

	/// Successful disposals.
	pub fn disposed_count(&self) -> usize {
		self.state.borrow().disposed
	}

	/// Disposals of unknown or already-freed handles.
	pub fn rejected_disposals(&self) -> usize {
		self.state.borrow().rejected
	}

	fn alloc(&self, tree: DescTree) -> RawDesc {
		let mut state = self.state.borrow_mut();
		let id = state.next_id;
		state.next_id = id.saturating_add(1);
		state.allocated += 1;
		let descriptor_type = tree.descriptor_type;
		state.live.insert(id.get(), tree);
		RawDesc::new(descriptor_type, DataHandle::new(id))
	}

	fn with_tree<T>(&self, desc: &RawDesc, f: impl FnOnce(&DescTree) -> NativeResult<T>) -> NativeResult<T> {
		let state = self.state.borrow();
		let tree = state.live.get(&desc.data_handle().get()).ok_or(ERR_AE_NOT_AE_DESC)?;
		f(tree)
	}

	fn alloc_coerced(&self, tree: DescTree, desired: FourCharCode) -> NativeResult<RawDesc> {
		let tree = coerce::coerce_tree(&tree, desired)?;
		Ok(self.alloc(tree))
	}
}

impl DescApi for HeapApi {
	fn dispose(&self, desc: RawDesc) -> NativeResult<()> {
		let mut state = self.state.borrow_mut();
		if state.live.remove(&desc.data_handle().get()).is_some() {
			state.disposed += 1;
			Ok(())
		} else {
			state.rejected += 1;
			Err(ERR_AE_NOT_AE_DESC)
		}
	}

	fn duplicate(&self, desc: &RawDesc) -> NativeResult<RawDesc> {
		let copy = self.with_tree(desc, |tree| Ok(tree.clone()))?;
		Ok(self.alloc(copy))
	}

	fn coerce(&self, desc: &RawDesc, to: FourCharCode) -> NativeResult<RawDesc> {
		let coerced = self.with_tree(desc, |tree| coerce::coerce_tree(tree, to))?;
		Ok(self.alloc(coerced))
	}

	fn data_size(&self, desc: &RawDesc) -> NativeResult<usize> {
		self.with_tree(desc, |tree| tree.payload().map(<[u8]>::len).ok_or(ERR_AE_WRONG_DATA_TYPE))
	}

	fn copy_data(&self, desc: &RawDesc, out: &mut [u8]) -> NativeResult<usize> {
		self.with_tree(desc, |tree| {
			let bytes = tree.payload().ok_or(ERR_AE_WRONG_DATA_TYPE)?;
			let n = bytes.len().min(out.len());
			out[..n].copy_from_slice(&bytes[..n]);
			Ok(n)
		})
	}

	fn count_items(&self, container: &RawDesc) -> NativeResult<usize> {
		self.with_tree(container, |tree| match &tree.body {
			TreeBody::List(items) => Ok(items.len()),
			TreeBody::Record(fields) => Ok(fields.len()),
			TreeBody::Message { parameters, .. } => Ok(parameters.len()),
			TreeBody::Data(_) => Err(ERR_AE_WRONG_DATA_TYPE),
		})
	}

	fn nth_item(&self, container: &RawDesc, index: usize, desired: FourCharCode) -> NativeResult<(FourCharCode, RawDesc)> {
		let (key, item) = self.with_tree(container, |tree| {
			let slot = index.checked_sub(1).ok_or(ERR_AE_ILLEGAL_INDEX)?;
			match &tree.body {
				TreeBody::List(items) => items
					.get(slot)
					.map(|item| (FourCharCode::WILDCARD, item.clone()))
					.ok_or(ERR_AE_ILLEGAL_INDEX),
				TreeBody::Record(fields) | TreeBody::Message { parameters: fields, .. } => {
					fields.get(slot).cloned().ok_or(ERR_AE_ILLEGAL_INDEX)
				}
				TreeBody::Data(_) => Err(ERR_AE_WRONG_DATA_TYPE),
			}
		})?;
		Ok((key, self.alloc_coerced(item, desired)?))
	}

	fn nth_item_key(&self, container: &RawDesc, index: usize) -> NativeResult<FourCharCode> {
		self.with_tree(container, |tree| {
			let slot = index.checked_sub(1).ok_or(ERR_AE_ILLEGAL_INDEX)?;
			match &tree.body {
				TreeBody::List(items) if slot < items.len() => Ok(FourCharCode::WILDCARD),
				TreeBody::List(_) => Err(ERR_AE_ILLEGAL_INDEX),
				TreeBody::Record(fields) | TreeBody::Message { parameters: fields, .. } => {
					fields.get(slot).map(|(key, _)| *key).ok_or(ERR_AE_ILLEGAL_INDEX)
				}
				TreeBody::Data(_) => Err(ERR_AE_WRONG_DATA_TYPE),
			}
		})
	}

	fn key_item(&self, container: &RawDesc, key: FourCharCode, desired: FourCharCode) -> NativeResult<RawDesc> {
		let item = self.with_tree(container, |tree| match &tree.body {
			TreeBody::Record(fields) | TreeBody::Message { parameters: fields, .. } => find_keyed(fields, key),
			TreeBody::List(_) | TreeBody::Data(_) => Err(ERR_AE_WRONG_DATA_TYPE),
		})?;
		self.alloc_coerced(item, desired)
	}

	fn attribute(&self, message: &RawDesc, key: FourCharCode, desired: FourCharCode) -> NativeResult<RawDesc> {
		let item = self.with_tree(message, |tree| match &tree.body {
			TreeBody::Message { attributes, .. } => find_keyed(attributes, key),
			_ => Err(ERR_AE_NOT_APPLE_EVENT),
		})?;
		self.alloc_coerced(item, desired)
	}

	fn copy_attribute(&self, message: &RawDesc, key: FourCharCode, desired: FourCharCode, out: &mut [u8]) -> NativeResult<(FourCharCode, usize)> {
		self.with_tree(message, |tree| {
			let TreeBody::Message { attributes, .. } = &tree.body else {
				return Err(ERR_AE_NOT_APPLE_EVENT);
			};
			let item = coerce::coerce_tree(&find_keyed(attributes, key)?, desired)?;
			let bytes = item.payload().ok_or(ERR_AE_WRONG_DATA_TYPE)?;
			let n = bytes.len().min(out.len());
			out[..n].copy_from_slice(&bytes[..n]);
			Ok((item.descriptor_type, bytes.len()))
		})
	}

	fn create_desc(&self, descriptor_type: FourCharCode, bytes: &[u8]) -> NativeResult<RawDesc> {
		if matches!(descriptor_type, FourCharCode::LIST | FourCharCode::RECORD | FourCharCode::APPLE_EVENT) {
			return Err(ERR_AE_WRONG_DATA_TYPE);
		}
		Ok(self.alloc(DescTree::data(descriptor_type, bytes)))
	}

	fn create_list(&self, is_record: bool) -> NativeResult<RawDesc> {
		let tree = if is_record { DescTree::record(Vec::new()) } else { DescTree::list(Vec::new()) };
		Ok(self.alloc(tree))
	}

	fn put_nth_item(&self, list: &mut RawDesc, index: usize, item: &RawDesc) -> NativeResult<()> {
		let item = self.with_tree(item, |tree| Ok(tree.clone()))?;
		let mut state = self.state.borrow_mut();
		let tree = state.live.get_mut(&list.data_handle().get()).ok_or(ERR_AE_NOT_AE_DESC)?;
		let TreeBody::List(items) = &mut tree.body else {
			return Err(ERR_AE_WRONG_DATA_TYPE);
		};
		match index {
			0 => items.push(item),
			n if n == items.len() + 1 => items.push(item),
			n => *items.get_mut(n - 1).ok_or(ERR_AE_ILLEGAL_INDEX)? = item,
		}
		Ok(())
	}

	fn put_key_item(&self, record: &mut RawDesc, key: FourCharCode, item: &RawDesc) -> NativeResult<()> {
		let item = self.with_tree(item, |tree| Ok(tree.clone()))?;
		let mut state = self.state.borrow_mut();
		let tree = state.live.get_mut(&record.data_handle().get()).ok_or(ERR_AE_NOT_AE_DESC)?;
		let fields = match &mut tree.body {
			TreeBody::Record(fields) | TreeBody::Message { parameters: fields, .. } => fields,
			TreeBody::List(_) | TreeBody::Data(_) => return Err(ERR_AE_WRONG_DATA_TYPE),
		};
		match fields.iter_mut().find(|(existing, _)| *existing == key) {
			Some((_, slot)) => *slot = item,
			None => fields.push((key, item)),
		}
		Ok(())
	}
}

fn find_keyed(fields: &[(FourCharCode, DescTree)], key: FourCharCode) -> NativeResult<DescTree> {
	fields
		.iter()
		.find(|(existing, _)| *existing == key)
		.map(|(_, item)| item.clone())
		.ok_or(ERR_AE_DESC_NOT_FOUND)
}

#[cfg(test)]
mod tests;
