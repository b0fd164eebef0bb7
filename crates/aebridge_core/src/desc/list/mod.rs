use crate::desc::slots::ItemSlots;
use crate::desc::{Api, DescHandle, Descriptor, DescriptorOps, Result, to_failure};

/// View over an ordered list descriptor.
///
/// Items are addressed 0-based. Extracting an item moves it out of the
/// list's indexed storage into a new, independently owned [`Descriptor`];
/// extracting the same index again fails with
/// [`DescError::UninitializedResource`](crate::desc::DescError::UninitializedResource).
#[derive(Debug)]
pub struct ListDesc {
	handle: DescHandle,
	slots: ItemSlots,
}

impl ListDesc {
	pub(crate) fn new(handle: DescHandle) -> Self {
		Self {
			handle,
			slots: ItemSlots::default(),
		}
	}

	/// Build a list holding copies of `items`, in order. The given descriptors
	/// are disposed once copied; they must belong to the same manager as `api`.
	pub fn from_items(api: Api, items: impl IntoIterator<Item = Descriptor>) -> Result<Self> {
		let raw = api.create_list(false).map_err(|code| to_failure(code, "createList"))?;
		let mut list = DescHandle::new(api.clone(), raw);
		for item in items {
			let raw = item.handle().raw("createList")?;
			api.put_nth_item(list.raw_mut("createList")?, 0, raw)
				.map_err(|code| to_failure(code, "createList"))?;
		}
		Ok(Self::new(list))
	}

	/// Number of items, including ones already extracted.
	pub fn count(&mut self) -> Result<usize> {
		self.slots.count(&self.handle, "countItems")
	}

	/// Number of items not yet extracted.
	pub fn remaining(&mut self) -> Result<usize> {
		self.slots.remaining(&self.handle, "countItems")
	}

	/// Move the item at `index` out of the list.
	pub fn item_at(&mut self, index: usize) -> Result<Descriptor> {
		let (_, item) = self.slots.claim(&self.handle, index, "extractItem")?;
		Ok(item)
	}

	/// Move every not-yet-extracted item out of the list, in order.
	pub fn items(&mut self) -> Result<Vec<Descriptor>> {
		let count = self.count()?;
		let mut out = Vec::with_capacity(count);
		for index in 0..count {
			if !self.slots.is_taken(index) {
				out.push(self.item_at(index)?);
			}
		}
		Ok(out)
	}
}

impl DescriptorOps for ListDesc {
	fn handle(&self) -> &DescHandle {
		&self.handle
	}

	fn handle_mut(&mut self) -> &mut DescHandle {
		&mut self.handle
	}
}
