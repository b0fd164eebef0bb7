use crate::desc::slots::ItemSlots;
use crate::desc::{Api, DescHandle, Descriptor, DescriptorOps, FourCharCode, Result, to_failure};

/// View over a keyed record descriptor.
///
/// Positional and keyed extraction follow the same move-once rule as
/// [`ListDesc`](crate::desc::ListDesc): each field leaves the record once,
/// whichever way it is addressed.
#[derive(Debug)]
pub struct RecordDesc {
	handle: DescHandle,
	slots: ItemSlots,
}

impl RecordDesc {
	pub(crate) fn new(handle: DescHandle) -> Self {
		Self {
			handle,
			slots: ItemSlots::default(),
		}
	}

	/// Build a record holding copies of `fields`, in order. A repeated key
	/// replaces the earlier value. The given descriptors are disposed once
	/// copied; they must belong to the same manager as `api`.
	pub fn from_fields(api: Api, fields: impl IntoIterator<Item = (FourCharCode, Descriptor)>) -> Result<Self> {
		let raw = api.create_list(true).map_err(|code| to_failure(code, "createRecord"))?;
		let mut record = DescHandle::new(api, raw);
		for (key, field) in fields {
			put_field(&mut record, key, field.handle(), "createRecord")?;
		}
		Ok(Self::new(record))
	}

	/// Number of fields, including ones already extracted.
	pub fn field_count(&mut self) -> Result<usize> {
		self.slots.count(&self.handle, "countFields")
	}

	/// Number of fields not yet extracted.
	pub fn remaining(&mut self) -> Result<usize> {
		self.slots.remaining(&self.handle, "countFields")
	}

	/// Move the field at 0-based `index` out of the record.
	pub fn field_at(&mut self, index: usize) -> Result<(FourCharCode, Descriptor)> {
		self.slots.claim(&self.handle, index, "extractField")
	}

	/// Move every not-yet-extracted field out of the record, in order.
	pub fn fields(&mut self) -> Result<Vec<(FourCharCode, Descriptor)>> {
		let count = self.field_count()?;
		let mut out = Vec::with_capacity(count);
		for index in 0..count {
			if !self.slots.is_taken(index) {
				out.push(self.field_at(index)?);
			}
		}
		Ok(out)
	}

	/// Move the field stored under `key` out of the record. `Ok(None)` means
	/// the record has no such field; a field already moved out, by key or by
	/// position, fails with
	/// [`DescError::UninitializedResource`](crate::desc::DescError::UninitializedResource).
	pub fn field_by_key(&mut self, key: FourCharCode) -> Result<Option<Descriptor>> {
		self.slots.claim_key(&self.handle, key, "fieldByKey")
	}
}

/// Copy `item` into `record` under `key`.
pub(crate) fn put_field(record: &mut DescHandle, key: FourCharCode, item: &DescHandle, context: &'static str) -> Result<()> {
	let api = record.api().clone();
	let item = item.raw(context)?;
	api.put_key_item(record.raw_mut(context)?, key, item)
		.map_err(|code| to_failure(code, context))
}

impl DescriptorOps for RecordDesc {
	fn handle(&self) -> &DescHandle {
		&self.handle
	}

	fn handle_mut(&mut self) -> &mut DescHandle {
		&mut self.handle
	}
}
