use crate::desc::{DescError, DescHandle, Descriptor, FourCharCode, Result, to_failure};

/// Extraction ledger over a container's indexed storage.
///
/// Sized from the native item count on first use. Each index can be claimed
/// once; the claimed item becomes an independently owned [`Descriptor`] and
/// the slot is marked moved-out.
///
/// The ledger belongs to the view, not to the native storage: a payload moved
/// out with `take_raw` and wrapped again starts with every slot available.
#[derive(Debug, Default)]
pub(crate) struct ItemSlots {
	taken: Option<Vec<bool>>,
}

impl ItemSlots {
	/// Number of items in the container.
	pub(crate) fn count(&mut self, handle: &DescHandle, context: &'static str) -> Result<usize> {
		Ok(self.ensure(handle, context)?.len())
	}

	/// Number of items not yet claimed.
	pub(crate) fn remaining(&mut self, handle: &DescHandle, context: &'static str) -> Result<usize> {
		Ok(self.ensure(handle, context)?.iter().filter(|taken| !**taken).count())
	}

	/// Whether `index` has already been claimed.
	pub(crate) fn is_taken(&self, index: usize) -> bool {
		self.taken.as_ref().and_then(|taken| taken.get(index)).copied().unwrap_or(false)
	}

	/// Move the item at 0-based `index` out of the container.
	pub(crate) fn claim(&mut self, handle: &DescHandle, index: usize, context: &'static str) -> Result<(FourCharCode, Descriptor)> {
		let raw = handle.raw(context)?;
		let taken = self.ensure(handle, context)?;
		let count = taken.len();
		let slot = taken.get_mut(index).ok_or(DescError::IndexOutOfRange { index, count })?;
		if *slot {
			return Err(DescError::UninitializedResource { context });
		}

		let (key, item) = handle
			.api()
			.nth_item(raw, index + 1, FourCharCode::WILDCARD)
			.map_err(|code| to_failure(code, context))?;
		*slot = true;
		tracing::debug!(index, key = %key, item_type = %item.descriptor_type(), "extracted container item");
		Ok((key, Descriptor::from_raw(handle.api().clone(), item)))
	}

	/// Move the first item stored under `key` out of the container.
	/// `Ok(None)` when no item carries the key.
	pub(crate) fn claim_key(&mut self, handle: &DescHandle, key: FourCharCode, context: &'static str) -> Result<Option<Descriptor>> {
		let raw = handle.raw(context)?;
		let count = self.ensure(handle, context)?.len();
		for index in 0..count {
			let found = handle.api().nth_item_key(raw, index + 1).map_err(|code| to_failure(code, context))?;
			if found == key {
				let (_, item) = self.claim(handle, index, context)?;
				return Ok(Some(item));
			}
		}
		Ok(None)
	}

	fn ensure(&mut self, handle: &DescHandle, context: &'static str) -> Result<&mut Vec<bool>> {
		let raw = handle.raw(context)?;
		let taken = match self.taken.take() {
			Some(taken) => taken,
			None => {
				let count = handle.api().count_items(raw).map_err(|code| to_failure(code, context))?;
				vec![false; count]
			}
		};
		Ok(self.taken.insert(taken))
	}
}
