use crate::desc::codes::{ERR_AE_CORRUPT_DATA, ERR_AE_DESC_NOT_FOUND};
use crate::desc::record::put_field;
use crate::desc::{DescHandle, Descriptor, DescriptorOps, FourCharCode, RawDesc, RecordDesc, Result, to_failure};

/// Attribute keys gathered by [`MessageDesc::attributes`].
///
/// The native layer has no attribute enumeration, so the attribute record is
/// assembled from this fixed list; keys the message lacks are skipped.
pub const KNOWN_ATTRIBUTE_KEYS: &[FourCharCode] = &[
	FourCharCode::EVENT_CLASS_ATTR,
	FourCharCode::EVENT_ID_ATTR,
	FourCharCode::ADDRESS_ATTR,
	FourCharCode::RETURN_ID_ATTR,
	FourCharCode::TRANSACTION_ID_ATTR,
	FourCharCode::INTERACT_LEVEL_ATTR,
	FourCharCode::EVENT_SOURCE_ATTR,
	FourCharCode::ORIGINAL_ADDRESS_ATTR,
	FourCharCode::MISSED_KEYWORD_ATTR,
	FourCharCode::OPTIONAL_KEYWORD_ATTR,
	FourCharCode::TIMEOUT_ATTR,
];

/// View over a full inter-process message descriptor.
#[derive(Debug)]
pub struct MessageDesc {
	handle: DescHandle,
}

impl MessageDesc {
	pub(crate) fn new(handle: DescHandle) -> Self {
		Self { handle }
	}

	/// Message class code.
	pub fn message_class(&self) -> Result<FourCharCode> {
		self.read_code(FourCharCode::EVENT_CLASS_ATTR, "messageClass")
	}

	/// Message id code.
	pub fn message_id(&self) -> Result<FourCharCode> {
		self.read_code(FourCharCode::EVENT_ID_ATTR, "messageId")
	}

	/// Return id assigned when the message was created.
	pub fn return_id(&self) -> Result<i32> {
		self.read_i32(FourCharCode::RETURN_ID_ATTR, "returnId")
	}

	/// Transaction id, zero outside a transaction.
	pub fn transaction_id(&self) -> Result<i32> {
		self.read_i32(FourCharCode::TRANSACTION_ID_ATTR, "transactionId")
	}

	/// Copy of the target address descriptor.
	pub fn target(&self) -> Result<Descriptor> {
		let raw = self.handle.raw("target")?;
		let target = self
			.handle
			.api()
			.attribute(raw, FourCharCode::ADDRESS_ATTR, FourCharCode::WILDCARD)
			.map_err(|code| to_failure(code, "target"))?;
		Ok(self.wrap(target))
	}

	/// Record holding a copy of every parameter.
	pub fn parameters(&self) -> Result<RecordDesc> {
		let raw = self.handle.raw("parameters")?;
		let api = self.handle.api();
		let count = api.count_items(raw).map_err(|code| to_failure(code, "parameters"))?;

		let mut record = self.new_record("parameters")?;
		for index in 1..=count {
			let (key, item) = api
				.nth_item(raw, index, FourCharCode::WILDCARD)
				.map_err(|code| to_failure(code, "parameters"))?;
			let item = DescHandle::new(api.clone(), item);
			put_field(&mut record, key, &item, "parameters")?;
		}
		Ok(RecordDesc::new(record))
	}

	/// Record holding a copy of every attribute in [`KNOWN_ATTRIBUTE_KEYS`]
	/// the message carries.
	pub fn attributes(&self) -> Result<RecordDesc> {
		let raw = self.handle.raw("attributes")?;
		let api = self.handle.api();

		let mut record = self.new_record("attributes")?;
		for &key in KNOWN_ATTRIBUTE_KEYS {
			let item = match api.attribute(raw, key, FourCharCode::WILDCARD) {
				Ok(item) => DescHandle::new(api.clone(), item),
				Err(ERR_AE_DESC_NOT_FOUND) => continue,
				Err(code) => return Err(to_failure(code, "attributes")),
			};
			put_field(&mut record, key, &item, "attributes")?;
		}
		Ok(RecordDesc::new(record))
	}

	/// Copy of one parameter. `Ok(None)` when the message has no such parameter.
	pub fn parameter(&self, key: FourCharCode) -> Result<Option<Descriptor>> {
		let raw = self.handle.raw("parameter")?;
		match self.handle.api().key_item(raw, key, FourCharCode::WILDCARD) {
			Ok(item) => Ok(Some(self.wrap(item))),
			Err(ERR_AE_DESC_NOT_FOUND) => Ok(None),
			Err(code) => Err(to_failure(code, "parameter")),
		}
	}

	/// Copy of one attribute. `Ok(None)` when the message has no such attribute.
	pub fn attribute(&self, key: FourCharCode) -> Result<Option<Descriptor>> {
		let raw = self.handle.raw("attribute")?;
		match self.handle.api().attribute(raw, key, FourCharCode::WILDCARD) {
			Ok(item) => Ok(Some(self.wrap(item))),
			Err(ERR_AE_DESC_NOT_FOUND) => Ok(None),
			Err(code) => Err(to_failure(code, "attribute")),
		}
	}

	fn read_attribute<const N: usize>(&self, key: FourCharCode, desired: FourCharCode, context: &'static str) -> Result<[u8; N]> {
		let raw = self.handle.raw(context)?;
		let mut buf = [0_u8; N];
		let (_, size) = self
			.handle
			.api()
			.copy_attribute(raw, key, desired, &mut buf)
			.map_err(|code| to_failure(code, context))?;
		if size != N {
			return Err(to_failure(ERR_AE_CORRUPT_DATA, context));
		}
		Ok(buf)
	}

	fn read_code(&self, key: FourCharCode, context: &'static str) -> Result<FourCharCode> {
		let bytes = self.read_attribute::<4>(key, FourCharCode::TYPE, context)?;
		Ok(FourCharCode(u32::from_ne_bytes(bytes)))
	}

	fn read_i32(&self, key: FourCharCode, context: &'static str) -> Result<i32> {
		let bytes = self.read_attribute::<4>(key, FourCharCode::SINT32, context)?;
		Ok(i32::from_ne_bytes(bytes))
	}

	fn new_record(&self, context: &'static str) -> Result<DescHandle> {
		let api = self.handle.api();
		let record = api.create_list(true).map_err(|code| to_failure(code, context))?;
		Ok(DescHandle::new(api.clone(), record))
	}

	fn wrap(&self, raw: RawDesc) -> Descriptor {
		Descriptor::from_raw(self.handle.api().clone(), raw)
	}
}

impl DescriptorOps for MessageDesc {
	fn handle(&self) -> &DescHandle {
		&self.handle
	}

	fn handle_mut(&mut self) -> &mut DescHandle {
		&mut self.handle
	}
}
