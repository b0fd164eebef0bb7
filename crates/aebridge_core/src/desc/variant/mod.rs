use crate::desc::{Api, DataDesc, DescHandle, DescriptorOps, FourCharCode, ListDesc, MessageDesc, RawDesc, RecordDesc, Result, to_failure};

/// Closed set of descriptor shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
	/// The null descriptor.
	Null,
	/// Scalar byte payload.
	Data,
	/// Ordered list.
	List,
	/// Keyed record.
	Record,
	/// Full inter-process message.
	Message,
	/// Any type code this crate does not recognize.
	Unknown,
}

const DATA_TYPES: &[FourCharCode] = &[
	FourCharCode::TEXT,
	FourCharCode::UTF8,
	FourCharCode::UTF16,
	FourCharCode::SINT16,
	FourCharCode::SINT32,
	FourCharCode::SINT64,
	FourCharCode::UINT32,
	FourCharCode::IEEE32,
	FourCharCode::IEEE64,
	FourCharCode::BOOLEAN,
	FourCharCode::TRUE,
	FourCharCode::FALSE,
	FourCharCode::ENUMERATED,
	FourCharCode::TYPE,
	FourCharCode::KEYWORD,
	FourCharCode::PROPERTY,
	FourCharCode::LONG_DATE_TIME,
	FourCharCode::FILE_URL,
	FourCharCode::ALIAS,
	FourCharCode::PROCESS_SERIAL_NUMBER,
	FourCharCode::KERNEL_PROCESS_ID,
	FourCharCode::APPLICATION_BUNDLE_ID,
	FourCharCode::APPLICATION_URL,
];

impl Variant {
	/// Classify a native type code.
	pub fn classify(tag: FourCharCode) -> Self {
		match tag {
			FourCharCode::NULL => Self::Null,
			FourCharCode::LIST => Self::List,
			FourCharCode::RECORD => Self::Record,
			FourCharCode::APPLE_EVENT => Self::Message,
			_ if DATA_TYPES.contains(&tag) => Self::Data,
			_ => Self::Unknown,
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Data => "data",
			Self::List => "list",
			Self::Record => "record",
			Self::Message => "message",
			Self::Unknown => "unknown",
		}
	}
}

/// View over the null descriptor. Adds nothing to the shared capability set.
#[derive(Debug)]
pub struct NullDesc {
	handle: DescHandle,
}

/// View over a descriptor of unrecognized type. Adds nothing to the shared
/// capability set; coerce it to reach its contents.
#[derive(Debug)]
pub struct UnknownDesc {
	handle: DescHandle,
}

impl NullDesc {
	pub(crate) fn new(handle: DescHandle) -> Self {
		Self { handle }
	}

	/// Allocate a fresh null descriptor.
	pub fn create(api: Api) -> Result<Self> {
		let raw = api.create_desc(FourCharCode::NULL, &[]).map_err(|code| to_failure(code, "createDesc"))?;
		Ok(Self::new(DescHandle::new(api, raw)))
	}
}

impl UnknownDesc {
	pub(crate) fn new(handle: DescHandle) -> Self {
		Self { handle }
	}
}

impl DescriptorOps for NullDesc {
	fn handle(&self) -> &DescHandle {
		&self.handle
	}

	fn handle_mut(&mut self) -> &mut DescHandle {
		&mut self.handle
	}
}

impl DescriptorOps for UnknownDesc {
	fn handle(&self) -> &DescHandle {
		&self.handle
	}

	fn handle_mut(&mut self) -> &mut DescHandle {
		&mut self.handle
	}
}

/// Descriptor classified into its variant view.
///
/// Every descriptor that crosses into this crate enters through
/// [`Descriptor::from_raw`], [`Descriptor::copy_from`], or
/// [`Descriptor::with_variant`]; callers match on the variant to reach
/// variant-specific operations.
#[derive(Debug)]
pub enum Descriptor {
	/// Null descriptor.
	Null(NullDesc),
	/// Scalar data.
	Data(DataDesc),
	/// Ordered list.
	List(ListDesc),
	/// Keyed record.
	Record(RecordDesc),
	/// Message.
	Message(MessageDesc),
	/// Unrecognized type.
	Unknown(UnknownDesc),
}

impl Descriptor {
	/// Wrap a descriptor whose ownership is transferred to the result,
	/// classifying it by its type code.
	pub fn from_raw(api: Api, raw: RawDesc) -> Self {
		let variant = Variant::classify(raw.descriptor_type());
		Self::with_variant(api, raw, variant)
	}

	/// Wrap a borrowed descriptor by copying it first. The borrowed storage
	/// stays with its current owner.
	pub fn copy_from(api: Api, raw: &RawDesc) -> Result<Self> {
		let copy = api.duplicate(raw).map_err(|code| to_failure(code, "duplicate"))?;
		Ok(Self::from_raw(api, copy))
	}

	/// Wrap an owned descriptor into an explicitly chosen view.
	pub fn with_variant(api: Api, raw: RawDesc, variant: Variant) -> Self {
		let handle = DescHandle::new(api, raw);
		match variant {
			Variant::Null => Self::Null(NullDesc::new(handle)),
			Variant::Data => Self::Data(DataDesc::new(handle)),
			Variant::List => Self::List(ListDesc::new(handle)),
			Variant::Record => Self::Record(RecordDesc::new(handle)),
			Variant::Message => Self::Message(MessageDesc::new(handle)),
			Variant::Unknown => Self::Unknown(UnknownDesc::new(handle)),
		}
	}

	/// Variant this descriptor was classified into.
	pub fn variant(&self) -> Variant {
		match self {
			Self::Null(_) => Variant::Null,
			Self::Data(_) => Variant::Data,
			Self::List(_) => Variant::List,
			Self::Record(_) => Variant::Record,
			Self::Message(_) => Variant::Message,
			Self::Unknown(_) => Variant::Unknown,
		}
	}
}

impl DescriptorOps for Descriptor {
	fn handle(&self) -> &DescHandle {
		match self {
			Self::Null(view) => view.handle(),
			Self::Data(view) => view.handle(),
			Self::List(view) => view.handle(),
			Self::Record(view) => view.handle(),
			Self::Message(view) => view.handle(),
			Self::Unknown(view) => view.handle(),
		}
	}

	fn handle_mut(&mut self) -> &mut DescHandle {
		match self {
			Self::Null(view) => view.handle_mut(),
			Self::Data(view) => view.handle_mut(),
			Self::List(view) => view.handle_mut(),
			Self::Record(view) => view.handle_mut(),
			Self::Message(view) => view.handle_mut(),
			Self::Unknown(view) => view.handle_mut(),
		}
	}
}

#[cfg(test)]
mod tests;
