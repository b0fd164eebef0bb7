use crate::desc::FourCharCode;

/// Owned descriptor tree, the storage form used by [`HeapApi`](super::HeapApi)
/// and the flattened stream codec.
#[derive(Debug, Clone, PartialEq)]
pub struct DescTree {
	/// Type code of this node.
	pub descriptor_type: FourCharCode,
	/// Payload or children.
	pub body: TreeBody,
}

/// Body of a [`DescTree`] node.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeBody {
	/// Raw payload bytes.
	Data(Vec<u8>),
	/// Ordered items.
	List(Vec<DescTree>),
	/// Keyed fields in insertion order.
	Record(Vec<(FourCharCode, DescTree)>),
	/// Message attributes and parameters.
	Message {
		/// Keyed attributes (class, id, target, ...).
		attributes: Vec<(FourCharCode, DescTree)>,
		/// Keyed parameters.
		parameters: Vec<(FourCharCode, DescTree)>,
	},
}

impl DescTree {
	/// Data node with an explicit type.
	pub fn data(descriptor_type: FourCharCode, bytes: impl Into<Vec<u8>>) -> Self {
		Self {
			descriptor_type,
			body: TreeBody::Data(bytes.into()),
		}
	}

	/// Null descriptor.
	pub fn null() -> Self {
		Self::data(FourCharCode::NULL, Vec::new())
	}

	/// UTF-8 text.
	pub fn text(text: &str) -> Self {
		Self::data(FourCharCode::UTF8, text.as_bytes())
	}

	/// Signed 32-bit integer.
	pub fn int32(value: i32) -> Self {
		Self::data(FourCharCode::SINT32, value.to_ne_bytes())
	}

	/// Signed 64-bit integer.
	pub fn int64(value: i64) -> Self {
		Self::data(FourCharCode::SINT64, value.to_ne_bytes())
	}

	/// 64-bit float.
	pub fn float64(value: f64) -> Self {
		Self::data(FourCharCode::IEEE64, value.to_ne_bytes())
	}

	/// One-byte boolean.
	pub fn boolean(value: bool) -> Self {
		Self::data(FourCharCode::BOOLEAN, [u8::from(value)])
	}

	/// Code-valued node such as a type or enumerator.
	pub fn code(descriptor_type: FourCharCode, code: FourCharCode) -> Self {
		Self::data(descriptor_type, code.0.to_ne_bytes())
	}

	/// List of items.
	pub fn list(items: Vec<DescTree>) -> Self {
		Self {
			descriptor_type: FourCharCode::LIST,
			body: TreeBody::List(items),
		}
	}

	/// Record of keyed fields.
	pub fn record(fields: Vec<(FourCharCode, DescTree)>) -> Self {
		Self {
			descriptor_type: FourCharCode::RECORD,
			body: TreeBody::Record(fields),
		}
	}

	/// Message carrying the standard identifying attributes.
	pub fn message(
		class: FourCharCode,
		id: FourCharCode,
		target: DescTree,
		return_id: i32,
		transaction_id: i32,
		parameters: Vec<(FourCharCode, DescTree)>,
	) -> Self {
		let attributes = vec![
			(FourCharCode::EVENT_CLASS_ATTR, Self::code(FourCharCode::TYPE, class)),
			(FourCharCode::EVENT_ID_ATTR, Self::code(FourCharCode::TYPE, id)),
			(FourCharCode::ADDRESS_ATTR, target),
			(FourCharCode::RETURN_ID_ATTR, Self::int32(return_id)),
			(FourCharCode::TRANSACTION_ID_ATTR, Self::int32(transaction_id)),
		];
		Self {
			descriptor_type: FourCharCode::APPLE_EVENT,
			body: TreeBody::Message { attributes, parameters },
		}
	}

	/// Payload bytes of a data node.
	pub fn payload(&self) -> Option<&[u8]> {
		match &self.body {
			TreeBody::Data(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// Number of nodes in this tree, including itself.
	pub fn node_count(&self) -> usize {
		1 + match &self.body {
			TreeBody::Data(_) => 0,
			TreeBody::List(items) => items.iter().map(Self::node_count).sum(),
			TreeBody::Record(fields) => fields.iter().map(|(_, item)| item.node_count()).sum(),
			TreeBody::Message { attributes, parameters } => {
				attributes.iter().chain(parameters).map(|(_, item)| item.node_count()).sum()
			}
		}
	}
}
