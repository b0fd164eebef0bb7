use serde::Serialize;

use crate::desc::codes::ERR_AE_WRONG_DATA_TYPE;
use crate::desc::data::read_bytes;
use crate::desc::{DataDesc, DescError, Descriptor, DescriptorOps, FourCharCode, ListDesc, MessageDesc, RecordDesc, Result, Scalar, UnknownDesc};

/// Limits applied while snapshotting a descriptor tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueOptions {
	/// Maximum container nesting depth.
	pub max_depth: u32,
	/// Maximum items expanded from one container.
	pub max_items: usize,
	/// Render text payloads as strings instead of bytes.
	pub decode_text: bool,
}

impl Default for ValueOptions {
	fn default() -> Self {
		Self {
			max_depth: 16,
			max_items: 4096,
			decode_text: true,
		}
	}
}

/// Owned, serializable snapshot of a descriptor tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
	/// The null descriptor.
	Null,
	/// Boolean payload.
	Bool(bool),
	/// Integer payload of any width.
	Int(i64),
	/// Floating-point payload.
	Float(f64),
	/// Text payload.
	Text(String),
	/// Type, enumerator, keyword, or property code.
	Code {
		/// Type of the carrying descriptor.
		descriptor_type: FourCharCode,
		/// Carried code.
		code: FourCharCode,
	},
	/// Data payload without a decoded form.
	Bytes {
		/// Type of the carrying descriptor.
		descriptor_type: FourCharCode,
		/// Raw payload.
		data: Vec<u8>,
	},
	/// List items in order.
	List(Vec<Value>),
	/// Record fields in order.
	Record {
		/// Type of the record, `reco` unless it carries a custom type.
		descriptor_type: FourCharCode,
		/// Keyed fields.
		fields: Vec<FieldValue>,
	},
	/// Message with its identifying attributes.
	Message(MessageValue),
	/// Descriptor whose type is not recognized.
	Unknown {
		/// Type code.
		descriptor_type: FourCharCode,
		/// Raw payload, when the descriptor holds one.
		data: Option<Vec<u8>>,
	},
}

/// Keyed record field or message parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValue {
	/// Field key.
	pub key: FourCharCode,
	/// Field value.
	pub value: Value,
}

/// Snapshot of a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageValue {
	/// Message class.
	pub class: FourCharCode,
	/// Message id.
	pub id: FourCharCode,
	/// Return id.
	pub return_id: i32,
	/// Transaction id.
	pub transaction_id: i32,
	/// Target address.
	pub target: Box<Value>,
	/// Parameters in order.
	pub parameters: Vec<FieldValue>,
}

impl Descriptor {
	/// Consume this descriptor and snapshot it, recursively, into a [`Value`].
	///
	/// Container items are moved out as they are visited, so items extracted
	/// earlier through [`ListDesc::item_at`] or [`RecordDesc::field_at`] do not
	/// appear in the snapshot.
	pub fn into_value(self, opt: &ValueOptions) -> Result<Value> {
		snapshot(self, opt, 0)
	}
}

fn snapshot(desc: Descriptor, opt: &ValueOptions, depth: u32) -> Result<Value> {
	match desc {
		Descriptor::Null(null) => {
			let _ = null.raw_type()?;
			Ok(Value::Null)
		}
		Descriptor::Data(data) => data_value(&data, opt),
		Descriptor::List(list) => list_value(list, opt, depth),
		Descriptor::Record(record) => {
			let descriptor_type = record.raw_type()?;
			let fields = record_fields(record, opt, depth)?;
			Ok(Value::Record { descriptor_type, fields })
		}
		Descriptor::Message(message) => message_value(&message, opt, depth),
		Descriptor::Unknown(unknown) => unknown_value(&unknown, opt, depth),
	}
}

fn data_value(data: &DataDesc, opt: &ValueOptions) -> Result<Value> {
	let descriptor_type = data.raw_type()?;
	let bytes = data.bytes()?;
	Ok(match Scalar::decode(descriptor_type, &bytes) {
		Some(Scalar::Int(value)) => Value::Int(value),
		Some(Scalar::Float(value)) => Value::Float(value),
		Some(Scalar::Bool(value)) => Value::Bool(value),
		Some(Scalar::Text(text)) if opt.decode_text => Value::Text(text),
		Some(Scalar::Code(code)) => Value::Code { descriptor_type, code },
		Some(Scalar::Text(_)) | None => Value::Bytes { descriptor_type, data: bytes },
	})
}

fn list_value(mut list: ListDesc, opt: &ValueOptions, depth: u32) -> Result<Value> {
	enter(opt, depth)?;
	check_items(opt, list.count()?)?;

	let mut out = Vec::new();
	for item in list.items()? {
		out.push(snapshot(item, opt, depth + 1)?);
	}
	Ok(Value::List(out))
}

fn record_fields(mut record: RecordDesc, opt: &ValueOptions, depth: u32) -> Result<Vec<FieldValue>> {
	enter(opt, depth)?;
	check_items(opt, record.field_count()?)?;

	let mut out = Vec::new();
	for (key, item) in record.fields()? {
		out.push(FieldValue {
			key,
			value: snapshot(item, opt, depth + 1)?,
		});
	}
	Ok(out)
}

fn message_value(message: &MessageDesc, opt: &ValueOptions, depth: u32) -> Result<Value> {
	enter(opt, depth)?;
	Ok(Value::Message(MessageValue {
		class: message.message_class()?,
		id: message.message_id()?,
		return_id: message.return_id()?,
		transaction_id: message.transaction_id()?,
		target: Box::new(snapshot(message.target()?, opt, depth + 1)?),
		parameters: record_fields(message.parameters()?, opt, depth)?,
	}))
}

/// Unrecognized descriptors keep their payload when they have one; container
/// bodies are reached through coercion to the plain list or record type.
fn unknown_value(unknown: &UnknownDesc, opt: &ValueOptions, depth: u32) -> Result<Value> {
	let descriptor_type = unknown.raw_type()?;
	match read_bytes(unknown.handle()) {
		Ok(data) => {
			return Ok(Value::Unknown {
				descriptor_type,
				data: Some(data),
			});
		}
		Err(err) if err.native_code() != Some(ERR_AE_WRONG_DATA_TYPE) => return Err(err),
		Err(_) => {}
	}

	if let Ok(Descriptor::List(list)) = unknown.coerce_to_type(FourCharCode::LIST) {
		return list_value(list, opt, depth);
	}
	if let Ok(Descriptor::Record(record)) = unknown.coerce_to_type(FourCharCode::RECORD) {
		let fields = record_fields(record, opt, depth)?;
		return Ok(Value::Record { descriptor_type, fields });
	}
	Ok(Value::Unknown { descriptor_type, data: None })
}

fn enter(opt: &ValueOptions, depth: u32) -> Result<()> {
	if depth >= opt.max_depth {
		return Err(DescError::ValueDepthExceeded { max_depth: opt.max_depth });
	}
	Ok(())
}

fn check_items(opt: &ValueOptions, count: usize) -> Result<()> {
	if count > opt.max_items {
		return Err(DescError::ValueTooManyItems { count, max: opt.max_items });
	}
	Ok(())
}
