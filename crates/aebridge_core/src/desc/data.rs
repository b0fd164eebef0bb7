use crate::desc::codes::ERR_AE_COERCION_FAIL;
use crate::desc::{Api, DescError, DescHandle, Descriptor, DescriptorOps, FourCharCode, Result, Scalar, to_failure};

/// View over a scalar data descriptor.
#[derive(Debug)]
pub struct DataDesc {
	handle: DescHandle,
}

impl DataDesc {
	pub(crate) fn new(handle: DescHandle) -> Self {
		Self { handle }
	}

	/// Allocate a data descriptor of type `descriptor_type` holding a copy of
	/// `bytes`. The view is a data view whatever the type classifies as.
	pub fn create(api: Api, descriptor_type: FourCharCode, bytes: &[u8]) -> Result<Self> {
		if descriptor_type.is_zero() {
			return Err(DescError::InvalidTypeName {
				name: descriptor_type.to_string(),
			});
		}
		let raw = api.create_desc(descriptor_type, bytes).map_err(|code| to_failure(code, "createDesc"))?;
		Ok(Self::new(DescHandle::new(api, raw)))
	}

	/// Copy of the payload bytes. An empty payload yields an empty vector.
	pub fn bytes(&self) -> Result<Vec<u8>> {
		read_bytes(&self.handle)
	}

	/// Payload decoded as a scalar, if its encoding is understood.
	pub fn scalar(&self) -> Result<Option<Scalar>> {
		let tag = self.handle.raw_type()?;
		Ok(Scalar::decode(tag, &self.bytes()?))
	}

	/// Read as a 64-bit integer, coercing natively when stored otherwise.
	pub fn to_i64(&self) -> Result<i64> {
		match self.read_as(FourCharCode::SINT64)? {
			Scalar::Int(value) => Ok(value),
			_ => Err(coercion_mismatch()),
		}
	}

	/// Read as a 64-bit float, coercing natively when stored otherwise.
	pub fn to_f64(&self) -> Result<f64> {
		match self.read_as(FourCharCode::IEEE64)? {
			Scalar::Float(value) => Ok(value),
			Scalar::Int(value) => Ok(value as f64),
			_ => Err(coercion_mismatch()),
		}
	}

	/// Read as a boolean, coercing natively when stored otherwise.
	pub fn to_bool(&self) -> Result<bool> {
		match self.read_as(FourCharCode::BOOLEAN)? {
			Scalar::Bool(value) => Ok(value),
			_ => Err(coercion_mismatch()),
		}
	}

	/// Read as text, coercing natively to UTF-8 when stored otherwise.
	pub fn to_text(&self) -> Result<String> {
		match self.read_as(FourCharCode::UTF8)? {
			Scalar::Text(value) => Ok(value),
			_ => Err(coercion_mismatch()),
		}
	}

	fn read_as(&self, canonical: FourCharCode) -> Result<Scalar> {
		if let Some(scalar) = self.scalar()?
			&& same_family(&scalar, canonical)
		{
			return Ok(scalar);
		}

		let Descriptor::Data(coerced) = self.handle.coerce_to_type(canonical)? else {
			return Err(coercion_mismatch());
		};
		coerced.scalar()?.ok_or_else(coercion_mismatch)
	}
}

impl DescriptorOps for DataDesc {
	fn handle(&self) -> &DescHandle {
		&self.handle
	}

	fn handle_mut(&mut self) -> &mut DescHandle {
		&mut self.handle
	}
}

/// Copy the payload of any data-bodied descriptor.
pub(crate) fn read_bytes(handle: &DescHandle) -> Result<Vec<u8>> {
	let raw = handle.raw("getData")?;
	let api = handle.api();
	let size = api.data_size(raw).map_err(|code| to_failure(code, "getData"))?;
	if size == 0 {
		return Ok(Vec::new());
	}

	let mut out = vec![0_u8; size];
	let copied = api.copy_data(raw, &mut out).map_err(|code| to_failure(code, "getData"))?;
	out.truncate(copied);
	Ok(out)
}

fn same_family(scalar: &Scalar, canonical: FourCharCode) -> bool {
	matches!(
		(scalar, canonical),
		(Scalar::Int(_), FourCharCode::SINT64)
			| (Scalar::Float(_), FourCharCode::IEEE64)
			| (Scalar::Bool(_), FourCharCode::BOOLEAN)
			| (Scalar::Text(_), FourCharCode::UTF8)
	)
}

fn coercion_mismatch() -> DescError {
	to_failure(ERR_AE_COERCION_FAIL, "coerce")
}
