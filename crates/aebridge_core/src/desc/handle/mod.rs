use std::fmt;
use std::rc::Rc;

use crate::desc::{DescApi, DescError, Descriptor, FourCharCode, RawDesc, Result, to_failure};

/// Shared reference to the native descriptor manager.
///
/// `Rc` keeps every descriptor on the thread that created it.
pub type Api = Rc<dyn DescApi>;

/// Exclusive owner of one native descriptor.
///
/// A handle is either owned (holds a [`RawDesc`]) or disposed. Dropping an
/// owned handle disposes the native storage; [`DescHandle::dispose`] and
/// [`DescHandle::take_raw`] leave it disposed, after which every read fails
/// with [`DescError::UninitializedResource`].
pub struct DescHandle {
	api: Api,
	raw: Option<RawDesc>,
}

impl DescHandle {
	/// Take ownership of `raw`.
	pub fn new(api: Api, raw: RawDesc) -> Self {
		Self { api, raw: Some(raw) }
	}

	/// Native manager this handle disposes through.
	pub fn api(&self) -> &Api {
		&self.api
	}

	/// Borrow the native descriptor, failing if disposed.
	pub fn raw(&self, context: &'static str) -> Result<&RawDesc> {
		self.raw.as_ref().ok_or(DescError::UninitializedResource { context })
	}

	pub(crate) fn raw_mut(&mut self, context: &'static str) -> Result<&mut RawDesc> {
		self.raw.as_mut().ok_or(DescError::UninitializedResource { context })
	}

	/// Native type code.
	pub fn raw_type(&self) -> Result<FourCharCode> {
		Ok(self.raw("descriptorType")?.descriptor_type())
	}

	/// Four-character rendering of the native type code.
	pub fn type_name(&self) -> Result<String> {
		Ok(self.raw_type()?.to_string())
	}

	/// Whether the payload has been disposed or moved out.
	pub fn is_disposed(&self) -> bool {
		self.raw.is_none()
	}

	/// Move the native descriptor out, leaving this handle disposed.
	pub fn take_raw(&mut self) -> Result<RawDesc> {
		self.raw.take().ok_or(DescError::UninitializedResource { context: "takeRaw" })
	}

	/// Dispose the native descriptor now. Later calls are no-ops.
	pub fn dispose(&mut self) {
		if let Some(raw) = self.raw.take() {
			let handle = raw.data_handle().get();
			if let Err(code) = self.api.dispose(raw) {
				tracing::warn!(code, handle, "native dispose reported failure");
			}
		}
	}

	/// Coerce into a new descriptor whose type is named by `name`.
	///
	/// The name is validated before the payload is touched; this handle is
	/// never modified.
	pub fn coerce_to(&self, name: &str) -> Result<Descriptor> {
		let to = FourCharCode::parse_nonzero(name)?;
		self.coerce_to_type(to)
	}

	/// Coerce into a new descriptor of type `to`.
	pub fn coerce_to_type(&self, to: FourCharCode) -> Result<Descriptor> {
		if to.is_zero() {
			return Err(DescError::InvalidTypeName { name: to.to_string() });
		}
		let raw = self.raw("coerce")?;
		let coerced = self.api.coerce(raw, to).map_err(|code| to_failure(code, "coerce"))?;
		tracing::debug!(from = %raw.descriptor_type(), to = %to, "coerced descriptor");
		Ok(Descriptor::from_raw(self.api.clone(), coerced))
	}
}

impl Drop for DescHandle {
	fn drop(&mut self) {
		self.dispose();
	}
}

impl fmt::Debug for DescHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.raw {
			Some(raw) => f
				.debug_struct("DescHandle")
				.field("type", &raw.descriptor_type())
				.field("handle", &raw.data_handle().get())
				.finish(),
			None => f.write_str("DescHandle(disposed)"),
		}
	}
}

/// Capability set shared by every descriptor view: type inspection,
/// coercion, and ownership control.
pub trait DescriptorOps {
	/// Underlying owner.
	fn handle(&self) -> &DescHandle;

	/// Underlying owner, mutably.
	fn handle_mut(&mut self) -> &mut DescHandle;

	/// Native type code.
	fn raw_type(&self) -> Result<FourCharCode> {
		self.handle().raw_type()
	}

	/// Four-character type name, the `descriptorType` property.
	fn type_name(&self) -> Result<String> {
		self.handle().type_name()
	}

	/// Coerce into a new descriptor, the `as(typeName)` operation.
	fn coerce_to(&self, name: &str) -> Result<Descriptor> {
		self.handle().coerce_to(name)
	}

	/// Coerce into a new descriptor of type `to`.
	fn coerce_to_type(&self, to: FourCharCode) -> Result<Descriptor> {
		self.handle().coerce_to_type(to)
	}

	/// Whether the payload has been disposed or moved out.
	fn is_disposed(&self) -> bool {
		self.handle().is_disposed()
	}

	/// Dispose now; idempotent.
	fn dispose(&mut self) {
		self.handle_mut().dispose();
	}

	/// Move the native descriptor out, leaving this view disposed.
	fn take_raw(&mut self) -> Result<RawDesc> {
		self.handle_mut().take_raw()
	}
}

impl DescriptorOps for DescHandle {
	fn handle(&self) -> &DescHandle {
		self
	}

	fn handle_mut(&mut self) -> &mut DescHandle {
		self
	}
}
