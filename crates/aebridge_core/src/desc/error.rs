use std::borrow::Cow;

use thiserror::Error;

use crate::desc::{FourCharCode, OsErr};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DescError>;

/// Errors produced while owning, classifying, coercing, and decomposing descriptors.
#[derive(Debug, Error)]
pub enum DescError {
	/// Operation attempted on a disposed or moved-out descriptor.
	#[error("uninitialized descriptor ({context})")]
	UninitializedResource {
		/// Operation that found no payload.
		context: &'static str,
	},
	/// Type name did not decode to a non-zero four-character code.
	#[error("invalid descriptor type: {name:?}")]
	InvalidTypeName {
		/// User-provided type name.
		name: String,
	},
	/// List or record index outside `[0, count)`.
	#[error("index {index} out of range (count={count})")]
	IndexOutOfRange {
		/// Requested 0-based index.
		index: usize,
		/// Number of items in the container.
		count: usize,
	},
	/// Wrapped native call returned a non-success status.
	#[error("{context} failed: {message} ({code})")]
	NativeOperationFailed {
		/// Native status code.
		code: OsErr,
		/// Operation that called into the native layer.
		context: &'static str,
		/// Human-readable status description.
		message: Cow<'static, str>,
	},
	/// Value snapshot recursion exceeded the configured depth.
	#[error("value depth exceeded (max={max_depth})")]
	ValueDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Container holds more items than a value snapshot may expand.
	#[error("value container too large: count={count}, max={max}")]
	ValueTooManyItems {
		/// Items in the container.
		count: usize,
		/// Configured item ceiling.
		max: usize,
	},
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Unknown leading stream magic.
	#[error("not a flattened descriptor stream (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Unsupported flattened stream version.
	#[error("unsupported flat stream version {version}")]
	UnsupportedFlatVersion {
		/// Parsed version byte.
		version: u8,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Node body kind byte outside the known set.
	#[error("unknown flat body kind {kind} for {tag}")]
	UnknownFlatBodyKind {
		/// Type code of the node.
		tag: FourCharCode,
		/// Parsed kind byte.
		kind: u8,
	},
	/// Container body was not fully consumed by its declared items.
	#[error("trailing bytes in {tag} body at offset {at}: {rem} unread")]
	FlatTrailingBytes {
		/// Type code of the container.
		tag: FourCharCode,
		/// Offset of the first unread byte.
		at: usize,
		/// Unread byte count.
		rem: usize,
	},
	/// Flattened stream nests deeper than the decoder permits.
	#[error("flat stream nesting exceeded (max={max_depth})")]
	FlatDepthExceeded {
		/// Maximum nesting depth.
		max_depth: u32,
	},
	/// Descriptor body too large for a 32-bit length prefix.
	#[error("descriptor body of {len} bytes does not fit a flat length prefix")]
	FlatBodyTooLarge {
		/// Body length in bytes.
		len: usize,
	},
}

/// Stable classification of [`DescError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Disposed or moved-out descriptor.
	UninitializedResource,
	/// Malformed type name.
	InvalidTypeName,
	/// Container index out of bounds.
	IndexOutOfRange,
	/// Native status failure.
	NativeOperationFailed,
	/// Snapshot limits exceeded.
	ValueLimit,
	/// Malformed flattened stream.
	Format,
	/// Filesystem or stream failure.
	Io,
}

impl ErrorKind {
	/// Render the kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::UninitializedResource => "uninitialized_resource",
			Self::InvalidTypeName => "invalid_type_name",
			Self::IndexOutOfRange => "index_out_of_range",
			Self::NativeOperationFailed => "native_operation_failed",
			Self::ValueLimit => "value_limit",
			Self::Format => "format",
			Self::Io => "io",
		}
	}
}

impl DescError {
	/// Classify this error into its stable kind.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::UninitializedResource { .. } => ErrorKind::UninitializedResource,
			Self::InvalidTypeName { .. } => ErrorKind::InvalidTypeName,
			Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
			Self::NativeOperationFailed { .. } => ErrorKind::NativeOperationFailed,
			Self::ValueDepthExceeded { .. } | Self::ValueTooManyItems { .. } => ErrorKind::ValueLimit,
			Self::Io(_) => ErrorKind::Io,
			Self::UnknownMagic { .. }
			| Self::UnsupportedFlatVersion { .. }
			| Self::UnexpectedEof { .. }
			| Self::UnknownFlatBodyKind { .. }
			| Self::FlatTrailingBytes { .. }
			| Self::FlatDepthExceeded { .. }
			| Self::FlatBodyTooLarge { .. } => ErrorKind::Format,
		}
	}

	/// Native status code carried by this error, if any.
	pub fn native_code(&self) -> Option<OsErr> {
		match self {
			Self::NativeOperationFailed { code, .. } => Some(*code),
			_ => None,
		}
	}
}
