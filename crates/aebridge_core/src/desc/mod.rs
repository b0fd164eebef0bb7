mod bytes;
mod data;
mod error;
mod flat;
mod fourcc;
mod handle;
mod list;
mod message;
mod native;
mod record;
mod scalar;
mod slots;
mod status;
mod value;
mod variant;

#[cfg(test)]
mod test_support;

/// Scalar-data descriptor view.
pub use data::DataDesc;
/// Error, error kind, and result aliases.
pub use error::{DescError, ErrorKind, Result};
/// Flattened descriptor stream codec.
pub use flat::{FLAT_MAGIC, FLAT_VERSION, decode_flat, encode_flat, open_flat};
/// Four-character type code and its string codec.
pub use fourcc::FourCharCode;
/// Exclusive descriptor owner and the shared descriptor capability.
pub use handle::{Api, DescHandle, DescriptorOps};
/// List descriptor view.
pub use list::ListDesc;
/// Message descriptor view.
pub use message::{KNOWN_ATTRIBUTE_KEYS, MessageDesc};
/// Native descriptor boundary.
pub use native::{DataHandle, DescApi, DescTree, HeapApi, NativeResult, RawDesc, TreeBody};
/// Record descriptor view.
pub use record::RecordDesc;
/// Decoded scalar payloads.
pub use scalar::Scalar;
/// Native status codes and their translation.
pub use status::{OsErr, describe, to_failure};
/// Native status code constants.
pub use status::codes;
/// Snapshot values produced from descriptor trees.
pub use value::{FieldValue, MessageValue, Value, ValueOptions};
/// Variant classification and the polymorphic descriptor.
pub use variant::{Descriptor, NullDesc, UnknownDesc, Variant};
