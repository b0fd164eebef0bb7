use std::borrow::Cow;

use crate::desc::DescError;

/// Native 16-bit status code. Zero is success.
pub type OsErr = i16;

/// Known native status codes.
pub mod codes {
	use super::OsErr;

	/// Success.
	pub const NO_ERR: OsErr = 0;
	/// Error in user parameter list.
	pub const PARAM_ERR: OsErr = -50;
	/// Not enough memory.
	pub const MEM_FULL_ERR: OsErr = -108;
	/// User canceled.
	pub const USER_CANCELED_ERR: OsErr = -128;
	/// No eligible process with the given serial number.
	pub const PROC_NOT_FOUND: OsErr = -600;
	/// Connection is invalid.
	pub const CONNECTION_INVALID: OsErr = -609;
	/// Data could not be coerced to the requested type.
	pub const ERR_AE_COERCION_FAIL: OsErr = -1700;
	/// Descriptor was not found.
	pub const ERR_AE_DESC_NOT_FOUND: OsErr = -1701;
	/// Data could not be read.
	pub const ERR_AE_CORRUPT_DATA: OsErr = -1702;
	/// Wrong descriptor type.
	pub const ERR_AE_WRONG_DATA_TYPE: OsErr = -1703;
	/// Not a valid descriptor.
	pub const ERR_AE_NOT_AE_DESC: OsErr = -1704;
	/// Operation involving a list item failed.
	pub const ERR_AE_BAD_LIST_ITEM: OsErr = -1705;
	/// Newer manager version required.
	pub const ERR_AE_NEWER_VERSION: OsErr = -1706;
	/// Descriptor is not a message.
	pub const ERR_AE_NOT_APPLE_EVENT: OsErr = -1707;
	/// Message was not handled.
	pub const ERR_AE_EVENT_NOT_HANDLED: OsErr = -1708;
	/// Invalid reply.
	pub const ERR_AE_REPLY_NOT_VALID: OsErr = -1709;
	/// Invalid sending mode.
	pub const ERR_AE_UNKNOWN_SEND_MODE: OsErr = -1710;
	/// Wait for reply was canceled.
	pub const ERR_AE_WAIT_CANCELED: OsErr = -1711;
	/// Message timed out.
	pub const ERR_AE_TIMEOUT: OsErr = -1712;
	/// No user interaction allowed.
	pub const ERR_AE_NO_USER_INTERACTION: OsErr = -1713;
	/// Wrong keyword for a special function.
	pub const ERR_AE_NOT_A_SPECIAL_FUNCTION: OsErr = -1714;
	/// A required parameter was not accessed.
	pub const ERR_AE_PARAM_MISSED: OsErr = -1715;
	/// Unknown target address type.
	pub const ERR_AE_UNKNOWN_ADDRESS_TYPE: OsErr = -1716;
	/// No handler found.
	pub const ERR_AE_HANDLER_NOT_FOUND: OsErr = -1717;
	/// Reply has not arrived yet.
	pub const ERR_AE_REPLY_NOT_ARRIVED: OsErr = -1718;
	/// Index out of range.
	pub const ERR_AE_ILLEGAL_INDEX: OsErr = -1719;
	/// Range specifier could not be resolved.
	pub const ERR_AE_IMPOSSIBLE_RANGE: OsErr = -1720;
	/// Wrong number of arguments.
	pub const ERR_AE_WRONG_NUMBER_ARGS: OsErr = -1721;
	/// Accessor not found.
	pub const ERR_AE_ACCESSOR_NOT_FOUND: OsErr = -1723;
	/// Requested object could not be found.
	pub const ERR_AE_NO_SUCH_OBJECT: OsErr = -1728;
	/// Unknown object type.
	pub const ERR_AE_UNKNOWN_OBJECT_TYPE: OsErr = -1731;
	/// Handler reported a failure.
	pub const ERR_AE_EVENT_FAILED: OsErr = -10000;
}

use codes::*;

const MESSAGES: &[(OsErr, &str)] = &[
	(NO_ERR, "no error"),
	(PARAM_ERR, "error in user parameter list"),
	(MEM_FULL_ERR, "not enough memory"),
	(USER_CANCELED_ERR, "user canceled"),
	(PROC_NOT_FOUND, "no eligible process with specified process serial number"),
	(CONNECTION_INVALID, "connection is invalid"),
	(ERR_AE_COERCION_FAIL, "data could not be coerced to the requested descriptor type"),
	(ERR_AE_DESC_NOT_FOUND, "descriptor was not found"),
	(ERR_AE_CORRUPT_DATA, "data in the descriptor could not be read"),
	(ERR_AE_WRONG_DATA_TYPE, "wrong descriptor type"),
	(ERR_AE_NOT_AE_DESC, "not a valid descriptor"),
	(ERR_AE_BAD_LIST_ITEM, "operation involving a list item failed"),
	(ERR_AE_NEWER_VERSION, "need a newer version of the event manager"),
	(ERR_AE_NOT_APPLE_EVENT, "descriptor is not an Apple event"),
	(ERR_AE_EVENT_NOT_HANDLED, "event was not handled by an event handler"),
	(ERR_AE_REPLY_NOT_VALID, "reply is not valid"),
	(ERR_AE_UNKNOWN_SEND_MODE, "invalid sending mode was passed"),
	(ERR_AE_WAIT_CANCELED, "user canceled out of wait loop for reply or receipt"),
	(ERR_AE_TIMEOUT, "event timed out"),
	(ERR_AE_NO_USER_INTERACTION, "no user interaction allowed"),
	(ERR_AE_NOT_A_SPECIAL_FUNCTION, "wrong keyword for a special function"),
	(ERR_AE_PARAM_MISSED, "a required parameter was not accessed"),
	(ERR_AE_UNKNOWN_ADDRESS_TYPE, "unknown event address type"),
	(ERR_AE_HANDLER_NOT_FOUND, "no handler found for the event"),
	(ERR_AE_REPLY_NOT_ARRIVED, "the contents of the reply are not there yet"),
	(ERR_AE_ILLEGAL_INDEX, "index is out of range"),
	(ERR_AE_IMPOSSIBLE_RANGE, "range specifier could not be resolved"),
	(ERR_AE_WRONG_NUMBER_ARGS, "wrong number of arguments"),
	(ERR_AE_ACCESSOR_NOT_FOUND, "accessor not found"),
	(ERR_AE_NO_SUCH_OBJECT, "requested object could not be found"),
	(ERR_AE_UNKNOWN_OBJECT_TYPE, "unknown object type"),
	(ERR_AE_EVENT_FAILED, "event handler failed"),
];

/// Describe a native status code, falling back to a generic message.
pub fn describe(code: OsErr) -> Cow<'static, str> {
	match MESSAGES.iter().find(|(known, _)| *known == code) {
		Some(&(_, message)) => Cow::Borrowed(message),
		None => Cow::Owned(format!("unknown error {code}")),
	}
}

/// Wrap a failed native status into a [`DescError`].
///
/// `code` must not be [`codes::NO_ERR`]; callers check for success first.
pub fn to_failure(code: OsErr, context: &'static str) -> DescError {
	debug_assert_ne!(code, NO_ERR, "success status passed to to_failure ({context})");
	tracing::debug!(code, context, "native descriptor call failed");
	DescError::NativeOperationFailed {
		code,
		context,
		message: describe(code),
	}
}
