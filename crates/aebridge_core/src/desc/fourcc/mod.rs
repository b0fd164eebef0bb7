use std::fmt;
use std::str::FromStr;

use crate::desc::DescError;

/// Four-byte type code packed big-endian, as used for descriptor types and keys.
///
/// The string form maps every byte to the character with the same code point,
/// so any code renders without escaping and any four-character string whose
/// characters are all `<= U+00FF` parses back to the same code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FourCharCode(pub u32);

impl FourCharCode {
	/// Null descriptor type.
	pub const NULL: Self = Self::from_bytes(*b"null");
	/// Descriptor list.
	pub const LIST: Self = Self::from_bytes(*b"list");
	/// Keyed record.
	pub const RECORD: Self = Self::from_bytes(*b"reco");
	/// Full inter-process message.
	pub const APPLE_EVENT: Self = Self::from_bytes(*b"aevt");
	/// Match-anything type used when no coercion is wanted.
	pub const WILDCARD: Self = Self::from_bytes(*b"****");
	/// 8-bit text in the system encoding.
	pub const TEXT: Self = Self::from_bytes(*b"TEXT");
	/// UTF-8 text.
	pub const UTF8: Self = Self::from_bytes(*b"utf8");
	/// Native-endian UTF-16 text.
	pub const UTF16: Self = Self::from_bytes(*b"utxt");
	/// Signed 16-bit integer.
	pub const SINT16: Self = Self::from_bytes(*b"shor");
	/// Signed 32-bit integer.
	pub const SINT32: Self = Self::from_bytes(*b"long");
	/// Signed 64-bit integer.
	pub const SINT64: Self = Self::from_bytes(*b"comp");
	/// Unsigned 32-bit integer.
	pub const UINT32: Self = Self::from_bytes(*b"magn");
	/// 32-bit float.
	pub const IEEE32: Self = Self::from_bytes(*b"sing");
	/// 64-bit float.
	pub const IEEE64: Self = Self::from_bytes(*b"doub");
	/// One-byte boolean.
	pub const BOOLEAN: Self = Self::from_bytes(*b"bool");
	/// Data-less true.
	pub const TRUE: Self = Self::from_bytes(*b"true");
	/// Data-less false.
	pub const FALSE: Self = Self::from_bytes(*b"fals");
	/// Enumerated value.
	pub const ENUMERATED: Self = Self::from_bytes(*b"enum");
	/// Type code value.
	pub const TYPE: Self = Self::from_bytes(*b"type");
	/// Keyword value.
	pub const KEYWORD: Self = Self::from_bytes(*b"keyw");
	/// Property code value.
	pub const PROPERTY: Self = Self::from_bytes(*b"prop");
	/// Long date-time.
	pub const LONG_DATE_TIME: Self = Self::from_bytes(*b"ldt ");
	/// File URL.
	pub const FILE_URL: Self = Self::from_bytes(*b"furl");
	/// Alias record.
	pub const ALIAS: Self = Self::from_bytes(*b"alis");
	/// Process serial number target.
	pub const PROCESS_SERIAL_NUMBER: Self = Self::from_bytes(*b"psn ");
	/// Kernel process id target.
	pub const KERNEL_PROCESS_ID: Self = Self::from_bytes(*b"kpid");
	/// Application bundle id target.
	pub const APPLICATION_BUNDLE_ID: Self = Self::from_bytes(*b"bund");
	/// Application URL target.
	pub const APPLICATION_URL: Self = Self::from_bytes(*b"aprl");

	/// Message class attribute key.
	pub const EVENT_CLASS_ATTR: Self = Self::from_bytes(*b"evcl");
	/// Message id attribute key.
	pub const EVENT_ID_ATTR: Self = Self::from_bytes(*b"evid");
	/// Target address attribute key.
	pub const ADDRESS_ATTR: Self = Self::from_bytes(*b"addr");
	/// Return id attribute key.
	pub const RETURN_ID_ATTR: Self = Self::from_bytes(*b"rtid");
	/// Transaction id attribute key.
	pub const TRANSACTION_ID_ATTR: Self = Self::from_bytes(*b"tran");
	/// Interaction level attribute key.
	pub const INTERACT_LEVEL_ATTR: Self = Self::from_bytes(*b"inte");
	/// Event source attribute key.
	pub const EVENT_SOURCE_ATTR: Self = Self::from_bytes(*b"esrc");
	/// Original sender address attribute key.
	pub const ORIGINAL_ADDRESS_ATTR: Self = Self::from_bytes(*b"from");
	/// Missed keyword attribute key.
	pub const MISSED_KEYWORD_ATTR: Self = Self::from_bytes(*b"miss");
	/// Optional keywords attribute key.
	pub const OPTIONAL_KEYWORD_ATTR: Self = Self::from_bytes(*b"optk");
	/// Timeout attribute key.
	pub const TIMEOUT_ATTR: Self = Self::from_bytes(*b"timo");
	/// Direct object parameter key.
	pub const DIRECT_OBJECT: Self = Self::from_bytes(*b"----");

	/// Pack four bytes big-endian.
	pub const fn from_bytes(bytes: [u8; 4]) -> Self {
		Self(u32::from_be_bytes(bytes))
	}

	/// Unpack into four big-endian bytes.
	pub const fn to_bytes(self) -> [u8; 4] {
		self.0.to_be_bytes()
	}

	/// Whether this is the all-zero code, which never names a real type.
	pub const fn is_zero(self) -> bool {
		self.0 == 0
	}

	/// Parse a four-character string, rejecting the all-zero code.
	pub fn parse_nonzero(name: &str) -> Result<Self, DescError> {
		let code = name.parse::<Self>()?;
		if code.is_zero() {
			return Err(invalid(name));
		}
		Ok(code)
	}
}

impl From<[u8; 4]> for FourCharCode {
	fn from(bytes: [u8; 4]) -> Self {
		Self::from_bytes(bytes)
	}
}

impl fmt::Display for FourCharCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for byte in self.to_bytes() {
			fmt::Write::write_char(f, char::from(byte))?;
		}
		Ok(())
	}
}

impl serde::Serialize for FourCharCode {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl fmt::Debug for FourCharCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "'{}'", self.to_string().escape_debug())
	}
}

impl FromStr for FourCharCode {
	type Err = DescError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut bytes = [0_u8; 4];
		let mut chars = s.chars();
		for slot in &mut bytes {
			let ch = chars.next().ok_or_else(|| invalid(s))?;
			*slot = u8::try_from(ch).map_err(|_| invalid(s))?;
		}
		if chars.next().is_some() {
			return Err(invalid(s));
		}
		Ok(Self::from_bytes(bytes))
	}
}

fn invalid(name: &str) -> DescError {
	DescError::InvalidTypeName { name: name.to_owned() }
}
