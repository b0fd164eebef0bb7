use crate::desc::{DescError, FourCharCode, Result};

/// Bounded cursor over an immutable byte slice.
///
/// Offsets reported in errors are absolute within the original stream.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
	base: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self::with_base(bytes, 0)
	}

	/// Create a cursor over a sub-slice that starts at `base` in the stream.
	pub fn with_base(bytes: &'a [u8], base: usize) -> Self {
		Self { bytes, pos: 0, base }
	}

	/// Absolute byte offset.
	pub fn pos(&self) -> usize {
		self.base + self.pos
	}

	/// Remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(DescError::UnexpectedEof {
				at: self.pos(),
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read a four-byte type code.
	pub fn read_code4(&mut self) -> Result<FourCharCode> {
		let raw = self.read_exact(4)?;
		let mut out = [0_u8; 4];
		out.copy_from_slice(raw);
		Ok(FourCharCode::from_bytes(out))
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a big-endian `u32`.
	pub fn read_u32_be(&mut self) -> Result<u32> {
		let raw = self.read_exact(4)?;
		let mut buf = [0_u8; 4];
		buf.copy_from_slice(raw);
		Ok(u32::from_be_bytes(buf))
	}
}

#[cfg(test)]
mod tests {
	use super::Cursor;
	use crate::desc::{DescError, FourCharCode};

	#[test]
	fn reads_codes_and_lengths() {
		let bytes = b"list\x00\x00\x00\x02\x07";
		let mut cursor = Cursor::new(bytes);
		assert_eq!(cursor.read_code4().expect("code"), FourCharCode::LIST);
		assert_eq!(cursor.read_u32_be().expect("len"), 2);
		assert_eq!(cursor.read_u8().expect("byte"), 7);
		assert_eq!(cursor.remaining(), 0);
	}

	#[test]
	fn eof_reports_absolute_offset() {
		let mut cursor = Cursor::with_base(b"ab", 100);
		let _ = cursor.read_exact(1).expect("first byte");
		let err = cursor.read_u32_be().expect_err("short read");
		assert!(matches!(err, DescError::UnexpectedEof { at: 101, need: 4, rem: 1 }));
	}
}
