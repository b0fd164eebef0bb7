//! Flattened descriptor streams.
//!
//! A stream is `AEFL`, a version byte, and one node. Each node is
//! `tag[4] kind:u8 len:u32be body[len]`; container bodies start with a
//! big-endian item count. Message bodies are two keyed blocks, attributes
//! first.

use std::fs;
use std::path::Path;

use crate::desc::bytes::Cursor;
use crate::desc::{DescError, DescTree, FourCharCode, Result, TreeBody};

/// Leading magic of a flattened descriptor stream.
pub const FLAT_MAGIC: [u8; 4] = *b"AEFL";
/// Stream version written by [`encode_flat`].
pub const FLAT_VERSION: u8 = 1;

const MAX_DEPTH: u32 = 64;
const NODE_HEADER_LEN: usize = 9;

const KIND_DATA: u8 = 0;
const KIND_LIST: u8 = 1;
const KIND_RECORD: u8 = 2;
const KIND_MESSAGE: u8 = 3;

/// Encode `tree` as a complete flat stream.
pub fn encode_flat(tree: &DescTree) -> Result<Vec<u8>> {
	let mut out = Vec::with_capacity(64);
	out.extend_from_slice(&FLAT_MAGIC);
	out.push(FLAT_VERSION);
	write_node(&mut out, tree)?;
	Ok(out)
}

/// Decode a complete flat stream.
pub fn decode_flat(bytes: &[u8]) -> Result<DescTree> {
	if !bytes.starts_with(&FLAT_MAGIC) {
		return Err(DescError::UnknownMagic { magic: first4(bytes) });
	}

	let mut cursor = Cursor::new(bytes);
	let _ = cursor.read_exact(FLAT_MAGIC.len())?;
	let version = cursor.read_u8()?;
	if version != FLAT_VERSION {
		return Err(DescError::UnsupportedFlatVersion { version });
	}

	let root = read_node(&mut cursor, 0)?;
	if cursor.remaining() != 0 {
		return Err(DescError::FlatTrailingBytes {
			tag: root.descriptor_type,
			at: cursor.pos(),
			rem: cursor.remaining(),
		});
	}
	Ok(root)
}

/// Read and decode a flat stream from disk.
pub fn open_flat(path: impl AsRef<Path>) -> Result<DescTree> {
	let path = path.as_ref();
	let bytes = fs::read(path)?;
	let tree = decode_flat(&bytes)?;
	tracing::debug!(path = %path.display(), bytes = bytes.len(), root = %tree.descriptor_type, "opened flat stream");
	Ok(tree)
}

fn first4(bytes: &[u8]) -> [u8; 4] {
	let mut magic = [0_u8; 4];
	let take = bytes.len().min(4);
	magic[..take].copy_from_slice(&bytes[..take]);
	magic
}

fn write_node(out: &mut Vec<u8>, tree: &DescTree) -> Result<()> {
	out.extend_from_slice(&tree.descriptor_type.to_bytes());
	out.push(body_kind(&tree.body));
	let len_at = out.len();
	out.extend_from_slice(&[0_u8; 4]);

	match &tree.body {
		TreeBody::Data(bytes) => out.extend_from_slice(bytes),
		TreeBody::List(items) => {
			write_u32(out, items.len())?;
			for item in items {
				write_node(out, item)?;
			}
		}
		TreeBody::Record(fields) => write_fields(out, fields)?,
		TreeBody::Message { attributes, parameters } => {
			write_fields(out, attributes)?;
			write_fields(out, parameters)?;
		}
	}

	let len = out.len() - len_at - 4;
	let len = u32::try_from(len).map_err(|_| DescError::FlatBodyTooLarge { len })?;
	out[len_at..len_at + 4].copy_from_slice(&len.to_be_bytes());
	Ok(())
}

fn write_fields(out: &mut Vec<u8>, fields: &[(FourCharCode, DescTree)]) -> Result<()> {
	write_u32(out, fields.len())?;
	for (key, item) in fields {
		out.extend_from_slice(&key.to_bytes());
		write_node(out, item)?;
	}
	Ok(())
}

fn write_u32(out: &mut Vec<u8>, value: usize) -> Result<()> {
	let value = u32::try_from(value).map_err(|_| DescError::FlatBodyTooLarge { len: value })?;
	out.extend_from_slice(&value.to_be_bytes());
	Ok(())
}

fn body_kind(body: &TreeBody) -> u8 {
	match body {
		TreeBody::Data(_) => KIND_DATA,
		TreeBody::List(_) => KIND_LIST,
		TreeBody::Record(_) => KIND_RECORD,
		TreeBody::Message { .. } => KIND_MESSAGE,
	}
}

fn read_node(cursor: &mut Cursor<'_>, depth: u32) -> Result<DescTree> {
	if depth > MAX_DEPTH {
		return Err(DescError::FlatDepthExceeded { max_depth: MAX_DEPTH });
	}

	let tag = cursor.read_code4()?;
	let kind = cursor.read_u8()?;
	let len = cursor.read_u32_be()? as usize;
	let base = cursor.pos();
	let body = cursor.read_exact(len)?;
	if kind == KIND_DATA {
		return Ok(DescTree::data(tag, body));
	}

	let mut inner = Cursor::with_base(body, base);
	let body = match kind {
		KIND_LIST => {
			let count = inner.read_u32_be()? as usize;
			let mut items = Vec::with_capacity(count.min(inner.remaining() / NODE_HEADER_LEN));
			for _ in 0..count {
				items.push(read_node(&mut inner, depth + 1)?);
			}
			TreeBody::List(items)
		}
		KIND_RECORD => TreeBody::Record(read_fields(&mut inner, depth)?),
		KIND_MESSAGE => {
			let attributes = read_fields(&mut inner, depth)?;
			let parameters = read_fields(&mut inner, depth)?;
			TreeBody::Message { attributes, parameters }
		}
		kind => return Err(DescError::UnknownFlatBodyKind { tag, kind }),
	};

	if inner.remaining() != 0 {
		return Err(DescError::FlatTrailingBytes {
			tag,
			at: inner.pos(),
			rem: inner.remaining(),
		});
	}
	Ok(DescTree { descriptor_type: tag, body })
}

fn read_fields(cursor: &mut Cursor<'_>, depth: u32) -> Result<Vec<(FourCharCode, DescTree)>> {
	let count = cursor.read_u32_be()? as usize;
	let mut fields = Vec::with_capacity(count.min(cursor.remaining() / (NODE_HEADER_LEN + 4)));
	for _ in 0..count {
		let key = cursor.read_code4()?;
		fields.push((key, read_node(cursor, depth + 1)?));
	}
	Ok(fields)
}
