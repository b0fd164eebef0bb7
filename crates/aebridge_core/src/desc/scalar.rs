use crate::desc::FourCharCode;

/// Scalar payload decoded from one of the common data encodings.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	/// Any signed or unsigned integer encoding.
	Int(i64),
	/// 32- or 64-bit float encoding.
	Float(f64),
	/// Boolean or data-less true/false.
	Bool(bool),
	/// Text in any supported encoding.
	Text(String),
	/// Type, enum, keyword, or property code.
	Code(FourCharCode),
}

impl Scalar {
	/// Decode `bytes` stored under `tag`. Returns `None` for encodings this
	/// module does not understand or payloads of the wrong size.
	pub fn decode(tag: FourCharCode, bytes: &[u8]) -> Option<Self> {
		match tag {
			FourCharCode::SINT16 => Some(Self::Int(i64::from(i16::from_ne_bytes(exact(bytes)?)))),
			FourCharCode::SINT32 => Some(Self::Int(i64::from(i32::from_ne_bytes(exact(bytes)?)))),
			FourCharCode::SINT64 => Some(Self::Int(i64::from_ne_bytes(exact(bytes)?))),
			FourCharCode::UINT32 => Some(Self::Int(i64::from(u32::from_ne_bytes(exact(bytes)?)))),
			FourCharCode::IEEE32 => Some(Self::Float(f64::from(f32::from_ne_bytes(exact(bytes)?)))),
			FourCharCode::IEEE64 => Some(Self::Float(f64::from_ne_bytes(exact(bytes)?))),
			FourCharCode::BOOLEAN => match bytes {
				[flag] => Some(Self::Bool(*flag != 0)),
				_ => None,
			},
			FourCharCode::TRUE => Some(Self::Bool(true)),
			FourCharCode::FALSE => Some(Self::Bool(false)),
			FourCharCode::TEXT | FourCharCode::UTF8 => Some(Self::Text(String::from_utf8_lossy(bytes).into_owned())),
			FourCharCode::UTF16 => {
				if bytes.len() % 2 != 0 {
					return None;
				}
				let units: Vec<u16> = bytes.chunks_exact(2).map(|pair| u16::from_ne_bytes([pair[0], pair[1]])).collect();
				Some(Self::Text(String::from_utf16_lossy(&units)))
			}
			FourCharCode::TYPE | FourCharCode::ENUMERATED | FourCharCode::KEYWORD | FourCharCode::PROPERTY => {
				Some(Self::Code(FourCharCode(u32::from_ne_bytes(exact(bytes)?))))
			}
			_ => None,
		}
	}

	/// Encode into the payload representation of `to`, if the value fits.
	pub fn encode(&self, to: FourCharCode) -> Option<Vec<u8>> {
		match to {
			FourCharCode::SINT16 => Some(i16::try_from(self.as_int()?).ok()?.to_ne_bytes().to_vec()),
			FourCharCode::SINT32 => Some(i32::try_from(self.as_int()?).ok()?.to_ne_bytes().to_vec()),
			FourCharCode::SINT64 => Some(self.as_int()?.to_ne_bytes().to_vec()),
			FourCharCode::UINT32 => Some(u32::try_from(self.as_int()?).ok()?.to_ne_bytes().to_vec()),
			FourCharCode::IEEE32 => Some((self.as_float()? as f32).to_ne_bytes().to_vec()),
			FourCharCode::IEEE64 => Some(self.as_float()?.to_ne_bytes().to_vec()),
			FourCharCode::BOOLEAN => Some(vec![u8::from(self.as_bool()?)]),
			FourCharCode::TEXT | FourCharCode::UTF8 => Some(self.as_text()?.into_bytes()),
			FourCharCode::UTF16 => Some(self.as_text()?.encode_utf16().flat_map(u16::to_ne_bytes).collect()),
			FourCharCode::TYPE | FourCharCode::ENUMERATED | FourCharCode::KEYWORD | FourCharCode::PROPERTY => {
				Some(self.as_code()?.0.to_ne_bytes().to_vec())
			}
			_ => None,
		}
	}

	fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(value) => Some(*value),
			Self::Float(value) if value.fract() == 0.0 && value.abs() < 9.2e18 => Some(*value as i64),
			Self::Bool(flag) => Some(i64::from(*flag)),
			Self::Text(text) => {
				let text = text.trim();
				text.parse::<i64>().ok().or_else(|| Self::Float(text.parse().ok()?).as_int())
			}
			Self::Float(_) | Self::Code(_) => None,
		}
	}

	fn as_float(&self) -> Option<f64> {
		match self {
			Self::Int(value) => Some(*value as f64),
			Self::Float(value) => Some(*value),
			Self::Bool(flag) => Some(f64::from(u8::from(*flag))),
			Self::Text(text) => text.trim().parse().ok(),
			Self::Code(_) => None,
		}
	}

	fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(flag) => Some(*flag),
			Self::Int(0) => Some(false),
			Self::Int(1) => Some(true),
			Self::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
				"true" | "yes" => Some(true),
				"false" | "no" => Some(false),
				_ => None,
			},
			Self::Code(code) if *code == FourCharCode::TRUE => Some(true),
			Self::Code(code) if *code == FourCharCode::FALSE => Some(false),
			_ => None,
		}
	}

	fn as_text(&self) -> Option<String> {
		match self {
			Self::Int(value) => Some(value.to_string()),
			Self::Float(value) => Some(value.to_string()),
			Self::Bool(flag) => Some(flag.to_string()),
			Self::Text(text) => Some(text.clone()),
			Self::Code(code) => Some(code.to_string()),
		}
	}

	fn as_code(&self) -> Option<FourCharCode> {
		match self {
			Self::Code(code) => Some(*code),
			Self::Text(text) => FourCharCode::parse_nonzero(text).ok(),
			_ => None,
		}
	}
}

fn exact<const N: usize>(bytes: &[u8]) -> Option<[u8; N]> {
	bytes.try_into().ok()
}

#[cfg(test)]
mod tests {
	use super::Scalar;
	use crate::desc::FourCharCode;

	#[test]
	fn decodes_native_integers_and_floats() {
		assert_eq!(Scalar::decode(FourCharCode::SINT32, &(-7_i32).to_ne_bytes()), Some(Scalar::Int(-7)));
		assert_eq!(Scalar::decode(FourCharCode::SINT16, &300_i16.to_ne_bytes()), Some(Scalar::Int(300)));
		assert_eq!(Scalar::decode(FourCharCode::IEEE64, &2.5_f64.to_ne_bytes()), Some(Scalar::Float(2.5)));
		assert_eq!(Scalar::decode(FourCharCode::SINT32, &[1, 2]), None);
	}

	#[test]
	fn decodes_text_and_codes() {
		let utf16: Vec<u8> = "héllo".encode_utf16().flat_map(u16::to_ne_bytes).collect();
		assert_eq!(Scalar::decode(FourCharCode::UTF16, &utf16), Some(Scalar::Text("héllo".into())));
		assert_eq!(
			Scalar::decode(FourCharCode::TYPE, &FourCharCode::TEXT.0.to_ne_bytes()),
			Some(Scalar::Code(FourCharCode::TEXT))
		);
		assert_eq!(Scalar::decode(FourCharCode::FALSE, &[]), Some(Scalar::Bool(false)));
	}

	#[test]
	fn encodes_across_encodings() {
		assert_eq!(Scalar::Int(42).encode(FourCharCode::UTF8), Some(b"42".to_vec()));
		assert_eq!(Scalar::Text(" 17 ".into()).encode(FourCharCode::SINT32), Some(17_i32.to_ne_bytes().to_vec()));
		assert_eq!(Scalar::Text("3.0".into()).encode(FourCharCode::SINT16), Some(3_i16.to_ne_bytes().to_vec()));
		assert_eq!(Scalar::Bool(true).encode(FourCharCode::TEXT), Some(b"true".to_vec()));
		assert_eq!(Scalar::Text("docu".into()).encode(FourCharCode::TYPE), Some(FourCharCode::from_bytes(*b"docu").0.to_ne_bytes().to_vec()));
	}

	#[test]
	fn refuses_lossy_encodings() {
		assert_eq!(Scalar::Int(70_000).encode(FourCharCode::SINT16), None);
		assert_eq!(Scalar::Float(1.5).encode(FourCharCode::SINT32), None);
		assert_eq!(Scalar::Float(1.5).encode(FourCharCode::SINT64), None);
		assert_eq!(Scalar::Float(1.0e19).encode(FourCharCode::SINT64), None);
		assert_eq!(Scalar::Float(-4.0).encode(FourCharCode::SINT64), Some((-4_i64).to_ne_bytes().to_vec()));
		assert_eq!(Scalar::Text("abc".into()).encode(FourCharCode::SINT32), None);
		assert_eq!(Scalar::Int(2).encode(FourCharCode::BOOLEAN), None);
		assert_eq!(Scalar::Int(1).encode(FourCharCode::TYPE), None);
		assert_eq!(Scalar::Int(1).encode(FourCharCode::LIST), None);
	}
}
