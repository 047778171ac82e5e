use std::fmt;

use crate::{decode_big_endian_uint, IdxError};

pub const UNKNOWN_ELEMENT: &str = "unknown";

/// Scalar type of every element stored after the header.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    UnsignedByte, // 0x08
    SignedByte,   // 0x09
    Short,        // 0x0b
    Integer,      // 0x0c
    Float,        // 0x0d
    Double,       // 0x0e
}
impl ElementType {
    pub const ALL: [ElementType; 6] = [
        ElementType::UnsignedByte,
        ElementType::SignedByte,
        ElementType::Short,
        ElementType::Integer,
        ElementType::Float,
        ElementType::Double,
    ];

    pub fn code(&self) -> u8 {
        match self {
            Self::UnsignedByte => 0x08,
            Self::SignedByte => 0x09,
            Self::Short => 0x0b,
            Self::Integer => 0x0c,
            Self::Float => 0x0d,
            Self::Double => 0x0e,
        }
    }

    /// Width of one element on disk, in bytes.
    pub fn width(&self) -> usize {
        match self {
            Self::UnsignedByte | Self::SignedByte => 1,
            Self::Short => 2,
            Self::Integer | Self::Float => 4,
            Self::Double => 8,
        }
    }

    /// Decodes one big-endian element of [`width`](Self::width) bytes.
    ///
    /// Byte types are scaled by 1/255 so that pixel intensities land in
    /// `[0, 1]` (`[-128/255, 127/255]` for signed bytes). Wider types keep
    /// their numeric value.
    pub fn decode(&self, bytes: &[u8]) -> f64 {
        let raw = decode_big_endian_uint(bytes);
        match self {
            Self::UnsignedByte => f64::from(raw as u8) / 255.0,
            Self::SignedByte => f64::from(raw as u8 as i8) / 255.0,
            Self::Short => f64::from(raw as u16 as i16),
            Self::Integer => f64::from(raw as u32 as i32),
            Self::Float => f64::from(f32::from_bits(raw as u32)),
            Self::Double => f64::from_bits(raw),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::UnsignedByte => "unsigned byte",
            Self::SignedByte => "signed byte",
            Self::Short => "short",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}
impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl TryFrom<u8> for ElementType {
    type Error = IdxError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        lookup_element_type(code).ok_or(IdxError::UnknownElementType(code))
    }
}

/// Maps an IDX type code to its element type, `None` for unmapped codes.
pub fn lookup_element_type(code: u8) -> Option<ElementType> {
    match code {
        0x08 => Some(ElementType::UnsignedByte),
        0x09 => Some(ElementType::SignedByte),
        0x0b => Some(ElementType::Short),
        0x0c => Some(ElementType::Integer),
        0x0d => Some(ElementType::Float),
        0x0e => Some(ElementType::Double),
        _ => None,
    }
}

/// Display name for a type code, `"unknown"` when the code is unmapped.
pub fn element_type_name(code: u8) -> &'static str {
    lookup_element_type(code)
        .map(|ty| ty.name())
        .unwrap_or(UNKNOWN_ELEMENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_defined_codes() {
        let expected = [
            (0x08, "unsigned byte"),
            (0x09, "signed byte"),
            (0x0b, "short"),
            (0x0c, "integer"),
            (0x0d, "float"),
            (0x0e, "double"),
        ];
        for (code, name) in expected {
            let ty = lookup_element_type(code).unwrap();
            assert_eq!(ty.name(), name);
            assert_eq!(ty.code(), code);
            assert_eq!(element_type_name(code), name);
        }
    }

    #[test]
    fn test_lookup_every_other_code_is_unknown() {
        let defined: Vec<u8> = ElementType::ALL.iter().map(|ty| ty.code()).collect();
        for code in 0..=u8::MAX {
            if defined.contains(&code) {
                continue;
            }
            assert!(lookup_element_type(code).is_none());
            assert_eq!(element_type_name(code), "unknown");
        }
    }

    #[test]
    fn test_try_from_unknown_code() {
        assert_eq!(ElementType::try_from(0x0d).unwrap(), ElementType::Float);
        assert!(matches!(
            ElementType::try_from(0x0a),
            Err(IdxError::UnknownElementType(0x0a))
        ));
    }

    #[test]
    fn test_widths() {
        let widths: Vec<usize> = ElementType::ALL.iter().map(|ty| ty.width()).collect();
        assert_eq!(widths, vec![1, 1, 2, 4, 4, 8]);
    }

    #[test]
    fn test_decode_bytes_are_normalized() {
        assert_eq!(ElementType::UnsignedByte.decode(&[0]), 0.0);
        assert_eq!(ElementType::UnsignedByte.decode(&[255]), 1.0);
        assert_eq!(ElementType::UnsignedByte.decode(&[51]), 0.2);
        assert_eq!(ElementType::SignedByte.decode(&[0xFF]), -1.0 / 255.0);
        assert_eq!(ElementType::SignedByte.decode(&[0x7F]), 127.0 / 255.0);
    }

    #[test]
    fn test_decode_wide_types() {
        assert_eq!(ElementType::Short.decode(&(-1234i16).to_be_bytes()), -1234.0);
        assert_eq!(ElementType::Short.decode(&[0x01, 0x00]), 256.0);
        assert_eq!(
            ElementType::Integer.decode(&(-70_000i32).to_be_bytes()),
            -70_000.0
        );
        assert_eq!(ElementType::Float.decode(&1.5f32.to_be_bytes()), 1.5);
        assert_eq!(ElementType::Float.decode(&(-0.25f32).to_be_bytes()), -0.25);
        assert_eq!(
            ElementType::Double.decode(&std::f64::consts::PI.to_be_bytes()),
            std::f64::consts::PI
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ElementType::UnsignedByte.to_string(), "unsigned byte");
    }
}
