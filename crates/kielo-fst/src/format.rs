// VFST file header

use crate::FstError;

pub(crate) const COOKIE1: u32 = 0x0001_3A6E;
pub(crate) const COOKIE2: u32 = 0x0003_51FA;

/// Size of the header in bytes. The symbol table starts right after it.
pub const HEADER_SIZE: usize = 16;

/// Which transition layout follows the symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// 8-byte cells, 16-bit symbols, no weights.
    Unweighted,
    /// 16-byte cells, 32-bit symbols, 16-bit weights.
    Weighted,
}

impl Layout {
    pub fn cell_size(self) -> usize {
        match self {
            Layout::Unweighted => 8,
            Layout::Weighted => 16,
        }
    }
}

/// Validate the 16-byte header and report the layout.
///
/// Byte 8 is the weighted flag; bytes 9..16 are reserved and ignored.
/// Files written on big-endian machines are rejected as `InvalidMagic`.
pub fn parse_header(data: &[u8]) -> Result<Layout, FstError> {
    let header = data.get(..HEADER_SIZE).ok_or(FstError::TooShort {
        expected: HEADER_SIZE,
        actual: data.len(),
    })?;

    let word = |i: usize| u32::from_le_bytes([header[i], header[i + 1], header[i + 2], header[i + 3]]);
    if word(0) != COOKIE1 || word(4) != COOKIE2 {
        return Err(FstError::InvalidMagic);
    }

    Ok(if header[8] == 1 {
        Layout::Weighted
    } else {
        Layout::Unweighted
    })
}

/// Build a header for the given layout.
#[cfg(any(test, feature = "builder"))]
pub(crate) fn header_bytes(layout: Layout) -> [u8; HEADER_SIZE] {
    let mut buf = [0u8; HEADER_SIZE];
    buf[..4].copy_from_slice(&COOKIE1.to_le_bytes());
    buf[4..8].copy_from_slice(&COOKIE2.to_le_bytes());
    buf[8] = u8::from(layout == Layout::Weighted);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_both_layouts() {
        assert_eq!(
            parse_header(&header_bytes(Layout::Unweighted)).unwrap(),
            Layout::Unweighted
        );
        assert_eq!(
            parse_header(&header_bytes(Layout::Weighted)).unwrap(),
            Layout::Weighted
        );
    }

    #[test]
    fn short_input_is_rejected() {
        let err = parse_header(&[0x6E, 0x3A]).unwrap_err();
        assert!(matches!(
            err,
            FstError::TooShort {
                expected: 16,
                actual: 2
            }
        ));
    }

    #[test]
    fn wrong_cookie_is_rejected() {
        let mut data = header_bytes(Layout::Unweighted);
        data[5] ^= 0xFF;
        assert!(matches!(parse_header(&data), Err(FstError::InvalidMagic)));
    }

    #[test]
    fn byte_swapped_file_is_rejected() {
        let mut data = [0u8; HEADER_SIZE];
        data[..4].copy_from_slice(&COOKIE1.to_be_bytes());
        data[4..8].copy_from_slice(&COOKIE2.to_be_bytes());
        assert!(matches!(parse_header(&data), Err(FstError::InvalidMagic)));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut data = header_bytes(Layout::Weighted).to_vec();
        data.extend_from_slice(&[0xAA; 64]);
        assert_eq!(parse_header(&data).unwrap(), Layout::Weighted);
    }
}
