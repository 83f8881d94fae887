//! Byte Order Mark detection.
//!
//! A BOM is a fixed byte prefix that pins down encoding and endianness, so
//! matching one is deterministic and beats any statistical heuristic. The
//! UTF-32 marks are checked before UTF-16 because `FF FE 00 00` starts with
//! the UTF-16LE mark.

use std::fmt;

/// Byte Order Mark found at the start of a buffer, derived purely from the
/// leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomKind {
    /// No recognized BOM prefix
    None,
    /// `EF BB BF`
    Utf8,
    /// `FF FE`
    Utf16Le,
    /// `FE FF`
    Utf16Be,
    /// `FF FE 00 00`
    Utf32Le,
    /// `00 00 FE FF`
    Utf32Be,
}

impl BomKind {
    /// Inspect the leading bytes of a buffer for a known BOM prefix
    pub fn detect(data: &[u8]) -> Self {
        // Longest prefixes first: FF FE 00 00 must win over FF FE
        if data.starts_with(&[0xFF, 0xFE, 0x00, 0x00]) {
            Self::Utf32Le
        } else if data.starts_with(&[0x00, 0x00, 0xFE, 0xFF]) {
            Self::Utf32Be
        } else if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
            Self::Utf8
        } else if data.starts_with(&[0xFF, 0xFE]) {
            Self::Utf16Le
        } else if data.starts_with(&[0xFE, 0xFF]) {
            Self::Utf16Be
        } else {
            Self::None
        }
    }

    /// Length of the mark in bytes (0 for [`BomKind::None`])
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Utf16Le | Self::Utf16Be => 2,
            Self::Utf8 => 3,
            Self::Utf32Le | Self::Utf32Be => 4,
        }
    }

    /// Returns true when no BOM was found
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for BomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::None => "none",
            Self::Utf8 => "UTF-8 BOM",
            Self::Utf16Le => "UTF-16 LE BOM",
            Self::Utf16Be => "UTF-16 BE BOM",
            Self::Utf32Le => "UTF-32 LE BOM",
            Self::Utf32Be => "UTF-32 BE BOM",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_each_mark() {
        assert_eq!(BomKind::detect(b"\xef\xbb\xbfhello"), BomKind::Utf8);
        assert_eq!(BomKind::detect(b"\xff\xfeh\x00"), BomKind::Utf16Le);
        assert_eq!(BomKind::detect(b"\xfe\xff\x00h"), BomKind::Utf16Be);
        assert_eq!(BomKind::detect(b"\xff\xfe\x00\x00h"), BomKind::Utf32Le);
        assert_eq!(BomKind::detect(b"\x00\x00\xfe\xffh"), BomKind::Utf32Be);
    }

    #[test]
    fn test_utf32le_wins_over_utf16le_prefix() {
        // FF FE 00 00 is both a UTF-16LE mark plus a NUL pair and the
        // UTF-32LE mark; the longer match must win
        assert_eq!(BomKind::detect(b"\xff\xfe\x00\x00"), BomKind::Utf32Le);
        assert_eq!(BomKind::detect(b"\xff\xfe\x00\x01"), BomKind::Utf16Le);
    }

    #[test]
    fn test_no_mark() {
        assert_eq!(BomKind::detect(b"plain text"), BomKind::None);
        assert_eq!(BomKind::detect(b""), BomKind::None);
        assert_eq!(BomKind::detect(b"\xff"), BomKind::None);
    }
}
