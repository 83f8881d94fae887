//! Strict UTF-8 validation.
//!
//! This module walks a byte buffer against the strict UTF-8 grammar and, on
//! the first violation, reports the byte offset of the lead byte that started
//! the failing sequence together with a structured reason. This is
//! deliberately not the lenient/replacing decode many standard libraries
//! default to: the offset anchors the diagnostic snippet, so the rejection
//! point must be exact.
//!
//! ## Grammar overview
//!
//! The expected sequence length is derived from the lead byte's high bits:
//!
//! - `0xxxxxxx` — 1-byte sequence (ASCII)
//! - `110xxxxx` — 2-byte sequence, codepoint must be >= U+0080
//! - `1110xxxx` — 3-byte sequence, codepoint must be >= U+0800 and not a
//!   surrogate (U+D800..=U+DFFF)
//! - `11110xxx` — 4-byte sequence, codepoint must be >= U+10000 and
//!   <= U+10FFFF
//!
//! Every continuation byte must match `10xxxxxx`.

use std::fmt;

/// Why a byte sequence failed strict UTF-8 validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// A byte outside the `10xxxxxx` pattern appeared where a continuation
    /// byte was required
    UnexpectedContinuationByte,
    /// A byte that cannot start any sequence appeared in lead position
    /// (a stray `10xxxxxx` continuation byte, or `11111xxx`)
    InvalidLeadByte,
    /// The sequence encodes a codepoint using more bytes than necessary
    OverlongEncoding,
    /// The buffer ended in the middle of a multi-byte sequence
    TruncatedSequence,
    /// The sequence encodes a UTF-16 surrogate (U+D800..=U+DFFF)
    SurrogateCodepoint,
    /// The sequence encodes a codepoint above U+10FFFF
    CodepointOutOfRange,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnexpectedContinuationByte => "expected continuation byte (10xxxxxx) not found",
            Self::InvalidLeadByte => "invalid lead byte",
            Self::OverlongEncoding => "overlong encoding",
            Self::TruncatedSequence => "buffer truncated mid-sequence",
            Self::SurrogateCodepoint => "encoded UTF-16 surrogate codepoint",
            Self::CodepointOutOfRange => "codepoint above U+10FFFF",
        };
        f.write_str(text)
    }
}

/// Outcome of validating a buffer against the strict UTF-8 grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    /// The whole buffer is well-formed UTF-8
    Valid,
    /// Validation stopped at the first malformed sequence
    Invalid {
        /// Offset of the lead byte of the failing sequence;
        /// always `< buffer.len()`
        offset: usize,
        /// Why the sequence was rejected
        reason: InvalidReason,
    },
}

impl ValidationResult {
    /// Returns true for [`ValidationResult::Valid`]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the failure offset, if any
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Valid => None,
            Self::Invalid { offset, .. } => Some(*offset),
        }
    }
}

/// Validate a buffer as strict UTF-8.
///
/// Scans the entire buffer (validity is a whole-buffer property) and stops at
/// the first violation. An empty buffer is vacuously valid.
pub fn validate(data: &[u8]) -> ValidationResult {
    let mut pos = 0;

    while pos < data.len() {
        let lead = data[pos];

        // ASCII fast path
        if lead < 0x80 {
            pos += 1;
            continue;
        }

        // Continuation byte in lead position, or 11111xxx
        if lead < 0xC0 || lead >= 0xF8 {
            return ValidationResult::Invalid {
                offset: pos,
                reason: InvalidReason::InvalidLeadByte,
            };
        }

        let seq_len = if lead < 0xE0 {
            2
        } else if lead < 0xF0 {
            3
        } else {
            4
        };

        if pos + seq_len > data.len() {
            // Still require the bytes we do have to look like continuations,
            // so e.g. `E2 41` at end of buffer reports the real mismatch
            // rather than truncation.
            for &byte in &data[pos + 1..] {
                if byte & 0xC0 != 0x80 {
                    return ValidationResult::Invalid {
                        offset: pos,
                        reason: InvalidReason::UnexpectedContinuationByte,
                    };
                }
            }
            return ValidationResult::Invalid {
                offset: pos,
                reason: InvalidReason::TruncatedSequence,
            };
        }

        let mut codepoint = u32::from(lead & (0x7F >> seq_len));
        for &byte in &data[pos + 1..pos + seq_len] {
            if byte & 0xC0 != 0x80 {
                return ValidationResult::Invalid {
                    offset: pos,
                    reason: InvalidReason::UnexpectedContinuationByte,
                };
            }
            codepoint = (codepoint << 6) | u32::from(byte & 0x3F);
        }

        let min_codepoint = match seq_len {
            2 => 0x80,
            3 => 0x800,
            _ => 0x10000,
        };

        if codepoint < min_codepoint {
            return ValidationResult::Invalid {
                offset: pos,
                reason: InvalidReason::OverlongEncoding,
            };
        }
        if (0xD800..=0xDFFF).contains(&codepoint) {
            return ValidationResult::Invalid {
                offset: pos,
                reason: InvalidReason::SurrogateCodepoint,
            };
        }
        if codepoint > 0x10FFFF {
            return ValidationResult::Invalid {
                offset: pos,
                reason: InvalidReason::CodepointOutOfRange,
            };
        }

        pos += seq_len;
    }

    ValidationResult::Valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ascii_is_valid() {
        assert_eq!(validate(b"hello world"), ValidationResult::Valid);
    }

    #[test]
    fn test_empty_buffer_is_valid() {
        assert_eq!(validate(b""), ValidationResult::Valid);
    }

    #[test]
    fn test_multibyte_text_is_valid() {
        let text = "caf\u{e9} \u{4f60}\u{597d} \u{1f980}";
        assert_eq!(validate(text.as_bytes()), ValidationResult::Valid);
    }

    #[test]
    fn test_latin1_byte_is_truncated() {
        // Latin-1 "café": 0xE9 looks like a 3-byte lead but the buffer ends
        assert_eq!(
            validate(b"caf\xe9"),
            ValidationResult::Invalid {
                offset: 3,
                reason: InvalidReason::TruncatedSequence,
            }
        );
    }

    #[test]
    fn test_utf16_bom_rejected_at_first_byte() {
        assert_eq!(
            validate(b"\xff\xfeh\x00i\x00"),
            ValidationResult::Invalid {
                offset: 0,
                reason: InvalidReason::InvalidLeadByte,
            }
        );
    }

    #[test]
    fn test_stray_continuation_byte() {
        assert_eq!(
            validate(b"ok\x80"),
            ValidationResult::Invalid {
                offset: 2,
                reason: InvalidReason::InvalidLeadByte,
            }
        );
    }

    #[test]
    fn test_missing_continuation_byte() {
        // E2 starts a 3-byte sequence but 0x28 is not a continuation
        assert_eq!(
            validate(b"\xe2\x28\xa1"),
            ValidationResult::Invalid {
                offset: 0,
                reason: InvalidReason::UnexpectedContinuationByte,
            }
        );
    }

    #[test]
    fn test_truncated_with_bad_tail_reports_continuation() {
        assert_eq!(
            validate(b"\xe2\x41"),
            ValidationResult::Invalid {
                offset: 0,
                reason: InvalidReason::UnexpectedContinuationByte,
            }
        );
    }

    #[test]
    fn test_overlong_two_byte() {
        // C0 80 is an overlong encoding of NUL
        assert_eq!(
            validate(b"\xc0\x80"),
            ValidationResult::Invalid {
                offset: 0,
                reason: InvalidReason::OverlongEncoding,
            }
        );
    }

    #[test]
    fn test_overlong_three_byte() {
        // E0 80 80 encodes U+0000 in three bytes
        assert_eq!(
            validate(b"\xe0\x80\x80"),
            ValidationResult::Invalid {
                offset: 0,
                reason: InvalidReason::OverlongEncoding,
            }
        );
    }

    #[test]
    fn test_surrogate_codepoint() {
        // ED A0 80 encodes U+D800
        assert_eq!(
            validate(b"\xed\xa0\x80"),
            ValidationResult::Invalid {
                offset: 0,
                reason: InvalidReason::SurrogateCodepoint,
            }
        );
    }

    #[test]
    fn test_codepoint_out_of_range() {
        // F4 90 80 80 encodes U+110000
        assert_eq!(
            validate(b"\xf4\x90\x80\x80"),
            ValidationResult::Invalid {
                offset: 0,
                reason: InvalidReason::CodepointOutOfRange,
            }
        );
    }

    #[test]
    fn test_plane_boundary_codepoints() {
        // U+10000 (first 4-byte codepoint) and U+10FFFF (last valid one)
        assert_eq!(validate(b"\xf0\x90\x80\x80"), ValidationResult::Valid);
        assert_eq!(validate(b"\xf4\x8f\xbf\xbf"), ValidationResult::Valid);
    }

    #[test]
    fn test_agrees_with_std_decoder() {
        let cases: &[&[u8]] = &[
            b"",
            b"hello world",
            b"caf\xe9",
            b"\xff\xfeh\x00i\x00",
            b"\xe2\x82\xac euro",
            b"\xe2\x82",
            b"\xc0\xaf",
            b"\xed\xbf\xbf",
            b"\xf4\x90\x80\x80",
            b"\x80\x80\x80",
            b"ok\xf0\x9f\xa6\x80!",
        ];

        for &case in cases {
            match std::str::from_utf8(case) {
                Ok(_) => assert_eq!(validate(case), ValidationResult::Valid, "case {case:x?}"),
                Err(e) => {
                    let result = validate(case);
                    assert_eq!(
                        result.offset(),
                        Some(e.valid_up_to()),
                        "rejection point mismatch for {case:x?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_offset_always_in_bounds() {
        let cases: &[&[u8]] = &[b"\xff", b"a\xc2", b"ab\xe0\x80", b"\x90\x90"];
        for &case in cases {
            if let ValidationResult::Invalid { offset, .. } = validate(case) {
                assert!(offset < case.len());
            } else {
                panic!("expected invalid result for {case:x?}");
            }
        }
    }

    #[test]
    fn test_validation_is_pure() {
        let data = b"caf\xe9";
        assert_eq!(validate(data), validate(data));
    }
}
