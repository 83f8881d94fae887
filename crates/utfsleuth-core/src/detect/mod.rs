//! Statistical encoding detection for buffers that are not valid UTF-8.
//!
//! ## Algorithm overview
//!
//! 1. Check the leading bytes for a BOM — a match is deterministic and
//!    outranks every statistical signal
//! 2. Otherwise run byte-distribution heuristics over a bounded prefix of
//!    the buffer:
//!    - printable-ASCII ratio (pure 7-bit text)
//!    - even/odd null-byte alternation (UTF-16 without a BOM)
//!    - defined-byte ratio for Windows-1252 (single-byte Western text)
//! 3. Always append a low-confidence `unknown-binary` fallback so the
//!    result is never empty
//!
//! The heuristics are deliberately explicit and deterministic: same input,
//! same ranking, every time. Exact confidence values are tunable; the
//! ordering and tie-break rules are the contract.

mod bom;

use crate::error::{Error, Result};
use std::fmt;
use tracing::{debug, trace};

pub use bom::BomKind;

/// Default cap on how many leading bytes the statistical stage inspects.
///
/// Validation must scan whole buffers, but encoding statistics converge
/// quickly, so the guesser bounds its work to keep latency constant on
/// large files.
pub const DEFAULT_MAX_SAMPLE_BYTES: usize = 8192;

/// Encodings the guesser can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingId {
    /// Plain 7-bit ASCII (also valid UTF-8)
    Ascii,
    /// UTF-8
    Utf8,
    /// UTF-8 with a leading BOM
    Utf8Bom,
    /// UTF-16 little-endian
    Utf16Le,
    /// UTF-16 big-endian
    Utf16Be,
    /// UTF-32 little-endian
    Utf32Le,
    /// UTF-32 big-endian
    Utf32Be,
    /// Windows-1252, the representative single-byte Western encoding
    Windows1252,
    /// No encoding hypothesis fits; likely binary data
    UnknownBinary,
}

impl EncodingId {
    /// Canonical lowercase name, stable across releases
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ascii => "us-ascii",
            Self::Utf8 => "utf-8",
            Self::Utf8Bom => "utf-8-bom",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
            Self::Utf32Le => "utf-32le",
            Self::Utf32Be => "utf-32be",
            Self::Windows1252 => "windows-1252",
            Self::UnknownBinary => "unknown-binary",
        }
    }

    /// Fixed tie-break rank for equal confidences: UTF-16/32 beats the
    /// single-byte Western family, which beats ASCII/UTF-8, which beats the
    /// binary fallback. Lower rank wins.
    fn rank(&self) -> u8 {
        match self {
            Self::Utf16Le | Self::Utf16Be | Self::Utf32Le | Self::Utf32Be => 0,
            Self::Windows1252 => 1,
            Self::Ascii | Self::Utf8 | Self::Utf8Bom => 2,
            Self::UnknownBinary => 3,
        }
    }
}

impl fmt::Display for EncodingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One ranked encoding hypothesis
#[derive(Debug, Clone, PartialEq)]
pub struct EncodingCandidate {
    /// The encoding being proposed
    pub id: EncodingId,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
}

impl EncodingCandidate {
    fn new(id: EncodingId, confidence: f64) -> Self {
        Self { id, confidence }
    }
}

/// Configuration for the encoding guesser
#[derive(Debug, Clone)]
pub struct GuesserConfig {
    /// Maximum number of leading bytes fed to the statistical stage
    pub max_sample_bytes: usize,
}

impl Default for GuesserConfig {
    fn default() -> Self {
        Self {
            max_sample_bytes: DEFAULT_MAX_SAMPLE_BYTES,
        }
    }
}

impl GuesserConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the statistical sample cap
    pub fn max_sample_bytes(mut self, max: usize) -> Self {
        self.max_sample_bytes = max;
        self
    }
}

/// Byte-distribution counters over the sampled prefix
#[derive(Debug, Default)]
struct SampleStats {
    total: usize,
    printable_ascii: usize,
    high: usize,
    high_undefined_1252: usize,
    control: usize,
    null_even: usize,
    null_odd: usize,
}

/// Bytes with no assigned character in Windows-1252
const UNDEFINED_1252: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

impl SampleStats {
    fn collect(sample: &[u8]) -> Self {
        let mut stats = Self {
            total: sample.len(),
            ..Self::default()
        };

        for (i, &byte) in sample.iter().enumerate() {
            match byte {
                0x00 => {
                    if i % 2 == 0 {
                        stats.null_even += 1;
                    } else {
                        stats.null_odd += 1;
                    }
                    stats.control += 1;
                }
                b'\t' | b'\n' | b'\r' => stats.printable_ascii += 1,
                0x20..=0x7E => stats.printable_ascii += 1,
                0x01..=0x1F | 0x7F => stats.control += 1,
                0x80..=0xFF => {
                    stats.high += 1;
                    if UNDEFINED_1252.contains(&byte) {
                        stats.high_undefined_1252 += 1;
                    }
                }
            }
        }

        stats
    }

    fn printable_ratio(&self) -> f64 {
        self.printable_ascii as f64 / self.total as f64
    }

    /// How strongly nulls alternate with content bytes, per endianness.
    /// ASCII text stored as UTF-16LE puts a null at every odd offset and
    /// none at even offsets; the product form cancels out buffers where
    /// nulls blanket both parities.
    fn utf16_strength(&self) -> (f64, f64) {
        let even_slots = self.total.div_ceil(2);
        let odd_slots = self.total / 2;
        if even_slots == 0 || odd_slots == 0 {
            return (0.0, 0.0);
        }

        let even_ratio = self.null_even as f64 / even_slots as f64;
        let odd_ratio = self.null_odd as f64 / odd_slots as f64;

        let le = odd_ratio * (1.0 - even_ratio);
        let be = even_ratio * (1.0 - odd_ratio);
        (le, be)
    }

    /// Fraction of the sample a Windows-1252 reader would see as text
    fn text_like_ratio_1252(&self) -> f64 {
        let defined_high = self.high - self.high_undefined_1252;
        (self.printable_ascii + defined_high) as f64 / self.total as f64
    }
}

/// Confidence assigned to an exact BOM match
const BOM_CONFIDENCE: f64 = 0.99;

/// Fixed confidence of the terminal `unknown-binary` fallback
const FALLBACK_CONFIDENCE: f64 = 0.10;

/// Minimum alternation strength before a UTF-16 hypothesis is emitted
const UTF16_MIN_STRENGTH: f64 = 0.4;

/// Statistical encoding guesser
#[derive(Debug, Clone, Default)]
pub struct EncodingGuesser {
    config: GuesserConfig,
}

impl EncodingGuesser {
    /// Creates a guesser with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a guesser with custom configuration
    pub fn with_config(config: GuesserConfig) -> Self {
        Self { config }
    }

    /// Rank candidate encodings for the buffer.
    ///
    /// The returned list is never empty and its confidences are
    /// non-increasing. Fails only on an invalid configuration
    /// (`max_sample_bytes` of zero).
    pub fn guess(&self, data: &[u8]) -> Result<Vec<EncodingCandidate>> {
        if self.config.max_sample_bytes == 0 {
            return Err(Error::InvalidSampleLimit);
        }

        let mut candidates = Vec::new();

        let bom = BomKind::detect(data);
        if !bom.is_none() {
            let id = match bom {
                BomKind::Utf8 => EncodingId::Utf8Bom,
                BomKind::Utf16Le => EncodingId::Utf16Le,
                BomKind::Utf16Be => EncodingId::Utf16Be,
                BomKind::Utf32Le => EncodingId::Utf32Le,
                BomKind::Utf32Be => EncodingId::Utf32Be,
                BomKind::None => unreachable!("checked above"),
            };
            debug!("BOM match: {}", id);
            candidates.push(EncodingCandidate::new(id, BOM_CONFIDENCE));
        } else if !data.is_empty() {
            let sample = &data[..data.len().min(self.config.max_sample_bytes)];
            let stats = SampleStats::collect(sample);
            trace!(
                "sampled {} bytes: {} printable, {} high, {} control",
                stats.total,
                stats.printable_ascii,
                stats.high,
                stats.control
            );

            if stats.high == 0 && stats.printable_ratio() > 0.95 {
                candidates.push(EncodingCandidate::new(EncodingId::Ascii, 0.90));
            }

            let (le, be) = stats.utf16_strength();
            if le >= UTF16_MIN_STRENGTH {
                candidates.push(EncodingCandidate::new(EncodingId::Utf16Le, 0.55 + 0.40 * le));
            }
            if be >= UTF16_MIN_STRENGTH {
                candidates.push(EncodingCandidate::new(EncodingId::Utf16Be, 0.55 + 0.40 * be));
            }

            if stats.high > 0 {
                let defined_ratio =
                    (stats.high - stats.high_undefined_1252) as f64 / stats.high as f64;
                let confidence = (0.35 + 0.50 * defined_ratio) * stats.text_like_ratio_1252();
                candidates.push(EncodingCandidate::new(EncodingId::Windows1252, confidence));
            }
        }

        candidates.push(EncodingCandidate::new(
            EncodingId::UnknownBinary,
            FALLBACK_CONFIDENCE,
        ));

        // Descending confidence, then fixed rank, then name: fully
        // deterministic output for identical input.
        candidates.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then(a.id.rank().cmp(&b.id.rank()))
                .then(a.id.name().cmp(b.id.name()))
        });

        debug!(
            "top candidate: {} ({:.0}%)",
            candidates[0].id,
            candidates[0].confidence * 100.0
        );

        Ok(candidates)
    }
}

/// Rank candidate encodings with the default configuration.
pub fn guess_encoding(data: &[u8]) -> Result<Vec<EncodingCandidate>> {
    EncodingGuesser::new().guess(data)
}
