//! # utfsleuth-core
//!
//! A library for diagnosing text-encoding problems in raw byte buffers.
//!
//! This crate provides the core functionality for:
//! - Strict UTF-8 validation with exact failure offsets and structured reasons
//! - Statistical encoding detection (BOM matching plus byte-distribution heuristics)
//! - Byte-level diagnostic snippets around the first decoding failure
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`utf8`]: Strict UTF-8 grammar validation
//! - [`detect`]: BOM detection and the statistical encoding guesser
//! - [`snippet`]: Hex/printable rendering of bytes around a failure offset
//! - [`report`]: The composed analysis pipeline
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```
//! use utfsleuth_core::{analyze, ValidationResult};
//!
//! let report = analyze(b"caf\xe9")?;
//! assert!(!report.is_utf8());
//!
//! if let ValidationResult::Invalid { offset, reason } = report.validation {
//!     println!("bad byte at {offset}: {reason}");
//! }
//! if let Some(top) = report.top_candidate() {
//!     println!("probably {} ({:.0}%)", top.id, top.confidence * 100.0);
//! }
//! # Ok::<(), utfsleuth_core::Error>(())
//! ```
//!
//! All components are pure functions of their inputs: no global state, no
//! mutation after construction, same output for the same bytes every time.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod detect;
pub mod error;
pub mod report;
pub mod snippet;
pub mod utf8;

// Re-export primary types for convenience
pub use detect::{
    guess_encoding, BomKind, EncodingCandidate, EncodingGuesser, EncodingId, GuesserConfig,
    DEFAULT_MAX_SAMPLE_BYTES,
};
pub use error::{Error, Result};
pub use report::{analyze, analyze_file, analyze_with_config, FileReport};
pub use snippet::{build_snippet, build_snippet_with_radius, DiagnosticSnippet, DEFAULT_WINDOW_RADIUS};
pub use utf8::{validate, InvalidReason, ValidationResult};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
