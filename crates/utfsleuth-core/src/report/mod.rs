//! Composed file analysis.
//!
//! Runs the full pipeline over a buffer: strict validation first, and only
//! on failure the encoding guesser and a diagnostic snippet anchored at the
//! rejection offset. BOM information is always reported since it is cheap
//! and useful even for valid files.

use crate::detect::{BomKind, EncodingCandidate, EncodingGuesser, GuesserConfig};
use crate::error::{Error, Result};
use crate::snippet::{self, DiagnosticSnippet};
use crate::utf8::{self, ValidationResult};
use tracing::debug;

/// Everything the pipeline learned about one buffer
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Total size of the analyzed buffer in bytes
    pub size: usize,
    /// Strict UTF-8 verdict
    pub validation: ValidationResult,
    /// BOM found at the start of the buffer, if any
    pub bom: BomKind,
    /// Ranked encoding hypotheses; populated only when validation failed
    pub candidates: Vec<EncodingCandidate>,
    /// Window around the first rejection offset; populated only when
    /// validation failed
    pub snippet: Option<DiagnosticSnippet>,
}

impl FileReport {
    /// Returns true when the buffer is well-formed UTF-8
    pub fn is_utf8(&self) -> bool {
        self.validation.is_valid()
    }

    /// The highest-ranked encoding hypothesis, if the guesser ran
    pub fn top_candidate(&self) -> Option<&EncodingCandidate> {
        self.candidates.first()
    }
}

/// Analyze a buffer with explicit guesser configuration and snippet radius.
pub fn analyze_with_config(
    data: &[u8],
    config: GuesserConfig,
    window_radius: usize,
) -> Result<FileReport> {
    let validation = utf8::validate(data);
    let bom = BomKind::detect(data);

    let (candidates, snippet) = match validation {
        ValidationResult::Valid => (Vec::new(), None),
        ValidationResult::Invalid { offset, reason } => {
            debug!("validation failed at offset {}: {}", offset, reason);
            let candidates = EncodingGuesser::with_config(config).guess(data)?;
            let snippet = snippet::build_snippet_with_radius(data, offset, window_radius)?;
            (candidates, Some(snippet))
        }
    };

    Ok(FileReport {
        size: data.len(),
        validation,
        bom,
        candidates,
        snippet,
    })
}

/// Analyze a buffer with default configuration.
pub fn analyze(data: &[u8]) -> Result<FileReport> {
    analyze_with_config(data, GuesserConfig::default(), snippet::DEFAULT_WINDOW_RADIUS)
}

/// Read a file and analyze its contents.
///
/// This is a convenience wrapper; I/O failures map to [`Error::FileRead`].
pub fn analyze_file(path: impl AsRef<std::path::Path>) -> Result<FileReport> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
    analyze(&data)
}
