//! Byte-level diagnostic snippets.
//!
//! When validation fails, the offending bytes are rendered as a small
//! window around the failure offset: a lowercase hex dump plus a printable
//! projection where anything outside `0x20..=0x7E` shows as `.`.

use crate::error::{Error, Result};
use std::ops::Range;

/// Default number of bytes shown on each side of the anchor position
pub const DEFAULT_WINDOW_RADIUS: usize = 10;

/// A bounded window of raw bytes around a position of interest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticSnippet {
    /// The anchor offset in the original buffer
    pub position: usize,
    /// The window covered, clamped to the buffer bounds
    pub window: Range<usize>,
    /// Raw bytes within the window
    pub bytes: Vec<u8>,
    /// Lowercase space-separated hex, two digits per byte
    pub hex_rendering: String,
    /// Printable projection of the window
    pub printable_rendering: String,
}

/// Build a snippet of `radius` bytes on each side of `position`.
///
/// The window `[position - radius, position + radius)` is clamped to the
/// buffer. `position` must index into the buffer and `radius` must be at
/// least 1; violating either is a caller bug, reported as an error rather
/// than a panic.
pub fn build_snippet_with_radius(
    data: &[u8],
    position: usize,
    radius: usize,
) -> Result<DiagnosticSnippet> {
    if radius == 0 {
        return Err(Error::InvalidWindowRadius);
    }
    if position >= data.len() {
        return Err(Error::position_out_of_bounds(position, data.len()));
    }

    let start = position.saturating_sub(radius);
    let end = (position + radius).min(data.len());
    let bytes = data[start..end].to_vec();

    let hex_rendering = bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ");

    let printable_rendering = bytes
        .iter()
        .map(|&b| if (0x20..=0x7E).contains(&b) { b as char } else { '.' })
        .collect();

    Ok(DiagnosticSnippet {
        position,
        window: start..end,
        bytes,
        hex_rendering,
        printable_rendering,
    })
}

/// Build a snippet with the default window radius.
pub fn build_snippet(data: &[u8], position: usize) -> Result<DiagnosticSnippet> {
    build_snippet_with_radius(data, position, DEFAULT_WINDOW_RADIUS)
}
