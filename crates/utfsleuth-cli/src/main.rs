//! utfsleuth - Check whether files are valid UTF-8 and diagnose mis-encoded ones
//!
//! This tool reads a file's raw bytes, validates them against the strict
//! UTF-8 grammar and, when validation fails, reports the most likely
//! original encoding plus a byte-level view of the first decoding failure.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, ValueEnum};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, trace, warn, Level};
use tracing_subscriber::EnvFilter;
use utfsleuth_core::{
    analyze_with_config, FileReport, GuesserConfig, ValidationResult, DEFAULT_MAX_SAMPLE_BYTES,
    DEFAULT_WINDOW_RADIUS,
};
use walkdir::WalkDir;

/// Check whether files are valid UTF-8 and diagnose their likely encoding
#[derive(Parser, Debug)]
#[command(name = "utfsleuth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    input: InputMode,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(long, value_enum, default_value = "report")]
    format: OutputFormat,

    /// Maximum number of leading bytes fed to the encoding heuristics
    #[arg(long, default_value_t = DEFAULT_MAX_SAMPLE_BYTES)]
    max_sample_bytes: usize,

    /// Bytes shown on each side of the failure offset in the snippet
    #[arg(long, default_value_t = DEFAULT_WINDOW_RADIUS)]
    window: usize,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputMode {
    /// Path to a single file to check
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a directory of files to check recursively
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

/// Output format for analysis results
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Full human-readable report per file
    Report,
    /// Just the paths of files that are not valid UTF-8 (for scripting)
    Path,
}

fn main() -> ExitCode {
    match run() {
        Ok(all_valid) => {
            if all_valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every checked file was valid UTF-8
fn run() -> Result<bool> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    // Dispatch based on input mode
    if let Some(ref file) = cli.input.file {
        process_single_file(&cli, file)
    } else if let Some(ref directory) = cli.input.directory {
        process_directory(&cli, directory)
    } else {
        bail!("Either --file or --directory must be specified")
    }
}

/// Check a single file
fn process_single_file(cli: &Cli, file: &Path) -> Result<bool> {
    if !file.exists() {
        bail!("Input file does not exist: {}", file.display());
    }
    if !file.is_file() {
        bail!("Input path is not a file: {}", file.display());
    }

    let report = check_file(cli, file)?;

    match cli.format {
        OutputFormat::Report => print!("{}", render_report(file, &report)),
        OutputFormat::Path => {
            if !report.is_utf8() {
                println!("{}", file.display());
            }
        }
    }

    Ok(report.is_utf8())
}

/// Check every regular file under a directory recursively
fn process_directory(cli: &Cli, directory: &Path) -> Result<bool> {
    if !directory.exists() {
        bail!("Directory does not exist: {}", directory.display());
    }
    if !directory.is_dir() {
        bail!("Path is not a directory: {}", directory.display());
    }

    debug!("Scanning directory: {}", directory.display());

    let mut checked = 0usize;
    let mut invalid = 0usize;

    for entry in WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        // Skip hidden files
        if path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(false)
        {
            continue;
        }

        trace!("Checking {}", path.display());
        let report = match check_file(cli, path) {
            Ok(report) => report,
            Err(e) => {
                // Log error but continue with other files
                warn!("Error checking {}: {}", path.display(), e);
                continue;
            }
        };

        checked += 1;
        if !report.is_utf8() {
            invalid += 1;
            match cli.format {
                OutputFormat::Report => print!("{}", render_report(path, &report)),
                OutputFormat::Path => println!("{}", path.display()),
            }
        }
    }

    debug!("Checked {} files, {} not valid UTF-8", checked, invalid);

    if matches!(cli.format, OutputFormat::Report) {
        println!("\nChecked {checked} file(s): {invalid} not valid UTF-8");
    }

    Ok(invalid == 0)
}

/// Read the file and run the analysis pipeline over its bytes
fn check_file(cli: &Cli, path: &Path) -> Result<FileReport> {
    let data = fs::read(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    trace!("Read {} bytes from {}", data.len(), path.display());

    let config = GuesserConfig::new().max_sample_bytes(cli.max_sample_bytes);
    analyze_with_config(&data, config, cli.window)
        .with_context(|| format!("Failed to analyze: {}", path.display()))
}

/// Render one report as the human-readable text block
fn render_report(path: &Path, report: &FileReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\nFile Analysis for: {}", path.display());
    let _ = writeln!(out, "{}", "-".repeat(50));

    match report.validation {
        ValidationResult::Valid => {
            let _ = writeln!(out, "\u{2713} The file is UTF-8 encoded");
        }
        ValidationResult::Invalid { .. } => {
            let _ = writeln!(out, "\u{2717} The file is NOT UTF-8 encoded");
        }
    }

    let _ = writeln!(out, "\nFile size: {} bytes", report.size);

    if !report.bom.is_none() {
        let _ = writeln!(out, "BOM: {} detected", report.bom);
    }

    if let ValidationResult::Invalid { offset, reason } = report.validation {
        let _ = writeln!(out, "\nDiagnostics:");

        if let Some(top) = report.top_candidate() {
            let _ = writeln!(
                out,
                "Detected encoding: {} (confidence: {:.1}%)",
                top.id,
                top.confidence * 100.0
            );
        }

        let _ = writeln!(out, "UTF-8 decode error: {reason} at byte offset {offset}");

        if let Some(snippet) = &report.snippet {
            let _ = writeln!(out, "\nProblematic section:");
            let _ = writeln!(out, "Position: {}", snippet.position);
            let _ = writeln!(out, "Hex values: {}", snippet.hex_rendering);
            let _ = writeln!(out, "Printable: {}", snippet.printable_rendering);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use utfsleuth_core::analyze;

    #[test]
    fn test_render_valid_report() {
        let report = analyze(b"hello world").unwrap();
        let text = render_report(Path::new("/tmp/ok.txt"), &report);

        assert!(text.contains("File Analysis for: /tmp/ok.txt"));
        assert!(text.contains("The file is UTF-8 encoded"));
        assert!(text.contains("File size: 11 bytes"));
        assert!(!text.contains("Diagnostics:"));
    }

    #[test]
    fn test_render_invalid_report() {
        let report = analyze(b"caf\xe9").unwrap();
        let text = render_report(Path::new("latin1.txt"), &report);

        assert!(text.contains("NOT UTF-8 encoded"));
        assert!(text.contains("Detected encoding: windows-1252"));
        assert!(text.contains("at byte offset 3"));
        assert!(text.contains("Hex values: 63 61 66 e9"));
        assert!(text.contains("Printable: caf."));
    }

    #[test]
    fn test_render_bom_line() {
        let report = analyze(b"\xff\xfeh\x00i\x00").unwrap();
        let text = render_report(Path::new("utf16.txt"), &report);

        assert!(text.contains("BOM: UTF-16 LE BOM detected"));
        assert!(text.contains("Detected encoding: utf-16le"));
    }

    #[test]
    fn test_check_file_reads_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"plain ascii").unwrap();

        let cli = Cli::parse_from(["utfsleuth", "--file", "x"]);
        let report = check_file(&cli, file.path()).unwrap();
        assert!(report.is_utf8());
    }

    #[test]
    fn test_process_directory_flags_invalid_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.txt"), b"fine").unwrap();
        fs::write(dir.path().join("bad.txt"), b"caf\xe9").unwrap();
        fs::write(dir.path().join(".hidden"), b"\xff\xff").unwrap();

        let cli = Cli::parse_from([
            "utfsleuth",
            "--directory",
            "x",
            "--format",
            "path",
        ]);
        // Hidden file is skipped, so only bad.txt counts against us
        let all_valid = process_directory(&cli, dir.path()).unwrap();
        assert!(!all_valid);
    }

    #[test]
    fn test_process_directory_all_valid() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), b"one").unwrap();
        fs::write(dir.path().join("b.txt"), b"two").unwrap();

        let cli = Cli::parse_from(["utfsleuth", "--directory", "x", "--format", "path"]);
        assert!(process_directory(&cli, dir.path()).unwrap());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
