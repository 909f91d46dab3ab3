//! Output verification.
//!
//! Compares the diagnostic text captured from a run against the golden
//! transcript for the same test, line by line, reporting every differing
//! pair rather than stopping at the first.
//!
//! The golden files carry one extra trailing character per line (an artifact
//! of how they were generated), so exactly the final character of each
//! expected line is stripped before comparison. The captured line is always
//! compared unmodified.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that abort verification for a test.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The golden transcript could not be read.
    #[error("failed to read expected output {path:?}: {source}")]
    Io {
        /// Path of the golden file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// One differing line pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMismatch {
    /// Zero-based line index.
    pub line: usize,
    /// Golden line, after the trailing-character strip.
    pub expected: String,
    /// Captured line, unmodified.
    pub actual: String,
}

/// Result of comparing a captured transcript against a golden one.
#[derive(Debug, Clone, Default)]
pub struct DiffReport {
    /// Every differing line pair, in line order.
    pub mismatches: Vec<LineMismatch>,
    /// Number of line pairs compared before either side ran out.
    pub lines_compared: usize,
}

impl DiffReport {
    /// Whether the captured output matched the golden transcript.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Strip exactly the final character of a golden line.
///
/// An empty golden line has nothing to strip and is compared as-is. The
/// strip is character-based so a multi-byte final character never leaves a
/// broken UTF-8 tail behind.
fn strip_sentinel(line: &str) -> &str {
    match line.char_indices().last() {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

/// Split a transcript into lines on `\n`, treating a trailing newline as a
/// terminator rather than introducing a final empty line.
///
/// Deliberately not `str::lines()`: that would strip a trailing `\r`, and on
/// the expected side the artifact character must survive until
/// [`strip_sentinel`] removes it.
fn split_lines(text: &str) -> std::vec::IntoIter<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines.into_iter()
}

/// Compare two transcripts line by line.
///
/// Walks both line sequences in lock-step and records every mismatch. The
/// walk ends the moment either side is exhausted; trailing extra lines on
/// the longer side are ignored, not reported.
pub fn compare_transcripts(expected: &str, actual: &str) -> DiffReport {
    let mut report = DiffReport::default();

    for (line, (exp, act)) in split_lines(expected).zip(split_lines(actual)).enumerate() {
        let exp = strip_sentinel(exp);
        if exp != act {
            report.mismatches.push(LineMismatch {
                line,
                expected: exp.to_string(),
                actual: act.to_string(),
            });
        }
        report.lines_compared = line + 1;
    }

    report
}

/// Verify captured output against the golden file at `expected_path`.
///
/// Fails if the golden file cannot be read; in that case no partial report
/// is produced.
pub fn verify_file(expected_path: &Path, actual: &str) -> Result<DiffReport, VerifyError> {
    let expected = std::fs::read_to_string(expected_path).map_err(|source| VerifyError::Io {
        path: expected_path.to_path_buf(),
        source,
    })?;

    Ok(compare_transcripts(&expected, actual))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_modulo_sentinel_passes() {
        let expected = "PASS addX\nPASS subX\nDone.X\n";
        let actual = "PASS add\nPASS sub\nDone.\n";

        let report = compare_transcripts(expected, actual);
        assert!(report.passed());
        assert!(report.mismatches.is_empty());
        assert_eq!(report.lines_compared, 3);
    }

    #[test]
    fn test_reports_every_mismatch_in_order() {
        let expected = "AAAX\nBBBX\nCCCX\n";
        let actual = "ZZZ\nBBB\nYYY\n";

        let report = compare_transcripts(expected, actual);
        assert_eq!(report.mismatches.len(), 2);
        assert_eq!(report.mismatches[0].line, 0);
        assert_eq!(report.mismatches[0].actual, "ZZZ");
        assert_eq!(report.mismatches[1].line, 2);
        assert_eq!(report.mismatches[1].expected, "CCC");
    }

    #[test]
    fn test_single_mismatch_scenario() {
        // Expected ["AAAX", "BBBX"] with X the sentinel, captured
        // ["AAA", "CCC"]: line 0 matches, line 1 differs.
        let report = compare_transcripts("AAAX\nBBBX\n", "AAA\nCCC\n");

        assert_eq!(report.mismatches.len(), 1);
        let m = &report.mismatches[0];
        assert_eq!(m.line, 1);
        assert_eq!(m.expected, "BBB");
        assert_eq!(m.actual, "CCC");
    }

    #[test]
    fn test_stops_at_shorter_side() {
        // Actual has extra trailing lines: ignored, not mismatches.
        let report = compare_transcripts("AAAX\n", "AAA\nextra\nmore\n");
        assert!(report.passed());
        assert_eq!(report.lines_compared, 1);

        // Expected has extra trailing lines: also ignored.
        let report = compare_transcripts("AAAX\nBBBX\nCCCX\n", "AAA\n");
        assert!(report.passed());
        assert_eq!(report.lines_compared, 1);
    }

    #[test]
    fn test_empty_golden_line_does_not_underflow() {
        // An empty golden line is compared as-is against the captured line.
        let report = compare_transcripts("\nBBBX\n", "\nBBB\n");
        assert!(report.passed());

        let report = compare_transcripts("\n", "not empty\n");
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(report.mismatches[0].expected, "");
    }

    #[test]
    fn test_carriage_return_sentinel() {
        // The usual artifact: golden lines end in \r. It must survive line
        // splitting so the strip removes it, and only it.
        let report = compare_transcripts("PASS alu\r\nDone.\r\n", "PASS alu\nDone.\n");
        assert!(report.passed());
        assert_eq!(report.lines_compared, 2);
    }

    #[test]
    fn test_multibyte_sentinel_strip() {
        // Stripping is per character, not per byte.
        let report = compare_transcripts("temp 25°\n", "temp 25\n");
        assert!(report.passed());
    }

    #[test]
    fn test_verify_file_missing() {
        let err = verify_file(Path::new("/nonexistent/fpu.expected"), "output").unwrap_err();
        let VerifyError::Io { path, .. } = err;
        assert_eq!(path, Path::new("/nonexistent/fpu.expected"));
    }

    #[test]
    fn test_verify_file_reads_golden() {
        let dir = std::env::temp_dir().join("psp_autotest_verifier_test");
        std::fs::create_dir_all(&dir).unwrap();
        let golden = dir.join("alu.expected");
        std::fs::write(&golden, "PASS aluX\n").unwrap();

        let report = verify_file(&golden, "PASS alu\n").unwrap();
        assert!(report.passed());

        std::fs::remove_dir_all(&dir).ok();
    }
}
