//! Error types for cigarco
//!
//! Every error carries the offending value together with the valid range or
//! expected grammar, so callers can produce a diagnostic per record:
//! - Error codes for categorization
//! - Source span tracking for malformed CIGAR strings

use std::fmt;
use thiserror::Error;

use crate::mapping::Direction;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Input errors (E1xxx)
    /// Structurally invalid CIGAR string
    MalformedCigar = 1001,
    /// Unparsable alignment or query record
    InvalidRecord = 1002,
    /// Direction token other than QT/TQ
    UnsupportedDirection = 1003,

    // Lookup errors (E2xxx)
    /// No alignment registered for a sequence name
    UnknownSequence = 2001,

    // Validation errors (E3xxx)
    /// Negative alignment start
    InvalidStart = 3001,
    /// Coordinate outside the source sequence
    CoordinateOutOfRange = 3002,
    /// Alignment end past the largest representable coordinate
    AlignmentEndOverflow = 3003,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// JSON serialization error
    JsonError = 9002,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::MalformedCigar => "malformed CIGAR string",
            ErrorCode::InvalidRecord => "invalid input record",
            ErrorCode::UnsupportedDirection => "unsupported transformation direction",
            ErrorCode::UnknownSequence => "no alignment for sequence",
            ErrorCode::InvalidStart => "invalid alignment start",
            ErrorCode::CoordinateOutOfRange => "coordinate out of range",
            ErrorCode::AlignmentEndOverflow => "alignment end overflows",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON serialization error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A span in the source input indicating error location
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceSpan {
    /// Starting byte offset (0-indexed)
    pub start: usize,
    /// Ending byte offset (exclusive)
    pub end: usize,
}

impl SourceSpan {
    /// Create a new source span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a span for a single position
    pub fn point(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Format the source with the error highlighted
    ///
    /// Returns a string like:
    /// ```text
    /// 8M7Dx6M
    ///     ^
    /// ```
    pub fn highlight(&self, source: &str) -> String {
        if source.is_empty() {
            return String::new();
        }

        let safe_start = self.start.min(source.len());
        let safe_end = self.end.min(source.len()).max(safe_start);

        let mut pointer = " ".repeat(safe_start);
        pointer.push('^');
        if safe_end > safe_start + 1 {
            pointer.push_str(&"~".repeat(safe_end - safe_start - 1));
        }

        format!("{}\n{}", source, pointer)
    }
}

/// Main error type for cigarco operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CigarcoError {
    /// CIGAR string does not match `(digits op)+`
    #[error("Malformed CIGAR '{cigar}' at position {pos}: {msg}")]
    MalformedCigar {
        cigar: String,
        pos: usize,
        msg: String,
    },

    /// Alignment start below zero
    #[error("Invalid alignment start {start}: must be >= 0")]
    InvalidStart { start: i64 },

    /// Coordinate outside `[min, max]` for the source space of `direction`
    #[error("Coordinate {coordinate} out of range for {direction} transformation: expected {min}..={max}")]
    CoordinateOutOfRange {
        coordinate: u64,
        direction: Direction,
        min: u64,
        max: u64,
    },

    /// `start + target span` does not fit in a `u64`
    #[error("Alignment starting at {start} with target span {span} overflows the coordinate range")]
    AlignmentEndOverflow { start: u64, span: u64 },

    /// Direction token other than QT or TQ
    #[error("Unsupported direction '{token}': expected QT or TQ")]
    UnsupportedDirection { token: String },

    /// No alignment registered under this name
    #[error("No alignment found for sequence '{name}'")]
    UnknownSequence { name: String },

    /// Input record that cannot be parsed
    #[error("Invalid record at line {line}: {msg}")]
    InvalidRecord { line: usize, msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON serialization error
    #[error("JSON error: {msg}")]
    Json { msg: String },
}

impl CigarcoError {
    /// Create a malformed CIGAR error
    pub fn malformed_cigar(cigar: &str, pos: usize, msg: impl Into<String>) -> Self {
        CigarcoError::MalformedCigar {
            cigar: cigar.to_string(),
            pos,
            msg: msg.into(),
        }
    }

    /// Create an invalid record error
    pub fn invalid_record(line: usize, msg: impl Into<String>) -> Self {
        CigarcoError::InvalidRecord {
            line,
            msg: msg.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CigarcoError::MalformedCigar { .. } => ErrorCode::MalformedCigar,
            CigarcoError::InvalidStart { .. } => ErrorCode::InvalidStart,
            CigarcoError::CoordinateOutOfRange { .. } => ErrorCode::CoordinateOutOfRange,
            CigarcoError::AlignmentEndOverflow { .. } => ErrorCode::AlignmentEndOverflow,
            CigarcoError::UnsupportedDirection { .. } => ErrorCode::UnsupportedDirection,
            CigarcoError::UnknownSequence { .. } => ErrorCode::UnknownSequence,
            CigarcoError::InvalidRecord { .. } => ErrorCode::InvalidRecord,
            CigarcoError::Io { .. } => ErrorCode::IoError,
            CigarcoError::Json { .. } => ErrorCode::JsonError,
        }
    }

    /// Get a formatted error with full diagnostic output
    pub fn detailed_message(&self) -> String {
        match self {
            CigarcoError::MalformedCigar { cigar, pos, .. } => format!(
                "[{}] {}\n\n{}",
                self.code(),
                self,
                SourceSpan::point(*pos).highlight(cigar)
            ),
            _ => format!("[{}] {}", self.code(), self),
        }
    }
}

impl From<std::io::Error> for CigarcoError {
    fn from(err: std::io::Error) -> Self {
        CigarcoError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CigarcoError {
    fn from(err: serde_json::Error) -> Self {
        CigarcoError::Json {
            msg: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::MalformedCigar.as_str(), "E1001");
        assert_eq!(ErrorCode::UnknownSequence.as_str(), "E2001");
        assert_eq!(ErrorCode::CoordinateOutOfRange.as_str(), "E3002");
        assert_eq!(ErrorCode::IoError.as_str(), "E9001");
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::InvalidStart), "E3001");
        assert_eq!(
            ErrorCode::UnsupportedDirection.description(),
            "unsupported transformation direction"
        );
    }

    #[test]
    fn test_source_span_highlight() {
        let span = SourceSpan::point(4);
        assert_eq!(span.highlight("8M7Dx6M"), "8M7Dx6M\n    ^");

        let span = SourceSpan::new(0, 3);
        assert_eq!(span.highlight("abcdef"), "abcdef\n^~~");
    }

    #[test]
    fn test_source_span_highlight_empty_source() {
        assert_eq!(SourceSpan::point(0).highlight(""), "");
    }

    #[test]
    fn test_source_span_highlight_out_of_bounds() {
        let span = SourceSpan::new(10, 20);
        assert_eq!(span.highlight("8M"), "8M\n  ^");
    }

    #[test]
    fn test_error_codes_match_variants() {
        let err = CigarcoError::malformed_cigar("8Q", 1, "unknown operation 'Q'");
        assert_eq!(err.code(), ErrorCode::MalformedCigar);

        let err = CigarcoError::InvalidStart { start: -1 };
        assert_eq!(err.code(), ErrorCode::InvalidStart);

        let err = CigarcoError::CoordinateOutOfRange {
            coordinate: 30,
            direction: Direction::QueryToTarget,
            min: 0,
            max: 25,
        };
        assert_eq!(err.code(), ErrorCode::CoordinateOutOfRange);

        let err = CigarcoError::UnknownSequence {
            name: "TR9".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::UnknownSequence);

        let err = CigarcoError::AlignmentEndOverflow {
            start: u64::MAX,
            span: 1,
        };
        assert_eq!(err.code(), ErrorCode::AlignmentEndOverflow);
        assert_eq!(err.code().as_str(), "E3003");
    }

    #[test]
    fn test_error_display_carries_context() {
        let err = CigarcoError::CoordinateOutOfRange {
            coordinate: 30,
            direction: Direction::QueryToTarget,
            min: 0,
            max: 25,
        };
        let msg = err.to_string();
        assert!(msg.contains("30"));
        assert!(msg.contains("QT"));
        assert!(msg.contains("0..=25"));

        let err = CigarcoError::UnsupportedDirection {
            token: "XY".to_string(),
        };
        assert!(err.to_string().contains("'XY'"));
    }

    #[test]
    fn test_detailed_message_highlights_cigar() {
        let err = CigarcoError::malformed_cigar("8M7Dx6M", 4, "unexpected character 'x'");
        let detailed = err.detailed_message();
        assert!(detailed.starts_with("[E1001]"));
        assert!(detailed.ends_with("8M7Dx6M\n    ^"));
    }

    #[test]
    fn test_detailed_message_simple() {
        let err = CigarcoError::InvalidStart { start: -4 };
        assert_eq!(
            err.detailed_message(),
            "[E3001] Invalid alignment start -4: must be >= 0"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.tsv");
        let err: CigarcoError = io_err.into();
        assert!(matches!(err, CigarcoError::Io { .. }));
        assert!(err.to_string().contains("missing.tsv"));
    }
}
