//! Batch processing of alignment and query record streams.
//!
//! This module drives a [`MapperRegistry`](crate::mapping::MapperRegistry)
//! from two line-oriented inputs: a file of alignments and a file of
//! coordinate queries. Malformed records and failed lookups are handled per
//! [`ErrorMode`].
//!
//! # Examples
//!
//! ```
//! use cigarco::batch::{BatchConfig, BatchProcessor};
//! use std::io::Cursor;
//!
//! let alignments = "TR1\tCHR1\t3\t8M7D6M2I2M11D7M\nTR2\tCHR2\t10\t20M\n";
//! let queries = "TR1\t4\nTR2\t0\nTR1\t13\nTR2\t10\n";
//!
//! let mut processor = BatchProcessor::new(BatchConfig::default());
//! processor.load_alignments(Cursor::new(alignments)).unwrap();
//!
//! let mut output = Vec::new();
//! let summary = processor.run_queries(Cursor::new(queries), &mut output).unwrap();
//! assert_eq!(summary.succeeded, 4);
//!
//! let output = String::from_utf8(output).unwrap();
//! assert_eq!(output.lines().next(), Some("TR1\t4\tCHR1\t7"));
//! ```

use std::fmt;
use std::str::FromStr;

mod processor;

pub use processor::{BatchConfig, BatchProcessor, BatchSummary};

/// How the batch driver reacts to a bad record or failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Skip the record silently.
    Ignore,
    /// Log the error and skip the record.
    #[default]
    Report,
    /// Log the error and abort the batch.
    Fail,
}

impl fmt::Display for ErrorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMode::Ignore => write!(f, "I"),
            ErrorMode::Report => write!(f, "R"),
            ErrorMode::Fail => write!(f, "F"),
        }
    }
}

impl FromStr for ErrorMode {
    type Err = String;

    /// Parse an error mode from its single-letter or long form.
    ///
    /// ```
    /// use cigarco::batch::ErrorMode;
    ///
    /// assert_eq!("I".parse::<ErrorMode>().unwrap(), ErrorMode::Ignore);
    /// assert_eq!("fail".parse::<ErrorMode>().unwrap(), ErrorMode::Fail);
    /// assert!("X".parse::<ErrorMode>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "i" | "ignore" => Ok(ErrorMode::Ignore),
            "r" | "report" => Ok(ErrorMode::Report),
            "f" | "fail" => Ok(ErrorMode::Fail),
            _ => Err(format!(
                "invalid error mode '{}': expected I, R or F",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mode_default() {
        assert_eq!(ErrorMode::default(), ErrorMode::Report);
    }

    #[test]
    fn test_error_mode_display_round_trip() {
        for mode in [ErrorMode::Ignore, ErrorMode::Report, ErrorMode::Fail] {
            assert_eq!(mode.to_string().parse::<ErrorMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_error_mode_long_forms() {
        assert_eq!("Report".parse::<ErrorMode>().unwrap(), ErrorMode::Report);
        assert_eq!("r".parse::<ErrorMode>().unwrap(), ErrorMode::Report);
        assert!("".parse::<ErrorMode>().is_err());
    }
}
