//! Output formatting utilities for CLI operations

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use serde::Serialize;

use crate::cli::parse::QueryRecord;
use crate::mapping::TransformedCoordinate;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab-separated text (default)
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    /// Parse an output format from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use cigarco::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert!(matches!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json));
    /// assert!(matches!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text));
    /// assert!(matches!(OutputFormat::from_str("other").unwrap(), OutputFormat::Text));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
struct ResultLine<'a> {
    query_name: &'a str,
    coordinate: u64,
    direction: &'a str,
    seq_name: &'a str,
    transformed: u64,
}

/// Write a successful transformation to the output
///
/// Text output is `qname<TAB>coordinate<TAB>seq_name<TAB>transformed`.
///
/// # Examples
///
/// ```
/// use cigarco::cli::{output_result, parse_query_line, OutputFormat};
/// use cigarco::mapping::TransformedCoordinate;
/// use std::io::Cursor;
///
/// let record = parse_query_line("TR1\t4", 1).unwrap();
/// let result = TransformedCoordinate { seq_name: "CHR1".to_string(), coordinate: 7 };
///
/// let mut buffer = Cursor::new(Vec::new());
/// output_result(&mut buffer, &record, &result, OutputFormat::Text).unwrap();
/// assert_eq!(String::from_utf8(buffer.into_inner()).unwrap(), "TR1\t4\tCHR1\t7\n");
/// ```
pub fn output_result<W: Write>(
    writer: &mut W,
    record: &QueryRecord,
    result: &TransformedCoordinate,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let line = ResultLine {
                query_name: &record.query_name,
                coordinate: record.coordinate,
                direction: record.direction.as_str(),
                seq_name: &result.seq_name,
                transformed: result.coordinate,
            };
            serde_json::to_writer(&mut *writer, &line)?;
            writeln!(writer)
        }
        OutputFormat::Text => writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            record.query_name, record.coordinate, result.seq_name, result.coordinate
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Direction;
    use std::io::Cursor;

    fn record() -> QueryRecord {
        QueryRecord {
            query_name: "TR1".to_string(),
            coordinate: 40,
            direction: Direction::TargetToQuery,
        }
    }

    fn result() -> TransformedCoordinate {
        TransformedCoordinate {
            seq_name: "TR1".to_string(),
            coordinate: 21,
        }
    }

    fn render<F: FnOnce(&mut Cursor<Vec<u8>>) -> io::Result<()>>(f: F) -> String {
        let mut buffer = Cursor::new(Vec::new());
        f(&mut buffer).unwrap();
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("tsv".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_output_result_text() {
        let out = render(|w| output_result(w, &record(), &result(), OutputFormat::Text));
        assert_eq!(out, "TR1\t40\tTR1\t21\n");
    }

    #[test]
    fn test_output_result_json() {
        let out = render(|w| output_result(w, &record(), &result(), OutputFormat::Json));
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["query_name"], "TR1");
        assert_eq!(value["coordinate"], 40);
        assert_eq!(value["direction"], "TQ");
        assert_eq!(value["transformed"], 21);
        assert!(out.ends_with('\n'));
    }
}
