//! Parsing utilities for alignment and query records

use crate::alignment::{Alignment, Strand};
use crate::error::CigarcoError;
use crate::mapping::Direction;

/// A single coordinate lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    /// Name of the query the alignment is registered under
    pub query_name: String,
    /// Source coordinate
    pub coordinate: u64,
    /// Transformation direction
    pub direction: Direction,
}

/// Parse a tab-separated alignment line into an [`Alignment`]
///
/// Requires at least 4 fields: QNAME, TNAME, START, CIGAR. An optional fifth
/// field gives the strand (`+` or `-`, default `+`).
///
/// # Examples
///
/// ```
/// use cigarco::cli::parse_alignment_line;
///
/// let alignment = parse_alignment_line("TR1\tCHR1\t3\t8M7D6M2I2M11D7M", 1).unwrap();
/// assert_eq!(alignment.query_name(), "TR1");
/// assert_eq!(alignment.start(), 3);
///
/// assert!(parse_alignment_line("TR1\tCHR1\t3", 2).is_err());
/// ```
pub fn parse_alignment_line(line: &str, line_num: usize) -> Result<Alignment, CigarcoError> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() < 4 {
        return Err(CigarcoError::invalid_record(
            line_num,
            format!(
                "expected at least 4 tab-separated fields (query, target, start, cigar), found {}",
                fields.len()
            ),
        ));
    }

    let start: i64 = fields[2].parse().map_err(|_| {
        CigarcoError::invalid_record(line_num, format!("invalid start '{}'", fields[2]))
    })?;

    let strand = match fields.get(4) {
        Some(s) if !s.is_empty() => s
            .parse::<Strand>()
            .map_err(|msg| CigarcoError::invalid_record(line_num, msg))?,
        _ => Strand::Forward,
    };

    Alignment::new(fields[0], fields[1], start, fields[3], strand)
}

/// Parse a tab-separated query line into a [`QueryRecord`]
///
/// Requires at least 2 fields: QNAME, COORDINATE. An optional third field
/// gives the direction (`QT` or `TQ`, default `QT`).
///
/// # Examples
///
/// ```
/// use cigarco::cli::parse_query_line;
/// use cigarco::mapping::Direction;
///
/// let record = parse_query_line("TR1\t40\tTQ", 1).unwrap();
/// assert_eq!(record.coordinate, 40);
/// assert_eq!(record.direction, Direction::TargetToQuery);
///
/// assert!(parse_query_line("TR1\t-4", 2).is_err());
/// ```
pub fn parse_query_line(line: &str, line_num: usize) -> Result<QueryRecord, CigarcoError> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() < 2 {
        return Err(CigarcoError::invalid_record(
            line_num,
            format!(
                "expected at least 2 tab-separated fields (query, coordinate), found {}",
                fields.len()
            ),
        ));
    }

    let coordinate: u64 = fields[1].parse().map_err(|_| {
        CigarcoError::invalid_record(
            line_num,
            format!("invalid coordinate '{}': expected a non-negative integer", fields[1]),
        )
    })?;

    let direction = match fields.get(2) {
        Some(token) if !token.is_empty() => token.parse::<Direction>()?,
        _ => Direction::QueryToTarget,
    };

    Ok(QueryRecord {
        query_name: fields[0].to_string(),
        coordinate,
        direction,
    })
}
