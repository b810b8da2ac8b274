//! Alignment records relating a query sequence to a target sequence.

use std::fmt;
use std::str::FromStr;

use crate::cigar::{format_cigar, parse_cigar, CigarSegment};
use crate::error::CigarcoError;

/// Strand of the query relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strand {
    /// The query aligns as given.
    #[default]
    Forward,
    /// The query was reverse-complemented before alignment.
    Reverse,
}

impl Strand {
    /// True for [`Strand::Reverse`].
    pub fn is_reverse(&self) -> bool {
        matches!(self, Strand::Reverse)
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

impl FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" | "F" | "f" => Ok(Strand::Forward),
            "-" | "R" | "r" => Ok(Strand::Reverse),
            _ => Err(format!("invalid strand '{}': expected '+' or '-'", s)),
        }
    }
}

/// An immutable alignment of a query against a target.
///
/// `start` is the 0-based target coordinate of the first target-consuming
/// base. Alignments are cheap to share behind an `Arc` across mappers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    query_name: String,
    target_name: String,
    start: u64,
    segments: Vec<CigarSegment>,
    strand: Strand,
}

impl Alignment {
    /// Build an alignment from a raw CIGAR string.
    ///
    /// # Errors
    ///
    /// [`CigarcoError::InvalidStart`] if `start` is negative,
    /// [`CigarcoError::MalformedCigar`] if the CIGAR fails to parse or its
    /// summed lengths overflow, and [`CigarcoError::AlignmentEndOverflow`] if
    /// `start` plus the target span does not fit in a `u64`.
    ///
    /// # Example
    ///
    /// ```
    /// use cigarco::alignment::{Alignment, Strand};
    ///
    /// let alignment = Alignment::new("TR1", "CHR1", 3, "8M7D6M2I2M11D7M", Strand::Forward).unwrap();
    /// assert_eq!(alignment.start(), 3);
    /// assert_eq!(alignment.segments().len(), 7);
    /// ```
    pub fn new(
        query_name: impl Into<String>,
        target_name: impl Into<String>,
        start: i64,
        cigar: &str,
        strand: Strand,
    ) -> Result<Self, CigarcoError> {
        let start = u64::try_from(start).map_err(|_| CigarcoError::InvalidStart { start })?;
        let segments = parse_cigar(cigar)?;

        // parse_cigar bounds the summed target length.
        let span: u64 = segments.iter().map(CigarSegment::target_len).sum();
        if start.checked_add(span).is_none() {
            return Err(CigarcoError::AlignmentEndOverflow { start, span });
        }

        Ok(Self {
            query_name: query_name.into(),
            target_name: target_name.into(),
            start,
            segments,
            strand,
        })
    }

    /// Shorthand for a forward-strand alignment.
    pub fn forward(
        query_name: impl Into<String>,
        target_name: impl Into<String>,
        start: i64,
        cigar: &str,
    ) -> Result<Self, CigarcoError> {
        Self::new(query_name, target_name, start, cigar, Strand::Forward)
    }

    /// Query (read) name.
    pub fn query_name(&self) -> &str {
        &self.query_name
    }

    /// Target (reference) name.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// 0-based target offset of the alignment.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Parsed CIGAR segments, in order.
    pub fn segments(&self) -> &[CigarSegment] {
        &self.segments
    }

    /// Strand of the query.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// True if the query was reverse-complemented before alignment.
    pub fn is_reverse(&self) -> bool {
        self.strand.is_reverse()
    }

    /// The CIGAR string in canonical form.
    pub fn cigar(&self) -> String {
        format_cigar(&self.segments)
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.query_name,
            self.target_name,
            self.start,
            self.cigar(),
            self.strand
        )
    }
}
