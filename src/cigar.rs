//! CIGAR string parsing.
//!
//! A CIGAR string is decoded into an ordered list of [`CigarSegment`]s. Each
//! operation knows whether it consumes query bases, target bases, both or
//! neither (SAMv1 format, section 1.4.6).
//!
//! # Example
//!
//! ```
//! use cigarco::cigar::{parse_cigar, CigarOp};
//!
//! let segments = parse_cigar("8M7D6M").unwrap();
//! assert_eq!(segments.len(), 3);
//! assert_eq!(segments[1].op, CigarOp::Deletion);
//! assert_eq!(segments[1].len, 7);
//! ```

use std::fmt;

use crate::error::CigarcoError;

/// CIGAR operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CigarOp {
    /// Alignment match, sequence match or mismatch (M).
    Match,
    /// Insertion to the target (I).
    Insertion,
    /// Deletion from the target (D).
    Deletion,
    /// Skipped target region (N).
    Skip,
    /// Soft clipping (S).
    SoftClip,
    /// Hard clipping (H).
    HardClip,
    /// Padding (P).
    Pad,
    /// Sequence match (=).
    Equal,
    /// Sequence mismatch (X).
    Diff,
}

impl CigarOp {
    /// Decode a single operation letter.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'M' => Some(CigarOp::Match),
            'I' => Some(CigarOp::Insertion),
            'D' => Some(CigarOp::Deletion),
            'N' => Some(CigarOp::Skip),
            'S' => Some(CigarOp::SoftClip),
            'H' => Some(CigarOp::HardClip),
            'P' => Some(CigarOp::Pad),
            '=' => Some(CigarOp::Equal),
            'X' => Some(CigarOp::Diff),
            _ => None,
        }
    }

    /// The operation letter.
    pub fn as_char(&self) -> char {
        match self {
            CigarOp::Match => 'M',
            CigarOp::Insertion => 'I',
            CigarOp::Deletion => 'D',
            CigarOp::Skip => 'N',
            CigarOp::SoftClip => 'S',
            CigarOp::HardClip => 'H',
            CigarOp::Pad => 'P',
            CigarOp::Equal => '=',
            CigarOp::Diff => 'X',
        }
    }

    /// Whether the operation consumes query bases.
    #[inline]
    pub fn consumes_query(&self) -> bool {
        matches!(
            self,
            CigarOp::Match
                | CigarOp::Equal
                | CigarOp::Diff
                | CigarOp::Insertion
                | CigarOp::SoftClip
        )
    }

    /// Whether the operation consumes target bases.
    #[inline]
    pub fn consumes_target(&self) -> bool {
        matches!(
            self,
            CigarOp::Match | CigarOp::Equal | CigarOp::Diff | CigarOp::Deletion | CigarOp::Skip
        )
    }
}

impl fmt::Display for CigarOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One `(length, operation)` pair of a CIGAR string.
///
/// Zero-length segments are legal and consume nothing (e.g. `0M`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CigarSegment {
    /// Number of bases covered by the operation.
    pub len: u64,
    /// Operation kind.
    pub op: CigarOp,
}

impl CigarSegment {
    /// Create a new segment.
    pub fn new(len: u64, op: CigarOp) -> Self {
        Self { len, op }
    }

    /// Query bases consumed by this segment.
    #[inline]
    pub fn query_len(&self) -> u64 {
        if self.op.consumes_query() {
            self.len
        } else {
            0
        }
    }

    /// Target bases consumed by this segment.
    #[inline]
    pub fn target_len(&self) -> u64 {
        if self.op.consumes_target() {
            self.len
        } else {
            0
        }
    }

    /// True for a non-empty segment consuming both query and target.
    #[inline]
    pub fn is_aligned(&self) -> bool {
        self.len > 0 && self.op.consumes_query() && self.op.consumes_target()
    }
}

impl fmt::Display for CigarSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.len, self.op)
    }
}

/// Render segments back into a CIGAR string.
pub fn format_cigar(segments: &[CigarSegment]) -> String {
    segments.iter().map(|s| s.to_string()).collect()
}

/// Parse a CIGAR string into its segments.
///
/// The string must match `(digits op)+` where `op` is one of `MIDNSHP=X`.
/// Fails with [`CigarcoError::MalformedCigar`] on an empty string, a
/// character that is neither a digit nor an operation, an operation without a
/// length, or a trailing length without an operation. The summed query and
/// target lengths must each fit in a `u64`.
pub fn parse_cigar(cigar: &str) -> Result<Vec<CigarSegment>, CigarcoError> {
    if cigar.is_empty() {
        return Err(CigarcoError::malformed_cigar(cigar, 0, "empty CIGAR string"));
    }

    let mut segments = Vec::new();
    let mut len_start: Option<usize> = None;
    let (mut query_total, mut target_total) = (0u64, 0u64);

    for (pos, c) in cigar.char_indices() {
        if c.is_ascii_digit() {
            len_start.get_or_insert(pos);
            continue;
        }

        let op = CigarOp::from_char(c).ok_or_else(|| {
            CigarcoError::malformed_cigar(cigar, pos, format!("unexpected character '{}'", c))
        })?;

        let start = len_start.take().ok_or_else(|| {
            CigarcoError::malformed_cigar(
                cigar,
                pos,
                format!("operation '{}' has no length", c),
            )
        })?;

        let len = cigar[start..pos].parse::<u64>().map_err(|_| {
            CigarcoError::malformed_cigar(cigar, start, "operation length is too large")
        })?;

        let segment = CigarSegment::new(len, op);
        query_total = query_total.checked_add(segment.query_len()).ok_or_else(|| {
            CigarcoError::malformed_cigar(cigar, start, "total query length overflows")
        })?;
        target_total = target_total.checked_add(segment.target_len()).ok_or_else(|| {
            CigarcoError::malformed_cigar(cigar, start, "total target length overflows")
        })?;
        segments.push(segment);
    }

    if let Some(start) = len_start {
        return Err(CigarcoError::malformed_cigar(
            cigar,
            start,
            "length without a trailing operation",
        ));
    }

    Ok(segments)
}

/// Check whether a CIGAR string is structurally valid.
pub fn is_valid_cigar(cigar: &str) -> bool {
    parse_cigar(cigar).is_ok()
}
