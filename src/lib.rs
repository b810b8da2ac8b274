// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! cigarco: CIGAR coordinate mapper
//!
//! Transforms positions between a query sequence and the target it was
//! aligned to, using the alignment's CIGAR string.
//!
//! # Example
//!
//! ```
//! use cigarco::{Alignment, CoordinateMapper, Direction};
//!
//! // TR1 aligned to CHR1 starting at position 3
//! let alignment = Alignment::forward("TR1", "CHR1", 3, "8M7D6M2I2M11D7M").unwrap();
//! let mapper = CoordinateMapper::new(alignment);
//!
//! assert_eq!(mapper.transform(4, Direction::QueryToTarget).unwrap(), 7);
//! assert_eq!(mapper.transform(13, Direction::QueryToTarget).unwrap(), 23);
//! assert_eq!(mapper.transform(40, Direction::TargetToQuery).unwrap(), 21);
//! ```

pub mod alignment;
pub mod batch;
pub mod cache;
pub mod cigar;
pub mod cli;
pub mod config;
pub mod error;
pub mod mapping;
#[cfg(feature = "parallel")]
pub mod parallel;

// Re-export commonly used types
pub use alignment::{Alignment, Strand};
pub use cigar::{parse_cigar, CigarOp, CigarSegment};
pub use error::CigarcoError;
pub use mapping::{CoordinateMapper, Direction, MapperRegistry, TransformedCoordinate};

/// Result type alias for cigarco operations
pub type Result<T> = std::result::Result<T, CigarcoError>;
