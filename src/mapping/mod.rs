//! Coordinate transformation between query and target.
//!
//! # Overview
//!
//! A [`CoordinateMapper`] wraps one [`Alignment`](crate::alignment::Alignment)
//! and answers `transform(coordinate, direction)` requests. On first use it
//! builds a [`PrefixIndex`] of cumulative query/target consumption over the
//! CIGAR segments; each lookup is then a binary search, and results are
//! memoized per `(coordinate, direction)`.
//!
//! A [`MapperRegistry`] keeps one mapper per query name for batch use.
//!
//! # Example
//!
//! ```
//! use cigarco::alignment::{Alignment, Strand};
//! use cigarco::mapping::{CoordinateMapper, Direction};
//!
//! let alignment = Alignment::new("TR1", "CHR1", 3, "8M7D6M2I2M11D7M", Strand::Forward).unwrap();
//! let mapper = CoordinateMapper::new(alignment);
//!
//! let target = mapper.transform(13, Direction::QueryToTarget).unwrap();
//! assert_eq!(target, 23);
//! assert_eq!(mapper.transform(target, Direction::TargetToQuery).unwrap(), 13);
//! ```

pub mod direction;
pub mod index;
pub mod mapper;
pub mod registry;

pub use direction::{Direction, Space};
pub use index::{Located, PrefixIndex};
pub use mapper::{CoordinateMapper, MapperStats};
pub use registry::{MapperRegistry, TransformedCoordinate};
