//! Parallel processing support for cigarco
//!
//! This module provides parallel bulk transformation using rayon. All
//! workers share one [`CoordinateMapper`], so the index is built once and the
//! cache is shared. Enable with the `parallel` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use cigarco::alignment::Alignment;
//! use cigarco::mapping::{CoordinateMapper, Direction};
//! use cigarco::parallel::transform_parallel;
//!
//! let alignment = Alignment::forward("TR1", "CHR1", 3, "8M7D6M2I2M11D7M").unwrap();
//! let mapper = CoordinateMapper::new(alignment);
//!
//! let coords: Vec<u64> = (0..25).collect();
//! let targets = transform_parallel(&mapper, &coords, Direction::QueryToTarget);
//! assert!(targets.iter().all(|r| r.is_ok()));
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::error::CigarcoError;
use crate::mapping::{CoordinateMapper, Direction};

/// Transform many coordinates in parallel through one mapper
///
/// Returns a vector of results, one for each input coordinate.
/// Order is preserved.
pub fn transform_parallel(
    mapper: &CoordinateMapper,
    coordinates: &[u64],
    direction: Direction,
) -> Vec<Result<u64, CigarcoError>> {
    coordinates
        .par_iter()
        .map(|&c| mapper.transform(c, direction))
        .collect()
}

/// Transform many coordinates in parallel, filtering errors
///
/// Returns only successful results, in input order.
pub fn transform_parallel_ok(
    mapper: &CoordinateMapper,
    coordinates: &[u64],
    direction: Direction,
) -> Vec<u64> {
    coordinates
        .par_iter()
        .filter_map(|&c| mapper.transform(c, direction).ok())
        .collect()
}
