//! Coordinate transformation through a single alignment.
//!
//! # Coordinate System
//!
//! | Direction | Input | Output |
//! |-----------|-------|--------|
//! | QT | 0-based query position, original read orientation | 0-based absolute target position |
//! | TQ | 0-based absolute target position | 0-based query position, original read orientation |
//!
//! Positions falling into bases present on one side only (insertions for QT,
//! deletions and skips for TQ) resolve to the last aligned base before them,
//! or to the start of the destination space if there is none.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::alignment::Alignment;
use crate::cache::{CacheStats, TransformCache};
use crate::cigar::CigarSegment;
use crate::error::CigarcoError;

use super::direction::{Direction, Space};
use super::index::PrefixIndex;

/// Counters describing the work a mapper has done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapperStats {
    /// Times the prefix index was built (0 or 1).
    pub index_builds: u64,
    /// Binary-search lookups performed (cache misses that passed validation).
    pub searches: u64,
    /// Result cache statistics.
    pub cache: CacheStats,
}

#[derive(Debug, Default)]
struct MapperState {
    index: Option<PrefixIndex>,
    cache: TransformCache,
    index_builds: u64,
    searches: u64,
}

impl MapperState {
    fn index(&mut self, segments: &[CigarSegment]) -> &PrefixIndex {
        if self.index.is_none() {
            self.index_builds += 1;
            debug!(segments = segments.len(), "building prefix index");
        }
        self.index.get_or_insert_with(|| PrefixIndex::build(segments))
    }
}

/// Transforms coordinates between the query and target of one alignment.
///
/// The prefix index is built on the first call to [`transform`](Self::transform)
/// and results are memoized per `(coordinate, direction)`. Both live behind a
/// single mutex, so a mapper can be shared between threads.
///
/// # Example
///
/// ```
/// use cigarco::alignment::Alignment;
/// use cigarco::mapping::{CoordinateMapper, Direction};
///
/// let alignment = Alignment::forward("TR1", "CHR1", 3, "8M7D6M2I2M11D7M").unwrap();
/// let mapper = CoordinateMapper::new(alignment);
/// assert_eq!(mapper.transform(4, Direction::QueryToTarget).unwrap(), 7);
/// assert_eq!(mapper.transform(13, Direction::QueryToTarget).unwrap(), 23);
/// assert_eq!(mapper.transform(40, Direction::TargetToQuery).unwrap(), 21);
/// ```
#[derive(Debug)]
pub struct CoordinateMapper {
    alignment: Arc<Alignment>,
    state: Mutex<MapperState>,
}

impl CoordinateMapper {
    /// Create a mapper with an unbounded result cache.
    pub fn new(alignment: impl Into<Arc<Alignment>>) -> Self {
        Self::with_cache(alignment, TransformCache::unbounded())
    }

    /// Create a mapper whose result cache keeps at most `capacity` entries.
    pub fn with_cache_capacity(alignment: impl Into<Arc<Alignment>>, capacity: usize) -> Self {
        Self::with_cache(alignment, TransformCache::with_capacity(capacity))
    }

    fn with_cache(alignment: impl Into<Arc<Alignment>>, cache: TransformCache) -> Self {
        Self {
            alignment: alignment.into(),
            state: Mutex::new(MapperState {
                cache,
                ..MapperState::default()
            }),
        }
    }

    /// The alignment this mapper transforms through.
    pub fn alignment(&self) -> &Arc<Alignment> {
        &self.alignment
    }

    /// Whether the prefix index has been built yet.
    pub fn is_indexed(&self) -> bool {
        self.lock().index.is_some()
    }

    /// Work counters and cache statistics.
    pub fn stats(&self) -> MapperStats {
        let state = self.lock();
        MapperStats {
            index_builds: state.index_builds,
            searches: state.searches,
            cache: state.cache.stats(),
        }
    }

    /// Length of the query in bases (builds the index if needed).
    pub fn query_len(&self) -> u64 {
        let mut guard = self.lock();
        guard.index(self.alignment.segments()).query_len()
    }

    /// Span of the alignment on the target (builds the index if needed).
    pub fn target_len(&self) -> u64 {
        let mut guard = self.lock();
        guard.index(self.alignment.segments()).target_len()
    }

    /// Transform `coordinate` in the given direction.
    ///
    /// QT accepts `0..=query_len`; TQ accepts `start..=start + target_len`.
    ///
    /// # Errors
    ///
    /// [`CigarcoError::CoordinateOutOfRange`] if `coordinate` lies outside
    /// the source space. For QT that is `[0, query_len]`. TQ coordinates are
    /// absolute target positions, so the valid range is
    /// `[start, start + target_len]` and any coordinate below `start` fails
    /// even when it is within `[0, target_len]`.
    ///
    /// [`CigarcoError::AlignmentEndOverflow`] if the alignment end does not
    /// fit in a `u64`. [`Alignment::new`] already rejects such alignments.
    pub fn transform(&self, coordinate: u64, direction: Direction) -> Result<u64, CigarcoError> {
        let mut guard = self.lock();
        let state = &mut *guard;

        let key = (coordinate, direction);
        if let Some(cached) = state.cache.get(&key) {
            return Ok(cached);
        }

        let index = state.index(self.alignment.segments());
        let result = match direction {
            Direction::QueryToTarget => self.query_to_target(index, coordinate)?,
            Direction::TargetToQuery => self.target_to_query(index, coordinate)?,
        };

        state.searches += 1;
        state.cache.insert(key, result);
        Ok(result)
    }

    /// Transform a coordinate with a textual direction token (`QT` or `TQ`).
    ///
    /// # Errors
    ///
    /// [`CigarcoError::UnsupportedDirection`] for any other token, otherwise
    /// as [`transform`](Self::transform).
    pub fn transform_token(&self, coordinate: u64, direction: &str) -> Result<u64, CigarcoError> {
        self.transform(coordinate, direction.parse()?)
    }

    fn query_to_target(&self, index: &PrefixIndex, coordinate: u64) -> Result<u64, CigarcoError> {
        let query_len = index.query_len();
        if coordinate > query_len {
            return Err(CigarcoError::CoordinateOutOfRange {
                coordinate,
                direction: Direction::QueryToTarget,
                min: 0,
                max: query_len,
            });
        }

        let effective = if self.alignment.is_reverse() {
            reflect(coordinate, query_len)
        } else {
            coordinate
        };

        let offset = self.project(index, effective, Space::Query);
        let start = self.alignment.start();
        start
            .checked_add(offset)
            .ok_or(CigarcoError::AlignmentEndOverflow { start, span: offset })
    }

    fn target_to_query(&self, index: &PrefixIndex, coordinate: u64) -> Result<u64, CigarcoError> {
        let start = self.alignment.start();
        let span = index.target_len();
        let end = start
            .checked_add(span)
            .ok_or(CigarcoError::AlignmentEndOverflow { start, span })?;
        if coordinate < start || coordinate > end {
            return Err(CigarcoError::CoordinateOutOfRange {
                coordinate,
                direction: Direction::TargetToQuery,
                min: start,
                max: end,
            });
        }

        let raw = self.project(index, coordinate - start, Space::Target);
        if self.alignment.is_reverse() {
            Ok(reflect(raw, index.query_len()))
        } else {
            Ok(raw)
        }
    }

    /// Map `consumed` bases of `source` onto the other space, relative to the
    /// alignment's origin in that space.
    fn project(&self, index: &PrefixIndex, consumed: u64, source: Space) -> u64 {
        let destination = source.other();
        let located = index.locate(consumed, source);
        let anchors = index.anchors(destination);

        match self.alignment.segments().get(located.segment) {
            // exclusive end: just past the last aligned block
            None => anchors[located.segment],
            Some(segment) if consumes(segment, destination) => {
                index.cumulative(destination)[located.segment] + located.offset
            }
            // present in the source only: last aligned base before it
            Some(_) => anchors[located.segment].saturating_sub(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MapperState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clone for CoordinateMapper {
    /// Clones share the alignment but start with a cold index and cache.
    fn clone(&self) -> Self {
        let capacity = self.lock().cache.stats().capacity;
        match capacity {
            Some(capacity) => Self::with_cache_capacity(Arc::clone(&self.alignment), capacity),
            None => Self::new(Arc::clone(&self.alignment)),
        }
    }
}

fn consumes(segment: &CigarSegment, space: Space) -> bool {
    match space {
        Space::Query => segment.op.consumes_query(),
        Space::Target => segment.op.consumes_target(),
    }
}

/// Reflect a query position between the original and the reverse-complemented
/// read. Base positions map `p -> len - 1 - p`; the exclusive end boundary
/// `len` maps to the start boundary `0`.
#[inline]
fn reflect(position: u64, len: u64) -> u64 {
    if position >= len {
        0
    } else {
        len - 1 - position
    }
}
