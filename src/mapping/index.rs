//! Prefix-sum index over CIGAR segments.
//!
//! For `n` segments the index holds, per space, `n + 1` cumulative counts:
//! entry `i` is the number of bases consumed by segments `[0..i)`. A
//! consumed-base count is mapped back to its owning segment by binary search.
//!
//! Alongside the cumulative counts the index keeps *anchor* arrays: entry `i`
//! is the cumulative count at the end of the last aligned (query- and
//! target-consuming, non-empty) segment before segment `i`. Anchors resolve
//! coordinates that fall into insertions or deletions in O(1).

use crate::cigar::CigarSegment;

use super::direction::Space;

/// Result of [`PrefixIndex::locate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located {
    /// Index of the owning segment; equals the segment count for the
    /// exclusive end of the space.
    pub segment: usize,
    /// Offset of the count within the segment.
    pub offset: u64,
}

/// Cumulative query/target consumption per segment boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixIndex {
    query_cum: Vec<u64>,
    target_cum: Vec<u64>,
    query_anchor: Vec<u64>,
    target_anchor: Vec<u64>,
}

impl PrefixIndex {
    /// Build the index in a single pass over `segments`.
    ///
    /// Counts saturate at `u64::MAX`. Segments parsed by
    /// [`parse_cigar`](crate::cigar::parse_cigar) never reach it.
    pub fn build(segments: &[CigarSegment]) -> Self {
        let n = segments.len() + 1;
        let mut query_cum = Vec::with_capacity(n);
        let mut target_cum = Vec::with_capacity(n);
        let mut query_anchor = Vec::with_capacity(n);
        let mut target_anchor = Vec::with_capacity(n);

        let (mut query, mut target) = (0u64, 0u64);
        let (mut last_query, mut last_target) = (0u64, 0u64);

        for segment in segments {
            query_cum.push(query);
            target_cum.push(target);
            query_anchor.push(last_query);
            target_anchor.push(last_target);

            query = query.saturating_add(segment.query_len());
            target = target.saturating_add(segment.target_len());
            if segment.is_aligned() {
                last_query = query;
                last_target = target;
            }
        }

        query_cum.push(query);
        target_cum.push(target);
        query_anchor.push(last_query);
        target_anchor.push(last_target);

        Self {
            query_cum,
            target_cum,
            query_anchor,
            target_anchor,
        }
    }

    /// Number of segments covered by the index.
    pub fn segment_count(&self) -> usize {
        self.query_cum.len() - 1
    }

    /// Cumulative counts for `space`.
    pub fn cumulative(&self, space: Space) -> &[u64] {
        match space {
            Space::Query => &self.query_cum,
            Space::Target => &self.target_cum,
        }
    }

    /// Anchor counts for `space`.
    pub fn anchors(&self, space: Space) -> &[u64] {
        match space {
            Space::Query => &self.query_anchor,
            Space::Target => &self.target_anchor,
        }
    }

    /// Total bases consumed in `space`.
    pub fn total(&self, space: Space) -> u64 {
        self.cumulative(space).last().copied().unwrap_or(0)
    }

    /// Total query length.
    pub fn query_len(&self) -> u64 {
        self.total(Space::Query)
    }

    /// Total target span.
    pub fn target_len(&self) -> u64 {
        self.total(Space::Target)
    }

    /// Find the segment owning `consumed` bases of `space`.
    ///
    /// Returns the greatest `i` with `cumulative[i] <= consumed`. Taking the
    /// last of several equal entries skips zero-length (and non-consuming)
    /// segments, so the offset lands in a segment that actually covers the
    /// position whenever one exists.
    pub fn locate(&self, consumed: u64, space: Space) -> Located {
        let cumulative = self.cumulative(space);
        // cumulative[0] == 0 so the partition point is at least 1
        let segment = cumulative.partition_point(|&v| v <= consumed) - 1;
        Located {
            segment,
            offset: consumed - cumulative[segment],
        }
    }
}
