//! Mapper bookkeeping for many alignments keyed by query name.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::alignment::Alignment;
use crate::error::CigarcoError;

use super::direction::Direction;
use super::mapper::CoordinateMapper;

/// A transformed coordinate and the sequence it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformedCoordinate {
    /// Sequence of the result: the target for QT, the query for TQ.
    pub seq_name: String,
    /// Transformed 0-based coordinate.
    pub coordinate: u64,
}

/// One [`CoordinateMapper`] per query name; the last alignment added wins.
#[derive(Debug, Default)]
pub struct MapperRegistry {
    mappers: BTreeMap<String, CoordinateMapper>,
    cache_capacity: Option<usize>,
}

impl MapperRegistry {
    /// Create an empty registry with unbounded per-mapper caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry whose mappers use LRU caches of `capacity`.
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            mappers: BTreeMap::new(),
            cache_capacity: Some(capacity),
        }
    }

    /// Register an alignment under its query name.
    ///
    /// Replaces any previous alignment for the same query name. Re-adding an
    /// identical alignment keeps the existing mapper and its warm cache.
    pub fn add_alignment(&mut self, alignment: Alignment) {
        if let Some(existing) = self.mappers.get(alignment.query_name()) {
            if **existing.alignment() == alignment {
                return;
            }
            debug!(
                query = alignment.query_name(),
                "replacing alignment for repeated query name"
            );
        }

        let name = alignment.query_name().to_string();
        let mapper = match self.cache_capacity {
            Some(capacity) => CoordinateMapper::with_cache_capacity(alignment, capacity),
            None => CoordinateMapper::new(alignment),
        };
        self.mappers.insert(name, mapper);
    }

    /// Look up the mapper for a query name.
    pub fn get(&self, query_name: &str) -> Option<&CoordinateMapper> {
        self.mappers.get(query_name)
    }

    /// Transform a coordinate through the alignment registered for `query_name`.
    ///
    /// # Errors
    ///
    /// [`CigarcoError::UnknownSequence`] if no alignment is registered,
    /// otherwise as [`CoordinateMapper::transform`].
    pub fn transform(
        &self,
        query_name: &str,
        coordinate: u64,
        direction: Direction,
    ) -> Result<TransformedCoordinate, CigarcoError> {
        let mapper = self
            .get(query_name)
            .ok_or_else(|| CigarcoError::UnknownSequence {
                name: query_name.to_string(),
            })?;

        let coordinate = mapper.transform(coordinate, direction)?;
        let alignment = mapper.alignment();
        let seq_name = match direction {
            Direction::QueryToTarget => alignment.target_name(),
            Direction::TargetToQuery => alignment.query_name(),
        };

        Ok(TransformedCoordinate {
            seq_name: seq_name.to_string(),
            coordinate,
        })
    }

    /// Registered query names, in sorted order.
    pub fn query_names(&self) -> impl Iterator<Item = &str> {
        self.mappers.keys().map(|s| s.as_str())
    }

    /// Number of registered alignments.
    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    /// True if no alignment is registered.
    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alignment(query: &str, start: i64, cigar: &str) -> Alignment {
        Alignment::forward(query, "CHR1", start, cigar).unwrap()
    }

    #[test]
    fn test_add_and_transform() {
        let mut registry = MapperRegistry::new();
        registry.add_alignment(alignment("TR1", 3, "8M7D6M2I2M11D7M"));
        registry.add_alignment(Alignment::forward("TR2", "CHR2", 10, "20M").unwrap());
        assert_eq!(registry.len(), 2);

        let result = registry
            .transform("TR1", 4, Direction::QueryToTarget)
            .unwrap();
        assert_eq!(
            result,
            TransformedCoordinate {
                seq_name: "CHR1".to_string(),
                coordinate: 7
            }
        );

        let result = registry
            .transform("TR2", 10, Direction::QueryToTarget)
            .unwrap();
        assert_eq!(result.seq_name, "CHR2");
        assert_eq!(result.coordinate, 20);
    }

    #[test]
    fn test_tq_reports_query_name() {
        let mut registry = MapperRegistry::new();
        registry.add_alignment(alignment("TR1", 3, "8M7D6M2I2M11D7M"));
        let result = registry
            .transform("TR1", 40, Direction::TargetToQuery)
            .unwrap();
        assert_eq!(result.seq_name, "TR1");
        assert_eq!(result.coordinate, 21);
    }

    #[test]
    fn test_unknown_sequence() {
        let registry = MapperRegistry::new();
        let err = registry
            .transform("TR1t", 0, Direction::QueryToTarget)
            .unwrap_err();
        assert_eq!(
            err,
            CigarcoError::UnknownSequence {
                name: "TR1t".to_string()
            }
        );
    }

    #[test]
    fn test_last_alignment_wins() {
        let mut registry = MapperRegistry::new();
        registry.add_alignment(alignment("TR1", 3, "20M"));
        registry.add_alignment(alignment("TR1", 100, "20M"));
        assert_eq!(registry.len(), 1);
        let result = registry
            .transform("TR1", 0, Direction::QueryToTarget)
            .unwrap();
        assert_eq!(result.coordinate, 100);
    }

    #[test]
    fn test_identical_alignment_keeps_warm_mapper() {
        let mut registry = MapperRegistry::new();
        registry.add_alignment(alignment("TR1", 3, "20M"));
        registry
            .transform("TR1", 5, Direction::QueryToTarget)
            .unwrap();
        assert!(registry.get("TR1").unwrap().is_indexed());

        registry.add_alignment(alignment("TR1", 3, "20M"));
        let mapper = registry.get("TR1").unwrap();
        assert!(mapper.is_indexed());
        assert_eq!(mapper.stats().cache.size, 1);
    }

    #[test]
    fn test_query_names_sorted() {
        let mut registry = MapperRegistry::with_cache_capacity(16);
        registry.add_alignment(alignment("b", 0, "1M"));
        registry.add_alignment(alignment("a", 0, "1M"));
        assert_eq!(registry.query_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(
            registry.get("a").unwrap().stats().cache.capacity,
            Some(16)
        );
    }
}
