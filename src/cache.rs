//! Project-scoped restriction cache.
//!
//! Holds the restriction map of the active project behind a single shared
//! reference. A refresh builds the complete replacement map first and swaps
//! it in as the last step, so readers only ever observe a fully consistent
//! map. There is no eviction; invalidation is external and explicit
//! (project change, rename events).

use crate::model::{Restriction, RestrictionMap};
use chrono::{DateTime, Utc};
use oxigraph::model::NamedNode;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct RestrictionCache {
    map: RwLock<Arc<RestrictionMap>>,
    /// Count of successful refreshes since construction.
    generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    last_refresh: RwLock<Option<DateTime<Utc>>>,
}

impl RestrictionCache {
    pub fn new() -> Self {
        Self {
            map: RwLock::new(Arc::new(RestrictionMap::new())),
            generation: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            last_refresh: RwLock::new(None),
        }
    }

    /// Replace the whole map. Overlapping refreshes resolve to last write
    /// wins; intermediate states are never observable.
    pub fn replace(&self, map: RestrictionMap) {
        let map = Arc::new(map);
        *self.map.write() = map;
        self.generation.fetch_add(1, Ordering::Relaxed);
        *self.last_refresh.write() = Some(Utc::now());
    }

    /// Drop all entries, e.g. when the active project changes. Counters and
    /// generation are kept; the next refresh repopulates the map.
    pub fn clear(&self) {
        *self.map.write() = Arc::new(RestrictionMap::new());
    }

    /// Current map as a shared snapshot.
    pub fn snapshot(&self) -> Arc<RestrictionMap> {
        self.map.read().clone()
    }

    pub fn get(&self, datatype: &NamedNode) -> Option<Restriction> {
        let map = self.map.read();
        match map.get(datatype) {
            Some(restriction) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(restriction.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn contains(&self, datatype: &NamedNode) -> bool {
        self.map.read().contains_key(datatype)
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.len(),
            generation: self.generation(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            last_refresh: *self.last_refresh.read(),
        }
    }
}

impl Default for RestrictionCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics snapshot.
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub size: usize,
    pub generation: u64,
    pub hits: u64,
    pub misses: u64,
    pub last_refresh: Option<DateTime<Utc>>,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConstrainingFacets, FacetsRestriction};
    use crate::xsd;

    fn sample_map() -> RestrictionMap {
        let mut map = RestrictionMap::new();
        map.insert(
            NamedNode::new("http://example.org/dt/percentage").unwrap(),
            Restriction::Facets(FacetsRestriction {
                base: xsd::xsd("integer"),
                facets: ConstrainingFacets {
                    min_inclusive: Some(0.0),
                    max_inclusive: Some(100.0),
                    ..Default::default()
                },
            }),
        );
        map
    }

    #[test]
    fn test_replace_and_get() {
        let cache = RestrictionCache::new();
        let datatype = NamedNode::new("http://example.org/dt/percentage").unwrap();
        assert!(cache.get(&datatype).is_none());
        assert_eq!(cache.generation(), 0);

        cache.replace(sample_map());
        assert!(cache.get(&datatype).is_some());
        assert_eq!(cache.generation(), 1);

        let stats = cache.stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
        assert!(stats.last_refresh.is_some());
    }

    #[test]
    fn test_clear_empties_but_keeps_generation() {
        let cache = RestrictionCache::new();
        cache.replace(sample_map());
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.generation(), 1);
    }

    #[test]
    fn test_snapshot_is_stable_across_replace() {
        let cache = RestrictionCache::new();
        cache.replace(sample_map());
        let snapshot = cache.snapshot();
        cache.replace(RestrictionMap::new());
        assert_eq!(snapshot.len(), 1);
        assert!(cache.is_empty());
    }
}
