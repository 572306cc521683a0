use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use flowdiff_types::VersionId;

use crate::comparator::Comparison;

type PairKey = (VersionId, VersionId);

/// Memoized comparisons keyed by `(base, compare)` version id.
///
/// Versions are immutable, so entries never need invalidation. The pair is
/// ordered: `(a, b)` and `(b, a)` are distinct entries.
#[derive(Default)]
pub struct ComparisonCache {
    entries: RwLock<HashMap<PairKey, Arc<Comparison>>>,
}

impl ComparisonCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a memoized comparison.
    pub fn get(&self, base: &VersionId, compare: &VersionId) -> Option<Arc<Comparison>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&(base.clone(), compare.clone())).cloned()
    }

    /// Store a comparison and return the cached entry.
    ///
    /// If another caller stored the same pair first, that entry wins and is
    /// returned instead.
    pub fn insert(
        &self,
        base: VersionId,
        compare: VersionId,
        comparison: Comparison,
    ) -> Arc<Comparison> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries
            .entry((base, compare))
            .or_insert_with(|| Arc::new(comparison))
            .clone()
    }

    /// Returns `true` if the pair has been memoized.
    pub fn contains(&self, base: &VersionId, compare: &VersionId) -> bool {
        self.get(base, compare).is_some()
    }

    /// Number of memoized pairs.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every memoized comparison.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl std::fmt::Debug for ComparisonCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonCache")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdiff_diff::DiffOptions;
    use flowdiff_types::WorkflowDefinition;

    fn comparison() -> Comparison {
        let def = WorkflowDefinition::default();
        Comparison::from_definitions(&DiffOptions::default(), &def, &def, "1", "2").unwrap()
    }

    #[test]
    fn insert_then_get() {
        let cache = ComparisonCache::new();
        let (a, b) = (VersionId::new(), VersionId::new());

        assert!(cache.get(&a, &b).is_none());
        cache.insert(a.clone(), b.clone(), comparison());

        assert!(cache.contains(&a, &b));
        assert!(!cache.contains(&b, &a));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn first_insert_wins() {
        let cache = ComparisonCache::new();
        let (a, b) = (VersionId::new(), VersionId::new());

        let first = cache.insert(a.clone(), b.clone(), comparison());
        let second = cache.insert(a, b, comparison());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn clear_empties() {
        let cache = ComparisonCache::new();
        cache.insert(VersionId::new(), VersionId::new(), comparison());
        cache.clear();
        assert!(cache.is_empty());
    }
}
