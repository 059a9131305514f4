//! Style caching for performance.

use std::collections::HashMap;
use std::sync::Arc;

use crate::dom::NodeId;
use crate::style::ComputedStyle;

/// Bounded cache of computed styles, keyed by node.
///
/// Any change that can affect matching or inheritance (stylesheet
/// replacement, attribute or class edits) must clear the whole cache, since
/// descendants inherit from cached ancestors.
pub struct StyleCache {
    /// Cached computed styles.
    cache: HashMap<NodeId, Arc<ComputedStyle>>,
    /// Maximum cache entries.
    max_size: usize,
}

impl StyleCache {
    /// Create a new style cache.
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create a cache with specific capacity.
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            cache: HashMap::with_capacity(max_size.min(1024)),
            max_size: max_size.max(1),
        }
    }

    /// Get a cached style.
    pub fn get(&self, node: NodeId) -> Option<Arc<ComputedStyle>> {
        self.cache.get(&node).cloned()
    }

    /// Insert a computed style into the cache.
    pub fn insert(&mut self, node: NodeId, style: Arc<ComputedStyle>) {
        // Simple eviction: clear half when full
        if self.cache.len() >= self.max_size {
            self.evict_half();
        }
        self.cache.insert(node, style);
    }

    /// Invalidate all cached styles.
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }

    /// Get the number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn evict_half(&mut self) {
        let target = self.cache.len().div_ceil(2);
        let keys: Vec<_> = self.cache.keys().take(target).copied().collect();
        for key in keys {
            self.cache.remove(&key);
        }
    }
}

impl Default for StyleCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::resolve::{CascadedValues, ResolveContext, resolve_properties};

    fn style() -> Arc<ComputedStyle> {
        Arc::new(resolve_properties(
            &CascadedValues::new(),
            None,
            &ResolveContext::root(16.0),
        ))
    }

    fn nodes(count: usize) -> Vec<NodeId> {
        let mut doc = Document::new();
        (0..count).map(|_| doc.create_element("div")).collect()
    }

    #[test]
    fn cache_basic_operations() {
        let mut cache = StyleCache::new();
        let node = nodes(1)[0];

        assert!(cache.get(node).is_none());

        cache.insert(node, style());
        assert!(cache.get(node).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_invalidate_all() {
        let mut cache = StyleCache::new();
        for node in nodes(10) {
            cache.insert(node, style());
        }

        assert!(!cache.is_empty());
        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_evicts_when_full() {
        let mut cache = StyleCache::with_capacity(4);
        for node in nodes(5) {
            cache.insert(node, style());
        }

        assert!(cache.len() <= 4);
        assert!(!cache.is_empty());
    }
}
