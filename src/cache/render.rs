//! Render cache - bounded LRU store of render artifacts.
//!
//! Holds at most `capacity` artifacts. Inserting a new key into a full store
//! evicts the least recently accessed entry first; `get` and `put` on an
//! existing key promote it to most recently used. Capacity is fixed at
//! construction.

use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::rc::Rc;

use lru::LruCache;

/// Capacity used when the adapter is built without explicit options.
pub const DEFAULT_RENDER_CACHE_CAPACITY: usize = 5000;

/// Shared handle to an LRU artifact store.
pub struct RenderCache<K: Hash + Eq, A> {
    inner: Rc<RefCell<LruCache<K, Rc<A>>>>,
}

impl<K: Hash + Eq, A> RenderCache<K, A> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LruCache::new(capacity))),
        }
    }

    /// Store holding [`DEFAULT_RENDER_CACHE_CAPACITY`] artifacts.
    pub fn with_default_capacity() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_RENDER_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }

    /// Look up an artifact and mark it most recently used.
    pub fn get(&self, key: &K) -> Option<Rc<A>> {
        self.inner.borrow_mut().get(key).cloned()
    }

    /// Look up an artifact without touching its recency.
    pub fn peek(&self, key: &K) -> Option<Rc<A>> {
        self.inner.borrow().peek(key).cloned()
    }

    /// Insert or replace an artifact, marking it most recently used.
    ///
    /// Returns the key that was evicted to make room, if any. Replacing an
    /// existing key never evicts.
    pub fn put(&self, key: K, artifact: Rc<A>) -> Option<K> {
        let mut store = self.inner.borrow_mut();
        let replacing = store.contains(&key);
        let displaced = store.push(key, artifact);
        if replacing {
            return None;
        }
        displaced.map(|(evicted, _)| {
            log::trace!("render cache at capacity {}, evicted least recently used artifact", store.cap());
            evicted
        })
    }

    /// Return the cached artifact for `key`, building and storing it on a miss.
    ///
    /// The lookup and the insert happen back to back, so recency order stays
    /// consistent. `build` runs without the store borrowed and may itself
    /// read the cache.
    pub fn get_or_insert_with(&self, key: K, build: impl FnOnce() -> A) -> Rc<A> {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let artifact = Rc::new(build());
        self.put(key, artifact.clone());
        artifact
    }

    /// Membership test that does not promote.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.borrow().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.inner.borrow().cap()
    }

    /// Whether both handles point at the same store.
    pub fn same_store(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<K: Hash + Eq, A> Clone for RenderCache<K, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K: Hash + Eq, A> Default for RenderCache<K, A> {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl<K: Hash + Eq, A> fmt::Debug for RenderCache<K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn cache(capacity: usize) -> RenderCache<&'static str, String> {
        RenderCache::new(NonZeroUsize::new(capacity).unwrap())
    }

    fn artifact(text: &str) -> Rc<String> {
        Rc::new(text.to_string())
    }

    #[test]
    fn test_get_protects_from_eviction() {
        let cache = cache(2);
        cache.put("A", artifact("a"));
        cache.put("B", artifact("b"));

        assert!(cache.get(&"A").is_some());
        let evicted = cache.put("C", artifact("c"));

        assert_eq!(evicted, Some("B"));
        assert!(cache.contains(&"A"));
        assert!(cache.contains(&"C"));
        assert!(!cache.contains(&"B"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_capacity_plus_one_evicts_oldest() {
        let cache = cache(3);
        for key in ["k1", "k2", "k3"] {
            assert_eq!(cache.put(key, artifact(key)), None);
        }

        assert_eq!(cache.put("k4", artifact("k4")), Some("k1"));
        assert_eq!(cache.len(), 3);
        assert!(cache.get(&"k1").is_none());
    }

    #[test]
    fn test_put_existing_key_refreshes() {
        let cache = cache(2);
        cache.put("A", artifact("a1"));
        cache.put("B", artifact("b"));

        // Replacing A does not evict and makes B the oldest
        assert_eq!(cache.put("A", artifact("a2")), None);
        assert_eq!(cache.put("C", artifact("c")), Some("B"));
        assert_eq!(cache.get(&"A").unwrap().as_str(), "a2");
    }

    #[test]
    fn test_peek_does_not_promote() {
        let cache = cache(2);
        cache.put("A", artifact("a"));
        cache.put("B", artifact("b"));

        assert!(cache.peek(&"A").is_some());
        assert_eq!(cache.put("C", artifact("c")), Some("A"));
    }

    #[test]
    fn test_get_or_insert_with_builds_once() {
        let cache = cache(4);
        let builds = Cell::new(0);

        let first = cache.get_or_insert_with("cell", || {
            builds.set(builds.get() + 1);
            "rendered".to_string()
        });
        let second = cache.get_or_insert_with("cell", || {
            builds.set(builds.get() + 1);
            "rebuilt".to_string()
        });

        assert_eq!(builds.get(), 1);
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_clones_share_store() {
        let cache = cache(2);
        let handle = cache.clone();
        handle.put("A", artifact("a"));

        assert!(cache.contains(&"A"));
        assert!(cache.same_store(&handle));
        assert!(!cache.same_store(&RenderCache::new(NonZeroUsize::new(2).unwrap())));
    }

    #[test]
    fn test_default_capacity() {
        let cache: RenderCache<u32, ()> = RenderCache::default();
        assert_eq!(cache.capacity().get(), DEFAULT_RENDER_CACHE_CAPACITY);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let cache: RenderCache<usize, usize> = RenderCache::new(NonZeroUsize::new(16).unwrap());
        for i in 0..1000 {
            cache.put(i, Rc::new(i));
            assert!(cache.len() <= 16);
        }
        // The last 16 keys survive
        assert!(cache.contains(&999));
        assert!(cache.contains(&984));
        assert!(!cache.contains(&983));
    }
}
