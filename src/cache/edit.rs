//! Edit cache - unbounded store of edit artifacts.
//!
//! An entry lives until the same key is written again. There is no capacity
//! and no eviction.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

/// Shared handle to an exact-key artifact store.
pub struct EditCache<K: Hash + Eq, A> {
    inner: Rc<RefCell<HashMap<K, Rc<A>>>>,
}

impl<K: Hash + Eq, A> EditCache<K, A> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn get(&self, key: &K) -> Option<Rc<A>> {
        self.inner.borrow().get(key).cloned()
    }

    /// Insert or overwrite, returning the artifact previously stored for `key`.
    pub fn put(&self, key: K, artifact: Rc<A>) -> Option<Rc<A>> {
        self.inner.borrow_mut().insert(key, artifact)
    }

    /// Return the stored artifact for `key`, building it on a miss.
    pub fn get_or_insert_with(&self, key: K, build: impl FnOnce() -> A) -> Rc<A> {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let artifact = Rc::new(build());
        self.put(key, artifact.clone());
        artifact
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn same_store(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<K: Hash + Eq, A> Clone for EditCache<K, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K: Hash + Eq, A> Default for EditCache<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, A> fmt::Debug for EditCache<K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditCache").field("len", &self.len()).finish()
    }
}
