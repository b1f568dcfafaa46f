//! Domain tree container.
//!
//! Owns the root node and the reader/writer lock that guards every
//! operation on it.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

use crate::node::Node;

/// Default key separator.
pub const DEFAULT_SEPARATOR: &str = ".";

/// A concurrency-safe trie mapping domain-like keys to values.
///
/// Keys are split on the separator and stored right to left, so
/// `www.example.com` descends `com` -> `example` -> `www`: the most general
/// component sits nearest the root, the most specific one deepest. Two
/// wildcard labels participate in lookup:
///
/// - `*` matches exactly one segment at its depth, then keeps matching deeper
/// - `**` matches its segment and unconditionally everything below it
///
/// Lookup precedence at every depth is exact > `*` > `**`.
///
/// All traffic goes through one reader/writer lock owned by the tree: loads
/// run in parallel with each other, a store excludes everything for its
/// duration. There is no delete; the tree grows monotonically and values are
/// overwritten in place. Construct one tree per logical routing table rather
/// than sharing a global instance.
pub struct DomainTree<V> {
    root: RwLock<Node<V>>,
    sep: String,
}

impl<V> DomainTree<V> {
    /// Create an empty tree with the given separator.
    ///
    /// Any separator works; one that never appears in keys simply makes
    /// every key a single segment.
    pub fn new(sep: impl Into<String>) -> Self {
        Self {
            root: RwLock::new(Node::new()),
            sep: sep.into(),
        }
    }

    /// The separator keys are split on.
    pub fn separator(&self) -> &str {
        &self.sep
    }

    /// Store `value` under `key`, overwriting any previous value.
    ///
    /// One trailing separator is stripped before splitting; an empty key (or
    /// a key that is nothing but the separator) is a no-op. Never fails.
    ///
    /// Takes the write lock for the duration of the insertion.
    pub fn store(&self, key: &str, value: V)
    where
        V: Clone,
    {
        let segments = split_segments(key, &self.sep);
        if segments.is_empty() {
            return;
        }
        self.root.write().insert(&segments, value);
        trace!(key, "stored domain entry");
    }

    /// Look up the best match for `key`.
    ///
    /// Returns `None` when no exact, `*`, or `**` path covers the key at any
    /// depth. The value is cloned out from under the read lock; use
    /// [`DomainTree::read`] to borrow instead.
    pub fn load(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let segments = split_segments(key, &self.sep);
        self.root.read().lookup(&segments).cloned()
    }

    /// Take the read lock once for a batch of lookups.
    ///
    /// Concurrent loads through other guards or [`DomainTree::load`] proceed
    /// in parallel; stores block until the guard is dropped.
    pub fn read(&self) -> DomainTreeReadGuard<'_, V> {
        DomainTreeReadGuard {
            node: self.root.read(),
            sep: &self.sep,
        }
    }

    /// Take the write lock once for a batch of operations.
    ///
    /// Everything else blocks until the guard is dropped, so a batch of
    /// stores becomes atomic with respect to concurrent loads.
    pub fn write(&self) -> DomainTreeWriteGuard<'_, V> {
        DomainTreeWriteGuard {
            node: self.root.write(),
            sep: &self.sep,
        }
    }

    /// Store every `(key, value)` pair inside one write acquisition.
    pub fn extend<K, I>(&self, entries: I)
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
        V: Clone,
    {
        let mut guard = self.write();
        for (key, value) in entries {
            guard.store(key.as_ref(), value);
        }
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        let root = self.root.read();
        root.children.is_empty() && root.value.is_none()
    }

    /// Number of value-bearing nodes.
    ///
    /// Walks the whole tree, so this is O(n). A wildcard entry also marks
    /// its parent node and counts there as well.
    pub fn len(&self) -> usize {
        self.root.read().count_values()
    }
}

impl<V> Default for DomainTree<V> {
    /// An empty tree splitting on `"."`.
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

impl<V> std::fmt::Debug for DomainTree<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainTree")
            .field("sep", &self.sep)
            .finish_non_exhaustive()
    }
}

/// Shared-access guard over a [`DomainTree`].
///
/// Holds the tree's read lock for its whole lifetime, so a batch of lookups
/// pays one lock acquisition instead of one per call.
pub struct DomainTreeReadGuard<'a, V> {
    node: RwLockReadGuard<'a, Node<V>>,
    sep: &'a str,
}

impl<V> DomainTreeReadGuard<'_, V> {
    /// Same matching algorithm as [`DomainTree::load`], borrowing the value.
    pub fn load(&self, key: &str) -> Option<&V> {
        let segments = split_segments(key, self.sep);
        self.node.lookup(&segments)
    }
}

/// Exclusive-access guard over a [`DomainTree`].
///
/// Holds the tree's write lock for its whole lifetime; typically used to
/// load many entries as one atomic batch.
pub struct DomainTreeWriteGuard<'a, V> {
    node: RwLockWriteGuard<'a, Node<V>>,
    sep: &'a str,
}

impl<V> DomainTreeWriteGuard<'_, V> {
    /// Same insertion algorithm as [`DomainTree::store`].
    pub fn store(&mut self, key: &str, value: V)
    where
        V: Clone,
    {
        let segments = split_segments(key, self.sep);
        if segments.is_empty() {
            return;
        }
        self.node.insert(&segments, value);
        trace!(key, "stored domain entry");
    }

    /// Look up under the already-held write lock.
    pub fn load(&self, key: &str) -> Option<&V> {
        let segments = split_segments(key, self.sep);
        self.node.lookup(&segments)
    }
}

/// Split a key into its segments, dropping one trailing separator first.
///
/// An empty key, or a key that is nothing but the trailing separator,
/// yields no segments.
fn split_segments<'k>(key: &'k str, sep: &str) -> Vec<&'k str> {
    let key = key.strip_suffix(sep).unwrap_or(key);
    if key.is_empty() {
        return Vec::new();
    }
    key.split(sep).collect()
}
