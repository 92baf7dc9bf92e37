//! Join-on-in-flight memoization
//!
//! A [`MemoTable`] maps a key to a shared future. The first caller for a key
//! builds the future; everyone else clones the handle and awaits the same
//! computation. Completed results (successes and failures alike) stay in the
//! table for the lifetime of the table.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use relget_errors::Error;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};

type SharedResult<V> = Shared<BoxFuture<'static, Result<V, Error>>>;

/// Per-key memoization of asynchronous computations
pub struct MemoTable<K, V>
where
    K: Eq + Hash,
{
    entries: DashMap<K, SharedResult<V>>,
    launched: AtomicUsize,
}

impl<K, V> MemoTable<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            launched: AtomicUsize::new(0),
        }
    }

    /// Return the memoized value for `key`, running `init` only if no
    /// computation for this key has been started yet.
    ///
    /// `init` is called while the table entry is locked, so it must only
    /// build the future and must not touch this table itself. The returned
    /// future is polled after the lock is released.
    ///
    /// # Errors
    ///
    /// Returns the error produced by the (single) underlying computation.
    /// Every caller for the same key observes the same error.
    pub async fn get_or_init<F, Fut>(&self, key: K, init: F) -> Result<V, Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, Error>> + Send + 'static,
    {
        let shared = match self.entries.entry(key) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                self.launched.fetch_add(1, Ordering::SeqCst);
                let fut = init().boxed().shared();
                entry.insert(fut.clone());
                fut
            }
        };

        shared.await
    }

    /// Completed value for `key`, if the computation already finished
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<Result<V, Error>> {
        self.entries.get(key).and_then(|entry| entry.peek().cloned())
    }

    /// Number of underlying computations started so far
    #[must_use]
    pub fn launched(&self) -> usize {
        self.launched.load(Ordering::SeqCst)
    }

    /// Number of keys with a started computation
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for MemoTable<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for MemoTable<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoTable")
            .field("entries", &self.entries.len())
            .field("launched", &self.launched.load(Ordering::SeqCst))
            .finish()
    }
}

/// Single-slot form of [`MemoTable`]
pub struct MemoCell<V> {
    table: MemoTable<(), V>,
}

impl<V> MemoCell<V>
where
    V: Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: MemoTable::new(),
        }
    }

    /// Return the memoized value, running `init` on first use only
    ///
    /// # Errors
    ///
    /// Returns the error produced by the underlying computation.
    pub async fn get_or_init<F, Fut>(&self, init: F) -> Result<V, Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, Error>> + Send + 'static,
    {
        self.table.get_or_init((), init).await
    }

    /// Completed value, if any
    #[must_use]
    pub fn peek(&self) -> Option<Result<V, Error>> {
        self.table.peek(&())
    }

    #[must_use]
    pub fn launched(&self) -> usize {
        self.table.launched()
    }
}

impl<V> Default for MemoCell<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for MemoCell<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCell")
            .field("launched", &self.table.launched.load(Ordering::SeqCst))
            .finish()
    }
}
