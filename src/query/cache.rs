use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use super::statement::{InsertStatement, UpdateStatement};

/// Statements keyed by the column selection they were built for.
///
/// Lookups only take the read lock. A statement is added once it has been executed successfully,
/// so concurrent misses may build the same statement twice but only the first one is kept.
pub struct QueryCache<T> {
    entries: RwLock<HashMap<String, Arc<T>>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> QueryCache<T> {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn insert(&self, key: String, statement: Arc<T>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(statement);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the statement stored under `key`, or build a new one. A new statement is only stored
    /// once [`CachedStatement::commit`] is called.
    ///
    /// # Errors
    ///
    /// Whatever `build` fails with.
    pub fn get_or_build<E>(
        &self,
        key: String,
        build: impl FnOnce() -> Result<T, E>,
    ) -> Result<CachedStatement<'_, T>, E> {
        if let Some(statement) = self.get(&key) {
            return Ok(CachedStatement {
                cache: self,
                key: None,
                statement,
            });
        }

        Ok(CachedStatement {
            cache: self,
            key: Some(key),
            statement: Arc::new(build()?),
        })
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// A statement handed out by [`QueryCache::get_or_build`].
pub struct CachedStatement<'a, T> {
    cache: &'a QueryCache<T>,
    key: Option<String>,
    statement: Arc<T>,
}

impl<T> CachedStatement<'_, T> {
    #[must_use]
    pub fn statement(&self) -> &T {
        &self.statement
    }

    /// Whether the statement came out of the cache.
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        self.key.is_none()
    }

    /// Store a newly built statement. Dropping it instead leaves the cache untouched.
    pub fn commit(self) {
        if let Some(key) = self.key {
            self.cache.insert(key, self.statement);
        }
    }
}

/// Per-table statement caches, one per write operation.
#[derive(Default)]
pub struct StatementCache {
    pub insert: QueryCache<InsertStatement>,
    pub update: QueryCache<UpdateStatement>,
    pub upsert: QueryCache<InsertStatement>,
}

#[cfg(test)]
mod test {
    use std::{sync::Arc, thread};

    use super::QueryCache;

    #[test]
    fn test_get_and_insert() {
        let cache = QueryCache::<String>::default();
        assert!(cache.get("name.").is_none());

        cache.insert("name.".to_string(), Arc::new("first".to_string()));
        assert_eq!(cache.get("name.").as_deref().map(String::as_str), Some("first"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = QueryCache::<String>::default();

        cache.insert("k".to_string(), Arc::new("first".to_string()));
        cache.insert("k".to_string(), Arc::new("second".to_string()));

        assert_eq!(cache.get("k").as_deref().map(String::as_str), Some("first"));
    }

    #[test]
    fn test_uncommitted_statement_is_not_kept() {
        let cache = QueryCache::<String>::default();

        let statement = cache
            .get_or_build("k".to_string(), || Ok::<_, ()>("first".to_string()))
            .expect("statement");
        assert!(!statement.is_cached());
        assert_eq!(statement.statement(), "first");
        drop(statement);
        assert!(cache.is_empty());

        cache
            .get_or_build("k".to_string(), || Ok::<_, ()>("second".to_string()))
            .expect("statement")
            .commit();
        assert_eq!(cache.get("k").as_deref().map(String::as_str), Some("second"));

        let statement = cache
            .get_or_build("k".to_string(), || Err(()))
            .expect("cached statement");
        assert!(statement.is_cached());
        assert_eq!(statement.statement(), "second");
        statement.commit();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_build_is_not_kept() {
        let cache = QueryCache::<String>::default();

        assert!(
            cache
                .get_or_build("k".to_string(), || Err::<String, _>("no columns"))
                .is_err()
        );
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(QueryCache::<usize>::default());

        let handles = (0..8)
            .map(|i| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for j in 0..100 {
                        cache.insert(format!("{}", j % 10), Arc::new(i));
                        assert!(cache.get(&format!("{}", j % 10)).is_some());
                    }
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            handle.join().expect("worker panicked");
        }

        assert_eq!(cache.len(), 10);

        cache.clear();
        assert!(cache.is_empty());
    }
}
