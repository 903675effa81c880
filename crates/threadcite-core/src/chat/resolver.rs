//! Source resolution: file id -> human-readable file name.
//!
//! Lookups go through a [`FileNameCache`] so each file id costs at most one
//! remote metadata call for as long as the cache lives. The cache is an
//! injectable port; [`InMemoryFileNameCache`] is the default implementation.

use dashmap::DashMap;
use threadcite_types::error::AssistantError;
use tracing::debug;

use crate::assistant::client::AssistantClient;

/// Append-only mapping from file id to display name.
pub trait FileNameCache: Send + Sync {
    fn get(&self, file_id: &str) -> Option<String>;

    fn insert(&self, file_id: &str, file_name: &str);

    /// Drop every entry (used when the owning session is reset).
    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Concurrent in-memory cache backed by a `DashMap`.
#[derive(Debug, Default)]
pub struct InMemoryFileNameCache {
    entries: DashMap<String, String>,
}

impl InMemoryFileNameCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileNameCache for InMemoryFileNameCache {
    fn get(&self, file_id: &str) -> Option<String> {
        self.entries.get(file_id).map(|entry| entry.value().clone())
    }

    fn insert(&self, file_id: &str, file_name: &str) {
        self.entries
            .entry(file_id.to_string())
            .or_insert_with(|| file_name.to_string());
    }

    fn clear(&self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Resolves cited file ids to display names, memoized in a [`FileNameCache`].
pub struct SourceResolver<K: FileNameCache> {
    cache: K,
}

impl<K: FileNameCache> SourceResolver<K> {
    pub fn new(cache: K) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &K {
        &self.cache
    }

    /// Return the display name for `file_id`, fetching and caching it on first use.
    ///
    /// When the file metadata has no file name, the id itself is used (and
    /// cached). A failed lookup is returned as an error and nothing is cached.
    pub async fn resolve_file_name<C: AssistantClient>(
        &self,
        client: &C,
        file_id: &str,
    ) -> Result<String, AssistantError> {
        if let Some(name) = self.cache.get(file_id) {
            debug!(file.id = %file_id, "File name cache hit");
            return Ok(name);
        }

        let file = client.retrieve_file(file_id).await?;
        let name = file
            .filename
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| file_id.to_string());

        debug!(file.id = %file_id, file.name = %name, "File name cache miss, stored");
        self.cache.insert(file_id, &name);
        Ok(name)
    }

    /// Forget every resolved name.
    pub fn clear(&self) {
        self.cache.clear();
    }
}
