use std::{collections::HashMap, sync::Mutex};

use corpus_state::repository::{Repository, RepositoryError, RepositoryItem};

/// An in-memory repository, for tests that need to observe what the SDK
/// persists.
#[derive(Debug)]
pub struct MemoryRepository<V> {
    store: Mutex<HashMap<String, V>>,
}

impl<V> Default for MemoryRepository<V> {
    fn default() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl<V: RepositoryItem + Clone> Repository<V> for MemoryRepository<V> {
    async fn get(&self, key: String) -> Result<Option<V>, RepositoryError> {
        Ok(self
            .store
            .lock()
            .expect("Mutex is not poisoned")
            .get(&key)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<V>, RepositoryError> {
        Ok(self
            .store
            .lock()
            .expect("Mutex is not poisoned")
            .values()
            .cloned()
            .collect())
    }

    async fn set(&self, key: String, value: V) -> Result<(), RepositoryError> {
        self.store
            .lock()
            .expect("Mutex is not poisoned")
            .insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: String) -> Result<(), RepositoryError> {
        self.store
            .lock()
            .expect("Mutex is not poisoned")
            .remove(&key);
        Ok(())
    }
}
