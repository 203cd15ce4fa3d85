use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::{Arc, RwLock},
};

use thiserror::Error;

use crate::repository::{Repository, RepositoryItem};

/// A registry that contains the repositories registered by the embedding application
/// for the different item types the SDK persists.
pub struct StateRegistry {
    client_managed: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl std::fmt::Debug for StateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateRegistry").finish()
    }
}

/// Repository was looked up before the application registered it.
#[derive(Debug, Error)]
#[error("Repository for type {0} is not registered")]
pub struct RepositoryNotFoundError(pub &'static str);

impl StateRegistry {
    /// Creates a new empty `StateRegistry`.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        StateRegistry {
            client_managed: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a client-managed repository into the map, associating it with its type.
    pub fn register_client_managed<T: RepositoryItem>(&self, value: Arc<dyn Repository<T>>) {
        self.client_managed
            .write()
            .expect("RwLock should not be poisoned")
            .insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Retrieves a client-managed repository from the map given its type.
    pub fn get_client_managed<T: RepositoryItem>(&self) -> Option<Arc<dyn Repository<T>>> {
        self.client_managed
            .read()
            .expect("RwLock should not be poisoned")
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<Arc<dyn Repository<T>>>())
            .map(Arc::clone)
    }

    /// Retrieves a client-managed repository, failing if it was never registered.
    pub fn require_client_managed<T: RepositoryItem>(
        &self,
    ) -> Result<Arc<dyn Repository<T>>, RepositoryNotFoundError> {
        self.get_client_managed()
            .ok_or(RepositoryNotFoundError(T::NAME))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::{register_repository_item, repository::RepositoryError};

    #[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
    struct TestA(usize);
    #[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
    struct TestB(String);

    register_repository_item!(TestA, "TestA");
    register_repository_item!(TestB, "TestB");

    struct RepoA(TestA);

    #[async_trait::async_trait]
    impl Repository<TestA> for RepoA {
        async fn get(&self, _key: String) -> Result<Option<TestA>, RepositoryError> {
            Ok(Some(self.0.clone()))
        }
        async fn list(&self) -> Result<Vec<TestA>, RepositoryError> {
            unimplemented!()
        }
        async fn set(&self, _key: String, _value: TestA) -> Result<(), RepositoryError> {
            unimplemented!()
        }
        async fn remove(&self, _key: String) -> Result<(), RepositoryError> {
            unimplemented!()
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_registry_lookup() {
        let registry = StateRegistry::new();

        assert!(registry.get_client_managed::<TestA>().is_none());
        assert!(registry.require_client_managed::<TestB>().is_err());

        registry.register_client_managed(Arc::new(RepoA(TestA(42))) as Arc<dyn Repository<TestA>>);

        let repository = registry
            .get_client_managed::<TestA>()
            .expect("repository was just registered");
        assert_eq!(
            repository.get("any".to_owned()).await.expect("get succeeds"),
            Some(TestA(42))
        );

        // A registered TestA repository must not satisfy a TestB lookup.
        assert!(registry.get_client_managed::<TestB>().is_none());
    }
}
