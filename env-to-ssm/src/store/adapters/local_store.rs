use std::collections::HashSet;
use std::sync::{
    Arc, RwLock,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    configs::AwsConfig,
    store::{
        factory::ParameterStoreFactory,
        repository::{ParameterStore, StoreError},
    },
};

/// In-memory store that records every put request in order. Names registered
/// through [`LocalParameterStore::failing_on`] are rejected instead.
#[derive(Clone, Default)]
pub struct LocalParameterStore {
    requests: Arc<RwLock<Vec<(String, String)>>>,
    failing: Arc<HashSet<String>>,
    connections: Arc<AtomicUsize>,
}

impl LocalParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            failing: Arc::new(names.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Every attempted put, including rejected ones.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.read().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }

    /// How many times this store was handed out by the factory.
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ParameterStore for LocalParameterStore {
    async fn put_secure_parameter(&self, name: &str, value: &str) -> Result<(), StoreError> {
        self.requests
            .write()
            .unwrap()
            .push((name.to_string(), value.to_string()));

        if self.failing.contains(name) {
            return Err(StoreError::Rejected(format!(
                "AccessDeniedException: not authorized to put {}",
                name
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ParameterStoreFactory for LocalParameterStore {
    async fn create(&self, _config: &AwsConfig) -> anyhow::Result<Arc<dyn ParameterStore>> {
        self.connections.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_requests_in_order() {
        let store = LocalParameterStore::new();
        store.put_secure_parameter("/app/A", "1").await.unwrap();
        store.put_secure_parameter("/app/B", "2").await.unwrap();

        assert_eq!(
            store.requests(),
            vec![
                ("/app/A".to_string(), "1".to_string()),
                ("/app/B".to_string(), "2".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_failing_names_are_rejected_but_recorded() {
        let store = LocalParameterStore::failing_on(["/app/B"]);
        assert!(store.put_secure_parameter("/app/A", "1").await.is_ok());

        let err = store.put_secure_parameter("/app/B", "2").await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
        assert_eq!(store.request_count(), 2);
    }

    #[tokio::test]
    async fn test_factory_shares_recorded_requests() {
        let store = LocalParameterStore::new();
        let config = AwsConfig {
            region: "us-east-1".to_string(),
            profile: None,
            endpoint_url: None,
            credentials: None,
        };

        let created = store.create(&config).await.unwrap();
        created.put_secure_parameter("/app/A", "1").await.unwrap();

        assert_eq!(store.connections(), 1);
        assert_eq!(store.request_count(), 1);
    }
}
