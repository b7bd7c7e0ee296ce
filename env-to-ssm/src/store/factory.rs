use std::sync::Arc;

use crate::{
    configs::AwsConfig,
    store::{adapters::ssm_store::SsmParameterStore, repository::ParameterStore},
};

/// Builds the store client once configuration is known to be valid. Errors
/// are fatal for the run.
#[async_trait::async_trait]
pub trait ParameterStoreFactory: Send + Sync {
    async fn create(&self, config: &AwsConfig) -> anyhow::Result<Arc<dyn ParameterStore>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SsmStoreFactory;

#[async_trait::async_trait]
impl ParameterStoreFactory for SsmStoreFactory {
    async fn create(&self, config: &AwsConfig) -> anyhow::Result<Arc<dyn ParameterStore>> {
        Ok(Arc::new(SsmParameterStore::new(config.clone()).await))
    }
}
