pub mod aws;
pub mod loaders;

pub use aws::{AwsConfig, StaticCredentials};

use crate::error::SyncError;
use loaders::environment::LayeredEnv;

pub const AWS_SSM_PATH: &str = "AWS_SSM_PATH";

/// Keys starting with this prefix configure the tool and are never uploaded.
pub const RESERVED_KEY_PREFIX: &str = "AWS_";

pub trait Configs: Sized {
    fn load<F>(env: &LayeredEnv<'_, F>) -> Result<Self, SyncError>
    where
        F: Fn(&str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Namespace prefix every uploaded key is nested under.
    pub ssm_path: String,
    pub aws: AwsConfig,
}

impl SyncConfig {
    pub fn parameter_name(&self, key: &str) -> String {
        format!("{}/{}", self.ssm_path, key)
    }
}

impl Configs for SyncConfig {
    fn load<F>(env: &LayeredEnv<'_, F>) -> Result<Self, SyncError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            ssm_path: env.required_env(AWS_SSM_PATH)?,
            aws: AwsConfig::load(env)?,
        })
    }
}
