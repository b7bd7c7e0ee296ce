use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    configs::{RESERVED_KEY_PREFIX, SyncConfig},
    env_file::EnvMapping,
    store::{ParameterStore, StoreError},
};

/// Decides which entries of a mapping are eligible for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    reserved_prefix: &'static str,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            reserved_prefix: RESERVED_KEY_PREFIX,
        }
    }
}

impl UploadPolicy {
    pub fn is_reserved(&self, key: &str) -> bool {
        key.starts_with(self.reserved_prefix)
    }

    pub fn should_upload(&self, key: &str, value: &str) -> bool {
        !self.is_reserved(key) && !value.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded { key: String, name: String },
    Failed { key: String, error: StoreError },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub uploaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl UploadSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    fn record(&mut self, outcome: &UploadOutcome) {
        match outcome {
            UploadOutcome::Uploaded { .. } => self.uploaded += 1,
            UploadOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

pub struct Uploader {
    store: Arc<dyn ParameterStore>,
    config: SyncConfig,
    policy: UploadPolicy,
}

impl Uploader {
    pub fn new(store: Arc<dyn ParameterStore>, config: &SyncConfig) -> Self {
        Self {
            store,
            config: config.clone(),
            policy: UploadPolicy::default(),
        }
    }

    /// Uploads eligible entries one at a time, in mapping order. A failed key
    /// is reported and the loop moves on.
    pub async fn upload_all(&self, mapping: &EnvMapping) -> UploadSummary {
        let mut summary = UploadSummary::default();

        for (key, value) in mapping.iter() {
            if !self.policy.should_upload(key, value) {
                debug!(key, "Skipping reserved or empty entry");
                summary.skipped += 1;
                continue;
            }

            let outcome = self.upload(key, value).await;
            report(&outcome);
            summary.record(&outcome);
        }

        summary
    }

    pub async fn upload(&self, key: &str, value: &str) -> UploadOutcome {
        let name = self.config.parameter_name(key);

        match self.store.put_secure_parameter(&name, value).await {
            Ok(()) => UploadOutcome::Uploaded {
                key: key.to_string(),
                name,
            },
            Err(error) => {
                warn!(key, name = name.as_str(), %error, "Parameter upload failed");
                UploadOutcome::Failed {
                    key: key.to_string(),
                    error,
                }
            }
        }
    }
}

fn report(outcome: &UploadOutcome) {
    match outcome {
        UploadOutcome::Uploaded { key, name } => {
            println!("✅ Successfully uploaded {key} to SSM at {name}");
        }
        UploadOutcome::Failed { key, error } => {
            eprintln!("❌ Error uploading {key} to SSM: {error}");
        }
    }
}
