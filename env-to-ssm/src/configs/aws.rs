use std::fmt;

use super::Configs;
use super::loaders::environment::{Layer, LayeredEnv};
use crate::error::SyncError;

pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_PROFILE: &str = "AWS_PROFILE";
pub const AWS_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "** redacted **"),
            )
            .finish()
    }
}

/// Connection settings handed to the SSM client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsConfig {
    pub region: String,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
    /// Only set when both the key id and the secret are resolved. Otherwise
    /// the SDK default credential chain applies.
    pub credentials: Option<StaticCredentials>,
}

impl Configs for AwsConfig {
    fn load<F>(env: &LayeredEnv<'_, F>) -> Result<Self, SyncError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // The key id, secret and token must come from the same layer.
        let credentials = [Layer::Ambient, Layer::File].into_iter().find_map(|layer| {
            Some(StaticCredentials {
                access_key_id: env.layer_env(layer, AWS_ACCESS_KEY_ID)?,
                secret_access_key: env.layer_env(layer, AWS_SECRET_ACCESS_KEY)?,
                session_token: env.layer_env(layer, AWS_SESSION_TOKEN),
            })
        });

        Ok(AwsConfig {
            region: env.env_or(AWS_REGION, DEFAULT_REGION),
            profile: env.optional_env(AWS_PROFILE),
            endpoint_url: env.optional_env(AWS_ENDPOINT_URL),
            credentials,
        })
    }
}
