use aws_config::BehaviorVersion;
use aws_sdk_ssm::{
    Client,
    config::Credentials,
    error::{DisplayErrorContext, SdkError},
    operation::put_parameter::PutParameterError,
    types::ParameterType,
};
use aws_types::region::Region;
use tracing::debug;

use crate::{
    configs::AwsConfig,
    store::repository::{ParameterStore, StoreError},
};

const CREDENTIALS_PROVIDER_NAME: &str = "env-file";

#[derive(Clone)]
pub struct SsmParameterStore {
    client: Client,
}

impl SsmParameterStore {
    pub async fn new(config: AwsConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region));

        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }

        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url.clone());
        }

        if let Some(credentials) = config.credentials {
            debug!(
                access_key_id = credentials.access_key_id.as_str(),
                "Using static credentials"
            );
            loader = loader.credentials_provider(Credentials::new(
                credentials.access_key_id,
                credentials.secret_access_key,
                credentials.session_token,
                None,
                CREDENTIALS_PROVIDER_NAME,
            ));
        }

        let shared_config = loader.load().await;
        let client = Client::new(&shared_config);

        Self::with_client(client)
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl std::fmt::Debug for SsmParameterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsmParameterStore")
            .field("region", &self.client.config().region())
            .finish()
    }
}

#[async_trait::async_trait]
impl ParameterStore for SsmParameterStore {
    async fn put_secure_parameter(&self, name: &str, value: &str) -> Result<(), StoreError> {
        debug!(name, "Putting SecureString parameter");

        self.client
            .put_parameter()
            .name(name)
            .value(value)
            .r#type(ParameterType::SecureString)
            .overwrite(true)
            .send()
            .await
            .map_err(put_error)?;

        Ok(())
    }
}

/// Service errors come back from SSM itself; everything else failed on the
/// way there.
fn put_error<R>(err: SdkError<PutParameterError, R>) -> StoreError
where
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    match err {
        SdkError::ServiceError(_) => StoreError::Rejected(message),
        _ => StoreError::RequestFailed(message),
    }
}
