use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    RequestFailed(String),
    Rejected(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            Self::Rejected(msg) => write!(f, "Rejected by parameter store: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Remote parameter store that accepts encrypted string parameters.
#[async_trait::async_trait]
pub trait ParameterStore: Send + Sync {
    /// Creates or overwrites `name` as an encrypted (`SecureString`) parameter.
    async fn put_secure_parameter(&self, name: &str, value: &str) -> Result<(), StoreError>;
}
