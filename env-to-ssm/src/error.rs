use std::{fmt, path::PathBuf};

/// Fatal failures that abort a run before or outside the upload loop.
#[derive(Debug)]
pub enum SyncError {
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    MissingConfiguration(String),
    UploadsFailed {
        failed: usize,
    },
    Unhandled(anyhow::Error),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileRead { path, source } => {
                write!(f, "Error loading .env file from {}: {}", path.display(), source)
            }
            Self::MissingConfiguration(key) => {
                write!(f, "Error: {key} environment variable is required")
            }
            Self::UploadsFailed { failed } => {
                write!(f, "Error: {failed} parameter(s) failed to upload")
            }
            Self::Unhandled(err) => write!(f, "Fatal error: {err:#}"),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileRead { source, .. } => Some(source),
            Self::MissingConfiguration(_) | Self::UploadsFailed { .. } => None,
            Self::Unhandled(err) => Some(&**err),
        }
    }
}

impl From<anyhow::Error> for SyncError {
    fn from(err: anyhow::Error) -> Self {
        Self::Unhandled(err)
    }
}
