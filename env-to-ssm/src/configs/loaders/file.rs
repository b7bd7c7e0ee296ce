use std::{fs, path::Path};

use crate::error::SyncError;

pub fn load(path: &Path) -> Result<String, SyncError> {
    fs::read_to_string(path).map_err(|source| SyncError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}
