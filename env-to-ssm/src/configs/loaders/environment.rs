use std::env;

use crate::{env_file::EnvMapping, error::SyncError};

/// Reads a variable from the process environment, treating blank as unset.
pub fn process_env(env_name: &str) -> Option<String> {
    env::var(env_name).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Ambient,
    File,
}

/// Variable lookup over two layers: the ambient environment first, then the
/// parsed `.env` file. An ambient value is never overridden by the file.
pub struct LayeredEnv<'a, F>
where
    F: Fn(&str) -> Option<String>,
{
    ambient: F,
    file: &'a EnvMapping,
}

impl<'a, F> LayeredEnv<'a, F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(ambient: F, file: &'a EnvMapping) -> Self {
        Self { ambient, file }
    }

    /// Lookup restricted to one layer. Blank values count as unset.
    pub fn layer_env(&self, layer: Layer, env_name: &str) -> Option<String> {
        let value = match layer {
            Layer::Ambient => (self.ambient)(env_name),
            Layer::File => self.file.get(env_name).map(str::to_string),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    pub fn optional_env(&self, env_name: &str) -> Option<String> {
        self.layer_env(Layer::Ambient, env_name)
            .or_else(|| self.layer_env(Layer::File, env_name))
    }

    pub fn required_env(&self, env_name: &str) -> Result<String, SyncError> {
        self.optional_env(env_name)
            .ok_or_else(|| SyncError::MissingConfiguration(env_name.to_string()))
    }

    pub fn env_or(&self, env_name: &str, default: &str) -> String {
        self.optional_env(env_name)
            .unwrap_or_else(|| default.to_string())
    }
}
