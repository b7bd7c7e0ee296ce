pub mod app;
pub mod cli;
pub mod configs;
pub mod env_file;
pub mod error;
pub mod store;
pub mod uploader;
