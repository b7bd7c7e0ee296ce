pub mod adapters;
pub mod factory;
pub mod repository;

pub use repository::{ParameterStore, StoreError};
