//! Store configuration

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::ConfigServiceError;
pub use service::*;
