//! Offer imports

pub mod errors;
pub mod outcome;
pub mod service;

pub use errors::ImportsServiceError;
pub use service::*;
