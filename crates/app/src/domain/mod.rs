//! Offerdesk Domain Concerns

pub mod config;
pub mod imports;
pub mod offers;
