//! Offerdesk
//!
//! Offerdesk ingests mobile bundle offers from CSV: it parses uploads, normalises and validates
//! every row, tracks the import through persistence, and renders offers back to CSV or JSON.

pub mod config;
pub mod export;
pub mod normalize;
pub mod offers;
pub mod parser;
pub mod pipeline;
pub mod prelude;
pub mod stats;
pub mod validate;
pub mod view;
