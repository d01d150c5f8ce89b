//! Database models for the StockFlow inventory service
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
