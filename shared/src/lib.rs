//! Shared types and models for the StockFlow inventory platform
//!
//! This crate holds the domain models and the low-stock alert engine. It does
//! no I/O; the backend feeds it rows read from the database.

pub mod alerts;
pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
