//! HTTP handlers for the StockFlow inventory service

mod alerts;
mod health;
mod products;

pub use alerts::*;
pub use health::*;
pub use products::*;
