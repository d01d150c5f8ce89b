//! Business logic services for the StockFlow inventory service

pub mod alerts;
pub mod products;

pub use alerts::AlertService;
pub use products::ProductService;
