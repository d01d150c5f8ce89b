//! Domain models for the StockFlow inventory platform

mod alert;
mod company;
mod inventory;
mod order;
mod product;
mod supplier;
mod threshold;

pub use alert::*;
pub use company::*;
pub use inventory::*;
pub use order::*;
pub use product::*;
pub use supplier::*;
pub use threshold::*;
