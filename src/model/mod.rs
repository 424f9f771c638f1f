//! Pure data structures (DTOs) stored in the ledger collections.

pub mod order;
pub mod product;

pub use order::*;
pub use product::*;
