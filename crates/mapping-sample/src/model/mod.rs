//! Domain models. These are the *source* side of every mapping in the sample.

pub mod customer;
pub mod order;
pub mod product;

pub use customer::*;
pub use order::*;
pub use product::*;
