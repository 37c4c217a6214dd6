//! Domain models for the VENUS platform

mod customer;
mod item;
mod order;
mod quotation;
mod user;
mod warehouse;

pub use customer::*;
pub use item::*;
pub use order::*;
pub use quotation::*;
pub use user::*;
pub use warehouse::*;
