//! Shared types and models for the VENUS inventory and order management
//! platform.
//!
//! This crate contains the domain entities, the stock-ledger arithmetic, and
//! the lifecycle state machines shared between the backend and other
//! components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
