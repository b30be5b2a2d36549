//! Shared building blocks for the order-management workspace.

pub mod telemetry;
pub mod types;

pub use types::Money;
