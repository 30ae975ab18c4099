//! Domain models.

pub mod identity;

pub use identity::{Identity, Provider};
