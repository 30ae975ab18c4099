//! # gatehouse_core
//!
//! Core domain logic for Gatehouse: the persistent store adapter, the
//! remember-me token ledger, and the session bridge.

pub mod auth;
pub mod db;
pub mod migrate;
pub mod models;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
