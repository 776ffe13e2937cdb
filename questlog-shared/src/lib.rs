//! # Questlog Shared Library
//!
//! This crate contains the types, database layer, and business rules used by
//! the questlog API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Password hashing and session tokens
//! - `db`: Connection pool and migrations
//! - `leveling`: XP and level progression rules

pub mod auth;
pub mod db;
pub mod leveling;
pub mod models;

/// Current version of the questlog shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
