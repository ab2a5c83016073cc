//! Outbound adapters implementing the driven ports.
//!
//! - **memory**: process-local store for development and tests
//! - **persistence**: PostgreSQL via Diesel
//! - **security**: Argon2id hashing and HS256 tokens

pub mod memory;
pub mod persistence;
pub mod security;
