//! Cryptographic functions for moneyplan
//!
//! Argon2id password hashing for the sign-up/sign-in flow. Budget data
//! itself is stored unencrypted.

pub mod password;

pub use password::{hash_password, verify_password};
