//! Credential handling

mod password;

pub use password::{hash_password, normalize_email, verify_password};
