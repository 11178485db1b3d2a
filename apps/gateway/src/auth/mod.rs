//! Session token issuance and verification.

pub mod claims;
pub mod error;
pub mod jwt;
