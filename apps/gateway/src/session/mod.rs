//! Session transport and lifecycle: the cookie carrying the token, the
//! identity seam for login, and issuance/validation/invalidation.

pub mod cookie;
pub mod identity;
pub mod lifecycle;
