//! Bearer token verification ports.

pub mod bearer;
pub mod verifier;
