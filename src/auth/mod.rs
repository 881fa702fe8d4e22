//! Authentication module
//!
//! EasyEcom issues short-lived JWTs from a username/password login. The
//! `TokenManager` caches the current credential, logs in again shortly
//! before it expires, and persists every new credential to the config
//! store so the next run can reuse it.

mod manager;
mod types;

pub use manager::TokenManager;
pub use types::{Credential, EXPIRY_MARGIN_SECS};

#[cfg(test)]
mod tests;
