//! Response decoder module
//!
//! Parses JSON response bodies and extracts the records of a page using the
//! stream's record path.

mod decoders;
mod types;

pub use decoders::{find_matches, JsonDecoder};
pub use types::RecordDecoder;

#[cfg(test)]
mod tests;
