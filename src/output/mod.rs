//! Output module
//!
//! Writes Singer messages as JSON lines.
//!
//! # Overview
//!
//! The engine hands every message to a [`MessageSink`]. The binary uses a
//! [`JsonLinesWriter`] over stdout; tests collect into a `Vec<Message>`.

mod writer;

pub use writer::{JsonLinesWriter, MessageSink, OutputFormat};

#[cfg(test)]
mod tests;
