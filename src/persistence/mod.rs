//! Save/load persistence with integrity verification
//!
//! Features:
//! - Versioned JSON envelope
//! - BLAKE3 integrity digest
//! - Corruption detection (callers refuse corrupt data instead of defaulting)

pub mod envelope;

pub use envelope::{EnvelopeError, FORMAT_VERSION, open, seal};
