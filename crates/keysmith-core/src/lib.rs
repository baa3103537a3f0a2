//! Keysmith Core
//!
//! Error taxonomy and small shared guards used by every other crate.
//! This crate has minimal dependencies and performs no I/O.

pub mod error;
pub mod guard;

pub use error::{Error, Result};
pub use guard::check_public_key_length;
