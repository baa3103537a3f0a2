//! Error types for Keysmith.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Key material errors
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Key size error: private exponent is {bits} bits, at most {max} allowed")]
    KeySize { bits: u64, max: u64 },

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    // Signing errors
    #[error("Sign error: {0}")]
    Sign(String),

    #[error("License generation failed at record {index} (edition {edition:02X}): {source}")]
    Batch {
        index: usize,
        edition: u32,
        #[source]
        source: Box<Error>,
    },

    // Pre-flight errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    // Infrastructure errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl Error {
    /// Wrap a per-record failure with its position in a batch.
    pub fn in_batch(self, index: usize, edition: u32) -> Self {
        Error::Batch {
            index,
            edition,
            source: Box::new(self),
        }
    }
}
