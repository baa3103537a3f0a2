//! Pre-flight checks run before key material is handed to external tools.

use crate::{Error, Result};

/// Ensure a freshly encoded public key has the same textual length as the
/// key it is meant to stand in for.
///
/// A replacement of a different length can never be substituted in place,
/// so callers check this before doing anything with the candidate.
pub fn check_public_key_length(candidate: &str, original: &str) -> Result<()> {
    if candidate.len() != original.len() {
        return Err(Error::Validation(format!(
            "key length mismatch: {} vs {}",
            candidate.len(),
            original.len()
        )));
    }
    Ok(())
}
