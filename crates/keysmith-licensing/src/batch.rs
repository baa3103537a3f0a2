//! Expansion of one license request into a full authorization batch.
//!
//! A batch is one primary record for the requested edition and version,
//! followed by auxiliary records for edition codes `0x40..=0xFF` and
//! `0x8000..=0x80FF`, all at version `0x10`. The order is fixed.

use crate::record::LicenseRecord;
use crate::serial::Serial;
use keysmith_core::{Error, Result};
use keysmith_dsa::{DsaPrivateKey, DsaPublicKey};
use rand::{CryptoRng, RngCore};
use std::ops::RangeInclusive;
use tracing::{info, trace};

/// Version code of every auxiliary record.
pub const AUXILIARY_VERSION: u32 = 0x10;

pub const AUXILIARY_EDITIONS_LOW: RangeInclusive<u32> = 0x40..=0xFF;

pub const AUXILIARY_EDITIONS_HIGH: RangeInclusive<u32> = 0x8000..=0x80FF;

/// Records in a complete batch: 1 primary, 192 low, 256 high.
pub const BATCH_SIZE: usize = 449;

/// Largest major version whose primary code `version << 4` fits in a `u32`.
pub const MAX_VERSION: u32 = u32::MAX >> 4;

/// The ordered `(edition, version)` pairs a batch signs.
pub fn batch_plan(edition: u32, version: u32) -> Result<impl Iterator<Item = (u32, u32)>> {
    if version > MAX_VERSION {
        return Err(Error::Validation(format!(
            "version {version} is out of range (at most {MAX_VERSION})"
        )));
    }
    Ok(std::iter::once((edition, version << 4))
        .chain(AUXILIARY_EDITIONS_LOW.map(|code| (code, AUXILIARY_VERSION)))
        .chain(AUXILIARY_EDITIONS_HIGH.map(|code| (code, AUXILIARY_VERSION))))
}

/// Build and sign every record for `hwid`.
///
/// Each record gets a fresh serial and a fresh signing nonce. The first
/// failure aborts the batch; no partial batch is returned.
pub fn build<R>(
    key: &DsaPrivateKey,
    hwid: &str,
    edition: u32,
    version: u32,
    rng: &mut R,
) -> Result<Vec<LicenseRecord>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut records = Vec::with_capacity(BATCH_SIZE);
    for (index, (code, record_version)) in batch_plan(edition, version)?.enumerate() {
        let serial = Serial::generate(rng);
        let record = LicenseRecord::sign(key, serial, code, record_version, hwid, rng)
            .map_err(|e| e.in_batch(index, code))?;
        trace!(index, edition = code, serial = %record.serial(), "Signed license record");
        records.push(record);
    }

    info!(
        hwid,
        edition,
        version,
        records = records.len(),
        "Built authorization batch"
    );
    Ok(records)
}

/// Check that every record's signature covers `hwid` under `key`.
pub fn verify_batch(records: &[LicenseRecord], key: &DsaPublicKey, hwid: &str) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        if !record.serial().is_valid() {
            return Err(Error::Validation(format!(
                "record {index} has an invalid serial {}",
                record.serial()
            )));
        }
        if !record.verify(key, hwid) {
            return Err(Error::Validation(format!(
                "record {index} (edition {:02X}) does not verify for {hwid}",
                record.edition()
            )));
        }
    }
    Ok(())
}
