//! Signed license records.
//!
//! A record is rendered as `SERIAL,EE,VV,Standard,TRAILER`. The same
//! template is rendered twice: once with the hardware id as the trailer to
//! produce the signed message, and once with the signature as the trailer to
//! produce the emitted line. Both renderings must be byte-identical apart
//! from the trailer.

use crate::serial::Serial;
use keysmith_core::{Error, Result};
use keysmith_dsa::{DsaPrivateKey, DsaPublicKey, SIGNATURE_HEX_LEN};
use rand::{CryptoRng, RngCore};
use std::fmt;
use std::str::FromStr;

/// License tier field. Always this literal.
pub const LICENSE_TIER: &str = "Standard";

/// Render the record template with the given trailer.
pub fn render_template(serial: &Serial, edition: u32, version: u32, trailer: &str) -> String {
    format!("{serial},{edition:02X},{version:02X},{LICENSE_TIER},{trailer}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseRecord {
    serial: Serial,
    edition: u32,
    version: u32,
    signature: String,
}

impl LicenseRecord {
    /// Sign the template bound to `hwid` and keep the signature as trailer.
    pub fn sign<R>(
        key: &DsaPrivateKey,
        serial: Serial,
        edition: u32,
        version: u32,
        hwid: &str,
        rng: &mut R,
    ) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let message = render_template(&serial, edition, version, hwid);
        let signature = keysmith_dsa::sign(key, &message, rng)?;
        Ok(Self {
            serial,
            edition,
            version,
            signature,
        })
    }

    pub fn serial(&self) -> &Serial {
        &self.serial
    }

    pub fn edition(&self) -> u32 {
        self.edition
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The message this record's signature covers for a hardware id.
    pub fn signed_message(&self, hwid: &str) -> String {
        render_template(&self.serial, self.edition, self.version, hwid)
    }

    /// Check the signature against a public key and hardware id.
    pub fn verify(&self, key: &DsaPublicKey, hwid: &str) -> bool {
        keysmith_dsa::verify(key, &self.signed_message(hwid), &self.signature)
    }
}

impl fmt::Display for LicenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_template(
            &self.serial,
            self.edition,
            self.version,
            &self.signature,
        ))
    }
}

impl FromStr for LicenseRecord {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        let [serial, edition, version, tier, signature] = fields[..] else {
            return Err(Error::Decode(format!(
                "license record must have 5 fields, got {}",
                fields.len()
            )));
        };

        if tier != LICENSE_TIER {
            return Err(Error::Decode(format!("unexpected license tier {tier:?}")));
        }
        if signature.len() != SIGNATURE_HEX_LEN
            || !signature
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        {
            return Err(Error::Decode(format!(
                "signature must be {SIGNATURE_HEX_LEN} uppercase hex digits"
            )));
        }

        Ok(Self {
            serial: serial.parse()?,
            edition: parse_code(edition)?,
            version: parse_code(version)?,
            signature: signature.to_string(),
        })
    }
}

fn parse_code(field: &str) -> Result<u32> {
    if field.len() < 2 || !field.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::Decode(format!("invalid code field {field:?}")));
    }
    u32::from_str_radix(field, 16)
        .map_err(|e| Error::Decode(format!("invalid code field {field:?}: {e}")))
}
