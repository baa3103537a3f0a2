//! Self-checking serial numbers.
//!
//! A serial is five 16-bit payload groups followed by a 16-bit checksum,
//! rendered as `GGGG-GGGG-GGGG-GGGG-GGGG-CCCC`. The low nibble of every
//! payload group is derived from the group's upper bits and its position.
//! The final group is a CRC-16 (polynomial 0x8005) over the payload.

use keysmith_core::{Error, Result};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Number of payload groups.
pub const PAYLOAD_GROUPS: usize = 5;

const CRC_POLYNOMIAL: u32 = 0x8005;

/// Checksum nibble for a group value at a 0-based position.
pub fn group_checksum(index: usize, n: u16) -> u16 {
    ((n >> 4) & 0xF) ^ ((n >> 5) & 0x8) ^ ((n >> 9) & 0x7) ^ ((n >> 11) & 0xE) ^ ((n >> 15) & 0x1)
        ^ (index as u16 & 0xF)
}

/// Replace the low nibble of `n` with its checksum nibble.
pub fn fix_group_checksum(index: usize, n: u16) -> u16 {
    (n & 0xFFF0) | group_checksum(index, n)
}

/// Running checksum over the payload, four bytes per group, low byte first.
pub fn overall_checksum(groups: &[u16; PAYLOAD_GROUPS]) -> u16 {
    let mut acc: u32 = 0;
    for &group in groups {
        // the upper two bytes of each 4-byte slot are always zero
        let bytes = [group as u8, (group >> 8) as u8, 0, 0];
        for byte in bytes {
            acc ^= u32::from(byte) << 8;
            for _ in 0..8 {
                acc <<= 1;
                if acc & 0x1_0000 != 0 {
                    acc ^= CRC_POLYNOMIAL;
                }
            }
            acc &= 0xFFFF;
        }
    }
    acc as u16
}

/// A generated serial number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Serial {
    groups: [u16; PAYLOAD_GROUPS],
    checksum: u16,
}

impl Serial {
    /// Draw a fresh serial. The first group falls in `0x3000..=0x3FFF`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let raw = [
            rng.gen_range(0x3000..=0x3FFF),
            rng.gen_range(0..=u16::MAX),
            rng.gen_range(0..=u16::MAX),
            rng.gen_range(0..=u16::MAX),
            rng.gen_range(0..=u16::MAX),
        ];
        Self::from_raw_groups(raw)
    }

    /// Build a serial from raw payload values, fixing every group's checksum
    /// nibble and computing the final checksum.
    pub fn from_raw_groups(raw: [u16; PAYLOAD_GROUPS]) -> Self {
        let mut groups = raw;
        for (index, group) in groups.iter_mut().enumerate() {
            *group = fix_group_checksum(index, *group);
        }
        Self {
            groups,
            checksum: overall_checksum(&groups),
        }
    }

    pub fn groups(&self) -> &[u16; PAYLOAD_GROUPS] {
        &self.groups
    }

    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    /// True when every group nibble and the final checksum are correct.
    pub fn is_valid(&self) -> bool {
        self.groups
            .iter()
            .enumerate()
            .all(|(index, &group)| fix_group_checksum(index, group) == group)
            && overall_checksum(&self.groups) == self.checksum
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.groups;
        write!(
            f,
            "{a:04X}-{b:04X}-{c:04X}-{d:04X}-{e:04X}-{:04X}",
            self.checksum
        )
    }
}

impl FromStr for Serial {
    type Err = Error;

    /// Parse and validate a rendered serial.
    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split('-').collect();
        if fields.len() != PAYLOAD_GROUPS + 1 {
            return Err(Error::Decode(format!(
                "serial must have {} groups, got {}",
                PAYLOAD_GROUPS + 1,
                fields.len()
            )));
        }

        let mut values = [0u16; PAYLOAD_GROUPS + 1];
        for (value, field) in values.iter_mut().zip(&fields) {
            if field.len() != 4 || !field.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(Error::Decode(format!("invalid serial group {field:?}")));
            }
            *value = u16::from_str_radix(field, 16)
                .map_err(|e| Error::Decode(format!("invalid serial group {field:?}: {e}")))?;
        }

        let serial = Self {
            groups: [values[0], values[1], values[2], values[3], values[4]],
            checksum: values[5],
        };
        if !serial.is_valid() {
            return Err(Error::Validation(format!("serial {s} fails its checksum")));
        }
        Ok(serial)
    }
}
