//! Product editions and their license codes.

use keysmith_core::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edition {
    Suite,
    Standard,
    Intro,
    Lite,
}

impl Edition {
    pub const ALL: [Edition; 4] = [
        Edition::Suite,
        Edition::Standard,
        Edition::Intro,
        Edition::Lite,
    ];

    /// Edition code embedded in the primary license record.
    pub fn code(self) -> u32 {
        match self {
            Self::Suite => 0x02,
            Self::Standard => 0x00,
            Self::Intro => 0x03,
            Self::Lite => 0x04,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Suite => "Suite",
            Self::Standard => "Standard",
            Self::Intro => "Intro",
            Self::Lite => "Lite",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Edition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|edition| edition.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Validation(format!("unknown edition: {s}")))
    }
}
