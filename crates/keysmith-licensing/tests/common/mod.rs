//! Shared fixtures for licensing tests.

#![allow(dead_code)]

use keysmith_dsa::DsaPrivateKey;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A 1024/160 key pair with a full-length public value, as stored in config.
pub const FIXTURE_PRIVATE_HEX: &str = concat!(
    "308201BB02010002818100F52346906A1AC57D52CFCAE1B02BF066D3DFB9127BF22F2203C6D623752192E528",
    "38C94D18A1BD029511329DC7DFD48477DFCDC8DD7F7B2F8F165968645F3FAE0911BED0C3ECE9B49C9FC37C03",
    "3422C8BB45093722987FE7E431B8169D2055412EAFCAF8E3B9EA85DE11DC2E9535A4B4AFA286313F84908D90",
    "0553204E33AA2D021500A304173D450CC8735BADC1E636CDF480BC5EF2B3028180631DEFD5DCD2C018D95947",
    "332BB24FB7A32D8B7916FC83955B43731D431164E1C758CEEAE7043A4428C8C36BAF47B0BEAD2D5B0D8679EC",
    "DAC1DDD6C9C482AFE92A5FBA0BDA6E7D6E901459CDB576499D15329CDA3270CA2FBB2CC08A9501B556E95080",
    "B35952405505DD9730F0B9BE986E6D369D19E3714AADF318F8D5A9FB8202818100E516A077097739F7E83A3B",
    "6CE4B1D04EAADD1B5A2C1BD94CEEAE7EF1975F46B9593F62D677D68A9B57F020BA23F3A45E7A3410C1B4254D",
    "A6CD5B451BA373EB76EF1F965772C980CF94F191E7F96E598BD120D88C8781B2B94CECDB450962693E1F7C13",
    "D3BFDC045F5AE003C861FDDFC8244AD8D4B1F7E0A1DDAA1D4B3A54F825021431CB5B706E87D9D3F8DFC29761",
    "3A6E90A3DCEB3B",
);

pub const HWID: &str = "ABC123";

pub fn fixture_key() -> DsaPrivateKey {
    DsaPrivateKey::from_hex(FIXTURE_PRIVATE_HEX).expect("fixture key decodes")
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
