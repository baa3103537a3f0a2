mod common;

use common::{HWID, fixture_key, seeded_rng};
use keysmith_core::Error;
use keysmith_dsa::{DsaPrivateKey, SIGNATURE_HEX_LEN};
use keysmith_licensing::{
    BATCH_SIZE, Edition, LicenseRecord, MAX_VERSION, Serial, authorization_file_name, build,
    read_authorization_file, verify_batch, write_authorization_file,
};
use num_bigint::BigUint;
use num_traits::One;
use pretty_assertions::assert_eq;

fn fields(record: &LicenseRecord) -> Vec<String> {
    record.to_string().split(',').map(str::to_string).collect()
}

#[test]
fn batch_has_fixed_size_and_order() {
    let key = fixture_key();
    let records = build(&key, HWID, 2, 11, &mut seeded_rng(1)).unwrap();
    assert_eq!(records.len(), BATCH_SIZE);

    let primary = fields(&records[0]);
    assert_eq!(primary[1], "02");
    assert_eq!(primary[2], "B0");
    assert_eq!(primary[3], "Standard");

    for (offset, record) in records[1..=192].iter().enumerate() {
        let f = fields(record);
        assert_eq!(f[1], format!("{:02X}", 0x40 + offset));
        assert_eq!(f[2], "10");
    }
    for (offset, record) in records[193..].iter().enumerate() {
        let f = fields(record);
        assert_eq!(f[1], format!("{:04X}", 0x8000 + offset));
        assert_eq!(f[2], "10");
    }
}

#[test]
fn every_record_verifies_and_has_valid_serial() {
    let key = fixture_key();
    let records = build(&key, HWID, Edition::Lite.code(), 12, &mut seeded_rng(2)).unwrap();

    for record in &records {
        assert!(record.serial().is_valid());
        assert_eq!(record.signature().len(), SIGNATURE_HEX_LEN);
        assert!(record.verify(key.public_key(), HWID));
    }
    verify_batch(&records, key.public_key(), HWID).unwrap();
}

#[test]
fn batch_does_not_verify_for_other_hwid() {
    let key = fixture_key();
    let records = build(&key, HWID, 0, 11, &mut seeded_rng(3)).unwrap();
    let err = verify_batch(&records, key.public_key(), "OTHER").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn signing_failure_aborts_with_index() {
    let fixture = fixture_key();
    let params = fixture.params().clone();
    let oversized = DsaPrivateKey::from_components(
        params.p().clone(),
        params.q().clone(),
        params.g().clone(),
        fixture.y().clone(),
        BigUint::one() << 1100u32,
    );

    let err = build(&oversized, HWID, 2, 11, &mut seeded_rng(4)).unwrap_err();
    match err {
        Error::Batch {
            index,
            edition,
            source,
        } => {
            assert_eq!(index, 0);
            assert_eq!(edition, 2);
            assert!(matches!(*source, Error::KeySize { .. }));
        }
        other => panic!("expected batch error, got {other:?}"),
    }
}

#[test]
fn generated_serials_are_always_valid() {
    let mut rng = seeded_rng(5);
    for _ in 0..10_000 {
        let serial = Serial::generate(&mut rng);
        assert!(serial.is_valid());
        let parsed: Serial = serial.to_string().parse().unwrap();
        assert_eq!(parsed, serial);
    }
}

#[test]
fn authorization_file_roundtrip() {
    let key = fixture_key();
    let records = build(&key, HWID, 2, 11, &mut seeded_rng(6)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(authorization_file_name(Edition::Suite, HWID).unwrap());
    write_authorization_file(&records, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), BATCH_SIZE);
    assert!(text.ends_with('\n'));
    assert_eq!(text.lines().next().unwrap(), records[0].to_string());

    let read_back = read_authorization_file(&path).unwrap();
    assert_eq!(read_back, records);
    verify_batch(&read_back, key.public_key(), HWID).unwrap();
}

#[test]
fn existing_file_is_truncated() {
    let key = fixture_key();
    let records = build(&key, HWID, 0, 10, &mut seeded_rng(7)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Authorize.auz");
    std::fs::write(&path, "stale\n".repeat(1000)).unwrap();

    write_authorization_file(&records[..3], &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(!text.contains("stale"));
}

#[cfg(unix)]
#[test]
fn authorization_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Authorize.auz");
    write_authorization_file(&[], &path).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn write_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("Authorize.auz");
    let err = write_authorization_file(&[], &path).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn malformed_file_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Authorize.auz");
    std::fs::write(&path, "\nnot a record\n").unwrap();

    let err = read_authorization_file(&path).unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn oversized_version_is_rejected_before_signing() {
    let key = fixture_key();
    let err = build(&key, HWID, 2, MAX_VERSION + 1, &mut seeded_rng(8)).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn hwid_cannot_escape_output_directory() {
    let err = authorization_file_name(Edition::Suite, "../outside").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}
