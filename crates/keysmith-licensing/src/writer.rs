//! Authorization file reading and writing.
//!
//! The file is line oriented: one rendered record per line, each terminated
//! by `\n`, in batch order.

use crate::edition::Edition;
use crate::record::LicenseRecord;
use keysmith_core::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Write each record followed by a newline.
pub fn write_records<W: Write>(records: &[LicenseRecord], out: &mut W) -> Result<()> {
    for record in records {
        writeln!(out, "{record}")?;
    }
    Ok(())
}

/// Create or truncate `path` and write the batch to it.
///
/// The handle is dropped on every return path. A failure part way through
/// leaves a partially written file in place.
pub fn write_authorization_file(records: &[LicenseRecord], path: &Path) -> Result<()> {
    let file = open_for_write(path)?;
    let mut writer = BufWriter::new(file);
    write_records(records, &mut writer)?;
    writer.flush()?;

    info!(path = %path.display(), records = records.len(), "Wrote authorization file");
    Ok(())
}

/// Read every non-empty line of an authorization file as a record.
pub fn read_authorization_file(path: &Path) -> Result<Vec<LicenseRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let record = line
            .parse()
            .map_err(|e| Error::Decode(format!("line {}: {e}", number + 1)))?;
        records.push(record);
    }

    debug!(path = %path.display(), records = records.len(), "Read authorization file");
    Ok(records)
}

/// Conventional file name for an edition and hardware id.
///
/// The hardware id must stay a single path component.
pub fn authorization_file_name(edition: Edition, hwid: &str) -> Result<String> {
    if hwid.is_empty() {
        return Err(Error::Validation("hardware id is empty".to_string()));
    }
    if hwid.chars().any(|c| c == '/' || c == '\\' || c.is_control()) {
        return Err(Error::Validation(format!(
            "hardware id {hwid:?} cannot be used in a file name"
        )));
    }
    Ok(format!("Authorize_{}_{hwid}.auz", edition.name()))
}

#[cfg(unix)]
fn open_for_write(path: &Path) -> Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    Ok(OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?)
}

#[cfg(not(unix))]
fn open_for_write(path: &Path) -> Result<File> {
    Ok(OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?)
}
