//! License issuance for Keysmith.
//!
//! Expands a (hardware id, edition, version) request into the full set of
//! signed records an authorization file must contain, and reads and writes
//! those files.

pub mod batch;
pub mod edition;
pub mod record;
pub mod serial;
pub mod writer;

pub use batch::{
    AUXILIARY_EDITIONS_HIGH, AUXILIARY_EDITIONS_LOW, AUXILIARY_VERSION, BATCH_SIZE, MAX_VERSION,
    batch_plan, build, verify_batch,
};
pub use edition::Edition;
pub use record::{LICENSE_TIER, LicenseRecord, render_template};
pub use serial::{Serial, fix_group_checksum, group_checksum, overall_checksum};
pub use writer::{
    authorization_file_name, read_authorization_file, write_authorization_file, write_records,
};
