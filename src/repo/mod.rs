pub mod sqlite;

use crate::models::backup_record::BackupRecord;
use crate::models::error::Result;

/// Persistence backend for backup records.
///
/// Implementations receive already-normalized hostnames and mountpoints.
pub trait StatusStore: Send + Sync {
    /// Atomically replace every record for the record's (hostname, mountpoint)
    /// with this one.
    fn replace(&self, record: &BackupRecord) -> Result<()>;

    fn find(&self, hostname: &str, mountpoint: &str) -> Result<Option<BackupRecord>>;

    /// All records ordered by hostname, backedup, mountpoint
    fn list_ordered(&self) -> Result<Vec<BackupRecord>>;

    /// Records flagged as ignored, ordered by hostname, mountpoint
    fn list_ignored(&self) -> Result<Vec<BackupRecord>>;
}
