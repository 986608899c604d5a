use crate::models::flag::Flag;
use serde::Serialize;

/// One row of the `backup` table: the last reported state of a mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupRecord {
    pub id: i64,
    pub hostname: String,
    pub mountpoint: String,
    #[serde(rename = "backedup")]
    pub backed_up: Flag,
    #[serde(rename = "ignore")]
    pub ignored: Flag,
}

impl BackupRecord {
    /// A record not yet assigned an id by the store.
    pub fn new(hostname: &str, mountpoint: &str, backed_up: Flag, ignored: Flag) -> Self {
        Self {
            id: 0,
            hostname: hostname.to_string(),
            mountpoint: mountpoint.to_string(),
            backed_up,
            ignored,
        }
    }
}
