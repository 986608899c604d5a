use crate::models::backup_record::BackupRecord;
use crate::models::flag::Flag;
use serde::Serialize;
use std::collections::BTreeMap;

/// A mount as shown under its host on the overview page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountEntry {
    pub mountpoint: String,
    pub backedup: Flag,
    pub ignore: Flag,
}

impl From<BackupRecord> for MountEntry {
    fn from(record: BackupRecord) -> Self {
        Self {
            mountpoint: record.mountpoint,
            backedup: record.backed_up,
            ignore: record.ignored,
        }
    }
}

/// Hostname to mounts, hostnames iterating in sorted order.
pub type HostGroup = BTreeMap<String, Vec<MountEntry>>;

/// Records bucketed by classification, then by hostname
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedView {
    pub bad: HostGroup,
    pub good: HostGroup,
    pub ignored: HostGroup,
}

impl GroupedView {
    pub fn total_mounts(&self) -> usize {
        [&self.bad, &self.good, &self.ignored]
            .iter()
            .flat_map(|group| group.values())
            .map(Vec::len)
            .sum()
    }
}
