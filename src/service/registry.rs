use crate::models::backup_record::BackupRecord;
use crate::models::error::Result;
use crate::models::flag::Flag;
use crate::models::grouped_view::GroupedView;
use crate::repo::StatusStore;
use crate::utils::mountpoint::normalize_mountpoint;
use log::{debug, info};
use std::sync::Arc;

/// Tracks the last reported backup state of every (hostname, mountpoint).
#[derive(Clone)]
pub struct Registry {
    store: Arc<dyn StatusStore>,
}

impl Registry {
    pub fn new(store: Arc<dyn StatusStore>) -> Self {
        Self { store }
    }

    /// Record the reported state, fully replacing any previous report for
    /// the same mount. Omitted flags are passed as `Flag::UNSET` by callers
    /// and are not merged with the previous record.
    pub fn upsert(
        &self,
        hostname: &str,
        mountpoint: &str,
        backed_up: Flag,
        ignored: Flag,
    ) -> Result<()> {
        let record = BackupRecord::new(
            hostname,
            &normalize_mountpoint(mountpoint),
            backed_up,
            ignored,
        );
        self.store.replace(&record)?;
        info!(
            "Updated {}:{} backedup={} ignore={}",
            record.hostname, record.mountpoint, backed_up, ignored
        );
        Ok(())
    }

    /// Stored backup flag for the mount; unknown mounts count as not backed up.
    pub fn query(&self, hostname: &str, mountpoint: &str) -> Result<Flag> {
        let mountpoint = normalize_mountpoint(mountpoint);
        let backed_up = self
            .store
            .find(hostname, &mountpoint)?
            .map(|record| record.backed_up)
            .unwrap_or(Flag::UNSET);
        debug!("Queried {}:{} -> {}", hostname, mountpoint, backed_up);
        Ok(backed_up)
    }

    pub fn list_all(&self) -> Result<GroupedView> {
        let records = self.store.list_ordered()?;
        debug!("Grouping {} records", records.len());
        Ok(group_records(records))
    }

    /// Mounts excluded from monitoring
    pub fn exceptions(&self) -> Result<Vec<BackupRecord>> {
        self.store.list_ignored()
    }
}

/// Bucket records into ignored/bad/good, then by hostname, keeping the
/// incoming order within each host. Ignore is checked before backup status.
pub fn group_records(records: Vec<BackupRecord>) -> GroupedView {
    let mut view = GroupedView::default();
    for record in records {
        let group = if record.ignored.is_set() {
            &mut view.ignored
        } else if record.backed_up.is_set() {
            &mut view.good
        } else {
            &mut view.bad
        };
        group
            .entry(record.hostname.clone())
            .or_default()
            .push(record.into());
    }
    view
}
