//! Backup creation

use super::archive;
use super::preferences;
use super::types::{Backup, BackupMetadata, EntryCounts};
use crate::error::{Error, Result};
use crate::host::{HostEnvironment, Notification};
use log::{debug, error, info, warn};
use std::sync::Mutex;

/// Title used for all backup/restore notifications
pub(crate) const NOTIFICATION_TITLE: &str = "Backup";

/// How long backup/restore notifications stay visible
pub(crate) const NOTIFICATION_LIFETIME_SECS: u32 = 30;

/// Creates and restores backups of the host's data-storage root.
///
/// Construct it with the [`HostEnvironment`] it should serve. Both
/// operations return an explicit [`Result`]; on failure they log, deliver
/// exactly one user-facing notification, and return the typed error.
pub struct BackupManager<H: HostEnvironment> {
    pub(crate) host: H,

    /// Backup and restore share the data-storage root exclusively, so
    /// concurrent invocations serialize here.
    pub(crate) guard: Mutex<()>,
}

impl<H: HostEnvironment> BackupManager<H> {
    /// Create a new backup manager for the given host environment
    pub fn new(host: H) -> Self {
        Self {
            host,
            guard: Mutex::new(()),
        }
    }

    /// Access the host environment this manager serves
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Create a backup from the current contents of the data-storage root.
    ///
    /// On Linux the live preferences file is first copied into the root so
    /// it is swept into the archive. Pending settings are flushed, the tree
    /// is archived (minus [`IGNORED_NAMES`](super::IGNORED_NAMES)), and the
    /// metadata counts are derived from the archive's entry list.
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences file cannot be staged, settings
    /// cannot be flushed, or the walk/archive fails. One notification is
    /// delivered per failure.
    pub fn make_backup(&self) -> Result<Backup> {
        let _guard = self.guard.lock().map_err(|_| Error::LockPoisoned)?;

        self.make_backup_locked().inspect_err(|e| self.report_failure(e))
    }

    fn make_backup_locked(&self) -> Result<Backup> {
        let cura_release = self.host.application_version().to_string();
        let data_dir = self.host.data_storage_path();

        debug!(
            "Creating backup for {} {}, using folder {}",
            self.host.application_name(),
            cura_release,
            data_dir.display()
        );

        preferences::stage_into_data_root(&self.host)?;

        // Ensure all current settings are on disk before archiving.
        self.host.save_settings()?;

        let archive = archive::archive_directory(&data_dir)?;
        let counts = EntryCounts::scan(archive.entry_names.iter().map(String::as_str));

        info!(
            "✅ Backup created: {} entries, {} bytes",
            archive.entry_names.len(),
            archive.bytes.len()
        );

        Ok(Backup::new(
            archive.bytes,
            BackupMetadata {
                cura_release,
                machine_count: counts.machines.to_string(),
                material_count: counts.materials.to_string(),
                profile_count: counts.profiles.to_string(),
                plugin_count: counts.plugins.to_string(),
            },
        ))
    }

    /// Single place where user-facing messages are derived from the failure
    /// kind. Every failed top-level operation passes through here exactly
    /// once.
    pub(crate) fn report_failure(&self, err: &Error) {
        let text = if err.is_missing_metadata() {
            warn!("{err}");
            "Tried to restore a backup without having proper data or meta data.".to_string()
        } else if err.is_archive_error() {
            error!("{err}");
            format!("The backup is damaged or is not a valid archive: {err}")
        } else {
            error!("{err}");
            format!("Could not access the user data directory: {err}")
        };

        self.host.notify(Notification {
            text,
            title: NOTIFICATION_TITLE.to_string(),
            lifetime_secs: NOTIFICATION_LIFETIME_SECS,
        });
    }
}
