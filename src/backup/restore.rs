//! Backup restore logic

use super::archive;
use super::preferences;
use super::types::Backup;
use crate::error::{Error, Result};
use crate::host::HostEnvironment;
use log::{debug, info, warn};
use std::fs;
use std::path::Path;

impl<H: HostEnvironment> super::BackupManager<H> {
    /// Restore a backup record into the data-storage root.
    ///
    /// The record is validated first: a missing archive, missing metadata,
    /// or empty `cura_release` fails without touching the filesystem. The
    /// archive is then extracted into a staging directory next to the data
    /// root and swapped into place, so a corrupt archive also leaves the
    /// existing tree intact. On Linux the preferences file is moved back to
    /// its platform location afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMetadata`] for an invalid record, an archive
    /// error for a buffer that is not a valid zip container, or an I/O
    /// error from extraction or the tree swap. One notification is
    /// delivered per failure.
    pub fn restore_backup(&self, backup: &Backup) -> Result<()> {
        let _guard = self.guard.lock().map_err(|_| Error::LockPoisoned)?;

        self.restore_locked(backup).inspect_err(|e| self.report_failure(e))
    }

    fn restore_locked(&self, backup: &Backup) -> Result<()> {
        let metadata = backup
            .metadata
            .as_ref()
            .ok_or_else(|| Error::MissingMetadata("no metadata attached to this backup".into()))?;

        let archive_bytes = backup
            .archive
            .as_deref()
            .ok_or_else(|| Error::MissingMetadata("no archive data attached to this backup".into()))?;

        if metadata.cura_release.is_empty() {
            return Err(Error::MissingMetadata("cura_release is empty".into()));
        }

        // The release string is required but not compared: older-version
        // data restores as-is, migration happens elsewhere.
        let data_dir = self.host.data_storage_path();
        info!(
            "Restoring backup made with {} into {}",
            metadata.cura_release,
            data_dir.display()
        );

        let parent = data_dir.parent().ok_or_else(|| {
            Error::RestoreFailed(format!(
                "data directory '{}' has no parent directory",
                data_dir.display()
            ))
        })?;

        // Stage the extraction next to the live tree. A buffer that is not
        // a valid archive fails here, before anything is replaced.
        let staging = tempfile::Builder::new()
            .prefix(".restore-")
            .tempdir_in(parent)
            .map_err(|e| Error::RestoreFailed(format!("could not create staging directory: {e}")))?;

        debug!("Extracting backup into staging directory {}", staging.path().display());
        archive::extract_archive(archive_bytes, staging.path())?;

        swap_into_place(staging, &data_dir, parent)?;

        preferences::restore_from_data_root(&self.host)?;

        info!("✅ Backup restored into {}", data_dir.display());
        Ok(())
    }
}

/// Replace the live data directory with the staged tree using two renames.
/// On failure the old tree is put back, so the caller never ends up without
/// a data directory. The staging directory is created private (0o700), so
/// the previous directory's mode is captured and reapplied after the swap.
fn swap_into_place(staging: tempfile::TempDir, data_dir: &Path, parent: &Path) -> Result<()> {
    let dir_name = data_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data".to_string());
    let retired = parent.join(format!(".{}.old-{}", dir_name, std::process::id()));

    // Stale leftover from an interrupted run would block the rename.
    if retired.exists() {
        let _ = fs::remove_dir_all(&retired);
    }

    // The staged tree is about to be renamed away, so disable the
    // TempDir cleanup-on-drop first.
    let staging_path = staging.keep();

    let previous_permissions = fs::metadata(data_dir).map(|m| m.permissions()).ok();

    if data_dir.exists() {
        if let Err(e) = fs::rename(data_dir, &retired) {
            let _ = fs::remove_dir_all(&staging_path);
            return Err(Error::RestoreFailed(format!(
                "could not move the current data directory aside: {e}"
            )));
        }
    }

    if let Err(e) = fs::rename(&staging_path, data_dir) {
        if retired.exists() {
            let _ = fs::rename(&retired, data_dir);
        }
        let _ = fs::remove_dir_all(&staging_path);
        return Err(Error::RestoreFailed(format!(
            "could not move the restored data into place: {e}"
        )));
    }

    debug!("Replaced data in location: {}", data_dir.display());

    if let Some(permissions) = previous_permissions {
        if let Err(e) = fs::set_permissions(data_dir, permissions) {
            warn!(
                "Could not restore the mode of the data directory {}: {e}",
                data_dir.display()
            );
        }
    }

    if retired.exists() {
        if let Err(e) = fs::remove_dir_all(&retired) {
            warn!(
                "Could not delete the replaced data directory {}: {e}",
                retired.display()
            );
        }
    }

    Ok(())
}
