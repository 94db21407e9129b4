//! Platform-conditional preferences relocation.
//!
//! On Linux the live preferences file lives outside the data-storage root,
//! so it would be missed by the directory walk. These two hooks are invoked
//! symmetrically around backup and restore: the pre-hook copies the file
//! into the root so it is swept into the archive, the post-hook moves it
//! back out after extraction. Both are no-ops on platforms where the
//! preferences file already lives inside the data-storage root.

use crate::error::{self, Error, Result};
use crate::host::HostEnvironment;
use log::debug;
use std::path::{Path, PathBuf};

/// Path of the staged preferences copy inside the data-storage root
fn staged_path(host: &impl HostEnvironment) -> PathBuf {
    host.data_storage_path()
        .join(format!("{}.cfg", host.application_name()))
}

/// Pre-backup hook: copy the live preferences file into the data root
pub(crate) fn stage_into_data_root(host: &impl HostEnvironment) -> Result<()> {
    if !host.is_linux() {
        return Ok(());
    }

    let preferences_file = host.preferences_path();
    let staged = staged_path(host);

    debug!(
        "Copying preferences file from {} to {}",
        preferences_file.display(),
        staged.display()
    );
    error::copy_file(&preferences_file, &staged)?;
    Ok(())
}

/// Post-restore hook: move the staged preferences file back to its platform
/// location. This is a move, not a copy - the file is gone from the data
/// root afterwards.
pub(crate) fn restore_from_data_root(host: &impl HostEnvironment) -> Result<()> {
    if !host.is_linux() {
        return Ok(());
    }

    let staged = staged_path(host);
    let preferences_file = host.preferences_path();

    debug!(
        "Moving preferences file from {} to {}",
        staged.display(),
        preferences_file.display()
    );
    move_file(&staged, &preferences_file)
}

/// Move a file, falling back to copy + delete when rename fails (the
/// preferences location may be on a different filesystem than the data root)
fn move_file(src: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        if !parent.exists() {
            error::create_dir(parent)?;
        }
    }

    if std::fs::rename(src, dest).is_ok() {
        return Ok(());
    }

    error::copy_file(src, dest)?;
    std::fs::remove_file(src).map_err(|e| Error::FileDelete {
        path: src.to_path_buf(),
        source: e,
    })
}

// =============================================================================
// Tests
// =============================================================================
