//! Backup record and metadata types

use serde::{Deserialize, Serialize};

/// File and directory basenames excluded from a backup at any depth.
///
/// Matched against the bare entry name, not the path and not a glob: a file
/// named `cachefile` is archived, a directory named `cache` is not.
pub const IGNORED_NAMES: &[&str] = &["cura.log", "cache"];

/// One backup snapshot: the archive bytes and their metadata.
///
/// Both fields are populated together by a successful
/// [`make_backup`](crate::BackupManager::make_backup); a record is only
/// restorable when both are present and the release string is non-empty
/// (checked by [`restore_backup`](crate::BackupManager::restore_backup),
/// not enforced by construction, so records persisted elsewhere can be
/// rebuilt field by field).
#[derive(Debug, Clone, Default)]
pub struct Backup {
    /// The zip archive of the data-storage root, if one was produced
    pub archive: Option<Vec<u8>>,

    /// Metadata describing the archive, if one was produced
    pub metadata: Option<BackupMetadata>,
}

impl Backup {
    /// Create a record from both parts
    pub fn new(archive: Vec<u8>, metadata: BackupMetadata) -> Self {
        Self {
            archive: Some(archive),
            metadata: Some(metadata),
        }
    }

    /// Whether this record carries the minimum required data for a restore
    #[must_use]
    pub fn is_restorable(&self) -> bool {
        self.archive.is_some()
            && self
                .metadata
                .as_ref()
                .is_some_and(|m| !m.cura_release.is_empty())
    }
}

/// Metadata stored alongside the archive bytes.
///
/// The counts are informational approximations derived from the archive's
/// entry list; only `cura_release` is required for a restore. Counts are
/// decimal strings because the host persists this record as a flat
/// string-to-string mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupMetadata {
    /// Release identifier of the application that made the backup
    pub cura_release: String,

    /// Number of machine instance files in the archive
    pub machine_count: String,

    /// Number of material files in the archive
    pub material_count: String,

    /// Number of quality-changes profile files in the archive
    pub profile_count: String,

    /// Number of `plugin.json` files in the archive
    pub plugin_count: String,
}

// =============================================================================
// Entry Counting
// =============================================================================

/// Coarse per-category counts computed from archive entry names.
///
/// Counting is by path segment rather than substring: a file entry counts
/// toward a category when its first segment is that category's directory,
/// and toward plugins when its final segment is exactly `plugin.json`.
/// Directory entries (trailing `/`) never count, so no folder-entry offset
/// correction is needed regardless of whether the archive writer emits them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct EntryCounts {
    pub machines: usize,
    pub materials: usize,
    pub profiles: usize,
    pub plugins: usize,
}

impl EntryCounts {
    /// Scan a list of archive entry names
    pub fn scan<'a, I>(entry_names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = Self::default();

        for name in entry_names {
            if name.ends_with('/') {
                continue;
            }

            if let Some((first, _rest)) = name.split_once('/') {
                match first {
                    "machine_instances" => counts.machines += 1,
                    "materials" => counts.materials += 1,
                    "quality_changes" => counts.profiles += 1,
                    _ => {}
                }
            }

            if name.rsplit('/').next() == Some("plugin.json") {
                counts.plugins += 1;
            }
        }

        counts
    }
}

// =============================================================================
// Tests
// =============================================================================
