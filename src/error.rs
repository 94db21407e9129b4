//! Error types for the cura-backups library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cura-backups operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the cura-backups library
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read directory '{path}': {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete '{path}': {source}")]
    FileDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Backup Errors
    // -------------------------------------------------------------------------
    #[error("Backup failed: {0}")]
    BackupFailed(String),

    #[error("Restore failed: {0}")]
    RestoreFailed(String),

    #[error("Backup is missing required metadata: {0}")]
    MissingMetadata(String),

    // -------------------------------------------------------------------------
    // Archive Errors
    // -------------------------------------------------------------------------
    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // -------------------------------------------------------------------------
    // Package Errors
    // -------------------------------------------------------------------------
    #[error("'{0}' is not a package archive (legacy profile files use a separate upgrade path)")]
    LegacyPackage(PathBuf),

    #[error("Invalid package: {0}")]
    InvalidPackage(String),

    // -------------------------------------------------------------------------
    // Concurrency Errors
    // -------------------------------------------------------------------------
    #[error("Internal lock was poisoned - possible thread panic. The operation may have left data in an inconsistent state.")]
    LockPoisoned,
}

impl Error {
    /// Check if this is an archive-format error
    #[must_use]
    pub fn is_archive_error(&self) -> bool {
        matches!(self, Error::Archive(_) | Error::Zip(_))
    }

    /// Check if this is a missing-metadata precondition failure
    #[must_use]
    pub fn is_missing_metadata(&self) -> bool {
        matches!(self, Error::MissingMetadata(_))
    }
}

// =============================================================================
// Filesystem Helper Functions
// =============================================================================
// These reduce repetitive map_err patterns in the backup module.

use std::path::Path;

/// Create a directory (and parents) with proper error handling
pub(crate) fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreate {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy a file, reporting the failing side: opening the source is a
/// [`Error::FileRead`] on the source path, creating or filling the
/// destination is a [`Error::FileWrite`] on the destination path
pub(crate) fn copy_file(src: &Path, dest: &Path) -> Result<u64> {
    let mut reader = std::fs::File::open(src).map_err(|e| Error::FileRead {
        path: src.to_path_buf(),
        source: e,
    })?;

    let mut writer = std::fs::File::create(dest).map_err(|e| Error::FileWrite {
        path: dest.to_path_buf(),
        source: e,
    })?;

    std::io::copy(&mut reader, &mut writer).map_err(|e| Error::FileWrite {
        path: dest.to_path_buf(),
        source: e,
    })
}

// =============================================================================
// Tests
// =============================================================================
