//! # cura-backups
//!
//! Backup and restore for the Cura user-configuration directory, plus
//! package-install bookkeeping and a reader for the zip-based `.curapackage`
//! format.
//!
//! ## Features
//!
//! - **Backup**: archive the data-storage root into an in-memory,
//!   deflate-compressed zip, skipping `cura.log` and `cache` entries at any
//!   depth, and derive per-category counts from the entry list
//! - **Restore**: validate a backup record, extract it into a staging
//!   directory, and swap it into place - a corrupt archive never touches the
//!   live tree
//! - **Platform hooks**: on Linux the preferences file is copied into the
//!   data root before archiving and moved back out after restoring
//! - **Packages**: a category → installation-directory table and a
//!   `.curapackage` reader that rejects legacy profile files
//!
//! Everything the library needs from the hosting application is injected
//! through the [`HostEnvironment`] trait, so tests can exercise both
//! platform code paths with a fake implementation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cura_backups::{BackupManager, SystemEnvironment};
//!
//! # fn example() -> cura_backups::Result<()> {
//! let manager = BackupManager::new(SystemEnvironment::new("cura", "4.0.0"));
//!
//! // Snapshot the current user configuration.
//! let backup = manager.make_backup()?;
//! println!(
//!     "machines in backup: {}",
//!     backup.metadata.as_ref().unwrap().machine_count
//! );
//!
//! // Later: put it back.
//! manager.restore_backup(&backup)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading Packages
//!
//! ```rust,no_run
//! use cura_backups::{PackageReader, package_mime_type};
//! use std::path::Path;
//!
//! # fn example() -> cura_backups::Result<()> {
//! assert_eq!(package_mime_type().suffixes, ["curapackage"]);
//!
//! let package = PackageReader::new().read(Path::new("material.curapackage"))?;
//! if let Some(info) = &package.info {
//!     println!("{} {}", info.display_name, info.package_version);
//! }
//! # Ok(())
//! # }
//! ```

// Core modules
mod error;
mod host;

// Grouped modules
pub mod backup;
pub mod packages;

// Re-exports from core
pub use error::{Error, Result};
pub use host::{HostEnvironment, Notification, ResourceKind, SystemEnvironment};

// Backup re-exports
pub use backup::{Backup, BackupManager, BackupMetadata, IGNORED_NAMES};

// Package re-exports
pub use packages::{
    MimeType, Package, PackageEntry, PackageInfo, PackageManager, PackageReader,
    package_mime_type,
};
