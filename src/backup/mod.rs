//! Backup and restore for the user-configuration directory

mod archive;
mod operations;
mod preferences;
mod restore;
mod types;

pub use operations::BackupManager;
pub use types::{Backup, BackupMetadata, IGNORED_NAMES};
