//! Host application environment
//!
//! The backup and package components never reach for a global application
//! singleton. Everything they need from the hosting application - version,
//! paths, platform flag, settings flush, user notifications - comes in
//! through the [`HostEnvironment`] trait, so tests can drive both platform
//! code paths with a fake implementation.

use crate::error::Result;
use log::info;
use std::path::PathBuf;

/// A user-facing notification emitted by backup/restore operations.
///
/// Delivery is up to the host (a message popup in the original application);
/// failures to deliver are never fatal to the operation that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Human-readable message text
    pub text: String,

    /// Message title
    pub title: String,

    /// How long the message should stay visible, in seconds
    pub lifetime_secs: u32,
}

/// Resource categories with a dedicated installation directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Material profiles
    Materials,
    /// Quality-changes profiles
    Quality,
}

/// Interface to the hosting application.
///
/// This is the seam between the backup machinery and the application it
/// serves: implement it once in the host, or use [`SystemEnvironment`] for
/// standard platform locations.
pub trait HostEnvironment: Send + Sync {
    /// Application name, used to build the `<name>.cfg` preferences filename
    fn application_name(&self) -> &str;

    /// Release identifier of the running application
    fn application_version(&self) -> &str;

    /// Absolute path to the user-configuration directory tree to back up
    fn data_storage_path(&self) -> PathBuf;

    /// Whether the Linux preferences-relocation code path applies
    fn is_linux(&self) -> bool;

    /// Absolute path to the live preferences file
    fn preferences_path(&self) -> PathBuf;

    /// Installation directory for a resource category
    fn resource_storage_path(&self, kind: ResourceKind) -> PathBuf;

    /// Flush any pending in-memory settings to disk
    fn save_settings(&self) -> Result<()>;

    /// Deliver a user-facing notification
    fn notify(&self, notification: Notification);
}

// =============================================================================
// Default Implementation
// =============================================================================

/// Host environment backed by the standard platform directories.
///
/// Data lives under the OS data directory, preferences under the OS config
/// directory (which is what makes the Linux relocation necessary: on other
/// platforms both resolve into the same tree). Notifications are logged.
#[derive(Debug, Clone)]
pub struct SystemEnvironment {
    app_name: String,
    app_version: String,
}

impl SystemEnvironment {
    /// Create a host environment for the given application name and version
    pub fn new(app_name: impl Into<String>, app_version: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            app_version: app_version.into(),
        }
    }
}

impl HostEnvironment for SystemEnvironment {
    fn application_name(&self) -> &str {
        &self.app_name
    }

    fn application_version(&self) -> &str {
        &self.app_version
    }

    fn data_storage_path(&self) -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(&self.app_name)
    }

    fn is_linux(&self) -> bool {
        cfg!(target_os = "linux")
    }

    fn preferences_path(&self) -> PathBuf {
        let file_name = format!("{}.cfg", self.app_name);
        if self.is_linux() {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(&self.app_name)
                .join(file_name)
        } else {
            self.data_storage_path().join(file_name)
        }
    }

    fn resource_storage_path(&self, kind: ResourceKind) -> PathBuf {
        let subdir = match kind {
            ResourceKind::Materials => "materials",
            ResourceKind::Quality => "quality_changes",
        };
        self.data_storage_path().join(subdir)
    }

    fn save_settings(&self) -> Result<()> {
        // The standalone environment holds no in-memory settings of its own.
        Ok(())
    }

    fn notify(&self, notification: Notification) {
        info!("{}: {}", notification.title, notification.text);
    }
}

// =============================================================================
// Tests
// =============================================================================
