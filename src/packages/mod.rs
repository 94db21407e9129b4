//! Package-install bookkeeping and the `.curapackage` reader

mod reader;

pub use reader::{MimeType, Package, PackageEntry, PackageInfo, PackageReader, package_mime_type};

use crate::host::{HostEnvironment, ResourceKind};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Tracks where each package category installs its files.
///
/// The table is filled once at construction from host-provided storage-path
/// lookups; there is no further behavior here.
#[derive(Debug, Clone)]
pub struct PackageManager {
    installation_dirs: HashMap<String, PathBuf>,
}

impl PackageManager {
    /// Build the installation-directory table from the host environment
    pub fn new(host: &impl HostEnvironment) -> Self {
        let mut installation_dirs = HashMap::new();
        installation_dirs.insert(
            "materials".to_string(),
            host.resource_storage_path(ResourceKind::Materials),
        );
        installation_dirs.insert(
            "quality".to_string(),
            host.resource_storage_path(ResourceKind::Quality),
        );

        Self { installation_dirs }
    }

    /// Installation directory for a category, if one is registered
    pub fn installation_dir(&self, category: &str) -> Option<&Path> {
        self.installation_dirs.get(category).map(PathBuf::as_path)
    }

    /// Registered category names
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.installation_dirs.keys().map(String::as_str)
    }
}

// =============================================================================
// Tests
// =============================================================================
