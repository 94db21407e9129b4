//! Reader for the zip-based `.curapackage` format

use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

/// Name of the metadata entry inside a package archive
const PACKAGE_METADATA_ENTRY: &str = "package.json";

/// A mime type declaration for the host's file-type registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MimeType {
    /// Mime name, e.g. `application/x-cura-package`
    pub name: &'static str,

    /// Human-readable comment
    pub comment: &'static str,

    /// File extensions handled by this type
    pub suffixes: &'static [&'static str],
}

/// The mime type handled by [`PackageReader`]
pub const fn package_mime_type() -> MimeType {
    MimeType {
        name: "application/x-cura-package",
        comment: "Cura Package",
        suffixes: &["curapackage"],
    }
}

/// Metadata parsed from a package's `package.json` entry
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageInfo {
    /// Unique package identifier
    #[serde(default)]
    pub package_id: String,

    /// Human-readable package name
    #[serde(default)]
    pub display_name: String,

    /// Package version string
    #[serde(default)]
    pub package_version: String,

    /// SDK version the package targets
    #[serde(default)]
    pub sdk_version: Option<u64>,

    /// Optional package description
    #[serde(default)]
    pub description: Option<String>,
}

/// One file carried inside a package archive
#[derive(Debug, Clone)]
pub struct PackageEntry {
    /// POSIX-style path of the entry inside the archive
    pub name: String,

    /// The entry's bytes
    pub data: Vec<u8>,
}

/// The contents of one `.curapackage` file
#[derive(Debug, Clone)]
pub struct Package {
    /// Parsed `package.json`, when the archive carries one
    pub info: Option<PackageInfo>,

    /// All file entries except the metadata entry
    pub entries: Vec<PackageEntry>,
}

/// Reads `.curapackage` archives.
///
/// Legacy (pre-archive) profile files are rejected with
/// [`Error::LegacyPackage`]; their upgrade path lives elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageReader;

impl PackageReader {
    /// Create a new package reader
    pub fn new() -> Self {
        Self
    }

    /// Read a package file into memory
    ///
    /// # Errors
    ///
    /// Returns [`Error::LegacyPackage`] when the file is not a zip
    /// container, [`Error::InvalidPackage`] when its metadata entry cannot
    /// be parsed, or an I/O error when the file cannot be read.
    pub fn read(&self, file_name: &Path) -> Result<Package> {
        let file = File::open(file_name).map_err(|e| Error::FileRead {
            path: file_name.to_path_buf(),
            source: e,
        })?;

        let mut archive = match ZipArchive::new(file) {
            Ok(archive) => archive,
            // Not an archive container at all: an older, flat profile file.
            Err(ZipError::InvalidArchive(..)) => {
                return Err(Error::LegacyPackage(file_name.to_path_buf()));
            }
            Err(e) => return Err(Error::Zip(e)),
        };

        let mut info = None;
        let mut entries = Vec::new();

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if entry.name().ends_with('/') {
                continue;
            }

            let name = entry.name().to_string();
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data).map_err(|e| Error::FileRead {
                path: file_name.to_path_buf(),
                source: e,
            })?;

            if name == PACKAGE_METADATA_ENTRY {
                let parsed: PackageInfo = serde_json::from_slice(&data).map_err(|e| {
                    Error::InvalidPackage(format!(
                        "malformed {PACKAGE_METADATA_ENTRY} in '{}': {e}",
                        file_name.display()
                    ))
                })?;
                debug!(
                    "Read package metadata: {} {}",
                    parsed.package_id, parsed.package_version
                );
                info = Some(parsed);
            } else {
                entries.push(PackageEntry { name, data });
            }
        }

        Ok(Package { info, entries })
    }
}

// =============================================================================
// Tests
// =============================================================================
