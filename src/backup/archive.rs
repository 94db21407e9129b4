//! Archive handling for backup/restore operations.
//!
//! This module provides the low-level archive operations for the backup
//! system:
//!
//! - **Creation**: [`archive_directory`] - walk a directory tree into an
//!   in-memory deflate-compressed zip, skipping ignored basenames
//! - **Extraction**: [`extract_archive`] - unpack an in-memory zip into a
//!   target directory, reconstructing relative paths
//!
//! Entry names are POSIX-style paths relative to the archived root;
//! directory entries appear explicitly. There is no custom header and no
//! checksum beyond the zip format's own per-entry CRC.

use super::types::IGNORED_NAMES;
use crate::error::{self, Error, Result};
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use zip::write::{FileOptions, SimpleFileOptions};
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// An in-memory archive of one directory tree
#[derive(Debug)]
pub(crate) struct DirectoryArchive {
    /// The raw zip container
    pub bytes: Vec<u8>,

    /// Entry names in archive order
    pub entry_names: Vec<String>,
}

/// Create an in-memory zip archive from a directory tree.
///
/// Entries whose bare name is in [`IGNORED_NAMES`] are skipped at any depth;
/// a skipped directory is not recursed into.
pub(crate) fn archive_directory(root: &Path) -> Result<DirectoryArchive> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut entry_names = Vec::new();
    add_directory_to_zip(&mut zip, root, root, &options, &mut entry_names)?;

    let cursor = zip.finish().map_err(|e| Error::Archive(e.to_string()))?;
    Ok(DirectoryArchive {
        bytes: cursor.into_inner(),
        entry_names,
    })
}

/// Recursively add a directory to a zip archive
fn add_directory_to_zip<W: std::io::Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    base_dir: &Path,
    current_dir: &Path,
    options: &FileOptions<()>,
    entry_names: &mut Vec<String>,
) -> Result<()> {
    for entry in std::fs::read_dir(current_dir).map_err(|e| Error::DirectoryRead {
        path: current_dir.to_path_buf(),
        source: e,
    })? {
        let entry = entry.map_err(|e| Error::DirectoryRead {
            path: current_dir.to_path_buf(),
            source: e,
        })?;

        if is_ignored(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let path = entry.path();
        let name = entry_name(base_dir, &path)?;

        if path.is_dir() {
            let dir_name = format!("{name}/");
            zip.add_directory(dir_name.clone(), *options)
                .map_err(|e| Error::Archive(e.to_string()))?;
            entry_names.push(dir_name);

            add_directory_to_zip(zip, base_dir, &path, options, entry_names)?;
        } else {
            zip.start_file(name.clone(), *options)
                .map_err(|e| Error::Archive(e.to_string()))?;

            let mut file = File::open(&path).map_err(|e| Error::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;

            std::io::copy(&mut file, zip).map_err(|e| Error::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;

            entry_names.push(name);
        }
    }

    Ok(())
}

/// Exact match against the bare basename, never against the path
fn is_ignored(file_name: &str) -> bool {
    IGNORED_NAMES.contains(&file_name)
}

/// Build a POSIX-style entry name relative to the archived root
fn entry_name(base_dir: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(base_dir)
        .map_err(|e| Error::Archive(e.to_string()))?;

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

/// Extract an in-memory zip archive into a directory.
///
/// Fails with a zip format error if the bytes are not a valid archive
/// container; nothing is written in that case.
pub(crate) fn extract_archive(bytes: &[u8], output_dir: &Path) -> Result<()> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let outpath = output_dir.join(file.mangled_name());

        if file.name().ends_with('/') {
            error::create_dir(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                if !parent.exists() {
                    error::create_dir(parent)?;
                }
            }

            let mut outfile = File::create(&outpath).map_err(|e| Error::FileWrite {
                path: outpath.clone(),
                source: e,
            })?;

            std::io::copy(&mut file, &mut outfile).map_err(|e| Error::FileWrite {
                path: outpath.clone(),
                source: e,
            })?;
        }
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
