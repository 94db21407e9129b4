//! Common test utilities for cura-backups integration tests
//!
//! Provides a fake host environment and data-tree fixtures.

#![allow(dead_code)]

use cura_backups::{HostEnvironment, Notification, ResourceKind, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Initialize test logging once; later calls are no-ops
fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// =============================================================================
// Fake Host Environment
// =============================================================================

/// A deterministic host: fixed paths, a toggleable platform flag, and
/// captured notifications.
pub struct FakeHost {
    pub app_name: String,
    pub version: String,
    pub data_dir: PathBuf,
    pub preferences_file: PathBuf,
    pub linux: bool,
    pub notifications: Mutex<Vec<Notification>>,
    pub settings_saves: AtomicUsize,
}

impl FakeHost {
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    pub fn settings_save_count(&self) -> usize {
        self.settings_saves.load(Ordering::SeqCst)
    }
}

impl HostEnvironment for FakeHost {
    fn application_name(&self) -> &str {
        &self.app_name
    }

    fn application_version(&self) -> &str {
        &self.version
    }

    fn data_storage_path(&self) -> PathBuf {
        self.data_dir.clone()
    }

    fn is_linux(&self) -> bool {
        self.linux
    }

    fn preferences_path(&self) -> PathBuf {
        self.preferences_file.clone()
    }

    fn resource_storage_path(&self, kind: ResourceKind) -> PathBuf {
        let subdir = match kind {
            ResourceKind::Materials => "materials",
            ResourceKind::Quality => "quality_changes",
        };
        self.data_dir.join(subdir)
    }

    fn save_settings(&self) -> Result<()> {
        self.settings_saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

/// Build a fake host rooted in the given temp directory.
///
/// The data directory is created; on the Linux-flagged path the preferences
/// file is created outside it (as it would be on a real Linux system).
pub fn fake_host(temp: &TempDir, linux: bool) -> FakeHost {
    init_test_logging();

    let data_dir = temp.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();

    let preferences_file = temp.path().join("prefs").join("cura.cfg");
    if linux {
        std::fs::create_dir_all(preferences_file.parent().unwrap()).unwrap();
        std::fs::write(&preferences_file, "[general]\ntheme = dark\n").unwrap();
    }

    FakeHost {
        app_name: "cura".into(),
        version: "4.0.0".into(),
        data_dir,
        preferences_file,
        linux,
        notifications: Mutex::new(Vec::new()),
        settings_saves: AtomicUsize::new(0),
    }
}

// =============================================================================
// Data Tree Fixtures
// =============================================================================

/// Populate a data-storage root with the canonical shape:
/// 2 machine instances, 3 materials, 4 quality-changes profiles, 2 plugins
/// with a `plugin.json` each, plus ignored entries and a superstring decoy.
pub fn populate_data_tree(root: &Path) {
    let dirs = [
        "machine_instances",
        "materials",
        "quality_changes",
        "plugins/PluginA",
        "plugins/PluginB",
        "definitions",
        "cache",
        "plugins/PluginA/cache",
    ];
    for dir in dirs {
        std::fs::create_dir_all(root.join(dir)).unwrap();
    }

    std::fs::write(root.join("machine_instances/printer_one.inst.cfg"), "[printer one]").unwrap();
    std::fs::write(root.join("machine_instances/printer_two.inst.cfg"), "[printer two]").unwrap();

    std::fs::write(root.join("materials/pla.xml.fdm_material"), "<pla/>").unwrap();
    std::fs::write(root.join("materials/abs.xml.fdm_material"), "<abs/>").unwrap();
    std::fs::write(root.join("materials/petg.xml.fdm_material"), "<petg/>").unwrap();

    for profile in ["draft", "normal", "fine", "extra_fine"] {
        std::fs::write(
            root.join("quality_changes").join(format!("{profile}.inst.cfg")),
            format!("[{profile}]"),
        )
        .unwrap();
    }

    std::fs::write(root.join("plugins/PluginA/plugin.json"), r#"{"name": "A"}"#).unwrap();
    std::fs::write(root.join("plugins/PluginB/plugin.json"), r#"{"name": "B"}"#).unwrap();

    std::fs::write(root.join("definitions/custom.def.json"), "{}").unwrap();

    // Ignored at any depth, plus a superstring that must survive.
    std::fs::write(root.join("cura.log"), "log line").unwrap();
    std::fs::write(root.join("cache/materials.db"), "cached").unwrap();
    std::fs::write(root.join("plugins/PluginA/cache/state.bin"), "cached").unwrap();
    std::fs::write(root.join("cachefile"), "not a cache").unwrap();
}

/// Snapshot a directory tree as relative-path → bytes
pub fn snapshot_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut snapshot = BTreeMap::new();
    collect_files(root, root, &mut snapshot);
    snapshot
}

fn collect_files(base: &Path, dir: &Path, out: &mut BTreeMap<String, Vec<u8>>) {
    for entry in std::fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(base, &path, out);
        } else {
            let relative = path
                .strip_prefix(base)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            out.insert(relative, std::fs::read(&path).unwrap());
        }
    }
}

/// The canonical tree as it should look after a round trip: every file
/// except the ignored ones
pub fn snapshot_without_ignored(root: &Path) -> BTreeMap<String, Vec<u8>> {
    snapshot_tree(root)
        .into_iter()
        .filter(|(path, _)| {
            !path
                .split('/')
                .any(|segment| segment == "cura.log" || segment == "cache")
        })
        .collect()
}
