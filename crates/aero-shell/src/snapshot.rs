//! Best-effort state persistence.
//!
//! The window list and the file nodes are serialized as JSON under two
//! separate keys through a [`StateStore`] -- the in-process analogue of
//! browser local storage. Restoration is structural: a missing key or a
//! snapshot that fails validation leaves the shell untouched.

use std::collections::BTreeMap;

use aero_types::config::DeskConfig;
use aero_types::error::{AeroError, Result};
use aero_vfs::{FileStore, FsSnapshot};
use aero_wm::{WindowManager, WmSnapshot};
use log::info;

use crate::shell::Shell;

/// Storage key for the window-manager snapshot.
pub const WINDOWS_KEY: &str = "aero.windows";
/// Storage key for the file-system snapshot.
pub const FILES_KEY: &str = "aero.files";

/// A string key-value store the shell persists into.
pub trait StateStore {
    fn put(&mut self, key: &str, value: String);
    fn get(&self, key: &str) -> Option<&str>;
    fn remove(&mut self, key: &str);
}

/// In-memory [`StateStore`], standing in for browser local storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStateStore {
    entries: BTreeMap<String, String>,
}

impl StateStore for MemoryStateStore {
    fn put(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Serialize the shell's core collections into the store, each under its
/// own key.
pub fn save_state(shell: &Shell, store: &mut dyn StateStore) -> Result<()> {
    let wm_json = serde_json::to_string(&shell.wm.to_snapshot())?;
    let fs_json = serde_json::to_string(&shell.fs.to_snapshot())?;
    store.put(WINDOWS_KEY, wm_json);
    store.put(FILES_KEY, fs_json);
    info!("state saved");
    Ok(())
}

/// Restore both collections from the store into a fresh shell. Fails
/// without side effects if either key is missing or invalid.
pub fn load_state(config: DeskConfig, store: &dyn StateStore) -> Result<Shell> {
    let wm_json = store
        .get(WINDOWS_KEY)
        .ok_or_else(|| AeroError::Snapshot(format!("missing key: {WINDOWS_KEY}")))?;
    let fs_json = store
        .get(FILES_KEY)
        .ok_or_else(|| AeroError::Snapshot(format!("missing key: {FILES_KEY}")))?;

    let wm_snap: WmSnapshot = serde_json::from_str(wm_json)?;
    let fs_snap: FsSnapshot = serde_json::from_str(fs_json)?;

    let mut shell = Shell::new(config.clone());
    shell.wm = WindowManager::from_snapshot(config, wm_snap)?;
    shell.fs = FileStore::from_snapshot(fs_snap)?;
    info!("state restored");
    Ok(shell)
}
