//! On-disk persistence: one JSON file holding groups, pinned history items
//! and settings. Unpinned history is deliberately not persisted — only pins
//! survive a restart.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::groups::Group;
use crate::history::ClipboardItem;
use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("data file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("data file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DataFile {
    #[serde(default)]
    groups: Vec<Group>,
    #[serde(default)]
    pinned_items: Vec<ClipboardItem>,
    #[serde(default)]
    settings: Settings,
}

pub struct DataManager {
    path: PathBuf,
}

impl DataManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<platform data dir>/clipstack/clipboard_data.json`, falling back to
    /// the working directory when the platform reports no data dir.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("clipstack")
            .join("clipboard_data.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load persisted state; a missing file yields empty stores and default
    /// settings rather than an error.
    pub fn load(&self) -> Result<(Vec<Group>, Vec<ClipboardItem>, Settings), PersistError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no data file yet, starting fresh");
            return Ok((Vec::new(), Vec::new(), Settings::default()));
        }
        let raw = fs::read_to_string(&self.path)?;
        let data: DataFile = serde_json::from_str(&raw)?;
        info!(
            path = %self.path.display(),
            groups = data.groups.len(),
            pinned = data.pinned_items.len(),
            "data loaded"
        );
        Ok((data.groups, data.pinned_items, data.settings))
    }

    /// Write the data file, via a sibling temp file so a crash mid-write
    /// can't truncate the previous state.
    pub fn save(
        &self,
        groups: &[Group],
        pinned_items: &[ClipboardItem],
        settings: &Settings,
    ) -> Result<(), PersistError> {
        let data = DataFile {
            groups: groups.to_vec(),
            pinned_items: pinned_items.to_vec(),
            settings: *settings,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&data)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "data saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::{GroupId, GroupItem};
    use crate::history::{ClipText, ItemId};

    fn sample_groups() -> Vec<Group> {
        vec![Group {
            id: GroupId(0),
            name: "work".into(),
            items: vec![GroupItem {
                id: ItemId(4),
                text: ClipText::plain("snippet"),
                name: None,
            }],
        }]
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let dm = DataManager::new(dir.path().join("absent.json"));
        let (groups, pinned, settings) = dm.load().unwrap();
        assert!(groups.is_empty());
        assert!(pinned.is_empty());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let dm = DataManager::new(dir.path().join("nested").join("data.json"));
        let pinned = vec![ClipboardItem {
            id: ItemId(2),
            text: ClipText::plain("pinned"),
            pinned: true,
        }];
        let mut settings = Settings::default();
        settings.set_hotkey('x');
        dm.save(&sample_groups(), &pinned, &settings).unwrap();

        let (groups, loaded_pinned, loaded_settings) = dm.load().unwrap();
        assert_eq!(groups, sample_groups());
        assert_eq!(loaded_pinned, pinned);
        assert_eq!(loaded_settings.hotkey, 'x');
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "not json").unwrap();
        let dm = DataManager::new(path);
        assert!(matches!(dm.load(), Err(PersistError::Json(_))));
    }
}
