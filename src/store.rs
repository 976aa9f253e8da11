use crate::config::StorageConfig;
use crate::error::{StoreError, StoreResult};
use crate::paths;
use crate::roster::ClassData;
use log::debug;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem-backed storage for class folders, avatar images, and class
/// data files. All paths derive from the injected [`StorageConfig`].
#[derive(Debug, Clone)]
pub struct ClassStore {
    config: StorageConfig,
}

impl ClassStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Repoints chart save folders after the user changes the setting.
    /// Folders already created for existing classes stay where they are.
    pub fn set_chart_save_root(&mut self, root: impl Into<PathBuf>) {
        self.config.chart_save_root = root.into();
    }

    /// Creates the class's avatar and chart-data folders plus its chart save
    /// folder, parents included. Pre-existing directories are left alone, so
    /// calling this again for an existing class is a no-op.
    pub fn provision_class_storage(&self, class_name: &str) -> StoreResult<()> {
        let dirs = [
            paths::avatars_dir(&self.config, class_name),
            paths::chart_data_dir(&self.config, class_name),
            paths::chart_save_dir(&self.config, class_name),
        ];
        for dir in dirs {
            fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
            debug!("provisioned {}", dir.display());
        }
        Ok(())
    }

    /// Copies a source image into the class's avatar folder under
    /// `save_name`, replacing any previous file of that name. Storage must
    /// already be provisioned; a missing source fails before anything is
    /// written.
    pub fn import_avatar(
        &self,
        class_name: &str,
        source: &Path,
        save_name: &str,
    ) -> StoreResult<PathBuf> {
        if !source.is_file() {
            return Err(StoreError::NotFound(source.to_path_buf()));
        }
        let dest = paths::avatar_file(&self.config, class_name, save_name);
        fs::copy(source, &dest).map_err(|e| StoreError::io(&dest, e))?;
        debug!("imported avatar {} for {}", save_name, class_name);
        Ok(dest)
    }

    /// Serializes the class data to JSON and rewrites the class's data file
    /// wholesale. Keys keep their insertion order.
    pub fn write_class_data(&self, class_name: &str, data: &ClassData) -> StoreResult<()> {
        let path = paths::data_file(&self.config, class_name);
        let text = serde_json::to_string_pretty(data)
            .map_err(|e| StoreError::io(&path, io::Error::new(io::ErrorKind::InvalidData, e)))?;
        fs::write(&path, text).map_err(|e| StoreError::io(&path, e))?;
        debug!("wrote class data {}", path.display());
        Ok(())
    }

    /// Reads the class's data file back. A missing file is `NotFound`;
    /// anything unparsable is `Parse`.
    pub fn read_class_data(&self, class_name: &str) -> StoreResult<ClassData> {
        read_json(&paths::data_file(&self.config, class_name))
    }

    /// Loads a JSON mapping from an arbitrary path. Chart data lives outside
    /// the class data file and is addressed by full path.
    pub fn load_chart_data(&self, path: &Path) -> StoreResult<Map<String, Value>> {
        read_json(path)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> StoreResult<T> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StoreError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };
    serde_json::from_str(&text).map_err(|e| StoreError::parse(path, e))
}
