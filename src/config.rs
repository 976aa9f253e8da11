use std::path::{Path, PathBuf};

/// File-type suffix for class data files.
pub const DATA_FILE_SUFFIX: &str = ".cld";
/// Registry of known class names, kept under the class data root.
pub const REGISTRY_FILE_NAME: &str = "class_registry.json";
/// User settings file, kept in the application home.
pub const SETTINGS_FILE_NAME: &str = "settings.json";
/// Image used for students without an avatar of their own.
pub const DEFAULT_AVATAR_FILE_NAME: &str = "default_avatar.png";

/// Locations and naming rules the storage layer operates under. Built once at
/// startup and passed in explicitly; nothing in the core reads global state.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    /// Root holding one folder per class.
    pub class_data_root: PathBuf,
    /// Root the user-facing chart save folders are created under.
    pub chart_save_root: PathBuf,
    /// Fallback avatar image path.
    pub default_avatar: PathBuf,
    /// Suffix appended to a class name to form its data file name.
    pub data_file_suffix: String,
}

impl StorageConfig {
    /// Standard layout with everything under one application home directory.
    pub fn under_home(home: &Path) -> Self {
        Self {
            class_data_root: home.join("class_data"),
            chart_save_root: home.join("chart_saves"),
            default_avatar: home.join(DEFAULT_AVATAR_FILE_NAME),
            data_file_suffix: DATA_FILE_SUFFIX.to_string(),
        }
    }

    pub fn registry_file(&self) -> PathBuf {
        self.class_data_root.join(REGISTRY_FILE_NAME)
    }
}

/// Per-user application home, next to other desktop app data.
pub fn default_home() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("classbook")
}
