//! Pure path computation for a class's on-disk layout. Nothing here touches
//! the filesystem; existence checks belong to the store.

use crate::config::StorageConfig;
use std::path::PathBuf;

/// `<class_data_root>/<class_name>`
pub fn class_dir(config: &StorageConfig, class_name: &str) -> PathBuf {
    config.class_data_root.join(class_name)
}

/// `<class_data_root>/<class_name>/avatars`
pub fn avatars_dir(config: &StorageConfig, class_name: &str) -> PathBuf {
    class_dir(config, class_name).join("avatars")
}

/// `<class_data_root>/<class_name>/chart_data`
pub fn chart_data_dir(config: &StorageConfig, class_name: &str) -> PathBuf {
    class_dir(config, class_name).join("chart_data")
}

/// `<chart_save_root>/<class_name>`, the folder chart images are saved to
/// for the user.
pub fn chart_save_dir(config: &StorageConfig, class_name: &str) -> PathBuf {
    config.chart_save_root.join(class_name)
}

/// `<class_data_root>/<class_name>/<class_name><suffix>`
pub fn data_file(config: &StorageConfig, class_name: &str) -> PathBuf {
    class_dir(config, class_name).join(format!("{}{}", class_name, config.data_file_suffix))
}

/// Location of a named avatar inside the class's avatar folder. The class
/// name and file name are validated upstream; this is a plain join.
pub fn avatar_file(config: &StorageConfig, class_name: &str, avatar_filename: &str) -> PathBuf {
    avatars_dir(config, class_name).join(avatar_filename)
}

/// Resolves a student's avatar reference. `None` means the student uses the
/// application's default avatar image.
pub fn resolve_avatar(config: &StorageConfig, class_name: &str, avatar: Option<&str>) -> PathBuf {
    match avatar {
        Some(filename) => avatar_file(config, class_name, filename),
        None => config.default_avatar.clone(),
    }
}
