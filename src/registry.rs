use crate::config::StorageConfig;
use crate::error::{StoreError, StoreResult};
use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// External store of registered class names. Names come back in
/// registration order.
pub trait ClassRegistry {
    /// Records a newly created class. A name can only be registered once;
    /// each registered class owns exactly one data directory.
    fn register(&mut self, class_name: &str) -> StoreResult<()>;

    /// All registered names, oldest first.
    fn class_names(&self) -> StoreResult<Vec<String>>;
}

/// Numbered class menu: `{1: first registered, 2: second, …}`. Built fresh
/// each time a menu is shown; never persisted.
pub fn class_listing<I, S>(names: I) -> BTreeMap<usize, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| (i + 1, name.into()))
        .collect()
}

/// Registry kept as a JSON array file under the class data root. The whole
/// list is rewritten on every registration.
#[derive(Debug)]
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open(config: &StorageConfig) -> Self {
        Self::new(config.registry_file())
    }

    fn load(&self) -> StoreResult<Vec<String>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            // No registry file yet means no classes yet.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        serde_json::from_str(&text).map_err(|e| StoreError::parse(&self.path, e))
    }
}

impl ClassRegistry for FileRegistry {
    fn register(&mut self, class_name: &str) -> StoreResult<()> {
        let mut names = self.load()?;
        if names.iter().any(|n| n == class_name) {
            return Err(StoreError::AlreadyRegistered(class_name.to_string()));
        }
        names.push(class_name.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let text = serde_json::to_string_pretty(&names)
            .map_err(|e| StoreError::io(&self.path, io::Error::new(io::ErrorKind::InvalidData, e)))?;
        fs::write(&self.path, text).map_err(|e| StoreError::io(&self.path, e))?;
        info!("registered class {}", class_name);
        Ok(())
    }

    fn class_names(&self) -> StoreResult<Vec<String>> {
        self.load()
    }
}
