pub mod backup;
pub mod classes;
pub mod config;
pub mod error;
pub mod menu;
pub mod paths;
pub mod registry;
pub mod roster;
pub mod settings;
pub mod store;
pub mod text;
pub mod ui;

pub use config::StorageConfig;
pub use error::{StoreError, StoreResult};
pub use roster::ClassData;
pub use store::ClassStore;
