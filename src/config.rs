//! Runtime configuration shared by CLI and web mode.

use std::path::PathBuf;

use tracing::info;

use crate::schedule::{ScheduleStore, DEFAULT_STORAGE_KEY};
use crate::storage::{BackingStore, FileStore, MemoryStore};

pub type SharedBacking = Box<dyn BackingStore + Send>;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `<storage_key>.json`
    pub data_dir: PathBuf,
    pub storage_key: String,
    /// Keep everything in memory; nothing survives the process
    pub ephemeral: bool,
    pub bind: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            ephemeral: false,
            bind: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    pub fn open_store(&self) -> ScheduleStore<SharedBacking> {
        let backing: SharedBacking = if self.ephemeral {
            info!("using in-memory storage; edits will not be saved");
            Box::new(MemoryStore::new())
        } else {
            info!(data_dir = %self.data_dir.display(), key = %self.storage_key, "using file storage");
            Box::new(FileStore::new(&self.data_dir))
        };
        ScheduleStore::load(backing, self.storage_key.clone())
    }
}
