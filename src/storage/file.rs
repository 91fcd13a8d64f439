use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{validate_key, BackingStore};
use crate::error::StorageError;

/// One JSON file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn io_error(path: &Path, source: io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn write_and_replace(tmp: &Path, path: &Path, value: &str) -> Result<(), StorageError> {
    let mut file = fs::File::create(tmp).map_err(|e| io_error(tmp, e))?;
    file.write_all(value.as_bytes())
        .map_err(|e| io_error(tmp, e))?;
    file.sync_all().map_err(|e| io_error(tmp, e))?;
    drop(file);
    fs::rename(tmp, path).map_err(|e| io_error(path, e))
}

impl BackingStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        // Write beside the target and rename so readers never see a partial value
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        if let Err(e) = write_and_replace(&tmp, &path, value) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        debug!(path = %path.display(), bytes = value.len(), "persisted value");
        Ok(())
    }
}
