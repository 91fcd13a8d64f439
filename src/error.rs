use std::path::PathBuf;

/// Failures of the durable key-value layer. The schedule store logs and
/// swallows these; only direct users of a `BackingStore` ever see them.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Rejection of a new entry before it reaches the schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("Time is required")]
    MissingTime,

    #[error("Title is required")]
    MissingTitle,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column: {0}")]
    MissingColumn(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a persisted schedule could not be used. Load falls back to the
/// default itinerary on any of these.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid schedule JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported schedule version {found} (this build reads up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}
