use serde::{Deserialize, Serialize};

use super::types::ScheduleCollection;
use crate::error::DecodeError;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct VersionedRef<'a> {
    version: u32,
    days: &'a ScheduleCollection,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Stored {
    Versioned { version: u32, days: ScheduleCollection },
    // Written before the version field existed: a bare day -> entries map
    Legacy(ScheduleCollection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub days: ScheduleCollection,
    /// Came from the unversioned layout; rewritten on the next save.
    pub legacy: bool,
}

pub fn encode(days: &ScheduleCollection) -> Result<String, serde_json::Error> {
    serde_json::to_string(&VersionedRef {
        version: SCHEMA_VERSION,
        days,
    })
}

pub fn decode(raw: &str) -> Result<Decoded, DecodeError> {
    match serde_json::from_str::<Stored>(raw)? {
        Stored::Versioned { version, days } => {
            if version > SCHEMA_VERSION {
                return Err(DecodeError::UnsupportedVersion {
                    found: version,
                    supported: SCHEMA_VERSION,
                });
            }
            Ok(Decoded { days, legacy: false })
        }
        Stored::Legacy(days) => Ok(Decoded { days, legacy: true }),
    }
}
