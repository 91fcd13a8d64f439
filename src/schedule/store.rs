use std::sync::Arc;

use tracing::{debug, info, warn};

use super::codec::{decode, encode};
use super::defaults::default_schedule;
use super::ids::IdGenerator;
use super::slot_utils::sort_by_time;
use super::types::{Confirmation, Direction, EntryPatch, NewEntry, ScheduleCollection, ScheduleEntry};
use crate::error::EntryError;
use crate::storage::BackingStore;

pub const DEFAULT_STORAGE_KEY: &str = "kyoto_itinerary_db_v1";

/// Owns the canonical schedule and mirrors every change to a backing store.
///
/// Each mutation builds a fresh collection, swaps it in as the new snapshot
/// and writes it out whole. Holders of an older `snapshot()` keep seeing the
/// state they were given. Unknown days and ids are no-ops; persistence
/// failures are logged and the in-memory state stays authoritative.
pub struct ScheduleStore<B: BackingStore> {
    backing: B,
    key: String,
    snapshot: Arc<ScheduleCollection>,
    ids: IdGenerator,
    loaded: bool,
}

impl<B: BackingStore> ScheduleStore<B> {
    /// Reads the last persisted collection, falling back to the default
    /// itinerary when nothing was saved or the save is unreadable.
    pub fn load(backing: B, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut store = Self {
            backing,
            key,
            snapshot: Arc::new(default_schedule()),
            ids: IdGenerator::new(),
            loaded: false,
        };

        match store.backing.get(&store.key) {
            Ok(Some(raw)) => match decode(&raw) {
                Ok(decoded) => {
                    if decoded.legacy {
                        info!(key = %store.key, "read unversioned schedule; it will be upgraded on next save");
                    }
                    debug!(days = decoded.days.len(), "loaded saved schedule");
                    store.snapshot = Arc::new(decoded.days);
                }
                Err(e) => {
                    warn!(key = %store.key, error = %e, "failed to parse saved schedule, using default itinerary");
                }
            },
            Ok(None) => {
                debug!(key = %store.key, "no saved schedule, using default itinerary");
            }
            Err(e) => {
                warn!(key = %store.key, error = %e, "failed to read saved schedule, using default itinerary");
            }
        }

        store.loaded = true;
        store
    }

    /// Readiness flag: true once the startup load (or its fallback) is done.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn snapshot(&self) -> Arc<ScheduleCollection> {
        Arc::clone(&self.snapshot)
    }

    pub fn day(&self, day: &str) -> &[ScheduleEntry] {
        self.snapshot.get(day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn backing(&self) -> &B {
        &self.backing
    }

    /// Gives the backing store back, e.g. to reopen it as a later session.
    pub fn into_backing(self) -> B {
        self.backing
    }

    /// Appends to `day` (created if unknown) and re-sorts it by time label.
    /// Returns the id given to the new entry.
    pub fn add_item(&mut self, day: &str, entry: NewEntry) -> Result<String, EntryError> {
        if entry.time.trim().is_empty() {
            return Err(EntryError::MissingTime);
        }
        if entry.title.trim().is_empty() {
            return Err(EntryError::MissingTitle);
        }

        let snapshot = &self.snapshot;
        let id = self
            .ids
            .next_unused(|candidate| snapshot.values().flatten().any(|e| e.id == candidate));

        let mut next = (*self.snapshot).clone();
        let items = next.entry(day.to_string()).or_default();
        items.push(entry.into_entry(id.clone()));
        sort_by_time(items);

        debug!(day, id = %id, "added entry");
        self.commit(next);
        Ok(id)
    }

    /// Returns false when `day` or `id` is not present.
    pub fn delete_item(&mut self, day: &str, id: &str) -> bool {
        let Some(items) = self.snapshot.get(day) else {
            return false;
        };
        if !items.iter().any(|e| e.id == id) {
            return false;
        }

        let mut next = (*self.snapshot).clone();
        if let Some(items) = next.get_mut(day) {
            items.retain(|e| e.id != id);
        }

        debug!(day, id, "deleted entry");
        self.commit(next);
        true
    }

    /// Merges `patch` into the entry. A patch carrying a time re-sorts the
    /// day; any other patch leaves positions alone. Returns false when `day`
    /// or `id` is not present.
    pub fn update_item(&mut self, day: &str, id: &str, patch: &EntryPatch) -> bool {
        let Some(pos) = self.position(day, id) else {
            return false;
        };

        let mut next = (*self.snapshot).clone();
        let Some(items) = next.get_mut(day) else {
            return false;
        };
        patch.apply(&mut items[pos]);
        if patch.sets_time() {
            sort_by_time(items);
        }

        debug!(day, id, resorted = patch.sets_time(), "updated entry");
        self.commit(next);
        true
    }

    /// Swaps the entry at `index` with its neighbour while each slot keeps
    /// the time it had: content moves, times stay. Moving past either end,
    /// or from an index that does not exist, is a no-op returning false.
    pub fn move_item(&mut self, day: &str, index: usize, direction: Direction) -> bool {
        let Some(items) = self.snapshot.get(day) else {
            return false;
        };
        if index >= items.len() {
            return false;
        }
        let Some(target) = direction.target(index, items.len()) else {
            return false;
        };

        let mut next = (*self.snapshot).clone();
        let Some(items) = next.get_mut(day) else {
            return false;
        };
        let time_at_index = items[index].time.clone();
        let time_at_target = items[target].time.clone();
        items.swap(index, target);
        items[index].time = time_at_index;
        items[target].time = time_at_target;

        debug!(day, from = index, to = target, "moved entry");
        self.commit(next);
        true
    }

    /// Discards every edit and restores the default itinerary, but only on
    /// an explicit `Confirmation::Confirmed`. Returns whether it reset.
    pub fn reset_to_default(&mut self, confirmation: Confirmation) -> bool {
        if confirmation != Confirmation::Confirmed {
            debug!("reset declined");
            return false;
        }
        info!("resetting schedule to default itinerary");
        self.commit(default_schedule());
        true
    }

    fn position(&self, day: &str, id: &str) -> Option<usize> {
        self.snapshot.get(day)?.iter().position(|e| e.id == id)
    }

    fn commit(&mut self, next: ScheduleCollection) {
        self.snapshot = Arc::new(next);
        self.persist();
    }

    fn persist(&mut self) {
        let raw = match encode(&self.snapshot) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to serialize schedule; change kept in memory only");
                return;
            }
        };
        if let Err(e) = self.backing.set(&self.key, &raw) {
            warn!(key = %self.key, error = %e, "failed to persist schedule; change kept in memory only");
        }
    }
}
