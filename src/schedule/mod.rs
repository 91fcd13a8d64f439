pub mod types;
pub mod slot_utils;
pub mod ids;
pub mod codec;
pub mod days;
pub mod defaults;
pub mod store;

pub use types::{Confirmation, Direction, EntryPatch, NewEntry, ScheduleCollection, ScheduleEntry};
pub use slot_utils::{is_time_label, normalize_time_label, sort_by_time};
pub use days::{day_info, maps_search_link, DayInfo, DAYS};
pub use defaults::default_schedule;
pub use store::{ScheduleStore, DEFAULT_STORAGE_KEY};
