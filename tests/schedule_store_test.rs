//! Schedule store behaviour across simulated restarts

use itinerary_book::schedule::slot_utils::is_time_ordered;
use itinerary_book::schedule::{
    default_schedule, Confirmation, Direction, EntryPatch, NewEntry, ScheduleStore, DEFAULT_STORAGE_KEY,
};
use itinerary_book::storage::{BackingStore, FileStore, MemoryStore};

fn open(dir: &std::path::Path) -> ScheduleStore<FileStore> {
    ScheduleStore::load(FileStore::new(dir), DEFAULT_STORAGE_KEY)
}

#[test]
fn edits_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = open(dir.path());
    let id = store
        .add_item("day2", NewEntry::new("06:30", "X").description(""))
        .unwrap();
    assert!(store.update_item("day1", "d1-9", &EntryPatch::default().description("ramen")));
    assert!(store.move_item("day3", 1, Direction::Up));
    assert!(store.delete_item("day5", "d5-6"));
    let before_restart = store.snapshot();
    drop(store);

    let store = open(dir.path());
    assert!(store.is_loaded());
    assert_eq!(*store.snapshot(), *before_restart);

    assert_eq!(store.day("day2")[2].title, "X");
    assert_eq!(store.day("day2")[2].id, id);
    assert_eq!(store.day("day1")[8].description, "ramen");
}

#[test]
fn day2_scenario_move_keeps_times() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());

    let original: Vec<(String, String)> = store.day("day2")
        .iter()
        .map(|e| (e.time.clone(), e.title.clone()))
        .collect();

    assert!(store.move_item("day2", 1, Direction::Up));
    let day = store.day("day2");
    assert_eq!(day[0].time, "05:30");
    assert_eq!(day[1].time, "06:00");
    assert_eq!(day[2].time, "07:50");
    assert_eq!(day[0].title, original[1].1);
    assert_eq!(day[1].title, original[0].1);
    assert_eq!(day[2].title, original[2].1);

    assert!(store.move_item("day2", 0, Direction::Down));
    let restored: Vec<(String, String)> = store.day("day2")
        .iter()
        .map(|e| (e.time.clone(), e.title.clone()))
        .collect();
    assert_eq!(restored, original);
}

#[test]
fn reset_after_restart_restores_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    store.add_item("day4", NewEntry::new("22:00", "Karaoke")).unwrap();
    store.delete_item("day1", "d1-1");
    drop(store);

    let mut store = open(dir.path());
    assert_ne!(*store.snapshot(), default_schedule());
    assert!(!store.reset_to_default(Confirmation::Declined));
    assert_ne!(*store.snapshot(), default_schedule());
    assert!(store.reset_to_default(Confirmation::Confirmed));
    drop(store);

    let store = open(dir.path());
    assert_eq!(*store.snapshot(), default_schedule());
}

#[test]
fn corrupt_file_falls_back_and_is_replaced_on_next_edit() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("kyoto_itinerary_db_v1.json"), "{{{").unwrap();

    let mut store = open(dir.path());
    assert!(store.is_loaded());
    assert_eq!(*store.snapshot(), default_schedule());

    store.add_item("day1", NewEntry::new("08:30", "Breakfast")).unwrap();
    let expected = store.snapshot();
    drop(store);

    assert_eq!(*open(dir.path()).snapshot(), *expected);
}

#[test]
fn legacy_layout_is_upgraded_on_save() {
    let legacy = r#"{"day2":[
        {"id":"d2-1","time":"05:30","title":"A","desc":""},
        {"id":"d2-2","time":"06:00","title":"B","desc":"","highlight":true},
        {"id":"d2-3","time":"07:50","title":"C","desc":""}
    ]}"#;
    let mut store = ScheduleStore::load(
        MemoryStore::with_value(DEFAULT_STORAGE_KEY, legacy),
        DEFAULT_STORAGE_KEY,
    );
    assert_eq!(store.day("day2").len(), 3);
    assert!(store.day("day2")[1].highlight);

    store.add_item("day2", NewEntry::new("06:30", "X")).unwrap();
    let titles: Vec<&str> = store.day("day2").iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["A", "B", "X", "C"]);
    assert!(is_time_ordered(store.day("day2")));

    let raw = store.backing().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["days"]["day2"].as_array().unwrap().len(), 4);
}
