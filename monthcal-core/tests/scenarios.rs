use chrono::NaiveDate;
use monthcal_core::date_range::MonthGrid;
use monthcal_core::day_index::DayIndex;
use monthcal_core::export::{ExportFormat, export_month};
use monthcal_core::storage::{EVENTS_KEY, FileStore, KeyValueStore};
use monthcal_core::store::serialize_events;
use monthcal_core::{Event, EventColor, EventDraft, EventStore, MoveOutcome, MoveRequest, Outcome};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(name: &str, date: &str) -> EventDraft {
    EventDraft::new(
        date.parse().unwrap(),
        name,
        "09:00".parse().unwrap(),
        "09:15".parse().unwrap(),
    )
}

#[test]
fn test_standup_shows_up_in_its_month() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = EventStore::open(FileStore::new(dir.path())).unwrap();

    store
        .add(draft("Standup", "2024-03-15").with_color(EventColor::Blue))
        .unwrap();

    let march = store.by_month(ymd(2024, 3, 1));
    assert_eq!(march.len(), 1);
    assert_eq!(march[0].name, "Standup");
    assert_eq!(march[0].color, EventColor::Blue);
}

#[test]
fn test_drag_and_drop_move_between_days() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = EventStore::open(FileStore::new(dir.path())).unwrap();

    store.add(draft("One", "2024-03-15")).unwrap();
    store.add(draft("Two", "2024-03-15")).unwrap();
    let third = store.add(draft("Three", "2024-03-16")).unwrap();

    let outcome = store
        .apply_move(MoveRequest::new(third.id.clone(), ymd(2024, 3, 15)))
        .unwrap();

    assert_eq!(outcome, MoveOutcome::Moved { from: ymd(2024, 3, 16) });
    assert_eq!(store.by_date(ymd(2024, 3, 15)).len(), 3);
    assert_eq!(store.by_date(ymd(2024, 3, 16)).len(), 0);
}

#[test]
fn test_changes_survive_reopening_from_disk() {
    let dir = tempfile::tempdir().unwrap();

    let (kept, edited) = {
        let mut store = EventStore::open(FileStore::new(dir.path())).unwrap();
        let kept = store.add(draft("Keep", "2024-03-01")).unwrap();
        let dropped = store.add(draft("Drop", "2024-03-02")).unwrap();
        let edited = store
            .add(draft("Edit", "2024-03-03").with_description("before"))
            .unwrap();

        assert_eq!(store.remove(&dropped.id).unwrap(), Outcome::Applied);
        let patch = monthcal_core::EventPatch {
            description: Some("after".into()),
            ..Default::default()
        };
        assert_eq!(store.update(&edited.id, patch).unwrap(), Outcome::Applied);
        (kept, edited)
    };

    let store = EventStore::open(FileStore::new(dir.path())).unwrap();
    let names: Vec<_> = store.all().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Keep", "Edit"]);
    assert_eq!(store.get(&kept.id), Some(&kept));
    assert_eq!(
        store.get(&edited.id).unwrap().description.as_deref(),
        Some("after")
    );
}

#[test]
fn test_reads_events_saved_by_earlier_versions() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStore::new(dir.path());
    storage
        .set_item(
            EVENTS_KEY,
            r#"[{"id":"1710496800000","date":"2024-03-15","name":"Standup","startTime":"09:00","endTime":"09:15","description":"","color":"bg-blue-100"}]"#,
        )
        .unwrap();

    let store = EventStore::open(storage).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.by_date(ymd(2024, 3, 15))[0].id, "1710496800000");
}

#[test]
fn test_persisted_format_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = EventStore::open(FileStore::new(dir.path())).unwrap();
    store.add(draft("A", "2024-03-15").with_description("x, \"y\"")).unwrap();
    store.add(draft("B", "2024-02-29").with_color(EventColor::Yellow)).unwrap();

    let raw = serialize_events(store.all()).unwrap();
    let parsed: Vec<Event> = serde_json::from_str(&raw).unwrap();

    assert_eq!(parsed, store.all());
}

#[test]
fn test_grid_rendering_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = EventStore::open(FileStore::new(dir.path())).unwrap();
    store.add(draft("Leading", "2024-02-26")).unwrap();
    store.add(draft("In month", "2024-03-10")).unwrap();
    store.add(draft("Outside", "2024-05-01")).unwrap();

    let grid = MonthGrid::for_date(ymd(2024, 3, 20));
    let index = DayIndex::for_grid(store.all(), &grid);

    let shown: usize = grid.days().map(|d| index.count_on(d)).sum();
    assert_eq!(shown, 2);
    assert_eq!(store.by_month(grid.reference).len(), 1);
}

#[test]
fn test_export_of_stored_month() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = EventStore::open(FileStore::new(dir.path())).unwrap();
    store.add(draft("March", "2024-03-15")).unwrap();
    store.add(draft("April", "2024-04-15")).unwrap();

    let file = export_month(store.all(), ymd(2024, 3, 1), ExportFormat::Csv).unwrap();
    let written = file.write_to(&dir.path().join("exports")).unwrap();

    let written = std::fs::read_to_string(written.path).unwrap();
    let mut lines = written.lines();
    assert_eq!(
        lines.next(),
        Some("id,date,name,startTime,endTime,description,color")
    );
    assert!(lines.next().unwrap().contains("\"March\""));
    assert_eq!(lines.next(), None);
}
