//! Integration tests for a session's on-disk lifecycle: start, tool calls,
//! compaction, end.

use std::fs;
use std::time::{Duration, SystemTime};

use chrono::NaiveDate;
use hookkit_core::sessions::short_session_id;
use hookkit_core::{
    find_files, Advisory, CompactionAdvisor, FindOptions, SessionEndOutcome, SessionStore,
    StorageConfig,
};
use tempfile::TempDir;

fn day(d: u32, h: u32, m: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, d)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

#[test]
fn test_full_session_lifecycle() {
    let temp = TempDir::new().unwrap();
    let storage = StorageConfig::with_root(temp.path().to_path_buf());
    let store = SessionStore::new(storage.clone());
    let short_id = short_session_id(Some("7c9e6679-7425-40de-944b-e07fc1f90ae7"), || None);
    assert_eq!(short_id, "c1f90ae7");

    // Fresh home: nothing to report, nothing created.
    let report = store.scan_recent(&storage.learned_skills_dir());
    assert!(report.recent_sessions.is_empty());
    assert!(!storage.sessions_dir().exists());

    let created = store.end_session(&short_id, &day(2, 10, 0)).unwrap();
    assert!(matches!(created, SessionEndOutcome::Created(_)));

    let advisor = CompactionAdvisor::new(&storage, &short_id, 2);
    assert_eq!(advisor.tick().unwrap().advisory, None);
    assert_eq!(
        advisor.tick().unwrap().advisory,
        Some(Advisory::ThresholdReached { threshold: 2 })
    );

    let marker = store.record_compaction(&day(2, 11, 15)).unwrap();
    assert_eq!(marker.annotated.as_deref(), Some(created.path()));

    let updated = store.end_session(&short_id, &day(2, 12, 30)).unwrap();
    assert_eq!(updated, SessionEndOutcome::Updated(created.path().to_path_buf()));

    let content = fs::read_to_string(created.path()).unwrap();
    assert!(content.starts_with("# Session: 2026-03-02\n"));
    assert!(content.contains("**Started:** 10:00\n"));
    assert!(content.contains("**Last Updated:** 12:30\n"));
    assert!(content.contains("**[Compaction occurred at 11:15]** - Context was summarized"));

    let report = store.scan_recent(&storage.learned_skills_dir());
    assert_eq!(report.recent_sessions.len(), 1);
    assert_eq!(
        report.latest().map(|m| m.path.as_path()),
        Some(created.path())
    );
}

#[test]
fn test_seven_day_window_boundaries() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("sessions");
    fs::create_dir_all(&dir).unwrap();

    let now = SystemTime::now();
    let files = [
        ("2026-03-01-aaaa0001-session.tmp", 6 * 86_400),
        ("2026-02-27-aaaa0002-session.tmp", 8 * 86_400),
        ("2026-03-06-aaaa0003-session.tmp", 3600),
    ];
    for (name, age) in files {
        let path = dir.join(name);
        fs::write(&path, "x").unwrap();
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(now - Duration::from_secs(age))
            .unwrap();
    }

    let found = find_files(&dir, "*-session.tmp", FindOptions::max_age_days(7));
    let names: Vec<_> = found
        .iter()
        .map(|m| m.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "2026-03-06-aaaa0003-session.tmp".to_string(),
            "2026-03-01-aaaa0001-session.tmp".to_string(),
        ]
    );
}

#[test]
fn test_separate_sessions_same_day() {
    let temp = TempDir::new().unwrap();
    let storage = StorageConfig::with_root(temp.path().to_path_buf());
    let store = SessionStore::new(storage.clone());

    store.end_session("11112222", &day(5, 9, 0)).unwrap();
    store.end_session("33334444", &day(5, 9, 5)).unwrap();
    store.end_session("11112222", &day(5, 18, 0)).unwrap();

    let records = find_files(
        &storage.sessions_dir(),
        "*-session.tmp",
        FindOptions::default(),
    );
    assert_eq!(records.len(), 2);
}
