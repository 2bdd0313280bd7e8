use std::fs;

use super_trooper::error::GameError;
use super_trooper::highscores::*;
use super_trooper::ports::ScoreStore;

#[test]
fn missing_file_is_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonScoreStore::new(dir.path().join("scores.json"));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn scores_persist_across_stores() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("scores.json");

    let mut store = JsonScoreStore::new(&path);
    let (table, rank) = store
        .record_if_qualifies(ScoreEntry::new("ada", 120, 2))
        .unwrap();
    assert_eq!(rank, Some(1));
    assert_eq!(table.len(), 1);

    let (_, rank) = store
        .record_if_qualifies(ScoreEntry::new("bob", 300, 3))
        .unwrap();
    assert_eq!(rank, Some(1));

    let mut reopened = JsonScoreStore::new(&path);
    let table = reopened.load().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table[0].name, "bob");
    assert_eq!(table[1].name, "ada");
}

#[test]
fn non_qualifying_score_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    let mut store = JsonScoreStore::new(&path);

    let (table, rank) = store.record_if_qualifies(ScoreEntry::new("zero", 0, 1)).unwrap();
    assert_eq!(rank, None);
    assert!(table.is_empty());
    assert!(!path.exists());
}

#[test]
fn table_keeps_top_ten() {
    let mut store = MemoryScoreStore::new();
    for i in 1..=12u64 {
        store.record_if_qualifies(ScoreEntry::new(format!("p{i}"), i * 10, 1)).unwrap();
    }
    let table = store.load().unwrap();
    assert_eq!(table.len(), MAX_HIGH_SCORES);
    assert_eq!(table[0].score, 120);
    assert_eq!(table[MAX_HIGH_SCORES - 1].score, 30);

    let (_, rank) = store.record_if_qualifies(ScoreEntry::new("low", 25, 1)).unwrap();
    assert_eq!(rank, None);
}

#[test]
fn hand_edited_file_is_reordered() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    fs::write(
        &path,
        r#"{"entries":[{"name":"a","score":5,"level":1},{"name":"b","score":50,"level":2}]}"#,
    )
    .unwrap();

    let table = JsonScoreStore::new(&path).load().unwrap();
    assert_eq!(table[0].name, "b");
}

#[test]
fn corrupt_file_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    fs::write(&path, "not json").unwrap();

    let err = JsonScoreStore::new(&path).load().unwrap_err();
    assert!(matches!(err, GameError::Format(_)));
}
