//! Tests for MemoryStorage
//!
//! The in-memory store must behave like the file store line for line.

use std::collections::HashMap;

use rollcall::record::{Record, Student};
use rollcall::storage::{AddRequest, BatchAddRequest, MemoryStorage, RecordStore};
use rollcall::RollcallError;

const MODEL: &str = Student::MODEL;

fn alice() -> Student {
    Student::new("ST1", "Alice", "alice@x.com", 20, "CS", 3.8)
}

fn bob() -> Student {
    Student::new("ST2", "Bob", "bob@x.com", 22, "CS", 3.2)
}

#[test]
fn test_empty_store() {
    let store: MemoryStorage<Student> = MemoryStorage::new();

    assert!(store.get_all(MODEL).unwrap().is_empty());
    assert_eq!(store.get(MODEL, "ST1").unwrap(), None);
    assert_eq!(store.model_count(), 0);
    store.remove(MODEL, "ST1").unwrap();
}

#[test]
fn test_add_get_remove_scenario() {
    let store = MemoryStorage::new();
    store.add(AddRequest::new(&alice())).unwrap();
    store.add(AddRequest::new(&bob())).unwrap();

    let all = store.get_all(MODEL).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0], Student::HEADER);
    assert_eq!(
        store.get(MODEL, "ST2").unwrap().as_deref(),
        Some("ST2,Bob,bob@x.com,22,CS,3.2")
    );

    store.remove(MODEL, "ST1").unwrap();
    assert_eq!(store.get_all(MODEL).unwrap().len(), 2);
    assert_eq!(store.get(MODEL, "ST1").unwrap(), None);
}

#[test]
fn test_update() {
    let store = MemoryStorage::new();
    store.add(AddRequest::new(&alice())).unwrap();

    let older = Student::new("ST1", "Alice", "alice@x.com", 21, "CS", 3.8);
    store.update(MODEL, "ST1", &older).unwrap();

    assert_eq!(
        store.get(MODEL, "ST1").unwrap().as_deref(),
        Some("ST1,Alice,alice@x.com,21,CS,3.8")
    );
    assert!(matches!(
        store.update(MODEL, "nope", &older),
        Err(RollcallError::NotFound(_))
    ));
    assert!(matches!(
        store.update("Other", "ST1", &older),
        Err(RollcallError::NotFound(_))
    ));
}

#[test]
fn test_batch_operations() {
    let store = MemoryStorage::new();
    store
        .batch_add(BatchAddRequest::new(&[alice(), bob()]))
        .unwrap();
    assert_eq!(store.get_all(MODEL).unwrap().len(), 3);

    let updates = HashMap::from([
        ("ST2".to_string(), Student::new("ST2", "Bob", "bob@x.com", 22, "CS", 3.6)),
        ("ST9".to_string(), Student::new("ST9", "Nobody", "n@x.com", 22, "CS", 1.0)),
    ]);
    store.batch_update(MODEL, updates).unwrap();
    assert!(store.get(MODEL, "ST2").unwrap().unwrap().ends_with(",3.6"));

    let before = store.get_all(MODEL).unwrap();
    let result = store.batch_update(MODEL, HashMap::from([("ST9".to_string(), bob())]));
    assert!(matches!(result, Err(RollcallError::NoMatches { .. })));
    assert_eq!(store.get_all(MODEL).unwrap(), before);
}

#[test]
fn test_value_exists_in_column() {
    let store = MemoryStorage::new();
    store.add(AddRequest::new(&alice())).unwrap();

    assert!(store.value_exists_in_column(MODEL, " alice ", 1, None).unwrap());
    assert!(!store.value_exists_in_column(MODEL, "alice", 1, Some("ST1")).unwrap());
    assert!(!store.value_exists_in_column(MODEL, "NAME", 1, None).unwrap());
}
