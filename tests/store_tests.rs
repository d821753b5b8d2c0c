//! Tests for InventoryStore
//!
//! These tests verify:
//! - Add/remove/update/search/list semantics
//! - Id uniqueness
//! - Hydration from the mirror on open
//! - Save → open round-trips
//! - Autosave and the dirty flag

use std::fs;

use stockroom::{Command, Config, InventoryStore, Outcome, Record, StockError, UpdateFields};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, InventoryStore) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_file(temp_dir.path().join("inventory.txt"))
        .fsync_on_save(false)
        .build();
    let store = InventoryStore::open(config).unwrap();
    (temp_dir, store)
}

fn record(id: &str, name: &str, quantity: u32, price: f64) -> Record {
    Record::new(id, name, quantity, price).unwrap()
}

fn snapshot(store: &InventoryStore) -> Vec<Record> {
    store.list_all().cloned().collect()
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_without_mirror_starts_empty() {
    let (_temp, store) = setup_temp_store();

    assert!(store.is_empty());
    assert!(!store.is_dirty());
    assert!(!store.path().exists());
}

#[test]
fn test_open_rejects_empty_path() {
    let config = Config::builder().data_file("").build();
    let result = InventoryStore::open(config);
    assert!(matches!(result, Err(StockError::Config(_))));
}

#[test]
fn test_open_loads_legacy_mirror_in_file_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("inventario.txt");
    fs::write(&path, "3,Regla,12,0.8\n1,Cuaderno,5,1.5\n2,Lapiz,30,0.25\n").unwrap();

    let store = InventoryStore::open_path(&path).unwrap();

    let ids: Vec<&str> = store.list_all().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["3", "1", "2"]);
    assert_eq!(store.get("1").unwrap().price(), 1.5);
}

#[test]
fn test_open_with_malformed_mirror_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("inventory.txt");
    // Second line is broken; the first one must not survive either
    fs::write(&path, "1,Cuaderno,5,1.5\n2,Lapiz,many,0.25\n").unwrap();

    let store = InventoryStore::open_path(&path).unwrap();

    assert!(store.is_empty());
}

#[test]
fn test_open_strict_rejects_unreadable_mirror() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("inventory.txt");
    fs::write(&path, "1,Cuaderno,5,1.5\n2,Lapiz,-3,0.25\n").unwrap();

    let result = InventoryStore::open_strict(Config::builder().data_file(&path).build());

    assert!(matches!(result, Err(StockError::Malformed { line: 2, .. })));
}

#[test]
fn test_open_strict_accepts_missing_mirror() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("inventory.txt");

    let store = InventoryStore::open_strict(Config::builder().data_file(&path).build()).unwrap();

    assert!(store.is_empty());
}

#[test]
fn test_load_error_leaves_store_empty() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();

    fs::write(store.path(), "1,Cuaderno,5\n").unwrap();
    let result = store.load();

    assert!(matches!(result, Err(StockError::Malformed { line: 1, .. })));
    assert!(store.is_empty());
}

#[test]
fn test_load_missing_file_reports_missing() {
    let (_temp, mut store) = setup_temp_store();
    let err = store.load().unwrap_err();
    assert!(err.is_missing_file());
}

// =============================================================================
// Add Tests
// =============================================================================

#[test]
fn test_add_new_id() {
    let (_temp, mut store) = setup_temp_store();

    store.add(record("A1", "Widget", 10, 2.5)).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.get("A1"), Some(&record("A1", "Widget", 10, 2.5)));
    assert!(store.is_dirty());
}

#[test]
fn test_add_duplicate_id_is_rejected() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();
    let before = snapshot(&store);

    let result = store.add(record("A1", "Gadget", 99, 9.0));

    assert!(matches!(result, Err(StockError::Duplicate(ref id)) if id == "A1"));
    assert_eq!(snapshot(&store), before);
}

#[test]
fn test_add_keeps_insertion_order() {
    let (_temp, mut store) = setup_temp_store();
    for id in ["c", "a", "b"] {
        store.add(record(id, "Thing", 1, 1.0)).unwrap();
    }

    let ids: Vec<&str> = store.list_all().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

// =============================================================================
// Remove Tests
// =============================================================================

#[test]
fn test_remove_existing_id() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();
    store.add(record("B2", "Gadget", 3, 4.0)).unwrap();

    let removed = store.remove("A1").unwrap();

    assert_eq!(removed.id(), "A1");
    assert_eq!(store.len(), 1);
    assert!(store.get("A1").is_none());
}

#[test]
fn test_remove_missing_id_changes_nothing() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();
    let before = snapshot(&store);

    let result = store.remove("Z9");

    assert!(matches!(result, Err(StockError::NotFound(ref id)) if id == "Z9"));
    assert_eq!(snapshot(&store), before);
}

#[test]
fn test_lookups_trim_the_id() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record(" A1", "Widget", 10, 2.5)).unwrap();

    assert_eq!(store.get(" A1 ").unwrap().id(), "A1");
    store.update(" A1", UpdateFields::quantity(4)).unwrap();
    assert_eq!(store.get("A1").unwrap().quantity(), 4);

    let removed = store.remove(" A1").unwrap();
    assert_eq!(removed.id(), "A1");
    assert!(store.is_empty());
}

// =============================================================================
// Update Tests
// =============================================================================

#[test]
fn test_update_quantity_only() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();

    store.update("A1", UpdateFields::quantity(4)).unwrap();

    let updated = store.get("A1").unwrap();
    assert_eq!(updated.quantity(), 4);
    assert_eq!(updated.price(), 2.5);
}

#[test]
fn test_update_price_only() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();

    store.update("A1", UpdateFields::price(3.75)).unwrap();

    let updated = store.get("A1").unwrap();
    assert_eq!(updated.quantity(), 10);
    assert_eq!(updated.price(), 3.75);
}

#[test]
fn test_update_negative_zero_price_stores_zero() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();

    let updated = store.update("A1", UpdateFields::price(-0.0)).unwrap();

    assert!(updated.price().is_sign_positive());
    assert!(updated.to_string().ends_with("Price: 0.00"));
}

#[test]
fn test_update_missing_id_changes_nothing() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();
    let before = snapshot(&store);

    let result = store.update("B2", UpdateFields::quantity(1));

    assert!(matches!(result, Err(StockError::NotFound(_))));
    assert_eq!(snapshot(&store), before);
}

#[test]
fn test_update_with_invalid_price_changes_nothing() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();
    let before = snapshot(&store);

    let changes = UpdateFields {
        quantity: Some(1),
        price: Some(-2.0),
    };
    let result = store.update("A1", changes);

    assert!(matches!(result, Err(StockError::InvalidRecord(_))));
    assert_eq!(snapshot(&store), before);
}

#[test]
fn test_empty_update_does_not_mark_dirty() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();
    store.save().unwrap();

    store.update("A1", UpdateFields::default()).unwrap();

    assert!(!store.is_dirty());
}

// =============================================================================
// Search / List Tests
// =============================================================================

#[test]
fn test_search_by_name_is_case_insensitive() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("1", "El principito", 3, 12.0)).unwrap();
    store.add(record("2", "Don Quijote", 1, 20.0)).unwrap();

    let found = store.search_by_name("principito");
    assert_eq!(found, vec![record("1", "El principito", 3, 12.0)]);

    let found = store.search_by_name("PRINCIPITO");
    assert_eq!(found.len(), 1);
}

#[test]
fn test_search_without_matches_is_empty() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("1", "El principito", 3, 12.0)).unwrap();

    assert!(store.search_by_name("hobbit").is_empty());
}

#[test]
fn test_search_returns_every_match_in_order() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("1", "Blue pen", 3, 1.0)).unwrap();
    store.add(record("2", "Pencil", 3, 1.0)).unwrap();
    store.add(record("3", "Red Pen", 3, 1.0)).unwrap();

    let ids: Vec<String> = store
        .search_by_name("pen")
        .iter()
        .map(|r| r.id().to_string())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn test_total_value() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();
    store.add(record("B2", "Gadget", 2, 4.0)).unwrap();

    assert_eq!(store.total_value(), 33.0);
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_save_then_open_round_trip() {
    let (temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();
    store.add(record("B2", "Nuts, bolts and washers", 250, 0.05)).unwrap();
    store.add(record("#3", "Back\\slash\nand newline", 0, 0.1 + 0.2)).unwrap();
    store.add(record("C4", "El principito", 7, 12.0)).unwrap();

    assert_eq!(store.save().unwrap(), 4);
    assert!(!store.is_dirty());

    let reopened = InventoryStore::open_path(&temp.path().join("inventory.txt")).unwrap();
    assert_eq!(snapshot(&reopened), snapshot(&store));
}

#[test]
fn test_save_replaces_previous_content() {
    let (temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();
    store.add(record("B2", "Gadget", 2, 4.0)).unwrap();
    store.save().unwrap();

    store.remove("A1").unwrap();
    store.save().unwrap();

    let reopened = InventoryStore::open_path(&temp.path().join("inventory.txt")).unwrap();
    assert_eq!(reopened.len(), 1);
    assert!(reopened.get("A1").is_none());
}

#[test]
fn test_save_leaves_no_temp_file() {
    let (temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();
    store.save().unwrap();

    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["inventory.txt".to_string()]);
}

#[test]
fn test_save_creates_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("inventory.txt");
    let mut store = InventoryStore::open_path(&path).unwrap();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();

    store.save().unwrap();

    assert!(path.exists());
}

#[test]
fn test_mutations_do_not_save_without_autosave() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();

    assert!(!store.path().exists());
}

#[test]
fn test_autosave_writes_after_each_mutation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("inventory.txt");
    let config = Config::builder()
        .data_file(&path)
        .fsync_on_save(false)
        .autosave(true)
        .build();
    let mut store = InventoryStore::open(config).unwrap();

    store.add(record("A1", "Widget", 10, 2.5)).unwrap();
    assert!(!store.is_dirty());
    assert_eq!(InventoryStore::open_path(&path).unwrap().len(), 1);

    store.update("A1", UpdateFields::quantity(3)).unwrap();
    let reopened = InventoryStore::open_path(&path).unwrap();
    assert_eq!(reopened.get("A1").unwrap().quantity(), 3);

    store.remove("A1").unwrap();
    assert!(InventoryStore::open_path(&path).unwrap().is_empty());
}

#[test]
fn test_corrupted_mirror_is_ignored_on_open() {
    let (temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();
    store.save().unwrap();

    let path = temp.path().join("inventory.txt");
    let tampered = fs::read_to_string(&path).unwrap().replace("10", "11");
    fs::write(&path, tampered).unwrap();

    let reopened = InventoryStore::open_path(&path).unwrap();
    assert!(reopened.is_empty());
}

#[test]
fn test_unreadable_mirror_is_backed_up_before_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("inventory.txt");
    let original = "1,Cuaderno,5,1.5\n2,Lapiz,-3,0.25\n";
    fs::write(&path, original).unwrap();
    let config = Config::builder()
        .data_file(&path)
        .fsync_on_save(false)
        .autosave(true)
        .build();

    let mut store = InventoryStore::open(config).unwrap();
    assert!(store.is_empty());
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();

    let backup = store.backup_path();
    assert_eq!(backup, temp_dir.path().join("inventory.txt.bak"));
    assert_eq!(fs::read_to_string(&backup).unwrap(), original);
    assert_eq!(InventoryStore::open_path(&path).unwrap().len(), 1);

    // Only the first overwrite keeps a copy
    store.add(record("B2", "Gadget", 3, 4.0)).unwrap();
    assert_eq!(fs::read_to_string(&backup).unwrap(), original);
}

#[test]
fn test_readable_mirror_is_not_backed_up() {
    let (_temp, mut store) = setup_temp_store();
    store.add(record("A1", "Widget", 10, 2.5)).unwrap();
    store.save().unwrap();

    store.load().unwrap();
    store.save().unwrap();

    assert!(!store.backup_path().exists());
}

// =============================================================================
// Command Execution Tests
// =============================================================================

#[test]
fn test_execute_routes_commands() {
    let (_temp, mut store) = setup_temp_store();

    let outcome = store
        .execute(Command::Add(record("A1", "Widget", 10, 2.5)))
        .unwrap();
    assert_eq!(outcome, Outcome::Added(record("A1", "Widget", 10, 2.5)));

    let outcome = store
        .execute(Command::Update {
            id: "A1".to_string(),
            changes: UpdateFields::price(3.0),
        })
        .unwrap();
    assert_eq!(outcome, Outcome::Updated(record("A1", "Widget", 10, 3.0)));

    let outcome = store
        .execute(Command::Search {
            term: "widg".to_string(),
        })
        .unwrap();
    assert_eq!(outcome, Outcome::Found(vec![record("A1", "Widget", 10, 3.0)]));

    let outcome = store.execute(Command::Save).unwrap();
    assert_eq!(outcome, Outcome::Saved(1));

    let outcome = store.execute(Command::List).unwrap();
    assert_eq!(outcome, Outcome::Listed(vec![record("A1", "Widget", 10, 3.0)]));
}

#[test]
fn test_execute_reports_errors() {
    let (_temp, mut store) = setup_temp_store();

    let result = store.execute(Command::Remove {
        id: "nope".to_string(),
    });
    assert!(matches!(result, Err(StockError::NotFound(_))));
}

#[test]
fn test_command_names() {
    assert_eq!(Command::Remove { id: "x".into() }.name(), "remove");
    assert_eq!(Command::List.name(), "list");
    assert_eq!(Command::Save.name(), "save");
}

// =============================================================================
// End-to-End Scenario
// =============================================================================

#[test]
fn test_end_to_end_widget_lifecycle() {
    let (_temp, mut store) = setup_temp_store();
    assert!(store.is_empty());

    store.add(record("A1", "Widget", 10, 2.5)).unwrap();
    assert!(store.add(record("A1", "Widget", 10, 2.5)).is_err());
    assert_eq!(store.len(), 1);

    store.update("A1", UpdateFields::quantity(5)).unwrap();
    assert_eq!(store.get("A1").unwrap().quantity(), 5);
    assert_eq!(store.get("A1").unwrap().price(), 2.5);

    store.remove("A1").unwrap();
    assert!(store.is_empty());
}
