//! End-to-end flow through the public API: submit, search, export, delete,
//! clear, with the collection persisted to a JSON file.

use chrono::{NaiveDate, NaiveDateTime};
use inventario::{
    ExportError, Inventory, JsonFile, ParseError, Status, SubmitError, export_csv,
};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 5, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

const BATCH: &str = "\
130x24 speed 250 (02/06/26)
5x12 Speed Stick (10/05/26)
10x6 agua mineral (15/09/26)
";

#[test]
fn test_full_flow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventario.json");

    let mut inventory = Inventory::load(JsonFile::new(&path)).unwrap();
    assert_eq!(inventory.submit(BATCH, now()).unwrap(), 3);

    // Insertion order is kept in the collection, urgency order in the view.
    let stored: Vec<&str> = inventory
        .records()
        .iter()
        .map(|r| r.product_name())
        .collect();
    assert_eq!(stored, vec!["speed 250", "Speed Stick", "agua mineral"]);

    let view = inventory.visible("");
    let shown: Vec<(&str, Status)> = view
        .iter()
        .map(|v| (v.record.product_name(), v.status))
        .collect();
    assert_eq!(
        shown,
        vec![
            ("Speed Stick", Status::Critical),
            ("speed 250", Status::Moderate),
            ("agua mineral", Status::Normal),
        ]
    );

    let speed = inventory.visible("SPEED");
    assert_eq!(speed.len(), 2);
    let csv = export_csv(&speed).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(!csv.contains("agua"));

    // A bad second submission adds nothing and names the bad line.
    let err = inventory
        .submit("1x1 ok (01/01/27)\n1x1 roto (1/1/27)", now())
        .unwrap_err();
    match err {
        SubmitError::Parse(ParseError::Format { line, .. }) => {
            assert_eq!(line, "1x1 roto (1/1/27)")
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(inventory.len(), 3);

    // Delete one record; the others keep their ids.
    let ids: Vec<_> = inventory.records().iter().map(|r| r.id()).collect();
    assert!(inventory.delete(ids[0]).unwrap());

    let reloaded = Inventory::load(JsonFile::new(&path)).unwrap();
    let reloaded_ids: Vec<_> = reloaded.records().iter().map(|r| r.id()).collect();
    assert_eq!(reloaded_ids, vec![ids[1], ids[2]]);

    inventory.clear().unwrap();
    let reloaded = Inventory::load(JsonFile::new(&path)).unwrap();
    assert!(reloaded.is_empty());
}

#[test]
fn test_export_with_no_matches_is_empty_condition() {
    let dir = tempfile::tempdir().unwrap();
    let mut inventory = Inventory::load(JsonFile::new(dir.path().join("inv.json"))).unwrap();
    inventory.submit(BATCH, now()).unwrap();

    let view = inventory.visible("no existe");
    assert!(matches!(export_csv(&view), Err(ExportError::Empty)));
}
