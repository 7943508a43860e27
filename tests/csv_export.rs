//! CSV export over a streamed board.

mod common;

use common::{board_json, item_json, numbered_items, FakeBoard};
use monday_sync::{export_board_csv, AppError, BoardConnector, BoardId};
use pretty_assertions::assert_eq;

fn board_id() -> BoardId {
    BoardId::parse("https://acme.monday.com/boards/4001/views/12").unwrap()
}

#[test]
fn test_export_writes_header_and_one_row_per_item_with_name_column_filled() {
    let fake = FakeBoard::new(
        board_json(Some(3), &[("a", "A"), ("b", "B")]),
        vec![
            item_json("1", Some("a"), &["11", "12"]),
            item_json("2", Some("b"), &[]),
            item_json("3", None, &[]),
        ],
    );
    let connector = BoardConnector::new(&fake);

    let mut out = Vec::new();
    let rows = export_board_csv(&connector, &board_id(), &mut out).unwrap();
    assert_eq!(rows, 3);

    let csv = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#""id","name","group","Name","Status","Due date""#,
            r#""1","Item 1","A","Item 1","Done","2026-01-15""#,
            r#""2","Item 2","B","Item 2","Done","2026-01-15""#,
            r#""3","Item 3","","Item 3","Done","2026-01-15""#,
        ]
    );
}

#[test]
fn test_export_of_empty_board_is_header_only() {
    let fake = FakeBoard::new(board_json(Some(0), &[]), Vec::new());
    let mut out = Vec::new();
    let rows = export_board_csv(&BoardConnector::new(&fake), &board_id(), &mut out).unwrap();

    assert_eq!(rows, 0);
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    assert_eq!(fake.page_requests(), 0);
}

#[test]
fn test_export_quotes_embedded_quotes() {
    let mut item = item_json("1", None, &[]);
    item["name"] = serde_json::json!("Say \"hi\", then leave");
    let fake = FakeBoard::new(board_json(Some(1), &[]), vec![item]);

    let mut out = Vec::new();
    export_board_csv(&BoardConnector::new(&fake), &board_id(), &mut out).unwrap();
    let csv = String::from_utf8(out).unwrap();
    assert!(csv.contains(r#""Say ""hi"", then leave""#));
}

#[test]
fn test_export_stops_on_page_failure() {
    let fake = FakeBoard::new(board_json(Some(5), &[]), numbered_items(5)).failing_on_page(1);
    let connector = BoardConnector::new(&fake).with_page_size(2);

    let mut out = Vec::new();
    let err = export_board_csv(&connector, &board_id(), &mut out).unwrap_err();
    assert!(matches!(err, AppError::Http { status: 500, .. }));
}
