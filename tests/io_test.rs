// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! I/O tests: CSV loading with header normalization, CSV and JSON export

use std::fs;
use std::sync::Arc;

use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use datajoin::{CsvWriteOptions, JoinMode, Session, Table, TableError};

fn create_table() -> Table {
    let names = StringArray::from(vec!["a", "b", "c"]);
    let ys = Int64Array::from(vec![10, 20, 30]);

    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("y", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(schema, vec![Arc::new(names), Arc::new(ys)]).unwrap();
    Table::from_record_batch(batch).unwrap()
}

#[test]
fn test_csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let path = path.to_str().unwrap();

    let table = create_table();
    table.to_csv(path, &CsvWriteOptions::default()).unwrap();

    let loaded = Table::from_csv_default(path).unwrap();

    assert_eq!(loaded.num_rows(), 3);
    assert_eq!(loaded.column_names(), vec!["name", "y"]);

    let names = loaded
        .column_by_name("name")
        .unwrap()
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(names.value(0), "a");
    assert_eq!(names.value(2), "c");

    let ys = loaded
        .column_by_name("y")
        .unwrap()
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(ys.value(1), 20);
}

#[test]
fn test_csv_header_names_are_trimmed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("padded.csv");
    fs::write(&path, "name , y \na,1\nb,2\n").unwrap();

    let loaded = Table::from_csv_default(path.to_str().unwrap()).unwrap();

    assert_eq!(loaded.column_names(), vec!["name", "y"]);
}

#[test]
fn test_missing_csv_file_is_an_error() {
    let err = Table::from_csv_default("/nonexistent/input.csv").unwrap_err();
    match err {
        TableError::FileRead { path, .. } => assert_eq!(path, "/nonexistent/input.csv"),
        other => panic!("expected FileRead, got {:?}", other),
    }
}

#[test]
fn test_duplicate_header_names_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dup.csv");
    fs::write(&path, "name,name\na,b\n").unwrap();

    let err = Table::from_csv_default(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, TableError::DuplicateColumn(name) if name == "name"));
}

#[test]
fn test_json_export_is_a_records_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    let path = path.to_str().unwrap();

    let table = create_table();
    table.to_json(path).unwrap();

    let text = fs::read_to_string(path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    let records = value.as_array().expect("records orientation is an array");
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["name"], "a");
    assert_eq!(records[0]["y"], 10);
    assert_eq!(records[2]["y"], 30);
}

#[test]
fn test_session_export_without_result_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("none.csv");
    let json_path = dir.path().join("none.json");

    let session = Session::new();
    assert!(!session
        .export_csv(csv_path.to_str().unwrap(), &CsvWriteOptions::default())
        .unwrap());
    assert!(!session.export_json(json_path.to_str().unwrap()).unwrap());

    assert!(!csv_path.exists());
    assert!(!json_path.exists());
}

#[test]
fn test_session_exports_the_joined_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.json");
    let path = path.to_str().unwrap();

    let mut session = Session::new();
    session.load_left(create_table());

    let names = StringArray::from(vec!["a", "b"]);
    let zs = Int64Array::from(vec![100, 200]);
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("z", DataType::Int64, false),
    ]));
    let right = Table::from_record_batch(
        RecordBatch::try_new(schema, vec![Arc::new(names), Arc::new(zs)]).unwrap(),
    )
    .unwrap();
    session.load_right(right);

    session.join(JoinMode::Inner).unwrap();
    assert!(session.export_json(path).unwrap());

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["name"], "b");
    assert_eq!(records[1]["z"], 200);
}

#[test]
fn test_csv_export_through_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.csv");
    let path = path.to_str().unwrap();

    let mut session = Session::new();
    session.load_left(create_table());
    session.load_right(create_table());
    session.join(JoinMode::Inner).unwrap();

    assert!(session
        .export_csv(path, &CsvWriteOptions::default())
        .unwrap());

    let text = fs::read_to_string(path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("name,y"));
    assert_eq!(lines.next(), Some("a,10"));
}
