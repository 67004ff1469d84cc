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

//! Equality join tests: key inference, the four key-matching modes, and
//! their error surfaces

use std::sync::Arc;

use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use datajoin::join::{infer_join_keys, join};
use datajoin::{JoinError, JoinMode, Table};

/// Left table:
/// name | x | y
/// -----|---|---
/// a    | 1 | 10
/// b    | 2 | 20
/// c    | 1 | 30
fn create_left_table() -> Table {
    let names = StringArray::from(vec!["a", "b", "c"]);
    let xs = Int64Array::from(vec![1, 2, 1]);
    let ys = Int64Array::from(vec![10, 20, 30]);

    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("x", DataType::Int64, false),
        Field::new("y", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema,
        vec![Arc::new(names), Arc::new(xs), Arc::new(ys)],
    )
    .unwrap();

    Table::from_record_batch(batch).unwrap()
}

/// Right table:
/// name | x | z
/// -----|---|---
/// a    | 1 | 100
/// b    | 9 | 200
/// d    | 4 | 300
fn create_right_table() -> Table {
    let names = StringArray::from(vec!["a", "b", "d"]);
    let xs = Int64Array::from(vec![1, 9, 4]);
    let zs = Int64Array::from(vec![100, 200, 300]);

    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("x", DataType::Int64, false),
        Field::new("z", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema,
        vec![Arc::new(names), Arc::new(xs), Arc::new(zs)],
    )
    .unwrap();

    Table::from_record_batch(batch).unwrap()
}

fn string_column<'a>(table: &'a Table, name: &str) -> &'a StringArray {
    table
        .column_by_name(name)
        .unwrap()
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap()
}

fn int_column<'a>(table: &'a Table, name: &str) -> &'a Int64Array {
    table
        .column_by_name(name)
        .unwrap()
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap()
}

#[test]
fn test_key_inference_name_plus_shared_columns() {
    let left = create_left_table();
    let right = create_right_table();

    let keys = infer_join_keys(&left, &right).unwrap();
    assert_eq!(keys, vec!["name".to_string(), "x".to_string()]);
}

#[test]
fn test_inner_join_single_match() {
    let left = create_left_table();
    let right = create_right_table();

    let result = join(&left, &right, JoinMode::Inner).unwrap().unwrap();

    // Only (a, 1) matches on the full key tuple; (b, 2) vs (b, 9) does not
    assert_eq!(result.num_rows(), 1, "inner join should have 1 row");
    assert_eq!(
        result.column_names(),
        vec!["name", "x", "y", "z"],
        "keys unsuffixed and once, then unique non-key columns"
    );

    assert_eq!(string_column(&result, "name").value(0), "a");
    assert_eq!(int_column(&result, "x").value(0), 1);
    assert_eq!(int_column(&result, "y").value(0), 10);
    assert_eq!(int_column(&result, "z").value(0), 100);
}

#[test]
fn test_inner_join_name_mismatch_yields_no_rows() {
    let names_a = StringArray::from(vec!["a"]);
    let xs_a = Int64Array::from(vec![1]);
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("x", DataType::Int64, false),
    ]));
    let left = Table::from_record_batch(
        RecordBatch::try_new(schema.clone(), vec![Arc::new(names_a), Arc::new(xs_a)]).unwrap(),
    )
    .unwrap();

    let names_b = StringArray::from(vec!["b"]);
    let xs_b = Int64Array::from(vec![1]);
    let right = Table::from_record_batch(
        RecordBatch::try_new(schema, vec![Arc::new(names_b), Arc::new(xs_b)]).unwrap(),
    )
    .unwrap();

    let result = join(&left, &right, JoinMode::Inner).unwrap().unwrap();
    assert_eq!(result.num_rows(), 0, "equal x but different name must not match");
}

#[test]
fn test_left_join_preserves_left_rows_and_null_fills() {
    let left = create_left_table();
    let right = create_right_table();

    let result = join(&left, &right, JoinMode::Left).unwrap().unwrap();

    assert_eq!(result.num_rows(), 3, "left join keeps every left row");

    let names = string_column(&result, "name");
    assert_eq!(names.value(0), "a");
    assert_eq!(names.value(1), "b");
    assert_eq!(names.value(2), "c");

    let zs = int_column(&result, "z");
    assert_eq!(zs.value(0), 100);
    assert!(zs.is_null(1), "unmatched left row has null right columns");
    assert!(zs.is_null(2));

    // left-side columns never null-fill in a left join
    let ys = int_column(&result, "y");
    assert_eq!(ys.value(1), 20);
}

#[test]
fn test_right_join_preserves_right_rows_and_null_fills() {
    let left = create_left_table();
    let right = create_right_table();

    let result = join(&left, &right, JoinMode::Right).unwrap().unwrap();

    assert_eq!(result.num_rows(), 3, "right join keeps every right row");

    // key columns coalesce from the right side for unmatched rows
    let names = string_column(&result, "name");
    assert_eq!(names.value(0), "a");
    assert_eq!(names.value(1), "b");
    assert_eq!(names.value(2), "d");

    let xs = int_column(&result, "x");
    assert_eq!(xs.value(1), 9);
    assert_eq!(xs.value(2), 4);

    let ys = int_column(&result, "y");
    assert_eq!(ys.value(0), 10);
    assert!(ys.is_null(1));
    assert!(ys.is_null(2));
}

#[test]
fn test_outer_join_is_union_of_both_sides() {
    let left = create_left_table();
    let right = create_right_table();

    let result = join(&left, &right, JoinMode::Outer).unwrap().unwrap();

    // 1 matched pair + 2 left-only + 2 right-only
    assert_eq!(result.num_rows(), 5, "outer join should have 5 rows");

    // left rows first in left order, then unmatched right rows in right order
    let names = string_column(&result, "name");
    let found: Vec<&str> = (0..names.len()).map(|i| names.value(i)).collect();
    assert_eq!(found, vec!["a", "b", "c", "b", "d"]);

    // the key columns are never null in an outer join of non-null keys
    for i in 0..result.num_rows() {
        assert!(!names.is_null(i), "key column must coalesce, row {}", i);
    }
}

#[test]
fn test_left_join_emits_every_match_per_left_row() {
    let left = create_left_table();

    // two right rows matching (a, 1)
    let names = StringArray::from(vec!["a", "a"]);
    let xs = Int64Array::from(vec![1, 1]);
    let zs = Int64Array::from(vec![100, 101]);
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("x", DataType::Int64, false),
        Field::new("z", DataType::Int64, false),
    ]));
    let right = Table::from_record_batch(
        RecordBatch::try_new(schema, vec![Arc::new(names), Arc::new(xs), Arc::new(zs)]).unwrap(),
    )
    .unwrap();

    let result = join(&left, &right, JoinMode::Left).unwrap().unwrap();

    assert_eq!(result.num_rows(), 4, "one left row fans out to both matches");
    let zs = int_column(&result, "z");
    assert_eq!(zs.value(0), 100, "matches emit in right-row order");
    assert_eq!(zs.value(1), 101);
}

#[test]
fn test_missing_name_column_is_a_join_error() {
    let left = create_left_table();

    let ids = Int64Array::from(vec![1, 2]);
    let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, false)]));
    let right = Table::from_record_batch(
        RecordBatch::try_new(schema, vec![Arc::new(ids)]).unwrap(),
    )
    .unwrap();

    let err = join(&left, &right, JoinMode::Inner).unwrap_err();
    match err {
        JoinError::MissingKeyColumn { column, side } => {
            assert_eq!(column, "name");
            assert_eq!(side, "right");
        }
        other => panic!("expected MissingKeyColumn, got {:?}", other),
    }
}

#[test]
fn test_key_type_mismatch_is_a_join_error() {
    let left = create_left_table();

    // x is Float64 here but Int64 on the left
    let names = StringArray::from(vec!["a"]);
    let xs = Float64Array::from(vec![1.0]);
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("x", DataType::Float64, false),
    ]));
    let right = Table::from_record_batch(
        RecordBatch::try_new(schema, vec![Arc::new(names), Arc::new(xs)]).unwrap(),
    )
    .unwrap();

    let err = join(&left, &right, JoinMode::Inner).unwrap_err();
    match err {
        JoinError::KeyTypeMismatch { column, .. } => assert_eq!(column, "x"),
        other => panic!("expected KeyTypeMismatch, got {:?}", other),
    }
}

#[test]
fn test_join_with_empty_input_is_a_noop() {
    let left = create_left_table();
    let empty = Table::empty();

    assert!(join(&left, &empty, JoinMode::Inner).unwrap().is_none());
    assert!(join(&empty, &left, JoinMode::Left).unwrap().is_none());
    assert!(join(&empty, &empty, JoinMode::Cross).unwrap().is_none());

    // zero rows with a schema counts as empty too
    let schema = Arc::new(Schema::new(vec![Field::new("name", DataType::Utf8, false)]));
    let no_rows = Table::from_record_batch(RecordBatch::new_empty(schema)).unwrap();
    assert!(join(&left, &no_rows, JoinMode::Inner).unwrap().is_none());
}

#[test]
fn test_join_does_not_mutate_inputs() {
    let left = create_left_table();
    let right = create_right_table();
    let left_names_before = left.column_names();
    let right_names_before = right.column_names();

    join(&left, &right, JoinMode::Outer).unwrap().unwrap();

    assert_eq!(left.column_names(), left_names_before);
    assert_eq!(right.column_names(), right_names_before);
    assert_eq!(left.num_rows(), 3);
    assert_eq!(right.num_rows(), 3);
}
