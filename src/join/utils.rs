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

//! Joined-result schema construction and column materialization

use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch, RecordBatchOptions, UInt64Array};
use arrow::compute::{concat, take};
use arrow::datatypes::{Field, Schema};
use hashbrown::HashSet;

use crate::error::JoinError;
use crate::table::Table;

use super::config::{LEFT_SUFFIX, RIGHT_SUFFIX};

/// Build the schema of an equality-join result: the left table's columns
/// in order with key columns unsuffixed and appearing once, followed by
/// the right table's non-key columns. A non-key name present on both
/// sides gets the `_1`/`_2` suffixes.
///
/// Every field is nullable: unmatched rows are null-filled.
fn joined_schema(left: &Table, right: &Table, keys: &[String]) -> Arc<Schema> {
    let key_set: HashSet<&str> = keys.iter().map(|k| k.as_str()).collect();
    let left_names: HashSet<String> = left.column_names().into_iter().collect();
    let right_names: HashSet<String> = right.column_names().into_iter().collect();

    let mut fields: Vec<Field> =
        Vec::with_capacity(left.num_columns() + right.num_columns());

    for field in left.schema().fields() {
        let name = field.name();
        let out_name = if !key_set.contains(name.as_str()) && right_names.contains(name.as_str())
        {
            format!("{}{}", name, LEFT_SUFFIX)
        } else {
            name.clone()
        };
        fields.push(Field::new(out_name, field.data_type().clone(), true));
    }

    for field in right.schema().fields() {
        let name = field.name();
        if key_set.contains(name.as_str()) {
            continue;
        }
        let out_name = if left_names.contains(name.as_str()) {
            format!("{}{}", name, RIGHT_SUFFIX)
        } else {
            name.clone()
        };
        fields.push(Field::new(out_name, field.data_type().clone(), true));
    }

    Arc::new(Schema::new(fields))
}

fn take_indices(indices: &[i64]) -> UInt64Array {
    let values: Vec<Option<u64>> = indices
        .iter()
        .map(|&idx| if idx >= 0 { Some(idx as u64) } else { None })
        .collect();
    UInt64Array::from(values)
}

/// Materialize the joined table from aligned left/right row index vectors,
/// where -1 marks the null side of an unmatched row.
///
/// Non-key columns are gathered from their own side with nulls for -1
/// slots. Key columns are coalesced: a row missing on the left takes its
/// key values from the matching right row, so right and outer joins keep
/// their keys populated.
pub(super) fn build_joined_table(
    left: &Table,
    right: &Table,
    keys: &[String],
    left_indices: &[i64],
    right_indices: &[i64],
) -> Result<Table, JoinError> {
    let schema = joined_schema(left, right, keys);
    let key_set: HashSet<&str> = keys.iter().map(|k| k.as_str()).collect();

    let left_take = take_indices(left_indices);
    let right_take = take_indices(right_indices);

    // Key coalescing indexes into the left column concatenated with its
    // right counterpart; exactly one side of every pair is valid.
    let left_len = left.num_rows() as u64;
    let coalesce_values: Vec<u64> = left_indices
        .iter()
        .zip(right_indices)
        .map(|(&l, &r)| if l >= 0 { l as u64 } else { left_len + r as u64 })
        .collect();
    let coalesce = UInt64Array::from(coalesce_values);

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());

    for (i, field) in left.schema().fields().iter().enumerate() {
        let array = if key_set.contains(field.name().as_str()) {
            let right_col = right.column_by_name(field.name()).ok_or_else(|| {
                JoinError::MissingKeyColumn {
                    column: field.name().clone(),
                    side: "right",
                }
            })?;
            let merged = concat(&[left.column(i).as_ref(), right_col.as_ref()])?;
            take(merged.as_ref(), &coalesce, None)?
        } else {
            take(left.column(i).as_ref(), &left_take, None)?
        };
        columns.push(array);
    }

    for (i, field) in right.schema().fields().iter().enumerate() {
        if key_set.contains(field.name().as_str()) {
            continue;
        }
        columns.push(take(right.column(i).as_ref(), &right_take, None)?);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(left_indices.len()));
    let batch = RecordBatch::try_new_with_options(schema, columns, &options)?;
    Ok(Table::from_batch_unchecked(batch))
}
