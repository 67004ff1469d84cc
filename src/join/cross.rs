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

//! Cartesian product of two tables

use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch, RecordBatchOptions, UInt64Array};
use arrow::compute::take;
use arrow::datatypes::{Field, Schema};

use crate::error::JoinError;
use crate::table::Table;

/// Pair every row of `left` with every row of `right` by direct index
/// pairing; no key matching and no temporary columns are involved, so the
/// inputs are trivially left untouched.
///
/// Row `(i, j)` lands at position `i * right.num_rows() + j`: output order
/// follows the left table's rows as the outer iteration and the right
/// table's as the inner. Column names are carried over verbatim from both
/// sides; overlapping names are NOT disambiguated with the `_1`/`_2`
/// suffixes the equality modes apply.
pub(super) fn cross_join(left: &Table, right: &Table) -> Result<Table, JoinError> {
    let left_rows = left.num_rows();
    let right_rows = right.num_rows();
    let total = left_rows * right_rows;

    let mut left_values = Vec::with_capacity(total);
    let mut right_values = Vec::with_capacity(total);
    for i in 0..left_rows as u64 {
        for j in 0..right_rows as u64 {
            left_values.push(i);
            right_values.push(j);
        }
    }
    let left_idx = UInt64Array::from(left_values);
    let right_idx = UInt64Array::from(right_values);

    let mut fields: Vec<Field> =
        Vec::with_capacity(left.num_columns() + right.num_columns());
    let mut columns: Vec<ArrayRef> =
        Vec::with_capacity(left.num_columns() + right.num_columns());

    for (i, field) in left.schema().fields().iter().enumerate() {
        fields.push(Field::new(
            field.name().clone(),
            field.data_type().clone(),
            field.is_nullable(),
        ));
        columns.push(take(left.column(i).as_ref(), &left_idx, None)?);
    }
    for (i, field) in right.schema().fields().iter().enumerate() {
        fields.push(Field::new(
            field.name().clone(),
            field.data_type().clone(),
            field.is_nullable(),
        ));
        columns.push(take(right.column(i).as_ref(), &right_idx, None)?);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(total));
    let batch = RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), columns, &options)?;
    Ok(Table::from_batch_unchecked(batch))
}
