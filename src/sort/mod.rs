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

//! Result sorter: stable one- and two-level ordering plus random shuffle

use arrow::array::{ArrayRef, RecordBatch, RecordBatchOptions, UInt32Array};
use arrow::compute::{take, SortOptions};
use arrow_row::{RowConverter, SortField};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::SortError;
use crate::table::Table;

/// Row ordering applied to a joined result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
    Random,
}

impl SortOrder {
    /// Parse a host-facing label such as `"Ascending"`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "ascending" => Some(SortOrder::Ascending),
            "descending" => Some(SortOrder::Descending),
            "random" => Some(SortOrder::Random),
            _ => None,
        }
    }
}

/// A sort request: up to two key columns and an order mode.
///
/// Keys are ignored entirely under [`SortOrder::Random`]. A secondary key
/// equal to the primary is treated as absent.
#[derive(Debug, Clone)]
pub struct SortDirective {
    pub primary_key: Option<String>,
    pub secondary_key: Option<String>,
    pub order: SortOrder,
}

impl SortDirective {
    pub fn ascending(primary: impl Into<String>) -> Self {
        Self {
            primary_key: Some(primary.into()),
            secondary_key: None,
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(primary: impl Into<String>) -> Self {
        Self {
            primary_key: Some(primary.into()),
            secondary_key: None,
            order: SortOrder::Descending,
        }
    }

    pub fn random() -> Self {
        Self {
            primary_key: None,
            secondary_key: None,
            order: SortOrder::Random,
        }
    }

    /// Add a tie-breaking secondary key, sorted in the same direction.
    pub fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        self.secondary_key = Some(secondary.into());
        self
    }
}

/// Sort a table per the directive, drawing an OS-seeded generator for the
/// random order mode.
pub fn sort(table: &Table, directive: &SortDirective) -> Result<Table, SortError> {
    sort_with_rng(table, directive, &mut StdRng::from_entropy())
}

/// Sort with a caller-provided generator, so shuffles are reproducible.
///
/// Never adds, removes, or renames columns, and never changes row content;
/// only row order changes. An empty table is handed back as-is without key
/// validation, as is a directive naming no keys (order is meaningless
/// without one). Equal-key rows keep their relative input order. Nulls
/// order last regardless of direction.
pub fn sort_with_rng<R: Rng>(
    table: &Table,
    directive: &SortDirective,
    rng: &mut R,
) -> Result<Table, SortError> {
    if table.num_rows() == 0 {
        return Ok(table.clone());
    }

    if directive.order == SortOrder::Random {
        let mut indices: Vec<u32> = (0..table.num_rows() as u32).collect();
        indices.shuffle(rng);
        return reorder(table, indices);
    }

    let keys = effective_keys(table, directive)?;
    if keys.is_empty() || table.num_rows() < 2 {
        return Ok(table.clone());
    }

    let options = SortOptions {
        descending: directive.order == SortOrder::Descending,
        nulls_first: false,
    };

    let key_arrays: Vec<ArrayRef> = keys.iter().map(|&i| table.column(i).clone()).collect();
    let fields: Vec<SortField> = key_arrays
        .iter()
        .map(|array| SortField::new_with_options(array.data_type().clone(), options))
        .collect();
    let converter = RowConverter::new(fields)?;
    let rows = converter.convert_columns(&key_arrays)?;

    let mut indices: Vec<u32> = (0..table.num_rows() as u32).collect();
    // std's sort is stable, which keeps equal-key rows in input order
    indices.sort_by(|&a, &b| rows.row(a as usize).cmp(&rows.row(b as usize)));

    reorder(table, indices)
}

/// Resolve directive keys to column indices. A named key absent from the
/// table is an error; a secondary without a primary, or equal to it, is
/// dropped.
fn effective_keys(table: &Table, directive: &SortDirective) -> Result<Vec<usize>, SortError> {
    let mut keys = Vec::with_capacity(2);
    if let Some(primary) = &directive.primary_key {
        let idx = table
            .index_of(primary)
            .ok_or_else(|| SortError::MissingKey(primary.clone()))?;
        keys.push(idx);

        if let Some(secondary) = &directive.secondary_key {
            if secondary != primary {
                let idx = table
                    .index_of(secondary)
                    .ok_or_else(|| SortError::MissingKey(secondary.clone()))?;
                keys.push(idx);
            }
        }
    }
    Ok(keys)
}

fn reorder(table: &Table, indices: Vec<u32>) -> Result<Table, SortError> {
    let index_array = UInt32Array::from(indices);
    let batch = table.record_batch();

    let mut columns = Vec::with_capacity(batch.num_columns());
    for i in 0..batch.num_columns() {
        columns.push(take(batch.column(i).as_ref(), &index_array, None)?);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(index_array.len()));
    let reordered = RecordBatch::try_new_with_options(batch.schema(), columns, &options)?;
    Ok(Table::from_batch_unchecked(reordered))
}
