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

//! Table - the in-memory relation datajoin operates on

use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch, RecordBatchOptions};
use arrow::datatypes::{Field, Schema, SchemaRef};
use hashbrown::HashSet;

use crate::error::TableError;
use crate::io::csv::{CsvReadOptions, CsvWriteOptions};

/// An ordered set of named columns with equal row counts, backed by a
/// single Arrow record batch.
///
/// Tables are value-typed: every operation in this crate reads its inputs
/// and constructs a new `Table`, never mutating a caller-visible input.
/// Column names are trimmed of surrounding whitespace at construction and
/// must be unique after trimming.
#[derive(Debug, Clone)]
pub struct Table {
    batch: RecordBatch,
}

impl Table {
    /// Create a table from an Arrow record batch, normalizing column names.
    pub fn from_record_batch(batch: RecordBatch) -> Result<Self, TableError> {
        let schema = batch.schema();
        let trimmed: Vec<&str> = schema.fields().iter().map(|f| f.name().trim()).collect();

        let mut seen = HashSet::with_capacity(trimmed.len());
        for name in &trimmed {
            if !seen.insert(*name) {
                return Err(TableError::DuplicateColumn(name.to_string()));
            }
        }

        if trimmed.iter().zip(schema.fields()).all(|(t, f)| *t == f.name().as_str()) {
            return Ok(Self { batch });
        }

        let fields: Vec<Field> = trimmed
            .iter()
            .zip(schema.fields())
            .map(|(name, f)| Field::new(name.to_string(), f.data_type().clone(), f.is_nullable()))
            .collect();
        let options = RecordBatchOptions::new().with_row_count(Some(batch.num_rows()));
        let batch = RecordBatch::try_new_with_options(
            Arc::new(Schema::new(fields)),
            batch.columns().to_vec(),
            &options,
        )?;
        Ok(Self { batch })
    }

    /// Wrap a batch whose column names are already known to be valid.
    ///
    /// Used internally for operation results; cross joins may legitimately
    /// carry duplicate column names, which `from_record_batch` rejects.
    pub(crate) fn from_batch_unchecked(batch: RecordBatch) -> Self {
        Self { batch }
    }

    /// A table with no columns and no rows, the state of an unloaded slot.
    pub fn empty() -> Self {
        Self {
            batch: RecordBatch::new_empty(Arc::new(Schema::empty())),
        }
    }

    /// The underlying record batch.
    pub fn record_batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// A table with zero rows or zero columns is empty.
    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0 || self.batch.num_columns() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn column(&self, index: usize) -> &ArrayRef {
        self.batch.column(index)
    }

    pub fn column_by_name(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    /// Index of the named column, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.batch.schema().index_of(name).ok()
    }

    /// Read a table from a CSV file.
    pub fn from_csv(path: &str, options: &CsvReadOptions) -> Result<Self, TableError> {
        crate::io::csv::read_csv(path, options)
    }

    /// Read a table from a CSV file with default options.
    pub fn from_csv_default(path: &str) -> Result<Self, TableError> {
        crate::io::csv::read_csv(path, &CsvReadOptions::default())
    }

    /// Write the table to a CSV file.
    pub fn to_csv(&self, path: &str, options: &CsvWriteOptions) -> Result<(), TableError> {
        crate::io::csv::write_csv(self, path, options)
    }

    /// Write the table to a JSON file as an array of row objects.
    pub fn to_json(&self, path: &str) -> Result<(), TableError> {
        crate::io::json::write_json(self, path)
    }
}
