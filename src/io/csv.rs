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

//! CSV reading and writing

use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use arrow::compute::concat_batches;
use arrow::csv::{ReaderBuilder, WriterBuilder};

use crate::error::TableError;
use crate::table::Table;

/// CSV read options
#[derive(Clone)]
pub struct CsvReadOptions {
    /// CSV delimiter (default: ',')
    pub delimiter: u8,
    /// Whether to treat the first row as a header (default: true)
    pub has_header: bool,
    /// Batch size for reading (default: 8192)
    pub batch_size: usize,
    /// Row count used for schema inference (default: 100)
    pub infer_records: usize,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            batch_size: 8192,
            infer_records: 100,
        }
    }
}

impl CsvReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

/// CSV write options
#[derive(Clone)]
pub struct CsvWriteOptions {
    /// CSV delimiter (default: ',')
    pub delimiter: u8,
    /// Whether to write a header row (default: true)
    pub has_header: bool,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
        }
    }
}

impl CsvWriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }
}

/// Read a CSV file into a [`Table`], inferring column types from the data.
///
/// Column names are trimmed of surrounding whitespace by the table
/// constructor.
pub fn read_csv(path: &str, options: &CsvReadOptions) -> Result<Table, TableError> {
    let file = File::open(path).map_err(|e| TableError::FileRead {
        path: path.to_string(),
        source: e,
    })?;

    let format = arrow::csv::reader::Format::default()
        .with_delimiter(options.delimiter)
        .with_header(options.has_header);

    let (schema, _) = format.infer_schema(&mut BufReader::new(file), Some(options.infer_records))?;

    if schema.fields().is_empty() {
        return Err(TableError::EmptyCsv(path.to_string()));
    }

    // inference consumed the reader; reopen for the actual read
    let file = File::open(path).map_err(|e| TableError::FileRead {
        path: path.to_string(),
        source: e,
    })?;

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_delimiter(options.delimiter)
        .with_header(options.has_header)
        .with_batch_size(options.batch_size)
        .build(file)?;

    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch?);
    }

    if batches.is_empty() {
        return Err(TableError::EmptyCsv(path.to_string()));
    }

    let batch = if batches.len() > 1 {
        let schema = batches[0].schema();
        concat_batches(&schema, &batches)?
    } else {
        batches.remove(0)
    };

    Table::from_record_batch(batch)
}

/// Write a [`Table`] to a CSV file.
pub fn write_csv(table: &Table, path: &str, options: &CsvWriteOptions) -> Result<(), TableError> {
    let file = File::create(path).map_err(|e| TableError::FileWrite {
        path: path.to_string(),
        source: e,
    })?;

    let mut writer = WriterBuilder::new()
        .with_delimiter(options.delimiter)
        .with_header(options.has_header)
        .build(file);

    writer.write(table.record_batch())?;
    Ok(())
}
