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

//! Session state: the two loaded tables, the joined result, and the last
//! directives applied to it

use log::{debug, info};
use rand::Rng;

use crate::error::{JoinError, SortError, TableError};
use crate::io::csv::{CsvReadOptions, CsvWriteOptions};
use crate::join::{self, JoinMode};
use crate::sort::{self, SortDirective};
use crate::table::Table;

/// Owns Table A, Table B, the join result, and the last join/sort
/// directives, and invokes the join engine and result sorter explicitly.
///
/// Every operation replaces state wholesale; a failed operation leaves all
/// state untouched.
#[derive(Default)]
pub struct Session {
    left: Option<Table>,
    right: Option<Table>,
    result: Option<Table>,
    last_join: Option<JoinMode>,
    last_sort: Option<SortDirective>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load (or replace) table A.
    pub fn load_left(&mut self, table: Table) {
        info!(
            "loaded left table: {} rows, {} columns",
            table.num_rows(),
            table.num_columns()
        );
        self.left = Some(table);
    }

    /// Load (or replace) table B.
    pub fn load_right(&mut self, table: Table) {
        info!(
            "loaded right table: {} rows, {} columns",
            table.num_rows(),
            table.num_columns()
        );
        self.right = Some(table);
    }

    /// Load table A from a CSV file.
    pub fn load_left_csv(&mut self, path: &str, options: &CsvReadOptions) -> Result<(), TableError> {
        let table = Table::from_csv(path, options)?;
        self.load_left(table);
        Ok(())
    }

    /// Load table B from a CSV file.
    pub fn load_right_csv(&mut self, path: &str, options: &CsvReadOptions) -> Result<(), TableError> {
        let table = Table::from_csv(path, options)?;
        self.load_right(table);
        Ok(())
    }

    pub fn left(&self) -> Option<&Table> {
        self.left.as_ref()
    }

    pub fn right(&self) -> Option<&Table> {
        self.right.as_ref()
    }

    pub fn result(&self) -> Option<&Table> {
        self.result.as_ref()
    }

    pub fn last_join(&self) -> Option<JoinMode> {
        self.last_join
    }

    pub fn last_sort(&self) -> Option<&SortDirective> {
        self.last_sort.as_ref()
    }

    /// Column names of the current result, for populating sort-key choices.
    pub fn result_column_names(&self) -> Vec<String> {
        self.result
            .as_ref()
            .map(|t| t.column_names())
            .unwrap_or_default()
    }

    /// Join the two loaded tables under `mode`, replacing the previous
    /// result on success.
    ///
    /// Returns `Ok(false)` when either slot is unloaded or empty: nothing
    /// runs and the previous result (if any) is kept. On error the session
    /// is likewise untouched.
    pub fn join(&mut self, mode: JoinMode) -> Result<bool, JoinError> {
        let (left, right) = match (&self.left, &self.right) {
            (Some(left), Some(right)) => (left, right),
            _ => {
                debug!("join skipped: both tables must be loaded");
                return Ok(false);
            }
        };

        match join::join(left, right, mode)? {
            Some(result) => {
                info!(
                    "{} join produced {} rows, {} columns",
                    mode,
                    result.num_rows(),
                    result.num_columns()
                );
                self.result = Some(result);
                self.last_join = Some(mode);
                Ok(true)
            }
            None => {
                debug!("join skipped: empty input table");
                Ok(false)
            }
        }
    }

    /// Sort the join result, replacing it with the reordered table (same
    /// columns, same rows, new order).
    ///
    /// Returns `Ok(false)` when there is no result to sort. On error the
    /// result is untouched.
    pub fn sort(&mut self, directive: SortDirective) -> Result<bool, SortError> {
        match &self.result {
            Some(result) => {
                let sorted = sort::sort(result, &directive)?;
                self.result = Some(sorted);
                self.last_sort = Some(directive);
                Ok(true)
            }
            None => {
                debug!("sort skipped: no joined data available");
                Ok(false)
            }
        }
    }

    /// Same as [`sort`](Self::sort) with a caller-provided generator, so
    /// random ordering is reproducible.
    pub fn sort_with_rng<R: Rng>(
        &mut self,
        directive: SortDirective,
        rng: &mut R,
    ) -> Result<bool, SortError> {
        match &self.result {
            Some(result) => {
                let sorted = sort::sort_with_rng(result, &directive, rng)?;
                self.result = Some(sorted);
                self.last_sort = Some(directive);
                Ok(true)
            }
            None => {
                debug!("sort skipped: no joined data available");
                Ok(false)
            }
        }
    }

    /// Export the result as CSV. Returns `Ok(false)` when there is nothing
    /// to export.
    pub fn export_csv(&self, path: &str, options: &CsvWriteOptions) -> Result<bool, TableError> {
        match &self.result {
            Some(result) => {
                result.to_csv(path, options)?;
                info!("exported result to {}", path);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Export the result as a JSON array of row objects. Returns
    /// `Ok(false)` when there is nothing to export.
    pub fn export_json(&self, path: &str) -> Result<bool, TableError> {
        match &self.result {
            Some(result) => {
                result.to_json(path)?;
                info!("exported result to {}", path);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
