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

//! Error handling for datajoin operations
//!
//! Every operation is all-or-nothing: either it produces a new valid
//! table, or it fails and the caller's tables are left untouched.

use arrow::error::ArrowError;

/// Errors raised while inferring join keys or applying a join.
#[derive(thiserror::Error, Debug)]
pub enum JoinError {
    /// The mandatory `name` key column is absent from one side.
    #[error("required key column '{column}' is missing from the {side} table")]
    MissingKeyColumn { column: String, side: &'static str },

    /// A key column carries different types on the two sides.
    #[error("key column '{column}' has incompatible types: {left} vs {right}")]
    KeyTypeMismatch {
        column: String,
        left: String,
        right: String,
    },

    /// An Arrow kernel failed while materializing the joined table.
    #[error("join failed: {0}")]
    Arrow(#[from] ArrowError),
}

/// Errors raised while sorting a joined result.
#[derive(thiserror::Error, Debug)]
pub enum SortError {
    /// A named sort key does not exist among the table's columns.
    #[error("sort key '{0}' does not exist in the table")]
    MissingKey(String),

    /// An Arrow kernel failed while reordering rows.
    #[error("sort failed: {0}")]
    Arrow(#[from] ArrowError),
}

/// Errors raised while constructing tables or reading/writing files.
#[derive(thiserror::Error, Debug)]
pub enum TableError {
    /// Two columns share the same name after whitespace trimming.
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("failed to read '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    FileWrite {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV file '{0}' is empty")]
    EmptyCsv(String),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}
