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

//! JSON export in records orientation

use std::fs::File;

use arrow::json::ArrayWriter;

use crate::error::TableError;
use crate::table::Table;

/// Write a [`Table`] as a JSON array of row objects, one object per row.
pub fn write_json(table: &Table, path: &str) -> Result<(), TableError> {
    let file = File::create(path).map_err(|e| TableError::FileWrite {
        path: path.to_string(),
        source: e,
    })?;

    let mut writer = ArrayWriter::new(file);
    writer.write(table.record_batch())?;
    writer.finish()?;
    Ok(())
}
