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

//! Plain-text rendering of tables for hosts and debug logging

use arrow::array::*;
use arrow::datatypes::DataType;

use crate::table::Table;

/// Render the value at `index` as text; nulls render as "null".
pub fn value_to_string(array: &dyn Array, index: usize) -> String {
    if array.is_null(index) {
        return "null".to_string();
    }

    match array.data_type() {
        DataType::Null => "null".to_string(),
        DataType::Boolean => {
            let arr = array.as_any().downcast_ref::<BooleanArray>().unwrap();
            arr.value(index).to_string()
        }
        DataType::Int32 => {
            let arr = array.as_any().downcast_ref::<Int32Array>().unwrap();
            arr.value(index).to_string()
        }
        DataType::Int64 => {
            let arr = array.as_any().downcast_ref::<Int64Array>().unwrap();
            arr.value(index).to_string()
        }
        DataType::Float32 => {
            let arr = array.as_any().downcast_ref::<Float32Array>().unwrap();
            arr.value(index).to_string()
        }
        DataType::Float64 => {
            let arr = array.as_any().downcast_ref::<Float64Array>().unwrap();
            arr.value(index).to_string()
        }
        DataType::Utf8 => {
            let arr = array.as_any().downcast_ref::<StringArray>().unwrap();
            arr.value(index).to_string()
        }
        DataType::LargeUtf8 => {
            let arr = array.as_any().downcast_ref::<LargeStringArray>().unwrap();
            arr.value(index).to_string()
        }
        _ => format!("<{}>", array.data_type()),
    }
}

/// Render a table as column-aligned text, header row first.
pub fn table_to_string(table: &Table) -> String {
    let names = table.column_names();
    if names.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = names.iter().map(|n| n.len()).collect();
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(table.num_rows());
    for row in 0..table.num_rows() {
        let mut line = Vec::with_capacity(names.len());
        for col in 0..table.num_columns() {
            let value = value_to_string(table.column(col).as_ref(), row);
            widths[col] = widths[col].max(value.len());
            line.push(value);
        }
        cells.push(line);
    }

    let mut out = String::new();
    for (col, name) in names.iter().enumerate() {
        if col > 0 {
            out.push_str("  ");
        }
        out.push_str(&format!("{:<width$}", name, width = widths[col]));
    }
    out.push('\n');
    for line in &cells {
        for (col, value) in line.iter().enumerate() {
            if col > 0 {
                out.push_str("  ");
            }
            out.push_str(&format!("{:<width$}", value, width = widths[col]));
        }
        out.push('\n');
    }
    out
}
