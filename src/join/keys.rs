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

//! Join key inference

use hashbrown::HashSet;

use crate::error::JoinError;
use crate::table::Table;

use super::config::NAME_KEY;

/// Infer the join key set for two tables: `name` plus every other column
/// name present in both, in the left table's column order.
///
/// `name` must exist on both sides; its absence is a precondition
/// violation reported as a [`JoinError`]. There is no override for key
/// selection beyond this heuristic.
pub fn infer_join_keys(left: &Table, right: &Table) -> Result<Vec<String>, JoinError> {
    let left_names = left.column_names();
    let right_names: HashSet<String> = right.column_names().into_iter().collect();

    if !left_names.iter().any(|n| n == NAME_KEY) {
        return Err(JoinError::MissingKeyColumn {
            column: NAME_KEY.to_string(),
            side: "left",
        });
    }
    if !right_names.contains(NAME_KEY) {
        return Err(JoinError::MissingKeyColumn {
            column: NAME_KEY.to_string(),
            side: "right",
        });
    }

    let mut keys = Vec::with_capacity(left_names.len());
    keys.push(NAME_KEY.to_string());
    for name in left_names {
        if name != NAME_KEY && right_names.contains(name.as_str()) {
            keys.push(name);
        }
    }
    Ok(keys)
}

/// Check that every key column carries the same type on both sides.
pub(super) fn validate_key_types(
    left: &Table,
    right: &Table,
    keys: &[String],
) -> Result<(), JoinError> {
    for key in keys {
        let left_col = left.column_by_name(key).ok_or_else(|| JoinError::MissingKeyColumn {
            column: key.clone(),
            side: "left",
        })?;
        let right_col = right.column_by_name(key).ok_or_else(|| JoinError::MissingKeyColumn {
            column: key.clone(),
            side: "right",
        })?;
        if left_col.data_type() != right_col.data_type() {
            return Err(JoinError::KeyTypeMismatch {
                column: key.clone(),
                left: left_col.data_type().to_string(),
                right: right_col.data_type().to_string(),
            });
        }
    }
    Ok(())
}
