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

//! Hash-based execution of the four equality join modes

use std::hash::BuildHasherDefault;

use arrow::array::ArrayRef;
use arrow_row::{RowConverter, Rows, SortField};
use hashbrown::HashMap;

use crate::error::JoinError;
use crate::table::Table;

use super::config::JoinMode;
use super::utils::build_joined_table;

/// Key-tuple bytes of a build-side row mapped to the row indices holding it.
type RowIndexMap = HashMap<Vec<u8>, Vec<i64>, BuildHasherDefault<ahash::AHasher>>;

/// Probe for inner joins: emit matched pairs only.
fn probe_matched(
    map: &RowIndexMap,
    probe_rows: &Rows,
    probe_indices: &mut Vec<i64>,
    build_indices: &mut Vec<i64>,
) {
    for i in 0..probe_rows.num_rows() {
        if let Some(matches) = map.get(probe_rows.row(i).as_ref()) {
            for &build_idx in matches {
                probe_indices.push(i as i64);
                build_indices.push(build_idx);
            }
        }
    }
}

/// Probe for left/right joins: every probe row survives, with -1 marking
/// the null-filled build side of an unmatched row.
fn probe_with_fill(
    map: &RowIndexMap,
    probe_rows: &Rows,
    probe_indices: &mut Vec<i64>,
    build_indices: &mut Vec<i64>,
) {
    for i in 0..probe_rows.num_rows() {
        if let Some(matches) = map.get(probe_rows.row(i).as_ref()) {
            for &build_idx in matches {
                probe_indices.push(i as i64);
                build_indices.push(build_idx);
            }
        } else {
            probe_indices.push(i as i64);
            build_indices.push(-1);
        }
    }
}

/// Probe for outer joins: every probe row in probe order, then the build
/// rows no probe row matched, in build order.
fn probe_outer(
    map: &RowIndexMap,
    probe_rows: &Rows,
    build_size: usize,
    probe_indices: &mut Vec<i64>,
    build_indices: &mut Vec<i64>,
) {
    let mut build_matched = vec![false; build_size];

    for i in 0..probe_rows.num_rows() {
        if let Some(matches) = map.get(probe_rows.row(i).as_ref()) {
            for &build_idx in matches {
                probe_indices.push(i as i64);
                build_indices.push(build_idx);
                build_matched[build_idx as usize] = true;
            }
        } else {
            probe_indices.push(i as i64);
            build_indices.push(-1);
        }
    }

    for (build_idx, matched) in build_matched.iter().enumerate() {
        if !matched {
            probe_indices.push(-1);
            build_indices.push(build_idx as i64);
        }
    }
}

fn key_arrays(
    table: &Table,
    keys: &[String],
    side: &'static str,
) -> Result<Vec<ArrayRef>, JoinError> {
    keys.iter()
        .map(|key| {
            table
                .column_by_name(key)
                .cloned()
                .ok_or_else(|| JoinError::MissingKeyColumn {
                    column: key.clone(),
                    side,
                })
        })
        .collect()
}

/// Execute an equality join on the inferred key columns.
///
/// The probe side is the one whose row order the mode preserves: left for
/// inner/left/outer joins, right for right joins. Key tuples are compared
/// through their normalized row encodings.
pub(super) fn equality_join(
    left: &Table,
    right: &Table,
    keys: &[String],
    mode: JoinMode,
) -> Result<Table, JoinError> {
    let left_keys = key_arrays(left, keys, "left")?;
    let right_keys = key_arrays(right, keys, "right")?;

    let fields: Vec<SortField> = left_keys
        .iter()
        .map(|array| SortField::new(array.data_type().clone()))
        .collect();
    let converter = RowConverter::new(fields)?;

    let left_rows = converter.convert_columns(&left_keys)?;
    let right_rows = converter.convert_columns(&right_keys)?;

    let build_from_right = mode != JoinMode::Right;
    let (build_rows, probe_rows) = if build_from_right {
        (&right_rows, &left_rows)
    } else {
        (&left_rows, &right_rows)
    };

    let mut map: RowIndexMap =
        HashMap::with_capacity_and_hasher(build_rows.num_rows(), BuildHasherDefault::default());
    for i in 0..build_rows.num_rows() {
        map.entry(build_rows.row(i).as_ref().to_vec())
            .or_insert_with(Vec::new)
            .push(i as i64);
    }

    let mut probe_indices = Vec::with_capacity(probe_rows.num_rows());
    let mut build_indices = Vec::with_capacity(probe_rows.num_rows());

    match mode {
        JoinMode::Inner => {
            probe_matched(&map, probe_rows, &mut probe_indices, &mut build_indices)
        }
        JoinMode::Left | JoinMode::Right => {
            probe_with_fill(&map, probe_rows, &mut probe_indices, &mut build_indices)
        }
        JoinMode::Outer => probe_outer(
            &map,
            probe_rows,
            build_rows.num_rows(),
            &mut probe_indices,
            &mut build_indices,
        ),
        JoinMode::Cross => unreachable!("cross joins do not use key equality"),
    }

    let (left_indices, right_indices) = if build_from_right {
        (probe_indices, build_indices)
    } else {
        (build_indices, probe_indices)
    };

    build_joined_table(left, right, keys, &left_indices, &right_indices)
}
