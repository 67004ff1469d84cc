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

//! Join engine: natural-key inference and five join modes

pub mod config;
mod cross;
mod hash_join;
mod keys;
mod utils;

pub use config::{JoinMode, LEFT_SUFFIX, NAME_KEY, RIGHT_SUFFIX};
pub use keys::infer_join_keys;

use crate::error::JoinError;
use crate::table::Table;

/// Join two tables under the given mode.
///
/// Returns `Ok(None)` without inferring keys or producing a result when
/// either input is empty, mirroring the host-side guard that only joins
/// once both slots are loaded; the caller keeps whatever result it had.
pub fn join(left: &Table, right: &Table, mode: JoinMode) -> Result<Option<Table>, JoinError> {
    if left.is_empty() || right.is_empty() {
        return Ok(None);
    }

    let joined = match mode {
        JoinMode::Cross => cross::cross_join(left, right)?,
        _ => {
            let keys = infer_join_keys(left, right)?;
            keys::validate_key_types(left, right, &keys)?;
            hash_join::equality_join(left, right, &keys, mode)?
        }
    };
    Ok(Some(joined))
}
