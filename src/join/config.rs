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

//! Join mode configuration

use std::fmt;

/// The column that is unconditionally part of every equality join key set.
pub const NAME_KEY: &str = "name";

/// Suffix for the left table's copy of an overlapping non-key column.
pub const LEFT_SUFFIX: &str = "_1";

/// Suffix for the right table's copy of an overlapping non-key column.
pub const RIGHT_SUFFIX: &str = "_2";

/// The five supported join modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinMode {
    Inner,
    Left,
    Right,
    Outer,
    Cross,
}

impl JoinMode {
    /// Parse a host-facing label such as `"Inner"` or `" left "`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "inner" => Some(JoinMode::Inner),
            "left" => Some(JoinMode::Left),
            "right" => Some(JoinMode::Right),
            "outer" => Some(JoinMode::Outer),
            "cross" => Some(JoinMode::Cross),
            _ => None,
        }
    }

    /// A one-line description of the mode, for host info panes.
    pub fn description(&self) -> &'static str {
        match self {
            JoinMode::Inner => {
                "Inner Join: Returns rows that have matching values in both datasets."
            }
            JoinMode::Left => {
                "Left Join: Returns all rows from the left dataset and matching rows from the right dataset."
            }
            JoinMode::Right => {
                "Right Join: Returns all rows from the right dataset and matching rows from the left dataset."
            }
            JoinMode::Outer => {
                "Outer Join: Returns all rows when there is a match in either left or right dataset."
            }
            JoinMode::Cross => {
                "Cross Join: Returns all combinations of rows from both datasets."
            }
        }
    }
}

impl fmt::Display for JoinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinMode::Inner => write!(f, "inner"),
            JoinMode::Left => write!(f, "left"),
            JoinMode::Right => write!(f, "right"),
            JoinMode::Outer => write!(f, "outer"),
            JoinMode::Cross => write!(f, "cross"),
        }
    }
}
