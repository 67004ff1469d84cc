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

//! datajoin: the data core of a two-table join-and-sort tool
//!
//! Loads two tabular datasets, joins them on an inferred natural key set
//! (the `name` column plus every other column shared by both tables), and
//! reorders the joined result with stable one- or two-level sorts or a
//! random shuffle. Apache Arrow record batches are the underlying data
//! format; hosts interact through [`Session`] or the pure [`join`] and
//! [`sort`] functions.

pub mod error;
pub mod io;
pub mod join;
pub mod session;
pub mod sort;
pub mod table;
pub mod util;

// Re-export commonly used types
pub use crate::error::{JoinError, SortError, TableError};
pub use crate::io::csv::{CsvReadOptions, CsvWriteOptions};
pub use crate::join::{join, JoinMode};
pub use crate::session::Session;
pub use crate::sort::{sort, sort_with_rng, SortDirective, SortOrder};
pub use crate::table::Table;

/// The main entry point and version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
