// Dweve ICMX - Intercompany Message Extraction
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CSV adapters at the spreadsheet boundary.
//!
//! The core scans a plain sequence of cell strings and writes into a
//! [`RowSink`](icmx_core::RowSink); actual spreadsheet *files* are a host
//! concern. This crate supplies the thin CSV-backed adapters for hosts that
//! exchange column exports as CSV: reading one column out of a CSV document
//! and writing the flattened output grid back out as CSV.
//!
//! # Example
//!
//! ```no_run
//! use icmx_core::{write_header, Grid, Scanner};
//! use icmx_csv::{column_from_csv, to_csv};
//!
//! let input = std::fs::read_to_string("export.csv").unwrap();
//! let rows = column_from_csv(&input).unwrap();
//!
//! let mut grid = Grid::new();
//! write_header(&mut grid);
//! Scanner::new().scan(&rows, &mut grid, 2);
//!
//! let output = to_csv(&grid).unwrap();
//! std::fs::write("flattened.csv", output).unwrap();
//! ```

mod error;
mod read;
mod write;

pub use error::{CsvError, Result};
pub use read::{column_from_csv, column_from_csv_with_config, ColumnReadConfig, DEFAULT_MAX_ROWS};
pub use write::{to_csv, to_csv_with_config, write_grid, GridWriteConfig};
