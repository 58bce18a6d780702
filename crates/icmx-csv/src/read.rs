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

//! Read one spreadsheet column out of a CSV document.

use crate::error::{CsvError, Result};

/// Default maximum number of rows to prevent memory exhaustion.
///
/// Column exports are read fully into memory before scanning, so an
/// unbounded read would let a maliciously large file exhaust it. The cap
/// can be raised via [`ColumnReadConfig::max_rows`].
pub const DEFAULT_MAX_ROWS: usize = 1_000_000;

/// Configuration for reading a column out of CSV input.
///
/// # Examples
///
/// ```
/// # use icmx_csv::ColumnReadConfig;
/// let config = ColumnReadConfig::default();
/// assert_eq!(config.delimiter, b',');
/// assert_eq!(config.column, 0);
/// assert_eq!(config.max_rows, 1_000_000);
/// ```
#[derive(Debug, Clone)]
pub struct ColumnReadConfig {
    /// Field delimiter (default: `,`).
    pub delimiter: u8,
    /// 0-based index of the column to read (default: 0, i.e. column A).
    pub column: usize,
    /// Maximum number of rows to read (default: [`DEFAULT_MAX_ROWS`]).
    pub max_rows: usize,
}

impl Default for ColumnReadConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            column: 0,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

/// Read the first column of a CSV document with default configuration.
///
/// Every record contributes one entry; records too short to reach the
/// requested column contribute `""`, matching how an empty spreadsheet cell
/// scans.
pub fn column_from_csv(input: &str) -> Result<Vec<String>> {
    column_from_csv_with_config(input, &ColumnReadConfig::default())
}

/// Read one column of a CSV document with custom configuration.
///
/// The reader is deliberately permissive: no header handling (row 1 is data
/// like any other) and ragged record widths are accepted, since column
/// exports from spreadsheets are rarely rectangular.
pub fn column_from_csv_with_config(input: &str, config: &ColumnReadConfig) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_bytes());

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        if rows.len() >= config.max_rows {
            return Err(CsvError::TooManyRows {
                limit: config.max_rows,
            });
        }
        let record = record.map_err(|err| CsvError::ParseError {
            record: idx + 1,
            message: err.to_string(),
        })?;
        rows.push(record.get(config.column).unwrap_or("").to_string());
    }
    Ok(rows)
}
