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

//! Write the flattened output grid as CSV.

use crate::error::{CsvError, Result};
use icmx_core::Grid;
use std::io::Write;

/// Configuration for CSV output.
#[derive(Debug, Clone)]
pub struct GridWriteConfig {
    /// Field delimiter (default: `,`).
    pub delimiter: u8,
    /// Quote style for fields (default: necessary).
    pub quote_style: csv::QuoteStyle,
}

impl Default for GridWriteConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote_style: csv::QuoteStyle::Necessary,
        }
    }
}

/// Render a grid as a CSV string with default configuration.
pub fn to_csv(grid: &Grid) -> Result<String> {
    to_csv_with_config(grid, &GridWriteConfig::default())
}

/// Render a grid as a CSV string with custom configuration.
pub fn to_csv_with_config(grid: &Grid, config: &GridWriteConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_grid(grid, &mut buffer, config)?;
    String::from_utf8(buffer).map_err(|err| CsvError::WriteError {
        message: err.to_string(),
    })
}

/// Write a grid into `out`, one CSV record per grid row.
///
/// Short rows are padded to the grid's full width so the output stays
/// rectangular even when trailing cells were never written.
pub fn write_grid<W: Write>(grid: &Grid, out: W, config: &GridWriteConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .quote_style(config.quote_style)
        .from_writer(out);

    let width = grid.width();
    for row in grid.rows() {
        let mut record = Vec::with_capacity(width);
        for col in 0..width {
            record.push(row.get(col).map(String::as_str).unwrap_or(""));
        }
        writer.write_record(&record).map_err(|err| CsvError::WriteError {
            message: err.to_string(),
        })?;
    }
    writer.flush()?;
    Ok(())
}
