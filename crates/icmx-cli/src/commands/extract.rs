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

//! Extract command - flatten a column export into output rows.

use super::{column_config, delimiter_byte, read_file, write_output};
use colored::Colorize;
use icmx_core::{write_header, Grid, Limits, ScanReport, Scanner, COLUMNS};
use icmx_csv::{column_from_csv_with_config, to_csv_with_config, GridWriteConfig};

/// Run the full pipeline: read one CSV column, scan and extract every
/// message, render the output grid (CSV by default, JSON on request), and
/// print a summary with any skipped regions to stderr.
#[allow(clippy::too_many_arguments)]
pub fn extract(
    file: &str,
    output: Option<&str>,
    column: usize,
    delimiter: char,
    json: bool,
    max_chunk_bytes: Option<usize>,
    max_parts: Option<usize>,
) -> Result<(), String> {
    let content = read_file(file)?;
    let read_config = column_config(column, delimiter)?;
    let rows = column_from_csv_with_config(&content, &read_config)
        .map_err(|e| format!("Failed to read column {} from '{}': {}", column, file, e))?;

    let mut limits = Limits::default();
    if let Some(bytes) = max_chunk_bytes {
        limits.max_chunk_bytes = bytes;
    }
    if let Some(parts) = max_parts {
        limits.max_chunk_parts = parts;
    }

    let mut grid = Grid::new();
    write_header(&mut grid);
    let report = Scanner::with_limits(limits).scan(&rows, &mut grid, 2);

    let rendered = if json {
        render_json(&grid)?
    } else {
        let write_config = GridWriteConfig {
            delimiter: delimiter_byte(delimiter)?,
            ..Default::default()
        };
        to_csv_with_config(&grid, &write_config)
            .map_err(|e| format!("Failed to render output: {}", e))?
    };
    write_output(&rendered, output)?;

    print_summary(file, &report);
    Ok(())
}

/// Render the data rows as a JSON array of column-keyed objects.
fn render_json(grid: &Grid) -> Result<String, String> {
    let mut records = Vec::new();
    for row in 2..=grid.row_count() {
        let mut object = serde_json::Map::new();
        for (idx, name) in COLUMNS.iter().enumerate() {
            object.insert(
                (*name).to_string(),
                serde_json::Value::String(grid.cell(row, idx + 1).to_string()),
            );
        }
        records.push(serde_json::Value::Object(object));
    }
    serde_json::to_string_pretty(&records).map_err(|e| format!("Failed to render JSON: {}", e))
}

fn print_summary(file: &str, report: &ScanReport) {
    eprintln!(
        "{} {}: {} message(s), {} row(s)",
        "Extracted".green().bold(),
        file,
        report.messages_extracted,
        report.rows_written
    );
    for skip in &report.skips {
        eprintln!(
            "  {} row {}: {}",
            format!("[{}]", skip.kind).yellow(),
            skip.row,
            skip.detail
        );
    }
}
