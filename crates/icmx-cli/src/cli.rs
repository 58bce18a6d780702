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

//! CLI command definitions and argument parsing.

use crate::commands;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// ICMX - intercompany message extraction toolkit
///
/// Extracts embedded `<intercompanyMessage>` purchase orders from a
/// spreadsheet column export (CSV) and flattens them into one row per
/// order line item.
///
/// # Examples
///
/// ```bash
/// # Flatten a column export to CSV
/// icmx extract export.csv --output flattened.csv
///
/// # Same data as JSON records
/// icmx extract export.csv --json
///
/// # Check what a problem file contains without extracting
/// icmx inspect export.csv
/// ```
#[derive(Parser)]
#[command(name = "icmx")]
#[command(author, version, about = "ICMX - intercompany message extraction toolkit", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Extract flattened purchase-order rows from a column export
    ///
    /// Reads one column of the input CSV, scans it for intercompany
    /// messages (reassembling documents fragmented across rows), and
    /// writes the 20-column output with a header row.
    Extract {
        /// Input CSV file containing the exported column
        #[arg(value_name = "FILE")]
        file: String,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// 1-based spreadsheet column to scan
        #[arg(long, default_value_t = 1)]
        column: usize,

        /// Field delimiter for CSV input and output
        #[arg(long, default_value_t = ',')]
        delimiter: char,

        /// Emit rows as a JSON array of column-keyed objects
        #[arg(long)]
        json: bool,

        /// Override the chunk byte cap (default 8 MiB)
        #[arg(long, value_name = "BYTES")]
        max_chunk_bytes: Option<usize>,

        /// Override the chunk part cap (default 1000)
        #[arg(long, value_name = "COUNT")]
        max_parts: Option<usize>,
    },

    /// Scan for messages and report boundaries without extracting rows
    ///
    /// Shows every message found (order number and line-item count) plus
    /// every skipped region, for diagnosing problem exports.
    Inspect {
        /// Input CSV file containing the exported column
        #[arg(value_name = "FILE")]
        file: String,

        /// 1-based spreadsheet column to scan
        #[arg(long, default_value_t = 1)]
        column: usize,

        /// Field delimiter for CSV input
        #[arg(long, default_value_t = ',')]
        delimiter: char,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Execute the command, returning an error message on failure.
    pub fn execute(self) -> Result<(), String> {
        match self {
            Commands::Extract {
                file,
                output,
                column,
                delimiter,
                json,
                max_chunk_bytes,
                max_parts,
            } => commands::extract(
                &file,
                output.as_deref(),
                column,
                delimiter,
                json,
                max_chunk_bytes,
                max_parts,
            ),
            Commands::Inspect {
                file,
                column,
                delimiter,
                json,
            } => commands::inspect(&file, column, delimiter, json),
            Commands::Completion { shell } => commands::completion(shell),
        }
    }
}
