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

//! CLI command implementations

mod completion;
mod extract;
mod inspect;

pub use completion::completion;
pub use extract::extract;
pub use inspect::inspect;

use icmx_csv::ColumnReadConfig;
use std::fs;
use std::io::{self, Write};

/// Default maximum input file size (1 GiB), guarding against OOM on
/// accidental or hostile inputs. Can be overridden via the
/// `ICMX_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

fn get_max_file_size() -> u64 {
    std::env::var("ICMX_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a file from disk with size validation.
pub(crate) fn read_file(path: &str) -> Result<String, String> {
    let metadata =
        fs::metadata(path).map_err(|e| format!("Cannot access '{}': {}", path, e))?;
    let max_size = get_max_file_size();
    if metadata.len() > max_size {
        return Err(format!(
            "File '{}' is {} bytes, exceeding the maximum of {} bytes",
            path,
            metadata.len(),
            max_size
        ));
    }
    fs::read_to_string(path).map_err(|e| format!("Cannot read '{}': {}", path, e))
}

/// Write rendered output to a file, or stdout when no path was given.
pub(crate) fn write_output(content: &str, output: Option<&str>) -> Result<(), String> {
    match output {
        Some(path) => {
            fs::write(path, content).map_err(|e| format!("Cannot write '{}': {}", path, e))
        }
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| format!("Cannot write to stdout: {}", e)),
    }
}

/// Translate the CLI's 1-based column / char delimiter into a read config.
pub(crate) fn column_config(column: usize, delimiter: char) -> Result<ColumnReadConfig, String> {
    if column < 1 {
        return Err("column is 1-based and must be at least 1".to_string());
    }
    Ok(ColumnReadConfig {
        delimiter: delimiter_byte(delimiter)?,
        column: column - 1,
        ..Default::default()
    })
}

pub(crate) fn delimiter_byte(delimiter: char) -> Result<u8, String> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(format!("delimiter '{}' must be an ASCII character", delimiter))
    }
}
