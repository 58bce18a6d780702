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

//! Error types for the CSV adapters.

use thiserror::Error;

/// Result type for CSV adapter operations.
pub type Result<T> = std::result::Result<T, CsvError>;

/// CSV adapter error types.
#[derive(Debug, Error)]
pub enum CsvError {
    /// CSV parsing error at a specific record.
    #[error("CSV parse error at record {record}: {message}")]
    ParseError {
        /// Record number where the error occurred (1-based).
        record: usize,
        /// Detailed error message.
        message: String,
    },

    /// Input exceeded the configured row cap.
    #[error("input exceeds the maximum of {limit} rows")]
    TooManyRows {
        /// The configured cap.
        limit: usize,
    },

    /// Writing CSV output failed.
    #[error("CSV write error: {message}")]
    WriteError {
        /// Underlying error message.
        message: String,
    },

    /// I/O failure while reading or flushing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
