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

//! Error types for message extraction.

use std::fmt;
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, IcmxError>;

/// The kind of error that occurred while processing a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcmxErrorKind {
    /// Message text yielded no usable XML tree.
    Parse,
    /// A field query or row write failed.
    Extraction,
    /// Security limit exceeded.
    Limit,
    /// I/O error (file operations, etc.).
    Io,
}

impl fmt::Display for IcmxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "ParseError"),
            Self::Extraction => write!(f, "ExtractionError"),
            Self::Limit => write!(f, "LimitError"),
            Self::Io => write!(f, "IOError"),
        }
    }
}

/// An error that occurred while extracting one message.
///
/// Carries the 1-based spreadsheet row of the chunk the message came from,
/// when known, so callers can report which part of the input was skipped.
#[derive(Debug, Clone, Error)]
pub struct IcmxError {
    /// The kind of error.
    pub kind: IcmxErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Source spreadsheet row (1-based), when known.
    pub row: Option<usize>,
}

impl fmt::Display for IcmxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "{} at source row {}: {}", self.kind, row, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl IcmxError {
    /// Create a new error.
    pub fn new(kind: IcmxErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            row: None,
        }
    }

    /// Attach the 1-based source row the message was scanned from.
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(IcmxErrorKind::Parse, message)
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        Self::new(IcmxErrorKind::Extraction, message)
    }

    pub fn limit(message: impl Into<String>) -> Self {
        Self::new(IcmxErrorKind::Limit, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(IcmxErrorKind::Io, message)
    }
}
