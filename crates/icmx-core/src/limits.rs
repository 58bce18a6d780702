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

//! Security limits for chunk reassembly.

/// Configurable limits for scanner security.
///
/// These limits bound the resources consumed while reassembling a chunk from
/// spreadsheet rows. When a limit trips, the scanner logs, skips the
/// offending chunk, and keeps scanning; it never aborts the overall input.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum chunk size in UTF-8 bytes (default: 8 MiB).
    ///
    /// Applies to a single-cell chunk as well as to the concatenation of a
    /// multi-row chunk's parts.
    pub max_chunk_bytes: usize,
    /// Maximum number of accumulated row parts per chunk (default: 1000).
    pub max_chunk_parts: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_chunk_bytes: 8 * 1024 * 1024, // 8 MiB
            max_chunk_parts: 1000,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_chunk_bytes: usize::MAX,
            max_chunk_parts: usize::MAX,
        }
    }
}
