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

//! Core scanning and extraction for intercompany message spreadsheets.
//!
//! Trading-partner systems exchange purchase orders as `<intercompanyMessage>`
//! XML documents. Those documents sometimes arrive embedded in a single column
//! of a spreadsheet export, frequently fragmented across many consecutive
//! rows. This crate locates the message boundaries, reassembles the full
//! document text, parses each message with a lenient (error-recovering) XML
//! reader, and flattens every purchase order into one output row per line
//! item across a fixed set of 20 columns.
//!
//! # Pipeline
//!
//! Two independent passes, consumed in sequence:
//!
//! 1. [`Scanner`] walks the raw text cells top to bottom, detects chunk
//!    boundaries with tag-pattern matching (namespace-tolerant,
//!    case-insensitive), reassembles fragmented chunks, and recovers sibling
//!    messages concatenated inside one chunk.
//! 2. [`extract_message`] parses one isolated message and writes its
//!    flattened rows into a [`RowSink`], returning the next free row index.
//!
//! Boundary detection operates only on raw strings; structural extraction
//! operates only on the already-bounded message text. The two passes never
//! mix.
//!
//! # Failure policy
//!
//! Every recoverable condition (oversized chunk, incomplete chunk, chunk
//! without messages, unusable message) is logged via `tracing`, recorded in
//! the returned [`ScanReport`], and skipped. The scanner always completes the
//! full input.
//!
//! # Example
//!
//! ```
//! use icmx_core::{write_header, Grid, Scanner};
//!
//! let rows = vec![
//!     "shipment notes".to_string(),
//!     r#"<intercompanyMessage><purchaseOrder orderNumber="4500001234">
//!        <lineItems><lineItem sequenceNumber="001">
//!        <productIdentifier>7000137654</productIdentifier>
//!        </lineItem></lineItems></purchaseOrder></intercompanyMessage>"#
//!         .to_string(),
//! ];
//!
//! let mut grid = Grid::new();
//! write_header(&mut grid);
//!
//! let report = Scanner::new().scan(&rows, &mut grid, 2);
//! assert_eq!(report.rows_written, 1);
//! assert_eq!(grid.cell(2, 2), "4500001234");
//! ```

pub mod dom;
mod error;
mod extract;
mod limits;
mod scanner;
mod sink;

pub use error::{IcmxError, IcmxErrorKind, Result};
pub use extract::{extract_message, message_stats, MessageStats, COLUMNS};
pub use limits::Limits;
pub use scanner::{
    MessageScan, ScanReport, ScanSkip, ScanSkipKind, ScannedMessage, Scanner,
};
pub use sink::{write_header, Grid, RowSink};
