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

//! Message scanner: boundary detection and chunk reassembly.
//!
//! The scanner walks the raw cells of one spreadsheet column top to bottom.
//! A cell matching the opening-tag pattern (or containing an XML
//! declaration) starts a chunk; the chunk ends at the first subsequent cell
//! containing the closing tag. The reassembled chunk text is then searched
//! for every complete message span, which recovers sibling messages
//! concatenated inside a single chunk.
//!
//! Tag detection is purely textual (case-insensitive, tolerant of a
//! namespace prefix) and never looks at XML structure. Structure is the
//! extractor's concern, applied only to isolated message text.

use crate::extract;
use crate::limits::Limits;
use crate::sink::RowSink;
use regex::Regex;
use std::fmt;
use tracing::{debug, warn};

/// Opening tag, optionally namespace-prefixed: `<intercompanyMessage`,
/// `<po:IntercompanyMessage`, ...
const OPEN_TAG_PATTERN: &str = r"(?i)<\s*(?:\w+:)?intercompanymessage\b";
/// Closing tag with the same prefix tolerance.
const CLOSE_TAG_PATTERN: &str = r"(?i)</\s*(?:\w+:)?intercompanymessage\s*>";
/// One complete message span, non-greedy so sibling messages in the same
/// chunk match separately.
const MESSAGE_SPAN_PATTERN: &str =
    r"(?i)<\s*(?:\w+:)?intercompanymessage\b[\s\S]*?</\s*(?:\w+:)?intercompanymessage\s*>";
/// XML declaration prologue, stripped from extracted spans.
const XML_DECL_PATTERN: &str = r"(?i)\s*<\?xml[^>]*\?>";

/// Why a region of input was skipped without extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanSkipKind {
    /// Chunk exceeded the byte cap.
    SizeExceeded,
    /// Multi-row accumulation exceeded the part cap before a closing tag.
    PartCountExceeded,
    /// Row sequence ended before a closing tag was found.
    IncompleteChunk,
    /// A bounded chunk contained no extractable message span.
    NoMessagesFound,
    /// One message could not be parsed or extracted; its siblings were
    /// still attempted.
    MessageFailed,
}

impl fmt::Display for ScanSkipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeExceeded => write!(f, "SizeExceeded"),
            Self::PartCountExceeded => write!(f, "PartCountExceeded"),
            Self::IncompleteChunk => write!(f, "IncompleteChunk"),
            Self::NoMessagesFound => write!(f, "NoMessagesFound"),
            Self::MessageFailed => write!(f, "MessageFailed"),
        }
    }
}

/// One recoverable skip, recorded in addition to the log line.
#[derive(Debug, Clone)]
pub struct ScanSkip {
    pub kind: ScanSkipKind,
    /// 1-based input row where the skipped region started.
    pub row: usize,
    pub detail: String,
}

/// One reassembled message, ready for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedMessage {
    /// Complete message text, declarations stripped, whitespace trimmed.
    pub text: String,
    /// 1-based input row where the containing chunk started.
    pub source_row: usize,
}

/// Result of the boundary pass alone.
#[derive(Debug, Clone, Default)]
pub struct MessageScan {
    /// Messages in input order.
    pub messages: Vec<ScannedMessage>,
    /// Regions skipped during boundary detection.
    pub skips: Vec<ScanSkip>,
}

/// Result of a full scan-and-extract run.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Next free output row after the last written row.
    pub next_row: usize,
    /// Messages successfully flattened.
    pub messages_extracted: usize,
    /// Messages that failed extraction and were skipped.
    pub messages_failed: usize,
    /// Total output rows written (one per line item).
    pub rows_written: usize,
    /// All recoverable skips, boundary and extraction alike.
    pub skips: Vec<ScanSkip>,
}

/// Locates, reassembles, and extracts intercompany messages from a column
/// of raw cell text.
///
/// Holds only compiled patterns and limits; every scan is independent and
/// carries no state across calls.
#[derive(Debug)]
pub struct Scanner {
    open_tag: Regex,
    close_tag: Regex,
    message_span: Regex,
    xml_decl: Regex,
    limits: Limits,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Scanner with default [`Limits`].
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Scanner with caller-supplied limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            open_tag: Regex::new(OPEN_TAG_PATTERN).expect("hard-coded pattern compiles"),
            close_tag: Regex::new(CLOSE_TAG_PATTERN).expect("hard-coded pattern compiles"),
            message_span: Regex::new(MESSAGE_SPAN_PATTERN).expect("hard-coded pattern compiles"),
            xml_decl: Regex::new(XML_DECL_PATTERN).expect("hard-coded pattern compiles"),
            limits,
        }
    }

    /// Run the boundary pass only: locate chunks, reassemble them, and
    /// return every recovered message without extracting fields.
    pub fn messages(&self, rows: &[String]) -> MessageScan {
        let mut scan = MessageScan::default();
        let total = rows.len();
        let mut i = 0usize;

        while i < total {
            let cell = rows[i].as_str();
            let has_open = self.open_tag.is_match(cell);
            if !has_open && !cell.contains("<?xml") {
                i += 1;
                continue;
            }

            if has_open && self.close_tag.is_match(cell) {
                // Fast path: the entire chunk sits in this one cell.
                if cell.len() > self.limits.max_chunk_bytes {
                    self.skip(
                        &mut scan,
                        ScanSkipKind::SizeExceeded,
                        i + 1,
                        format!(
                            "single-cell chunk of {} bytes exceeds the {} byte limit",
                            cell.len(),
                            self.limits.max_chunk_bytes
                        ),
                    );
                    i += 1;
                    continue;
                }
                debug!(row = i + 1, "single-cell chunk");
                self.collect_spans(cell, i + 1, &mut scan);
                i += 1;
                continue;
            }

            // The closing tag lives on a later row: accumulate parts until
            // it appears. Embedded opening tags along the way stay part of
            // this chunk.
            let mut parts: Vec<&str> = vec![cell];
            let mut j = i + 1;
            let mut overflowed = false;
            while j < total && !self.close_tag.is_match(rows[j].as_str()) {
                parts.push(rows[j].as_str());
                if parts.len() > self.limits.max_chunk_parts {
                    overflowed = true;
                    break;
                }
                j += 1;
            }

            if overflowed {
                self.skip(
                    &mut scan,
                    ScanSkipKind::PartCountExceeded,
                    i + 1,
                    format!(
                        "chunk exceeds {} parts with no closing tag in sight",
                        self.limits.max_chunk_parts
                    ),
                );
                i = j + 1;
                continue;
            }

            if j >= total {
                self.skip(
                    &mut scan,
                    ScanSkipKind::IncompleteChunk,
                    i + 1,
                    "row sequence ended before a closing tag was found".to_string(),
                );
                i += 1;
                continue;
            }

            // Include the closing-tag row.
            parts.push(rows[j].as_str());
            let chunk = parts.concat();

            if chunk.len() > self.limits.max_chunk_bytes {
                self.skip(
                    &mut scan,
                    ScanSkipKind::SizeExceeded,
                    i + 1,
                    format!(
                        "chunk of {} bytes across {} rows exceeds the {} byte limit",
                        chunk.len(),
                        j - i + 1,
                        self.limits.max_chunk_bytes
                    ),
                );
                i = j + 1;
                continue;
            }

            debug!(row = i + 1, parts = j - i + 1, "multi-row chunk reassembled");
            self.collect_spans(&chunk, i + 1, &mut scan);
            i = j + 1;
        }

        scan
    }

    /// Full run: boundary pass, then extraction of every recovered message,
    /// threading the output-row cursor through the extract calls in order.
    pub fn scan(&self, rows: &[String], sink: &mut dyn RowSink, start_row: usize) -> ScanReport {
        let MessageScan { messages, skips } = self.messages(rows);
        let mut report = ScanReport {
            next_row: start_row,
            messages_extracted: 0,
            messages_failed: 0,
            rows_written: 0,
            skips,
        };

        for message in &messages {
            match extract::extract_message(&message.text, sink, report.next_row) {
                Ok(next_row) => {
                    report.rows_written += next_row - report.next_row;
                    report.next_row = next_row;
                    report.messages_extracted += 1;
                }
                Err(err) => {
                    let err = err.with_row(message.source_row);
                    report.messages_failed += 1;
                    self.record(
                        &mut report.skips,
                        ScanSkipKind::MessageFailed,
                        message.source_row,
                        err.to_string(),
                    );
                }
            }
        }

        report
    }

    /// Extract every message span from a bounded chunk.
    fn collect_spans(&self, chunk: &str, start_row: usize, scan: &mut MessageScan) {
        let cleaned = chunk.replace('\u{feff}', "");
        let cleaned = cleaned.trim();

        let mut found = 0usize;
        for span in self.message_span.find_iter(cleaned) {
            let text = self
                .xml_decl
                .replace_all(span.as_str(), "")
                .trim()
                .to_string();
            scan.messages.push(ScannedMessage {
                text,
                source_row: start_row,
            });
            found += 1;
        }

        if found == 0 {
            self.skip(
                scan,
                ScanSkipKind::NoMessagesFound,
                start_row,
                "no intercompany message block found in chunk".to_string(),
            );
        } else {
            debug!(row = start_row, messages = found, "chunk yielded messages");
        }
    }

    fn skip(&self, scan: &mut MessageScan, kind: ScanSkipKind, row: usize, detail: String) {
        self.record(&mut scan.skips, kind, row, detail);
    }

    fn record(&self, skips: &mut Vec<ScanSkip>, kind: ScanSkipKind, row: usize, detail: String) {
        warn!(row, kind = %kind, "{}", detail);
        skips.push(ScanSkip { kind, row, detail });
    }
}
